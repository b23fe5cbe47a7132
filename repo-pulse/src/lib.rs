#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod activity;
pub mod bot;
pub mod chat;
pub mod config;
pub mod listing;
pub mod llm;
pub mod readme;
pub mod report;
pub mod window;

pub use activity::{
    collect_activity, report_for, tally_issues, tally_pull_requests, ActivityError,
    ActivityReport, IssueCounts, IssueSummary, PullRequestCounts, PullRequestSummary,
};
pub use bot::{failure_reply, is_list_command, unrecognized_reply, Bot, BotError, LIST_TRIGGER};
pub use chat::{
    repository_picker, Block, ChatBridge, ChatError, InboundEvent, OutgoingMessage, SlackClient,
    SocketModeConnection, PICKER_HEADER, REPO_BUTTON_ACTION,
};
pub use config::{BotConfig, ConfigError, ORGANIZATION};
pub use listing::{list_repositories, ListingError};
pub use llm::{Completer, LlmCompleter, LlmError, DEFAULT_MODEL};
pub use readme::{
    fetch_readme, summarize_readme, ReadmeError, README_CHAR_LIMIT, README_FALLBACK,
};
pub use report::{format_report, with_readme_summary};
pub use window::{Cutoff, WINDOW_DAYS};

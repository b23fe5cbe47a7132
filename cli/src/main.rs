//! CLI for repo-pulse.
//!
//! Connects the bot to Slack over Socket Mode and answers repository
//! activity requests until interrupted.

use clap::Parser;
use repo_pulse::{Bot, BotConfig, BotError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// repo-pulse - Weekly GitHub activity reports in Slack.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GitHub token used for API calls.
    #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
    github_token: String,

    /// Slack bot token (xoxb-...).
    #[arg(long, env = "SLACK_BOT_TOKEN", hide_env_values = true)]
    slack_bot_token: String,

    /// Slack app-level token (xapp-...) for Socket Mode.
    #[arg(long, env = "SLACK_APP_TOKEN", hide_env_values = true)]
    slack_app_token: String,

    /// Append an LLM-written README summary to each report.
    #[arg(long)]
    readme_summary: bool,

    /// Path to the LLM config file.
    #[arg(long)]
    llm_config_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // rustls needs a process-wide crypto provider for the websocket.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    // Parse arguments
    let args = Args::parse();

    tokio::select! {
        result = run(args) => match result {
            Ok(()) => ExitCode::from(0),
            Err(e) => {
                error!(error = %e, "Critical failure");
                ExitCode::from(2)
            }
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
            ExitCode::from(0)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<(), BotError> {
    let mut config = BotConfig::new(args.github_token, args.slack_bot_token, args.slack_app_token)
        .with_readme_summary(args.readme_summary);
    if let Some(path) = args.llm_config_path {
        config = config.with_llm_config_path(path);
    }

    let octocrab = config.github_client()?;
    let slack = config.slack_client()?;
    let completer = config.completer()?;

    let bot = Bot::new(config, octocrab, slack, completer);
    bot.run().await
}

//! Chat event dispatch.
//!
//! The bot answers two kinds of events: mentions containing the trigger
//! phrase get the repository picker, and clicks on a repository button get
//! that repository's weekly report. Events are handled one at a time; every
//! failure is rendered back to the channel instead of being dropped.

mod error;

pub use error::BotError;

use crate::activity::collect_activity;
use crate::chat::{
    repository_picker, ChatBridge, InboundEvent, OutgoingMessage, SlackClient,
    SocketModeConnection, REPO_BUTTON_ACTION,
};
use crate::config::BotConfig;
use crate::listing::list_repositories;
use crate::llm::Completer;
use crate::readme::summarize_readme;
use crate::report::{format_report, with_readme_summary};
use crate::window::Cutoff;
use octocrab::Octocrab;
use std::fmt::Display;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Case-insensitive phrase that triggers the repository listing.
pub const LIST_TRIGGER: &str = "list repos";

/// Returns true if a mention asks for the repository list.
#[must_use]
pub fn is_list_command(text: &str) -> bool {
    text.to_lowercase().contains(LIST_TRIGGER)
}

/// Reply for mentions that do not contain a known command.
#[must_use]
pub fn unrecognized_reply(user: &str) -> String {
    format!("Hi <@{user}>, I don't recognize that command!")
}

/// Renders a failed operation for the channel.
#[must_use]
pub fn failure_reply(what: &str, error: &dyn Display) -> String {
    format!(":warning: Could not {what}: {error}")
}

/// Dispatches chat events to the reporting components.
pub struct Bot<C, L> {
    config: BotConfig,
    octocrab: Octocrab,
    chat: C,
    completer: Option<L>,
}

impl<C, L> Bot<C, L>
where
    C: ChatBridge + Sync,
    L: Completer + Sync,
{
    /// Creates a bot. README summaries are produced only when a completer
    /// is supplied.
    pub fn new(config: BotConfig, octocrab: Octocrab, chat: C, completer: Option<L>) -> Self {
        Self {
            config,
            octocrab,
            chat,
            completer,
        }
    }

    /// Returns the chat bridge.
    pub fn chat(&self) -> &C {
        &self.chat
    }

    /// Handles one inbound event to completion.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Chat`] if a reply cannot be delivered. Failures of
    /// GitHub or the model are reported to the channel and return `Ok`.
    pub async fn handle(&self, event: InboundEvent) -> Result<(), BotError> {
        match event {
            InboundEvent::Mention {
                user,
                channel,
                text,
            } => self.handle_mention(&user, &channel, &text).await,
            InboundEvent::Action {
                user,
                channel,
                action_id,
                value,
            } => {
                self.handle_action(&user, &channel, &action_id, &value)
                    .await
            }
        }
    }

    /// Handles a mention of the bot.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Chat`] if a reply cannot be delivered.
    pub async fn handle_mention(
        &self,
        user: &str,
        channel: &str,
        text: &str,
    ) -> Result<(), BotError> {
        let span = info_span!("mention", user = %user, channel = %channel);

        async {
            if !is_list_command(text) {
                debug!(text = %text, "Unrecognized command");
                return self
                    .say(channel, OutgoingMessage::Text(unrecognized_reply(user)))
                    .await;
            }

            info!("Listing repositories for picker");
            match list_repositories(&self.octocrab, self.config.org()).await {
                Ok(names) => {
                    for message in repository_picker(&names) {
                        self.say(channel, message).await?;
                    }
                    Ok(())
                }
                Err(e) => {
                    error!(error = %e, "Failed to list repositories");
                    self.say(
                        channel,
                        OutgoingMessage::Text(failure_reply("list repositories", &e)),
                    )
                    .await
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Handles a click on an interactive element. The event has already
    /// been acknowledged by the transport.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Chat`] if a reply cannot be delivered.
    pub async fn handle_action(
        &self,
        user: &str,
        channel: &str,
        action_id: &str,
        value: &str,
    ) -> Result<(), BotError> {
        if action_id != REPO_BUTTON_ACTION {
            debug!(action_id = %action_id, "Ignoring unknown action");
            return Ok(());
        }

        let span = info_span!("repo_report", user = %user, channel = %channel, repo = %value);

        async {
            info!("Building weekly report");
            let reply = match self.build_report(value).await {
                Ok(text) => text,
                Err(e) => {
                    error!(error = %e, "Failed to build report");
                    failure_reply(&format!("build the report for `{value}`"), &e)
                }
            };
            self.say(channel, OutgoingMessage::Text(reply)).await
        }
        .instrument(span)
        .await
    }

    /// Builds the report text for a repository, with the window starting a
    /// week before today.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Activity`] if the activity queries fail.
    pub async fn build_report(&self, repo: &str) -> Result<String, BotError> {
        self.build_report_at(repo, &Cutoff::now()).await
    }

    /// Builds the report text for a repository against a fixed cutoff.
    ///
    /// A failed README summary does not fail the report; the failure is
    /// shown in place of the summary.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Activity`] if the activity queries fail.
    pub async fn build_report_at(&self, repo: &str, cutoff: &Cutoff) -> Result<String, BotError> {
        let org = self.config.org();
        let report = collect_activity(&self.octocrab, org, repo, cutoff).await?;
        let text = format_report(&report);

        let Some(completer) = &self.completer else {
            return Ok(text);
        };

        let summary = match summarize_readme(&self.octocrab, completer, org, repo).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "README summary failed");
                failure_reply("summarize the README", &e)
            }
        };
        Ok(with_readme_summary(&text, &summary))
    }

    /// Reads events from one Socket Mode connection until Slack closes it.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Chat`] on websocket failures. Errors while
    /// handling a single event are logged and do not stop the loop.
    pub async fn serve(&self, connection: &mut SocketModeConnection) -> Result<(), BotError> {
        while let Some(event) = connection.next_event().await? {
            if let Err(e) = self.handle(event).await {
                error!(error = %e, "Failed to handle event");
            }
        }
        Ok(())
    }

    async fn say(&self, channel: &str, message: OutgoingMessage) -> Result<(), BotError> {
        self.chat.say(channel, &message).await?;
        Ok(())
    }
}

impl<L> Bot<SlackClient, L>
where
    L: Completer + Sync,
{
    /// Connects to Slack Socket Mode and serves events, reconnecting
    /// whenever Slack asks for it.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Chat`] if a connection cannot be opened or fails.
    pub async fn run(&self) -> Result<(), BotError> {
        info!(org = %self.config.org(), "Starting bot");
        loop {
            let url = self.chat.open_connection().await?;
            let mut connection = SocketModeConnection::connect(&url).await?;
            self.serve(&mut connection).await?;
            info!("Reconnecting to Slack");
        }
    }
}

//! Chat bridge: inbound events, outgoing messages and the Slack transport.

mod blocks;
mod error;
mod slack;
mod socket;

pub use blocks::{Block, Element, TextObject, MAX_BLOCKS_PER_MESSAGE, REPO_BUTTON_ACTION};
pub use error::ChatError;
pub use slack::{SlackClient, SLACK_API_BASE};
pub use socket::{parse_frame, SocketFrame, SocketModeConnection};

use std::future::Future;

/// Header shown above the repository buttons.
pub const PICKER_HEADER: &str = "*Choose a repo:*";

/// An event delivered to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// The bot was mentioned in a channel.
    Mention {
        user: String,
        channel: String,
        text: String,
    },

    /// A user clicked an interactive element. Already acknowledged.
    Action {
        user: String,
        channel: String,
        action_id: String,
        value: String,
    },
}

/// A message sent back to a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingMessage {
    /// Plain mrkdwn text.
    Text(String),

    /// A block layout with fallback text for notifications.
    Blocks { text: String, blocks: Vec<Block> },
}

impl OutgoingMessage {
    /// Returns the text shown in notifications.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Blocks { text, .. } => text,
        }
    }
}

/// Sends messages to chat channels.
pub trait ChatBridge {
    /// Posts a message to a channel.
    fn say(
        &self,
        channel: &str,
        message: &OutgoingMessage,
    ) -> impl Future<Output = Result<(), ChatError>> + Send;
}

/// Builds the repository picker: a header followed by one button per
/// repository, split across as many messages as Slack's block limit needs.
#[must_use]
pub fn repository_picker(names: &[String]) -> Vec<OutgoingMessage> {
    let mut blocks = Vec::with_capacity(names.len() + 1);
    blocks.push(Block::markdown(PICKER_HEADER));
    blocks.extend(names.iter().map(|name| Block::repository_button(name)));

    blocks
        .chunks(MAX_BLOCKS_PER_MESSAGE)
        .map(|chunk| OutgoingMessage::Blocks {
            text: "Choose a repo".to_string(),
            blocks: chunk.to_vec(),
        })
        .collect()
}

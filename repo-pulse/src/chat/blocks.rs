//! Slack Block Kit payloads used by the bot.

use serde::Serialize;

/// Action id attached to every repository button.
pub const REPO_BUTTON_ACTION: &str = "repo_button";

/// Slack rejects messages with more blocks than this.
pub const MAX_BLOCKS_PER_MESSAGE: usize = 50;

/// A layout block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A block of text.
    Section { text: TextObject },

    /// A row of interactive elements.
    Actions { elements: Vec<Element> },
}

/// A text object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    Mrkdwn { text: String },
    PlainText { text: String },
}

/// An interactive element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Button {
        text: TextObject,
        action_id: String,
        value: String,
    },
}

impl Block {
    /// Creates a mrkdwn section block.
    #[must_use]
    pub fn markdown(text: impl Into<String>) -> Self {
        Self::Section {
            text: TextObject::Mrkdwn { text: text.into() },
        }
    }

    /// Creates an actions block holding one repository button.
    ///
    /// Slack requires action ids to be unique within a block, so every
    /// button gets its own block.
    #[must_use]
    pub fn repository_button(name: &str) -> Self {
        Self::Actions {
            elements: vec![Element::Button {
                text: TextObject::PlainText {
                    text: name.to_string(),
                },
                action_id: REPO_BUTTON_ACTION.to_string(),
                value: name.to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_section() {
        let block = Block::markdown("*Choose a repo:*");
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({ "type": "section", "text": { "type": "mrkdwn", "text": "*Choose a repo:*" } })
        );
    }

    #[test]
    fn serializes_repository_button() {
        let block = Block::repository_button("widgets");
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({
                "type": "actions",
                "elements": [{
                    "type": "button",
                    "text": { "type": "plain_text", "text": "widgets" },
                    "action_id": "repo_button",
                    "value": "widgets"
                }]
            })
        );
    }
}

//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while turning configuration into clients.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// GitHub client construction failed.
    #[error("Failed to build GitHub client: {0}")]
    GitHubClient(#[from] octocrab::Error),

    /// Slack client construction failed.
    #[error("Failed to build Slack client: {0}")]
    SlackClient(#[from] crate::chat::ChatError),

    /// LLM configuration failed.
    #[error("Failed to configure LLM: {0}")]
    Llm(#[from] crate::llm::LlmError),
}

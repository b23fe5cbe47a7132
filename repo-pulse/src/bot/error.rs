//! Bot error types.

use thiserror::Error;

/// Errors that can occur while handling chat events.
#[derive(Debug, Error)]
pub enum BotError {
    /// Configuration errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Repository listing errors.
    #[error(transparent)]
    Listing(#[from] crate::listing::ListingError),

    /// Activity aggregation errors.
    #[error(transparent)]
    Activity(#[from] crate::activity::ActivityError),

    /// README summarization errors.
    #[error(transparent)]
    Readme(#[from] crate::readme::ReadmeError),

    /// Slack errors.
    #[error(transparent)]
    Chat(#[from] crate::chat::ChatError),
}

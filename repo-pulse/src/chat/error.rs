//! Chat bridge error types.

use thiserror::Error;

/// Errors that can occur while talking to Slack.
#[derive(Debug, Error)]
pub enum ChatError {
    /// HTTP transport error.
    #[error("Slack HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Slack answered with `ok: false`.
    #[error("Slack API method '{method}' failed: {error}")]
    Api { method: String, error: String },

    /// Invalid Slack API base URL.
    #[error("Invalid Slack API URL: {0}")]
    Url(#[from] url::ParseError),

    /// Websocket transport error.
    #[error("Socket Mode connection error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Malformed Socket Mode envelope.
    #[error("Malformed Socket Mode envelope: {0}")]
    Envelope(#[from] serde_json::Error),
}

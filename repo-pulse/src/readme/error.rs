//! README summarization error types.

use crate::llm::LlmError;
use thiserror::Error;

/// Errors that can occur while summarizing a README.
#[derive(Debug, Error)]
pub enum ReadmeError {
    /// Transport error talking to GitHub.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The README response was not the expected JSON.
    #[error("Unexpected README response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The README content was not valid base64.
    #[error("README content is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    /// The completion call failed.
    #[error("Summary generation failed: {0}")]
    Llm(#[from] LlmError),
}

//! Activity aggregation error types.

use thiserror::Error;

/// Errors that can occur while collecting repository activity.
#[derive(Debug, Error)]
pub enum ActivityError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),
}

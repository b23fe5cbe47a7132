//! Repository listing error types.

use thiserror::Error;

/// Errors that can occur while listing organization repositories.
#[derive(Debug, Error)]
pub enum ListingError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),
}

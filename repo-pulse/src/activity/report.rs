//! Weekly activity report.

use serde::Serialize;

/// Activity counts for a single repository over the reporting window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityReport {
    /// Repository name.
    pub repository: String,

    /// Commits since the cutoff.
    pub commits: usize,

    /// Pull requests merged since the cutoff.
    pub merged_prs: usize,

    /// Pull requests currently open.
    pub open_prs: usize,

    /// Pull requests closed without merging since the cutoff.
    pub closed_prs: usize,

    /// Issues created since the cutoff.
    pub created_issues: usize,

    /// Issues closed since the cutoff.
    pub closed_issues: usize,
}

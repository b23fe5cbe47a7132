//! Reduction of pull request and issue listings into counts.

use crate::window::Cutoff;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// The fields of a pull request used for classification.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestSummary {
    /// `open` or `closed`.
    pub state: String,

    /// When the pull request was merged, if it was.
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,

    /// When the pull request was closed, if it was.
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
}

/// The fields of an issue used for counting.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueSummary {
    /// When the issue was opened.
    pub created_at: DateTime<Utc>,

    /// When the issue was closed, if it was.
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,

    /// Present when the entry is actually a pull request.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

/// Pull request counts. Each pull request lands in at most one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PullRequestCounts {
    pub merged: usize,
    pub open: usize,
    pub closed: usize,
}

/// Issue counts. The two counters are independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueCounts {
    pub created: usize,
    pub closed: usize,
}

/// Classifies pull requests as merged, open or closed.
///
/// Merged wins over the other buckets: a pull request merged inside the
/// window is never also counted as closed.
#[must_use]
pub fn tally_pull_requests(pulls: &[PullRequestSummary], cutoff: &Cutoff) -> PullRequestCounts {
    let mut counts = PullRequestCounts::default();

    for pull in pulls {
        if pull.merged_at.is_some_and(|at| cutoff.contains(&at)) {
            counts.merged += 1;
        } else if pull.state == "open" {
            counts.open += 1;
        } else if pull.state == "closed" && pull.closed_at.is_some_and(|at| cutoff.contains(&at)) {
            counts.closed += 1;
        }
    }

    counts
}

/// Counts issues created and closed inside the window.
///
/// Entries carrying a `pull_request` field are skipped. An issue opened and
/// closed in the same week increments both counters.
#[must_use]
pub fn tally_issues(issues: &[IssueSummary], cutoff: &Cutoff) -> IssueCounts {
    let mut counts = IssueCounts::default();

    for issue in issues.iter().filter(|issue| issue.pull_request.is_none()) {
        if cutoff.contains(&issue.created_at) {
            counts.created += 1;
        }
        if issue.closed_at.is_some_and(|at| cutoff.contains(&at)) {
            counts.closed += 1;
        }
    }

    counts
}

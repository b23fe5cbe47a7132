//! Weekly activity aggregation.
//!
//! Collects commit, pull request and issue counts for one repository. Each
//! source is a single bounded request; nothing here paginates.

mod error;
mod report;
mod tally;

pub use error::ActivityError;
pub use report::ActivityReport;
pub use tally::{
    tally_issues, tally_pull_requests, IssueCounts, IssueSummary, PullRequestCounts,
    PullRequestSummary,
};

use crate::window::Cutoff;
use octocrab::Octocrab;
use serde::de::IgnoredAny;
use serde::Serialize;
use tracing::{debug, info, info_span, Instrument};

/// Page size used for the pull request and issue queries.
pub const ACTIVITY_PAGE_SIZE: u8 = 100;

#[derive(Debug, Serialize)]
struct CommitsQuery {
    since: String,
}

#[derive(Debug, Serialize)]
struct PullsQuery {
    state: &'static str,
    per_page: u8,
}

#[derive(Debug, Serialize)]
struct IssuesQuery {
    since: String,
    state: &'static str,
    per_page: u8,
}

/// Collects the activity report for a repository, computing the cutoff now.
///
/// # Errors
///
/// Returns [`ActivityError`] if any of the three queries fails.
pub async fn report_for(
    octocrab: &Octocrab,
    org: &str,
    repo: &str,
) -> Result<ActivityReport, ActivityError> {
    collect_activity(octocrab, org, repo, &Cutoff::now()).await
}

/// Collects the activity report for a repository against a fixed cutoff.
///
/// # Arguments
///
/// * `octocrab` - Authenticated GitHub client
/// * `org` - Organization owning the repository
/// * `repo` - Repository name
/// * `cutoff` - Start of the reporting window, shared by all three queries
///
/// # Errors
///
/// Returns [`ActivityError`] if any of the three queries fails.
pub async fn collect_activity(
    octocrab: &Octocrab,
    org: &str,
    repo: &str,
    cutoff: &Cutoff,
) -> Result<ActivityReport, ActivityError> {
    let span = info_span!("collect_activity", org = %org, repo = %repo, cutoff = %cutoff);

    async {
        info!("Collecting weekly activity");

        let commits = count_commits(octocrab, org, repo, cutoff).await?;

        let pulls = fetch_pull_requests(octocrab, org, repo).await?;
        let pull_counts = tally_pull_requests(&pulls, cutoff);

        let issues = fetch_issues(octocrab, org, repo, cutoff).await?;
        let issue_counts = tally_issues(&issues, cutoff);

        let report = ActivityReport {
            repository: repo.to_string(),
            commits,
            merged_prs: pull_counts.merged,
            open_prs: pull_counts.open,
            closed_prs: pull_counts.closed,
            created_issues: issue_counts.created,
            closed_issues: issue_counts.closed,
        };

        info!(
            commits = report.commits,
            merged = report.merged_prs,
            open = report.open_prs,
            closed = report.closed_prs,
            issues_created = report.created_issues,
            issues_closed = report.closed_issues,
            "Activity collected"
        );
        Ok(report)
    }
    .instrument(span)
    .await
}

/// Counts commits since the cutoff.
///
/// Only the first page is read, so repositories busier than the endpoint's
/// default page size are undercounted.
async fn count_commits(
    octocrab: &Octocrab,
    org: &str,
    repo: &str,
    cutoff: &Cutoff,
) -> Result<usize, ActivityError> {
    let query = CommitsQuery {
        since: cutoff.as_iso(),
    };
    let commits: Vec<IgnoredAny> = octocrab
        .get(format!("/repos/{org}/{repo}/commits"), Some(&query))
        .await?;
    debug!(count = commits.len(), "Fetched commits");
    Ok(commits.len())
}

/// Fetches the most recent pull requests in any state.
async fn fetch_pull_requests(
    octocrab: &Octocrab,
    org: &str,
    repo: &str,
) -> Result<Vec<PullRequestSummary>, ActivityError> {
    let query = PullsQuery {
        state: "all",
        per_page: ACTIVITY_PAGE_SIZE,
    };
    let pulls: Vec<PullRequestSummary> = octocrab
        .get(format!("/repos/{org}/{repo}/pulls"), Some(&query))
        .await?;
    debug!(count = pulls.len(), "Fetched pull requests");
    Ok(pulls)
}

/// Fetches issues updated since the cutoff, pull requests included.
async fn fetch_issues(
    octocrab: &Octocrab,
    org: &str,
    repo: &str,
    cutoff: &Cutoff,
) -> Result<Vec<IssueSummary>, ActivityError> {
    let query = IssuesQuery {
        since: cutoff.as_iso(),
        state: "all",
        per_page: ACTIVITY_PAGE_SIZE,
    };
    let issues: Vec<IssueSummary> = octocrab
        .get(format!("/repos/{org}/{repo}/issues"), Some(&query))
        .await?;
    debug!(count = issues.len(), "Fetched issues");
    Ok(issues)
}

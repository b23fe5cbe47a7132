//! Chat rendering of activity reports.

use crate::activity::ActivityReport;

/// Renders an activity report as a four-line mrkdwn block.
#[must_use]
pub fn format_report(report: &ActivityReport) -> String {
    format!(
        "*Repo:* `{name}`\n\
- Commits (past week): {commits}\n\
- PRs: Merged={merged}, Open={open}, Closed={closed}\n\
- Issues: Created={created}, Closed={issues_closed}",
        name = report.repository,
        commits = report.commits,
        merged = report.merged_prs,
        open = report.open_prs,
        closed = report.closed_prs,
        created = report.created_issues,
        issues_closed = report.closed_issues,
    )
}

/// Appends a README summary section below a formatted report.
#[must_use]
pub fn with_readme_summary(report: &str, summary: &str) -> String {
    format!("{report}\n\n*README summary:*\n{summary}")
}

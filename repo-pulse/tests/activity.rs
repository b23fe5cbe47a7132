mod common;

use chrono::{Duration, NaiveDate, Utc};
use repo_pulse::{collect_activity, format_report, report_for, ActivityError, ActivityReport, Cutoff};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cutoff() -> Cutoff {
    Cutoff::from_today(NaiveDate::from_ymd_opt(2024, 5, 15).unwrap())
}

async fn mount(server: &MockServer, route: &str, query: &[(&str, &str)], body: Value) {
    let mut mock = Mock::given(method("GET")).and(path(route));
    for (key, value) in query {
        mock = mock.and(query_param(*key, *value));
    }
    mock.respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Repository "a": 3 commits, 1 merged PR, 0 open, 1 closed this week,
/// 2 issues created this week and none closed.
async fn mount_repository_a(server: &MockServer) {
    mount(
        server,
        "/repos/acme/a/commits",
        &[("since", "2024-05-08")],
        json!([{ "sha": "1" }, { "sha": "2" }, { "sha": "3" }]),
    )
    .await;

    mount(
        server,
        "/repos/acme/a/pulls",
        &[("state", "all"), ("per_page", "100")],
        json!([
            { "number": 4, "state": "closed", "merged_at": "2024-05-10T08:00:00Z", "closed_at": "2024-05-10T08:00:00Z" },
            { "number": 3, "state": "closed", "merged_at": null, "closed_at": "2024-05-13T17:30:00Z" },
            { "number": 2, "state": "closed", "merged_at": "2024-04-02T08:00:00Z", "closed_at": "2024-04-02T08:00:00Z" },
            { "number": 1, "state": "closed", "merged_at": null, "closed_at": "2024-03-01T08:00:00Z" }
        ]),
    )
    .await;

    mount(
        server,
        "/repos/acme/a/issues",
        &[("since", "2024-05-08"), ("state", "all"), ("per_page", "100")],
        json!([
            { "number": 9, "created_at": "2024-05-09T10:00:00Z", "closed_at": null },
            { "number": 8, "created_at": "2024-05-14T10:00:00Z", "closed_at": null },
            { "number": 4, "created_at": "2024-05-09T10:00:00Z", "closed_at": "2024-05-10T08:00:00Z",
              "pull_request": { "url": "https://api.github.com/repos/acme/a/pulls/4" } },
            { "number": 7, "created_at": "2024-02-01T10:00:00Z", "closed_at": null }
        ]),
    )
    .await;
}

#[tokio::test]
async fn collects_weekly_activity() {
    let server = MockServer::start().await;
    mount_repository_a(&server).await;

    let report = collect_activity(&common::github(&server), "acme", "a", &cutoff())
        .await
        .unwrap();

    assert_eq!(
        report,
        ActivityReport {
            repository: "a".to_string(),
            commits: 3,
            merged_prs: 1,
            open_prs: 0,
            closed_prs: 1,
            created_issues: 2,
            closed_issues: 0,
        }
    );

    let text = format_report(&report);
    assert!(text.contains("Commits (past week): 3"));
    assert!(text.contains("PRs: Merged=1, Open=0, Closed=1"));
    assert!(text.contains("Issues: Created=2, Closed=0"));
}

#[tokio::test]
async fn report_for_uses_a_window_ending_today() {
    let server = MockServer::start().await;
    let since = Cutoff::now().as_iso();
    let yesterday = (Utc::now() - Duration::days(1)).to_rfc3339();
    let last_month = (Utc::now() - Duration::days(30)).to_rfc3339();

    mount(
        &server,
        "/repos/acme/b/commits",
        &[("since", since.as_str())],
        json!([]),
    )
    .await;
    mount(
        &server,
        "/repos/acme/b/pulls",
        &[],
        json!([
            { "state": "open", "merged_at": null, "closed_at": null },
            { "state": "closed", "merged_at": null, "closed_at": last_month }
        ]),
    )
    .await;
    mount(
        &server,
        "/repos/acme/b/issues",
        &[("since", since.as_str())],
        json!([{ "created_at": last_month, "closed_at": yesterday }]),
    )
    .await;

    let report = report_for(&common::github(&server), "acme", "b")
        .await
        .unwrap();

    assert_eq!(report.commits, 0);
    assert_eq!(report.open_prs, 1);
    assert_eq!(report.closed_prs, 0);
    assert_eq!(report.created_issues, 0);
    assert_eq!(report.closed_issues, 1);
}

#[tokio::test]
async fn failing_query_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/gone/commits"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&server)
        .await;

    let result = collect_activity(&common::github(&server), "acme", "gone", &cutoff()).await;

    assert!(matches!(result, Err(ActivityError::GitHubError(_))));
}

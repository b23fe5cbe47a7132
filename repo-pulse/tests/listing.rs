mod common;

use repo_pulse::{list_repositories, ListingError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page(start: usize, count: usize) -> serde_json::Value {
    json!((start..start + count)
        .map(|i| json!({ "name": format!("repo-{i:03}"), "private": false }))
        .collect::<Vec<_>>())
}

async fn mount_page(server: &MockServer, number: u32, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(query_param("page", number.to_string()))
        .and(query_param("per_page", "100"))
        .and(query_param("type", "public"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn lists_all_pages_until_empty_page() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page(0, 100)).await;
    mount_page(&server, 2, page(100, 100)).await;
    mount_page(&server, 3, page(200, 50)).await;
    mount_page(&server, 4, json!([])).await;

    let names = list_repositories(&common::github(&server), "acme")
        .await
        .unwrap();

    assert_eq!(names.len(), 250);
    assert_eq!(names.first().map(String::as_str), Some("repo-000"));
    assert_eq!(names.last().map(String::as_str), Some("repo-249"));
    assert!(names.windows(2).all(|pair| pair[0] < pair[1]));

    // ceil(250 / 100) + 1
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
}

#[tokio::test]
async fn full_last_page_costs_one_more_request() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page(0, 100)).await;
    mount_page(&server, 2, json!([])).await;

    let names = list_repositories(&common::github(&server), "acme")
        .await
        .unwrap();

    assert_eq!(names.len(), 100);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn empty_organization_returns_no_names() {
    let server = MockServer::start().await;
    mount_page(&server, 1, json!([])).await;

    let names = list_repositories(&common::github(&server), "acme")
        .await
        .unwrap();

    assert!(names.is_empty());
}

#[tokio::test]
async fn duplicate_names_are_kept() {
    let server = MockServer::start().await;
    mount_page(&server, 1, json!([{ "name": "a" }, { "name": "a" }])).await;
    mount_page(&server, 2, json!([])).await;

    let names = list_repositories(&common::github(&server), "acme")
        .await
        .unwrap();

    assert_eq!(names, vec!["a", "a"]);
}

#[tokio::test]
async fn error_status_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&server)
        .await;

    let result = list_repositories(&common::github(&server), "acme").await;

    assert!(matches!(result, Err(ListingError::GitHubError(_))));
}

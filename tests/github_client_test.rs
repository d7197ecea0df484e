//! Integration tests for the GitHub client with a mocked API.

mod common;

use chrono::{TimeZone, Utc};
use common::{comparison_json, github_error_json, mock_github_client, mount_commits};
use dailytweet::error::GitHubError;
use dailytweet::github::{CommitWindow, GitHubClient, SourceHost};
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn window() -> CommitWindow {
    CommitWindow::ending_at(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(), 4)
}

// =============================================================================
// LISTING TESTS
// =============================================================================

#[tokio::test]
async fn test_list_commits_preserves_order() {
    let server = MockServer::start().await;
    mount_commits(&server, "acme", "widgets", &["c1", "c2", "c3"]).await;

    let client = mock_github_client(&server);
    let commits = client
        .list_commits("acme", "widgets", &window())
        .await
        .expect("Expected commits");

    let shas: Vec<&str> = commits.iter().map(|c| c.sha.as_str()).collect();
    assert_eq!(shas, vec!["c1", "c2", "c3"]);
}

#[tokio::test]
async fn test_list_commits_sends_window_and_page_size() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/commits"))
        .and(query_param("per_page", "20"))
        .and(query_param("since", "2024-06-11T12:00:00Z"))
        .and(query_param("until", "2024-06-15T12:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![
            common::commit_json("c1"),
            common::commit_json("c2"),
        ]))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_github_client(&server);
    let commits = client.list_commits("acme", "widgets", &window()).await;
    assert!(commits.is_ok(), "Expected success, got {:?}", commits.err());
}

#[tokio::test]
async fn test_client_sends_credentials_and_api_version() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/commits"))
        .and(header_exists("authorization"))
        .and(header("x-github-api-version", "2022-11-28"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![
            common::commit_json("c1"),
            common::commit_json("c2"),
        ]))
        .expect(1)
        .mount(&server)
        .await;

    let client = GitHubClient::new("test-token", &server.uri()).expect("Failed to build client");
    let commits = client.list_commits("acme", "widgets", &window()).await;
    assert!(commits.is_ok(), "Expected success, got {:?}", commits.err());
}

#[tokio::test]
async fn test_single_commit_is_insufficient_history() {
    let server = MockServer::start().await;
    mount_commits(&server, "acme", "empty", &["only"]).await;

    let client = mock_github_client(&server);
    let result = client.list_commits("acme", "empty", &window()).await;

    assert!(matches!(
        result,
        Err(GitHubError::InsufficientHistory { found: 1 })
    ));
}

#[tokio::test]
async fn test_empty_listing_is_insufficient_history() {
    let server = MockServer::start().await;
    mount_commits(&server, "acme", "empty", &[]).await;

    let client = mock_github_client(&server);
    let result = client.list_commits("acme", "empty", &window()).await;

    assert!(matches!(
        result,
        Err(GitHubError::InsufficientHistory { found: 0 })
    ));
}

#[tokio::test]
async fn test_listing_not_found_keeps_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/missing/commits"))
        .respond_with(ResponseTemplate::new(404).set_body_json(github_error_json("Not Found")))
        .mount(&server)
        .await;

    let client = mock_github_client(&server);
    let result = client.list_commits("acme", "missing", &window()).await;

    assert!(matches!(result, Err(GitHubError::ListCommits { status: 404 })));
}

#[tokio::test]
async fn test_listing_forbidden_keeps_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/commits"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(github_error_json("API rate limit exceeded")),
        )
        .mount(&server)
        .await;

    let client = mock_github_client(&server);
    let result = client.list_commits("acme", "widgets", &window()).await;

    assert!(matches!(result, Err(GitHubError::ListCommits { status: 403 })));
}

// =============================================================================
// COMPARISON TESTS
// =============================================================================

#[tokio::test]
async fn test_compare_returns_files_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/compare/c2...c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(comparison_json(&[
            ("src/lib.rs", Some("+pub fn new() {}")),
            ("assets/logo.png", None),
            ("README.md", Some("+usage")),
        ])))
        .mount(&server)
        .await;

    let client = mock_github_client(&server);
    let files = client
        .compare("acme", "widgets", "c2", "c1")
        .await
        .expect("Expected files");

    assert_eq!(files.len(), 3);
    assert_eq!(files[0].filename, "src/lib.rs");
    assert_eq!(files[0].patch.as_deref(), Some("+pub fn new() {}"));
    assert_eq!(files[1].filename, "assets/logo.png");
    assert!(files[1].patch.is_none());
    assert_eq!(files[2].filename, "README.md");
}

#[tokio::test]
async fn test_compare_not_found_keeps_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/compare/c2...c1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(github_error_json("Not Found")))
        .mount(&server)
        .await;

    let client = mock_github_client(&server);
    let result = client.compare("acme", "widgets", "c2", "c1").await;

    assert!(matches!(result, Err(GitHubError::Compare { status: 404 })));
}

#[tokio::test]
async fn test_compare_unprocessable_keeps_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/compare/c2...c1"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(github_error_json("No common ancestor")),
        )
        .mount(&server)
        .await;

    let client = mock_github_client(&server);
    let result = client.compare("acme", "widgets", "c2", "c1").await;

    assert!(matches!(result, Err(GitHubError::Compare { status: 422 })));
}

#[tokio::test]
async fn test_compare_without_files_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/compare/c2...c1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "identical"})),
        )
        .mount(&server)
        .await;

    let client = mock_github_client(&server);
    let files = client.compare("acme", "widgets", "c2", "c1").await.unwrap();
    assert!(files.is_empty());
}

// =============================================================================
// UPSTREAM FAILURE TESTS
// =============================================================================

#[tokio::test]
async fn test_listing_server_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/commits"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(github_error_json("Service Unavailable")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = GitHubClient::new("test-token", &server.uri()).expect("Failed to build client");
    let result = client.list_commits("acme", "widgets", &window()).await;

    assert!(matches!(result, Err(GitHubError::ListCommits { status: 503 })));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_compare_server_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/compare/c2...c1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(github_error_json("Server Error")))
        .expect(1)
        .mount(&server)
        .await;

    let client = GitHubClient::new("test-token", &server.uri()).expect("Failed to build client");
    let result = client.compare("acme", "widgets", "c2", "c1").await;

    assert!(matches!(result, Err(GitHubError::Compare { status: 500 })));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_listing_text_error_body_keeps_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/commits"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string("<html>nope</html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;

    let client = mock_github_client(&server);
    let result = client.list_commits("acme", "widgets", &window()).await;

    assert!(matches!(result, Err(GitHubError::ListCommits { status: 404 })));
}

#[tokio::test]
async fn test_compare_text_error_body_keeps_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/compare/c2...c1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_github_client(&server);
    let result = client.compare("acme", "widgets", "c2", "c1").await;

    assert!(matches!(result, Err(GitHubError::Compare { status: 503 })));
}

#[tokio::test]
async fn test_undecodable_success_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = mock_github_client(&server);
    let result = client.list_commits("acme", "widgets", &window()).await;

    assert!(matches!(result, Err(GitHubError::Decode(_))));
}

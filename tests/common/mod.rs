//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dailytweet::error::ModelError;
use dailytweet::github::GitHubClient;
use dailytweet::llm::TextModel;
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a GitHub client pointing to a mock server.
pub fn mock_github_client(server: &MockServer) -> GitHubClient {
    let octocrab = Octocrab::builder()
        .add_retry_config(RetryConfig::None)
        .base_uri(server.uri())
        .expect("Failed to set base URI")
        .build()
        .expect("Failed to build octocrab");
    GitHubClient::with_client(octocrab)
}

/// GitHub-shaped commit listing entry.
pub fn commit_json(sha: &str) -> Value {
    json!({
        "sha": sha,
        "node_id": format!("C_{}", sha),
        "commit": {
            "message": format!("commit {}", sha),
            "author": { "name": "Test User", "email": "test@example.com", "date": "2024-06-15T12:00:00Z" }
        },
        "url": format!("https://api.github.com/repos/acme/widgets/commits/{}", sha),
        "html_url": format!("https://github.com/acme/widgets/commit/{}", sha),
        "parents": []
    })
}

/// GitHub-shaped comparison body with one entry per `(filename, patch)`.
pub fn comparison_json(files: &[(&str, Option<&str>)]) -> Value {
    let files: Vec<Value> = files
        .iter()
        .map(|(filename, patch)| {
            let mut file = json!({
                "sha": "bbcd538c8e72b8c175046e27cc8f907076331401",
                "filename": filename,
                "status": "modified",
                "additions": 1,
                "deletions": 1,
                "changes": 2
            });
            if let Some(patch) = patch {
                file["patch"] = json!(patch);
            }
            file
        })
        .collect();

    json!({
        "status": "ahead",
        "ahead_by": 1,
        "behind_by": 0,
        "total_commits": 1,
        "files": files
    })
}

/// GitHub-shaped error body.
pub fn github_error_json(message: &str) -> Value {
    json!({
        "message": message,
        "documentation_url": "https://docs.github.com/rest"
    })
}

/// Mount a commit listing for `owner/repo` returning `shas`.
pub async fn mount_commits(server: &MockServer, owner: &str, repo: &str, shas: &[&str]) {
    let body: Vec<Value> = shas.iter().map(|sha| commit_json(sha)).collect();
    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/{}/commits", owner, repo)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a comparison `older...newer` with one patched file.
pub async fn mount_compare(
    server: &MockServer,
    owner: &str,
    repo: &str,
    older: &str,
    newer: &str,
    filename: &str,
) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/repos/{}/{}/compare/{}...{}",
            owner, repo, older, newer
        )))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(comparison_json(&[(filename, Some("@@ -1 +1 @@\n-old\n+new"))])),
        )
        .mount(server)
        .await;
}

/// A model that replays scripted answers and records every call.
#[derive(Default)]
pub struct ScriptedModel {
    responses: Mutex<VecDeque<Result<String, ModelError>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedModel {
    pub fn new(responses: Vec<Result<String, ModelError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Answer every call with `text`.
    pub fn answering(texts: &[&str]) -> Arc<Self> {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    /// Recorded `(system, user)` pairs, in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextModel for ScriptedModel {
    async fn complete(&self, system: &str, user: &str) -> Result<String, ModelError> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ModelError::EmptyResponse))
    }
}

//! Commit listing and comparison via octocrab.

use async_trait::async_trait;
use http::header::{ACCEPT, HeaderName};
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GitHubError;

use super::window::CommitWindow;

/// Public GitHub REST API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Commits requested per listing call.
const COMMITS_PER_PAGE: u8 = 20;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";

/// One commit from the listing call. Other fields of the payload are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    pub sha: String,
}

/// One file's textual diff from a comparison.
///
/// `patch` is absent for binary files and pure renames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub filename: String,
    #[serde(default)]
    pub patch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Comparison {
    #[serde(default)]
    files: Vec<FileChange>,
}

#[derive(Debug)]
struct ListCommitsParams {
    per_page: u8,
    since: String,
    until: String,
}

impl ListCommitsParams {
    /// Query string for the listing call. Timestamps are RFC 3339 in UTC and
    /// need no escaping.
    fn to_query(&self) -> String {
        format!(
            "per_page={}&since={}&until={}",
            self.per_page, self.since, self.until
        )
    }
}

/// Read access to a source-code host.
///
/// This abstraction allows mocking GitHub in pipeline tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SourceHost: Send + Sync {
    /// List commits inside `window`, newest first.
    ///
    /// Fails with `InsufficientHistory` when fewer than two commits come back.
    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        window: &CommitWindow,
    ) -> Result<Vec<CommitRef>, GitHubError>;

    /// File changes between `older_sha` and `newer_sha`.
    async fn compare(
        &self,
        owner: &str,
        repo: &str,
        older_sha: &str,
        newer_sha: &str,
    ) -> Result<Vec<FileChange>, GitHubError>;
}

/// GitHub REST client holding the credential headers for every call.
#[derive(Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
}

impl GitHubClient {
    /// Build a client for `api_url` authenticated with `token`.
    pub fn new(token: &str, api_url: &str) -> Result<Self, GitHubError> {
        let octocrab = Octocrab::builder()
            .personal_token(token.to_string())
            .add_header(ACCEPT, GITHUB_MEDIA_TYPE.to_string())
            .add_header(
                HeaderName::from_static(API_VERSION_HEADER),
                API_VERSION.to_string(),
            )
            .add_retry_config(RetryConfig::None)
            .base_uri(api_url)
            .map_err(|e| GitHubError::ClientBuild(Box::new(e)))?
            .build()
            .map_err(|e| GitHubError::ClientBuild(Box::new(e)))?;

        Ok(Self::with_client(octocrab))
    }

    /// Wrap a pre-configured octocrab client.
    ///
    /// This allows dependency injection for testing with mock servers. The
    /// client should be built with `RetryConfig::None`; failed calls are
    /// never repeated here.
    pub fn with_client(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }

    /// GET `uri` and decode a JSON body.
    ///
    /// Any non-2xx status becomes `on_status(status)` before the body is
    /// read, so HTML or plain-text error pages keep their status code.
    async fn get_json<T, F>(&self, uri: String, on_status: F) -> Result<T, GitHubError>
    where
        T: DeserializeOwned,
        F: FnOnce(u16) -> GitHubError,
    {
        let response = self
            .octocrab
            ._get(uri)
            .await
            .map_err(|e| GitHubError::Request(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(on_status(status.as_u16()));
        }

        let body = self
            .octocrab
            .body_to_string(response)
            .await
            .map_err(|e| GitHubError::Request(Box::new(e)))?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl SourceHost for GitHubClient {
    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        window: &CommitWindow,
    ) -> Result<Vec<CommitRef>, GitHubError> {
        let route = format!("/repos/{owner}/{repo}/commits");
        let params = ListCommitsParams {
            per_page: COMMITS_PER_PAGE,
            since: window.since_param(),
            until: window.until_param(),
        };

        let commits: Vec<CommitRef> = self
            .get_json(format!("{route}?{}", params.to_query()), |status| {
                warn!(owner, repo, status, "Listing commits failed");
                GitHubError::ListCommits { status }
            })
            .await?;

        debug!(owner, repo, count = commits.len(), "Listed commits");

        if commits.len() < 2 {
            return Err(GitHubError::InsufficientHistory {
                found: commits.len(),
            });
        }

        Ok(commits)
    }

    async fn compare(
        &self,
        owner: &str,
        repo: &str,
        older_sha: &str,
        newer_sha: &str,
    ) -> Result<Vec<FileChange>, GitHubError> {
        let route = format!("/repos/{owner}/{repo}/compare/{older_sha}...{newer_sha}");

        let comparison: Comparison = self
            .get_json(route, |status| {
                warn!(owner, repo, older_sha, newer_sha, status, "Comparing commits failed");
                GitHubError::Compare { status }
            })
            .await?;

        debug!(
            owner,
            repo,
            older_sha,
            newer_sha,
            files = comparison.files.len(),
            "Compared commits"
        );

        Ok(comparison.files)
    }
}

//! Error types for dailytweet modules using thiserror.

use thiserror::Error;

/// Errors from GitHub API operations.
#[derive(Error, Debug)]
pub enum GitHubError {
    #[error(
        "GitHub authentication failed: no token found. Pass --github-token or set GITHUB_API, GITHUB_TOKEN or GH_TOKEN"
    )]
    AuthenticationFailed,

    #[error("Failed to build GitHub client: {0}")]
    ClientBuild(#[source] Box<octocrab::Error>),

    #[error("Listing commits failed with HTTP status {status}")]
    ListCommits { status: u16 },

    #[error("Comparing commits failed with HTTP status {status}")]
    Compare { status: u16 },

    #[error("Found {found} commit(s) in the time window, at least two are needed to diff")]
    InsufficientHistory { found: usize },

    #[error("GitHub request failed: {0}")]
    Request(#[source] Box<octocrab::Error>),

    #[error("Failed to decode GitHub response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors from text-generation model calls.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to build model client: {0}")]
    Client(String),

    #[error("Model request failed: {0}")]
    Request(String),

    #[error("Model call timed out after {0} seconds")]
    Timeout(u64),

    #[error("Model returned no content")]
    EmptyResponse,
}

/// Errors that end a digest request.
#[derive(Error, Debug)]
pub enum DigestError {
    #[error(transparent)]
    Upstream(#[from] GitHubError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Recent commits contain no textual changes to describe")]
    NothingToDescribe,

    #[error("Invalid repository path: {0}")]
    InvalidRepository(String),

    #[error("Invalid query parameters: {0}")]
    InvalidQuery(String),
}

impl DigestError {
    /// Status code reported to the caller.
    ///
    /// Upstream HTTP failures keep GitHub's status; everything else gets a
    /// fixed code.
    pub fn status_code(&self) -> u16 {
        match self {
            DigestError::Upstream(GitHubError::ListCommits { status })
            | DigestError::Upstream(GitHubError::Compare { status }) => *status,
            DigestError::Upstream(GitHubError::InsufficientHistory { .. }) => 400,
            DigestError::Upstream(_) => 502,
            DigestError::Model(_) => 500,
            DigestError::NothingToDescribe
            | DigestError::InvalidRepository(_)
            | DigestError::InvalidQuery(_) => 400,
        }
    }

    /// Generic message safe to show to the caller (no internal detail).
    pub fn public_message(&self) -> &'static str {
        match self {
            DigestError::Upstream(GitHubError::Compare { .. }) => "Error while comparing commits",
            DigestError::Upstream(GitHubError::InsufficientHistory { .. }) => {
                "Commits must be greater than one"
            }
            DigestError::Upstream(_) => "Something went wrong!",
            DigestError::Model(_) => "Failed to generate tweet",
            DigestError::NothingToDescribe => "No textual changes found in recent commits",
            DigestError::InvalidRepository(_) => "Invalid repository path",
            DigestError::InvalidQuery(_) => "Invalid query parameters",
        }
    }
}

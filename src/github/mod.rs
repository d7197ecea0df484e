//! GitHub API operations using octocrab.

pub mod auth;
pub mod client;
pub mod window;

pub use auth::get_github_token;
pub use client::{CommitRef, DEFAULT_API_URL, FileChange, GitHubClient, SourceHost};
pub use window::{CommitWindow, DEFAULT_LOOKBACK_DAYS};

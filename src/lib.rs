//! dailytweet - A web service that turns recent GitHub commits into a short developer status update.
//!
//! # Overview
//!
//! dailytweet lists the commits of a repository from the last few days, compares each
//! pair of adjacent commits, asks a text-generation model to narrate every comparison,
//! and composes the narrations into one first-person post bounded by a character budget.

pub mod config;
pub mod digest;
pub mod error;
pub mod github;
pub mod llm;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use digest::{DiffPair, DigestPipeline, DigestRequest};
pub use error::{DigestError, GitHubError, ModelError};
pub use github::{CommitRef, CommitWindow, FileChange, GitHubClient, SourceHost};
pub use llm::{ModelConfig, OpenAiCompatibleModel, TextModel};
pub use server::{AppState, ResponseEnvelope, build_router};

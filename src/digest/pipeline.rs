//! Commit history to status update, end to end.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::DigestError;
use crate::github::{CommitWindow, DEFAULT_LOOKBACK_DAYS, SourceHost};
use crate::llm::TextModel;

use super::composer::compose;
use super::narrator::{DEFAULT_MAX_FILES_PER_DIFF, narrate};
use super::pairs::{DEFAULT_MAX_COMMITS, extract_pairs};
use super::prompt::DEFAULT_CHARACTER_BUDGET;

/// Parameters of one digest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestRequest {
    pub owner: String,
    pub repo: String,
    pub character_budget: usize,
    pub max_files_per_diff: usize,
    pub max_commits: usize,
}

impl DigestRequest {
    /// Request for `owner/repo` with default limits.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            character_budget: DEFAULT_CHARACTER_BUDGET,
            max_files_per_diff: DEFAULT_MAX_FILES_PER_DIFF,
            max_commits: DEFAULT_MAX_COMMITS,
        }
    }
}

/// Sequential list → pair → compare → narrate → compose pipeline.
#[derive(Clone)]
pub struct DigestPipeline {
    source: Arc<dyn SourceHost>,
    model: Arc<dyn TextModel>,
    lookback_days: u32,
}

impl DigestPipeline {
    pub fn new(source: Arc<dyn SourceHost>, model: Arc<dyn TextModel>) -> Self {
        Self {
            source,
            model,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }

    /// Override how many days back the commit window reaches.
    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    /// Produce the status update for `request`.
    ///
    /// Comparisons run one at a time in commit order. The first failure
    /// aborts the run and drops every fragment produced so far.
    pub async fn run(&self, request: &DigestRequest) -> Result<String, DigestError> {
        let DigestRequest {
            owner,
            repo,
            character_budget,
            max_files_per_diff,
            max_commits,
        } = request;

        let window = CommitWindow::recent(self.lookback_days);
        let commits = self.source.list_commits(owner, repo, &window).await?;
        let pairs = extract_pairs(&commits, *max_commits);

        info!(
            owner = %owner,
            repo = %repo,
            commits = commits.len(),
            pairs = pairs.len(),
            "Narrating recent commits"
        );

        let mut fragments = String::new();
        for pair in &pairs {
            let files = self
                .source
                .compare(owner, repo, &pair.older_sha, &pair.newer_sha)
                .await?;

            let fragment = narrate(self.model.as_ref(), &files, *max_files_per_diff).await?;
            debug!(
                newer = %pair.newer_sha,
                older = %pair.older_sha,
                chars = fragment.chars().count(),
                "Narrated comparison"
            );

            fragments.push_str(&fragment);
        }

        compose(self.model.as_ref(), &fragments, *character_budget).await
    }
}

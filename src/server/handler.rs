//! HTTP handlers.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

use crate::digest::{
    DEFAULT_CHARACTER_BUDGET, DEFAULT_MAX_COMMITS, DEFAULT_MAX_FILES_PER_DIFF, DigestRequest,
};
use crate::error::DigestError;

use super::AppState;
use super::envelope::ResponseEnvelope;

/// Message returned with every generated update.
pub const SUCCESS_MESSAGE: &str = "Your today's tweet message is here.";

/// Optional query parameters of the digest route.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestQuery {
    pub character_budget: Option<usize>,
    pub max_files_per_diff: Option<usize>,
    pub max_commits: Option<usize>,
}

/// `GET /{owner}/{repo}`: generate a status update from recent commits.
///
/// Comparisons whose files carry no textual patch (binary files, pure
/// renames) are not sent to the model. When no comparison in the window
/// has a patch the response is a 400 with "No textual changes found in
/// recent commits".
pub async fn generate_digest(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
    query: Result<Query<DigestQuery>, QueryRejection>,
) -> ResponseEnvelope {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            let err = DigestError::InvalidQuery(rejection.body_text());
            warn!(error = %err, "Rejected digest request");
            return ResponseEnvelope::from(&err);
        }
    };

    let request = match build_request(owner, repo, query) {
        Ok(request) => request,
        Err(err) => {
            warn!(error = %err, "Rejected digest request");
            return ResponseEnvelope::from(&err);
        }
    };

    match state.pipeline.run(&request).await {
        Ok(tweet) => ResponseEnvelope::ok(json!({ "tweet": tweet }), SUCCESS_MESSAGE),
        Err(err) => {
            match &err {
                DigestError::Model(_) => error!(
                    owner = %request.owner,
                    repo = %request.repo,
                    error = %err,
                    "Digest generation failed"
                ),
                _ => warn!(
                    owner = %request.owner,
                    repo = %request.repo,
                    error = %err,
                    "Digest generation failed"
                ),
            }
            ResponseEnvelope::from(&err)
        }
    }
}

/// `GET /healthz`
pub async fn health() -> ResponseEnvelope {
    ResponseEnvelope::ok(json!({ "status": "ok" }), "Success")
}

/// Validate path and query values and fill in defaults.
pub fn build_request(
    owner: String,
    repo: String,
    query: DigestQuery,
) -> Result<DigestRequest, DigestError> {
    for segment in [&owner, &repo] {
        if !is_valid_path_segment(segment) {
            return Err(DigestError::InvalidRepository(format!("{owner}/{repo}")));
        }
    }

    let character_budget = query.character_budget.unwrap_or(DEFAULT_CHARACTER_BUDGET);
    let max_files_per_diff = query.max_files_per_diff.unwrap_or(DEFAULT_MAX_FILES_PER_DIFF);
    let max_commits = query.max_commits.unwrap_or(DEFAULT_MAX_COMMITS);

    if character_budget == 0 {
        return Err(DigestError::InvalidQuery(
            "characterBudget must be at least 1".to_string(),
        ));
    }
    if max_files_per_diff == 0 {
        return Err(DigestError::InvalidQuery(
            "maxFilesPerDiff must be at least 1".to_string(),
        ));
    }
    if max_commits < 2 {
        return Err(DigestError::InvalidQuery(
            "maxCommits must be at least 2".to_string(),
        ));
    }

    Ok(DigestRequest {
        owner,
        repo,
        character_budget,
        max_files_per_diff,
        max_commits,
    })
}

/// GitHub owner and repository names: ASCII alphanumerics, `-`, `_`, `.`.
fn is_valid_path_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

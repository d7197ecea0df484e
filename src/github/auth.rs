//! GitHub token resolution.
//!
//! Lookup order:
//! 1. Explicit token (from `--github-token`)
//! 2. GITHUB_API environment variable
//! 3. GITHUB_TOKEN environment variable
//! 4. GH_TOKEN environment variable

use std::env;

use crate::error::GitHubError;

/// Environment variables checked for a token, in order.
const TOKEN_ENV_VARS: [&str; 3] = ["GITHUB_API", "GITHUB_TOKEN", "GH_TOKEN"];

/// Resolve the GitHub token used for every API call.
///
/// Empty values are treated as unset.
pub fn get_github_token(explicit: Option<&str>) -> Result<String, GitHubError> {
    if let Some(token) = explicit {
        if !token.is_empty() {
            return Ok(token.to_string());
        }
    }

    for var in TOKEN_ENV_VARS {
        if let Ok(token) = env::var(var) {
            if !token.is_empty() {
                return Ok(token);
            }
        }
    }

    Err(GitHubError::AuthenticationFailed)
}

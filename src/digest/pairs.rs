//! Adjacent commit pairing.

use serde::{Deserialize, Serialize};

use crate::github::CommitRef;

/// Default number of commits considered per request.
pub const DEFAULT_MAX_COMMITS: usize = 10;

/// Two adjacent commits to compare, newer first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffPair {
    pub newer_sha: String,
    pub older_sha: String,
}

/// Pair each commit with the one after it.
///
/// `commits` is newest first and is truncated to `max_commits` before
/// pairing, so at most `max_commits - 1` pairs come back.
pub fn extract_pairs(commits: &[CommitRef], max_commits: usize) -> Vec<DiffPair> {
    let considered = &commits[..commits.len().min(max_commits)];

    considered
        .windows(2)
        .map(|pair| DiffPair {
            newer_sha: pair[0].sha.clone(),
            older_sha: pair[1].sha.clone(),
        })
        .collect()
}

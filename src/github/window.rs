//! Time window for commit listing.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Default lookback when the caller does not configure one.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 4;

/// Half-open UTC interval `[since, until)` of commits to consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl CommitWindow {
    /// Window ending at `now` and starting `lookback_days` earlier.
    pub fn ending_at(now: DateTime<Utc>, lookback_days: u32) -> Self {
        Self {
            since: now - Duration::days(i64::from(lookback_days)),
            until: now,
        }
    }

    /// Window ending now.
    pub fn recent(lookback_days: u32) -> Self {
        Self::ending_at(Utc::now(), lookback_days)
    }

    /// `since` formatted for the GitHub query string.
    pub fn since_param(&self) -> String {
        self.since.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// `until` formatted for the GitHub query string.
    pub fn until_param(&self) -> String {
        self.until.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl Default for CommitWindow {
    fn default() -> Self {
        Self::recent(DEFAULT_LOOKBACK_DAYS)
    }
}

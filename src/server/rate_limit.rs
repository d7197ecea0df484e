//! Per-route request quota.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{MatchedPath, Request, State};
use axum::http::HeaderValue;
use axum::http::header::RETRY_AFTER;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;
use tracing::warn;

use super::envelope::ResponseEnvelope;

/// Requests allowed per window when not configured.
pub const DEFAULT_MAX_REQUESTS: u32 = 20;

/// Window length when not configured (1 hour).
pub const DEFAULT_WINDOW_SECS: u64 = 60 * 60;

/// Outcome of a quota check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

#[derive(Debug)]
struct WindowState {
    started: Instant,
    count: u32,
}

/// Fixed-window counter per key.
///
/// A window opens on the first request for a key and lasts `window`; once it
/// has elapsed the next request opens a fresh one.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: DashMap<String, WindowState>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: DashMap::new(),
        }
    }

    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Instant::now())
    }

    /// Count a request for `key` made at `now`.
    pub fn check_at(&self, key: &str, now: Instant) -> RateDecision {
        let mut state = self
            .windows
            .entry(key.to_string())
            .or_insert(WindowState {
                started: now,
                count: 0,
            });

        let elapsed = now.saturating_duration_since(state.started);
        if elapsed >= self.window {
            state.started = now;
            state.count = 0;
        }

        if state.count < self.max_requests {
            state.count += 1;
            RateDecision::Allowed {
                remaining: self.max_requests - state.count,
            }
        } else {
            RateDecision::Limited {
                retry_after: self
                    .window
                    .saturating_sub(now.saturating_duration_since(state.started)),
            }
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, Duration::from_secs(DEFAULT_WINDOW_SECS))
    }
}

/// Middleware rejecting requests over the route's quota.
///
/// Keyed by the matched route template, so every `/{owner}/{repo}` shares one
/// counter.
pub async fn enforce_rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let key = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    match limiter.check(&key) {
        RateDecision::Allowed { .. } => next.run(request).await,
        RateDecision::Limited { retry_after } => {
            warn!(route = %key, retry_after_secs = retry_after.as_secs(), "Rate limit exceeded");

            let mut response =
                ResponseEnvelope::error(429, "Too many requests, try again later").into_response();
            let secs = retry_after.as_secs().max(1);
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(RETRY_AFTER, value);
            }
            response
        }
    }
}

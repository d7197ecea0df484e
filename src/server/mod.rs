//! HTTP surface: routing, CORS, rate limiting and response envelopes.

pub mod envelope;
pub mod handler;
pub mod rate_limit;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::get;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::digest::DigestPipeline;

pub use envelope::ResponseEnvelope;
pub use rate_limit::{RateDecision, RateLimiter};

/// Shared state of the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: DigestPipeline,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(pipeline: DigestPipeline, limiter: RateLimiter) -> Self {
        Self {
            pipeline,
            limiter: Arc::new(limiter),
        }
    }
}

/// Build the application router.
///
/// Only the digest route counts against the rate limit.
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let digest_routes = Router::new()
        .route("/{owner}/{repo}", get(handler::generate_digest))
        .route_layer(middleware::from_fn_with_state(
            state.limiter.clone(),
            rate_limit::enforce_rate_limit,
        ));

    Router::new()
        .route("/healthz", get(handler::health))
        .merge(digest_routes)
        .with_state(state)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// CORS restricted to `allowed_origins`, any method and header.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

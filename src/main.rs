//! dailytweet - server entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use dailytweet::github::{GitHubClient, get_github_token};
use dailytweet::llm::OpenAiCompatibleModel;
use dailytweet::server::{AppState, RateLimiter, build_router};
use dailytweet::{Config, DigestPipeline};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let filter = if config.verbose {
        EnvFilter::default().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::default().add_directive(Level::INFO.into()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    // Step 1: Credentials
    let github_token = get_github_token(config.github_token.as_deref())
        .context("GitHub token is required")?;

    let model_api_key = config
        .model_api_key
        .clone()
        .filter(|key| !key.is_empty())
        .context("Model API key is required. Set GEMINI_API_KEY or pass --model-api-key")?;

    // Step 2: Clients
    let github = GitHubClient::new(&github_token, &config.github_api_url)
        .context("Failed to create GitHub client")?;
    let model = OpenAiCompatibleModel::new(config.model_config(model_api_key));

    info!(
        github_api = %config.github_api_url,
        model = %model.model_name(),
        lookback_days = config.lookback_days,
        "Clients configured"
    );

    // Step 3: Router
    let pipeline = DigestPipeline::new(Arc::new(github), Arc::new(model))
        .with_lookback_days(config.lookback_days);
    let limiter = RateLimiter::new(config.rate_limit_max, config.rate_limit_window());
    let app = build_router(AppState::new(pipeline, limiter), &config.allowed_origins);

    // Step 4: Serve
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        %addr,
        rate_limit_max = config.rate_limit_max,
        rate_limit_window_secs = config.rate_limit_window_secs,
        allowed_origins = ?config.allowed_origins,
        "Listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

/// Resolve on Ctrl+C.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}

//! Service configuration from arguments and environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::Parser;

use crate::github::{DEFAULT_API_URL, DEFAULT_LOOKBACK_DAYS};
use crate::llm::{DEFAULT_MODEL_ENDPOINT, DEFAULT_MODEL_NAME, DEFAULT_TIMEOUT_SECS, ModelConfig};
use crate::server::rate_limit::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_SECS};

/// Serve developer status updates generated from recent GitHub commits.
#[derive(Parser, Debug, Clone)]
#[command(name = "dailytweet")]
#[command(about = "Serve developer status updates generated from recent GitHub commits")]
#[command(version)]
pub struct Config {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "BIND_ADDRESS", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind_address: IpAddr,

    /// GitHub REST API root
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub github_api_url: String,

    /// GitHub token (falls back to GITHUB_API, GITHUB_TOKEN, GH_TOKEN)
    #[arg(long)]
    pub github_token: Option<String>,

    /// API key for the text-generation model
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub model_api_key: Option<String>,

    /// Model name
    #[arg(long, env = "MODEL_NAME", default_value = DEFAULT_MODEL_NAME)]
    pub model_name: String,

    /// OpenAI-compatible chat completions API root
    #[arg(long, env = "MODEL_ENDPOINT", default_value = DEFAULT_MODEL_ENDPOINT)]
    pub model_endpoint: String,

    /// Timeout for a single model call, in seconds
    #[arg(long, env = "MODEL_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub model_timeout_secs: u64,

    /// Origins allowed to call the API from a browser (comma separated)
    #[arg(long, env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    /// Requests allowed per rate-limit window on the digest route
    #[arg(long, env = "RATE_LIMIT_MAX", default_value_t = DEFAULT_MAX_REQUESTS)]
    pub rate_limit_max: u32,

    /// Rate-limit window length, in seconds
    #[arg(long, env = "RATE_LIMIT_WINDOW_SECS", default_value_t = DEFAULT_WINDOW_SECS)]
    pub rate_limit_window_secs: u64,

    /// How many days of commits to consider
    #[arg(long, env = "LOOKBACK_DAYS", default_value_t = DEFAULT_LOOKBACK_DAYS)]
    pub lookback_days: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    /// Model settings for the given key.
    pub fn model_config(&self, api_key: String) -> ModelConfig {
        ModelConfig {
            api_key,
            endpoint: self.model_endpoint.clone(),
            model: self.model_name.clone(),
            timeout: Duration::from_secs(self.model_timeout_secs),
        }
    }
}

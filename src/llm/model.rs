//! Text-generation model access.

use std::time::Duration;

use async_trait::async_trait;
use openai_api_rs::v1::api::OpenAIClient;
use openai_api_rs::v1::chat_completion::{
    self, ChatCompletionMessage, ChatCompletionRequest, MessageRole,
};
use tokio::time::timeout;
use tracing::debug;

use crate::error::ModelError;

/// Gemini's OpenAI-compatible API root.
pub const DEFAULT_MODEL_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Model used when none is configured.
pub const DEFAULT_MODEL_NAME: &str = "gemini-2.0-flash";

/// Default per-call timeout (1 minute).
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// A model that answers one system instruction plus one user message.
///
/// This abstraction allows mocking the model in pipeline tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Run a single completion and return the model's text verbatim.
    async fn complete(&self, system: &str, user: &str) -> Result<String, ModelError>;
}

/// Connection settings for an OpenAI-compatible chat completions API.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

impl ModelConfig {
    /// Defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_MODEL_ENDPOINT.to_string(),
            model: DEFAULT_MODEL_NAME.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Chat completions over HTTP, one request per call, no streaming.
pub struct OpenAiCompatibleModel {
    config: ModelConfig,
}

impl OpenAiCompatibleModel {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    pub fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl TextModel for OpenAiCompatibleModel {
    async fn complete(&self, system: &str, user: &str) -> Result<String, ModelError> {
        let mut client = OpenAIClient::builder()
            .with_api_key(self.config.api_key.clone())
            .with_endpoint(self.config.endpoint.clone())
            .build()
            .map_err(|e| ModelError::Client(e.to_string()))?;

        let request = ChatCompletionRequest::new(
            self.config.model.clone(),
            vec![
                text_message(MessageRole::system, system),
                text_message(MessageRole::user, user),
            ],
        );

        let timeout_secs = self.config.timeout.as_secs();
        let response = timeout(self.config.timeout, client.chat_completion(request))
            .await
            .map_err(|_| ModelError::Timeout(timeout_secs))?
            .map_err(|e| ModelError::Request(e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ModelError::EmptyResponse)?;

        debug!(
            model = %self.config.model,
            chars = content.chars().count(),
            "Model completion received"
        );

        Ok(content)
    }
}

fn text_message(role: MessageRole, text: &str) -> ChatCompletionMessage {
    ChatCompletionMessage {
        role,
        content: chat_completion::Content::Text(text.to_string()),
        name: None,
        tool_calls: None,
        tool_call_id: None,
    }
}

//! Text-generation model access.

pub mod model;

pub use model::{
    DEFAULT_MODEL_ENDPOINT, DEFAULT_MODEL_NAME, DEFAULT_TIMEOUT_SECS, ModelConfig,
    OpenAiCompatibleModel, TextModel,
};

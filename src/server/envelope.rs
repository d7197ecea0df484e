//! Uniform JSON response body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DigestError;

/// Body of every response, success or failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub data: Option<Value>,
    pub message: String,
    pub success: bool,
}

impl ResponseEnvelope {
    /// Envelope whose `success` follows the status code (`< 400`).
    pub fn new(status_code: u16, data: Option<Value>, message: impl Into<String>) -> Self {
        Self {
            status_code,
            data,
            message: message.into(),
            success: status_code < 400,
        }
    }

    pub fn ok(data: Value, message: impl Into<String>) -> Self {
        Self::new(200, Some(data), message)
    }

    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self::new(status_code, None, message)
    }

    /// Override the derived `success` flag.
    pub fn with_success(mut self, success: bool) -> Self {
        self.success = success;
        self
    }
}

impl From<&DigestError> for ResponseEnvelope {
    fn from(err: &DigestError) -> Self {
        Self::error(err.status_code(), err.public_message())
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_GATEWAY);
        (status, Json(self)).into_response()
    }
}

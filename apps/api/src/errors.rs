use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Longest snippet of unparseable model output attached to a decode error.
pub const SNIPPET_LIMIT: usize = 500;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Parse-layer failures mostly never reach this type — generation handlers
/// convert them into fallback content. The variants here are the failures
/// that are surfaced to the caller as a JSON `{"detail": ...}` body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("JSON decode error: {message}. Snippet: {snippet}")]
    Decode { message: String, snippet: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Builds a decode error carrying a bounded snippet of the offending text.
    pub fn decode(err: &serde_json::Error, text: &str) -> Self {
        AppError::Decode {
            message: err.to_string(),
            snippet: truncate_snippet(text),
        }
    }
}

fn truncate_snippet(text: &str) -> String {
    if text.len() <= SNIPPET_LIMIT {
        return text.to_string();
    }
    let mut end = SNIPPET_LIMIT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Llm(err) => {
                tracing::error!("LLM error: {err}");
                match err {
                    LlmError::RetriesExhausted { .. } | LlmError::Throttled { .. } => (
                        StatusCode::TOO_MANY_REQUESTS,
                        "Rate limit exceeded. Please wait a moment and try again.".to_string(),
                    ),
                    LlmError::Provider { status, message } if *status == 400 => (
                        StatusCode::BAD_REQUEST,
                        format!("Invalid request: {message}"),
                    ),
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
                }
            }
            AppError::Decode { .. } => {
                tracing::error!("{self}");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        let body = Json(json!({ "detail": detail }));
        (status, body).into_response()
    }
}

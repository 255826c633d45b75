use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Message returned to the caller whenever the model output cannot be used.
/// The raw text is only ever logged.
pub const RESPONSE_FORMAT_MESSAGE: &str = "Invalid response format from Claude API";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Missing application data: {field} field is required")]
    MissingField { field: &'static str },

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    ResponseFormat(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey => AppError::Configuration(err.to_string()),
            LlmError::Http(_) | LlmError::Api { .. } => AppError::Upstream(err.to_string()),
            LlmError::EmptyContent | LlmError::Parse { .. } => {
                AppError::ResponseFormat(RESPONSE_FORMAT_MESSAGE.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({ "error": "Method not allowed" }),
            ),
            AppError::MissingField { field } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Missing application data",
                    "required": format!("{field} field is required"),
                }),
            ),
            AppError::Configuration(msg)
            | AppError::Upstream(msg)
            | AppError::ResponseFormat(msg) => {
                tracing::error!("Error processing application: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, failure_body(msg))
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, failure_body(&e.to_string()))
            }
        };

        (status, Json(body)).into_response()
    }
}

fn failure_body(message: &str) -> serde_json::Value {
    json!({
        "error": "Failed to process application",
        "message": message,
    })
}

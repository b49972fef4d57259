use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::parser::ContractError;
use crate::llm_client::LlmError;

/// Application-level error type for the analyze endpoint.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, ApiError>`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No model credential is configured. Checked before the request body
    /// is touched, so a malformed body still yields this error.
    #[error("Model API key is not configured")]
    MissingCredential,

    #[error("Request body must be valid JSON")]
    InvalidBody,

    #[error("Field 'prompt' must be a non-empty string")]
    InvalidPrompt,

    /// The model's output could not be parsed into an analysis.
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// The model invocation itself failed (network/auth/quota).
    #[error("Model invocation failed: {0}")]
    Model(#[from] LlmError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Client-input errors are the caller's to fix and are not logged.
        let (status, body) = match &self {
            ApiError::MissingCredential => {
                tracing::error!("analyze request rejected: model API key is not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.to_string() }),
                )
            }
            ApiError::InvalidBody | ApiError::InvalidPrompt => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            ApiError::Contract(e) => {
                tracing::error!("model returned an unusable analysis: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": e.to_string(), "raw": e.raw() }),
                )
            }
            ApiError::Model(e) => {
                tracing::error!("model invocation failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

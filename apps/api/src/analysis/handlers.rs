use axum::{extract::State, Json};

use crate::analysis::models::{Analysis, AnalyzeRequest};
use crate::analysis::parser::parse_analysis;
use crate::analysis::prompts::RUBRIC_SYSTEM;
use crate::errors::ApiError;
use crate::state::AppState;

/// POST /api/analyze
///
/// Takes the body as a raw string so the credential check runs before any
/// JSON parsing: a malformed body with no credential configured is still a
/// configuration error, not a client error.
pub async fn handle_analyze(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<Analysis>, ApiError> {
    if !state.model.is_configured() {
        return Err(ApiError::MissingCredential);
    }

    let value: serde_json::Value =
        serde_json::from_str(&body).map_err(|_| ApiError::InvalidBody)?;
    let request: AnalyzeRequest =
        serde_json::from_value(value).map_err(|_| ApiError::InvalidPrompt)?;

    let prompt = request.prompt.trim();
    if prompt.is_empty() {
        return Err(ApiError::InvalidPrompt);
    }

    let output = state.model.complete(RUBRIC_SYSTEM, prompt).await?;
    let analysis = parse_analysis(&output)?;

    Ok(Json(analysis))
}

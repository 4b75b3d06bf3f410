use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub response: String,
}

/// POST /ai-response — raw prompt passthrough for frontend experimentation.
/// No extraction, no fallback: the completion is returned verbatim.
pub async fn ai_response(
    State(state): State<AppState>,
    Json(req): Json<PromptRequest>,
) -> Result<Json<PromptResponse>, AppError> {
    let response = state.llm.invoke(&req.prompt).await?;
    Ok(Json(PromptResponse { response }))
}

use std::collections::BTreeMap;

use anyhow::Context;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::extract;
use crate::finaloutline::prompts;
use crate::normalize::methodology_description;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FinalOutlineRequest {
    pub outline: Value,
    /// Question responses keyed by outline position, folded into the outline
    /// JSON handed to the model.
    #[serde(default)]
    pub responses: BTreeMap<String, String>,
    pub thesis: String,
    pub methodology: Value,
}

#[derive(Debug, Serialize)]
pub struct FinalOutlineTextResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct FinalOutlineTransitionsResponse {
    pub transitions: BTreeMap<String, String>,
}

impl FinalOutlineRequest {
    /// The outline plus any per-position responses, serialized for the prompt.
    fn outline_json(&self) -> Result<String, AppError> {
        let combined = if self.responses.is_empty() {
            self.outline.clone()
        } else {
            serde_json::json!({
                "outline": self.outline,
                "responses": self.responses,
            })
        };
        Ok(serde_json::to_string_pretty(&combined).context("Failed to serialize outline")?)
    }
}

async fn paragraph_operation(
    state: &AppState,
    req: &FinalOutlineRequest,
    build: fn(&str, &str, &str) -> String,
) -> Result<Json<FinalOutlineTextResponse>, AppError> {
    let methodology = methodology_description(&req.methodology);
    let prompt = build(&req.outline_json()?, &req.thesis, &methodology);
    let completion = state.llm.invoke(&prompt).await?;
    Ok(Json(FinalOutlineTextResponse {
        text: completion.trim().to_string(),
    }))
}

/// POST /api/finaloutline/generate_methodology
pub async fn generate_methodology(
    State(state): State<AppState>,
    Json(req): Json<FinalOutlineRequest>,
) -> Result<Json<FinalOutlineTextResponse>, AppError> {
    paragraph_operation(&state, &req, prompts::methodology_paragraph_prompt).await
}

/// POST /api/finaloutline/generate_conclusion
pub async fn generate_conclusion(
    State(state): State<AppState>,
    Json(req): Json<FinalOutlineRequest>,
) -> Result<Json<FinalOutlineTextResponse>, AppError> {
    paragraph_operation(&state, &req, prompts::conclusion_prompt).await
}

/// POST /api/finaloutline/generate_abstract
pub async fn generate_abstract(
    State(state): State<AppState>,
    Json(req): Json<FinalOutlineRequest>,
) -> Result<Json<FinalOutlineTextResponse>, AppError> {
    paragraph_operation(&state, &req, prompts::abstract_prompt).await
}

/// POST /api/finaloutline/generate_transitions
///
/// Strict: the transition map is keyed by outline positions the frontend
/// splices into fixed slots, so a malformed completion surfaces a decode
/// error rather than guessing at positions.
pub async fn generate_transitions(
    State(state): State<AppState>,
    Json(req): Json<FinalOutlineRequest>,
) -> Result<Json<FinalOutlineTransitionsResponse>, AppError> {
    let methodology = methodology_description(&req.methodology);
    let prompt = prompts::transitions_prompt(&req.outline_json()?, &req.thesis, &methodology);
    let completion = state.llm.invoke(&prompt).await?;

    let transitions = parse_transitions(&completion)?;
    Ok(Json(FinalOutlineTransitionsResponse { transitions }))
}

/// POST /api/finaloutline/refine_outline
pub async fn refine_outline(
    State(state): State<AppState>,
    Json(req): Json<FinalOutlineRequest>,
) -> Result<Json<FinalOutlineTextResponse>, AppError> {
    paragraph_operation(&state, &req, prompts::refine_outline_prompt).await
}

fn parse_transitions(completion: &str) -> Result<BTreeMap<String, String>, AppError> {
    let cleaned = extract::clean(completion);
    let payload = extract::json_object(&cleaned).map_err(|_| AppError::Decode {
        message: "No JSON object found in transitions response".to_string(),
        snippet: cleaned.chars().take(200).collect(),
    })?;

    let value: Value = serde_json::from_str(payload).map_err(|e| AppError::decode(&e, &cleaned))?;
    let map = value.as_object().ok_or_else(|| AppError::Decode {
        message: "Transitions response is not a JSON object".to_string(),
        snippet: cleaned.chars().take(200).collect(),
    })?;

    Ok(map
        .iter()
        .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
        .collect())
}

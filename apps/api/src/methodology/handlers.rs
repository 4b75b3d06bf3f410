use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::catalog::{methodology_taxonomy, MethodologyOption};
use crate::errors::AppError;
use crate::extract;
use crate::methodology::fallback::default_methodologies;
use crate::methodology::prompts;
use crate::normalize::str_or;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MethodologyOptionsResponse {
    pub methodologies: Vec<MethodologyOption>,
}

#[derive(Debug, Deserialize)]
pub struct MethodologySelectionRequest {
    pub methodology_type: String,
    #[serde(default)]
    pub sub_methodology: Option<String>,
    pub final_thesis: String,
    pub paper_type: String,
    pub source_categories: Vec<String>,
    pub page_count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedMethodology {
    pub title: String,
    pub description: String,
    pub approach: String,
    pub source_focus: String,
    pub structure_alignment: String,
}

#[derive(Debug, Serialize)]
pub struct SelectedMethodologyInfo {
    pub methodology_type: String,
    pub sub_methodology: String,
    pub source_categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MethodologyGenerationResponse {
    pub methodologies: Vec<GeneratedMethodology>,
    pub selected_methodology_info: SelectedMethodologyInfo,
}

#[derive(Debug, Deserialize)]
pub struct MethodologyRequest {
    pub final_thesis: String,
    pub source_categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MethodologyResponse {
    pub methodology: String,
}

/// GET /methodology_options — the static taxonomy.
pub async fn methodology_options() -> Json<MethodologyOptionsResponse> {
    Json(MethodologyOptionsResponse {
        methodologies: methodology_taxonomy(),
    })
}

/// POST /generate_methodology_options
///
/// Asks for exactly three approaches as a JSON array. Extraction or decode
/// failure falls back to the deterministic template trio — this operation
/// never surfaces a parse problem to the caller.
pub async fn generate_methodology_options(
    State(state): State<AppState>,
    Json(req): Json<MethodologySelectionRequest>,
) -> Result<Json<MethodologyGenerationResponse>, AppError> {
    let sub_methodology = req.sub_methodology.clone().unwrap_or_else(|| "general".to_string());

    let prompt = prompts::methodology_options_prompt(
        &req.final_thesis,
        &req.paper_type,
        req.page_count,
        &req.source_categories,
        &req.methodology_type,
        &sub_methodology,
    );

    let completion = state.llm.invoke(&prompt).await?;
    let methodologies = parse_methodologies(&completion).unwrap_or_else(|| {
        warn!("methodology options unparseable, using template fallback");
        default_methodologies(&req.final_thesis, &req.paper_type, &req.source_categories)
    });

    Ok(Json(MethodologyGenerationResponse {
        methodologies,
        selected_methodology_info: SelectedMethodologyInfo {
            methodology_type: req.methodology_type,
            sub_methodology,
            source_categories: req.source_categories,
        },
    }))
}

/// POST /generate_methodology — free-text methodology elaboration.
pub async fn generate_methodology(
    State(state): State<AppState>,
    Json(req): Json<MethodologyRequest>,
) -> Result<Json<MethodologyResponse>, AppError> {
    let prompt = prompts::methodology_prompt(&req.final_thesis, &req.source_categories);
    let completion = state.llm.invoke(&prompt).await?;

    Ok(Json(MethodologyResponse {
        methodology: completion.trim().to_string(),
    }))
}

fn parse_methodologies(completion: &str) -> Option<Vec<GeneratedMethodology>> {
    let cleaned = extract::clean(completion);
    let payload = extract::json_array(&cleaned).ok()?;
    let items: Vec<Value> = serde_json::from_str(payload).ok()?;
    if items.is_empty() {
        return None;
    }

    Some(
        items
            .iter()
            .map(|m| GeneratedMethodology {
                title: str_or(m, "title", "Untitled Methodology"),
                description: str_or(m, "description", "No description available"),
                approach: str_or(m, "approach", "No approach specified"),
                source_focus: str_or(m, "source_focus", "No source focus specified"),
                structure_alignment: str_or(
                    m,
                    "structure_alignment",
                    "No structure alignment specified",
                ),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::canned_state;
    use axum::extract::State;

    #[tokio::test]
    async fn test_methodology_generation_returns_usable_text() {
        let state = canned_state(
            "Systematic analysis of policy reports and case studies, weighing each \
             category against the claim that X improves Y.",
        );
        let req = MethodologyRequest {
            final_thesis: "X improves Y".to_string(),
            source_categories: vec!["Policy Reports".to_string(), "Case Studies".to_string()],
        };
        let Json(response) = generate_methodology(State(state), Json(req)).await.unwrap();
        assert!(!response.methodology.is_empty());
        assert!(!response.methodology.contains("Error"));
    }

    #[tokio::test]
    async fn test_option_generation_falls_back_on_garbage_completion() {
        let state = canned_state("I'm sorry, I can't produce JSON for that request.");
        let req = MethodologySelectionRequest {
            methodology_type: "qualitative".to_string(),
            sub_methodology: None,
            final_thesis: "X improves Y".to_string(),
            paper_type: "argumentative".to_string(),
            source_categories: vec!["Policy Reports".to_string()],
            page_count: 10,
        };
        let Json(response) = generate_methodology_options(State(state), Json(req))
            .await
            .unwrap();
        assert_eq!(response.methodologies.len(), 3);
        assert!(response.methodologies[0].description.contains("X improves Y"));
        assert_eq!(response.selected_methodology_info.sub_methodology, "general");
    }

    #[test]
    fn test_parse_methodologies_with_noise_and_missing_fields() {
        let completion = r#"Here you go:
[
  {"title": "Archival Sweep", "description": "Deep archive pass", "approach": "Read everything"},
  {"description": "No title on this one"}
]
Hope that helps!"#;
        let parsed = parse_methodologies(completion).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].title, "Archival Sweep");
        assert_eq!(parsed[0].source_focus, "No source focus specified");
        assert_eq!(parsed[1].title, "Untitled Methodology");
    }

    #[test]
    fn test_parse_methodologies_rejects_bracketless_text() {
        assert!(parse_methodologies("I could not produce JSON, sorry.").is_none());
    }

    #[test]
    fn test_parse_methodologies_rejects_empty_array() {
        assert!(parse_methodologies("[]").is_none());
    }

    #[test]
    fn test_parse_methodologies_rejects_invalid_json() {
        assert!(parse_methodologies("[{not valid json]").is_none());
    }
}

use anyhow::Context;
use axum::{extract::State, Json};
use serde_json::Value;

use crate::catalog::categorize_section;
use crate::drafting::models::{
    CategorizeRequest, CategorizeResponse, CategorizedSection, CitationResponseRequest,
    DataSectionAnalysisRequest, DataSectionAnalysisResponse, DataSectionBuildRequest,
    DataSectionBuildResponse, FusedResponseRequest, LlmTextResponse,
};
use crate::drafting::prompts;
use crate::errors::AppError;
use crate::extract;
use crate::normalize::{int_list, methodology_description, str_or, string_list};
use crate::state::AppState;

/// POST /generate_citation_response
///
/// Produces the per-citation quoted-evidence outline as raw text — outline
/// output is consumed verbatim by the frontend, not parsed here.
pub async fn generate_citation_response(
    State(state): State<AppState>,
    Json(req): Json<CitationResponseRequest>,
) -> Result<Json<LlmTextResponse>, AppError> {
    let methodology = methodology_description(&req.methodology);
    let prompt = prompts::citation_response_prompt(
        req.citation.author_label(),
        req.citation.label(),
        &req.reference_number(),
        &req.thesis,
        &methodology,
        &req.section_context,
        &req.subsection_context,
        &req.question,
    );
    let response = state.llm.invoke(&prompt).await?;
    Ok(Json(LlmTextResponse { response }))
}

/// POST /generate_fused_response
pub async fn generate_fused_response(
    State(state): State<AppState>,
    Json(req): Json<FusedResponseRequest>,
) -> Result<Json<LlmTextResponse>, AppError> {
    let methodology = methodology_description(&req.methodology);
    let prompt = prompts::fused_response_prompt(
        &req.thesis,
        &methodology,
        &req.section_context,
        &req.subsection_context,
        &req.question,
        &req.citations_list(),
        &req.outlines_list(),
    );
    let response = state.llm.invoke(&prompt).await?;
    Ok(Json(LlmTextResponse { response }))
}

/// POST /generate_prose_from_outline
pub async fn generate_prose_from_outline(
    State(state): State<AppState>,
    Json(req): Json<FusedResponseRequest>,
) -> Result<Json<LlmTextResponse>, AppError> {
    let methodology = methodology_description(&req.methodology);
    let responses_content = req
        .citation_responses
        .iter()
        .enumerate()
        .map(|(i, resp)| format!("Response {}:\n{resp}", i + 1))
        .collect::<Vec<_>>()
        .join("\n\n");

    let prompt = prompts::prose_from_outline_prompt(
        &req.thesis,
        &methodology,
        &req.section_context,
        &req.subsection_context,
        &req.question,
        &req.citations_list(),
        &responses_content,
    );
    let response = state.llm.invoke(&prompt).await?;
    Ok(Json(LlmTextResponse { response }))
}

/// POST /categorize_sections — pure catalog lookup, no model call.
pub async fn categorize_sections(
    Json(req): Json<CategorizeRequest>,
) -> Json<CategorizeResponse> {
    let categorized_sections = req
        .sections
        .iter()
        .map(|s| CategorizedSection {
            section_title: s.section_title.clone(),
            category: if s.is_administrative {
                "Admin".to_string()
            } else {
                categorize_section(&s.section_title).to_string()
            },
        })
        .collect();

    Json(CategorizeResponse {
        categorized_sections,
    })
}

/// POST /analyze_data_sections
///
/// Strict: the analysis structure is fed back into the build step, so an
/// unextractable completion surfaces as a decode error rather than a guess.
pub async fn analyze_data_sections(
    State(state): State<AppState>,
    Json(req): Json<DataSectionAnalysisRequest>,
) -> Result<Json<DataSectionAnalysisResponse>, AppError> {
    let methodology = methodology_description(&req.methodology);
    let framework_json = pretty(&req.outline_framework)?;
    let draft1_json = pretty(&req.outline_draft1)?;

    let prompt = prompts::analyze_data_sections_prompt(
        &req.thesis,
        &methodology,
        &req.paper_type,
        &framework_json,
        &draft1_json,
    );
    let completion = state.llm.invoke(&prompt).await?;

    let value = decode_object(&completion)?;
    Ok(Json(DataSectionAnalysisResponse {
        identified_sections: value
            .get("identified_sections")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        section_purposes: string_list(&value, "section_purposes"),
        recommended_build_order: int_list(&value, "recommended_build_order"),
        analysis_summary: str_or(&value, "analysis_summary", ""),
    }))
}

/// POST /build_data_sections
///
/// Builds the selected data sections (or the first two when no selection is
/// given) into academic prose. The decoded tree is mapped field-by-field
/// with defaults; only a completion with no JSON at all is an error.
pub async fn build_data_sections(
    State(state): State<AppState>,
    Json(req): Json<DataSectionBuildRequest>,
) -> Result<Json<DataSectionBuildResponse>, AppError> {
    let sections_to_build: Vec<&Value> = match &req.target_section_indices {
        Some(indices) => indices
            .iter()
            .filter_map(|&i| req.identified_data_sections.get(i))
            .collect(),
        None => req.identified_data_sections.iter().take(2).collect(),
    };

    let methodology = methodology_description(&req.methodology);
    let sections_json = serde_json::to_string_pretty(&sections_to_build)
        .context("Failed to serialize sections to build")?;
    let framework_json = pretty(&req.outline_framework)?;
    let draft1_json = pretty(&req.outline_draft1)?;

    let prompt = prompts::build_data_sections_prompt(
        &req.thesis,
        &methodology,
        &req.paper_type,
        &sections_json,
        &framework_json,
        &draft1_json,
    );
    let completion = state.llm.invoke(&prompt).await?;

    let value = decode_object(&completion)?;
    Ok(Json(DataSectionBuildResponse::from_value(&value)))
}

fn pretty(value: &Value) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value).context("Failed to serialize outline context")?)
}

fn decode_object(completion: &str) -> Result<Value, AppError> {
    let cleaned = extract::clean(completion);
    let payload = extract::json_object(&cleaned).map_err(|_| AppError::Decode {
        message: "No JSON found in response".to_string(),
        snippet: cleaned.chars().take(200).collect(),
    })?;
    serde_json::from_str(payload).map_err(|e| AppError::decode(&e, &cleaned))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_object_with_noise() {
        let value = decode_object("Analysis:\n{\"analysis_summary\": \"two data sections\"}").unwrap();
        assert_eq!(value["analysis_summary"], "two data sections");
    }

    #[test]
    fn test_decode_object_without_json_errors() {
        let err = decode_object("prose only").unwrap_err();
        match err {
            AppError::Decode { message, .. } => assert!(message.contains("No JSON")),
            other => panic!("expected Decode, got {other:?}"),
        }
    }
}

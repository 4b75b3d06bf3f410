use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::catalog::{categorize_section, structure_preview, StructurePreview, ADMINISTRATIVE_TITLES};
use crate::errors::AppError;
use crate::extract;
use crate::normalize::methodology_description;
use crate::outline::fallback;
use crate::outline::models::{OutlineSection, OutlineSubsection, RecommendedSource};
use crate::outline::prompts;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OutlineRequest {
    pub final_thesis: String,
    pub methodology: String,
    pub paper_length_pages: i32,
    pub source_categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct OutlineResponse {
    pub outline: Vec<OutlineSection>,
}

#[derive(Debug, Deserialize)]
pub struct SectionsRequest {
    pub final_thesis: String,
    pub methodology: Value,
    pub paper_length_pages: i32,
    pub source_categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SectionsResponse {
    pub sections: Vec<OutlineSection>,
}

#[derive(Debug, Deserialize)]
pub struct SubsectionsRequest {
    pub final_thesis: String,
    pub methodology: Value,
    pub section_title: String,
    pub section_context: String,
    pub paper_length_pages: i32,
    #[serde(default)]
    pub source_categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SubsectionsResponse {
    pub subsections: Vec<OutlineSubsection>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionsRequest {
    pub final_thesis: String,
    pub methodology: Value,
    pub section_title: String,
    pub section_context: String,
    pub subsection_title: String,
    pub subsection_context: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CitationGenerationRequest {
    pub final_thesis: String,
    pub methodology: Value,
    pub section_title: String,
    pub subsection_title: String,
    pub subsection_context: String,
    pub question: String,
    #[serde(default)]
    pub source_categories: Vec<String>,
    pub citation_count: u32,
}

#[derive(Debug, Serialize)]
pub struct CitationGenerationResponse {
    pub recommended_sources: Vec<RecommendedSource>,
}

#[derive(Debug, Deserialize)]
pub struct PaperStructureRequest {
    pub paper_type: String,
    #[serde(default)]
    pub methodology_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CustomSection {
    pub section_title: String,
    #[serde(default)]
    pub section_context: Option<String>,
    #[serde(default)]
    pub pages_allocated: Option<i32>,
    #[serde(default)]
    pub is_data_section: bool,
    #[serde(default)]
    pub section_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StructuredOutlineRequest {
    pub final_thesis: String,
    pub paper_type: String,
    pub methodology: Value,
    #[serde(default)]
    pub methodology_id: Option<String>,
    #[serde(default)]
    pub custom_structure: Option<Vec<CustomSection>>,
}

#[derive(Debug, Serialize)]
pub struct StructuredSection {
    pub section_title: String,
    pub section_context: String,
    pub subsections: Vec<OutlineSubsection>,
    pub is_administrative: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages_allocated: Option<i32>,
    pub is_data_section: bool,
    pub section_type: String,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct StructuredOutlineResponse {
    pub outline: Vec<StructuredSection>,
    pub structure_preview: StructurePreview,
}

/// POST /generate_outline
///
/// Strict policy: this is the one outline operation whose callers need the
/// model's actual structure, so a decode failure surfaces with a snippet
/// instead of falling back.
pub async fn generate_outline(
    State(state): State<AppState>,
    Json(req): Json<OutlineRequest>,
) -> Result<Json<OutlineResponse>, AppError> {
    let prompt = prompts::outline_prompt(
        &req.final_thesis,
        &req.methodology,
        req.paper_length_pages,
        &req.source_categories,
    );
    let completion = state.llm.invoke(&prompt).await?;

    let outline = parse_outline(&completion)?;
    Ok(Json(OutlineResponse { outline }))
}

/// POST /generate_sections — tolerant, falls back to the standard four.
pub async fn generate_sections(
    State(state): State<AppState>,
    Json(req): Json<SectionsRequest>,
) -> Result<Json<SectionsResponse>, AppError> {
    let methodology = methodology_description(&req.methodology);
    let prompt = prompts::sections_prompt(
        &req.final_thesis,
        &methodology,
        req.paper_length_pages,
        &req.source_categories,
    );
    let completion = state.llm.invoke(&prompt).await?;

    let sections = parse_sections(&completion).unwrap_or_else(|| {
        warn!("section generation unparseable, using standard fallback outline");
        fallback::default_sections()
    });
    Ok(Json(SectionsResponse { sections }))
}

/// POST /generate_subsections
pub async fn generate_subsections(
    State(state): State<AppState>,
    Json(req): Json<SubsectionsRequest>,
) -> Result<Json<SubsectionsResponse>, AppError> {
    let methodology = methodology_description(&req.methodology);
    let prompt = prompts::subsections_prompt(
        &req.final_thesis,
        &methodology,
        &req.section_title,
        &req.section_context,
        req.paper_length_pages,
        &req.source_categories,
    );
    let completion = state.llm.invoke(&prompt).await?;

    let subsections = parse_subsections(&completion).unwrap_or_else(|| {
        warn!("subsection generation unparseable, using fallback pair");
        fallback::default_subsections(&req.section_title)
    });
    Ok(Json(SubsectionsResponse { subsections }))
}

/// POST /generate_questions
pub async fn generate_questions(
    State(state): State<AppState>,
    Json(req): Json<QuestionsRequest>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let methodology = methodology_description(&req.methodology);
    let prompt = prompts::questions_prompt(
        &req.final_thesis,
        &methodology,
        &req.section_title,
        &req.section_context,
        &req.subsection_title,
        &req.subsection_context,
    );
    let completion = state.llm.invoke(&prompt).await?;

    let questions = parse_questions(&completion).unwrap_or_else(|| {
        warn!("question generation unparseable, using generic questions");
        fallback::default_questions(&req.subsection_title)
    });
    Ok(Json(QuestionsResponse { questions }))
}

/// POST /generate_question_citations
pub async fn generate_question_citations(
    State(state): State<AppState>,
    Json(req): Json<CitationGenerationRequest>,
) -> Result<Json<CitationGenerationResponse>, AppError> {
    let methodology = methodology_description(&req.methodology);
    let prompt = prompts::question_citations_prompt(
        &req.question,
        req.citation_count,
        &req.section_title,
        &req.subsection_title,
        &req.subsection_context,
        &req.final_thesis,
        &methodology,
        &req.source_categories,
    );
    let completion = state.llm.invoke(&prompt).await?;

    let recommended_sources = parse_sources(&completion).unwrap_or_else(|| {
        warn!("citation generation unparseable, using sample source");
        fallback::sample_sources(
            &req.question,
            &methodology,
            &req.source_categories,
            req.citation_count,
        )
    });
    Ok(Json(CitationGenerationResponse { recommended_sources }))
}

/// POST /paper_structure and POST /paper_structure_preview
pub async fn paper_structure(
    Json(req): Json<PaperStructureRequest>,
) -> Json<StructurePreview> {
    Json(structure_preview(&req.paper_type, req.methodology_id.as_deref()))
}

/// POST /generate_structured_outline
///
/// Skeleton-driven outline. A caller-supplied custom structure is passed
/// through untouched; otherwise each content section of the skeleton gets an
/// LLM-written context line, with a per-section fallback so one bad call
/// never sinks the whole outline.
pub async fn generate_structured_outline(
    State(state): State<AppState>,
    Json(req): Json<StructuredOutlineRequest>,
) -> Result<Json<StructuredOutlineResponse>, AppError> {
    let preview = structure_preview(&req.paper_type, req.methodology_id.as_deref());

    let outline = match &req.custom_structure {
        Some(custom) => custom.iter().map(custom_section_entry).collect(),
        None => {
            let methodology = methodology_description(&req.methodology);
            let mut sections = Vec::with_capacity(preview.structure.len());
            for title in &preview.structure {
                sections.push(
                    skeleton_section_entry(&state, title, &req.paper_type, &req.final_thesis, &methodology)
                        .await,
                );
            }
            sections
        }
    };

    Ok(Json(StructuredOutlineResponse {
        outline,
        structure_preview: preview,
    }))
}

fn custom_section_entry(custom: &CustomSection) -> StructuredSection {
    StructuredSection {
        section_context: custom.section_context.clone().unwrap_or_else(|| {
            format!("Analysis and discussion of {}", custom.section_title)
        }),
        section_title: custom.section_title.clone(),
        subsections: vec![],
        is_administrative: false,
        pages_allocated: Some(custom.pages_allocated.unwrap_or(2)),
        is_data_section: custom.is_data_section,
        section_type: custom
            .section_type
            .clone()
            .unwrap_or_else(|| "content".to_string()),
        category: custom
            .category
            .clone()
            .unwrap_or_else(|| "content_section".to_string()),
    }
}

async fn skeleton_section_entry(
    state: &AppState,
    title: &str,
    paper_type: &str,
    final_thesis: &str,
    methodology: &str,
) -> StructuredSection {
    if ADMINISTRATIVE_TITLES.contains(&title.to_lowercase().as_str()) {
        return StructuredSection {
            section_title: title.to_string(),
            section_context: format!("Standard {} section", title.to_lowercase()),
            subsections: vec![],
            is_administrative: true,
            pages_allocated: None,
            is_data_section: false,
            section_type: "administrative".to_string(),
            category: "admin_section".to_string(),
        };
    }

    let prompt = prompts::section_context_prompt(title, paper_type, final_thesis, methodology);
    let section_context = match state.llm.invoke(&prompt).await {
        Ok(completion) => completion.trim().to_string(),
        Err(e) => {
            warn!("section context call failed for '{title}': {e}");
            format!("Analysis and discussion relevant to {}", title.to_lowercase())
        }
    };

    let category = categorize_section(title);
    let is_data_section = category == "Data";
    StructuredSection {
        section_title: title.to_string(),
        section_context,
        subsections: vec![],
        is_administrative: false,
        pages_allocated: None,
        is_data_section,
        section_type: category.to_lowercase(),
        category: if is_data_section {
            "data_section".to_string()
        } else {
            "content_section".to_string()
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Parsing
// ────────────────────────────────────────────────────────────────────────────

fn parse_outline(completion: &str) -> Result<Vec<OutlineSection>, AppError> {
    let cleaned = extract::clean(completion);
    let payload = extract::json_object(&cleaned).map_err(|_| AppError::Decode {
        message: "No valid JSON found in the response".to_string(),
        snippet: snippet_of(&cleaned),
    })?;

    let value: Value =
        serde_json::from_str(payload).map_err(|e| AppError::decode(&e, &cleaned))?;

    let sections = value
        .get("outline")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::Decode {
            message: "Expected 'outline' key missing from response JSON".to_string(),
            snippet: snippet_of(&cleaned),
        })?;

    Ok(sections.iter().map(OutlineSection::from_value).collect())
}

fn snippet_of(text: &str) -> String {
    let mut end = text.len().min(crate::errors::SNIPPET_LIMIT);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

fn parse_sections(completion: &str) -> Option<Vec<OutlineSection>> {
    let items = extract_array_items(completion)?;
    Some(items.iter().map(OutlineSection::from_value).collect())
}

fn parse_subsections(completion: &str) -> Option<Vec<OutlineSubsection>> {
    let items = extract_array_items(completion)?;
    Some(items.iter().map(OutlineSubsection::from_value).collect())
}

fn parse_questions(completion: &str) -> Option<Vec<String>> {
    let items = extract_array_items(completion)?;
    let questions: Vec<String> = items
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();
    if questions.is_empty() {
        None
    } else {
        Some(questions)
    }
}

fn parse_sources(completion: &str) -> Option<Vec<RecommendedSource>> {
    let cleaned = extract::clean(completion);
    let payload = extract::json_array(&cleaned).ok()?;
    let items: Vec<Value> = serde_json::from_str(payload).ok()?;
    // An explicitly empty array is a valid answer (zero citations requested)
    Some(items.iter().map(RecommendedSource::from_value).collect())
}

fn extract_array_items(completion: &str) -> Option<Vec<Value>> {
    let cleaned = extract::clean(completion);
    let payload = extract::json_array(&cleaned).ok()?;
    let items: Vec<Value> = serde_json::from_str(payload).ok()?;
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::canned_state;
    use axum::extract::State;

    #[tokio::test]
    async fn test_bracketless_completion_yields_standard_four_sections() {
        let state = canned_state("Unfortunately I can only offer prose here, no structure.");
        let req = SectionsRequest {
            final_thesis: "X improves Y".to_string(),
            methodology: serde_json::json!("Systematic review"),
            paper_length_pages: 10,
            source_categories: vec![],
        };
        let Json(response) = generate_sections(State(state), Json(req)).await.unwrap();
        assert_eq!(response.sections.len(), 4);
        assert_eq!(response.sections[0].section_title, "Introduction");
        assert_eq!(response.sections[3].section_title, "Conclusion");
    }

    #[tokio::test]
    async fn test_zero_citation_count_returns_empty_valid_collection() {
        let state = canned_state("[]");
        let req = CitationGenerationRequest {
            final_thesis: "T".to_string(),
            methodology: serde_json::json!({"description": "case study"}),
            section_title: "S".to_string(),
            subsection_title: "SS".to_string(),
            subsection_context: "C".to_string(),
            question: "Q?".to_string(),
            source_categories: vec![],
            citation_count: 0,
        };
        let Json(response) = generate_question_citations(State(state), Json(req))
            .await
            .unwrap();
        assert!(response.recommended_sources.is_empty());
    }

    #[test]
    fn test_parse_outline_from_noisy_completion() {
        let completion = "Here is your answer:\n{\"outline\":[{\"section_title\":\"A\",\"section_context\":\"B\",\"subsections\":[]}]}\nThanks!";
        let outline = parse_outline(completion).unwrap();
        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].section_title, "A");
        assert_eq!(outline[0].section_context, "B");
        assert!(outline[0].subsections.is_empty());
    }

    #[test]
    fn test_parse_outline_without_brackets_reports_decode_error() {
        let err = parse_outline("I cannot produce an outline today.").unwrap_err();
        match err {
            AppError::Decode { message, .. } => assert!(message.contains("No valid JSON")),
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_outline_missing_outline_key() {
        let err = parse_outline(r#"{"sections": []}"#).unwrap_err();
        match err {
            AppError::Decode { message, .. } => assert!(message.contains("'outline' key")),
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_sections_defaults_missing_fields() {
        let completion = r#"[{"section_title": "Background"}, {}]"#;
        let sections = parse_sections(completion).unwrap();
        assert_eq!(sections[0].section_title, "Background");
        assert_eq!(sections[0].section_context, "No context provided");
        assert_eq!(sections[1].section_title, "Untitled Section");
    }

    #[test]
    fn test_parse_sections_bracketless_is_none() {
        assert!(parse_sections("no structure here").is_none());
    }

    #[test]
    fn test_parse_questions_requires_string_items() {
        assert!(parse_questions(r#"[{"question": "not a string item"}]"#).is_none());
        let questions = parse_questions(r#"["Q1?", "Q2?"]"#).unwrap();
        assert_eq!(questions, vec!["Q1?", "Q2?"]);
    }

    #[test]
    fn test_parse_sources_accepts_empty_array() {
        let sources = parse_sources("[]").unwrap();
        assert!(sources.is_empty());
    }

    #[test]
    fn test_custom_section_entry_defaults() {
        let custom = CustomSection {
            section_title: "Threat Survey".to_string(),
            section_context: None,
            pages_allocated: None,
            is_data_section: false,
            section_type: None,
            category: None,
        };
        let entry = custom_section_entry(&custom);
        assert_eq!(entry.section_context, "Analysis and discussion of Threat Survey");
        assert_eq!(entry.pages_allocated, Some(2));
        assert_eq!(entry.section_type, "content");
        assert_eq!(entry.category, "content_section");
        assert!(!entry.is_administrative);
    }
}

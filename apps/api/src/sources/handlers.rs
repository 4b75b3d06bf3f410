use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract;
use crate::outline::models::RecommendedSource;
use crate::sources::prompts;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SourceRecommendationRequest {
    pub final_thesis: String,
}

#[derive(Debug, Serialize)]
pub struct SourceRecommendationResponse {
    pub recommended_categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct WorksCitedRequest {
    pub final_thesis: String,
    pub methodology: String,
    pub section_title: String,
    pub section_context: String,
    pub subsection_title: String,
    pub subsection_context: String,
    pub source_categories: Vec<String>,
    #[serde(default = "default_citation_count")]
    pub citation_count: u32,
}

fn default_citation_count() -> u32 {
    4
}

#[derive(Debug, Serialize)]
pub struct WorksCitedResponse {
    pub recommended_sources: Vec<RecommendedSource>,
}

#[derive(Debug, Deserialize)]
pub struct CitationSearchRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub author: String,
}

#[derive(Debug, Serialize)]
pub struct IdentifiedCitationResponse {
    pub citation: RecommendedSource,
}

/// POST /recommend_sources
///
/// The completion is a numbered list of category names; every non-empty
/// line survives with its list marker trimmed.
pub async fn recommend_sources(
    State(state): State<AppState>,
    Json(req): Json<SourceRecommendationRequest>,
) -> Result<Json<SourceRecommendationResponse>, AppError> {
    let prompt = prompts::recommend_sources_prompt(&req.final_thesis);
    let completion = state.llm.invoke(&prompt).await?;

    let recommended_categories = parse_categories(&completion);
    Ok(Json(SourceRecommendationResponse {
        recommended_categories,
    }))
}

/// POST /generate_works_cited — strict decode, snippet-bearing error.
pub async fn generate_works_cited(
    State(state): State<AppState>,
    Json(req): Json<WorksCitedRequest>,
) -> Result<Json<WorksCitedResponse>, AppError> {
    let prompt = prompts::works_cited_prompt(
        &req.final_thesis,
        &req.methodology,
        &req.section_title,
        &req.section_context,
        &req.subsection_title,
        &req.subsection_context,
        &req.source_categories,
        req.citation_count,
    );
    let completion = state.llm.invoke(&prompt).await?;

    let cleaned = extract::clean(&completion);
    let payload = extract::json_array(&cleaned).map_err(|_| AppError::Decode {
        message: "No valid JSON array found in response.".to_string(),
        snippet: cleaned.chars().take(200).collect(),
    })?;
    let recommended_sources: Vec<RecommendedSource> =
        serde_json::from_str(payload).map_err(|e| AppError::decode(&e, &cleaned))?;

    Ok(Json(WorksCitedResponse { recommended_sources }))
}

/// POST /identify_citation — strict decode.
pub async fn identify_citation(
    State(state): State<AppState>,
    Json(req): Json<CitationSearchRequest>,
) -> Result<Json<IdentifiedCitationResponse>, AppError> {
    let prompt =
        prompts::identify_citation_prompt(&req.title, &req.source, &req.year, &req.author);
    let completion = state.llm.invoke(&prompt).await?;

    let cleaned = extract::clean(&completion);
    let payload = extract::json_object(&cleaned).map_err(|_| AppError::Decode {
        message: "No valid JSON found in the response.".to_string(),
        snippet: cleaned.chars().take(200).collect(),
    })?;
    let citation: RecommendedSource =
        serde_json::from_str(payload).map_err(|e| AppError::decode(&e, &cleaned))?;

    Ok(Json(IdentifiedCitationResponse { citation }))
}

fn parse_categories(completion: &str) -> Vec<String> {
    completion
        .lines()
        .map(|line| line.trim().trim_start_matches(['-', ' ']).trim())
        .map(|line| {
            // Strip "1." / "2)" numbering when present
            line.find(['.', ')'])
                .filter(|i| line[..*i].chars().all(|c| c.is_ascii_digit()) && *i > 0)
                .map(|i| line[i + 1..].trim())
                .unwrap_or(line)
        })
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_categories_strips_markers_and_blanks() {
        let completion = "1. Peer-Reviewed Articles\n2) Government Reports\n- Case Studies\n\n   \nPlain Category";
        assert_eq!(
            parse_categories(completion),
            vec![
                "Peer-Reviewed Articles",
                "Government Reports",
                "Case Studies",
                "Plain Category"
            ]
        );
    }

    #[test]
    fn test_parse_categories_keeps_inline_punctuation() {
        // Only leading numeric markers are stripped, not mid-line periods
        let completion = "1. U.S. Policy Documents";
        assert_eq!(parse_categories(completion), vec!["U.S. Policy Documents"]);
    }

    #[test]
    fn test_citation_count_defaults_to_four() {
        let req: WorksCitedRequest = serde_json::from_str(
            r#"{
                "final_thesis": "T", "methodology": "M",
                "section_title": "S", "section_context": "SC",
                "subsection_title": "SS", "subsection_context": "SSC",
                "source_categories": []
            }"#,
        )
        .unwrap();
        assert_eq!(req.citation_count, 4);
    }

    #[test]
    fn test_citation_search_request_defaults_all_fields() {
        let req: CitationSearchRequest = serde_json::from_str("{}").unwrap();
        assert!(req.title.is_empty());
        assert!(req.author.is_empty());
    }
}

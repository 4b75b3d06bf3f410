use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::citations::prompts::{citation_validity_prompt, CitationValidityFields};
use crate::errors::AppError;
use crate::extract;
use crate::normalize::{methodology_description, str_or};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CitationInfo {
    pub apa: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CitationContext {
    pub thesis: String,
    pub section_title: String,
    pub subsection_title: String,
    pub question: String,
    pub methodology: Value,
}

#[derive(Debug, Deserialize)]
pub struct CitationValidityRequest {
    pub citation: CitationInfo,
    pub context: CitationContext,
}

/// `status` is one of `valid`, `partial`, `invalid`, `error`.
#[derive(Debug, Serialize)]
pub struct CitationValidityResponse {
    pub status: String,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// POST /check_citation_validity
///
/// Assessment failures are data, not errors: an unparseable completion
/// yields `status: "error"` rather than an HTTP failure.
pub async fn check_citation_validity(
    State(state): State<AppState>,
    Json(req): Json<CitationValidityRequest>,
) -> Result<Json<CitationValidityResponse>, AppError> {
    let methodology = methodology_description(&req.context.methodology);
    let prompt = citation_validity_prompt(&CitationValidityFields {
        apa: &req.citation.apa,
        title: req.citation.title.as_deref().unwrap_or("Not provided"),
        author: req.citation.author.as_deref().unwrap_or("Not provided"),
        description: req.citation.description.as_deref().unwrap_or("Not provided"),
        thesis: &req.context.thesis,
        section_title: &req.context.section_title,
        subsection_title: &req.context.subsection_title,
        question: &req.context.question,
        methodology: &methodology,
    });

    let completion = state.llm.invoke(&prompt).await?;
    Ok(Json(parse_validity(&completion)))
}

fn parse_validity(completion: &str) -> CitationValidityResponse {
    let cleaned = extract::clean(completion);
    let Ok(payload) = extract::json_object(&cleaned) else {
        return CitationValidityResponse {
            status: "error".to_string(),
            explanation: "Unable to parse validation response".to_string(),
            link: None,
        };
    };

    match serde_json::from_str::<Value>(payload) {
        Ok(value) => {
            let link = value
                .get("link")
                .and_then(Value::as_str)
                .filter(|l| *l != "null" && !l.is_empty())
                .map(str::to_string);
            CitationValidityResponse {
                status: str_or(&value, "status", "error"),
                explanation: str_or(&value, "explanation", "Unable to validate citation"),
                link,
            }
        }
        Err(e) => {
            warn!("citation validity decode failed: {e}");
            CitationValidityResponse {
                status: "error".to_string(),
                explanation: "Error parsing citation validation response".to_string(),
                link: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validity_happy_path() {
        let completion = r#"Assessment follows.
{"status": "valid", "explanation": "Well formatted and relevant.", "link": "https://doi.org/10/x"}"#;
        let parsed = parse_validity(completion);
        assert_eq!(parsed.status, "valid");
        assert_eq!(parsed.link.as_deref(), Some("https://doi.org/10/x"));
    }

    #[test]
    fn test_parse_validity_null_string_link_dropped() {
        let completion = r#"{"status": "partial", "explanation": "Tangential.", "link": "null"}"#;
        let parsed = parse_validity(completion);
        assert_eq!(parsed.status, "partial");
        assert!(parsed.link.is_none());
    }

    #[test]
    fn test_parse_validity_no_json_is_error_status() {
        let parsed = parse_validity("I am unable to assess this citation.");
        assert_eq!(parsed.status, "error");
        assert_eq!(parsed.explanation, "Unable to parse validation response");
    }

    #[test]
    fn test_parse_validity_invalid_json_is_error_status() {
        let parsed = parse_validity("{status: broken}");
        assert_eq!(parsed.status, "error");
        assert_eq!(parsed.explanation, "Error parsing citation validation response");
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::{int_list, str_or, string_list, text_or_paragraphs};

/// A citation as the drafting operations receive it — any of the identifying
/// fields may be absent, so display falls back through apa → title → source.
#[derive(Debug, Clone, Deserialize)]
pub struct DraftCitation {
    #[serde(default)]
    pub apa: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl DraftCitation {
    pub fn label(&self) -> &str {
        self.apa
            .as_deref()
            .or(self.title.as_deref())
            .or(self.source.as_deref())
            .unwrap_or("the cited work")
    }

    pub fn author_label(&self) -> &str {
        self.author.as_deref().unwrap_or("the cited author")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CitationReference {
    pub reference_id: String,
    pub citation: DraftCitation,
}

#[derive(Debug, Deserialize)]
pub struct CitationResponseRequest {
    pub thesis: String,
    pub methodology: Value,
    #[serde(default)]
    pub section_context: String,
    #[serde(default)]
    pub subsection_context: String,
    pub question: String,
    pub citation: DraftCitation,
    #[serde(default)]
    pub reference_id: Option<String>,
    #[serde(default)]
    pub citation_number: Option<u32>,
}

impl CitationResponseRequest {
    /// The reference number printed as `[N]` in the generated outline.
    pub fn reference_number(&self) -> String {
        self.reference_id
            .clone()
            .or_else(|| self.citation_number.map(|n| n.to_string()))
            .unwrap_or_else(|| "1".to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct FusedResponseRequest {
    pub thesis: String,
    pub methodology: Value,
    #[serde(default)]
    pub section_context: String,
    #[serde(default)]
    pub subsection_context: String,
    pub question: String,
    pub citation_responses: Vec<String>,
    #[serde(default)]
    pub citation_references: Vec<CitationReference>,
}

impl FusedResponseRequest {
    /// `[id]: citation label` lines for the prompt.
    pub fn citations_list(&self) -> String {
        self.citation_references
            .iter()
            .map(|r| format!("[{}]: {}", r.reference_id, r.citation.label()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Per-citation outlines labelled with their reference numbers; falls back
    /// to positional numbering when references run short.
    pub fn outlines_list(&self) -> String {
        self.citation_responses
            .iter()
            .enumerate()
            .map(|(i, resp)| {
                let id = self
                    .citation_references
                    .get(i)
                    .map(|r| r.reference_id.clone())
                    .unwrap_or_else(|| (i + 1).to_string());
                format!("Citation [{id}]:\n{resp}")
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[derive(Debug, Serialize)]
pub struct LlmTextResponse {
    pub response: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Section categorization
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SectionCategorization {
    pub section_title: String,
    #[serde(default)]
    pub is_administrative: bool,
}

#[derive(Debug, Deserialize)]
pub struct CategorizeRequest {
    pub sections: Vec<SectionCategorization>,
}

#[derive(Debug, Serialize)]
pub struct CategorizedSection {
    pub section_title: String,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct CategorizeResponse {
    pub categorized_sections: Vec<CategorizedSection>,
}

// ────────────────────────────────────────────────────────────────────────────
// Data-section analysis & build
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DataSectionAnalysisRequest {
    pub thesis: String,
    pub methodology: Value,
    pub paper_type: String,
    pub outline_framework: Value,
    pub outline_draft1: Value,
}

/// Identified sections stay semi-structured: the frontend consumes them as
/// opaque JSON and feeds them back into the build request.
#[derive(Debug, Serialize)]
pub struct DataSectionAnalysisResponse {
    pub identified_sections: Vec<Value>,
    pub section_purposes: Vec<String>,
    pub recommended_build_order: Vec<i64>,
    pub analysis_summary: String,
}

#[derive(Debug, Deserialize)]
pub struct DataSectionBuildRequest {
    pub thesis: String,
    pub methodology: Value,
    pub paper_type: String,
    pub outline_framework: Value,
    pub outline_draft1: Value,
    pub identified_data_sections: Vec<Value>,
    #[serde(default)]
    pub target_section_indices: Option<Vec<usize>>,
}

#[derive(Debug, Serialize)]
pub struct BuiltCitation {
    pub apa: String,
    pub categories: Vec<String>,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct DataSubsection {
    pub subsection_number: String,
    pub subsection_title: String,
    pub academic_content: String,
    pub data_sources: Vec<String>,
    pub citations: Vec<BuiltCitation>,
    pub transition_to_next: String,
}

#[derive(Debug, Serialize)]
pub struct DataSection {
    pub section_number: String,
    pub section_title: String,
    pub section_purpose: String,
    pub subsections: Vec<DataSubsection>,
    pub section_summary: String,
}

#[derive(Debug, Serialize)]
pub struct DataSectionBuildResponse {
    pub built_sections: Vec<DataSection>,
    pub continuity_notes: Vec<String>,
    pub completion_status: String,
    pub next_recommended_sections: Vec<i64>,
}

impl DataSection {
    pub fn from_value(v: &Value) -> Self {
        let subsections = v
            .get("subsections")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(DataSubsection::from_value).collect())
            .unwrap_or_default();
        DataSection {
            section_number: str_or(v, "section_number", ""),
            section_title: str_or(v, "section_title", ""),
            section_purpose: str_or(v, "section_purpose", ""),
            subsections,
            section_summary: str_or(v, "section_summary", ""),
        }
    }
}

impl DataSubsection {
    pub fn from_value(v: &Value) -> Self {
        let citations = v
            .get("citations")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|c| BuiltCitation {
                        apa: str_or(c, "apa", ""),
                        categories: string_list(c, "categories"),
                        description: str_or(c, "description", ""),
                    })
                    .collect()
            })
            .unwrap_or_default();
        DataSubsection {
            subsection_number: str_or(v, "subsection_number", ""),
            subsection_title: str_or(v, "subsection_title", ""),
            // The model sometimes emits a paragraph array here
            academic_content: text_or_paragraphs(v, "academic_content"),
            data_sources: string_list(v, "data_sources"),
            citations,
            transition_to_next: str_or(v, "transition_to_next", ""),
        }
    }
}

impl DataSectionBuildResponse {
    pub fn from_value(v: &Value) -> Self {
        let built_sections = v
            .get("built_sections")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(DataSection::from_value).collect())
            .unwrap_or_default();
        DataSectionBuildResponse {
            built_sections,
            continuity_notes: string_list(v, "continuity_notes"),
            completion_status: str_or(v, "completion_status", "partial"),
            next_recommended_sections: int_list(v, "next_recommended_sections"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_citation_label_fallback_chain() {
        let full = DraftCitation {
            apa: Some("Doe (2020).".to_string()),
            title: Some("T".to_string()),
            author: None,
            source: None,
        };
        assert_eq!(full.label(), "Doe (2020).");

        let title_only = DraftCitation {
            apa: None,
            title: Some("Only Title".to_string()),
            author: None,
            source: None,
        };
        assert_eq!(title_only.label(), "Only Title");

        let bare = DraftCitation {
            apa: None,
            title: None,
            author: None,
            source: None,
        };
        assert_eq!(bare.label(), "the cited work");
        assert_eq!(bare.author_label(), "the cited author");
    }

    #[test]
    fn test_reference_number_prefers_reference_id() {
        let req: CitationResponseRequest = serde_json::from_value(json!({
            "thesis": "T", "methodology": "M", "question": "Q",
            "citation": {"apa": "A"},
            "reference_id": "3.2", "citation_number": 7
        }))
        .unwrap();
        assert_eq!(req.reference_number(), "3.2");

        let req: CitationResponseRequest = serde_json::from_value(json!({
            "thesis": "T", "methodology": "M", "question": "Q",
            "citation": {"apa": "A"}, "citation_number": 7
        }))
        .unwrap();
        assert_eq!(req.reference_number(), "7");

        let req: CitationResponseRequest = serde_json::from_value(json!({
            "thesis": "T", "methodology": "M", "question": "Q",
            "citation": {"apa": "A"}
        }))
        .unwrap();
        assert_eq!(req.reference_number(), "1");
    }

    #[test]
    fn test_outlines_list_falls_back_to_positional_numbering() {
        let req: FusedResponseRequest = serde_json::from_value(json!({
            "thesis": "T", "methodology": "M", "question": "Q",
            "citation_responses": ["outline one", "outline two"],
            "citation_references": [
                {"reference_id": "1", "citation": {"apa": "First source"}}
            ]
        }))
        .unwrap();
        let outlines = req.outlines_list();
        assert!(outlines.contains("Citation [1]:\noutline one"));
        assert!(outlines.contains("Citation [2]:\noutline two"));
        assert_eq!(req.citations_list(), "[1]: First source");
    }

    #[test]
    fn test_build_response_from_value_tolerates_paragraph_arrays() {
        let v = json!({
            "built_sections": [{
                "section_number": "3",
                "section_title": "Findings",
                "subsections": [{
                    "subsection_title": "Trends",
                    "academic_content": ["Para one.", "Para two."],
                    "citations": [{"apa": "Doe (2020)."}]
                }]
            }],
            "completion_status": "complete",
            "next_recommended_sections": [2, 3]
        });
        let resp = DataSectionBuildResponse::from_value(&v);
        assert_eq!(resp.built_sections.len(), 1);
        let sub = &resp.built_sections[0].subsections[0];
        assert_eq!(sub.academic_content, "Para one.\n\nPara two.");
        assert_eq!(resp.completion_status, "complete");
        assert_eq!(resp.next_recommended_sections, vec![2, 3]);
    }

    #[test]
    fn test_build_response_defaults_completion_status() {
        let resp = DataSectionBuildResponse::from_value(&json!({}));
        assert_eq!(resp.completion_status, "partial");
        assert!(resp.built_sections.is_empty());
    }
}

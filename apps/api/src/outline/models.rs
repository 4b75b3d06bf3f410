use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::{str_or, string_list_or};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineSubsection {
    pub subsection_title: String,
    pub subsection_context: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineSection {
    pub section_title: String,
    pub section_context: String,
    #[serde(default)]
    pub subsections: Vec<OutlineSubsection>,
}

/// A recommended bibliographic source. `methodologyPoints` keeps its wire
/// spelling — the frontend contract predates this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedSource {
    pub apa: String,
    pub categories: Vec<String>,
    #[serde(rename = "methodologyPoints")]
    pub methodology_points: Vec<String>,
    pub description: String,
}

impl OutlineSection {
    /// Tolerant mapping from a decoded JSON value, with documented defaults.
    pub fn from_value(v: &Value) -> Self {
        let subsections = v
            .get("subsections")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(OutlineSubsection::from_value).collect())
            .unwrap_or_default();
        OutlineSection {
            section_title: str_or(v, "section_title", "Untitled Section"),
            section_context: str_or(v, "section_context", "No context provided"),
            subsections,
        }
    }
}

impl OutlineSubsection {
    pub fn from_value(v: &Value) -> Self {
        OutlineSubsection {
            subsection_title: str_or(v, "subsection_title", "Untitled Subsection"),
            subsection_context: str_or(v, "subsection_context", "No context provided"),
        }
    }
}

impl RecommendedSource {
    pub fn from_value(v: &Value) -> Self {
        RecommendedSource {
            apa: str_or(v, "apa", "Citation not available"),
            categories: string_list_or(v, "categories", &["General"]),
            methodology_points: string_list_or(v, "methodologyPoints", &["General methodology"]),
            description: str_or(v, "description", "No description available"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_from_value_defaults() {
        let section = OutlineSection::from_value(&json!({}));
        assert_eq!(section.section_title, "Untitled Section");
        assert_eq!(section.section_context, "No context provided");
        assert!(section.subsections.is_empty());
    }

    #[test]
    fn test_section_from_value_maps_nested_subsections() {
        let v = json!({
            "section_title": "Analysis",
            "section_context": "Core argument",
            "subsections": [{"subsection_title": "Patterns"}]
        });
        let section = OutlineSection::from_value(&v);
        assert_eq!(section.subsections.len(), 1);
        assert_eq!(section.subsections[0].subsection_title, "Patterns");
        assert_eq!(section.subsections[0].subsection_context, "No context provided");
    }

    #[test]
    fn test_recommended_source_defaults() {
        let source = RecommendedSource::from_value(&json!({"apa": "Doe, J. (2021). Title."}));
        assert_eq!(source.apa, "Doe, J. (2021). Title.");
        assert_eq!(source.categories, vec!["General"]);
        assert_eq!(source.methodology_points, vec!["General methodology"]);
    }

    #[test]
    fn test_recommended_source_serializes_wire_field_name() {
        let source = RecommendedSource {
            apa: "A".to_string(),
            categories: vec![],
            methodology_points: vec!["P".to_string()],
            description: "D".to_string(),
        };
        let json = serde_json::to_string(&source).unwrap();
        assert!(json.contains("methodologyPoints"));
    }
}

//! Prompt builders for the methodology operations.

use crate::llm_client::prompts::JSON_ONLY_FOOTER;

pub fn methodology_options_prompt(
    final_thesis: &str,
    paper_type: &str,
    page_count: i32,
    source_categories: &[String],
    methodology_type: &str,
    sub_methodology: &str,
) -> String {
    format!(
        r#"Generate 3 methodology approaches for this research paper:

Thesis: "{final_thesis}"
Paper Type: {paper_type}
Page Count: {page_count}
Source Categories: {categories}
Methodology Type: {methodology_type}
Sub-methodology: {sub_methodology}

Return exactly 3 methodologies in this JSON format:
[
  {{
    "title": "Methodology Title",
    "description": "Brief description of the methodology approach",
    "approach": "How this methodology will be implemented",
    "source_focus": "Which source categories will be emphasized",
    "structure_alignment": "How this aligns with the paper structure"
  }}
]

{JSON_ONLY_FOOTER}"#,
        categories = source_categories.join(", "),
    )
}

pub fn methodology_prompt(final_thesis: &str, source_categories: &[String]) -> String {
    format!(
        r#"You are an expert professor creating detailed research methodologies.
Given the thesis: "{final_thesis}" and these explicitly selected source categories: {categories},
explicitly articulate a clear and concise research methodology detailing how to effectively analyze each source category to thoroughly address and support the thesis.

Provide ONLY the methodology explicitly. Do not start any header, to include "Research Methodology:". Just start listing the methodology considerations."#,
        categories = source_categories.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_prompt_contains_every_field() {
        let categories = vec!["Policy Reports".to_string(), "Case Studies".to_string()];
        let prompt = methodology_options_prompt(
            "X improves Y",
            "argumentative",
            12,
            &categories,
            "qualitative",
            "thematic_analysis",
        );
        assert!(prompt.contains("X improves Y"));
        assert!(prompt.contains("argumentative"));
        assert!(prompt.contains("Page Count: 12"));
        assert!(prompt.contains("Policy Reports, Case Studies"));
        assert!(prompt.contains("qualitative"));
        assert!(prompt.contains("thematic_analysis"));
    }

    #[test]
    fn test_methodology_prompt_contains_every_field() {
        let categories = vec!["Journal Articles".to_string()];
        let prompt = methodology_prompt("Thesis text", &categories);
        assert!(prompt.contains("Thesis text"));
        assert!(prompt.contains("Journal Articles"));
    }
}

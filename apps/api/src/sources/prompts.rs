//! Prompt builders for source recommendation and citation identification.

pub fn recommend_sources_prompt(final_thesis: &str) -> String {
    format!(
        r#"Based on the following thesis, explicitly recommend ONLY a numbered list of concise document/source categories suitable for comprehensive research.

Thesis: {final_thesis}

Return ONLY a numbered list explicitly. No introductory sentences or explanations."#
    )
}

#[allow(clippy::too_many_arguments)]
pub fn works_cited_prompt(
    final_thesis: &str,
    methodology: &str,
    section_title: &str,
    section_context: &str,
    subsection_title: &str,
    subsection_context: &str,
    source_categories: &[String],
    citation_count: u32,
) -> String {
    format!(
        r#"You are an academic researcher skilled in identifying ideal primary and secondary source documents for scholarly papers.

Thesis: "{final_thesis}"

Research Methodology: "{methodology}"

Section Title: "{section_title}"
Section Context: "{section_context}"

Subsection Title: "{subsection_title}"
Subsection Context: "{subsection_context}"

Source Categories: {categories}
Number of Citations Requested: {citation_count}

Explicitly return a JSON array exactly matching the following structure:

[
{{
    "apa": "Author, A. A. (Year). Title of work. Publisher.",
    "categories": ["Explicit relevant category name(s) chosen earlier (exact match required)"],
    "methodologyPoints": ["Explicit Methodology Section Title (Section #)"],
    "description": "Explicitly state in one concise sentence how this source specifically supports the subsection context."
}}
]

Explicitly adhere to the following rules:
- Each APA citation must follow the format: "Author, A. A. (Year). Title of work. Publisher."
- Only use categories from the provided Source Categories list, exactly as given.
- Clearly include the associated methodology point(s) with explicit numbering (e.g., "National Security Assessment (3)").
- Provide exactly {citation_count} citation(s).
- Provide ONLY valid JSON explicitly, without any additional commentary or explanation."#,
        categories = source_categories.join(", "),
    )
}

pub fn identify_citation_prompt(title: &str, source: &str, year: &str, author: &str) -> String {
    format!(
        r#"You are an academic assistant tasked with precisely identifying and formatting scholarly citations.

Explicitly identify the correct APA citation and related information for the following details:
Title: "{title}"
Source/Publication: "{source}"
Year: "{year}"
Author: "{author}"

If some details are missing, explicitly find the most relevant scholarly work that closely matches the provided information.

Explicitly return a JSON object exactly matching this structure and format:

{{
  "apa": "Author, A. A. (Year). Title of work. Publisher.",
  "categories": ["Relevant categories"],
  "methodologyPoints": ["Relevant methodology points"],
  "description": "One sentence explicitly describing how this source is relevant."
}}

Provide ONLY the explicit JSON, no additional explanations."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_works_cited_prompt_contains_every_field() {
        let categories = vec!["Government Documents".to_string(), "Books".to_string()];
        let prompt = works_cited_prompt(
            "X improves Y",
            "Archival analysis",
            "Findings",
            "Core evidence",
            "Case Data",
            "Primary cases",
            &categories,
            4,
        );
        for needle in [
            "X improves Y",
            "Archival analysis",
            "Findings",
            "Core evidence",
            "Case Data",
            "Primary cases",
            "Government Documents, Books",
            "Number of Citations Requested: 4",
        ] {
            assert!(prompt.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn test_identify_citation_prompt_contains_every_field() {
        let prompt = identify_citation_prompt("A Title", "A Journal", "2020", "Doe");
        assert!(prompt.contains("A Title"));
        assert!(prompt.contains("A Journal"));
        assert!(prompt.contains("2020"));
        assert!(prompt.contains("Doe"));
    }
}

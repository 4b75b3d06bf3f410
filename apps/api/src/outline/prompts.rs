//! Prompt builders for the outline operations.

use crate::llm_client::prompts::JSON_ONLY_FOOTER;

/// Sentinel page counts carry meaning: the builder substitutes a phrase
/// rather than interpolating the raw number.
pub fn describe_paper_length(pages: i32) -> String {
    match pages {
        -2 => "the maximum level of detail possible".to_string(),
        -1 => "a flexible length suitable to the complexity of the thesis".to_string(),
        n => format!("{n} pages"),
    }
}

pub fn outline_prompt(
    final_thesis: &str,
    methodology: &str,
    paper_length_pages: i32,
    source_categories: &[String],
) -> String {
    format!(
        r#"You are an expert professor creating structured thesis outlines.

Final Thesis: "{final_thesis}"
Methodology: "{methodology}"
Paper Length: {length} single-spaced (excluding citations)
Source Categories: {categories}

Explicitly generate a structured JSON outline EXACTLY matching this format:

{{
    "outline":[{{
        "section_title":"<Explicit Section Title>",
        "section_context":"<Explain clearly how this section relates specifically to the thesis and explicitly identify which methodology section(s) it addresses>",
        "subsections":[{{
            "subsection_title":"<Explicit Subsection Title>",
            "subsection_context":"<Clearly describe how this subsection relates specifically to its parent section, thesis, and explicitly identify which methodology section(s) it addresses>"
        }}]
    }}]
}}

Provide ONLY JSON. Do NOT include anything outside this JSON structure."#,
        length = describe_paper_length(paper_length_pages),
        categories = source_categories.join(", "),
    )
}

pub fn sections_prompt(
    final_thesis: &str,
    methodology: &str,
    paper_length_pages: i32,
    source_categories: &[String],
) -> String {
    format!(
        r#"Generate main sections for a research paper of {length}.

Thesis: "{final_thesis}"
Methodology: {methodology}
Source Categories: {categories}

Create 4-6 main sections with titles and brief context descriptions.
Format as JSON array:
[
  {{
    "section_title": "Section Title",
    "section_context": "Brief description of what this section covers"
  }}
]

{JSON_ONLY_FOOTER}"#,
        length = describe_paper_length(paper_length_pages),
        categories = source_categories.join(", "),
    )
}

pub fn subsections_prompt(
    final_thesis: &str,
    methodology: &str,
    section_title: &str,
    section_context: &str,
    paper_length_pages: i32,
    source_categories: &[String],
) -> String {
    let source_categories_line = if source_categories.is_empty() {
        String::new()
    } else {
        format!("Source Categories: {}", source_categories.join(", "))
    };

    format!(
        r#"Generate 2-4 subsections for the section "{section_title}".

Section Context: {section_context}
Thesis: "{final_thesis}"
Methodology: {methodology}
Paper Length: {length}
{source_categories_line}

Create subsections with titles and context descriptions that will help address the larger section's purpose.
Each subsection should connect to the methodology and support the thesis.

Format as JSON array:
[
  {{
    "subsection_title": "Subsection Title",
    "subsection_context": "Brief description of what this subsection covers and how it supports the section and thesis"
  }}
]

{JSON_ONLY_FOOTER}"#,
        length = describe_paper_length(paper_length_pages),
    )
}

pub fn questions_prompt(
    final_thesis: &str,
    methodology: &str,
    section_title: &str,
    section_context: &str,
    subsection_title: &str,
    subsection_context: &str,
) -> String {
    format!(
        r#"Generate 3-5 research questions for the subsection "{subsection_title}".

Section: {section_title}
Section Context: {section_context}
Subsection Context: {subsection_context}
Thesis: "{final_thesis}"
Methodology: {methodology}

Create specific research questions that would guide the research for this subsection.
Format as JSON array of strings:
[
  "Question 1?",
  "Question 2?",
  "Question 3?"
]

{JSON_ONLY_FOOTER}"#
    )
}

#[allow(clippy::too_many_arguments)]
pub fn question_citations_prompt(
    question: &str,
    citation_count: u32,
    section_title: &str,
    subsection_title: &str,
    subsection_context: &str,
    final_thesis: &str,
    methodology: &str,
    source_categories: &[String],
) -> String {
    format!(
        r#"Generate {citation_count} recommended academic sources for the research question: "{question}"

Context:
- Section: {section_title}
- Subsection: {subsection_title}
- Subsection Context: {subsection_context}
- Thesis: "{final_thesis}"
- Methodology: {methodology}
- Available Source Categories: {categories}

For each source, provide:
- APA citation
- Relevant categories from the available source categories
- Methodology points it supports
- Brief description of how it relates to the question

Format as JSON array:
[
  {{
    "apa": "Author, A. A. (Year). Title. Journal/Publisher.",
    "categories": ["Category1", "Category2"],
    "methodologyPoints": ["Point1", "Point2"],
    "description": "Brief description of relevance"
  }}
]

{JSON_ONLY_FOOTER}"#,
        categories = source_categories.join(", "),
    )
}

pub fn section_context_prompt(
    section_title: &str,
    paper_type: &str,
    final_thesis: &str,
    methodology: &str,
) -> String {
    format!(
        r#"Generate a brief context description for the section "{section_title}" in a {paper_type} paper.

Thesis: "{final_thesis}"
Methodology: {methodology}

Provide a 1-2 sentence description of what this section should cover.
Return only the description, no additional text."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_page_counts_become_phrases() {
        assert_eq!(describe_paper_length(-2), "the maximum level of detail possible");
        assert_eq!(
            describe_paper_length(-1),
            "a flexible length suitable to the complexity of the thesis"
        );
        assert_eq!(describe_paper_length(15), "15 pages");
    }

    #[test]
    fn test_outline_prompt_contains_every_field_and_no_raw_sentinel() {
        let categories = vec!["Policy Reports".to_string()];
        let prompt = outline_prompt("X improves Y", "Systematic review", -2, &categories);
        assert!(prompt.contains("X improves Y"));
        assert!(prompt.contains("Systematic review"));
        assert!(prompt.contains("Policy Reports"));
        assert!(prompt.contains("the maximum level of detail possible"));
        assert!(!prompt.contains("-2"));
    }

    #[test]
    fn test_subsections_prompt_omits_empty_source_categories() {
        let prompt = subsections_prompt("T", "M", "Section", "Ctx", 10, &[]);
        assert!(!prompt.contains("Source Categories:"));
        let with = subsections_prompt("T", "M", "Section", "Ctx", 10, &["Books".to_string()]);
        assert!(with.contains("Source Categories: Books"));
    }

    #[test]
    fn test_question_citations_prompt_contains_every_field() {
        let categories = vec!["Case Studies".to_string()];
        let prompt = question_citations_prompt(
            "How does X affect Y?",
            4,
            "Analysis",
            "Mechanisms",
            "Subsection context",
            "X improves Y",
            "Thematic synthesis",
            &categories,
        );
        for needle in [
            "How does X affect Y?",
            "Generate 4 recommended",
            "Analysis",
            "Mechanisms",
            "Subsection context",
            "X improves Y",
            "Thematic synthesis",
            "Case Studies",
        ] {
            assert!(prompt.contains(needle), "missing {needle}");
        }
    }
}

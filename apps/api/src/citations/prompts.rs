//! Prompt builder for citation validation.

pub struct CitationValidityFields<'a> {
    pub apa: &'a str,
    pub title: &'a str,
    pub author: &'a str,
    pub description: &'a str,
    pub thesis: &'a str,
    pub section_title: &'a str,
    pub subsection_title: &'a str,
    pub question: &'a str,
    pub methodology: &'a str,
}

pub fn citation_validity_prompt(f: &CitationValidityFields<'_>) -> String {
    format!(
        r#"You are an expert academic librarian and research validator. Your task is to analyze a citation and determine if it's valid and appropriately supports the given research context.

CITATION TO VALIDATE:
APA: "{apa}"
Title: "{title}"
Author: "{author}"
Description: "{description}"

RESEARCH CONTEXT:
Thesis: "{thesis}"
Section: "{section}"
Subsection: "{subsection}"
Research Question: "{question}"
Methodology: {methodology}

VALIDATION CRITERIA:
1. Citation Format: Is the APA citation properly formatted?
2. Source Credibility: Does this appear to be a credible academic/professional source?
3. Relevance: Does the source logically support the research question and thesis?
4. Accessibility: Can this source realistically be accessed (not fake, realistic publication)?

INSTRUCTIONS:
- Analyze the citation against the four criteria above
- Determine validity status:
  * "valid": Citation is properly formatted, credible, relevant, and accessible
  * "partial": Citation has minor issues but is generally acceptable (e.g., formatting issues, tangential relevance)
  * "invalid": Citation has major problems (fake source, completely irrelevant, or severely malformed)
  * "error": Unable to properly assess the citation

- If the source appears to be real and accessible, try to provide a realistic web link where it might be found (academic databases, publisher websites, etc.). If unsure, do not provide a link.

Respond in valid JSON format:
{{
    "status": "valid|partial|invalid|error",
    "explanation": "Clear explanation of your assessment addressing format, credibility, relevance, and accessibility",
    "link": "https://example.com/link-to-source or null if no reliable link can be determined"
}}

Return only the JSON response."#,
        apa = f.apa,
        title = f.title,
        author = f.author,
        description = f.description,
        thesis = f.thesis,
        section = f.section_title,
        subsection = f.subsection_title,
        question = f.question,
        methodology = f.methodology,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_prompt_contains_every_field() {
        let prompt = citation_validity_prompt(&CitationValidityFields {
            apa: "Doe, J. (2020). Work.",
            title: "Work",
            author: "Doe",
            description: "Key source",
            thesis: "X improves Y",
            section_title: "Analysis",
            subsection_title: "Mechanisms",
            question: "How does X affect Y?",
            methodology: "Systematic review",
        });
        for needle in [
            "Doe, J. (2020). Work.",
            "Key source",
            "X improves Y",
            "Analysis",
            "Mechanisms",
            "How does X affect Y?",
            "Systematic review",
        ] {
            assert!(prompt.contains(needle), "missing {needle}");
        }
    }
}

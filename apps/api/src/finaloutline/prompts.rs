//! Prompt builders for the final-outline prose operations. Each receives the
//! completed outline (serialized), the thesis, and the methodology prose.

use crate::llm_client::prompts::JSON_ONLY_FOOTER;

fn paragraph_prompt(kind: &str, instructions: &str, outline_json: &str, thesis: &str, methodology: &str) -> String {
    format!(
        r#"You are an expert academic writer completing a research paper outline.

Thesis: "{thesis}"
Methodology: {methodology}

Completed Outline:
{outline_json}

Write the {kind} for this paper.
{instructions}

Return ONLY the paragraph text. No heading, no commentary, no markdown."#
    )
}

pub fn methodology_paragraph_prompt(outline_json: &str, thesis: &str, methodology: &str) -> String {
    paragraph_prompt(
        "methodology paragraph",
        "Summarize, in one cohesive paragraph of formal academic prose, how the research \
         methodology is applied across the outline's sections to support the thesis.",
        outline_json,
        thesis,
        methodology,
    )
}

pub fn conclusion_prompt(outline_json: &str, thesis: &str, methodology: &str) -> String {
    paragraph_prompt(
        "conclusion paragraph",
        "Synthesize the outline's main findings into one conclusion paragraph that restates \
         the thesis in light of the evidence and states its implications.",
        outline_json,
        thesis,
        methodology,
    )
}

pub fn abstract_prompt(outline_json: &str, thesis: &str, methodology: &str) -> String {
    paragraph_prompt(
        "abstract",
        "Write one abstract paragraph (150-250 words) covering purpose, methodology, main \
         findings, and significance, in that order.",
        outline_json,
        thesis,
        methodology,
    )
}

pub fn transitions_prompt(outline_json: &str, thesis: &str, methodology: &str) -> String {
    format!(
        r#"You are an expert academic writer completing a research paper outline.

Thesis: "{thesis}"
Methodology: {methodology}

Completed Outline:
{outline_json}

For each adjacent pair of outline positions, write a one-sentence transition that carries the argument from the first position into the second.

Return a JSON object mapping outline positions to transition sentences, keyed by the position the transition leads FROM and TO joined with a period. Example:

{{
  "I.A": "Transition from section I into subsection A...",
  "A.1": "Transition from subsection A into point 1..."
}}

{JSON_ONLY_FOOTER}"#
    )
}

pub fn refine_outline_prompt(outline_json: &str, thesis: &str, methodology: &str) -> String {
    format!(
        r#"You are an expert academic editor refining a completed research paper outline.

Thesis: "{thesis}"
Methodology: {methodology}

Outline to refine:
{outline_json}

Rewrite the outline with:
- Up to 7 hierarchy levels using the convention I. / A. / 1. / a. / i. / 1) / a)
- Consistent indentation and clean formatting at every level
- Improved flow: reorder points only where it strengthens the argument's progression
- All citation references preserved exactly as they appear

Return ONLY the refined outline text. No commentary before or after it."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_prompts_contain_every_field() {
        let builders: [fn(&str, &str, &str) -> String; 3] =
            [methodology_paragraph_prompt, conclusion_prompt, abstract_prompt];
        for builder in builders {
            let prompt = builder("{\"outline\":[]}", "X improves Y", "Case study");
            assert!(prompt.contains("X improves Y"));
            assert!(prompt.contains("Case study"));
            assert!(prompt.contains("{\"outline\":[]}"));
        }
    }

    #[test]
    fn test_transitions_prompt_demands_json_only() {
        let prompt = transitions_prompt("{}", "T", "M");
        assert!(prompt.contains(r#""I.A""#));
        assert!(prompt.contains("Return ONLY valid JSON"));
    }
}

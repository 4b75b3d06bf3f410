//! Prompt builders for the data-analysis operations, including the
//! formatting helpers that flatten question/citation trees into prompt text.

use serde_json::Value;

use crate::normalize::str_or;

pub fn analyze_subsection_prompt(
    subsection_title: &str,
    subsection_context: &str,
    section_title: &str,
    thesis: &str,
    methodology: &str,
    questions_and_citations: &str,
) -> String {
    format!(
        r#"You are analyzing research data for academic paper writing. Analyze the following research questions and citations to extract themes, patterns, and logical structures from the ACTUAL DATA provided.

RESEARCH CONTEXT:
- Subsection: {subsection_title}
- Subsection Context: {subsection_context}
- Parent Section: {section_title}
- Thesis: {thesis}
- Methodology: {methodology}

RESEARCH QUESTIONS AND CITATIONS:
{questions_and_citations}

ANALYSIS TASKS:
1. THEMATIC ANALYSIS: Identify 2-4 major themes that emerge from the actual content of the citations and questions. Base themes ONLY on what you find in the data, not predetermined categories.

2. EVIDENCE ANALYSIS: For each theme, identify:
   - What types of evidence are actually present in the citations
   - Key concepts and terminology that appear frequently
   - Any temporal scope (time periods) mentioned in the sources
   - Specific examples, cases, or data points mentioned

3. LOGICAL STRUCTURE: Determine the best way to organize these themes based on:
   - Natural relationships between the themes found in the data
   - Logical progression from foundational to complex concepts
   - How the evidence builds upon itself
   - Connection to the research methodology and thesis

4. OUTLINE GENERATION: Create a hierarchical outline structure with:
   - Main points based on the identified themes
   - Sub-points drawn from specific evidence in the citations
   - Deeper supporting points from concrete examples/data in sources
   - Each point should include the actual supporting evidence found

IMPORTANT:
- Extract themes from the actual citation content, don't impose predetermined categories
- Use specific details, examples, and findings that are actually in the citations
- Create content based on what the sources actually say, not generic academic language
- Ensure all outline points can be traced back to specific evidence in the provided data

Respond with a structured analysis that identifies what themes and patterns actually exist in this specific research data."#
    )
}

/// Flattens the question/citation tree into `QUESTION N: ...` blocks.
pub fn format_questions_and_citations(questions: &[Value]) -> String {
    let mut formatted = String::new();
    for (i, question) in questions.iter().enumerate() {
        formatted.push_str(&format!(
            "\nQUESTION {}: {}\n",
            i + 1,
            str_or(question, "question", "")
        ));

        let Some(citations) = question.get("citations").and_then(Value::as_array) else {
            continue;
        };
        if citations.is_empty() {
            continue;
        }
        formatted.push_str("CITATIONS FOR THIS QUESTION:\n");
        for (j, citation) in citations.iter().enumerate() {
            formatted.push_str(&format!("  Citation {}:\n", j + 1));
            formatted.push_str(&format!("    APA: {}\n", str_or(citation, "apa", "N/A")));
            formatted.push_str(&format!(
                "    Description: {}\n",
                str_or(citation, "description", "N/A")
            ));
            formatted.push_str(&format!("    URL: {}\n\n", str_or(citation, "url", "N/A")));
        }
    }
    formatted
}

pub fn inclusion_exclusion_prompt(thesis: &str, draft_content: &str) -> String {
    format!(
        r#"You are analyzing content from Draft Outline 1 to determine what should be INCLUDED vs EXCLUDED in the final research paper based on thesis alignment and narrative coherence.

THESIS: {thesis}

DRAFT OUTLINE 1 CONTENT:
{draft_content}

Your task is to provide a comprehensive inclusion/exclusion analysis with the following structure:

1. Section Purpose & Flow:
Explain the overall purpose of this section and how it fits into the thesis narrative. Identify what key arguments this section needs to establish.

2. Thesis Alignment:
Analyze how this section supports the main thesis.

3. Content to INCLUDE from Draft Outline 1:
For each subsection/topic that should be included, provide:
- SPECIFIC CONTENT: Name the exact subsection, research question, or topic area
- INCLUSION RATIONALE: Why this content strongly supports the thesis
- NARRATIVE FIT: How it fits into the overall argument flow
- SUPPORTING EVIDENCE: Which specific research questions/citations validate this content

4. Content to EXCLUDE from Draft Outline 1:
For each subsection/topic that should be excluded, provide:
- SPECIFIC CONTENT: Name the exact subsection, research question, or topic area being excluded
- EXCLUSION RATIONALE: Detailed explanation of why this content should be omitted

5. Content Priority Order:
Provide a single numbered list ranking ALL included content by importance to the thesis argument (1 = most critical, 2 = very important, etc.).

6. Selection Strategy:
Explain the overall strategy for content selection and how it maintains narrative coherence.

Be specific about WHAT content to include/exclude with clear identification of subsection titles, research question topics, or content areas. Avoid vague references."#
    )
}

/// Flattens the Draft Outline 1 tree into indented SECTION/SUBSECTION/QUESTION
/// lines for the inclusion/exclusion prompt.
pub fn format_draft_content(literature_review_data: Option<&Value>) -> String {
    let Some(outline) = literature_review_data
        .and_then(|d| d.get("outline"))
        .and_then(Value::as_array)
    else {
        return String::new();
    };

    let mut content = String::new();
    for section in outline {
        content.push_str(&format!("SECTION: {}\n", str_or(section, "section_title", "")));
        content.push_str(&format!("CONTEXT: {}\n", str_or(section, "section_context", "")));
        for subsection in section
            .get("subsections")
            .and_then(Value::as_array)
            .unwrap_or(&vec![])
        {
            content.push_str(&format!(
                "  SUBSECTION: {}\n",
                str_or(subsection, "subsection_title", "")
            ));
            content.push_str(&format!(
                "  CONTEXT: {}\n",
                str_or(subsection, "subsection_context", "")
            ));
            for question in subsection
                .get("questions")
                .and_then(Value::as_array)
                .unwrap_or(&vec![])
            {
                content.push_str(&format!(
                    "    QUESTION: {}\n",
                    str_or(question, "question", "")
                ));
            }
        }
        content.push('\n');
    }
    content
}

pub fn build_data_outline_prompt(
    section_title: &str,
    section_context: &str,
    thesis: &str,
    methodology: &str,
    context_analysis: &str,
    logic_framework: &str,
    draft_context: &str,
    citation_details: &str,
) -> String {
    format!(
        r#"You are an expert academic writer building a comprehensive outline using a systematic 5-step integration process. Work through each step methodically to create substantive, research-based content.

SECTION: {section_title}
CONTEXT: {section_context}
THESIS: {thesis}
METHODOLOGY: {methodology}

## STEP 1: CONTEXT MAP REVIEW
Analyze the contextual framework established for this section:
{context_analysis}

## STEP 2: OUTLINE LOGIC ANALYSIS
Review the logical structure and research focus identified:
{logic_framework}

## STEP 3: DRAFT OUTLINE 1 INTEGRATION
Extract notes, responses, and content from the initial outline:
{draft_context}

## STEP 4: CUSTOM RESEARCH FRAMEWORK CONSTRUCTION
Based on Steps 1-3, create a research framework that:
- Integrates contextual understanding with logical structure
- Incorporates actual findings/notes from Draft Outline 1
- Builds toward specific thesis arguments
- Follows the identified research methodology

## STEP 5: CITATION-BASED ENHANCEMENTS
Add substantive details from citation content:
{citation_details}

## SUBSECTION PROCESSING INSTRUCTIONS

For EACH subsection, follow this systematic process:

**STEP 4 OUTPUT - Custom Framework Points**: Create 4-6 main arguments that synthesize:
- Context insights from Step 1
- Logical focus from Step 2
- Actual content/notes from Step 3
- Research methodology alignment

**STEP 5 OUTPUT - Citation Enhancements**: For each framework point, add 3-4 supporting details that:
- Extract specific facts, statistics, case studies from citation descriptions
- Reference actual policy names, dates, expert conclusions
- Provide concrete evidence that supports the framework argument
- Avoid generic academic language - use actual research content

**INTEGRATION REQUIREMENTS**:
- Each main point must reference specific content from Steps 1-3
- Supporting details must come from actual citation descriptions
- Avoid creating any content not found in the provided research data
- Connect each point explicitly to thesis advancement

RESPONSE FORMAT:
{{
  "section_title": "{section_title}",
  "section_overview": "How this section advances the thesis using integrated findings from all 5 steps",
  "subsection_outlines": [
    {{
      "subsection_title": "actual subsection name",
      "context_integration": "How Step 1 context shapes this subsection",
      "logic_integration": "How Step 2 logic focuses this subsection",
      "draft_integration": "What Step 3 draft content is incorporated",
      "main_points": ["framework point 1 with Steps 1-3 integration", "framework point 2", "framework point 3", "framework point 4"],
      "supporting_details": ["citation-based evidence 1", "citation-based evidence 2", "citation-based evidence 3", "citation-based evidence 4"],
      "transitions": ["logical connection referencing integrated framework", "connection building thesis argument"],
      "citations_used": [1, 2, 3, 4, 5],
      "step_integration_notes": "How all 5 steps contributed to this subsection outline"
    }}
  ],
  "logical_flow": "How subsections build integrated argument from all steps",
  "integration_notes": "Overall integration achievement and thesis advancement",
  "methodology_alignment": "How this section aligns with and supports the research methodology"
}}"#
    )
}

/// Step 1 view of the logic framework: thesis/methodology alignment lines.
pub fn format_context_analysis(logic_framework: &[Value]) -> String {
    if logic_framework.is_empty() {
        return "No context analysis data available from Step 1".to_string();
    }
    logic_framework
        .iter()
        .map(|item| {
            format!(
                "\nSUBSECTION CONTEXT: {}\n- Thesis Alignment: {}\n- Methodology Connection: {}\n- Research Focus Area: {}\n- Analytical Purpose: {}\n- Evidence Role: {}\n",
                str_or(item, "subsection_title", "Unknown"),
                str_or(item, "thesis_connection", "Not specified"),
                str_or(item, "methodology_connection", "Not specified"),
                str_or(item, "research_focus", "Not specified"),
                str_or(item, "analytical_purpose", "Not specified"),
                str_or(item, "evidence_role", "Not specified"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Step 2 view of the logic framework: research focus and approach lines.
pub fn format_logic_framework(logic_framework: &[Value]) -> String {
    if logic_framework.is_empty() {
        return "No logic framework data available".to_string();
    }
    logic_framework
        .iter()
        .map(|item| {
            format!(
                "\nSUBSECTION: {}\n- Research Focus: {}\n- Evidence Type: {}\n- Analysis Approach: {}\n- Key Insights: {}\n- Thesis Connection: {}\n",
                str_or(item, "subsection_title", "Unknown"),
                str_or(item, "research_focus", "Not specified"),
                str_or(item, "evidence_type", "Not specified"),
                str_or(item, "analysis_approach", "Not specified"),
                str_or(item, "key_insights", "Not provided"),
                str_or(item, "thesis_connection", "Not specified"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Step 3 view: Draft Outline 1 structure with question and citation excerpts.
pub fn format_draft_context(draft_context: Option<&Value>) -> String {
    let Some(draft) = draft_context else {
        return "No Draft Outline 1 data available - proceed with Steps 1-2 only".to_string();
    };

    let mut formatted = format!(
        "\nDRAFT OUTLINE 1 STRUCTURE:\nSection: {}\nSection Context: {}\n",
        str_or(draft, "section_title", "Unknown"),
        str_or(draft, "section_context", "Not provided"),
    );

    let Some(subsections) = draft.get("subsections").and_then(Value::as_array) else {
        return formatted;
    };

    formatted.push_str("\nDRAFT SUBSECTION DETAILS:\n");
    for subsection in subsections {
        let questions = subsection
            .get("questions")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        formatted.push_str(&format!(
            "\nSUBSECTION: {}\n- Context: {}\n- Questions: {}\n",
            str_or(subsection, "subsection_title", "Unknown"),
            str_or(subsection, "subsection_context", "Not provided"),
            questions.len(),
        ));

        if questions.is_empty() {
            continue;
        }
        formatted.push_str("- Research Questions & Responses:\n");
        for (i, question) in questions.iter().take(3).enumerate() {
            formatted.push_str(&format!(
                "  Q{}: {}\n",
                i + 1,
                str_or(question, "question", "No question text")
            ));
            for (j, citation) in question
                .get("citations")
                .and_then(Value::as_array)
                .unwrap_or(&vec![])
                .iter()
                .take(2)
                .enumerate()
            {
                let description: String = str_or(citation, "description", "No description")
                    .chars()
                    .take(200)
                    .collect();
                formatted.push_str(&format!("      Citation {}: {description}...\n", j + 1));
            }
        }
    }
    formatted
}

/// Step 5 view: citation details per subsection, capped at five citations.
pub fn format_citation_details(subsections: &[Value]) -> String {
    if subsections.is_empty() {
        return "No citation details available".to_string();
    }

    let mut formatted: Vec<String> = Vec::new();
    for subsection in subsections {
        formatted.push(format!(
            "\nSUBSECTION CITATIONS: {}",
            str_or(subsection, "subsection_title", "Unknown Subsection")
        ));

        let mut citation_count = 0;
        'subsection: for question in subsection
            .get("questions")
            .and_then(Value::as_array)
            .unwrap_or(&vec![])
        {
            for citation in question
                .get("citations")
                .and_then(Value::as_array)
                .unwrap_or(&vec![])
            {
                citation_count += 1;
                let apa: String = str_or(citation, "apa", "No APA available")
                    .chars()
                    .take(100)
                    .collect();
                let question_text: String = str_or(question, "question", "No question")
                    .chars()
                    .take(100)
                    .collect();
                formatted.push(format!(
                    "\nCitation {citation_count}:\n- APA: {apa}...\n- Description: {}\n- URL: {}\n- Question Context: {question_text}...\n",
                    str_or(citation, "description", "No description available"),
                    str_or(citation, "url", "No URL"),
                ));
                if citation_count >= 5 {
                    break 'subsection;
                }
            }
        }
    }
    formatted.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_questions_and_citations() {
        let questions = vec![
            json!({
                "question": "How fast did attribution complete?",
                "citations": [
                    {"apa": "Doe (2020).", "description": "Timeline study", "url": "https://x"}
                ]
            }),
            json!({"question": "Bare question with no citations"}),
        ];
        let formatted = format_questions_and_citations(&questions);
        assert!(formatted.contains("QUESTION 1: How fast did attribution complete?"));
        assert!(formatted.contains("APA: Doe (2020)."));
        assert!(formatted.contains("QUESTION 2: Bare question with no citations"));
        assert!(!formatted.contains("QUESTION 2: Bare question with no citations\nCITATIONS"));
    }

    #[test]
    fn test_format_draft_content_flattens_outline_tree() {
        let data = json!({
            "outline": [{
                "section_title": "Findings",
                "section_context": "Core evidence",
                "subsections": [{
                    "subsection_title": "Trends",
                    "subsection_context": "Observed patterns",
                    "questions": [{"question": "What changed?"}]
                }]
            }]
        });
        let content = format_draft_content(Some(&data));
        assert!(content.contains("SECTION: Findings"));
        assert!(content.contains("  SUBSECTION: Trends"));
        assert!(content.contains("    QUESTION: What changed?"));
    }

    #[test]
    fn test_format_draft_content_empty_when_missing() {
        assert!(format_draft_content(None).is_empty());
        assert!(format_draft_content(Some(&json!({"other": 1}))).is_empty());
    }

    #[test]
    fn test_format_context_analysis_placeholder_when_empty() {
        assert!(format_context_analysis(&[]).contains("No context analysis data"));
        let items = vec![json!({"subsection_title": "Trends", "research_focus": "Rates"})];
        let formatted = format_context_analysis(&items);
        assert!(formatted.contains("SUBSECTION CONTEXT: Trends"));
        assert!(formatted.contains("Research Focus Area: Rates"));
    }

    #[test]
    fn test_format_citation_details_caps_at_five() {
        let citations: Vec<Value> = (0..8)
            .map(|i| json!({"apa": format!("Source {i}"), "description": "D"}))
            .collect();
        let subsections = vec![json!({
            "subsection_title": "Dense",
            "questions": [{"question": "Q", "citations": citations}]
        })];
        let formatted = format_citation_details(&subsections);
        assert!(formatted.contains("Citation 5:"));
        assert!(!formatted.contains("Citation 6:"));
    }
}

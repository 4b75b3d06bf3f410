//! Prompt builders for the drafting operations. The evidence and fusion
//! prompts share the multi-tier outline numbering convention from
//! `llm_client::prompts`.

use crate::llm_client::prompts::OUTLINE_NUMBERING_FORMAT;

#[allow(clippy::too_many_arguments)]
pub fn citation_response_prompt(
    author: &str,
    citation_label: &str,
    reference_number: &str,
    thesis: &str,
    methodology: &str,
    section_context: &str,
    subsection_context: &str,
    question: &str,
) -> String {
    format!(
        r#"You are an expert on the works of {author}.
Your task is to answer the following research question using ONLY the cited work, quoting exactly and providing a detailed, multi-tiered outline starting at level 3 with the following numbering format:

{OUTLINE_NUMBERING_FORMAT}

REFERENCE CITATION FORMAT:
- This citation has been assigned reference number: [{reference_number}]
- When referencing this citation in your outline, use: [{reference_number}]
- Example: "Direct quote from the source" [{reference_number}]

STRICT INSTRUCTIONS:
- Use only direct quotes from the cited text. Do NOT paraphrase or summarize.
- Every outline point must include an exact quote and reference the citation as [{reference_number}].
- Do not include any information not found in the cited work.
- Make the outline as detailed as possible, using all relevant material from the citation.
- Do not add commentary, explanation, or any content not present in the cited work.
- Follow the exact numbering format specified above, starting with "1." for your first main point.
- Always use [{reference_number}] for citation references, not the full citation text.

Thesis: {thesis}
Methodology: {methodology}
Section Context: {section_context}
Subsection Context: {subsection_context}

Question: {question}

Citation: {citation_label}
Reference Number: [{reference_number}]

Begin your outline below:"#
    )
}

#[allow(clippy::too_many_arguments)]
pub fn fused_response_prompt(
    thesis: &str,
    methodology: &str,
    section_context: &str,
    subsection_context: &str,
    question: &str,
    citations_list: &str,
    outlines_list: &str,
) -> String {
    format!(
        r#"You are an expert academic analyst.

Given the following detailed outlines (one per citation) answering the question, create a master outline that:
- Combines the arguments of each citation
- Groups supporting factors
- Calls out contradictions between citations
- Presents the result in a detailed, multi-tiered outline starting at level 3 with the following numbering format:

{OUTLINE_NUMBERING_FORMAT}

REFERENCE CITATION FORMAT:
- Use the reference numbers provided (e.g., [1], [2], [3], etc.)
- Example: "Direct quote from the source" [1]
- When multiple citations support a point: [1, 2]

STRICT INSTRUCTIONS:
- Use only the information and quotes provided in the citation outlines below.
- Do NOT paraphrase or invent new content.
- Clearly indicate which citation each point comes from using the reference number format [X].
- For each group or contradiction, specify which reference numbers are involved.
- The final outline must be as detailed as possible, preserving the original quotes and attributions.
- Follow the exact numbering format specified above, starting with "1." for your first main point.
- Always use the reference number format [X] for citations, not the citation numbers.

Thesis: {thesis}
Methodology: {methodology}
Section Context: {section_context}
Subsection Context: {subsection_context}

Question: {question}

Citations with Reference Numbers:
{citations_list}

Citation Outlines:
{outlines_list}

Master Outline:"#
    )
}

#[allow(clippy::too_many_arguments)]
pub fn prose_from_outline_prompt(
    thesis: &str,
    methodology: &str,
    section_context: &str,
    subsection_context: &str,
    question: &str,
    citations_list: &str,
    responses_content: &str,
) -> String {
    let context_statement = if section_context.is_empty() {
        subsection_context
    } else {
        section_context
    };

    format!(
        r#"You are an academic synthesis and writing engine.
Your task is to convert the fused outline—which contains section/subsection structure, contextual analysis, and question responses—into research-paper-quality prose.

PRIMARY OBJECTIVE:
Transform the completed section/subsection content into full, coherent paragraphs that:
- Clearly express the larger point or argument implied by the section's context statement
- Integrate and elaborate upon the data and responses from the fused outline
- Maintain academic flow, logical structure, and narrative cohesion

WRITING REQUIREMENTS:
- Write at a formal academic level, suitable for publication or graduate-level research
- Each subsection should produce 2-4 well-developed paragraphs unless otherwise directed by data density
- Maintain strong coherence using transitions that reinforce the section's relationship to the broader argument
- Use context statement: "{context_statement}"

CITATION FORMAT:
- Use blue-linked citations for in-app pop-up functionality
- Format: <span style="color:blue;" data-cite="[Reference]">[Reference]</span>
- Example: According to the analysis <span style="color:blue;" data-cite="[1]">[1]</span>
- Multiple sources: <span style="color:blue;" data-cite="[1,2]">[1, 2]</span>

STYLE REQUIREMENTS:
- Objective, analytical tone
- Smooth transitions between evidence and interpretation
- Avoid repetition of citation phrases or excessive quotation; paraphrase appropriately
- Begin with the intent and purpose described in the contextual analysis
- Every paragraph should stay aligned with why this section exists and how it supports the thesis

THESIS CONTEXT: {thesis}
METHODOLOGY: {methodology}
SECTION CONTEXT: {section_context}
SUBSECTION CONTEXT: {subsection_context}

QUESTION BEING ADDRESSED: {question}

AVAILABLE CITATIONS:
{citations_list}

FUSED OUTLINE CONTENT TO CONVERT TO PROSE:
{responses_content}

Generate full academic prose that converts the outline structure into flowing paragraphs while maintaining all citations and arguments. Do not use bullet points or outline formatting - write complete paragraphs only."#
    )
}

pub fn analyze_data_sections_prompt(
    thesis: &str,
    methodology: &str,
    paper_type: &str,
    outline_framework_json: &str,
    outline_draft1_json: &str,
) -> String {
    format!(
        r#"You are an advanced academic writing assistant. Your task is to identify sections from the provided outlines that represent DATA, FINDINGS, RESULTS, or EVIDENCE sections that should be transformed into scholarly prose.

THESIS: {thesis}

METHODOLOGY: {methodology}

PAPER TYPE: {paper_type}

OUTLINE FRAMEWORK:
{outline_framework_json}

OUTLINE DRAFT 1:
{outline_draft1_json}

ANALYSIS TASK:

1. Identify Data Sections: Locate every section or subsection that represents factual data, evidence, findings, or results that support the thesis.

2. Interpret Academic Purpose: For each identified section, determine:
   - How it contributes to the research methodology
   - What analytical role it plays
   - What questions it answers
   - How it links to higher-level claims

3. Plan Structure: For each section, summarize:
   - Intent and scope (key variables, datasets, timeframes, sources)
   - Logical structure for subsections
   - Connection to thesis and methodology

OUTPUT FORMAT (JSON):
{{
    "identified_sections": [
        {{
            "section_index": 0,
            "section_title": "Section Name",
            "section_context": "Context from outline",
            "section_category": "Data/Evidence/Results/Findings",
            "academic_purpose": "How this section contributes to methodology and thesis",
            "key_variables": ["variable1", "variable2"],
            "data_scope": "What timeframes, datasets, sources are covered",
            "subsection_structure": [
                {{
                    "subsection_title": "Subsection Name",
                    "analytical_role": "What question this answers",
                    "evidence_type": "Type of data/evidence presented"
                }}
            ],
            "thesis_connection": "How this section supports the central argument"
        }}
    ],
    "section_purposes": [
        "Purpose of section 1",
        "Purpose of section 2"
    ],
    "recommended_build_order": [0, 1, 2],
    "analysis_summary": "Overall summary of identified data sections and their role in the research"
}}

GUIDELINES:
- Focus on sections containing factual information, evidence, case studies, data analysis
- Exclude pure methodology, introduction, or conclusion sections
- Identify the logical flow from foundational data to complex analysis
- Consider how sections build upon each other to support the thesis"#
    )
}

pub fn build_data_sections_prompt(
    thesis: &str,
    methodology: &str,
    paper_type: &str,
    sections_to_build_json: &str,
    outline_framework_json: &str,
    outline_draft1_json: &str,
) -> String {
    format!(
        r#"You are constructing well-structured, scholarly "Data" sections of a research paper. Transform the provided outline sections into cohesive, factual, and methodologically grounded academic prose.

THESIS: {thesis}

METHODOLOGY: {methodology}

PAPER TYPE: {paper_type}

SECTIONS TO BUILD:
{sections_to_build_json}

FULL OUTLINE CONTEXT:
Framework: {outline_framework_json}
Draft 1: {outline_draft1_json}

BUILD REQUIREMENTS:

1. Transform each section into 1-2 introductory sentences + multiple subsections
2. Each subsection becomes 1-3 academic paragraphs (3-6 sentences each)
3. Maintain scholarly tone: formal, third person, neutral, precise
4. Focus on factual description and analytical linkage to methodology
5. Integrate citations seamlessly using [1], [2] format
6. Include transitions between subsections and sections

OUTPUT FORMAT (JSON):
{{
    "built_sections": [
        {{
            "section_number": "3",
            "section_title": "Section Title",
            "section_purpose": "1-2 sentences introducing the purpose of this section",
            "subsections": [
                {{
                    "subsection_number": "3.1",
                    "subsection_title": "Subsection Title",
                    "academic_content": "1-3 paragraphs of formal academic prose describing factual data, evidence, or findings. Each paragraph should be 3-6 sentences, logically structured, and connected to the thesis. Integrate citations as [1], [2], etc.",
                    "data_sources": ["Key dataset 1", "Evidence type 2"],
                    "citations": [
                        {{
                            "apa": "Author, A. (Year). Title. Journal.",
                            "categories": ["category1"],
                            "description": "Brief description"
                        }}
                    ],
                    "transition_to_next": "Optional linking sentence to next subsection"
                }}
            ],
            "section_summary": "Brief paragraph highlighting continuity with next analytical phase"
        }}
    ],
    "continuity_notes": [
        "Note about flow between sections"
    ],
    "completion_status": "partial",
    "next_recommended_sections": [2, 3]
}}

STYLE GUIDELINES:
- Voice: Formal academic prose, third person, neutral and precise
- Focus: Factual description and analytical linkage to methodology
- Avoid: Repetition, speculation, unsubstantiated opinion
- Goal: Clarity, organization, and research alignment"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citation_response_prompt_threads_reference_number() {
        let prompt = citation_response_prompt(
            "Kennan",
            "Kennan, G. (1947). The Sources of Soviet Conduct.",
            "4.2",
            "Containment worked",
            "Archival analysis",
            "Cold War policy",
            "Early doctrine",
            "What did Kennan argue?",
        );
        assert!(prompt.contains("[4.2]"));
        assert!(prompt.contains("Kennan, G. (1947)."));
        assert!(prompt.contains("Containment worked"));
        assert!(prompt.contains("Lowercase Roman numerals with parentheses"));
    }

    #[test]
    fn test_fused_prompt_contains_lists() {
        let prompt = fused_response_prompt(
            "T",
            "M",
            "SC",
            "SSC",
            "Q?",
            "[1]: Source one",
            "Citation [1]:\noutline body",
        );
        assert!(prompt.contains("[1]: Source one"));
        assert!(prompt.contains("outline body"));
        assert!(prompt.contains("Master Outline:"));
    }

    #[test]
    fn test_prose_prompt_prefers_section_context_statement() {
        let prompt = prose_from_outline_prompt("T", "M", "SecCtx", "SubCtx", "Q?", "", "");
        assert!(prompt.contains("Use context statement: \"SecCtx\""));
        let prompt = prose_from_outline_prompt("T", "M", "", "SubCtx", "Q?", "", "");
        assert!(prompt.contains("Use context statement: \"SubCtx\""));
    }
}

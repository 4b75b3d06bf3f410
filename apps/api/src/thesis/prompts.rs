//! Prompt builders for the thesis refinement operations.
//!
//! Every builder states the exact output format and forbids surrounding
//! commentary — downstream extraction depends on it.

/// Paper types that get government/military analytical framing in prompts.
const GOV_MILITARY_KEYWORDS: &[&str] = &[
    "position",
    "proposal",
    "analytical",
    "intelligence",
    "strategic",
    "policy",
    "assessment",
    "briefing",
    "operational",
    "security",
    "defense",
];

pub fn is_gov_military(paper_type: &str) -> bool {
    let t = paper_type.to_lowercase();
    GOV_MILITARY_KEYWORDS.iter().any(|k| t.contains(k))
}

const GOV_MILITARY_GUIDANCE: &str = "\
- Frame arguments in terms of policy implications, strategic considerations, or operational impact
- Use terminology appropriate for government/military analytical contexts
- Consider national security, defense policy, or strategic interests where relevant
- Ensure the thesis supports actionable recommendations or clear analytical conclusions";

const GOV_MILITARY_QUESTION_FOCUS: &str = "\
Focus on questions that help refine policy implications, strategic considerations, \
operational impact, or analytical conclusions relevant to government/military contexts.";

fn context_guidance(paper_type: &str) -> &'static str {
    if is_gov_military(paper_type) {
        GOV_MILITARY_GUIDANCE
    } else {
        ""
    }
}

pub fn refine_thesis_prompt(current_topic: &str, user_responses: &[String]) -> String {
    format!(
        r#"You are a professor skilled in refining thesis statements.
Given the original thesis and user responses provided, explicitly provide a SINGLE refined thesis statement enclosed within quotation marks and NO additional commentary or explanations.

Original Thesis:
{current_topic}

User Responses:
{responses}

Respond explicitly in this format ONLY:
"Refined thesis goes here."
"#,
        responses = user_responses.join("; "),
    )
}

pub fn probing_questions_prompt(
    thesis: &str,
    paper_type: &str,
    paper_purpose: &str,
    paper_tone: &str,
) -> String {
    let context_examples = if is_gov_military(paper_type) {
        GOV_MILITARY_QUESTION_FOCUS
    } else {
        ""
    };

    format!(
        r#"You are an expert academic writing assistant specializing in {paper_type}. Generate exactly 5 probing questions to help refine and improve the following thesis statement.

Paper Type: {paper_type}
Purpose: {paper_purpose}
Required Tone: {paper_tone}

Current Thesis: "{thesis}"

{context_examples}

Generate questions that help the user:
1. Narrow or broaden the scope appropriately for a {paper_type}
2. Clarify their specific argument or position
3. Identify key supporting points or evidence needed
4. Consider counterarguments or alternative perspectives
5. Refine the language and specificity for the {paper_tone} tone

Each question should be designed to elicit responses that will help create a stronger, more focused thesis statement appropriate for a {paper_type}.

Respond with exactly 5 questions, each on a new line, numbered 1-5:

1. [Question 1]
2. [Question 2]
3. [Question 3]
4. [Question 4]
5. [Question 5]"#
    )
}

pub fn answer_probing_questions_prompt(
    thesis: &str,
    paper_type: &str,
    paper_purpose: &str,
    paper_tone: &str,
    answered_questions: &[String],
) -> String {
    format!(
        r#"You are an expert academic writing assistant specializing in {paper_type}. Refine the following thesis statement based on the user's responses to probing questions.

Paper Type: {paper_type}
Purpose: {paper_purpose}
Required Tone: {paper_tone}

Original Thesis: "{thesis}"

User's Responses to Probing Questions:
{answers}

Instructions:
- Incorporate the user's responses to create a more focused, specific, and arguable thesis
- Ensure the refined thesis aligns with the {paper_type} purpose and {paper_tone} tone
- Make the thesis clear, concise, and suitable for the intended paper structure
- Maintain the user's intent while improving clarity and specificity
{guidance}

Respond with ONLY the refined thesis statement enclosed in quotation marks, with NO additional commentary or explanation.

Example Response:
"Refined thesis statement goes here.""#,
        answers = answered_questions.join("\n"),
        guidance = context_guidance(paper_type),
    )
}

pub fn auto_refine_prompt(
    thesis: &str,
    paper_type: &str,
    paper_purpose: &str,
    paper_tone: &str,
    paper_structure: &str,
) -> String {
    format!(
        r#"You are an expert academic writing assistant specializing in {paper_type}. Your task is to help transform a provided thesis topic or preliminary thesis statement into an ideal thesis statement suitable for a rigorous research paper.

Paper Type: {paper_type}
Purpose: {paper_purpose}
Required Tone: {paper_tone}
Expected Structure: {paper_structure}

An ideal thesis statement for a {paper_type}:
- Is clear, concise, and focused on the paper's specific purpose
- Presents an arguable claim or position rather than just a factual statement
- Aligns with the {paper_tone} tone requirements
- Explicitly outlines the main points or arguments that support the paper's structure
- Provides a scope that is neither too broad nor too narrow for the intended analysis
- Uses precise and scholarly language appropriate for the paper type
{guidance}

Follow these meticulous steps to refine the provided thesis:

Step 1: Evaluate the Original Thesis
- Identify the central topic and intent in relation to {paper_type} requirements
- Assess clarity, conciseness, specificity, and arguability for this paper type
- Identify any vagueness or statements that don't align with the paper's purpose

Step 2: Refine the Topic and Focus
- Ensure the topic aligns with the {paper_type} purpose: {paper_purpose}
- Narrow down overly broad topics or expand overly narrow ones
- Clearly define the primary argument or position suitable for this paper type

Step 3: Develop a Clear, Arguable Claim
- Transform factual statements into claims that can be supported with evidence
- Ensure the claim matches the required tone: {paper_tone}
- Include a perspective that requires evidence-based discussion appropriate for this paper type

Step 4: Outline Main Supporting Points
- Structure the thesis to support the expected paper organization: {paper_structure}
- Explicitly state or imply the key arguments the paper will explore
- Provide a roadmap that aligns with the {paper_type} format

Step 5: Use Appropriate Language
- Employ language that matches the {paper_tone} tone
- Use terminology appropriate for the {paper_type} context
- Ensure grammatical correctness and professional readability

Original User Thesis:
"{thesis}"

Respond explicitly with ONLY the refined thesis statement enclosed in quotation marks, with NO additional commentary or explanation.

Example Response:
"Refined thesis statement goes here.""#,
        guidance = context_guidance(paper_type),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refine_prompt_contains_every_field() {
        let responses = vec!["narrower scope".to_string(), "add evidence".to_string()];
        let prompt = refine_thesis_prompt("Cats improve morale", &responses);
        assert!(prompt.contains("Cats improve morale"));
        assert!(prompt.contains("narrower scope; add evidence"));
    }

    #[test]
    fn test_probing_prompt_contains_every_field() {
        let prompt =
            probing_questions_prompt("X improves Y", "research", "inform policy", "formal");
        assert!(prompt.contains("X improves Y"));
        assert!(prompt.contains("research"));
        assert!(prompt.contains("inform policy"));
        assert!(prompt.contains("formal"));
    }

    #[test]
    fn test_gov_military_detection() {
        assert!(is_gov_military("Intelligence Assessment"));
        assert!(is_gov_military("policy brief"));
        assert!(!is_gov_military("literature review"));
    }

    #[test]
    fn test_gov_military_guidance_only_for_matching_types() {
        let strategic = auto_refine_prompt("T", "strategic assessment", "p", "tone", "s");
        assert!(strategic.contains("national security"));
        let plain = auto_refine_prompt("T", "expository", "p", "tone", "s");
        assert!(!plain.contains("national security"));
    }
}

// Subsection data analysis: thematic mining of questions and citations,
// inclusion/exclusion analysis, and the 5-step data-outline builder.
// This module carries the heuristic text-mining fallback tier — it must
// produce structured output even from completions with no JSON at all.

pub mod handlers;
pub mod mining;
pub mod models;
pub mod prompts;

// Outline generation: full nested outlines, sections, subsections, research
// questions, per-question citations, and skeleton-driven structured outlines.

pub mod fallback;
pub mod handlers;
pub mod models;
pub mod prompts;

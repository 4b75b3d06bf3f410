//! Template-tier fallback for methodology generation: deterministic,
//! request-derived approaches used when the model's output cannot be
//! extracted or decoded.

use crate::methodology::handlers::GeneratedMethodology;

pub fn default_methodologies(
    final_thesis: &str,
    paper_type: &str,
    source_categories: &[String],
) -> Vec<GeneratedMethodology> {
    let primary_categories = source_categories
        .iter()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        GeneratedMethodology {
            title: "Literature Review Approach".to_string(),
            description: format!(
                "Systematic analysis of existing literature to support the thesis: {final_thesis}"
            ),
            approach: "Comprehensive review and synthesis of selected source categories"
                .to_string(),
            source_focus: format!("Primary focus on {primary_categories}"),
            structure_alignment: format!("Structured to align with {paper_type} requirements"),
        },
        GeneratedMethodology {
            title: "Comparative Analysis".to_string(),
            description: "Comparative examination of different perspectives and evidence"
                .to_string(),
            approach: "Cross-reference and compare findings across source categories".to_string(),
            source_focus: "Balanced use of all selected source categories".to_string(),
            structure_alignment: "Organized to support argumentative structure".to_string(),
        },
        GeneratedMethodology {
            title: "Thematic Synthesis".to_string(),
            description: "Thematic organization of evidence to support key arguments".to_string(),
            approach: "Group sources by themes and synthesize findings".to_string(),
            source_focus: "Emphasis on sources that support main themes".to_string(),
            structure_alignment: "Theme-based organization matching paper structure".to_string(),
        },
    ]
}

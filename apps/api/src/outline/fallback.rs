//! Template-tier fallbacks for the outline operations.

use crate::outline::models::{OutlineSection, OutlineSubsection, RecommendedSource};

/// The standard four-section outline used whenever a completion yields no
/// usable section structure.
pub fn default_sections() -> Vec<OutlineSection> {
    [
        ("Introduction", "Introduction and thesis statement"),
        ("Literature Review", "Review of existing research"),
        ("Analysis", "Main analysis and discussion"),
        ("Conclusion", "Summary and implications"),
    ]
    .into_iter()
    .map(|(title, context)| OutlineSection {
        section_title: title.to_string(),
        section_context: context.to_string(),
        subsections: vec![],
    })
    .collect()
}

pub fn default_subsections(section_title: &str) -> Vec<OutlineSubsection> {
    vec![
        OutlineSubsection {
            subsection_title: format!("{section_title} Overview"),
            subsection_context: "Overview of the section topic".to_string(),
        },
        OutlineSubsection {
            subsection_title: format!("{section_title} Analysis"),
            subsection_context: "Detailed analysis of the topic".to_string(),
        },
    ]
}

pub fn default_questions(subsection_title: &str) -> Vec<String> {
    vec![
        format!("What are the key aspects of {subsection_title}?"),
        format!("How does {subsection_title} relate to the thesis?"),
        format!("What evidence supports the analysis of {subsection_title}?"),
    ]
}

/// Single sample source derived from the request; empty when zero citations
/// were requested so the collection stays schema-valid either way.
pub fn sample_sources(
    question: &str,
    methodology: &str,
    source_categories: &[String],
    citation_count: u32,
) -> Vec<RecommendedSource> {
    if citation_count == 0 {
        return vec![];
    }

    let categories = if source_categories.is_empty() {
        vec!["General".to_string()]
    } else {
        source_categories.iter().take(2).cloned().collect()
    };

    let methodology_point = if methodology.len() > 50 {
        let mut end = 50;
        while !methodology.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &methodology[..end])
    } else {
        methodology.to_string()
    };

    vec![RecommendedSource {
        apa: format!("Sample Author (2023). Research on {question}. Academic Journal."),
        categories,
        methodology_points: vec![methodology_point],
        description: format!("Relevant source for researching: {question}"),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sections_cover_standard_four() {
        let sections = default_sections();
        assert_eq!(sections.len(), 4);
        let titles: Vec<&str> = sections.iter().map(|s| s.section_title.as_str()).collect();
        assert_eq!(
            titles,
            ["Introduction", "Literature Review", "Analysis", "Conclusion"]
        );
        assert!(sections.iter().all(|s| !s.section_context.is_empty()));
    }

    #[test]
    fn test_default_subsections_use_section_title() {
        let subs = default_subsections("Threat Landscape");
        assert_eq!(subs[0].subsection_title, "Threat Landscape Overview");
        assert_eq!(subs[1].subsection_title, "Threat Landscape Analysis");
    }

    #[test]
    fn test_sample_sources_zero_count_is_empty() {
        assert!(sample_sources("Q?", "M", &[], 0).is_empty());
    }

    #[test]
    fn test_sample_sources_truncates_long_methodology() {
        let long = "m".repeat(80);
        let sources = sample_sources("Q?", &long, &[], 3);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].methodology_points[0].len(), 53); // 50 + "..."
        assert_eq!(sources[0].categories, vec!["General"]);
    }

    #[test]
    fn test_sample_sources_takes_first_two_categories() {
        let cats: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        let sources = sample_sources("Q?", "M", &cats, 1);
        assert_eq!(sources[0].categories, vec!["A", "B"]);
    }
}

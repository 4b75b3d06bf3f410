//! Static configuration catalog: the hand-authored methodology taxonomy and
//! the paper-structure skeletons. Read-only reference data — nothing here is
//! created or mutated at runtime.

use serde::Serialize;

/// A node of the methodology taxonomy. Top-level families carry nested
/// sub-methodologies; leaves carry `None`.
#[derive(Debug, Clone, Serialize)]
pub struct MethodologyOption {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_methodologies: Option<Vec<MethodologyOption>>,
}

fn leaf(id: &str, name: &str, description: &str) -> MethodologyOption {
    MethodologyOption {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        sub_methodologies: None,
    }
}

fn family(
    id: &str,
    name: &str,
    description: &str,
    subs: Vec<MethodologyOption>,
) -> MethodologyOption {
    MethodologyOption {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        sub_methodologies: Some(subs),
    }
}

/// The four methodology families offered by the selection UI.
pub fn methodology_taxonomy() -> Vec<MethodologyOption> {
    vec![
        family(
            "literature_review",
            "Literature-Based Review",
            "An approach that systematically collects, reads, appraises, and synthesizes existing \
             scholarship (e.g., peer-reviewed articles, books, reports) to summarize the state of \
             knowledge on a specific question or topic.",
            vec![
                leaf("narrative_review", "Narrative (Traditional) Review", "Broad, unsystematic overview of a topic, often organized thematically or chronologically."),
                leaf("systematized_review", "Systematized Review", "Incorporates some systematic-review steps (e.g., structured search) but without full appraisal and synthesis."),
                leaf("systematic_review", "Systematic Review", "Fully protocolled process of search, appraisal, and synthesis."),
                leaf("scoping_review", "Scoping Review", "Maps key concepts and gaps without formal quality assessment."),
                leaf("rapid_review", "Rapid Review", "Streamlined methods for quicker turnaround."),
                leaf("umbrella_review", "Umbrella Review", "Synthesizes findings from multiple systematic reviews."),
                leaf("integrative_review", "Integrative Review", "Combines experimental and non-experimental studies for holistic insight."),
                leaf("critical_review", "Critical Review", "Evaluates methodological rigor and theoretical contributions."),
                leaf("evidence_mapping", "Evidence Mapping (Mapping Review)", "Visual/tabular mapping of study characteristics and research clusters."),
                leaf("meta_analysis", "Meta-Analysis", "Statistical pooling of quantitative effect sizes across studies."),
                leaf("meta_synthesis", "Meta-Synthesis", "Aggregates qualitative findings into higher-order interpretations."),
                leaf("state_of_art", "State-of-the-Art Review", "Focuses on the very latest developments and frontiers in a field."),
                leaf("state_of_science", "State-of-the-Science Review", "Assesses the current level of empirical evidence on a topic."),
                leaf("conceptual_review", "Conceptual Review", "Clarifies and refines key concepts, definitions, and theoretical frameworks."),
                leaf("theoretical_review", "Theoretical Review", "Critically examines and compares existing theories and models."),
            ],
        ),
        family(
            "quantitative",
            "Quantitative Analysis",
            "An approach focused on measuring and analyzing variables numerically to test \
             hypotheses and estimate relationships or effects. It relies on structured instruments \
             and statistical procedures to produce generalizable findings.",
            vec![
                leaf("experimental", "Experimental & Quasi-Experimental Designs", "Randomized controlled trials, true experiments, and quasi-experiments with control groups."),
                leaf("survey_observational", "Survey & Observational Designs", "Cross-sectional surveys, longitudinal studies, cohort studies, and case-control studies."),
                leaf("descriptive_correlational", "Descriptive & Correlational Designs", "Descriptive research, correlational studies, and exploratory data analysis."),
                leaf("statistical_techniques", "Core Statistical Techniques", "Descriptive statistics, inferential statistics, hypothesis testing, and ANOVA."),
                leaf("regression_models", "Regression & Generalized Models", "Linear regression, logistic regression, and generalized linear models."),
                leaf("multivariate", "Multivariate & Latent-Variable Techniques", "Factor analysis, cluster analysis, structural equation modeling, and multilevel modeling."),
                leaf("time_series", "Time-Series & Longitudinal Analysis", "ARIMA models, growth curve modeling, and longitudinal data analysis."),
                leaf("survival_analysis", "Survival & Event-History Analysis", "Kaplan-Meier estimation, Cox proportional hazards, and parametric survival models."),
                leaf("meta_analysis_quant", "Meta-Analysis & Meta-Regression", "Effect-size computation, forest plots, and meta-regression analysis."),
                leaf("bayesian", "Bayesian & Simulation Methods", "Bayesian inference, Monte Carlo simulation, and bootstrapping methods."),
                leaf("econometric", "Econometric Techniques", "Instrumental variables, difference-in-differences, and panel data models."),
                leaf("bibliometric", "Bibliometric & Network Analysis", "Citation analysis, co-authorship networks, and keyword co-occurrence mapping."),
            ],
        ),
        family(
            "qualitative",
            "Qualitative Analysis",
            "An approach centered on understanding meanings, experiences, and social contexts by \
             collecting and interpreting non-numeric data through methods such as thematic \
             analysis, grounded theory, and ethnography.",
            vec![
                leaf("qual_synthesis", "Qualitative Evidence Synthesis Methods", "Meta-synthesis, meta-ethnography, and critical interpretive synthesis."),
                leaf("qual_review", "Review Designs & Typologies", "Qualitative systematic reviews, scoping reviews, and integrative reviews."),
                leaf("conceptual_theoretical", "Conceptual & Theoretical Reviews", "Conceptual reviews, theoretical reviews, and state-of-the-art assessments."),
            ],
        ),
        family(
            "mixed_methods",
            "Mixed Methods",
            "An integrative approach that deliberately combines both qualitative and quantitative \
             strategies within a single study to capitalize on their complementary strengths.",
            vec![
                leaf("sequential_concurrent", "Core Sequential & Concurrent Designs", "Convergent parallel, explanatory sequential, and exploratory sequential designs."),
                leaf("embedded_multiphase", "Embedded & Multiphase Designs", "Complex, programmatic approaches for multi-stage or nested integration."),
                leaf("transformative", "Transformative & Pragmatic Designs", "Social-justice frameworks and pragmatic 'what works' approaches."),
                leaf("participatory", "Participatory, Action & Evaluation Hybrids", "Community engagement and immediate practice change focus."),
                leaf("specialized", "Specialized & Emerging Mixed Designs", "Instrument development, case-study mixed methods, and multilevel approaches."),
            ],
        ),
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Paper-type skeletons
// ────────────────────────────────────────────────────────────────────────────

const PAPER_TYPE_SKELETONS: &[(&str, &[&str])] = &[
    ("argumentative", &["Title Page", "Abstract", "Introduction (with Thesis)", "Body: Claim 1 & Evidence", "Body: Claim 2 & Evidence", "Counterarguments & Rebuttals", "Conclusion", "References (APA 7th)"]),
    ("analytical", &["Title Page", "Abstract", "Introduction (Problem Statement)", "Analytical Framework / Model", "Component Analysis 1", "Component Analysis 2", "Synthesis & Discussion", "Conclusion", "References (APA 7th)"]),
    ("expository", &["Title Page", "Abstract", "Introduction (Topic Overview)", "Background / Context", "Key Facts & Explanations", "Implications / Significance", "Conclusion", "References (APA 7th)"]),
    ("narrative", &["Title Page", "Abstract", "Introduction (Scope & Chronology)", "Event Timeline / Sequence", "Key Turning Points", "Lessons Learned / Reflections", "Conclusion", "References (APA 7th)"]),
    ("descriptive", &["Title Page", "Abstract", "Introduction (Purpose & Scope)", "Current Conditions / Elements", "Detailed Description (Theme/Region 1)", "Detailed Description (Theme/Region 2)", "Overall Assessment", "Conclusion", "References (APA 7th)"]),
    ("compare_contrast", &["Title Page", "Abstract", "Introduction (Subjects & Criteria)", "Method of Comparison (Block or Point-by-Point)", "Comparison Section 1", "Comparison Section 2", "Synthesis / Evaluation", "Conclusion", "References (APA 7th)"]),
    ("cause_effect", &["Title Page", "Abstract", "Introduction (Phenomenon & Significance)", "Cause Analysis", "Effect Analysis", "Inter-relationships / Moderators", "Conclusion", "References (APA 7th)"]),
    ("definition", &["Title Page", "Abstract", "Introduction (Term & Importance)", "Existing Definitions", "Proposed Definition / Clarification", "Examples & Contexts", "Implications", "Conclusion", "References (APA 7th)"]),
    ("exploratory", &["Title Page", "Abstract", "Introduction (Open-ended Question)", "Background & Current Knowledge", "Exploration of Perspectives", "Synthesis of Insights", "Tentative Conclusions / Future Questions", "References (APA 7th)"]),
    ("reflective", &["Title Page", "Abstract", "Introduction (Experience/Event)", "Narrative of Experience", "Critical Reflection / Analysis", "Lessons Learned", "Implications for Practice/Policy", "Conclusion", "References (APA 7th)"]),
    ("synthesis", &["Title Page", "Abstract", "Introduction (Threat/Topic)", "Method of Source Integration", "Evidence Cluster 1", "Evidence Cluster 2", "Integrated Assessment", "Conclusion & Recommendations", "References (APA 7th)"]),
    ("research", &["Title Page", "Abstract", "Introduction (Research Question & Significance)", "Literature Review", "Methodology", "Results / Findings", "Discussion", "Conclusion", "References (APA 7th)"]),
    ("literature_review", &["Title Page", "Abstract", "Introduction (Scope & Objectives)", "Search Strategy / Inclusion Criteria", "Thematic Findings 1", "Thematic Findings 2", "Research Gaps & Future Directions", "Conclusion", "References (APA 7th)"]),
    ("critical_review", &["Title Page", "Abstract", "Introduction (Document/Policy Overview)", "Summary of Key Points", "Critical Analysis (Strengths/Weaknesses)", "Evaluation & Implications", "Conclusion", "References (APA 7th)"]),
    ("position", &["Title Page", "Abstract", "Introduction (Position Statement)", "Argument 1 & Evidence", "Argument 2 & Evidence", "Counterarguments & Rebuttals", "Conclusion", "References (APA 7th)"]),
    ("proposal", &["Title Page", "Abstract", "Introduction (Problem Statement)", "Proposed Solution", "Justification / Evidence", "Implementation Plan", "Anticipated Outcomes / Evaluation Plan", "Conclusion", "References (APA 7th)"]),
    ("concept", &["Title Page", "Abstract", "Introduction (Concept & Relevance)", "Literature Context / Theoretical Background", "Concept Development / Components", "Applications / Case Examples", "Future Research Paths", "Conclusion", "References (APA 7th)"]),
    ("response", &["Title Page", "Abstract", "Introduction (Document/Report Referenced)", "Summary of Original Document", "Analytical Reaction / Critique", "Supporting Evidence", "Conclusion", "References (APA 7th)"]),
];

/// Fallback skeleton for unknown paper types.
const DEFAULT_SKELETON: &[&str] = &[
    "Title Page",
    "Abstract",
    "Introduction",
    "Body",
    "Conclusion",
    "References (APA 7th)",
];

// ────────────────────────────────────────────────────────────────────────────
// Methodology insert templates
// ────────────────────────────────────────────────────────────────────────────

struct MethodologyTemplate {
    insert_after: &'static str,
    sections: &'static [&'static str],
}

const METHODOLOGY_TEMPLATES: &[(&str, MethodologyTemplate)] = &[
    ("quantitative", MethodologyTemplate { insert_after: "Introduction", sections: &["Data Sources & Collection", "Statistical Methods", "Results", "Validity & Reliability", "Limitations"] }),
    ("statistical_techniques", MethodologyTemplate { insert_after: "Introduction", sections: &["Data Description", "Descriptive Statistics", "Inferential Tests (t-test/ANOVA)", "Findings Interpretation", "Limitations"] }),
    ("regression_models", MethodologyTemplate { insert_after: "Introduction", sections: &["Dataset & Variables", "Model Specification", "Model Diagnostics", "Results (Coefficients & Fit)", "Implications"] }),
    ("descriptive_correlational", MethodologyTemplate { insert_after: "Introduction", sections: &["Variable Overview", "Correlation Analysis", "Patterns & Trends", "Discussion of Associations", "Limitations"] }),
    ("meta_analysis_quant", MethodologyTemplate { insert_after: "Introduction", sections: &["Search & Inclusion Criteria", "Effect-Size Extraction", "Meta-analytic Model", "Forest Plot & Heterogeneity", "Interpretation"] }),
    ("bibliometric", MethodologyTemplate { insert_after: "Introduction", sections: &["Data Retrieval (Databases & Time Span)", "Citation Network Construction", "Network Metrics / Visualisation", "Key Authors & Themes", "Discussion"] }),
    ("qualitative", MethodologyTemplate { insert_after: "Introduction", sections: &["Document Selection / Corpus", "Analytical Framework", "Findings (Themes/Categories)", "Interpretation", "Trustworthiness & Limitations"] }),
    ("thematic_analysis", MethodologyTemplate { insert_after: "Introduction", sections: &["Corpus Description", "Coding Process", "Theme Development", "Thematic Narrative", "Implications"] }),
    ("content_analysis", MethodologyTemplate { insert_after: "Introduction", sections: &["Sampling & Unit of Analysis", "Coding Scheme", "Frequency / Pattern Results", "Contextual Interpretation", "Limitations"] }),
    ("case_study", MethodologyTemplate { insert_after: "Introduction", sections: &["Case Selection & Boundaries", "Data Sources", "Case Description", "Cross-Case / Intra-Case Analysis", "Lessons Learned"] }),
    ("discourse_analysis", MethodologyTemplate { insert_after: "Introduction", sections: &["Corpus & Context", "Analytical Framework", "Discursive Patterns", "Interpretation", "Implications"] }),
    ("narrative_analysis", MethodologyTemplate { insert_after: "Introduction", sections: &["Narrative Corpus", "Structural Components", "Narrative Functions", "Interpretation", "Limitations"] }),
    ("archival_analysis", MethodologyTemplate { insert_after: "Introduction", sections: &["Archive Description", "Document Selection", "Contextual Analysis", "Findings", "Historical Significance"] }),
    ("literature_review", MethodologyTemplate { insert_after: "Introduction", sections: &["Search Strategy", "Inclusion / Exclusion Criteria", "Quality Appraisal", "Synthesis of Findings", "Research Gaps"] }),
    ("systematic_review", MethodologyTemplate { insert_after: "Introduction", sections: &["Protocol & Registration", "Database Search", "Screening & Appraisal", "Synthesis & Meta-analysis", "Limitations"] }),
    ("narrative_review", MethodologyTemplate { insert_after: "Introduction", sections: &["Search Scope", "Chronological / Thematic Presentation", "Critical Discussion", "Synthesis", "Future Research"] }),
    ("scoping_review", MethodologyTemplate { insert_after: "Introduction", sections: &["Mapping Strategy", "Charting the Data", "Descriptive Numerical Summary", "Thematic Summary", "Research Gaps"] }),
    ("integrative_review", MethodologyTemplate { insert_after: "Introduction", sections: &["Diverse Data Sources", "Evaluation Criteria", "Integrated Findings", "Conceptual Model", "Implications"] }),
    ("critical_review", MethodologyTemplate { insert_after: "Introduction", sections: &["Source Selection", "Critical Appraisal", "Synthesis of Critiques", "Overall Evaluation", "Recommendations"] }),
    ("conceptual_review", MethodologyTemplate { insert_after: "Introduction", sections: &["Concept Identification", "Framework Comparison", "Conceptual Evolution", "Synthesis", "Future Directions"] }),
    ("meta_synthesis", MethodologyTemplate { insert_after: "Introduction", sections: &["Qualitative Study Selection", "Translation of Studies", "Higher-Order Themes", "Interpretive Synthesis", "Implications"] }),
    ("mixed_methods", MethodologyTemplate { insert_after: "Introduction", sections: &["Design Rationale (Mixed)", "Data Sources & Collection", "Quantitative Component", "Qualitative Component", "Integration & Interpretation", "Limitations"] }),
    ("sequential_concurrent", MethodologyTemplate { insert_after: "Introduction", sections: &["Phase 1: Qualitative / Quantitative", "Phase 2: Complementary Method", "Integration Procedures", "Findings", "Implications"] }),
    ("case_study_mixed", MethodologyTemplate { insert_after: "Introduction", sections: &["Case Selection", "Qualitative Data", "Quantitative Measures", "Integrated Analysis", "Lessons Learned"] }),
    ("mixed_methods_systematic_review", MethodologyTemplate { insert_after: "Introduction", sections: &["Search & Selection", "Quantitative Synthesis", "Qualitative Synthesis", "Meta-integration", "Recommendations"] }),
];

fn skeleton_for(paper_type: &str) -> &'static [&'static str] {
    PAPER_TYPE_SKELETONS
        .iter()
        .find(|(id, _)| *id == paper_type)
        .map(|(_, sections)| *sections)
        .unwrap_or(DEFAULT_SKELETON)
}

fn template_for(methodology_id: &str) -> Option<&'static MethodologyTemplate> {
    METHODOLOGY_TEMPLATES
        .iter()
        .find(|(id, _)| *id == methodology_id)
        .map(|(_, t)| t)
}

/// Section list for a paper type, with the methodology's sections spliced in
/// after the template's anchor when a methodology is selected.
pub fn paper_structure(paper_type: &str, methodology_id: Option<&str>) -> Vec<String> {
    let base: Vec<String> = skeleton_for(paper_type)
        .iter()
        .map(|s| s.to_string())
        .collect();

    let Some(template) = methodology_id.and_then(template_for) else {
        return base;
    };

    merge_structure(&base, template)
}

fn merge_structure(base: &[String], template: &MethodologyTemplate) -> Vec<String> {
    if template.sections.is_empty() {
        return base.to_vec();
    }

    let anchor = template.insert_after.to_lowercase();
    let position_of = |needle: &str| {
        base.iter()
            .position(|s| s.to_lowercase().contains(needle))
            .map(|i| i + 1)
    };

    // Anchor fallbacks: named anchor, then Introduction, then Abstract, then slot 2.
    let insert_index = position_of(&anchor)
        .or_else(|| position_of("introduction"))
        .or_else(|| position_of("abstract"))
        .unwrap_or(2)
        .min(base.len());

    let mut merged: Vec<String> = base[..insert_index].to_vec();
    let mut seen: Vec<String> = merged.iter().map(|s| s.to_lowercase()).collect();

    for section in template.sections {
        if !seen.contains(&section.to_lowercase()) {
            merged.push(section.to_string());
            seen.push(section.to_lowercase());
        }
    }
    for section in &base[insert_index..] {
        if !seen.contains(&section.to_lowercase()) {
            merged.push(section.clone());
            seen.push(section.to_lowercase());
        }
    }

    merged
}

/// Structure lookup with the metadata the preview endpoints return.
#[derive(Debug, Clone, Serialize)]
pub struct StructurePreview {
    pub structure: Vec<String>,
    pub total_sections: usize,
    pub paper_type: String,
    pub methodology: Option<String>,
    pub has_methodology_sections: bool,
}

pub fn structure_preview(paper_type: &str, methodology_id: Option<&str>) -> StructurePreview {
    let structure = paper_structure(paper_type, methodology_id);
    StructurePreview {
        total_sections: structure.len(),
        structure,
        paper_type: paper_type.to_string(),
        methodology: methodology_id.map(str::to_string),
        has_methodology_sections: methodology_id.map(template_for).flatten().is_some(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section categorization
// ────────────────────────────────────────────────────────────────────────────

/// Section titles treated as administrative when building structured outlines.
pub const ADMINISTRATIVE_TITLES: &[&str] = &["title page", "abstract", "references (apa 7th)"];

/// Keyword classifier for outline section titles.
/// Categories: Admin, Intro, Method, Data, Analysis, Summary.
pub fn categorize_section(title: &str) -> &'static str {
    let t = title.to_lowercase();
    let contains_any = |words: &[&str]| words.iter().any(|w| t.contains(w));

    if contains_any(&["title page", "abstract", "references", "works cited", "bibliography", "appendix"]) {
        "Admin"
    } else if contains_any(&["introduction", "background", "overview", "problem statement", "purpose"]) {
        "Intro"
    } else if contains_any(&["conclusion", "summary", "recommendation", "lessons learned", "future"]) {
        "Summary"
    } else if contains_any(&["method", "search strategy", "inclusion", "criteria", "protocol", "coding", "collection", "framework", "design"]) {
        "Method"
    } else if contains_any(&["data", "results", "findings", "evidence", "timeline", "case description", "statistics"]) {
        "Data"
    } else {
        // Discussion, synthesis, evaluation, comparison and everything else
        "Analysis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_has_four_families_with_subs() {
        let taxonomy = methodology_taxonomy();
        assert_eq!(taxonomy.len(), 4);
        let ids: Vec<&str> = taxonomy.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(
            ids,
            ["literature_review", "quantitative", "qualitative", "mixed_methods"]
        );
        let lit = &taxonomy[0];
        assert_eq!(lit.sub_methodologies.as_ref().unwrap().len(), 15);
        let quant = &taxonomy[1];
        assert_eq!(quant.sub_methodologies.as_ref().unwrap().len(), 12);
    }

    #[test]
    fn test_unknown_paper_type_gets_default_skeleton() {
        let structure = paper_structure("haiku", None);
        assert_eq!(structure.len(), 6);
        assert_eq!(structure[2], "Introduction");
    }

    #[test]
    fn test_methodology_sections_inserted_after_introduction() {
        let structure = paper_structure("research", Some("quantitative"));
        let intro = structure
            .iter()
            .position(|s| s.contains("Introduction"))
            .unwrap();
        assert_eq!(structure[intro + 1], "Data Sources & Collection");
        // Base sections after the anchor are preserved
        assert!(structure.iter().any(|s| s == "Discussion"));
        assert!(structure.iter().any(|s| s == "References (APA 7th)"));
    }

    #[test]
    fn test_merge_dedups_case_insensitively() {
        // "research" already holds "Methodology" and "Results / Findings";
        // the quantitative template's "Results" must not duplicate them verbatim.
        let structure = paper_structure("research", Some("quantitative"));
        let results_count = structure.iter().filter(|s| s.as_str() == "Results").count();
        assert_eq!(results_count, 1);
    }

    #[test]
    fn test_unknown_methodology_leaves_base_untouched() {
        let base = paper_structure("argumentative", None);
        let merged = paper_structure("argumentative", Some("crystal_ball"));
        assert_eq!(base, merged);
    }

    #[test]
    fn test_structure_preview_metadata() {
        let preview = structure_preview("research", Some("case_study"));
        assert!(preview.has_methodology_sections);
        assert_eq!(preview.total_sections, preview.structure.len());
        assert_eq!(preview.methodology.as_deref(), Some("case_study"));

        let preview = structure_preview("research", None);
        assert!(!preview.has_methodology_sections);
    }

    #[test]
    fn test_categorize_section_keywords() {
        assert_eq!(categorize_section("Title Page"), "Admin");
        assert_eq!(categorize_section("References (APA 7th)"), "Admin");
        assert_eq!(categorize_section("Introduction (with Thesis)"), "Intro");
        assert_eq!(categorize_section("Statistical Methods"), "Method");
        assert_eq!(categorize_section("Results / Findings"), "Data");
        assert_eq!(categorize_section("Synthesis & Discussion"), "Analysis");
        assert_eq!(categorize_section("Conclusion & Recommendations"), "Summary");
    }
}

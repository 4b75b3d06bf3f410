pub mod general;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{analysis, citations, drafting, finaloutline, methodology, outline, sources, thesis};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/ai-response", post(general::ai_response))
        // Thesis refinement
        .route("/refine_thesis", post(thesis::handlers::refine_thesis))
        .route(
            "/generate_probing_questions",
            post(thesis::handlers::generate_probing_questions),
        )
        .route(
            "/answer_probing_questions",
            post(thesis::handlers::answer_probing_questions),
        )
        .route(
            "/auto_refine_thesis",
            post(thesis::handlers::auto_refine_thesis),
        )
        // Methodology
        .route(
            "/methodology_options",
            get(methodology::handlers::methodology_options),
        )
        .route(
            "/generate_methodology_options",
            post(methodology::handlers::generate_methodology_options),
        )
        .route(
            "/generate_methodology",
            post(methodology::handlers::generate_methodology),
        )
        // Outline
        .route("/generate_outline", post(outline::handlers::generate_outline))
        .route("/generate_sections", post(outline::handlers::generate_sections))
        .route(
            "/generate_subsections",
            post(outline::handlers::generate_subsections),
        )
        .route(
            "/generate_questions",
            post(outline::handlers::generate_questions),
        )
        .route(
            "/generate_question_citations",
            post(outline::handlers::generate_question_citations),
        )
        .route("/paper_structure", post(outline::handlers::paper_structure))
        .route(
            "/paper_structure_preview",
            post(outline::handlers::paper_structure),
        )
        .route(
            "/generate_structured_outline",
            post(outline::handlers::generate_structured_outline),
        )
        // Sources
        .route("/recommend_sources", post(sources::handlers::recommend_sources))
        .route(
            "/generate_works_cited",
            post(sources::handlers::generate_works_cited),
        )
        .route("/identify_citation", post(sources::handlers::identify_citation))
        // Citation validation
        .route(
            "/check_citation_validity",
            post(citations::handlers::check_citation_validity),
        )
        // Drafting
        .route(
            "/generate_citation_response",
            post(drafting::handlers::generate_citation_response),
        )
        .route(
            "/generate_fused_response",
            post(drafting::handlers::generate_fused_response),
        )
        .route(
            "/generate_prose_from_outline",
            post(drafting::handlers::generate_prose_from_outline),
        )
        .route(
            "/categorize_sections",
            post(drafting::handlers::categorize_sections),
        )
        .route(
            "/analyze_data_sections",
            post(drafting::handlers::analyze_data_sections),
        )
        .route(
            "/build_data_sections",
            post(drafting::handlers::build_data_sections),
        )
        // Data analysis
        .route(
            "/data-analysis/analyze-subsection",
            post(analysis::handlers::analyze_subsection),
        )
        .route(
            "/data-analysis/analyze-inclusion-exclusion",
            post(analysis::handlers::analyze_inclusion_exclusion),
        )
        .route(
            "/data-analysis/build-data-outline",
            post(analysis::handlers::build_data_outline),
        )
        // Final outline
        .route(
            "/api/finaloutline/generate_methodology",
            post(finaloutline::handlers::generate_methodology),
        )
        .route(
            "/api/finaloutline/generate_conclusion",
            post(finaloutline::handlers::generate_conclusion),
        )
        .route(
            "/api/finaloutline/generate_abstract",
            post(finaloutline::handlers::generate_abstract),
        )
        .route(
            "/api/finaloutline/generate_transitions",
            post(finaloutline::handlers::generate_transitions),
        )
        .route(
            "/api/finaloutline/refine_outline",
            post(finaloutline::handlers::refine_outline),
        )
        .with_state(state)
}

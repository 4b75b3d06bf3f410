use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct QuestionAnalysisRequest {
    pub subsection_title: String,
    pub subsection_context: String,
    pub section_title: String,
    pub thesis: String,
    pub methodology: Value,
    /// Question objects: `{"question": "...", "citations": [...]}` —
    /// semi-structured because the frontend round-trips them unchanged.
    #[serde(default)]
    pub questions: Vec<Value>,
    #[serde(default)]
    pub citations: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThematicCluster {
    pub theme_name: String,
    pub theme_description: String,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub key_concepts: Vec<String>,
    #[serde(default)]
    pub evidence_types: Vec<String>,
    #[serde(default)]
    pub temporal_scope: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogicalStructure {
    pub approach: String,
    pub reasoning: String,
    #[serde(default)]
    pub sequence: Vec<String>,
    #[serde(default)]
    pub transitions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutlinePoint {
    pub level: String,
    pub content: String,
    #[serde(default)]
    pub supporting_evidence: Vec<String>,
    #[serde(default)]
    pub citations: Vec<i64>,
    pub rationale: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedOutline {
    #[serde(default)]
    pub main_points: Vec<OutlinePoint>,
    pub thematic_basis: String,
    pub logical_flow: String,
    pub evidence_integration: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DataAnalysisResponse {
    #[serde(default)]
    pub thematic_clusters: Vec<ThematicCluster>,
    #[serde(default)]
    pub logical_structure: LogicalStructure,
    #[serde(default)]
    pub generated_outline: GeneratedOutline,
    #[serde(default)]
    pub content_summary: String,
    #[serde(default)]
    pub analysis_confidence: String,
}

#[derive(Debug, Deserialize)]
pub struct InclusionExclusionRequest {
    pub thesis: String,
    /// Draft Outline 1 tree as produced by the outline endpoints.
    #[serde(rename = "literatureReviewData", default)]
    pub literature_review_data: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentDecision {
    pub content: String,
    pub thesis_alignment: String,
    pub rationale: String,
    pub priority: String,
}

#[derive(Debug, Serialize)]
pub struct InclusionExclusionAnalysis {
    pub section_purpose: String,
    pub inclusion_criteria: Vec<String>,
    pub exclusion_criteria: Vec<String>,
    pub content_to_include: Vec<ContentDecision>,
    pub content_to_exclude: Vec<ContentDecision>,
    pub content_priorities: Vec<ContentDecision>,
    pub narrative_flow: String,
}

#[derive(Debug, Deserialize)]
pub struct BuildDataOutlineRequest {
    pub section_title: String,
    pub section_context: String,
    pub thesis: String,
    pub methodology: Value,
    #[serde(default)]
    pub logic_framework: Vec<Value>,
    #[serde(default)]
    pub draft_outline_context: Option<Value>,
    #[serde(default)]
    pub subsections: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct SubsectionOutline {
    pub subsection_title: String,
    pub context_integration: String,
    pub logic_integration: String,
    pub draft_integration: String,
    pub main_points: Vec<String>,
    pub supporting_details: Vec<String>,
    pub transitions: Vec<String>,
    pub citations_used: Vec<i64>,
    pub step_integration_notes: String,
}

#[derive(Debug, Serialize)]
pub struct BuildDataOutlineResponse {
    pub section_title: String,
    pub section_overview: String,
    pub subsection_outlines: Vec<SubsectionOutline>,
    pub logical_flow: String,
    pub integration_notes: String,
    pub methodology_alignment: String,
}

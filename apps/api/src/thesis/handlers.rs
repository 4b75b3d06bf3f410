use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract;
use crate::state::AppState;
use crate::thesis::prompts;

/// Stock questions used to top up the probing list when the model returns
/// fewer than five usable lines.
const GENERIC_PROBING_QUESTIONS: [&str; 5] = [
    "What is the main argument you want to make?",
    "What evidence will you use to support your position?",
    "Who is your intended audience?",
    "What are the potential counterarguments?",
    "What is the broader significance of this topic?",
];

const PROBING_QUESTION_COUNT: usize = 5;

#[derive(Debug, Deserialize)]
pub struct ThesisInteraction {
    pub current_topic: String,
    #[serde(default)]
    pub user_responses: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RefinedThesisResponse {
    pub refined_thesis: String,
}

#[derive(Debug, Deserialize)]
pub struct ProbingQuestionsRequest {
    pub thesis: String,
    pub paper_type: String,
    pub paper_purpose: String,
    pub paper_tone: String,
}

#[derive(Debug, Serialize)]
pub struct ProbingQuestionsResponse {
    pub questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerProbingQuestionsRequest {
    pub thesis: String,
    pub paper_type: String,
    pub paper_purpose: String,
    pub paper_tone: String,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AutoRefineRequest {
    pub thesis: String,
    pub paper_type: String,
    pub paper_purpose: String,
    pub paper_tone: String,
    pub paper_structure: String,
}

/// POST /refine_thesis
///
/// The model is told to answer with a single quoted statement; if no quoted
/// span is found the whole trimmed completion is used.
pub async fn refine_thesis(
    State(state): State<AppState>,
    Json(req): Json<ThesisInteraction>,
) -> Result<Json<RefinedThesisResponse>, AppError> {
    let prompt = prompts::refine_thesis_prompt(&req.current_topic, &req.user_responses);
    let completion = state.llm.invoke(&prompt).await?;

    let refined_thesis = extract::quoted_phrase(&completion)
        .unwrap_or_else(|| completion.trim())
        .to_string();

    Ok(Json(RefinedThesisResponse { refined_thesis }))
}

/// POST /generate_probing_questions
///
/// Always returns exactly five questions: numbered lines mined from the
/// completion, topped up from the generic set when the model under-delivers.
pub async fn generate_probing_questions(
    State(state): State<AppState>,
    Json(req): Json<ProbingQuestionsRequest>,
) -> Result<Json<ProbingQuestionsResponse>, AppError> {
    let prompt = prompts::probing_questions_prompt(
        &req.thesis,
        &req.paper_type,
        &req.paper_purpose,
        &req.paper_tone,
    );
    let completion = state.llm.invoke(&prompt).await?;

    let mut questions = extract::numbered_items(&completion);
    for generic in GENERIC_PROBING_QUESTIONS {
        if questions.len() >= PROBING_QUESTION_COUNT {
            break;
        }
        questions.push(generic.to_string());
    }
    questions.truncate(PROBING_QUESTION_COUNT);

    Ok(Json(ProbingQuestionsResponse { questions }))
}

/// POST /answer_probing_questions
///
/// Blank answers are skipped; when nothing was answered the original thesis
/// is returned untouched without a model call.
pub async fn answer_probing_questions(
    State(state): State<AppState>,
    Json(req): Json<AnswerProbingQuestionsRequest>,
) -> Result<Json<RefinedThesisResponse>, AppError> {
    let answered: Vec<String> = req
        .questions
        .iter()
        .zip(req.answers.iter())
        .filter(|(_, a)| !a.trim().is_empty())
        .map(|(q, a)| format!("Q: {q}\nA: {}", a.trim()))
        .collect();

    if answered.is_empty() {
        return Ok(Json(RefinedThesisResponse {
            refined_thesis: req.thesis,
        }));
    }

    let prompt = prompts::answer_probing_questions_prompt(
        &req.thesis,
        &req.paper_type,
        &req.paper_purpose,
        &req.paper_tone,
        &answered,
    );
    let completion = state.llm.invoke(&prompt).await?;

    Ok(Json(RefinedThesisResponse {
        refined_thesis: extract::strip_quotes(&completion).to_string(),
    }))
}

/// POST /auto_refine_thesis
pub async fn auto_refine_thesis(
    State(state): State<AppState>,
    Json(req): Json<AutoRefineRequest>,
) -> Result<Json<RefinedThesisResponse>, AppError> {
    let prompt = prompts::auto_refine_prompt(
        &req.thesis,
        &req.paper_type,
        &req.paper_purpose,
        &req.paper_tone,
        &req.paper_structure,
    );
    let completion = state.llm.invoke(&prompt).await?;

    Ok(Json(RefinedThesisResponse {
        refined_thesis: extract::strip_quotes(&completion).to_string(),
    }))
}

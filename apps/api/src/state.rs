use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Stateless by design: no session store, no cache — the LLM client is the
/// only shared resource, and it is safe for concurrent use.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
}

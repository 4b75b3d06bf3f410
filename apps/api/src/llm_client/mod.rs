//! LLM Client — the single point of entry for all model calls in Lyceum.
//!
//! ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
//! All LLM interactions MUST go through this module.
//!
//! The transport is pluggable behind `ModelBackend` so the retry loop can be
//! exercised without a network; production wires in `AnthropicBackend`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls unless a handler overrides it.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4000;
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.9;
/// Upper bound of the random jitter added to each backoff sleep.
const JITTER_MS: u64 = 250;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("throttled by provider: {message}")]
    Throttled { message: String },

    #[error("provider error (status {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("rate limited after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Retry policy for throttled calls. Defaults preserve the historical
/// behavior: 3 attempts, 1s base delay doubling per attempt.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
        }
    }
}

/// Transport abstraction: one prompt in, one completion out.
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn send(&self, prompt: &str, model: Option<&str>) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Production backend: the Anthropic Messages API over a shared reqwest client.
pub struct AnthropicBackend {
    client: Client,
    api_key: String,
}

impl AnthropicBackend {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl ModelBackend for AnthropicBackend {
    async fn send(&self, prompt: &str, model: Option<&str>) -> Result<String, LlmError> {
        let request_body = AnthropicRequest {
            model: model.unwrap_or(MODEL),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status.as_u16() == 429 {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Throttled { message: body });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: AnthropicResponse = response
            .json()
            .await
            .map_err(LlmError::Http)?;

        debug!(
            input_tokens = parsed.usage.input_tokens,
            output_tokens = parsed.usage.output_tokens,
            "LLM call succeeded"
        );

        parsed
            .content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.clone())
            .ok_or(LlmError::EmptyContent)
    }
}

/// The single LLM client shared by all handlers.
///
/// Retries ONLY on throttling, with exponential backoff plus jitter.
/// Permanent provider errors (auth, validation) propagate immediately with
/// the provider's message attached.
#[derive(Clone)]
pub struct LlmClient {
    backend: Arc<dyn ModelBackend>,
    retry: RetryConfig,
}

impl LlmClient {
    pub fn new(backend: Arc<dyn ModelBackend>, retry: RetryConfig) -> Self {
        Self { backend, retry }
    }

    /// Sends a prompt as a single user turn and returns the raw completion text.
    pub async fn invoke(&self, prompt: &str) -> Result<String, LlmError> {
        self.invoke_model(prompt, None).await
    }

    /// Same as `invoke`, with an explicit model identifier override.
    pub async fn invoke_model(
        &self,
        prompt: &str,
        model: Option<&str>,
    ) -> Result<String, LlmError> {
        let mut attempt: u32 = 0;
        loop {
            match self.backend.send(prompt, model).await {
                Ok(text) => return Ok(text),
                Err(LlmError::Throttled { message }) => {
                    attempt += 1;
                    if attempt >= self.retry.max_attempts {
                        warn!(attempts = attempt, "throttled, retries exhausted: {message}");
                        return Err(LlmError::RetriesExhausted { attempts: attempt });
                    }
                    // Exponential backoff: base, 2*base, 4*base, ... plus jitter
                    let backoff = self.retry.base_delay_ms * (1u64 << (attempt - 1));
                    let jitter = rand::thread_rng().gen_range(0..=JITTER_MS);
                    let delay = Duration::from_millis(backoff + jitter);
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "throttled by provider, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Total attempts for a throttled model call (first try included).
    pub llm_max_attempts: u32,
    /// Base delay for the exponential backoff between throttled attempts.
    pub llm_base_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_max_attempts: std::env::var("LLM_MAX_ATTEMPTS")
                .unwrap_or_else(|_| "3".to_string())
                .parse::<u32>()
                .context("LLM_MAX_ATTEMPTS must be a positive integer")?,
            llm_base_delay_ms: std::env::var("LLM_BASE_DELAY_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse::<u64>()
                .context("LLM_BASE_DELAY_MS must be a duration in milliseconds")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

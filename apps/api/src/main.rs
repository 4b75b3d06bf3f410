mod analysis;
mod catalog;
mod citations;
mod config;
mod drafting;
mod errors;
mod extract;
mod finaloutline;
mod llm_client;
mod methodology;
mod normalize;
mod outline;
mod routes;
mod sources;
mod state;
mod thesis;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{AnthropicBackend, LlmClient, RetryConfig};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Lyceum API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let backend = Arc::new(AnthropicBackend::new(config.anthropic_api_key.clone()));
    let llm = LlmClient::new(
        backend,
        RetryConfig {
            max_attempts: config.llm_max_attempts,
            base_delay_ms: config.llm_base_delay_ms,
        },
    );
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Build app state
    let state = AppState { llm };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

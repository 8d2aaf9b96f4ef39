mod config;
mod errors;
mod jobs;
mod llm_client;
mod resume;
mod routes;
mod session;
mod state;
mod tailoring;
mod views;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::JSearchClient;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::{spawn_sweeper, SessionStore};
use crate::state::AppState;
use crate::tailoring::LlmAdvisor;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing API keys)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobtailor v{}", env!("CARGO_PKG_VERSION"));

    // Initialize job search client
    let job_search = JSearchClient::new(
        config.rapidapi_key.clone(),
        config.jsearch_host.clone(),
        &config.jsearch_base_url,
        config.http_timeout,
    )?;
    info!("Job search client initialized ({})", config.jsearch_base_url);

    // Initialize LLM client
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        &config.openai_base_url,
        config.llm_timeout,
    )?;
    let advisor = Arc::new(LlmAdvisor(llm));
    info!("LLM client initialized ({})", config.openai_base_url);

    // In-memory sessions with idle eviction
    let sessions = SessionStore::new(config.session_ttl_minutes);
    spawn_sweeper(sessions.clone(), config.session_sweep_interval);
    info!(
        "Session store ready (ttl {}m, sweep every {}s)",
        config.session_ttl_minutes,
        config.session_sweep_interval.as_secs()
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        sessions,
        job_search: Arc::new(job_search),
        tailor: advisor.clone(),
        suggester: advisor,
    };

    // Build router
    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

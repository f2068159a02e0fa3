mod compose;
mod config;
mod errors;
mod fixtures;
mod llm_client;
mod models;
mod recommend;
mod render;
mod revise;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::compose::{LlmTextGenerator, MockTextGenerator, TextGenerator};
use crate::config::Config;
use crate::fixtures::FixtureStore;
use crate::llm_client::LlmClient;
use crate::revise::sessions::BriefSessions;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Relay API v{}", env!("CARGO_PKG_VERSION"));

    // All directory data comes from the static demo dataset; there is no
    // persistence layer behind this service.
    let fixtures = Arc::new(FixtureStore::demo());
    info!(
        "Demo fixtures loaded: {} accounts, {} reps, {} transitions",
        fixtures.accounts().len(),
        fixtures.reps().len(),
        fixtures.transitions().len()
    );

    // Initialize the LLM client when a key is configured; without one the
    // service runs fully offline on the deterministic mock generator.
    let llm = config.anthropic_api_key.clone().map(LlmClient::new);

    let generator: Arc<dyn TextGenerator> = match &llm {
        Some(client) => {
            info!("Text generation backed by {}", llm_client::MODEL);
            Arc::new(LlmTextGenerator::new(client.clone()))
        }
        None => {
            info!("No API key configured; using deterministic mock generation");
            Arc::new(MockTextGenerator)
        }
    };

    // Build app state
    let state = AppState {
        fixtures,
        sessions: SessionStore::new(),
        briefs: BriefSessions::new(),
        generator,
        llm,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS before any non-demo deploy

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

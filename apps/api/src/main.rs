mod assistant;
mod cache;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod profiles;
mod routes;
mod state;
mod toolkit;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assistant::dispatcher::Dispatcher;
use crate::config::Config;
use crate::db::PoolCache;
use crate::llm_client::LlmClient;
use crate::profiles::store::PgProfileStore;
use crate::routes::build_router;
use crate::state::AppState;
use crate::toolkit::PromptToolkit;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
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

    info!("Starting Writing Assistant API v{}", env!("CARGO_PKG_VERSION"));

    // Handle cache owned here and handed to collaborators that open external resources
    let pools = PoolCache::new();
    let profiles = PgProfileStore::connect(&pools, &config.database_url)?;
    info!("Profile store initialized");

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let dispatcher = Dispatcher::new(PromptToolkit::new(Arc::new(llm)));

    let state = AppState {
        dispatcher,
        profiles: Arc::new(profiles),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

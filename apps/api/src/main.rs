mod analyzer;
mod config;
mod errors;
mod jobs;
mod llm_client;
mod models;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analyzer::client::{AnalysisClient, AnalysisSettings};
use crate::analyzer::extract::DocumentExtractor;
use crate::config::Config;
use crate::jobs::store::PostgrestJobStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hireboard API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the resume analyzer. A missing key is not fatal: analysis
    // requests fail with a configuration error and nothing is sent.
    let analyzer = AnalysisClient::new(AnalysisSettings {
        api_key: config.gemini_api_key.clone(),
        model: config.gemini_model.clone(),
        api_base: config.gemini_api_base.clone(),
        timeout: config.analysis_timeout,
    })
    .context("Failed to build analysis HTTP client")?;
    match analyzer.model() {
        Some(model) => info!("Resume analyzer initialized (model: {model})"),
        None => warn!("GEMINI_API_KEY is not set; resume analysis is disabled"),
    }

    // Initialize the job backend
    let jobs = PostgrestJobStore::new(&config.supabase_url, config.supabase_anon_key.clone())
        .context("Failed to build job store HTTP client")?;
    info!("Job store initialized ({})", config.supabase_url);

    // Build app state
    let state = AppState {
        analyzer: Arc::new(analyzer),
        extractor: Arc::new(DocumentExtractor),
        jobs: Arc::new(jobs),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()), // TODO: restrict CORS to the front-end origin once it is deployed
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

mod analysis;
mod config;
mod errors;
mod extraction;
mod routes;
mod screening;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::stopwords::Stopwords;
use crate::analysis::TextPolicy;
use crate::config::Config;
use crate::routes::build_router;
use crate::screening::pipeline::ScreeningContext;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    // Stopwords are loaded once and shared read-only for the life of the process
    let stopwords = Arc::new(Stopwords::load(config.stopwords_path.as_deref())?);
    let text = TextPolicy::new(config.stopword_policy, stopwords);
    info!(
        "Text policy: {:?} ({} stopwords)",
        text.policy,
        text.stopwords.len()
    );

    let screening = ScreeningContext::from_config(&config, text);
    info!(
        "Scorer initialized (backend: {}, summary words: {})",
        screening.scorer.backend(),
        screening.summary_word_limit
    );

    let state = AppState::new(config.clone(), screening);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // presentation layer is served from another origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

mod config;
mod errors;
mod grading;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::grading::{AnalyzerRegistry, SessionManager};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting grader v{}", env!("CARGO_PKG_VERSION"));

    // Analyzer registry: one built-in analyzer per configured category
    let registry = Arc::new(AnalyzerRegistry::builtin(&config.grading.weights)?);
    info!(
        "Registered {} analyzers: {:?}",
        registry.len(),
        registry.canonical_order()
    );

    let deadlines = config.grading.deadlines();
    info!(
        "Deadlines: analyzer {}ms, session {}ms",
        deadlines.analyzer_timeout.as_millis(),
        deadlines.session_timeout.as_millis()
    );

    let sessions = SessionManager::new(registry, deadlines);
    sessions.spawn_reaper(config.grading.session_retention);
    info!(
        "Finished sessions are kept for {}s",
        config.grading.session_retention.as_secs()
    );

    let state = AppState {
        sessions,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

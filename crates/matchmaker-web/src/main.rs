//! Matchmaker Web Server
//!
//! Run with: cargo run -p matchmaker-web
//! Configure with matchmaker.toml, MATCHMAKER_CONFIG or MATCHMAKER_* env vars.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use matchmaker_config::Config;
use matchmaker_db::{Database, SnapshotStore};
use matchmaker_web::{router::build_router, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("matchmaker=debug,info")),
        )
        .init();

    info!("Matchmaker starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load().context("loading configuration")?;
    info!(
        mode = ?config.ranking.mode,
        snapshot = %config.ranking.corpus_snapshot,
        corpus_size = config.ranking.corpus_size,
        "Ranking configured"
    );

    let db = Database::connect(&config.database.url, config.database.max_connections)
        .await
        .with_context(|| format!("opening snapshot at {}", config.database.url))?;
    let store = SnapshotStore::new(Arc::new(db));
    let stats = store.database().stats().await?;
    info!(
        targets = stats.targets,
        diseases = stats.diseases,
        associations = stats.associations,
        "Snapshot opened"
    );

    let bind = config.server.bind.clone();
    let app = build_router(AppState::new(Arc::new(store), config));

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("binding {bind}"))?;
    info!("Server listening on http://{}", bind);

    axum::serve(listener, app).await?;

    Ok(())
}

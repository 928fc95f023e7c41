//! Liveness and configured ranking source.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
    pub mode: &'static str,
    pub snapshot: String,
    pub corpus_size: u64,
}

/// GET /api/health
pub async fn health(State(state): State<SharedState>) -> Json<Health> {
    let ranking = &state.config.ranking;
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        mode: state.default_mode().name(),
        snapshot: ranking.corpus_snapshot.clone(),
        corpus_size: ranking.corpus_size,
    })
}

//! Axum router: maps all URL paths to handlers.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    diseases::{publication_counts, publication_records, trial_trend},
    system::health,
    targets::{search, suggest, target_detail, target_drugs, target_rankings},
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/api/health",                         get(health))
        .route("/api/search",                         get(search))
        .route("/api/suggest",                        get(suggest))
        .route("/api/targets/{id}",                   get(target_detail))
        .route("/api/targets/{id}/rankings",          get(target_rankings))
        .route("/api/targets/{id}/drugs",             get(target_drugs))
        .route("/api/diseases/{id}/publications",     get(publication_counts))
        .route("/api/diseases/{id}/publications/raw", get(publication_records))
        .route("/api/trials",                         get(trial_trend))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

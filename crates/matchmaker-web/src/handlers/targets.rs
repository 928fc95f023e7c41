//! Target search, rankings and drugs.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use matchmaker_common::{error::ApiError, MatchmakerError, Target};
use matchmaker_ranker::{
    find_similar, get_drug_info, get_rankings, get_target_by_id, search_target, RankingMode,
};

use crate::state::SharedState;

/// Suggestion lists are capped regardless of what the client asks for.
const MAX_SUGGESTIONS: usize = 50;

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SuggestParams {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeParam {
    Precomputed,
    Live,
}

#[derive(Debug, Deserialize, Default)]
pub struct RankingParams {
    pub mode: Option<ModeParam>,
    /// Keep raw counts on live rows. Ignored for stored scores.
    #[serde(default)]
    pub full: bool,
}

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("query parameter '{name}' is required")))
}

async fn existing_target(state: &SharedState, id: i64) -> Result<Target, ApiError> {
    get_target_by_id(id, state.source.as_ref())
        .await?
        .ok_or_else(|| MatchmakerError::not_found("target", id).into())
}

/// GET /api/search?q=ANG
pub async fn search(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = required(params.q, "q")?;
    let outcome = search_target(
        &query,
        state.source.as_ref(),
        &state.default_mode(),
        state.config.suggestions.limit,
    )
    .await?;
    Ok(Json(outcome))
}

/// GET /api/suggest?q=VEGF&limit=5
pub async fn suggest(
    State(state): State<SharedState>,
    Query(params): Query<SuggestParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = required(params.q, "q")?;
    let limit = params
        .limit
        .unwrap_or(state.config.suggestions.limit)
        .min(MAX_SUGGESTIONS);
    let suggestions = find_similar(&query, state.source.as_ref(), limit).await?;
    Ok(Json(suggestions))
}

/// GET /api/targets/{id}
pub async fn target_detail(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(existing_target(&state, id).await?))
}

/// GET /api/targets/{id}/rankings?mode=live&full=true
///
/// `mode=live` is rejected unless live scoring is configured or overridable.
pub async fn target_rankings(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Query(params): Query<RankingParams>,
) -> Result<impl IntoResponse, ApiError> {
    let target = existing_target(&state, id).await?;

    let mode = match params.mode {
        None => match state.default_mode() {
            RankingMode::Live { snapshot, .. } => RankingMode::Live { snapshot, full: params.full },
            stored => stored,
        },
        Some(ModeParam::Precomputed) => RankingMode::Precomputed,
        Some(ModeParam::Live) if !state.config.ranking.live_allowed() => {
            return Err(ApiError::BadRequest(
                "live rankings are disabled; set ranking.allow_live_override to enable".into(),
            ));
        }
        Some(ModeParam::Live) => RankingMode::Live {
            snapshot: state.config.ranking.snapshot(),
            full: params.full,
        },
    };

    let table = get_rankings(target.id, state.source.as_ref(), &mode)
        .await?
        .require_rows()?;
    info!(abbreviation = %target.abbreviation, mode = mode.name(), rows = table.len(), "Served rankings");
    Ok(Json(table))
}

/// GET /api/targets/{id}/drugs
pub async fn target_drugs(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let target = existing_target(&state, id).await?;
    let drugs = get_drug_info(target.id, state.source.as_ref()).await?;
    Ok(Json(drugs))
}

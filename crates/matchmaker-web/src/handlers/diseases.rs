//! Publication and clinical-trial trends per disease.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use matchmaker_common::{error::ApiError, Disease, MatchmakerError, YearCounts};
use matchmaker_ranker::{count_publication_records, get_disease_name, publication_view, trial_view};

use crate::state::SharedState;

#[derive(Debug, Deserialize, Default)]
pub struct TrialParams {
    pub disease: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PublicationRecords {
    pub disease: Disease,
    pub counts: YearCounts,
}

/// GET /api/diseases/{id}/publications
pub async fn publication_counts(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(publication_view(id, state.source.as_ref()).await?))
}

/// GET /api/diseases/{id}/publications/raw
///
/// Counts tallied from the raw record tables instead of the stored row.
pub async fn publication_records(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let source = state.source.as_ref();
    let name = get_disease_name(id, source)
        .await?
        .ok_or_else(|| MatchmakerError::not_found("disease", id))?;
    let counts = count_publication_records(id, source).await?;
    Ok(Json(PublicationRecords { disease: Disease { id, name }, counts }))
}

/// GET /api/trials?disease=Breast%20Cancer
pub async fn trial_trend(
    State(state): State<SharedState>,
    Query(params): Query<TrialParams>,
) -> Result<impl IntoResponse, ApiError> {
    let disease = params
        .disease
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("query parameter 'disease' is required".into()))?;
    Ok(Json(trial_view(&disease, state.source.as_ref()).await?))
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Every failure that may cross a crate boundary.
///
/// Per-row metric failures are not represented here; they travel inside
/// [`crate::Score::Undefined`] so a ranking never aborts on one bad row.
#[derive(Debug, Error)]
pub enum MatchmakerError {
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    #[error("{entity} '{key}' has no {what}")]
    EmptyResult {
        entity: &'static str,
        key: String,
        what: &'static str,
    },

    #[error("Data inconsistency: {0}")]
    DataInconsistency(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MatchmakerError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound { entity, key: key.to_string() }
    }

    pub fn empty(entity: &'static str, key: impl ToString, what: &'static str) -> Self {
        Self::EmptyResult { entity, key: key.to_string(), what }
    }
}

pub type Result<T> = std::result::Result<T, MatchmakerError>;

// ── HTTP mapping ────────────────────────────────────────────────────────────

/// Error type returned by web handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    EmptyResult(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    DataInconsistency(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::EmptyResult(_) => "empty_result",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::DataInconsistency(_) => "data_inconsistency",
            ApiError::Internal(_) => "internal",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::EmptyResult(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::DataInconsistency(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<MatchmakerError> for ApiError {
    fn from(err: MatchmakerError) -> Self {
        let message = err.to_string();
        match err {
            MatchmakerError::NotFound { .. } => ApiError::NotFound(message),
            MatchmakerError::EmptyResult { .. } => ApiError::EmptyResult(message),
            MatchmakerError::DataInconsistency(_) => ApiError::DataInconsistency(message),
            MatchmakerError::Storage(_) | MatchmakerError::Config(_) => {
                tracing::error!(error = %message, "Request failed");
                ApiError::Internal(message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.kind(),
            "message": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}

//! Database error types.

use matchmaker_common::MatchmakerError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Could not decode {column}: {reason}")]
    Decode { column: String, reason: String },
}

impl DbError {
    pub fn decode(column: impl Into<String>, reason: impl Into<String>) -> Self {
        DbError::Decode { column: column.into(), reason: reason.into() }
    }
}

impl From<DbError> for MatchmakerError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Decode { .. } => MatchmakerError::DataInconsistency(err.to_string()),
            other => MatchmakerError::Storage(other.to_string()),
        }
    }
}

//! Typed score sentinel.
//!
//! A score is either a finite number or an explicit, inspectable reason why
//! it could not be computed. Undefined scores serialise as
//! `{"error": "<kind>"}` so they can never be mistaken for `0.0` or a name.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricError {
    #[error("count is not a non-negative integer")]
    InvalidCount,
    #[error("division by zero")]
    ZeroDivision,
    #[error("logarithm of a non-positive ratio")]
    LogDomain,
    #[error("no stored value for this score")]
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Value(f64),
    Undefined { error: MetricError },
}

impl Score {
    pub fn undefined(error: MetricError) -> Self {
        Score::Undefined { error }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Score::Value(v) => Some(*v),
            Score::Undefined { .. } => None,
        }
    }

    pub fn error(&self) -> Option<MetricError> {
        match self {
            Score::Value(_) => None,
            Score::Undefined { error } => Some(*error),
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Score::Value(_))
    }

    /// Round a defined score to `digits` decimal places.
    pub fn rounded(self, digits: u32) -> Self {
        match self {
            Score::Value(v) => Score::Value(round_to(v, digits)),
            undefined => undefined,
        }
    }

    /// Descending order with undefined scores last.
    pub fn cmp_desc(&self, other: &Score) -> Ordering {
        match (self.value(), other.value()) {
            (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl From<Result<f64, MetricError>> for Score {
    fn from(result: Result<f64, MetricError>) -> Self {
        match result {
            Ok(v) => Score::Value(v),
            Err(e) => Score::Undefined { error: e },
        }
    }
}

impl From<Option<f64>> for Score {
    /// Stored scores: a missing or non-finite value is `Unavailable`.
    fn from(stored: Option<f64>) -> Self {
        match stored {
            Some(v) if v.is_finite() => Score::Value(v),
            _ => Score::Undefined { error: MetricError::Unavailable },
        }
    }
}

/// Round half away from zero to `digits` decimal places.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

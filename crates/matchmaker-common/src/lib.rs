//! matchmaker-common: Shared types, errors, and traits used across all Matchmaker crates.

pub mod error;
pub mod entities;
pub mod score;
pub mod source;

// Re-export commonly used types
pub use entities::{
    AssociationRecord, CooccurrenceCounts, Disease, DrugIndication, Forecast,
    PrecomputedAssociation, Target, YearCounts,
};
pub use error::{MatchmakerError, Result};
pub use score::{MetricError, Score};
pub use source::DataSource;

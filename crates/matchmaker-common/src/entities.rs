//! Core entity types mirroring the snapshot tables.
//! These are read-only reference data; nothing here is ever written back.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::score::Score;

// ---------------------------------------------------------------------------
// Target / Disease
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub id: i64,
    pub abbreviation: String, // e.g. ANG
    pub name: String,         // e.g. Angiogenin
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disease {
    pub id: i64,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Co-occurrence counts
// ---------------------------------------------------------------------------

/// Raw document counts behind one (target, disease) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooccurrenceCounts {
    /// n0: documents mentioning both target and disease
    pub joint: u64,
    /// n1: documents in the whole corpus
    pub corpus: u64,
    /// n2: documents mentioning the target
    pub target: u64,
    /// n3: documents mentioning the disease
    pub disease: u64,
}

impl CooccurrenceCounts {
    /// Joint occurrence cannot exceed either marginal.
    pub fn is_consistent(&self) -> bool {
        self.joint <= self.target && self.joint <= self.disease
    }
}

// ---------------------------------------------------------------------------
// Association record
// ---------------------------------------------------------------------------

/// One ranked row: a disease associated with the queried target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRecord {
    pub disease_id: i64,
    pub disease: String,
    pub f0: Score,
    pub f1: Score,
    pub f2: Score,
    pub pmi: Score,
    /// Present only for live rankings requested in full.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<CooccurrenceCounts>,
}

/// A materialised `target_disease` row joined with its disease name.
/// Scores are `None` when the stored cell holds no usable number.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecomputedAssociation {
    pub disease_id: i64,
    pub disease_name: Option<String>,
    pub f0: Option<f64>,
    pub f1: Option<f64>,
    pub f2: Option<f64>,
    pub pmi: Option<f64>,
}

// ---------------------------------------------------------------------------
// Time series
// ---------------------------------------------------------------------------

/// Calendar year → count, ordered by year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearCounts(pub BTreeMap<i32, u64>);

impl YearCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, year: i32) -> u64 {
        self.0.get(&year).copied().unwrap_or(0)
    }

    pub fn insert(&mut self, year: i32, count: u64) {
        self.0.insert(year, count);
    }

    pub fn increment(&mut self, year: i32) {
        *self.0.entry(year).or_insert(0) += 1;
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.keys().copied()
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(i32, u64)> for YearCounts {
    fn from_iter<I: IntoIterator<Item = (i32, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Clinical-trial forecast for the next two periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub next: f64,
    pub following: f64,
}

// ---------------------------------------------------------------------------
// Drugs
// ---------------------------------------------------------------------------

/// A drug in development against a target (TTD-derived).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugIndication {
    pub drug_name: String,
    pub status: Option<String>,
    pub indication: Option<String>,
}

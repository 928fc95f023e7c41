//! Target → ordered disease table.
//!
//! Two sources feed the same table shape: the materialised
//! `target_disease` scores, or scores recomputed from raw co-occurrence
//! counts against a pinned corpus snapshot. Either way rows are sorted by
//! PMI descending with undefined scores last; ties keep source order.

use std::collections::HashSet;

use matchmaker_common::{
    AssociationRecord, CooccurrenceCounts, DataSource, MatchmakerError, PrecomputedAssociation,
    Result, Score,
};
use matchmaker_config::{CorpusSnapshot, RankingConfig};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::metrics::{score_counts, ROUND_DIGITS};

/// Digits kept on stored scores.
pub const PRECOMPUTED_DIGITS: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankingMode {
    /// Read stored scores.
    Precomputed,
    /// Recompute from raw counts. `full` keeps n0..n3 on every row.
    Live { snapshot: CorpusSnapshot, full: bool },
}

impl RankingMode {
    pub fn from_config(config: &RankingConfig) -> Self {
        match config.mode {
            matchmaker_config::RankingMode::Precomputed => RankingMode::Precomputed,
            matchmaker_config::RankingMode::Live => RankingMode::Live {
                snapshot: config.snapshot(),
                full: false,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RankingMode::Precomputed => "precomputed",
            RankingMode::Live { .. } => "live",
        }
    }
}

/// Ordered associations for one target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingTable {
    pub target_id: i64,
    pub mode: &'static str,
    /// Snapshot label the corpus size came from; live rankings only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<String>,
    pub rows: Vec<AssociationRecord>,
}

impl RankingTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Highest-PMI row.
    pub fn top(&self) -> Option<&AssociationRecord> {
        self.rows.first()
    }

    /// Fails with `EmptyResult` when the target has no associations.
    pub fn require_rows(self) -> Result<Self> {
        if self.rows.is_empty() {
            return Err(MatchmakerError::empty(
                "target",
                self.target_id.to_string(),
                "disease associations",
            ));
        }
        Ok(self)
    }
}

/// Rank every disease associated with `target_id`.
///
/// An unknown or unassociated target yields an empty table, not an error.
pub async fn get_rankings(
    target_id: i64,
    source: &dyn DataSource,
    mode: &RankingMode,
) -> Result<RankingTable> {
    let (mut rows, snapshot) = match mode {
        RankingMode::Precomputed => (precomputed_rows(target_id, source).await?, None),
        RankingMode::Live { snapshot, full } => (
            live_rows(target_id, source, snapshot, *full).await?,
            Some(snapshot.label.clone()),
        ),
    };

    sort_by_pmi(&mut rows);

    info!(
        target_id,
        mode = mode.name(),
        rows = rows.len(),
        "Ranking assembled"
    );

    Ok(RankingTable {
        target_id,
        mode: mode.name(),
        snapshot,
        rows,
    })
}

async fn precomputed_rows(
    target_id: i64,
    source: &dyn DataSource,
) -> Result<Vec<AssociationRecord>> {
    let stored = source.precomputed_associations(target_id).await?;
    debug!(target_id, stored = stored.len(), "Read stored associations");

    let mut seen = HashSet::new();
    let mut rows = Vec::with_capacity(stored.len());
    for row in stored {
        if !seen.insert(row.disease_id) {
            warn!(target_id, disease_id = row.disease_id, "Duplicate stored association skipped");
            continue;
        }
        rows.push(from_stored(target_id, row)?);
    }
    Ok(rows)
}

fn from_stored(target_id: i64, row: PrecomputedAssociation) -> Result<AssociationRecord> {
    let disease = row.disease_name.ok_or_else(|| {
        MatchmakerError::DataInconsistency(format!(
            "association ({target_id}, {}) references a disease with no name",
            row.disease_id
        ))
    })?;

    let stored = |v: Option<f64>| Score::from(v).rounded(PRECOMPUTED_DIGITS);
    Ok(AssociationRecord {
        disease_id: row.disease_id,
        disease,
        f0: stored(row.f0),
        f1: stored(row.f1),
        f2: stored(row.f2),
        pmi: stored(row.pmi),
        counts: None,
    })
}

async fn live_rows(
    target_id: i64,
    source: &dyn DataSource,
    snapshot: &CorpusSnapshot,
    full: bool,
) -> Result<Vec<AssociationRecord>> {
    let joint = source.joint_document_counts(target_id).await?;
    if joint.is_empty() {
        return Ok(Vec::new());
    }
    let target_total = source.target_document_count(target_id).await?;

    let mut rows = Vec::with_capacity(joint.len());
    for (disease_id, joint_count) in joint {
        let disease = source.disease_name(disease_id).await?.ok_or_else(|| {
            MatchmakerError::DataInconsistency(format!(
                "disease {disease_id} has co-occurrences but no name"
            ))
        })?;
        let counts = CooccurrenceCounts {
            joint: joint_count,
            corpus: snapshot.total_documents,
            target: target_total,
            disease: source.disease_document_count(disease_id).await?,
        };
        if !counts.is_consistent() {
            warn!(target_id, disease_id, ?counts, "Joint count exceeds a marginal count");
        }

        let scores = score_counts(&counts, true);
        if let Some(error) = scores.pmi.error() {
            debug!(target_id, disease_id, %error, "PMI undefined");
        }
        rows.push(AssociationRecord {
            disease_id,
            disease,
            f0: scores.f0,
            f1: scores.f1,
            f2: scores.f2,
            pmi: scores.pmi,
            counts: full.then_some(counts),
        });
    }

    debug!(target_id, rows = rows.len(), digits = ROUND_DIGITS, "Scored live associations");
    Ok(rows)
}

/// Stable: equal PMI keeps source order.
pub fn sort_by_pmi(rows: &mut [AssociationRecord]) {
    rows.sort_by(|a, b| a.pmi.cmp_desc(&b.pmi));
}

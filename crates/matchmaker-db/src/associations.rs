//! Target–disease association rows: precomputed scores and live co-occurrence counts.

use std::sync::Arc;

use matchmaker_common::PrecomputedAssociation;

use crate::database::{to_count, Database};
use crate::error::Result;
use crate::schema::numeric_or_null;

#[derive(Debug, sqlx::FromRow)]
struct AssociationRow {
    disease_id: i64,
    disease_name: Option<String>,
    f0: Option<f64>,
    f1: Option<f64>,
    f2: Option<f64>,
    pmi: Option<f64>,
}

impl From<AssociationRow> for PrecomputedAssociation {
    fn from(row: AssociationRow) -> Self {
        PrecomputedAssociation {
            disease_id: row.disease_id,
            disease_name: row.disease_name,
            f0: row.f0,
            f1: row.f1,
            f2: row.f2,
            pmi: row.pmi,
        }
    }
}

#[derive(Clone)]
pub struct AssociationRepository {
    db: Arc<Database>,
}

impl AssociationRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Materialised rows for one target in store order, with disease names joined in.
    pub async fn precomputed_for_target(&self, target_id: i64) -> Result<Vec<PrecomputedAssociation>> {
        let sql = format!(
            r#"
            SELECT
                td.disease_id,
                m.disease AS disease_name,
                {} AS f0,
                {} AS f1,
                {} AS f2,
                {} AS pmi
            FROM target_disease td
            LEFT JOIN malacard m ON m.disease_id = td.disease_id
            WHERE td.target_id = ?
            ORDER BY td.rowid
            "#,
            numeric_or_null("td.f0"),
            numeric_or_null("td.f1"),
            numeric_or_null("td.f2"),
            numeric_or_null("td.pmi"),
        );

        let rows = sqlx::query_as::<_, AssociationRow>(&sql)
            .bind(target_id)
            .fetch_all(self.db.pool())
            .await?;

        tracing::debug!(target_id, rows = rows.len(), "Loaded precomputed associations");
        Ok(rows.into_iter().map(PrecomputedAssociation::from).collect())
    }

    /// n0 per disease: documents mentioning both the target and the disease.
    pub async fn joint_counts(&self, target_id: i64) -> Result<Vec<(i64, u64)>> {
        let rows = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT disease_pubmed.disease_id, COUNT(*) AS joint
            FROM target_pubmed
            JOIN disease_pubmed ON target_pubmed.pmid = disease_pubmed.pmid
            WHERE target_pubmed.target_id = ?
            GROUP BY disease_pubmed.disease_id
            ORDER BY disease_pubmed.disease_id
            "#,
        )
        .bind(target_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.into_iter()
            .map(|(disease_id, n)| Ok((disease_id, to_count(n, "joint")?)))
            .collect()
    }
}

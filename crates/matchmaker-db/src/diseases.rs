//! Disease repository: names, mention counts and per-year publication counts.

use sqlx::Row;
use std::sync::Arc;

use matchmaker_common::YearCounts;

use crate::database::{to_count, Database};
use crate::error::{DbError, Result};
use crate::schema::{publication_year_columns, PUBLICATION_YEARS};

#[derive(Clone)]
pub struct DiseaseRepository {
    db: Arc<Database>,
}

impl DiseaseRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn name(&self, disease_id: i64) -> Result<Option<String>> {
        let name = sqlx::query_scalar::<_, String>("SELECT disease FROM malacard WHERE disease_id = ?")
            .bind(disease_id)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(name)
    }

    pub async fn id_by_name(&self, disease_name: &str) -> Result<Option<i64>> {
        let id = sqlx::query_scalar::<_, i64>(
            "SELECT disease_id FROM malacard WHERE disease = ? ORDER BY disease_id LIMIT 1",
        )
        .bind(disease_name)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(id)
    }

    /// n3: documents mentioning the disease.
    pub async fn document_count(&self, disease_id: i64) -> Result<u64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM disease_pubmed WHERE disease_id = ?")
            .bind(disease_id)
            .fetch_one(self.db.pool())
            .await?;
        to_count(n, "disease_pubmed")
    }

    /// The wide per-year row. NULL cells read as zero; every year of the
    /// table is present in the result.
    pub async fn publication_year_row(&self, disease_id: i64) -> Result<Option<YearCounts>> {
        let sql = format!(
            "SELECT {} FROM pubmed_disease_frequencies WHERE disease_id = ?",
            publication_year_columns()
        );
        let row = sqlx::query(&sql)
            .bind(disease_id)
            .fetch_optional(self.db.pool())
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut counts = YearCounts::new();
        for (idx, year) in PUBLICATION_YEARS.enumerate() {
            let cell: Option<f64> = row.try_get(idx)?;
            counts.insert(year, year_cell(cell, year)?);
        }
        Ok(Some(counts))
    }

    /// Year of every raw PubMed record tagged with the disease.
    pub async fn publication_record_years(&self, disease_id: i64) -> Result<Vec<i32>> {
        let years = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT pubmed.year
            FROM disease_pubmed
            JOIN pubmed ON pubmed.pmid = disease_pubmed.pmid
            WHERE disease_pubmed.disease_id = ?
            ORDER BY disease_pubmed.rowid
            "#,
        )
        .bind(disease_id)
        .fetch_all(self.db.pool())
        .await?;

        years
            .into_iter()
            .map(|y| {
                i32::try_from(y).map_err(|_| DbError::decode("pubmed.year", format!("year {y} out of range")))
            })
            .collect()
    }
}

/// A stored year count: NULL reads as zero, anything else must be a
/// non-negative whole number.
fn year_cell(cell: Option<f64>, year: i32) -> Result<u64> {
    let Some(value) = cell else {
        return Ok(0);
    };
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(DbError::decode(format!("year_{year}"), format!("not a count: {value}")));
    }
    Ok(value as u64)
}

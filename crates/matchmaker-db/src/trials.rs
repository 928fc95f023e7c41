//! Clinical-trial repository: serialised trial years and precomputed forecasts.

use std::sync::Arc;

use matchmaker_common::Forecast;

use crate::database::Database;
use crate::error::Result;

#[derive(Clone)]
pub struct TrialRepository {
    db: Arc<Database>,
}

impl TrialRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Raw serialised list of trial years. Keyed by disease name.
    pub async fn trial_years(&self, disease_name: &str) -> Result<Option<String>> {
        let years = sqlx::query_scalar::<_, String>(
            "SELECT ct_trial_years FROM ct_diseases WHERE disease = ? ORDER BY rowid LIMIT 1",
        )
        .bind(disease_name)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(years)
    }

    pub async fn forecast(&self, disease_id: i64) -> Result<Option<Forecast>> {
        let row = sqlx::query_as::<_, (Option<f64>, Option<f64>)>(
            r#"
            SELECT CAST(forecast_year1 AS REAL), CAST(forecast_year2 AS REAL)
            FROM ct_forecast
            WHERE disease_id = ?
            "#,
        )
        .bind(disease_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|(next, following)| Forecast {
            next: next.unwrap_or(0.0),
            following: following.unwrap_or(0.0),
        }))
    }
}

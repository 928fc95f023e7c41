//! Drugs in development per target.

use std::sync::Arc;

use matchmaker_common::DrugIndication;

use crate::database::Database;
use crate::error::Result;

#[derive(Debug, sqlx::FromRow)]
struct DrugRow {
    drug_name: String,
    drug_status: Option<String>,
    indication: Option<String>,
}

#[derive(Clone)]
pub struct DrugRepository {
    db: Arc<Database>,
}

impl DrugRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn for_target(&self, target_id: i64) -> Result<Vec<DrugIndication>> {
        let rows = sqlx::query_as::<_, DrugRow>(
            r#"
            SELECT drug_name, drug_status, indication
            FROM drug_target_indication
            WHERE target_id = ?
            ORDER BY rowid
            "#,
        )
        .bind(target_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| DrugIndication { drug_name: r.drug_name, status: r.drug_status, indication: r.indication })
            .collect())
    }
}

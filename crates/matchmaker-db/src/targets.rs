//! Target repository.

use std::sync::Arc;

use matchmaker_common::Target;

use crate::database::{to_count, Database};
use crate::error::Result;

#[derive(Debug, sqlx::FromRow)]
struct TargetRow {
    target_id: i64,
    targ_abbr: String,
    targ_name: String,
}

impl From<TargetRow> for Target {
    fn from(row: TargetRow) -> Self {
        Target { id: row.target_id, abbreviation: row.targ_abbr, name: row.targ_name }
    }
}

/// Repository for target lookups and target-level counts.
#[derive(Clone)]
pub struct TargetRepository {
    db: Arc<Database>,
}

impl TargetRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Exact, case-sensitive match on full name or abbreviation.
    pub async fn find_by_name_or_abbreviation(&self, query: &str) -> Result<Option<Target>> {
        let row = sqlx::query_as::<_, TargetRow>(
            r#"
            SELECT target_id, targ_abbr, targ_name
            FROM targets
            WHERE targ_name = ? OR targ_abbr = ?
            ORDER BY target_id
            LIMIT 1
            "#,
        )
        .bind(query)
        .bind(query)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(Target::from))
    }

    pub async fn find_by_id(&self, target_id: i64) -> Result<Option<Target>> {
        let row = sqlx::query_as::<_, TargetRow>(
            "SELECT target_id, targ_abbr, targ_name FROM targets WHERE target_id = ?",
        )
        .bind(target_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(Target::from))
    }

    pub async fn abbreviations(&self) -> Result<Vec<String>> {
        let abbrs = sqlx::query_scalar::<_, String>("SELECT targ_abbr FROM targets ORDER BY rowid")
            .fetch_all(self.db.pool())
            .await?;
        Ok(abbrs)
    }

    /// n2: documents mentioning the target.
    pub async fn document_count(&self, target_id: i64) -> Result<u64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM target_pubmed WHERE target_id = ?")
            .bind(target_id)
            .fetch_one(self.db.pool())
            .await?;
        to_count(n, "target_pubmed")
    }
}

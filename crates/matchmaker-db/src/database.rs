//! Connection pool management.
//!
//! Provides a unified handle over the SQLite snapshot.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::error::{DbError, Result};
use crate::schema;

/// Main database handle.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    url: String,
}

/// Row counts of the core tables, for health reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseStats {
    pub targets: u64,
    pub diseases: u64,
    pub associations: u64,
}

impl Database {
    /// Open a pool against the snapshot at `url`.
    ///
    /// Use `?mode=ro` in the URL to open the file read-only.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        tracing::debug!(url, max_connections, "SQLite pool ready");
        Ok(Self { pool, url: url.to_string() })
    }

    /// A private in-memory database on a single pinned connection.
    pub async fn in_memory() -> Result<Self> {
        let url = "sqlite::memory:";
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(url)
            .await?;
        Ok(Self { pool, url: url.to_string() })
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run a multi-statement SQL script, e.g. to build a local snapshot.
    pub async fn load_script(&self, sql: &str) -> Result<()> {
        sqlx::raw_sql(sql).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn stats(&self) -> Result<DatabaseStats> {
        Ok(DatabaseStats {
            targets: self.count_rows(schema::TABLE_TARGETS).await?,
            diseases: self.count_rows(schema::TABLE_DISEASES).await?,
            associations: self.count_rows(schema::TABLE_TARGET_DISEASE).await?,
        })
    }

    async fn count_rows(&self, table: &str) -> Result<u64> {
        let n: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await?;
        to_count(n, table)
    }
}

/// Counts come back from SQLite as i64; a negative one means a broken snapshot.
pub(crate) fn to_count(value: i64, column: &str) -> Result<u64> {
    u64::try_from(value).map_err(|_| DbError::decode(column, format!("negative count {value}")))
}

//! Read-only access to the snapshot store.
//!
//! Provides an abstraction over the relational snapshot so the ranker can
//! query counts and precomputed rows without being coupled to a driver.

use async_trait::async_trait;

use crate::entities::{DrugIndication, Forecast, PrecomputedAssociation, Target, YearCounts};
use crate::error::Result;

/// Every query the ranking and series operations need.
///
/// Implementations must be side-effect free: concurrent callers share one
/// instance and interleave freely. A lookup miss is `Ok(None)` or an empty
/// collection, never an error.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Exact, case-sensitive match on full name or abbreviation.
    async fn find_target(&self, name_or_abbreviation: &str) -> Result<Option<Target>>;

    async fn target_by_id(&self, target_id: i64) -> Result<Option<Target>>;

    /// All known abbreviations, in store order.
    async fn target_abbreviations(&self) -> Result<Vec<String>>;

    async fn disease_name(&self, disease_id: i64) -> Result<Option<String>>;

    async fn disease_id(&self, disease_name: &str) -> Result<Option<i64>>;

    /// Materialised score rows for one target, in store order.
    async fn precomputed_associations(&self, target_id: i64) -> Result<Vec<PrecomputedAssociation>>;

    /// n2: documents mentioning the target.
    async fn target_document_count(&self, target_id: i64) -> Result<u64>;

    /// n0 per disease: `(disease_id, joint_count)` ordered by disease id.
    async fn joint_document_counts(&self, target_id: i64) -> Result<Vec<(i64, u64)>>;

    /// n3: documents mentioning the disease.
    async fn disease_document_count(&self, disease_id: i64) -> Result<u64>;

    /// The wide per-year publication row, `None` if the disease has no row.
    async fn publication_year_row(&self, disease_id: i64) -> Result<Option<YearCounts>>;

    /// Publication year of every raw record mentioning the disease.
    async fn publication_record_years(&self, disease_id: i64) -> Result<Vec<i32>>;

    /// Serialised trial-year list, `None` if no row carries that name.
    async fn trial_years(&self, disease_name: &str) -> Result<Option<String>>;

    async fn trial_forecast(&self, disease_id: i64) -> Result<Option<Forecast>>;

    async fn drugs_for_target(&self, target_id: i64) -> Result<Vec<DrugIndication>>;
}

//! Matchmaker Database Layer
//!
//! Read-only access to a literature snapshot stored in SQLite: targets,
//! diseases, precomputed association scores, raw co-occurrence records,
//! per-year publication and trial counts, and drug indications.
//!
//! # Example
//!
//! ```rust,no_run
//! use matchmaker_db::{Database, SnapshotStore};
//! use matchmaker_common::DataSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite://data/20200723pubmed.db?mode=ro", 5).await?;
//!     let store = SnapshotStore::new(std::sync::Arc::new(db));
//!
//!     let target = store.find_target("ANG").await?;
//!     println!("{target:?}");
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
pub mod schema;
pub mod targets;
pub mod diseases;
pub mod associations;
pub mod trials;
pub mod drugs;
pub mod store;

pub use database::{Database, DatabaseStats};
pub use error::{DbError, Result};
pub use associations::AssociationRepository;
pub use diseases::DiseaseRepository;
pub use drugs::DrugRepository;
pub use store::SnapshotStore;
pub use targets::TargetRepository;
pub use trials::TrialRepository;

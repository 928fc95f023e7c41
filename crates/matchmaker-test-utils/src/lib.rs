//! Shared testing utilities for the Matchmaker workspace.
//!
//! Both fixtures describe the same small snapshot: target ANG (1841,
//! "Angiogenin") associated with five diseases, a few raw PubMed records for
//! the live path, trial-year lists and forecasts.

pub mod fixtures;
pub mod mock_source;

pub use fixtures::{ANG_ID, ORPHAN_TARGET_ID, SNAPSHOT_SQL, VEGFA_ID};
pub use mock_source::MockDataSource;

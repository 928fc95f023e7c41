//! matchmaker-ranker: Target–disease association ranking engine.
//!
//! `metrics` holds the four pure association scores, `ranking` turns a
//! target into an ordered disease table, `lookup` resolves search input,
//! `series` reads per-disease evidence over time and `shaping` normalises
//! those series against corpus-wide yearly totals.

pub mod metrics;
pub mod ranking;
pub mod lookup;
pub mod series;
pub mod shaping;

pub use lookup::{
    find_similar, get_disease_id, get_disease_name, get_drug_info, get_target_by_id, get_target_id,
    search_target, SearchOutcome, DEFAULT_SUGGESTION_LIMIT,
};
pub use ranking::{get_rankings, RankingMode, RankingTable};
pub use series::{
    count_publication_records, get_clinical_trial_year_counts, get_forecast,
    get_publication_year_counts, publication_view, trial_view, PublicationView, TrialView,
};
pub use shaping::{shape_year_series, YearShare, YearTotals, PUBLICATION_TOTALS, TRIAL_TOTALS};

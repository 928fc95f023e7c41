//! Snapshot table and column helpers.
//!
//! The schema itself is owned by the snapshot build; this crate only reads it.

pub const TABLE_TARGETS: &str = "targets";
pub const TABLE_DISEASES: &str = "malacard";
pub const TABLE_TARGET_DISEASE: &str = "target_disease";

/// Years covered by the wide `pubmed_disease_frequencies` table.
pub const PUBLICATION_YEARS: std::ops::RangeInclusive<i32> = 2009..=2020;

/// One REAL-or-NULL select expression per year column, in year order.
///
/// Year columns are INTEGER in some snapshots and FLOAT in others (a column
/// that ever held NaN is written as FLOAT).
pub fn publication_year_columns() -> String {
    PUBLICATION_YEARS
        .map(|y| format!("{} AS year_{y}", numeric_or_null(&format!("year_{y}"))))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Select a score column as REAL, or NULL when the cell holds text such as 'NaN'.
pub(crate) fn numeric_or_null(column: &str) -> String {
    format!(
        "CASE WHEN typeof({column}) IN ('real', 'integer') THEN CAST({column} AS REAL) END"
    )
}

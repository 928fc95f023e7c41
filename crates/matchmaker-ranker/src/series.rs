//! Per-disease evidence over time: publications, trials and forecasts.

use matchmaker_common::{DataSource, Forecast, MatchmakerError, Result, YearCounts};
use serde::Serialize;
use tracing::debug;

use crate::shaping::{shape_year_series, YearShare, PUBLICATION_TOTALS, TRIAL_TOTALS};

/// Stored yearly publication counts, one entry per year 2009–2020.
///
/// `None` when the disease has no row; a present row with NULL cells reads
/// as zeros.
pub async fn get_publication_year_counts(
    disease_id: i64,
    source: &dyn DataSource,
) -> Result<Option<YearCounts>> {
    let Some(row) = source.publication_year_row(disease_id).await? else {
        debug!(disease_id, "No publication frequency row");
        return Ok(None);
    };

    let years = PUBLICATION_TOTALS.years();
    if let Some(stray) = row.years().find(|y| !years.contains(y)) {
        return Err(MatchmakerError::DataInconsistency(format!(
            "publication row for disease {disease_id} has a column for {stray}"
        )));
    }
    Ok(Some(years.map(|year| (year, row.get(year))).collect()))
}

/// Yearly publication counts tallied from the raw record tables.
pub async fn count_publication_records(
    disease_id: i64,
    source: &dyn DataSource,
) -> Result<YearCounts> {
    let mut counts = YearCounts::new();
    for year in source.publication_record_years(disease_id).await? {
        counts.increment(year);
    }
    Ok(counts)
}

/// Parse a stored trial-year list such as `[2010, 2012]` or `['2015', '2015']`.
pub fn parse_trial_years(serialized: &str) -> Result<Vec<i32>> {
    let malformed = |detail: &str| {
        MatchmakerError::DataInconsistency(format!(
            "malformed trial year list {serialized:?}: {detail}"
        ))
    };

    let inner = serialized
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| malformed("expected a bracketed list"))?;

    inner
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            let bare = item.trim_matches(|c| c == '\'' || c == '"').trim();
            parse_year(bare).ok_or_else(|| malformed(item))
        })
        .collect()
}

fn parse_year(item: &str) -> Option<i32> {
    if let Ok(year) = item.parse::<i32>() {
        return Some(year);
    }
    // 2010.0
    let value = item.parse::<f64>().ok()?;
    (value.fract() == 0.0 && value.abs() < f64::from(i32::MAX)).then_some(value as i32)
}

/// Trial counts per year for a disease, keyed by disease name.
///
/// `None` when the disease has no trial entry. An empty list gives empty counts.
pub async fn get_clinical_trial_year_counts(
    disease_name: &str,
    source: &dyn DataSource,
) -> Result<Option<YearCounts>> {
    let Some(serialized) = source.trial_years(disease_name).await? else {
        debug!(disease = disease_name, "No clinical trial entry");
        return Ok(None);
    };

    let mut counts = YearCounts::new();
    for year in parse_trial_years(&serialized)? {
        counts.increment(year);
    }
    Ok(Some(counts))
}

/// Forecast for the next two periods, (0, 0) when none is stored.
pub async fn get_forecast(disease_id: i64, source: &dyn DataSource) -> Result<Forecast> {
    Ok(source.trial_forecast(disease_id).await?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Chart-ready views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicationView {
    pub disease_id: i64,
    pub series: Vec<YearShare>,
}

/// Publication share per year for one disease.
pub async fn publication_view(disease_id: i64, source: &dyn DataSource) -> Result<PublicationView> {
    let counts = get_publication_year_counts(disease_id, source)
        .await?
        .ok_or_else(|| MatchmakerError::empty("disease", disease_id, "publication counts"))?;
    Ok(PublicationView {
        disease_id,
        series: shape_year_series(&counts, &PUBLICATION_TOTALS)?,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialView {
    pub disease: String,
    pub disease_id: Option<i64>,
    pub series: Vec<YearShare>,
    pub forecast: Forecast,
}

/// Trial share per year for one disease, with its forecast.
///
/// Trials are keyed by disease name while forecasts are keyed by id; the id
/// is resolved from the name and the forecast falls back to (0, 0) when the
/// name does not resolve.
pub async fn trial_view(disease_name: &str, source: &dyn DataSource) -> Result<TrialView> {
    let counts = get_clinical_trial_year_counts(disease_name, source)
        .await?
        .ok_or_else(|| MatchmakerError::empty("disease", disease_name, "clinical trials"))?;
    let series = shape_year_series(&counts, &TRIAL_TOTALS)?;

    let disease_id = source.disease_id(disease_name).await?;
    let forecast = match disease_id {
        Some(id) => get_forecast(id, source).await?,
        None => Forecast::default(),
    };

    Ok(TrialView {
        disease: disease_name.to_string(),
        disease_id,
        series,
        forecast,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchmaker_test_utils::fixtures::{
        ALS_ID, BREAST_ID, COLORECTAL_ID, RARE_DISEASE_ID, RHEUMATOID_ID,
    };
    use matchmaker_test_utils::MockDataSource;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_publication_row_is_zero_filled() {
        let source = MockDataSource::snapshot();
        let counts = get_publication_year_counts(ALS_ID, &source).await.unwrap().unwrap();
        assert_eq!(counts.len(), 12);
        assert_eq!(counts.get(2009), 1);
        assert_eq!(counts.get(2011), 0);
        assert_eq!(counts.get(2012), 2);
        assert_eq!(counts.total(), 5);

        let zeros = get_publication_year_counts(RHEUMATOID_ID, &source).await.unwrap().unwrap();
        assert_eq!(zeros.len(), 12);
        assert_eq!(zeros.total(), 0);
    }

    #[tokio::test]
    async fn test_publication_row_missing_is_none() {
        let source = MockDataSource::snapshot();
        assert_eq!(get_publication_year_counts(RARE_DISEASE_ID, &source).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_publication_row_with_stray_year() {
        let source = MockDataSource::new().with_publication_row(ALS_ID, &[(2008, 1)]);
        let err = get_publication_year_counts(ALS_ID, &source).await.unwrap_err();
        assert!(matches!(err, MatchmakerError::DataInconsistency(_)));
    }

    #[tokio::test]
    async fn test_count_publication_records_tallies_years() {
        let source = MockDataSource::snapshot();
        let counts = count_publication_records(COLORECTAL_ID, &source).await.unwrap();
        let expected: YearCounts = [(2013, 2), (2015, 1), (2018, 1)].into_iter().collect();
        assert_eq!(counts, expected);
        assert!(count_publication_records(RARE_DISEASE_ID, &source).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stored_row_agrees_with_raw_records() {
        let source = MockDataSource::snapshot();
        for disease_id in [ALS_ID, COLORECTAL_ID, BREAST_ID] {
            let stored = get_publication_year_counts(disease_id, &source).await.unwrap().unwrap();
            let raw = count_publication_records(disease_id, &source).await.unwrap();
            assert_eq!(stored.total(), raw.total(), "disease {disease_id}");
            assert!(raw.years().all(|y| stored.get(y) == raw.get(y)));
        }
    }

    #[test]
    fn test_parse_trial_years_formats() {
        assert_eq!(parse_trial_years("[2010, 2012, 2012]").unwrap(), vec![2010, 2012, 2012]);
        assert_eq!(parse_trial_years("['2015', '2015', \"2016\"]").unwrap(), vec![2015, 2015, 2016]);
        assert_eq!(parse_trial_years(" [2010.0] ").unwrap(), vec![2010]);
        assert!(parse_trial_years("[]").unwrap().is_empty());
        assert!(parse_trial_years("[ ]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_trial_years_rejects_garbage() {
        for bad in ["2010, 2012", "[2010, soon]", "[2010.5]", "", "[2010"] {
            assert!(
                matches!(parse_trial_years(bad), Err(MatchmakerError::DataInconsistency(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_trial_counts() {
        let source = MockDataSource::snapshot();
        let als = get_clinical_trial_year_counts("Amyotrophic Lateral Sclerosis", &source)
            .await
            .unwrap()
            .unwrap();
        let expected: YearCounts = [(2010, 1), (2012, 2), (2019, 1)].into_iter().collect();
        assert_eq!(als, expected);

        let rheumatoid = get_clinical_trial_year_counts("Rheumatoid Arthritis", &source)
            .await
            .unwrap()
            .unwrap();
        assert!(rheumatoid.is_empty());

        assert_eq!(get_clinical_trial_year_counts("Rare Disease X", &source).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_forecast_defaults_to_zero() {
        let source = MockDataSource::snapshot();
        assert_eq!(
            get_forecast(ALS_ID, &source).await.unwrap(),
            Forecast { next: 3.2, following: 4.1 }
        );
        assert_eq!(get_forecast(RARE_DISEASE_ID, &source).await.unwrap(), Forecast::default());
    }

    #[tokio::test]
    async fn test_publication_view() {
        let source = MockDataSource::snapshot();
        let view = publication_view(BREAST_ID, &source).await.unwrap();
        assert_eq!(view.series.len(), 12);
        let last = view.series.last().unwrap();
        assert_eq!((last.year, last.count, last.total_count), (2020, 1, 16_711));

        let err = publication_view(RARE_DISEASE_ID, &source).await.unwrap_err();
        assert!(matches!(err, MatchmakerError::EmptyResult { .. }));
    }

    #[tokio::test]
    async fn test_trial_view_resolves_forecast_by_name() {
        let source = MockDataSource::snapshot();
        let view = trial_view("Breast Cancer", &source).await.unwrap();
        assert_eq!(view.disease_id, Some(BREAST_ID));
        assert_eq!(view.forecast, Forecast { next: 12.0, following: 13.5 });
        assert_eq!(view.series.iter().map(|p| p.count).sum::<u64>(), 3);
    }

    #[tokio::test]
    async fn test_trial_view_errors() {
        let source = MockDataSource::snapshot();
        let out_of_range = trial_view("Colorectal Cancer", &source).await.unwrap_err();
        assert!(matches!(out_of_range, MatchmakerError::DataInconsistency(_)));

        let missing = trial_view("Rare Disease X", &source).await.unwrap_err();
        assert!(matches!(missing, MatchmakerError::EmptyResult { .. }));
    }
}

//! Resolving user input to targets and diseases.

use matchmaker_common::{DataSource, DrugIndication, Result, Target};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::ranking::{get_rankings, RankingMode, RankingTable};

pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Exact match on either the full target name or its abbreviation.
pub async fn get_target_id(query: &str, source: &dyn DataSource) -> Result<Option<Target>> {
    source.find_target(query).await
}

pub async fn get_target_by_id(target_id: i64, source: &dyn DataSource) -> Result<Option<Target>> {
    source.target_by_id(target_id).await
}

pub async fn get_disease_name(disease_id: i64, source: &dyn DataSource) -> Result<Option<String>> {
    source.disease_name(disease_id).await
}

pub async fn get_disease_id(name: &str, source: &dyn DataSource) -> Result<Option<i64>> {
    source.disease_id(name).await
}

/// Drugs in development against a target, with status and indication.
pub async fn get_drug_info(target_id: i64, source: &dyn DataSource) -> Result<Vec<DrugIndication>> {
    source.drugs_for_target(target_id).await
}

/// Case-insensitive normalised Levenshtein similarity in [0, 1].
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&a.to_lowercase(), &b.to_lowercase())
}

/// Up to `limit` candidates, most similar first; ties keep candidate order.
pub fn rank_similar(query: &str, candidates: &[String], limit: usize) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(candidates.len());
    let mut scored: Vec<(f64, &String)> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !seen.insert(candidate.as_str()) {
            continue;
        }
        scored.push((similarity(query, candidate), candidate));
    }
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, c)| c.clone())
        .collect()
}

/// Target abbreviations closest to `query`.
pub async fn find_similar(
    query: &str,
    source: &dyn DataSource,
    limit: usize,
) -> Result<Vec<String>> {
    let abbreviations = source.target_abbreviations().await?;
    let suggestions = rank_similar(query, &abbreviations, limit);
    debug!(query, candidates = abbreviations.len(), ?suggestions, "Fuzzy suggestions");
    Ok(suggestions)
}

/// What a search box submission resolves to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    Ranked { target: Target, ranking: RankingTable },
    NoAssociations { target: Target },
    NotFound { query: String, suggestions: Vec<String> },
}

/// Resolve `query` and rank its diseases, or suggest near matches.
pub async fn search_target(
    query: &str,
    source: &dyn DataSource,
    mode: &RankingMode,
    suggestion_limit: usize,
) -> Result<SearchOutcome> {
    if query.trim().is_empty() {
        return Ok(SearchOutcome::NotFound {
            query: query.to_string(),
            suggestions: Vec::new(),
        });
    }

    let Some(target) = get_target_id(query, source).await? else {
        let suggestions = find_similar(query, source, suggestion_limit).await?;
        info!(query, suggestions = suggestions.len(), "Target not found");
        return Ok(SearchOutcome::NotFound {
            query: query.to_string(),
            suggestions,
        });
    };

    let ranking = get_rankings(target.id, source, mode).await?;
    if ranking.is_empty() {
        info!(target_id = target.id, "Target has no disease associations");
        return Ok(SearchOutcome::NoAssociations { target });
    }
    Ok(SearchOutcome::Ranked { target, ranking })
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchmaker_test_utils::{MockDataSource, ANG_ID, ORPHAN_TARGET_ID, VEGFA_ID};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_lookup_by_name_or_abbreviation() {
        let source = MockDataSource::snapshot();
        let by_abbr = get_target_id("ANG", &source).await.unwrap().unwrap();
        let by_name = get_target_id("Angiogenin", &source).await.unwrap().unwrap();
        assert_eq!(by_abbr.id, ANG_ID);
        assert_eq!(by_abbr, by_name);
        assert!(get_target_id("ang", &source).await.unwrap().is_none());
        assert!(get_target_id("", &source).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_disease_lookups() {
        let source = MockDataSource::snapshot();
        assert_eq!(
            get_disease_name(10, &source).await.unwrap().as_deref(),
            Some("Amyotrophic Lateral Sclerosis")
        );
        assert_eq!(get_disease_id("Breast Cancer", &source).await.unwrap(), Some(30));
        assert_eq!(get_disease_id("breast cancer", &source).await.unwrap(), None);
        assert_eq!(get_target_by_id(VEGFA_ID, &source).await.unwrap().unwrap().abbreviation, "VEGFA");
    }

    #[tokio::test]
    async fn test_drug_info() {
        let source = MockDataSource::snapshot();
        let drugs = get_drug_info(VEGFA_ID, &source).await.unwrap();
        assert_eq!(drugs.len(), 2);
        assert_eq!(drugs[0].drug_name, "Bevacizumab");
        assert_eq!(drugs[0].status.as_deref(), Some("Approved"));
        assert!(get_drug_info(ORPHAN_TARGET_ID, &source).await.unwrap().is_empty());
    }

    #[test]
    fn test_rank_similar_orders_by_similarity() {
        let candidates: Vec<String> = ["TNF", "VEGFA", "EGFR", "ANG", "VEGFA"]
            .into_iter()
            .map(String::from)
            .collect();
        let ranked = rank_similar("vegf", &candidates, 2);
        assert_eq!(ranked, vec!["VEGFA".to_string(), "EGFR".to_string()]);
        assert_eq!(rank_similar("x", &candidates, 10).len(), 4);
        assert!(rank_similar("x", &candidates, 0).is_empty());
    }

    #[test]
    fn test_rank_similar_collapses_repeated_candidates() {
        let candidates: Vec<String> = (0..2000)
            .map(|i| ["ANG", "TNF", "IL6"][i % 3].to_string())
            .collect();
        let ranked = rank_similar("ANG", &candidates, 10);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0], "ANG");
    }

    #[tokio::test]
    async fn test_find_similar_limit() {
        let source = MockDataSource::snapshot();
        assert!(get_target_id("nonexistent-xyz", &source).await.unwrap().is_none());
        assert_eq!(find_similar("nonexistent-xyz", &source, 5).await.unwrap().len(), 5);
        assert_eq!(find_similar("nonexistent-xyz", &source, 50).await.unwrap().len(), 7);

        let suggestions = find_similar("EGF", &source, 3).await.unwrap();
        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0], "EGFR");
    }

    #[tokio::test]
    async fn test_search_outcomes() {
        let source = MockDataSource::snapshot();
        let mode = RankingMode::Precomputed;

        match search_target("ANG", &source, &mode, 5).await.unwrap() {
            SearchOutcome::Ranked { target, ranking } => {
                assert_eq!(target.id, ANG_ID);
                assert_eq!(ranking.len(), 5);
            }
            other => panic!("expected ranking, got {other:?}"),
        }

        match search_target("ORPH1", &source, &mode, 5).await.unwrap() {
            SearchOutcome::NoAssociations { target } => assert_eq!(target.id, ORPHAN_TARGET_ID),
            other => panic!("expected no associations, got {other:?}"),
        }

        match search_target("VEGF", &source, &mode, 2).await.unwrap() {
            SearchOutcome::NotFound { suggestions, .. } => {
                assert_eq!(suggestions.len(), 2);
                assert_eq!(suggestions[0], "VEGFA");
            }
            other => panic!("expected suggestions, got {other:?}"),
        }

        assert_eq!(
            search_target("  ", &source, &mode, 5).await.unwrap(),
            SearchOutcome::NotFound { query: "  ".into(), suggestions: vec![] }
        );
    }

    #[tokio::test]
    async fn test_search_outcome_serialises_with_status() {
        let source = MockDataSource::snapshot();
        let outcome = search_target("ORPH1", &source, &RankingMode::Precomputed, 5)
            .await
            .unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "no_associations");
        assert_eq!(json["target"]["abbreviation"], "ORPH1");
    }
}

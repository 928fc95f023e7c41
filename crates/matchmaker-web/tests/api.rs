//! Router tests: requests go through the full middleware stack via `oneshot`.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tower::ServiceExt;

use matchmaker_common::DataSource;
use matchmaker_config::{Config, RankingMode};
use matchmaker_db::{Database, SnapshotStore};
use matchmaker_test_utils::{MockDataSource, ANG_ID, ORPHAN_TARGET_ID, SNAPSHOT_SQL, VEGFA_ID};
use matchmaker_web::{router::build_router, state::AppState};

fn app_with(source: impl DataSource + 'static, config: Config) -> Router {
    build_router(AppState::new(Arc::new(source), config))
}

fn app() -> Router {
    app_with(MockDataSource::snapshot(), Config::default())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_configured_mode() {
    let (status, body) = get(app(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["mode"], "precomputed");
    assert_eq!(body["snapshot"], "20200723pubmed");
    assert_eq!(body["corpus_size"], 9_680_305);
}

#[tokio::test]
async fn search_ranks_known_target() {
    let (status, body) = get(app(), "/api/search?q=ANG").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ranked");
    assert_eq!(body["target"]["id"], ANG_ID);

    let rows = body["ranking"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["disease"], "Amyotrophic Lateral Sclerosis");
    assert_eq!(rows[0]["pmi"], 6.8123);
    assert_eq!(rows[4]["pmi"]["error"], "unavailable");
}

#[tokio::test]
async fn search_suggests_on_miss() {
    let (status, body) = get(app(), "/api/search?q=VEGF").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "not_found");
    assert_eq!(body["suggestions"][0], "VEGFA");
    assert!(body["suggestions"].as_array().unwrap().len() <= 5);
}

#[tokio::test]
async fn search_without_query_is_bad_request() {
    let (status, body) = get(app(), "/api/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn suggest_respects_limit() {
    let (status, body) = get(app(), "/api/suggest?q=EGF&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0], "EGFR");
}

#[tokio::test]
async fn target_detail_and_missing_target() {
    let (status, body) = get(app(), &format!("/api/targets/{VEGFA_ID}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["abbreviation"], "VEGFA");

    let (status, body) = get(app(), "/api/targets/424242").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn rankings_live_request_rejected_by_default() {
    let (status, body) = get(app(), &format!("/api/targets/{ANG_ID}/rankings?mode=live")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, _) = get(app(), &format!("/api/targets/{ANG_ID}/rankings?mode=precomputed")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn rankings_live_mode_with_counts() {
    let mut config = Config::default();
    config.ranking.allow_live_override = true;
    let app = app_with(MockDataSource::snapshot(), config);

    let (status, body) = get(app, &format!("/api/targets/{ANG_ID}/rankings?mode=live&full=true")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "live");
    assert_eq!(body["snapshot"], "20200723pubmed");

    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["disease"], "Breast Cancer");
    assert_eq!(rows[0]["counts"]["joint"], 2);
    assert_eq!(rows[0]["counts"]["corpus"], 9_680_305);
}

#[tokio::test]
async fn rankings_follow_configured_live_mode() {
    let mut config = Config::default();
    config.ranking.mode = RankingMode::Live;
    let app = app_with(MockDataSource::snapshot(), config);

    let (status, body) = get(app, &format!("/api/targets/{ANG_ID}/rankings")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "live");
    assert!(body["rows"][0].get("counts").is_none());
}

#[tokio::test]
async fn rankings_for_orphan_target_are_empty_result() {
    let (status, body) = get(app(), &format!("/api/targets/{ORPHAN_TARGET_ID}/rankings")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "empty_result");
}

#[tokio::test]
async fn drugs_for_target() {
    let (status, body) = get(app(), &format!("/api/targets/{VEGFA_ID}/drugs")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["drug_name"], "Bevacizumab");
    assert_eq!(body[1]["indication"], "Macular degeneration");
}

#[tokio::test]
async fn publication_trend_and_raw_counts() {
    let (status, body) = get(app(), "/api/diseases/10/publications").await;
    assert_eq!(status, StatusCode::OK);
    let series = body["series"].as_array().unwrap();
    assert_eq!(series.len(), 12);
    assert_eq!(series[1]["year"], 2010);
    assert_eq!(series[1]["count"], 2);
    assert_eq!(series[1]["total_count"], 694_295);

    let (status, body) = get(app(), "/api/diseases/10/publications/raw").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["disease"]["id"], 10);
    assert_eq!(body["disease"]["name"], "Amyotrophic Lateral Sclerosis");
    assert_eq!(body["counts"]["2012"], 2);

    let (status, body) = get(app(), "/api/diseases/60/publications").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "empty_result");

    let (status, _) = get(app(), "/api/diseases/777/publications/raw").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn trial_trend_with_forecast() {
    let (status, body) = get(app(), "/api/trials?disease=Amyotrophic%20Lateral%20Sclerosis").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["disease_id"], 10);
    assert_eq!(body["forecast"]["next"], 3.2);
    assert_eq!(body["series"].as_array().unwrap().len(), 22);

    let (status, body) = get(app(), "/api/trials?disease=Colorectal%20Cancer").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "data_inconsistency");

    let (status, _) = get(app(), "/api/trials").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sqlite_snapshot_serves_the_same_ranking() {
    let db = Database::in_memory().await.unwrap();
    db.load_script(SNAPSHOT_SQL).await.unwrap();
    let sqlite = app_with(SnapshotStore::new(Arc::new(db)), Config::default());

    let (status, from_db) = get(sqlite, &format!("/api/targets/{ANG_ID}/rankings")).await;
    let (_, from_mock) = get(app(), &format!("/api/targets/{ANG_ID}/rankings")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(from_db, from_mock);
}

//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use solar_fleet::api::{AppState, HISTORY_MONTHS, router};
use solar_fleet::config::AppConfig;
use solar_fleet::io::load_snapshot;

async fn get(state: Arc<AppState>, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn fixture_state() -> Arc<AppState> {
    let snap = common::snapshot();
    let viewer = common::admin(&snap.sites);
    Arc::new(AppState::new(snap, viewer))
}

#[tokio::test]
async fn summary_matches_engine() {
    let (status, json) = get(fixture_state(), "/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["overall"]["total_capacity"], 160.0);
    assert_eq!(json["overall"]["low_performing_count"], 2);
    assert_eq!(json["breakdown"]["good"], 2);
    assert_eq!(json["breakdown"]["medium"], 1);
    assert_eq!(json["breakdown"]["low"], 1);
    assert_eq!(json["bands"][0]["band"], "good");
}

#[tokio::test]
async fn operator_sees_one_atoll() {
    let snap = common::snapshot();
    let viewer = common::operator(&snap.sites, "K. Male'");
    let state = Arc::new(AppState::new(snap, viewer));

    let (status, json) = get(state, "/atolls").await;
    assert_eq!(status, StatusCode::OK);
    let atolls = json.as_array().cloned().unwrap_or_default();
    assert_eq!(atolls.len(), 1);
    assert_eq!(atolls[0]["name"], "K");
    assert_eq!(atolls[0]["stats"]["total_production"], 12150.0);
    assert_eq!(atolls[0]["islands"][1]["name"], "Male'");
}

#[tokio::test]
async fn admin_role_query_ignores_location() {
    let (_, json) = get(fixture_state(), "/atolls?role=ADMIN&location=K.%20Male%27").await;
    assert_eq!(json.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn demo_fleet_site_history() {
    let mut cfg = AppConfig::demo();
    cfg.demo.through = Some("2024-06".to_string());
    let snap = load_snapshot(&cfg).expect("demo loads");
    let viewer = cfg.viewer(&snap.sites).expect("viewer");
    let state = Arc::new(AppState::new(snap, viewer));

    let (status, json) = get(state, "/sites/1").await;
    assert_eq!(status, StatusCode::OK);
    let points = json["history"]["points"].as_array().cloned().unwrap_or_default();
    assert_eq!(points.len(), HISTORY_MONTHS);
    assert_eq!(points[0]["month"], "2023-07");
    assert_eq!(points[HISTORY_MONTHS - 1]["month"], "2024-06");
    assert!(points.iter().all(|p| p["production_kwh"].is_number()));
}

#[tokio::test]
async fn non_numeric_site_id_is_rejected() {
    let req = Request::builder()
        .uri("/sites/abc")
        .body(Body::empty())
        .unwrap();
    let resp = router(fixture_state()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

//! API router wired to a resolver with a scripted live service.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use std::sync::Arc;
use tower::ServiceExt;

use bottom_gauge::data::{DataResolver, LiveFetcher};
use bottom_gauge::server::{build_router, ServerState};

use crate::stub_client::StubClient;

fn app(stub: &StubClient) -> axum::Router {
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let resolver = DataResolver::new(Some(LiveFetcher::new(Box::new(stub.clone())))).with_today(today);
    build_router(Arc::new(ServerState::new(resolver)))
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn recent_date_served_from_live_service() {
    let stub = StubClient::new().respond(
        r#"{"fearGreed": 62, "vix": 16.1, "rsiDaily": 58, "rsiWeekly": 61, "putCallRatio": 0.71}"#,
    );

    let (status, json) = get_json(app(&stub), "/api/score?date=2026-10-17").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "live");
    assert_eq!(json["data"]["vix"], 16.1);
    assert_eq!(json["result"]["status"], "near top (risk management)");
    assert_eq!(json["result"]["statusColor"], "blue");
}

#[tokio::test]
async fn live_outage_is_invisible_to_api_clients() {
    let stub = StubClient::new().fail("connection reset");

    let (status, json) = get_json(app(&stub), "/api/score?date=2026-10-17").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "fallback");
    assert!(json.get("error").is_none());
    assert_eq!(stub.call_count(), 1);
}

#[tokio::test]
async fn date_before_supported_range_is_rejected() {
    let stub = StubClient::new();

    let (status, json) = get_json(app(&stub), "/api/score?date=2008-10-10").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("2008-10-10"));
    assert_eq!(stub.call_count(), 0);
}

#[tokio::test]
async fn history_lists_scored_bottoms() {
    let (status, json) = get_json(app(&StubClient::new()), "/api/history").await;

    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().unwrap();
    assert_eq!(rows.first().unwrap()["date"], "2011-10-04");
    assert_eq!(rows.last().unwrap()["date"], "2025-04-07");
    assert!(rows.iter().all(|r| r["source"] == "historical"));
}

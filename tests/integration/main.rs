//! End-to-end tests for the clinic locator HTTP API.
//!
//! The Overpass API is replaced by a local `httpmock` server, so these tests
//! run offline.
//! Run with: cargo test --test integration

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use clinic_locator::api::{router_from_config, SearchResponse};
use clinic_locator::config::Config;
use clinic_locator::facility::FacilityResult;
use clinic_locator::metrics::install_prometheus;

const INTERPRETER: &str = "/api/interpreter";

/// Build the router against a mock upstream.
fn test_app(server: &MockServer, strict: bool) -> Router {
    let config = Config {
        overpass_url: server.url(INTERPRETER),
        overpass_timeout_ms: 500,
        strict_upstream: strict,
        metrics_enabled: false,
        ..Config::default()
    };

    router_from_config(&config, None).expect("router")
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

/// A tagged facility is normalized into the public record shape.
#[tokio::test]
async fn test_tagged_facility_is_normalized() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(INTERPRETER);
            then.status(200).json_body(json!({
                "version": 0.6,
                "elements": [
                    {
                        "type": "node",
                        "id": 42,
                        "lat": 40.0,
                        "lon": -75.0,
                        "tags": {"amenity": "clinic", "name": "City Clinic", "phone": "12345"}
                    },
                    {"type": "node", "id": 43, "lat": 40.01, "lon": -75.02}
                ]
            }));
        })
        .await;

    let (status, body) = get(
        test_app(&server, false),
        "/clinics_hospitals?latitude=40.0&longitude=-75.0&radius=500",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let response: SearchResponse = serde_json::from_value(body).unwrap();
    assert_eq!(
        response,
        SearchResponse {
            results: vec![
                FacilityResult {
                    name: "City Clinic".to_string(),
                    phone: "12345".to_string(),
                    location: "Latitude: 40.0, Longitude: -75.0".to_string(),
                    map_link: "https://www.google.com/maps?q=40.0,-75.0".to_string(),
                },
                FacilityResult {
                    name: "Unknown".to_string(),
                    phone: "Not available".to_string(),
                    location: "Latitude: 40.01, Longitude: -75.02".to_string(),
                    map_link: "https://www.google.com/maps?q=40.01,-75.02".to_string(),
                },
            ],
            message: None,
        }
    );
}

/// The requested radius reaches the upstream query.
#[tokio::test]
async fn test_radius_is_forwarded() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path(INTERPRETER).query_param(
                "data",
                "[out:json];\n(\n  node[amenity=clinic](around:750,12.5,-3.25);\n  node[amenity=hospital](around:750,12.5,-3.25);\n);\nout body;\n",
            );
            then.status(200).json_body(json!({"elements": []}));
        })
        .await;

    let (status, _) = get(
        test_app(&server, false),
        "/clinics_hospitals?latitude=12.5&longitude=-3.25&radius=750",
    )
    .await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
}

/// An upstream error status reads as "nothing found" by default.
#[tokio::test]
async fn test_upstream_error_status_yields_empty_results() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(INTERPRETER);
            then.status(503).body("overloaded");
        })
        .await;

    let (status, body) = get(
        test_app(&server, false),
        "/clinics_hospitals?latitude=1.0&longitude=2.0",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "results": [],
            "message": "No clinics or hospitals found within the specified radius."
        })
    );
}

/// Strict mode reports the upstream status as a gateway error.
#[tokio::test]
async fn test_strict_mode_reports_upstream_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(INTERPRETER);
            then.status(503);
        })
        .await;

    let (status, body) = get(
        test_app(&server, true),
        "/clinics_hospitals?latitude=1.0&longitude=2.0",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "upstream_status");
}

/// A slow upstream is cut off and reported as a gateway timeout.
#[tokio::test]
async fn test_slow_upstream_returns_gateway_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(INTERPRETER);
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(json!({"elements": []}));
        })
        .await;

    let (status, body) = get(
        test_app(&server, false),
        "/clinics_hospitals?latitude=1.0&longitude=2.0",
    )
    .await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"], "upstream_timeout");
}

/// Malformed upstream JSON is a gateway error, not a crash.
#[tokio::test]
async fn test_malformed_upstream_json_returns_bad_gateway() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(INTERPRETER);
            then.status(200).body("{\"elements\": [");
        })
        .await;

    let (status, body) = get(
        test_app(&server, false),
        "/clinics_hospitals?latitude=1.0&longitude=2.0",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "upstream_invalid_response");
}

/// The root endpoint never touches the upstream.
#[tokio::test]
async fn test_root_ignores_query_parameters() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path(INTERPRETER);
            then.status(200).json_body(json!({"elements": []}));
        })
        .await;

    let (status, body) = get(test_app(&server, false), "/?latitude=1&longitude=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Welcome to the Clinics and Hospitals API. Use /clinics_hospitals to find nearby clinics and hospitals."
    );
    assert_eq!(mock.hits_async().await, 0);
}

/// With the recorder installed, searches show up on the scrape endpoint.
#[tokio::test]
async fn test_metrics_endpoint_reports_searches() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(INTERPRETER);
            then.status(200).json_body(json!({"elements": []}));
        })
        .await;

    let config = Config {
        overpass_url: server.url(INTERPRETER),
        overpass_timeout_ms: 500,
        ..Config::default()
    };
    let handle = install_prometheus().expect("recorder");
    let app = router_from_config(&config, Some(handle)).expect("router");

    let (status, _) = get(app.clone(), "/clinics_hospitals?latitude=1.0&longitude=2.0").await;
    assert_eq!(status, StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/plain; version=0.0.4"
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("facility_searches_total"));
}

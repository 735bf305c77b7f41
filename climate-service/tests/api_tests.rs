//! Integration tests for the HTTP API.

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use climate::ClimateStore;
use climate_service::{handlers, AppState};
use serde_json::{json, Value};
use std::sync::Arc;

/// Create a test server over an in-memory store.
///
/// The state is returned alongside the server so tests can inspect the
/// store directly.
fn create_test_server() -> (TestServer, Arc<AppState>) {
    let store = ClimateStore::in_memory().unwrap();
    let state = Arc::new(AppState { store });

    let app = Router::new()
        .route("/temperature", get(handlers::get_temperature))
        .route("/humidity", get(handlers::get_humidity))
        .route("/api/climate-data", post(handlers::post_climate_data))
        .route("/health", get(handlers::health_check))
        .with_state(state.clone());

    (TestServer::new(app).unwrap(), state)
}

#[tokio::test]
async fn test_temperature_endpoint() {
    let (server, _) = create_test_server();

    let response = server.get("/temperature").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json, json!({"temperature": 25.0}));
}

#[tokio::test]
async fn test_temperature_endpoint_ignores_query_params() {
    let (server, _) = create_test_server();

    let response = server.get("/temperature?unit=kelvin&foo=bar").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json, json!({"temperature": 25.0}));
}

#[tokio::test]
async fn test_humidity_endpoint() {
    let (server, _) = create_test_server();

    let response = server.get("/humidity").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json, json!({"humidity": 60.0}));
}

#[tokio::test]
async fn test_post_valid_payload() {
    let (server, state) = create_test_server();

    let response = server
        .post("/api/climate-data")
        .json(&json!({"temperature": 22.5, "humidity": 48.0}))
        .await;

    response.assert_status(StatusCode::CREATED);
    let json: Value = response.json();
    assert_eq!(json["temperature"], 22.5);
    assert_eq!(json["humidity"], 48.0);
    assert!(json["id"].as_i64().unwrap() > 0);
    assert!(json["recorded_at"].as_str().is_some());

    assert_eq!(state.store.count().unwrap(), 1);
}

#[tokio::test]
async fn test_post_preserves_given_timestamp() {
    let (server, _) = create_test_server();

    let response = server
        .post("/api/climate-data")
        .json(&json!({
            "temperature": 22.5,
            "humidity": 48.0,
            "recorded_at": "2024-05-01T12:00:00Z"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let json: Value = response.json();
    let recorded_at = DateTime::parse_from_rfc3339(json["recorded_at"].as_str().unwrap())
        .unwrap()
        .with_timezone(&Utc);
    let expected = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    assert_eq!(recorded_at, expected);
}

#[tokio::test]
async fn test_post_missing_field() {
    let (server, state) = create_test_server();

    let response = server
        .post("/api/climate-data")
        .json(&json!({"humidity": 48.0}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    let messages = json["temperature"].as_array().unwrap();
    assert!(!messages.is_empty());
    assert!(messages[0].as_str().unwrap().contains("required"));

    // Rejected payloads never reach the store
    assert_eq!(state.store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_post_wrong_typed_field() {
    let (server, state) = create_test_server();

    let response = server
        .post("/api/climate-data")
        .json(&json!({"temperature": "warm", "humidity": 48.0}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    let messages = json["temperature"].as_array().unwrap();
    assert!(messages[0].as_str().unwrap().contains("valid number"));

    assert_eq!(state.store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_post_humidity_out_of_range() {
    let (server, _) = create_test_server();

    let response = server
        .post("/api/climate-data")
        .json(&json!({"temperature": 22.5, "humidity": 120.0}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert!(json["humidity"].as_array().is_some());
}

#[tokio::test]
async fn test_post_non_object_payload() {
    let (server, state) = create_test_server();

    let response = server
        .post("/api/climate-data")
        .json(&json!([22.5, 48.0]))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert!(json["non_field_errors"].as_array().is_some());

    assert_eq!(state.store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_post_collects_all_field_errors() {
    let (server, _) = create_test_server();

    let response = server.post("/api/climate-data").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert!(json["temperature"].as_array().is_some());
    assert!(json["humidity"].as_array().is_some());
}

#[tokio::test]
async fn test_post_identical_payloads_create_distinct_records() {
    let (server, state) = create_test_server();

    let payload = json!({"temperature": 22.5, "humidity": 48.0});

    let first = server.post("/api/climate-data").json(&payload).await;
    first.assert_status(StatusCode::CREATED);
    let second = server.post("/api/climate-data").json(&payload).await;
    second.assert_status(StatusCode::CREATED);

    let first_id = first.json::<Value>()["id"].as_i64().unwrap();
    let second_id = second.json::<Value>()["id"].as_i64().unwrap();
    assert_ne!(first_id, second_id);

    assert_eq!(state.store.count().unwrap(), 2);
}

#[tokio::test]
async fn test_post_numeric_strings_accepted() {
    let (server, _) = create_test_server();

    let response = server
        .post("/api/climate-data")
        .json(&json!({"temperature": "25.5", "humidity": "60"}))
        .await;

    response.assert_status(StatusCode::CREATED);
    let json: Value = response.json();
    assert_eq!(json["temperature"], 25.5);
    assert_eq!(json["humidity"], 60.0);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (server, _) = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].as_str().is_some());
}

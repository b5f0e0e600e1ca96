//! Integration tests for the Home Store API
//!
//! These tests verify the complete request/response cycle for all endpoints
//! against a SQLite database in a temporary directory.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use home_store::db::{pool, Backend, SqliteHomes};
use home_store::{routes, AppState, Config, HomeStore};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

const USER: &str = "069a79f4-44e9-4726-a5be-fca90e38aaf5";

// =============================================================================
// Test Helpers
// =============================================================================

/// Create a test configuration
fn test_config() -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        database_type: Backend::Sqlite,
        database_path: "".to_string(), // Set per test
        database_url: None,
        database_max_connections: 1,
        allowed_origins: vec!["http://localhost:5173".to_string()],
        environment: "test".to_string(),
    }
}

/// Create a provisioned store in a temporary directory
async fn create_test_store(temp_dir: &TempDir) -> HomeStore {
    let db_path = temp_dir.path().join("test.db");
    let pool = pool::create_sqlite_pool(&db_path, 1)
        .await
        .expect("Failed to create test database");
    HomeStore::new(Arc::new(SqliteHomes::new(pool))).await
}

/// Create a test app router
fn create_test_app(store: HomeStore) -> Router {
    routes::router(AppState::new(store, test_config()))
}

/// Parse response body as JSON
async fn body_to_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a request with an optional JSON body
fn make_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send one request and return (status, json body)
async fn send(store: &HomeStore, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let response = create_test_app(store.clone())
        .oneshot(make_request(method, uri, body))
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

fn home_uri(name: &str) -> String {
    format!("/api/users/{}/homes/{}", USER, name)
}

async fn set_home(store: &HomeStore, name: &str, x: f64, y: f64, z: f64) -> (StatusCode, Value) {
    send(store, "POST", &home_uri(name), Some(json!({ "x": x, "y": y, "z": z }))).await
}

// =============================================================================
// Health Check Tests
// =============================================================================

#[tokio::test]
async fn test_health_check_reports_backend() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir).await;

    let (status, body) = send(&store, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "sqlite");
    assert_eq!(body["provisioned"], true);
    assert_eq!(body["environment"], "test");
}

#[tokio::test]
async fn test_health_check_degraded_when_unprovisioned() {
    let temp_dir = TempDir::new().unwrap();
    let pool = pool::create_sqlite_pool(temp_dir.path().join("test.db"), 1)
        .await
        .unwrap();
    pool.close().await;
    let store = HomeStore::new(Arc::new(SqliteHomes::new(pool))).await;

    let (status, body) = send(&store, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["provisioned"], false);

    // Storage calls still answer, with failure defaults
    let (status, body) = send(&store, "GET", &format!("/api/users/{}/limit", USER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["limit"], 3);
    assert_eq!(body["count"], 0);

    let (status, _) = set_home(&store, "base", 1.0, 2.0, 3.0).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// Home Tests
// =============================================================================

#[tokio::test]
async fn test_set_and_get_home() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir).await;

    let (status, body) = set_home(&store, "base", 12.5, 64.0, -7.25).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "base");

    let (status, body) = send(&store, "GET", &home_uri("base"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "name": "base", "x": 12.5, "y": 64.0, "z": -7.25 }));
}

#[tokio::test]
async fn test_get_missing_home_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir).await;

    let (status, body) = send(&store, "GET", &home_uri("nowhere"), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No such home: 'nowhere'");
}

#[tokio::test]
async fn test_set_home_rejects_invalid_name() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir).await;

    let long_name = "a".repeat(33);
    for name in ["bad%20name", "semi;colon", long_name.as_str()] {
        let (status, _) = set_home(&store, name, 0.0, 0.0, 0.0).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "name {:?}", name);
    }
    assert_eq!(store.count(USER).await, 0);
}

#[tokio::test]
async fn test_set_home_rejects_invalid_user() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir).await;

    let uri = format!("/api/users/{}/homes/base", "u".repeat(37));
    let (status, _) = send(&store, "POST", &uri, Some(json!({ "x": 0.0, "y": 0.0, "z": 0.0 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_set_home_does_not_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir).await;

    let (status, _) = set_home(&store, "base", 1.0, 2.0, 3.0).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = set_home(&store, "base", 9.0, 9.0, 9.0).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(&store, "GET", &home_uri("base"), None).await;
    assert_eq!(body["x"], 1.0);
}

#[tokio::test]
async fn test_delete_home() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir).await;

    set_home(&store, "base", 1.0, 2.0, 3.0).await;

    let (status, body) = send(&store, "DELETE", &home_uri("base"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = send(&store, "DELETE", &home_uri("base"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quota_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir).await;

    for name in ["base", "mine", "farm"] {
        let (status, _) = set_home(&store, name, 0.0, 64.0, 0.0).await;
        assert_eq!(status, StatusCode::CREATED, "home {}", name);
    }

    let (status, body) = set_home(&store, "lake", 0.0, 64.0, 0.0).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Home limit reached (3)");

    let uri = format!("/api/users/{}/limit", USER);
    let (status, body) = send(&store, "POST", &uri, Some(json!({ "action": "add", "amount": 2 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["previous"], 3);
    assert_eq!(body["limit"], 5);
    assert!(store.can_create_more(USER).await);

    let (status, body) = send(&store, "GET", &format!("/api/users/{}/homes", USER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["names"], json!(["base", "farm", "mine"]));

    let (status, _) = set_home(&store, "lake", 0.0, 64.0, 0.0).await;
    assert_eq!(status, StatusCode::CREATED);
}

// =============================================================================
// Listing Tests
// =============================================================================

#[tokio::test]
async fn test_list_homes_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir).await;

    let (status, body) = send(&store, "GET", &format!("/api/users/{}/homes", USER), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "page": 0, "pageCount": 1, "total": 0, "names": [] }));
}

#[tokio::test]
async fn test_list_homes_paginates() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir).await;
    store.set_limit(USER, -1).await;

    for i in 0..50 {
        let (status, _) = set_home(&store, &format!("home{:02}", i), 0.0, 0.0, 0.0).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let uri = format!("/api/users/{}/homes?page=1", USER);
    let (status, body) = send(&store, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["pageCount"], 2);
    assert_eq!(body["total"], 50);
    assert_eq!(
        body["names"],
        json!(["home45", "home46", "home47", "home48", "home49"])
    );
}

// =============================================================================
// Limit Tests
// =============================================================================

#[tokio::test]
async fn test_get_limit_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir).await;

    let (status, body) = send(&store, "GET", &format!("/api/users/{}/limit", USER), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "limit": 3, "count": 0, "unlimited": false }));
}

#[tokio::test]
async fn test_minus_limit_flags_overage() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir).await;

    set_home(&store, "base", 0.0, 0.0, 0.0).await;
    set_home(&store, "mine", 0.0, 0.0, 0.0).await;

    let uri = format!("/api/users/{}/limit", USER);
    let (status, body) = send(&store, "POST", &uri, Some(json!({ "action": "minus", "amount": 5 }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["limit"], 0);
    assert_eq!(body["count"], 2);
    assert_eq!(body["overLimit"], true);

    // Existing homes are kept
    assert_eq!(store.count(USER).await, 2);
}

#[tokio::test]
async fn test_adjust_unlimited_limit_has_no_effect() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir).await;
    store.set_limit(USER, -1).await;

    let uri = format!("/api/users/{}/limit", USER);
    let (status, _) = send(&store, "POST", &uri, Some(json!({ "action": "add", "amount": 1 }))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(store.get_limit(USER).await, -1);
}

#[tokio::test]
async fn test_adjust_limit_rejects_non_positive_amount() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir).await;

    let uri = format!("/api/users/{}/limit", USER);
    let (status, _) = send(&store, "POST", &uri, Some(json!({ "action": "add", "amount": 0 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.get_limit(USER).await, 3);
}

// =============================================================================
// Completion Tests
// =============================================================================

#[tokio::test]
async fn test_completions_include_home_names() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir).await;

    set_home(&store, "Depot", 0.0, 0.0, 0.0).await;
    set_home(&store, "base", 0.0, 0.0, 0.0).await;

    let uri = format!("/api/users/{}/completions?args=d", USER);
    let (status, body) = send(&store, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["delete", "Depot"]));

    let uri = format!("/api/users/{}/completions?args=tp,", USER);
    let (_, body) = send(&store, "GET", &uri, None).await;
    assert_eq!(body, json!(["base", "Depot"]));
}

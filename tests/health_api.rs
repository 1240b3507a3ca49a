//! Health, version and fallback routes.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use student_api::MemoryStorage;

use common::{create_test_app, error_code, get_json};

#[tokio::test]
async fn health_reports_static_connectivity_and_uptime() {
    let storage = Arc::new(MemoryStorage::new());
    let (status, body) = get_json(create_test_app(&storage), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["connected"], true);
    assert_eq!(body["database"]["type"], "memory");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["uptime"].as_str().unwrap().ends_with('s'));
    assert!(body["uptime_seconds"].is_u64());
    assert!(body["timestamp"].is_string());
    assert_eq!(body["system"]["os"], std::env::consts::OS);
    assert!(body["system"]["cpus"].as_u64().unwrap() >= 1);
}

#[tokio::test]
async fn version_reports_package_metadata() {
    let storage = Arc::new(MemoryStorage::new());
    let (status, body) = get_json(create_test_app(&storage), "/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "student-api");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let storage = Arc::new(MemoryStorage::new());
    let (status, body) = get_json(create_test_app(&storage), "/api/teachers").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "route_not_found");
}

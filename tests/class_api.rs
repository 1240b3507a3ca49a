//! HTTP behaviour of the /api/classes resource.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use student_api::MemoryStorage;

use common::{
    class_body, create_test_app, delete, error_code, get_json, post_json, post_raw, put_json,
    violation_fields,
};

#[tokio::test]
async fn create_and_read_class() {
    let storage = Arc::new(MemoryStorage::new());
    let (status, created) =
        post_json(create_test_app(&storage), "/api/classes", class_body("Math")).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, class) = get_json(create_test_app(&storage), &format!("/api/classes/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        class,
        json!({ "id": id, "name": "Math", "grade": "10", "section": "A", "teacher_name": "X" })
    );
}

#[tokio::test]
async fn update_replaces_name_and_keeps_resent_fields() {
    let storage = Arc::new(MemoryStorage::new());
    let (_, created) =
        post_json(create_test_app(&storage), "/api/classes", class_body("Math")).await;
    let uri = format!("/api/classes/{}", created["id"]);

    let (status, body) =
        put_json(create_test_app(&storage), &uri, class_body("Advanced Math")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Class updated successfully");

    let (_, class) = get_json(create_test_app(&storage), &uri).await;
    assert_eq!(class["name"], "Advanced Math");
    assert_eq!(class["grade"], "10");
    assert_eq!(class["section"], "A");
    assert_eq!(class["teacher_name"], "X");
}

#[tokio::test]
async fn deleted_class_is_not_found() {
    let storage = Arc::new(MemoryStorage::new());
    let body = class_body("Physics Laboratory");
    let (_, created) = post_json(create_test_app(&storage), "/api/classes", body).await;
    let uri = format!("/api/classes/{}", created["id"]);

    let (status, body) = delete(create_test_app(&storage), &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Class deleted successfully");

    let (status, body) = get_json(create_test_app(&storage), &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "not_found");

    let (status, body) = delete(create_test_app(&storage), &uri).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_code(&body), "not_found");
}

#[tokio::test]
async fn missing_fields_are_all_reported() {
    let storage = Arc::new(MemoryStorage::new());
    let (status, body) = post_json(
        create_test_app(&storage),
        "/api/classes",
        json!({ "name": "Computer Science Fundamentals", "section": "  " }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(violation_fields(&body), vec!["grade", "section", "teacher_name"]);
}

#[tokio::test]
async fn decode_failures_on_update() {
    let storage = Arc::new(MemoryStorage::new());
    let (_, created) =
        post_json(create_test_app(&storage), "/api/classes", class_body("Math")).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = common::send(
        create_test_app(&storage),
        axum::http::Method::PUT,
        &format!("/api/classes/{id}"),
        axum::body::Body::empty(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "empty_body");

    let (status, body) = post_raw(create_test_app(&storage), "/api/classes", "{\"name\":").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "malformed_body");
}

#[tokio::test]
async fn repeated_create_makes_distinct_records() {
    let storage = Arc::new(MemoryStorage::new());
    for _ in 0..3 {
        post_json(create_test_app(&storage), "/api/classes", class_body("Math")).await;
    }
    let (_, classes) = get_json(create_test_app(&storage), "/api/classes").await;
    let mut ids: Vec<i64> = classes
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

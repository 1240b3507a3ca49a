//! Shared helpers for driving the router in-process.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use student_api::{app_router, AppState, MemoryStorage};

/// Fresh router over the given storage. Build one per request; `oneshot`
/// consumes it.
pub fn create_test_app(storage: &Arc<MemoryStorage>) -> Router {
    app_router(AppState::new(Arc::clone(storage) as Arc<dyn student_api::Storage>))
}

pub async fn send(app: Router, method: Method, uri: &str, body: Body) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, Body::empty()).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Body::from(body.to_string())).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Body::from(body.to_string())).await
}

pub async fn delete(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, Body::empty()).await
}

pub async fn post_raw(app: Router, uri: &str, raw: &'static str) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Body::from(raw)).await
}

pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}

pub fn violation_fields(body: &Value) -> Vec<String> {
    body["error"]["details"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v["field"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

pub fn student_body(name: &str, email: &str, age: i64) -> Value {
    serde_json::json!({ "name": name, "email": email, "age": age })
}

pub fn class_body(name: &str) -> Value {
    serde_json::json!({
        "name": name,
        "grade": "10",
        "section": "A",
        "teacher_name": "X"
    })
}

//! Response envelope helpers.

use crate::models::RecordId;
use axum::{http::StatusCode, Json};
use serde::Serialize;

pub const STATUS_OK: &str = "OK";
pub const STATUS_ERROR: &str = "Error";

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: RecordId,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub status: &'static str,
    pub message: String,
}

pub fn created(id: RecordId) -> (StatusCode, Json<Created>) {
    (StatusCode::CREATED, Json(Created { id }))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn message(text: impl Into<String>) -> (StatusCode, Json<Message>) {
    (
        StatusCode::OK,
        Json(Message {
            status: STATUS_OK,
            message: text.into(),
        }),
    )
}

pub fn error_body(code: &str, message: String) -> serde_json::Value {
    serde_json::json!({
        "status": STATUS_ERROR,
        "error": {
            "code": code,
            "message": message
        }
    })
}

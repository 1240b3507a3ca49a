//! Typed errors and HTTP mapping.

use crate::storage::StorageError;
use crate::validation::FieldViolation;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Failure to turn a request body into a payload. An empty body is kept apart
/// from an unparseable one so the two read differently in logs.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("empty body")]
    Empty,
    #[error("malformed body: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("validation failed: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),
    #[error("bad request: {0}")]
    BadRequest(String),
    /// The body could not be read, e.g. it exceeded the size limit.
    #[error("{message}")]
    Body { status: StatusCode, message: String },
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Storage failure while updating or deleting; NotFound included.
    #[error("write failed: {0}")]
    WriteFailed(StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl AppError {
    /// HTTP status and stable error code for this failure. A missing record
    /// is a 400 on read and a 500 on update or delete.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Decode(DecodeError::Empty) => (StatusCode::BAD_REQUEST, "empty_body"),
            AppError::Decode(DecodeError::Malformed(_)) => {
                (StatusCode::BAD_REQUEST, "malformed_body")
            }
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Body { status, .. } if *status == StatusCode::PAYLOAD_TOO_LARGE => {
                (*status, "payload_too_large")
            }
            AppError::Body { status, .. } => (*status, "unreadable_body"),
            AppError::Storage(StorageError::NotFound { .. }) => {
                (StatusCode::BAD_REQUEST, "not_found")
            }
            AppError::Storage(StorageError::Invalid { .. })
            | AppError::WriteFailed(StorageError::Invalid { .. }) => {
                (StatusCode::BAD_REQUEST, "invalid_record")
            }
            AppError::Storage(StorageError::Database(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error")
            }
            AppError::WriteFailed(StorageError::NotFound { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "not_found")
            }
            AppError::WriteFailed(StorageError::Database(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error")
            }
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldViolation>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, code, "request rejected");
        }
        let message = self.to_string();
        let details = match self {
            AppError::Validation(violations) => Some(violations),
            _ => None,
        };
        let body = ErrorBody {
            status: crate::response::STATUS_ERROR,
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}

//! Student CRUD handlers.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::StudentPayload;
use crate::response;
use crate::state::AppState;
use crate::validation::Validate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<StudentPayload>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("creating student");
    body.validate()?;
    let id = state.storage.create_student(&body).await?;
    tracing::info!(student_id = id, "student created");
    Ok(response::created(id))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(id = %id_str, "getting student");
    let id = parse_id(&id_str)?;
    let student = state.storage.get_student(id).await.map_err(|e| {
        tracing::error!(id, error = %e, "error getting student");
        e
    })?;
    Ok(response::ok(student))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    tracing::info!("getting all students");
    let students = state.storage.list_students().await?;
    Ok(response::ok(students))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody<StudentPayload>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(id = %id_str, "updating student");
    let id = parse_id(&id_str)?;
    body.validate()?;
    state.storage.update_student(id, &body).await.map_err(|e| {
        tracing::error!(id, error = %e, "error updating student");
        AppError::WriteFailed(e)
    })?;
    Ok(response::message("Student updated successfully"))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(id = %id_str, "deleting student");
    let id = parse_id(&id_str)?;
    state.storage.delete_student(id).await.map_err(|e| {
        tracing::error!(id, error = %e, "error deleting student");
        AppError::WriteFailed(e)
    })?;
    Ok(response::message("Student deleted successfully"))
}

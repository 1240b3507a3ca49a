//! Class CRUD handlers.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::ClassPayload;
use crate::response;
use crate::state::AppState;
use crate::validation::Validate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ClassPayload>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("creating class");
    body.validate()?;
    let id = state.storage.create_class(&body).await?;
    tracing::info!(class_id = id, "class created");
    Ok(response::created(id))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(id = %id_str, "getting class");
    let id = parse_id(&id_str)?;
    let class = state.storage.get_class(id).await.map_err(|e| {
        tracing::error!(id, error = %e, "error getting class");
        e
    })?;
    Ok(response::ok(class))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    tracing::info!("getting all classes");
    let classes = state.storage.list_classes().await?;
    Ok(response::ok(classes))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody<ClassPayload>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(id = %id_str, "updating class");
    let id = parse_id(&id_str)?;
    body.validate()?;
    state.storage.update_class(id, &body).await.map_err(|e| {
        tracing::error!(id, error = %e, "error updating class");
        AppError::WriteFailed(e)
    })?;
    Ok(response::message("Class updated successfully"))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(id = %id_str, "deleting class");
    let id = parse_id(&id_str)?;
    state.storage.delete_class(id).await.map_err(|e| {
        tracing::error!(id, error = %e, "error deleting class");
        AppError::WriteFailed(e)
    })?;
    Ok(response::message("Class deleted successfully"))
}

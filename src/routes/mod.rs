//! Route registration.

mod common;
mod resources;

pub use common::common_routes;
pub use resources::{class_routes, student_routes};

use crate::response::error_body;
use crate::state::AppState;
use axum::{http::StatusCode, response::IntoResponse, Json, Router};

/// Full API: common routes at the root, resources under `/api`.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest(
            "/api",
            Router::new()
                .merge(student_routes(state.clone()))
                .merge(class_routes(state)),
        )
        .fallback(route_not_found)
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(error_body("route_not_found", "no such route".into())),
    )
}

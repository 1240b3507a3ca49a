//! Student and class CRUD routes, mounted under `/api`.

use crate::handlers::{class, student};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn student_routes(state: AppState) -> Router {
    Router::new()
        .route("/students", get(student::list).post(student::create))
        .route(
            "/students/:id",
            get(student::read).put(student::update).delete(student::delete),
        )
        .with_state(state)
}

pub fn class_routes(state: AppState) -> Router {
    Router::new()
        .route("/classes", get(class::list).post(class::create))
        .route(
            "/classes/:id",
            get(class::read).put(class::update).delete(class::delete),
        )
        .with_state(state)
}

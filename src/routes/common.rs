//! Common routes: health and version.

use crate::handlers::health::{health, version};
use crate::state::AppState;
use axum::{routing::get, Router};

/// GET /health, GET /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .with_state(state)
}

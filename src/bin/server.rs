//! Student API server: reads config from the environment, prepares the
//! database, and serves until SIGINT/SIGTERM.

use axum::Router;
use std::sync::Arc;
use student_api::{
    app_router, apply_migrations, ensure_database_exists, AppConfig, AppState, PgStorage,
};
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("student_api=info,tower_http=info")),
        )
        .with_ansi(!config.is_production())
        .init();
    tracing::info!(env = %config.env, "starting student api");

    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;
    apply_migrations(&pool).await?;

    let state = AppState::new(Arc::new(PgStorage::new(pool.clone())));
    let app: Router = app_router(state)
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.http_addr).await?;
    tracing::info!("server started on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutting down the server");
    if tokio::time::timeout(config.shutdown_timeout, pool.close()).await.is_err() {
        tracing::error!("timed out closing database pool");
    }
    tracing::info!("server shutdown successfully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

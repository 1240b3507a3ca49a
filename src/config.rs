//! Process configuration from environment variables (after `.env`).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/student_api";
pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8082";
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `APP_ENV`, e.g. `development` or `production`.
    pub env: String,
    pub database_url: String,
    pub http_addr: SocketAddr,
    pub db_max_connections: u32,
    pub body_limit_bytes: usize,
    pub shutdown_timeout: Duration,
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let get = |key: &'static str| lookup(key).filter(|v: &String| !v.trim().is_empty());

        let http_addr_raw = get("HTTP_ADDR").unwrap_or_else(|| DEFAULT_HTTP_ADDR.into());
        let http_addr = http_addr_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: "HTTP_ADDR",
                reason: format!("'{}': {}", http_addr_raw, e),
            })?;

        let db_max_connections =
            parse_positive(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 5)?;
        let body_limit_bytes = parse_positive(
            get("BODY_LIMIT_BYTES"),
            "BODY_LIMIT_BYTES",
            DEFAULT_BODY_LIMIT_BYTES as u64,
        )?;
        let shutdown_secs =
            parse_positive(get("SHUTDOWN_TIMEOUT_SECS"), "SHUTDOWN_TIMEOUT_SECS", 5)?;

        Ok(Self {
            env: get("APP_ENV").unwrap_or_else(|| "development".into()),
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            http_addr,
            db_max_connections: u32::try_from(db_max_connections).map_err(|_| ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS",
                reason: "too large".into(),
            })?,
            body_limit_bytes: usize::try_from(body_limit_bytes).map_err(|_| ConfigError::Invalid {
                var: "BODY_LIMIT_BYTES",
                reason: "too large".into(),
            })?,
            shutdown_timeout: Duration::from_secs(shutdown_secs),
        })
    }

    /// Production logs are plain text without ANSI colour codes.
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

fn parse_positive(
    raw: Option<String>,
    var: &'static str,
    default: u64,
) -> Result<u64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::Invalid {
            var,
            reason: format!("expected a positive integer, got '{}'", raw),
        }),
    }
}

//! Liveness and version reporting.

use crate::state::AppState;
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub started_at: DateTime<Utc>,
    pub version: &'static str,
    pub uptime: String,
    pub uptime_seconds: u64,
    pub system: SystemInfo,
    pub database: DatabaseStatus,
}

/// Host facts available without extra dependencies.
#[derive(Debug, Serialize)]
pub struct SystemInfo {
    pub os: &'static str,
    pub arch: &'static str,
    pub cpus: usize,
}

impl SystemInfo {
    pub fn current() -> Self {
        Self {
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            cpus: std::thread::available_parallelism().map_or(1, usize::from),
        }
    }
}

/// Storage connectivity as last known. No query is issued; `connected` is
/// always true while the process is serving.
#[derive(Debug, Serialize)]
pub struct DatabaseStatus {
    pub connected: bool,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Serialize)]
pub struct VersionInfo {
    pub name: &'static str,
    pub version: &'static str,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let uptime = state.health.uptime();
    Json(HealthStatus {
        status: "healthy",
        timestamp: Utc::now(),
        started_at: state.health.started_at(),
        version: env!("CARGO_PKG_VERSION"),
        uptime: format_uptime(uptime),
        uptime_seconds: uptime.as_secs(),
        system: SystemInfo::current(),
        database: DatabaseStatus {
            connected: true,
            kind: state.storage.backend(),
        },
    })
}

pub async fn version() -> Json<VersionInfo> {
    Json(VersionInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Renders a duration as e.g. `2h3m7s`, dropping leading zero units.
pub fn format_uptime(d: Duration) -> String {
    let total = d.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    match (hours, minutes) {
        (0, 0) => format!("{}s", seconds),
        (0, _) => format!("{}m{}s", minutes, seconds),
        _ => format!("{}h{}m{}s", hours, minutes, seconds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_drops_leading_zero_units() {
        assert_eq!(format_uptime(Duration::from_secs(0)), "0s");
        assert_eq!(format_uptime(Duration::from_millis(42_900)), "42s");
        assert_eq!(format_uptime(Duration::from_secs(125)), "2m5s");
        assert_eq!(format_uptime(Duration::from_secs(3600 * 26 + 7)), "26h0m7s");
    }

    #[test]
    fn system_info_reports_at_least_one_cpu() {
        let info = SystemInfo::current();
        assert!(info.cpus >= 1);
        assert_eq!(info.os, std::env::consts::OS);
    }
}

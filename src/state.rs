//! Shared application state for all routes.

use crate::storage::Storage;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub health: HealthState,
}

impl AppState {
    /// Starts the uptime clock; build this once per process.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            health: HealthState::start(),
        }
    }
}

/// Process start time, captured when the state is built.
#[derive(Clone, Copy, Debug)]
pub struct HealthState {
    started: Instant,
    started_at: DateTime<Utc>,
}

impl HealthState {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            started_at: Utc::now(),
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }
}

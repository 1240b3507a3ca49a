//! Storage error types.

use crate::models::RecordId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// No row exists under the given identity.
    #[error("no {entity} found with id {id}")]
    NotFound { entity: &'static str, id: RecordId },

    /// The record failed a check the storage layer enforces on write.
    #[error("invalid {entity}: {reason}")]
    Invalid { entity: &'static str, reason: String },

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    pub fn not_found(entity: &'static str, id: RecordId) -> Self {
        StorageError::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

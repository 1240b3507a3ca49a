//! HTTP handlers: student and class CRUD, health and version.

pub mod class;
pub mod health;
pub mod student;

use crate::error::AppError;
use crate::models::RecordId;

/// Parses a `{id}` path segment. Runs before any storage call.
pub(crate) fn parse_id(id_str: &str) -> Result<RecordId, AppError> {
    id_str
        .trim()
        .parse::<RecordId>()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers_only() {
        assert_eq!(parse_id("17").unwrap(), 17);
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_id("1.5"), Err(AppError::BadRequest(_))));
    }
}

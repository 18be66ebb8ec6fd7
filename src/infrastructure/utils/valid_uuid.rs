use uuid::Uuid;

use crate::errors::AppError;

/// Parses a path identifier. A malformed id cannot match any record, so it
/// is reported the same way as a missing one.
pub fn valid_uuid(id: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::NotFound(format!("{what} not found")))
}

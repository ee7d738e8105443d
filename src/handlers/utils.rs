use uuid::Uuid;

use crate::database::DatabaseError;
use crate::error::ApiError;

/// Parse a path id. A malformed id cannot name a stored row, so it reads as
/// not found rather than as a validation failure.
pub fn parse_id(raw: &str, not_found: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(not_found))
}

/// Map a store-level unique violation (a lost race with a concurrent write)
/// to the same conflict message the pre-check would have produced.
pub fn conflict_as(message: &'static str) -> impl Fn(DatabaseError) -> ApiError {
    move |err| match err {
        DatabaseError::UniqueViolation(_) => ApiError::conflict(message),
        other => other.into(),
    }
}

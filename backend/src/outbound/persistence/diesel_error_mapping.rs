//! Shared Diesel error mapping for the repository adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// How a Diesel failure should surface through a port error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DieselFailure {
    /// The connection dropped mid-operation.
    Connection(&'static str),
    /// A `UNIQUE` constraint rejected the write.
    UniqueViolation,
    /// Anything else.
    Query(&'static str),
}

/// Classify a Diesel error, logging its detail at debug level.
pub(super) fn classify_diesel_error(error: &DieselError) -> DieselFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DieselFailure::UniqueViolation
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error")
        }
        DieselError::DeserializationError(_) => DieselFailure::Query("row decoding failed"),
        _ => DieselFailure::Query("database error"),
    }
}

//! SQL storage error mapping.

use sqlx::Error as SqlxError;
use wicket_storage::StorageError;

/// Converts a `sqlx` error to a storage error.
///
/// Unique constraint violations (PostgreSQL error code 23505) become
/// `StorageError::Duplicate` so callers can treat a lost registration
/// race as a normal outcome rather than an infrastructure fault.
#[allow(clippy::needless_pass_by_value)]
pub fn from_sqlx_error(err: SqlxError, email: &str) -> StorageError {
    match err {
        SqlxError::Database(db_err) => {
            if db_err.code().is_some_and(|c| c == "23505") {
                StorageError::duplicate(email)
            } else {
                StorageError::Query(db_err.to_string())
            }
        }
        SqlxError::PoolTimedOut => {
            StorageError::Connection("connection pool timeout".to_string())
        }
        SqlxError::PoolClosed => StorageError::Connection("connection pool closed".to_string()),
        SqlxError::Io(io_err) => StorageError::Connection(io_err.to_string()),
        _ => StorageError::Internal(err.to_string()),
    }
}

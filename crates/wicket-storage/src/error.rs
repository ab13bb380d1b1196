//! Storage error types.

use thiserror::Error;

/// Errors that can occur during storage operations.
///
/// A missing record is *not* an error: lookups return `Ok(None)`.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Unique constraint violation: an identity with this email already
    /// exists. This is the sole serialization point for concurrent
    /// registrations of the same email.
    #[error("identity '{email}' already exists")]
    Duplicate {
        /// The conflicting email address.
        email: String,
    },

    /// The persistence layer could not be reached.
    #[error("storage connection error: {0}")]
    Connection(String),

    /// A query failed for a reason other than a constraint violation.
    #[error("storage query error: {0}")]
    Query(String),

    /// Internal storage error.
    #[error("internal storage error: {0}")]
    Internal(String),
}

impl StorageError {
    /// Creates a duplicate error for the given email.
    #[must_use]
    pub fn duplicate(email: impl Into<String>) -> Self {
        Self::Duplicate {
            email: email.into(),
        }
    }

    /// Checks if this is a duplicate error.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Checks if this error means the store itself is unavailable, as
    /// opposed to a per-record outcome. Callers must not interpret these
    /// as "identity not found".
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Query(_) | Self::Internal(_)
        )
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

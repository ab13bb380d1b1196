//! Identity storage provider trait.

use async_trait::async_trait;
use wicket_model::Identity;

use crate::error::StorageResult;

/// Provider for identity storage operations.
///
/// Implementations must be thread-safe and support concurrent access.
/// The create path must be atomic with respect to the uniqueness of the
/// email: two concurrent creates for the same email must produce exactly
/// one stored record and one [`StorageError::Duplicate`].
///
/// [`StorageError::Duplicate`]: crate::StorageError::Duplicate
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Looks up an identity by email.
    ///
    /// Absence is a normal result, not a failure: returns `Ok(None)` when
    /// no record exists for `email`.
    async fn find_by_email(&self, email: &str) -> StorageResult<Option<Identity>>;

    /// Persists a new identity.
    ///
    /// The insert is all-or-nothing; no partially-written record is ever
    /// observable.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Duplicate` if an identity with the same
    /// email already exists.
    async fn create(&self, identity: &Identity) -> StorageResult<()>;
}

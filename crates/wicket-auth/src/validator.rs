//! Credential validation.
//!
//! Orchestrates store lookup and hash verification to decide whether an
//! (email, secret) pair is valid. Unknown email and wrong secret are
//! collapsed into a single outcome so callers cannot probe which emails
//! are registered.

use std::sync::Arc;

use wicket_model::Identity;
use wicket_storage::IdentityProvider;

use crate::error::{AuthError, AuthResult};
use crate::password::PasswordHasher;

/// Validates credentials against stored identities.
pub struct CredentialValidator {
    identities: Arc<dyn IdentityProvider>,
    hasher: Arc<PasswordHasher>,
}

impl CredentialValidator {
    /// Creates a validator over the given store and hasher.
    #[must_use]
    pub fn new(identities: Arc<dyn IdentityProvider>, hasher: Arc<PasswordHasher>) -> Self {
        Self { identities, hasher }
    }

    /// Validates an (email, secret) pair.
    ///
    /// Verification runs on the blocking thread pool so the CPU-bound
    /// Argon2 work never stalls the async executor.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the email is unknown
    /// or the secret does not match, with no distinction between the
    /// two. Infrastructure faults surface as `StoreUnavailable` or
    /// `HashingUnavailable` and are never folded into a validation
    /// failure.
    pub async fn validate(&self, email: &str, secret: &str) -> AuthResult<Identity> {
        let identity = self
            .identities
            .find_by_email(email)
            .await
            .map_err(AuthError::StoreUnavailable)?;

        let Some(identity) = identity else {
            tracing::debug!(email, "login attempt for unknown identity");
            return Err(AuthError::InvalidCredentials);
        };

        let hasher = self.hasher.clone();
        let secret = secret.to_owned();
        let secret_hash = identity.secret_hash.clone();

        tokio::task::spawn_blocking(move || hasher.verify(&secret, &secret_hash))
            .await
            .map_err(|e| AuthError::HashingUnavailable(e.to_string()))??;

        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use wicket_storage::{MemoryIdentityProvider, StorageError};

    use super::*;
    use crate::password::PasswordPolicy;

    fn fast_hasher() -> Arc<PasswordHasher> {
        Arc::new(PasswordHasher::new(
            PasswordPolicy::new().memory_cost(1024).time_cost(1),
        ))
    }

    async fn store_with(email: &str, secret: &str, hasher: &PasswordHasher) -> Arc<MemoryIdentityProvider> {
        let store = Arc::new(MemoryIdentityProvider::new());
        let hash = hasher.hash(secret).unwrap();
        store
            .create(&Identity::new(email, hash))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn valid_credentials_return_identity() {
        let hasher = fast_hasher();
        let store = store_with("a@x.com", "pw1", &hasher).await;
        let validator = CredentialValidator::new(store, hasher);

        let identity = validator.validate("a@x.com", "pw1").await.unwrap();
        assert_eq!(identity.email, "a@x.com");
    }

    #[tokio::test]
    async fn wrong_secret_is_invalid() {
        let hasher = fast_hasher();
        let store = store_with("a@x.com", "pw1", &hasher).await;
        let validator = CredentialValidator::new(store, hasher);

        let err = validator.validate("a@x.com", "pw2").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unknown_email_is_indistinguishable_from_wrong_secret() {
        let hasher = fast_hasher();
        let store = store_with("a@x.com", "pw1", &hasher).await;
        let validator = CredentialValidator::new(store, hasher);

        let unknown = validator.validate("b@x.com", "pw1").await.unwrap_err();
        let mismatch = validator.validate("a@x.com", "bad").await.unwrap_err();

        assert_eq!(unknown.to_string(), mismatch.to_string());
    }

    #[tokio::test]
    async fn corrupt_stored_hash_is_not_a_validation_failure() {
        let hasher = fast_hasher();
        let store = Arc::new(MemoryIdentityProvider::new());
        store
            .create(&Identity::new("a@x.com", "corrupted"))
            .await
            .unwrap();
        let validator = CredentialValidator::new(store, hasher);

        let err = validator.validate("a@x.com", "pw1").await.unwrap_err();
        assert!(matches!(err, AuthError::HashingUnavailable(_)));
    }

    #[tokio::test]
    async fn store_fault_is_not_invalid_credentials() {
        struct FailingStore;

        #[async_trait::async_trait]
        impl IdentityProvider for FailingStore {
            async fn find_by_email(
                &self,
                _email: &str,
            ) -> Result<Option<Identity>, StorageError> {
                Err(StorageError::Connection("database down".to_string()))
            }

            async fn create(&self, _identity: &Identity) -> Result<(), StorageError> {
                Err(StorageError::Connection("database down".to_string()))
            }
        }

        let validator = CredentialValidator::new(Arc::new(FailingStore), fast_hasher());

        let err = validator.validate("a@x.com", "pw1").await.unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable(_)));
    }
}

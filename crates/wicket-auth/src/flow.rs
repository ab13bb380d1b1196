//! Registration flow.
//!
//! Ordering is fixed: the secret is hashed first, then the identity is
//! inserted. The store's uniqueness constraint is the only duplicate
//! check; there is no pre-flight lookup, so two concurrent registrations
//! for the same email race safely into exactly one winner.

use std::sync::Arc;

use wicket_model::Identity;
use wicket_storage::IdentityProvider;

use crate::error::{AuthError, AuthResult};
use crate::password::PasswordHasher;

/// Creates new identities from registration requests.
pub struct RegistrationFlow {
    identities: Arc<dyn IdentityProvider>,
    hasher: Arc<PasswordHasher>,
}

impl RegistrationFlow {
    /// Creates a registration flow over the given store and hasher.
    #[must_use]
    pub fn new(identities: Arc<dyn IdentityProvider>, hasher: Arc<PasswordHasher>) -> Self {
        Self { identities, hasher }
    }

    /// Registers a new identity.
    ///
    /// Hashing runs on the blocking thread pool and completes before the
    /// insert is attempted.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DuplicateIdentity` if an identity for `email`
    /// already exists; the stored record of the earlier registration is
    /// left untouched. Infrastructure faults surface as
    /// `HashingUnavailable` or `StoreUnavailable`.
    pub async fn register(&self, email: &str, secret: &str) -> AuthResult<Identity> {
        let hasher = self.hasher.clone();
        let secret = secret.to_owned();

        let secret_hash = tokio::task::spawn_blocking(move || hasher.hash(&secret))
            .await
            .map_err(|e| AuthError::HashingUnavailable(e.to_string()))??;

        let identity = Identity::new(email, secret_hash);
        self.identities.create(&identity).await?;

        tracing::info!(email, "registered new identity");
        Ok(identity)
    }
}

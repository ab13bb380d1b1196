//! In-memory identity provider.
//!
//! Backs tests and single-process deployments. State does not survive a
//! restart; durable deployments use the SQL provider instead.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use wicket_model::Identity;

use crate::error::{StorageError, StorageResult};
use crate::identity::IdentityProvider;

/// Identity provider backed by a process-local map.
///
/// The duplicate check happens under the write lock, so concurrent
/// creates for the same email serialize correctly: exactly one wins.
#[derive(Default)]
pub struct MemoryIdentityProvider {
    identities: RwLock<HashMap<String, Identity>>,
}

impl MemoryIdentityProvider {
    /// Creates an empty in-memory provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            identities: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the number of stored identities.
    pub async fn count(&self) -> usize {
        self.identities.read().await.len()
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn find_by_email(&self, email: &str) -> StorageResult<Option<Identity>> {
        Ok(self.identities.read().await.get(email).cloned())
    }

    async fn create(&self, identity: &Identity) -> StorageResult<()> {
        let mut identities = self.identities.write().await;

        // Check-then-insert must stay under one write lock.
        if identities.contains_key(&identity.email) {
            return Err(StorageError::duplicate(&identity.email));
        }

        identities.insert(identity.email.clone(), identity.clone());
        Ok(())
    }
}

//! Password hashing and verification using Argon2id.
//!
//! Hashes are PHC-formatted strings: the salt and cost parameters travel
//! inside the hash itself, so verification needs no separately stored
//! metadata. A fresh random salt is drawn on every call, which is why
//! hashing the same secret twice yields different outputs.

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as PhcError, PasswordHash, PasswordHasher as _,
        PasswordVerifier as _, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use crate::error::{AuthError, AuthResult};

/// Password hashing cost configuration.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// Memory cost in KiB.
    pub memory_cost: u32,
    /// Time cost (iterations).
    pub time_cost: u32,
    /// Parallelism factor.
    pub parallelism: u32,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        // OWASP recommended settings for Argon2id
        Self {
            memory_cost: 19 * 1024,
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl PasswordPolicy {
    /// Creates a policy with the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the memory cost in KiB.
    #[must_use]
    pub const fn memory_cost(mut self, kib: u32) -> Self {
        self.memory_cost = kib;
        self
    }

    /// Sets the time cost (iterations).
    #[must_use]
    pub const fn time_cost(mut self, iterations: u32) -> Self {
        self.time_cost = iterations;
        self
    }

    fn build_params(&self) -> Result<Params, argon2::Error> {
        Params::new(self.memory_cost, self.time_cost, self.parallelism, None)
    }
}

/// One-way hasher for user secrets.
pub struct PasswordHasher {
    policy: PasswordPolicy,
}

impl PasswordHasher {
    /// Creates a hasher with the given cost policy.
    #[must_use]
    pub const fn new(policy: PasswordPolicy) -> Self {
        Self { policy }
    }

    /// Creates a hasher with the default policy.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PasswordPolicy::default())
    }

    /// Hashes a secret with a fresh random salt.
    ///
    /// Returns the PHC-formatted hash string.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::HashingUnavailable` if the hashing
    /// infrastructure fails.
    pub fn hash(&self, secret: &str) -> AuthResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let params = self
            .policy
            .build_params()
            .map_err(|e| AuthError::HashingUnavailable(e.to_string()))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let hash = argon2
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| AuthError::HashingUnavailable(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Verifies a secret against a stored PHC hash.
    ///
    /// The comparison is constant-time with respect to where a mismatch
    /// occurs. Salt and cost are re-derived from the hash string.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on mismatch. Any other
    /// failure (malformed hash, parameter fault) is
    /// `AuthError::HashingUnavailable` — an infrastructure fault is
    /// never reported as a failed verification.
    pub fn verify(&self, secret: &str, secret_hash: &str) -> AuthResult<()> {
        let parsed_hash = PasswordHash::new(secret_hash)
            .map_err(|e| AuthError::HashingUnavailable(e.to_string()))?;

        // Argon2::default() can verify any Argon2 variant
        match Argon2::default().verify_password(secret.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(()),
            Err(PhcError::Password) => Err(AuthError::InvalidCredentials),
            Err(e) => Err(AuthError::HashingUnavailable(e.to_string())),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low-cost policy so the suite stays fast.
    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::new(PasswordPolicy::new().memory_cost(1024).time_cost(1))
    }

    #[test]
    fn hash_and_verify_round_trip() {
        let hasher = fast_hasher();
        let secret = "correct horse battery staple";

        let hash = hasher.hash(secret).unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify(secret, &hash).is_ok());
    }

    #[test]
    fn wrong_secret_is_invalid_credentials() {
        let hasher = fast_hasher();
        let hash = hasher.hash("right").unwrap();

        let err = hasher.verify("wrong", &hash).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn same_secret_hashes_differently_each_call() {
        let hasher = fast_hasher();

        let hash1 = hasher.hash("secret").unwrap();
        let hash2 = hasher.hash("secret").unwrap();

        // Fresh salt per call
        assert_ne!(hash1, hash2);

        // Both still verify
        assert!(hasher.verify("secret", &hash1).is_ok());
        assert!(hasher.verify("secret", &hash2).is_ok());
    }

    #[test]
    fn malformed_hash_is_infrastructure_fault_not_mismatch() {
        let hasher = fast_hasher();

        let err = hasher.verify("secret", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, AuthError::HashingUnavailable(_)));
    }

    #[test]
    fn hash_output_never_contains_plaintext() {
        let hasher = fast_hasher();
        let hash = hasher.hash("hunter2-plaintext").unwrap();

        assert!(!hash.contains("hunter2"));
    }
}

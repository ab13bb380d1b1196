//! Identity domain model.
//!
//! An identity is a registered user. The email address is the natural key;
//! there is no surrogate id. The record carries the salted one-way hash of
//! the user's secret, never the secret itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
///
/// Created exactly once, at successful registration. Within this system an
/// identity is never mutated or deleted afterwards (there is no
/// password-change flow).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Email address, unique, case-sensitive as stored.
    pub email: String,

    /// PHC-formatted one-way hash of the user's secret. The salt and cost
    /// parameters are embedded in the string itself.
    pub secret_hash: String,

    /// When the identity was registered.
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Creates a new identity from an email and an already-computed hash.
    ///
    /// Callers must hash the secret before constructing an identity; this
    /// type never sees plaintext.
    #[must_use]
    pub fn new(email: impl Into<String>, secret_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            secret_hash: secret_hash.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_holds_hash_not_secret() {
        let identity = Identity::new("a@x.com", "$argon2id$v=19$...");

        assert_eq!(identity.email, "a@x.com");
        assert!(identity.secret_hash.starts_with("$argon2id$"));
    }

    #[test]
    fn identity_serializes_round_trip() {
        let identity = Identity::new("a@x.com", "$argon2id$v=19$...");
        let json = serde_json::to_string(&identity).unwrap();
        let back: Identity = serde_json::from_str(&json).unwrap();

        assert_eq!(back, identity);
    }
}

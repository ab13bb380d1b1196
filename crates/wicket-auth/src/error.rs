//! Authentication error types.

use std::fmt;

use wicket_storage::StorageError;

/// Authentication operation errors.
#[derive(Debug)]
pub enum AuthError {
    /// The email is unknown or the secret does not match. The two cases
    /// are deliberately indistinguishable to the caller.
    InvalidCredentials,
    /// Registration attempted for an email that already has an identity.
    DuplicateIdentity {
        /// The email that already exists.
        email: String,
    },
    /// The hashing infrastructure failed (randomness unavailable,
    /// malformed stored hash, bad parameters). Never reported as an
    /// authentication failure.
    HashingUnavailable(String),
    /// The persistence layer is unreachable or failing. Never reported
    /// as an authentication failure.
    StoreUnavailable(StorageError),
}

impl AuthError {
    /// Checks if this is a recoverable validation outcome, as opposed to
    /// an infrastructure fault that must abort the request.
    #[must_use]
    pub const fn is_validation_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::DuplicateIdentity { .. }
        )
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::DuplicateIdentity { email } => {
                write!(f, "identity '{email}' already exists")
            }
            Self::HashingUnavailable(msg) => write!(f, "password hashing unavailable: {msg}"),
            Self::StoreUnavailable(err) => write!(f, "credential store unavailable: {err}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate { email } => Self::DuplicateIdentity { email },
            other => Self::StoreUnavailable(other),
        }
    }
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credentials_message_is_generic() {
        // No distinction between unknown email and wrong secret.
        let err = AuthError::InvalidCredentials;
        assert_eq!(err.to_string(), "invalid credentials");
    }

    #[test]
    fn storage_duplicate_becomes_duplicate_identity() {
        let err: AuthError = StorageError::duplicate("a@x.com").into();
        assert!(matches!(err, AuthError::DuplicateIdentity { .. }));
        assert!(err.is_validation_failure());
    }

    #[test]
    fn storage_connection_failure_is_not_a_validation_failure() {
        let err: AuthError = StorageError::Connection("down".to_string()).into();
        assert!(matches!(err, AuthError::StoreUnavailable(_)));
        assert!(!err.is_validation_failure());
    }
}

//! Session error types.

use thiserror::Error;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No session exists for the given token.
    #[error("session not found")]
    NotFound,

    /// The session exists but its lifetime has elapsed.
    #[error("session expired")]
    Expired,
}

impl SessionError {
    /// Checks if this error means the token no longer refers to a live
    /// session, whether missing or expired.
    #[must_use]
    pub const fn is_gone(&self) -> bool {
        matches!(self, Self::NotFound | Self::Expired)
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

//! Session model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The two authentication states a request can be in.
///
/// There is no logout transition: an `Authenticated` session becomes
/// `Anonymous` again only once it expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// No live session, or a live session with no bound identity.
    Anonymous,
    /// A live session bound to the given identity email.
    Authenticated(String),
}

impl AuthState {
    /// Checks if this state is authenticated.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns the bound email, if authenticated.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Authenticated(email) => Some(email),
            Self::Anonymous => None,
        }
    }
}

/// One browsing context, keyed in the store by its opaque token.
///
/// Holds only the bound identity's email. The identity record itself
/// (and in particular its secret hash) never enters the session payload;
/// callers re-fetch it from the credential store when they need it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Email of the bound identity, or `None` for an anonymous shell.
    pub identity: Option<String>,
    /// When the session was created.
    pub started_at: DateTime<Utc>,
    /// Absolute time after which the session is no longer valid.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a new session with the given lifetime.
    #[must_use]
    pub fn new(identity: Option<String>, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            identity,
            started_at: now,
            expires_at: now + lifetime,
        }
    }

    /// Checks if the session's lifetime has elapsed at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks if the session's lifetime has elapsed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Binds an identity to this session, upgrading an anonymous shell.
    pub fn bind(&mut self, email: impl Into<String>) {
        self.identity = Some(email.into());
    }

    /// The state this session resolves to at `now`.
    #[must_use]
    pub fn state_at(&self, now: DateTime<Utc>) -> AuthState {
        if self.is_expired_at(now) {
            return AuthState::Anonymous;
        }
        match &self.identity {
            Some(email) => AuthState::Authenticated(email.clone()),
            None => AuthState::Anonymous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_shell_is_anonymous() {
        let session = Session::new(None, Duration::hours(24));

        assert!(!session.is_expired());
        assert_eq!(session.state_at(Utc::now()), AuthState::Anonymous);
    }

    #[test]
    fn bound_session_is_authenticated() {
        let mut session = Session::new(None, Duration::hours(24));
        session.bind("a@x.com");

        let state = session.state_at(Utc::now());
        assert!(state.is_authenticated());
        assert_eq!(state.email(), Some("a@x.com"));
    }

    #[test]
    fn expiry_boundary_is_exact() {
        let session = Session::new(Some("a@x.com".to_string()), Duration::hours(24));

        let just_before = session.expires_at - Duration::seconds(1);
        let at_expiry = session.expires_at;

        assert_eq!(
            session.state_at(just_before),
            AuthState::Authenticated("a@x.com".to_string())
        );
        // At T+L and beyond the session resolves as anonymous.
        assert_eq!(session.state_at(at_expiry), AuthState::Anonymous);
        assert_eq!(
            session.state_at(at_expiry + Duration::days(1)),
            AuthState::Anonymous
        );
    }

    #[test]
    fn expired_unbound_shell_is_anonymous_too() {
        let session = Session::new(None, Duration::zero());
        assert_eq!(session.state_at(Utc::now()), AuthState::Anonymous);
    }
}

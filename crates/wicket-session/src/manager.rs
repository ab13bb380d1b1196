//! Session manager.
//!
//! Owns the session store exclusively. All mutation goes through the
//! methods here; the store is the synchronization boundary between
//! concurrent requests.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use crate::error::{SessionError, SessionResult};
use crate::session::{AuthState, Session};
use crate::token::generate_token;

/// Fixed session lifetime in hours. A configuration constant, not
/// negotiated per call.
const SESSION_LIFETIME_HOURS: i64 = 24;

/// Issues, resolves, and expires sessions.
///
/// Expiry is lazy: an expired session resolves as anonymous even while
/// it still occupies the store. [`SessionManager::remove_expired`] is an
/// optional sweep, not required for correctness.
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Session>>,
    lifetime: Duration,
}

impl SessionManager {
    /// Creates a manager with the fixed 24-hour session lifetime.
    #[must_use]
    pub fn new() -> Self {
        Self::with_lifetime(Duration::hours(SESSION_LIFETIME_HOURS))
    }

    /// Creates a manager with a custom lifetime.
    #[must_use]
    pub fn with_lifetime(lifetime: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            lifetime,
        }
    }

    /// Creates a session, optionally already bound to an identity, and
    /// returns its opaque token.
    pub async fn create(&self, identity: Option<&str>) -> String {
        let token = generate_token();
        let session = Session::new(identity.map(str::to_owned), self.lifetime);

        self.sessions.write().await.insert(token.clone(), session);
        token
    }

    /// Resolves a token to an authentication state.
    ///
    /// Unknown tokens, expired sessions, and unbound shells all resolve
    /// as [`AuthState::Anonymous`]; the expiry check happens here, at
    /// resolve time.
    pub async fn resolve(&self, token: &str) -> AuthState {
        let sessions = self.sessions.read().await;
        match sessions.get(token) {
            Some(session) => session.state_at(Utc::now()),
            None => AuthState::Anonymous,
        }
    }

    /// Checks whether a live (unexpired) session exists for the token,
    /// bound or not.
    pub async fn is_live(&self, token: &str) -> bool {
        self.sessions
            .read()
            .await
            .get(token)
            .is_some_and(|s| !s.is_expired())
    }

    /// Binds an identity to an existing session.
    ///
    /// The token the client already holds stays valid; login does not
    /// force a new token issuance.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFound` for unknown tokens and
    /// `SessionError::Expired` for sessions past their lifetime.
    pub async fn bind(&self, token: &str, email: &str) -> SessionResult<()> {
        let mut sessions = self.sessions.write().await;

        let session = sessions.get_mut(token).ok_or(SessionError::NotFound)?;
        if session.is_expired() {
            return Err(SessionError::Expired);
        }

        session.bind(email);
        Ok(())
    }

    /// Removes expired sessions from the store.
    ///
    /// Returns the number of sessions removed.
    pub async fn remove_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        before - sessions.len()
    }

    /// Returns the number of sessions currently in the store, expired
    /// ones included.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_token_resolves_anonymous() {
        let manager = SessionManager::new();
        assert_eq!(manager.resolve("no-such-token").await, AuthState::Anonymous);
    }

    #[tokio::test]
    async fn shell_then_bind_keeps_token() {
        let manager = SessionManager::new();

        let token = manager.create(None).await;
        assert_eq!(manager.resolve(&token).await, AuthState::Anonymous);

        manager.bind(&token, "a@x.com").await.unwrap();

        // Same token, now authenticated.
        assert_eq!(
            manager.resolve(&token).await,
            AuthState::Authenticated("a@x.com".to_string())
        );
    }

    #[tokio::test]
    async fn create_bound_session() {
        let manager = SessionManager::new();

        let token = manager.create(Some("a@x.com")).await;
        assert!(manager.resolve(&token).await.is_authenticated());
    }

    #[tokio::test]
    async fn expired_session_resolves_anonymous_without_eviction() {
        let manager = SessionManager::with_lifetime(Duration::zero());

        let token = manager.create(Some("a@x.com")).await;

        // Still in the store, but resolves as anonymous.
        assert_eq!(manager.count().await, 1);
        assert_eq!(manager.resolve(&token).await, AuthState::Anonymous);
    }

    #[tokio::test]
    async fn bind_on_expired_session_fails() {
        let manager = SessionManager::with_lifetime(Duration::zero());

        let token = manager.create(None).await;
        let err = manager.bind(&token, "a@x.com").await.unwrap_err();
        assert!(matches!(err, SessionError::Expired));
    }

    #[tokio::test]
    async fn bind_on_unknown_token_fails() {
        let manager = SessionManager::new();

        let err = manager.bind("missing", "a@x.com").await.unwrap_err();
        assert!(matches!(err, SessionError::NotFound));
    }

    #[tokio::test]
    async fn one_identity_many_sessions() {
        let manager = SessionManager::new();

        let t1 = manager.create(Some("a@x.com")).await;
        let t2 = manager.create(Some("a@x.com")).await;

        assert_ne!(t1, t2);
        assert!(manager.resolve(&t1).await.is_authenticated());
        assert!(manager.resolve(&t2).await.is_authenticated());
    }

    #[tokio::test]
    async fn sweep_removes_only_expired() {
        let expired = SessionManager::with_lifetime(Duration::zero());
        expired.create(None).await;
        expired.create(Some("a@x.com")).await;
        assert_eq!(expired.remove_expired().await, 2);
        assert_eq!(expired.count().await, 0);

        let live = SessionManager::new();
        live.create(Some("a@x.com")).await;
        assert_eq!(live.remove_expired().await, 0);
        assert_eq!(live.count().await, 1);
    }
}

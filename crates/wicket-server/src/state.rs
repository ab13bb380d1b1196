//! Application state management.
//!
//! The shared state passed to all request handlers: the credential
//! store, the authentication flows built over it, and the session
//! manager with its cookie signer.

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, CookieJar};
use wicket_auth::{CredentialValidator, PasswordHasher, RegistrationFlow};
use wicket_session::{AuthState, CookieSigner, SessionManager};
use wicket_storage::IdentityProvider;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "wicket_session";

/// Session cookie lifetime. Matches the server-side session lifetime.
const COOKIE_MAX_AGE: time::Duration = time::Duration::hours(24);

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Credential store.
    pub identities: Arc<dyn IdentityProvider>,
    /// Login credential validation.
    pub validator: Arc<CredentialValidator>,
    /// Registration flow.
    pub registration: Arc<RegistrationFlow>,
    /// Session store and lifecycle.
    pub sessions: Arc<SessionManager>,
    /// Signer for the cookie form of session tokens.
    pub signer: CookieSigner,
}

impl AppState {
    /// Creates the application state over a credential store.
    #[must_use]
    pub fn new(
        identities: Arc<dyn IdentityProvider>,
        hasher: Arc<PasswordHasher>,
        session_secret: &str,
    ) -> Self {
        Self {
            validator: Arc::new(CredentialValidator::new(identities.clone(), hasher.clone())),
            registration: Arc::new(RegistrationFlow::new(identities.clone(), hasher)),
            identities,
            sessions: Arc::new(SessionManager::new()),
            signer: CookieSigner::new(session_secret),
        }
    }

    /// Extracts the verified session token from the request's cookies.
    ///
    /// Returns `None` when the cookie is absent, its signature does not
    /// check out, or no live session exists for the token.
    pub async fn session_token(&self, jar: &CookieJar) -> Option<String> {
        let cookie = jar.get(SESSION_COOKIE)?;
        let token = self.signer.verify(cookie.value())?;

        if self.sessions.is_live(&token).await {
            Some(token)
        } else {
            None
        }
    }

    /// Resolves the request's cookies to an authentication state.
    pub async fn auth_state(&self, jar: &CookieJar) -> AuthState {
        match self.session_token(jar).await {
            Some(token) => self.sessions.resolve(&token).await,
            None => AuthState::Anonymous,
        }
    }

    /// Returns the request's live session, creating an anonymous shell
    /// (and setting the cookie) if there is none.
    ///
    /// The returned jar carries any newly issued cookie and must be
    /// included in the response.
    pub async fn establish_session(&self, jar: CookieJar) -> (CookieJar, String) {
        if let Some(token) = self.session_token(&jar).await {
            return (jar, token);
        }

        let token = self.sessions.create(None).await;
        let cookie = Cookie::build((SESSION_COOKIE, self.signer.sign(&token)))
            .path("/")
            .http_only(true)
            .max_age(COOKIE_MAX_AGE)
            .build();

        (jar.add(cookie), token)
    }
}

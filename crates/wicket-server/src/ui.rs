//! Page handlers.
//!
//! Registration and login are form posts; outcomes are communicated as
//! redirects, per-page error text is intentionally absent. Validation
//! failures (duplicate email, wrong credentials) redirect back to the
//! form they came from; infrastructure faults abort the request with a
//! server error instead of masquerading as a failed login.

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use wicket_auth::AuthError;
use wicket_session::AuthState;

use crate::state::AppState;

/// Public landing page template.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate;

/// Login form template.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate;

/// Registration form template.
#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate;

/// Protected page template.
#[derive(Template)]
#[template(path = "secrets.html")]
pub struct SecretsTemplate {
    /// Email of the authenticated identity.
    pub email: String,
}

/// Form data for registration and login submissions.
///
/// The `username` field carries the email address; the field name
/// matches what the forms post.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    /// Email address.
    pub username: String,
    /// Plaintext secret. Never logged.
    pub password: String,
}

fn render_page<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("template render error: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
        }
    }
}

fn server_error(context: &str, err: &dyn std::fmt::Display) -> Response {
    tracing::error!("{context}: {err}");
    (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
}

/// Shows the public landing page.
pub async fn home(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Response) {
    let (jar, _token) = state.establish_session(jar).await;
    (jar, render_page(&HomeTemplate))
}

/// Shows the login form, or the protected page if already logged in.
pub async fn login_page(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Response) {
    let (jar, token) = state.establish_session(jar).await;

    let page = match state.sessions.resolve(&token).await {
        AuthState::Authenticated(email) => render_page(&SecretsTemplate { email }),
        AuthState::Anonymous => render_page(&LoginTemplate),
    };
    (jar, page)
}

/// Shows the registration form.
pub async fn register_page(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Response) {
    let (jar, _token) = state.establish_session(jar).await;
    (jar, render_page(&RegisterTemplate))
}

/// Shows the protected page, or redirects anonymous callers to login.
pub async fn secrets_page(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Response) {
    let (jar, token) = state.establish_session(jar).await;

    let page = match state.sessions.resolve(&token).await {
        AuthState::Authenticated(email) => render_page(&SecretsTemplate { email }),
        AuthState::Anonymous => Redirect::to("/login").into_response(),
    };
    (jar, page)
}

/// Handles registration form submission.
pub async fn register_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> (CookieJar, Response) {
    let (jar, token) = state.establish_session(jar).await;

    let identity = match state.registration.register(&form.username, &form.password).await {
        Ok(identity) => identity,
        Err(AuthError::DuplicateIdentity { email }) => {
            tracing::debug!(email, "registration rejected, identity exists");
            return (jar, Redirect::to("/register").into_response());
        }
        Err(e) => return (jar, server_error("registration failed", &e)),
    };

    // The client keeps the token it already holds.
    if let Err(e) = state.sessions.bind(&token, &identity.email).await {
        return (jar, server_error("session bind failed", &e));
    }

    (jar, Redirect::to("/secrets").into_response())
}

/// Handles login form submission.
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> (CookieJar, Response) {
    let (jar, token) = state.establish_session(jar).await;

    let identity = match state.validator.validate(&form.username, &form.password).await {
        Ok(identity) => identity,
        Err(AuthError::InvalidCredentials) => {
            // Deliberately the same outcome for unknown email and wrong
            // secret.
            tracing::debug!("login rejected");
            return (jar, Redirect::to("/login").into_response());
        }
        Err(e) => return (jar, server_error("login failed", &e)),
    };

    if let Err(e) = state.sessions.bind(&token, &identity.email).await {
        return (jar, server_error("session bind failed", &e));
    }

    (jar, Redirect::to("/secrets").into_response())
}

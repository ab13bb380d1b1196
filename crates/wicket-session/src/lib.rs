//! # wicket-session
//!
//! Server-side session management for the wicket authentication gateway.
//!
//! The [`SessionManager`] owns the session store exclusively: clients
//! hold only an opaque token, never session content. A session starts as
//! an anonymous shell, gains a bound identity on successful login or
//! registration, and reverts to anonymous only by expiring. Expiry is
//! checked lazily at resolve time.
//!
//! Tokens leave the process wrapped in an HMAC-signed cookie value (see
//! [`token::CookieSigner`]), so a tampered cookie resolves as anonymous
//! instead of reaching the store.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod error;
pub mod manager;
pub mod session;
pub mod token;

pub use error::{SessionError, SessionResult};
pub use manager::SessionManager;
pub use session::{AuthState, Session};
pub use token::CookieSigner;

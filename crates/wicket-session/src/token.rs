//! Session token generation and cookie signing.
//!
//! Tokens are 32 alphanumeric characters (~190 bits of entropy) drawn
//! from the thread-local CSPRNG. The value handed to the client is
//! `token.tag` where `tag` is a base64url-encoded HMAC-SHA256 over the
//! token, keyed with the configured session secret. Verification fails
//! closed: anything unsigned, tampered, or malformed is rejected before
//! the store is consulted.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use rand::distr::{Alphanumeric, SampleString};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Length of a session token in characters.
pub const TOKEN_LEN: usize = 32;

/// Generates a fresh opaque session token.
#[must_use]
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    Alphanumeric.sample_string(&mut rng, TOKEN_LEN)
}

/// Signs and verifies the cookie form of a session token.
#[derive(Clone)]
pub struct CookieSigner {
    key: Vec<u8>,
}

impl CookieSigner {
    /// Creates a signer keyed with the session secret.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
        }
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC accepts keys of any length.
        HmacSha256::new_from_slice(&self.key).expect("HMAC key of any length is accepted")
    }

    /// Produces the signed cookie value for a token.
    #[must_use]
    pub fn sign(&self, token: &str) -> String {
        let mut mac = self.mac();
        mac.update(token.as_bytes());
        let tag = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        format!("{token}.{tag}")
    }

    /// Extracts the token from a signed cookie value.
    ///
    /// Returns `None` for missing separators, undecodable tags, and tag
    /// mismatches alike; the tag comparison itself is constant-time.
    #[must_use]
    pub fn verify(&self, cookie_value: &str) -> Option<String> {
        let (token, tag) = cookie_value.split_once('.')?;
        let tag = URL_SAFE_NO_PAD.decode(tag).ok()?;

        let mut mac = self.mac();
        mac.update(token.as_bytes());
        mac.verify_slice(&tag).ok()?;

        Some(token.to_string())
    }
}

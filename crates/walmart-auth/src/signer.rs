//! Signer trait and implementations.
//!
//! A [`RequestSigner`] turns a string to sign into the value of the
//! `WM_SEC.AUTH_SIGNATURE` header. Implementations may hold key material in
//! memory, call out to an HSM, or return a canned value.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, KeyInit, Mac};
use sha2::Sha256;

use crate::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// Produces request signatures.
pub trait RequestSigner: Send + Sync + fmt::Debug {
    /// Sign `string_to_sign` and return the header value.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the key material cannot be used.
    fn sign(&self, string_to_sign: &str) -> Result<String, AuthError>;
}

/// Signs with `Base64(HMAC-SHA256(secret, StringToSign))`.
#[derive(Clone)]
pub struct HmacSha256Signer {
    secret: Vec<u8>,
}

impl HmacSha256Signer {
    /// Create a signer from a shared secret.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }
}

impl fmt::Debug for HmacSha256Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSha256Signer")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl RequestSigner for HmacSha256Signer {
    fn sign(&self, string_to_sign: &str) -> Result<String, AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::MissingCredential("privateKey"));
        }
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|err| AuthError::InvalidKey(err.to_string()))?;
        mac.update(string_to_sign.as_bytes());
        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }
}

/// Returns the same signature for every request.
///
/// Used by the mock environment, where nothing leaves the process.
#[derive(Debug, Clone)]
pub struct StaticSigner {
    signature: String,
}

impl StaticSigner {
    /// Create a signer that always returns `signature`.
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
        }
    }
}

impl RequestSigner for StaticSigner {
    fn sign(&self, _string_to_sign: &str) -> Result<String, AuthError> {
        Ok(self.signature.clone())
    }
}

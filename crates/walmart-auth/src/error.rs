//! Error types for request signing.

use walmart_core::MarketplaceError;

/// Errors that can occur while signing a request.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A credential needed to sign is empty.
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    /// The signing key cannot be used by the signer.
    #[error("Invalid signing key: {0}")]
    InvalidKey(String),
}

impl From<AuthError> for MarketplaceError {
    fn from(err: AuthError) -> Self {
        Self::Configuration(err.to_string())
    }
}

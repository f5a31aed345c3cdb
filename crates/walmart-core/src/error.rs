//! Error types for the Walmart Marketplace client.

/// Error type shared by every layer of the client.
///
/// Configuration and validation errors are raised before any network call and
/// are never retried. [`MarketplaceError::Transport`] carries the original HTTP
/// status and body of a non-2xx response.
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    /// Missing credentials, invalid environment selector or similar.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Empty or malformed caller-supplied arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// The input data does not fit the XML mapping schema.
    #[error("mapping error: {0}")]
    Mapping(String),

    /// The XML document could not be written.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The remote API answered with a non-2xx status.
    #[error("HTTP {status_code}: {body}")]
    Transport {
        /// HTTP status code of the response.
        status_code: u16,
        /// Raw response body.
        body: String,
    },

    /// The request never produced a response (connect failure, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// A service description failed validation or names an unknown operation.
    #[error("invalid service description: {0}")]
    Description(String),

    /// A 2xx response body could not be decoded.
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

impl MarketplaceError {
    /// Build a transport error from a status code and body.
    pub fn transport(status_code: u16, body: impl Into<String>) -> Self {
        Self::Transport {
            status_code,
            body: body.into(),
        }
    }

    /// HTTP status code, if this error came from a response.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Transport { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Whether this is a transport-level 404.
    ///
    /// List endpoints answer 404 when there is nothing to list.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

/// Convenience result type for client operations.
pub type MarketplaceResult<T> = Result<T, MarketplaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_detect_not_found() {
        assert!(MarketplaceError::transport(404, "").is_not_found());
        assert!(!MarketplaceError::transport(500, "boom").is_not_found());
        assert!(!MarketplaceError::Validation("x".into()).is_not_found());
    }

    #[test]
    fn test_should_format_transport_error_with_status_and_body() {
        let err = MarketplaceError::transport(503, "busy");
        assert_eq!(err.to_string(), "HTTP 503: busy");
        assert_eq!(err.status_code(), Some(503));
    }
}

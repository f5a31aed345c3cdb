//! The signed `WM_*` header set.

use chrono::{DateTime, Utc};
use http::Method;
use tracing::debug;
use uuid::Uuid;

use crate::canonical::string_to_sign;
use crate::error::AuthError;
use crate::signer::RequestSigner;

/// Service name header.
pub const WM_SVC_NAME: &str = "WM_SVC.NAME";
/// Per-request correlation id header.
pub const WM_QOS_CORRELATION_ID: &str = "WM_QOS.CORRELATION_ID";
/// Signing timestamp header (milliseconds since the epoch).
pub const WM_SEC_TIMESTAMP: &str = "WM_SEC.TIMESTAMP";
/// Signature header.
pub const WM_SEC_AUTH_SIGNATURE: &str = "WM_SEC.AUTH_SIGNATURE";
/// Consumer id header.
pub const WM_CONSUMER_ID: &str = "WM_CONSUMER.ID";
/// Channel type header.
pub const WM_CONSUMER_CHANNEL_TYPE: &str = "WM_CONSUMER.CHANNEL.TYPE";

/// Default `WM_SVC.NAME` value.
pub const DEFAULT_SERVICE_NAME: &str = "Walmart Marketplace";

/// Identity attached to every signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningContext {
    /// `WM_CONSUMER.ID`.
    pub consumer_id: String,
    /// `WM_CONSUMER.CHANNEL.TYPE`.
    pub channel_type: String,
    /// `WM_SVC.NAME`.
    pub service_name: String,
    /// `Accept` header.
    pub accept: String,
}

impl SigningContext {
    /// Context with the default service name and `Accept: application/json`.
    pub fn new(consumer_id: impl Into<String>, channel_type: impl Into<String>) -> Self {
        Self {
            consumer_id: consumer_id.into(),
            channel_type: channel_type.into(),
            service_name: DEFAULT_SERVICE_NAME.to_owned(),
            accept: "application/json".to_owned(),
        }
    }

    /// Override the `Accept` header.
    #[must_use]
    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = accept.into();
        self
    }
}

/// Headers produced by [`sign_request`], in a fixed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedHeaders(Vec<(&'static str, String)>);

impl SignedHeaders {
    /// Value of header `name`, matched case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Iterate `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Sign one request and return its full `WM_*` header set.
///
/// # Errors
///
/// Returns [`AuthError::MissingCredential`] if the consumer id or channel type
/// is empty, or whatever the signer reports.
pub fn sign_request(
    signer: &dyn RequestSigner,
    context: &SigningContext,
    method: &Method,
    url: &str,
    timestamp: DateTime<Utc>,
    correlation_id: Uuid,
) -> Result<SignedHeaders, AuthError> {
    if context.consumer_id.is_empty() {
        return Err(AuthError::MissingCredential("consumerId"));
    }
    if context.channel_type.is_empty() {
        return Err(AuthError::MissingCredential("wmConsumerChannelType"));
    }

    let timestamp_ms = timestamp.timestamp_millis();
    let to_sign = string_to_sign(&context.consumer_id, url, method, timestamp_ms);
    let signature = signer.sign(&to_sign)?;

    debug!(
        consumer_id = %context.consumer_id,
        method = %method,
        url = %url,
        correlation_id = %correlation_id,
        "Signed request"
    );

    Ok(SignedHeaders(vec![
        (WM_SVC_NAME, context.service_name.clone()),
        (WM_QOS_CORRELATION_ID, correlation_id.to_string()),
        (WM_SEC_TIMESTAMP, timestamp_ms.to_string()),
        (WM_SEC_AUTH_SIGNATURE, signature),
        (WM_CONSUMER_ID, context.consumer_id.clone()),
        (WM_CONSUMER_CHANNEL_TYPE, context.channel_type.clone()),
        ("Accept", context.accept.clone()),
    ]))
}

/// [`sign_request`] with the current time and a fresh correlation id.
pub fn sign_request_now(
    signer: &dyn RequestSigner,
    context: &SigningContext,
    method: &Method,
    url: &str,
) -> Result<SignedHeaders, AuthError> {
    sign_request(signer, context, method, url, Utc::now(), Uuid::new_v4())
}

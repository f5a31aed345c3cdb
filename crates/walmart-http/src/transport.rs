//! Transports: the part of the client that actually talks to the network.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use walmart_core::{MarketplaceError, MarketplaceResult, RequestBody};

/// A signed request ready to go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// HTTP method.
    pub method: Method,
    /// Full URL including the query string.
    pub url: String,
    /// Signed and operation headers.
    pub headers: Vec<(String, String)>,
    /// Body.
    pub body: RequestBody,
}

impl OutboundRequest {
    /// Path component of the URL, without scheme, host or query.
    #[must_use]
    pub fn path(&self) -> &str {
        let after_scheme = self
            .url
            .split_once("://")
            .map_or(self.url.as_str(), |(_, rest)| rest);
        let path = after_scheme
            .find('/')
            .map_or("/", |idx| &after_scheme[idx..]);
        path.split_once('?').map_or(path, |(p, _)| p)
    }

    /// Value of header `name`, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An undecoded HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Status code.
    pub status: u16,
    /// `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Body bytes.
    pub body: Bytes,
}

impl RawResponse {
    /// A response with an arbitrary body.
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type: content_type.map(str::to_owned),
            body: body.into(),
        }
    }

    /// An `application/json` response.
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, Some("application/json"), body.to_string())
    }

    /// An `application/xml` response.
    pub fn xml(status: u16, body: impl Into<String>) -> Self {
        Self::new(status, Some("application/xml"), body.into())
    }

    /// A bodiless response.
    #[must_use]
    pub fn empty(status: u16) -> Self {
        Self::new(status, None, Bytes::new())
    }
}

/// Sends one request and returns the raw response.
///
/// Any HTTP status is a successful send; only failures to obtain a response
/// (connection errors, timeouts) are errors, reported as
/// [`MarketplaceError::Network`].
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Send `request`.
    async fn send(&self, request: OutboundRequest) -> MarketplaceResult<RawResponse>;
}

/// A [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a per-request timeout.
    pub fn new(timeout: Duration) -> MarketplaceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                MarketplaceError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: OutboundRequest) -> MarketplaceResult<RawResponse> {
        let mut builder = self.client.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Xml(xml) => builder
                .header(http::header::CONTENT_TYPE, "application/xml")
                .body(xml),
            RequestBody::Multipart(file) => {
                let part = Part::bytes(file.content.to_vec())
                    .file_name(file.filename)
                    .mime_str(&file.content_type)
                    .map_err(|e| MarketplaceError::Serialization(e.to_string()))?;
                builder.multipart(Form::new().part(file.field_name, part))
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|e| MarketplaceError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response
            .bytes()
            .await
            .map_err(|e| MarketplaceError::Network(e.to_string()))?;

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

//! The description-driven HTTP command executor.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use walmart_auth::{
    HmacSha256Signer, RequestSigner, SigningContext, StaticSigner, sign_request_now,
};
use walmart_core::{
    ClientConfig, CommandExecutor, Environment, Envelope, MarketplaceError, MarketplaceResult,
    Params, ServiceDescription, prepare_request,
};

use crate::decode::decode_response;
use crate::mock::MockTransport;
use crate::retry::RetryPolicy;
use crate::transport::{OutboundRequest, RawResponse, ReqwestTransport, Transport};

/// Base URL used in the mock environment. Requests never leave the process.
pub const MOCK_BASE_URL: &str = "mock://marketplace";

/// Signature sent in the mock environment.
const MOCK_SIGNATURE: &str = "mock-signature";

/// Executes operations of one [`ServiceDescription`] over HTTP.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use walmart_core::{ClientConfig, Environment, Operation, ServiceDescription};
/// use walmart_http::HttpExecutor;
///
/// let config = ClientConfig::builder()
///     .consumer_id("consumer")
///     .private_key("secret")
///     .channel_type("channel")
///     .environment(Environment::Mock)
///     .build();
/// let description = ServiceDescription::new("feed", "v3")
///     .with_operation(Operation::new("List", Method::GET, "/{ApiVersion}/feeds"));
///
/// let executor = HttpExecutor::new(&config, description).unwrap();
/// assert_eq!(executor.base_url(), "mock://marketplace");
/// ```
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    description: ServiceDescription,
    base_url: String,
    transport: Arc<dyn Transport>,
    signer: Arc<dyn RequestSigner>,
    context: SigningContext,
    retry: RetryPolicy,
}

impl HttpExecutor {
    /// Build an executor for `description` from `config`.
    ///
    /// Applies the configured country to the description, validates both, and
    /// picks the transport: [`MockTransport`] in the mock environment,
    /// [`ReqwestTransport`] otherwise.
    pub fn new(config: &ClientConfig, description: ServiceDescription) -> MarketplaceResult<Self> {
        config.validate()?;

        let description = match config.country {
            Some(country) => description.with_country(country),
            None => description,
        };
        description.validate()?;

        let (base_url, transport, signer): (String, Arc<dyn Transport>, Arc<dyn RequestSigner>) =
            if config.environment == Environment::Mock {
                (
                    config.base_url.clone().unwrap_or_else(|| MOCK_BASE_URL.to_owned()),
                    Arc::new(MockTransport::new()),
                    Arc::new(StaticSigner::new(MOCK_SIGNATURE)),
                )
            } else {
                let base_url = config
                    .resolved_base_url()
                    .map(str::to_owned)
                    .or_else(|| description.base_url.clone())
                    .ok_or_else(|| {
                        MarketplaceError::Configuration(format!(
                            "no base URL for environment {}",
                            config.environment
                        ))
                    })?;
                let transport =
                    ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;
                (
                    base_url,
                    Arc::new(transport),
                    Arc::new(HmacSha256Signer::new(&config.private_key)),
                )
            };

        info!(
            service = %description.name,
            environment = %config.environment,
            base_url = %base_url,
            country = ?config.country,
            "Created marketplace executor"
        );

        Ok(Self {
            description,
            base_url,
            transport,
            signer,
            context: SigningContext::new(&config.consumer_id, &config.channel_type),
            retry: RetryPolicy::with_max_retries(config.max_retries),
        })
    }

    /// Replace the transport.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Replace the signer.
    #[must_use]
    pub fn with_signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = signer;
        self
    }

    /// Replace the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The effective (country-rewritten) description.
    #[must_use]
    pub fn description(&self) -> &ServiceDescription {
        &self.description
    }

    /// The base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send_with_retry(&self, request: &OutboundRequest) -> MarketplaceResult<RawResponse> {
        let mut attempt = 0;
        loop {
            let mut outbound = request.clone();
            let signed = sign_request_now(
                self.signer.as_ref(),
                &self.context,
                &outbound.method,
                &outbound.url,
            )?;
            outbound.headers.splice(
                0..0,
                signed.iter().map(|(k, v)| (k.to_owned(), v.to_owned())),
            );

            let result = self.transport.send(outbound).await;
            let retry_reason = match &result {
                Ok(response) if RetryPolicy::is_retryable_status(response.status) => {
                    Some(format!("HTTP {}", response.status))
                }
                Err(err) if RetryPolicy::is_retryable_error(err) => Some(err.to_string()),
                _ => None,
            };
            let Some(retry_reason) = retry_reason.filter(|_| self.retry.allows(attempt)) else {
                return result;
            };

            let delay = self.retry.delay_for(attempt);
            warn!(
                method = %request.method,
                url = %request.url,
                attempt = attempt + 1,
                max_retries = self.retry.max_retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                reason = %retry_reason,
                "Retrying request"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

#[async_trait]
impl CommandExecutor for HttpExecutor {
    async fn execute(&self, operation: &str, params: Params) -> MarketplaceResult<Envelope> {
        let prepared = prepare_request(&self.description, operation, params)?;
        let request = OutboundRequest {
            method: prepared.method.clone(),
            url: prepared.url(&self.base_url),
            headers: prepared.headers.clone(),
            body: prepared.body.clone(),
        };

        debug!(
            service = %self.description.name,
            operation,
            method = %request.method,
            url = %request.url,
            "Dispatching request"
        );

        let response = self.send_with_retry(&request).await?;
        let status = response.status;
        let result = decode_response(response, prepared.response_model);
        match &result {
            Ok(_) => debug!(operation, status, "Request succeeded"),
            Err(err) => debug!(operation, status, error = %err, "Request failed"),
        }
        result
    }
}

//! HTTP command execution for the Walmart Marketplace client.
//!
//! [`HttpExecutor`] implements [`walmart_core::CommandExecutor`] on top of a
//! [`ServiceDescription`](walmart_core::ServiceDescription): it prepares the
//! request, signs it with `walmart-auth`, sends it through a [`Transport`],
//! retries transient failures and decodes the body into an
//! [`Envelope`](walmart_core::Envelope).
//!
//! Two transports are provided:
//!
//! - [`ReqwestTransport`] for the production and staging gateways
//! - [`MockTransport`] for the mock environment and tests; it answers from
//!   registered routes and returns 404 for everything else

pub mod decode;
pub mod executor;
pub mod mock;
pub mod retry;
pub mod transport;

pub use decode::decode_response;
pub use executor::{HttpExecutor, MOCK_BASE_URL};
pub use mock::{MAX_RECORDED_REQUESTS, MockTransport};
pub use retry::RetryPolicy;
pub use transport::{OutboundRequest, RawResponse, ReqwestTransport, Transport};

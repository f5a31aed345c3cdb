//! The command execution boundary.

use async_trait::async_trait;

use crate::envelope::Envelope;
use crate::error::MarketplaceResult;
use crate::params::Params;

/// Executes a named operation of a service description.
///
/// Implementations own request construction, authentication headers, the
/// network round trip and response decoding. A non-2xx answer must surface as
/// [`MarketplaceError::Transport`](crate::MarketplaceError::Transport) so callers
/// can inspect the status.
///
/// ```
/// use async_trait::async_trait;
/// use serde_json::json;
/// use walmart_core::{CommandExecutor, Envelope, MarketplaceResult, Params};
///
/// struct Fixed;
///
/// #[async_trait]
/// impl CommandExecutor for Fixed {
///     async fn execute(&self, _: &str, _: Params) -> MarketplaceResult<Envelope> {
///         Ok(Envelope::from_body(200, json!({"feedId": "F-1"})))
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let envelope = Fixed.execute("Get", Params::new()).await.unwrap();
/// assert_eq!(envelope.status_code(), Some(200));
/// assert_eq!(envelope.get("feedId"), Some(&json!("F-1")));
/// # });
/// ```
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Execute `operation` with `params` and return the decoded envelope.
    async fn execute(&self, operation: &str, params: Params) -> MarketplaceResult<Envelope>;
}

//! End-to-end tests for the Walmart Marketplace client.
//!
//! The `mock` tests drive the façades through the real HTTP executor
//! (parameter validation, signing, decoding, pagination) against a scripted
//! [`MockTransport`]. They run with a plain `cargo test`.
//!
//! The `live` tests talk to the real API and are marked `#[ignore]`. Export
//! `WALMART_CONSUMER_ID`, `WALMART_PRIVATE_KEY` and `WALMART_CHANNEL_TYPE`
//! (optionally `WALMART_ENV=staging`) and run them with:
//! ```text
//! cargo test -p walmart-integration -- --ignored
//! ```

use std::sync::{Arc, Once};

use walmart_core::{ClientConfig, Country, Environment, ServiceDescription};
use walmart_http::{HttpExecutor, MockTransport, RetryPolicy};
use walmart_marketplace::{Feed, Item, Order, feed_description, item_description, order_description};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Configuration for the mock environment.
#[must_use]
pub fn mock_config() -> ClientConfig {
    init_tracing();
    ClientConfig::builder()
        .consumer_id("integration-consumer")
        .private_key("integration-secret")
        .channel_type("integration-channel")
        .environment(Environment::Mock)
        .build()
}

/// Mock configuration targeting the Canadian marketplace.
#[must_use]
pub fn canada_config() -> ClientConfig {
    let mut config = mock_config();
    config.country = Some(Country::Canada);
    config
}

/// Configuration read from the `WALMART_*` environment variables.
///
/// # Panics
///
/// When required variables are missing.
#[must_use]
pub fn live_config() -> ClientConfig {
    init_tracing();
    ClientConfig::from_env().unwrap_or_else(|e| panic!("live credentials: {e}"))
}

/// An executor for `description` that sends through `transport`, without
/// retry back-off.
///
/// # Panics
///
/// When `config` is rejected.
#[must_use]
pub fn mock_executor(
    config: &ClientConfig,
    description: ServiceDescription,
    transport: &MockTransport,
) -> Arc<HttpExecutor> {
    let executor = HttpExecutor::new(config, description)
        .unwrap_or_else(|e| panic!("executor: {e}"))
        .with_transport(Arc::new(transport.clone()))
        .with_retry_policy(RetryPolicy::none());
    Arc::new(executor)
}

/// Order façade over `transport`.
#[must_use]
pub fn mock_orders(config: &ClientConfig, transport: &MockTransport) -> Order {
    Order::with_executor(mock_executor(config, order_description(), transport))
}

/// Item façade over `transport`.
#[must_use]
pub fn mock_items(config: &ClientConfig, transport: &MockTransport) -> Item {
    Item::with_executor(mock_executor(config, item_description(), transport))
}

/// Feed façade over `transport`.
#[must_use]
pub fn mock_feeds(config: &ClientConfig, transport: &MockTransport) -> Feed {
    Feed::with_executor(mock_executor(config, feed_description(), transport))
}

mod test_feeds;
mod test_items;
mod test_live;
mod test_orders;

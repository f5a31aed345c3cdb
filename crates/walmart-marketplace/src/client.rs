//! One handle over every resource.

use std::sync::Arc;

use walmart_core::{
    ClientConfig, CommandExecutor, Environment, MarketplaceResult, ServiceDescription,
};
use walmart_http::HttpExecutor;

use crate::feed::Feed;
use crate::fixtures::mock_transport;
use crate::item::Item;
use crate::order::Order;

/// Feed, item and order clients sharing one configuration.
#[derive(Debug, Clone)]
pub struct MarketplaceClient {
    /// Feed resource.
    pub feeds: Feed,
    /// Item resource.
    pub items: Item,
    /// Order resource.
    pub orders: Order,
}

impl MarketplaceClient {
    /// Build all three resource clients from `config`.
    pub fn new(config: &ClientConfig) -> MarketplaceResult<Self> {
        Ok(Self {
            feeds: Feed::new(config)?,
            items: Item::new(config)?,
            orders: Order::new(config)?,
        })
    }
}

/// The HTTP executor for `description`, served from fixtures in the mock
/// environment.
pub(crate) fn http_executor(
    config: &ClientConfig,
    description: ServiceDescription,
) -> MarketplaceResult<Arc<dyn CommandExecutor>> {
    let executor = HttpExecutor::new(config, description)?;
    if config.environment == Environment::Mock {
        let transport = mock_transport(executor.description());
        return Ok(Arc::new(executor.with_transport(Arc::new(transport))));
    }
    Ok(Arc::new(executor))
}

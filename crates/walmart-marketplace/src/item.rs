//! Item resource.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use walmart_core::{
    ClientConfig, CommandExecutor, Envelope, MarketplaceError, MarketplaceResult, Params,
};

use crate::bulk::BulkSubmission;
use crate::client::http_executor;
use crate::descriptions::item_description;
use crate::pagination::{OFFSET_PAGE_SIZE, OffsetPaginator};

/// Path of the item list inside a `List` response.
const ITEM_ELEMENTS: &str = "ItemResponse";

/// Items: catalog lookup, retirement and bulk upload.
#[derive(Clone)]
pub struct Item {
    executor: Arc<dyn CommandExecutor>,
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item").finish_non_exhaustive()
    }
}

impl Item {
    /// Build an item client over HTTP.
    pub fn new(config: &ClientConfig) -> MarketplaceResult<Self> {
        Ok(Self::with_executor(http_executor(config, item_description())?))
    }

    /// Build an item client over any executor.
    #[must_use]
    pub fn with_executor(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    /// One page of items.
    pub async fn list(&self, params: Params) -> MarketplaceResult<Envelope> {
        self.executor.execute("List", params).await
    }

    /// One item by SKU.
    pub async fn get(&self, sku: &str) -> MarketplaceResult<Envelope> {
        require_sku(sku)?;
        self.executor.execute("Get", Params::new().with("sku", sku)).await
    }

    /// Retire an item.
    pub async fn retire(&self, sku: &str) -> MarketplaceResult<Envelope> {
        require_sku(sku)?;
        self.executor
            .execute("Retire", Params::new().with("sku", sku))
            .await
    }

    /// Upload `items` as an `MPItemFeed` bulk file.
    pub async fn bulk(&self, items: &Value) -> MarketplaceResult<Envelope> {
        let file = BulkSubmission::item_feed().build(items)?;
        self.executor
            .execute("BulkUpdate", Params::new().with("file", file))
            .await
    }

    /// Every item page, walking `offset` in steps of 20.
    pub async fn list_all_pages(&self) -> MarketplaceResult<Vec<Envelope>> {
        OffsetPaginator::new(OFFSET_PAGE_SIZE, ITEM_ELEMENTS)
            .fetch_all(|params| self.executor.execute("List", params))
            .await
    }
}

fn require_sku(sku: &str) -> MarketplaceResult<()> {
    if sku.trim().is_empty() {
        return Err(MarketplaceError::Validation("sku cannot be empty".to_owned()));
    }
    Ok(())
}

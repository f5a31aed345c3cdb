//! Feed resource.

use std::fmt;
use std::sync::Arc;

use walmart_core::{
    ClientConfig, CommandExecutor, Envelope, FilePayload, MarketplaceError, MarketplaceResult,
    Params,
};

use crate::client::http_executor;
use crate::descriptions::feed_description;
use crate::pagination::{OFFSET_PAGE_SIZE, OffsetPaginator};

/// Path of the feed list inside a `List` response.
const FEED_ELEMENTS: &str = "results.feed";

/// Feeds: status of submitted bulk files.
#[derive(Clone)]
pub struct Feed {
    executor: Arc<dyn CommandExecutor>,
}

impl fmt::Debug for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Feed").finish_non_exhaustive()
    }
}

impl Feed {
    /// Build a feed client over HTTP.
    pub fn new(config: &ClientConfig) -> MarketplaceResult<Self> {
        Ok(Self::with_executor(http_executor(config, feed_description())?))
    }

    /// Build a feed client over any executor.
    #[must_use]
    pub fn with_executor(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    /// One page of feeds. Accepts `feedId`, `limit` (at most 50) and `offset`.
    pub async fn list(&self, params: Params) -> MarketplaceResult<Envelope> {
        self.executor.execute("List", params).await
    }

    /// Status of one feed, optionally with per-item details.
    pub async fn get(&self, feed_id: &str, include_details: bool) -> MarketplaceResult<Envelope> {
        if feed_id.trim().is_empty() {
            return Err(MarketplaceError::Validation(
                "feedId cannot be empty".to_owned(),
            ));
        }
        let params = Params::new()
            .with("feedId", feed_id)
            .with("includeDetails", if include_details { "true" } else { "false" });
        self.executor.execute("Get", params).await
    }

    /// Upload a feed file. `feed_type` defaults to `CONTENT_PRODUCT` when `None`.
    pub async fn upload(
        &self,
        feed_type: Option<&str>,
        payload: FilePayload,
    ) -> MarketplaceResult<Envelope> {
        let mut params = Params::new().with("file", payload);
        if let Some(feed_type) = feed_type {
            params.insert("feedType", feed_type);
        }
        self.executor.execute("Post", params).await
    }

    /// Every feed page, walking `offset` in steps of 20.
    pub async fn list_all_pages(&self) -> MarketplaceResult<Vec<Envelope>> {
        OffsetPaginator::new(OFFSET_PAGE_SIZE, FEED_ELEMENTS)
            .fetch_all(|params| self.executor.execute("List", params))
            .await
    }
}

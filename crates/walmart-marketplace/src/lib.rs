//! Feed, item and order resources of the Walmart Marketplace API.
//!
//! Each resource is a thin façade over a [`CommandExecutor`]: it assembles
//! parameters, renders XML payloads for mutations and drives pagination.
//! [`Feed::new`], [`Item::new`] and [`Order::new`] build an
//! [`HttpExecutor`](walmart_http::HttpExecutor) from a [`ClientConfig`];
//! `with_executor` accepts any other executor. In the mock environment the
//! executor answers from the canned responses in [`fixtures`].
//!
//! ```no_run
//! use walmart_core::{ClientConfig, Params};
//! use walmart_marketplace::Order;
//!
//! # async fn run() -> walmart_core::MarketplaceResult<()> {
//! let orders = Order::new(&ClientConfig::from_env()?)?;
//! let released = orders
//!     .list_released_with_all_cursors(Params::new().with("createdStartDate", "2016-01-01"))
//!     .await?;
//! println!("{} orders", released.total_count().unwrap_or(0));
//! # Ok(())
//! # }
//! ```
//!
//! [`CommandExecutor`]: walmart_core::CommandExecutor
//! [`ClientConfig`]: walmart_core::ClientConfig

pub mod bulk;
pub mod client;
pub mod descriptions;
pub mod feed;
pub mod fixtures;
pub mod item;
pub mod order;
pub mod pagination;

#[cfg(test)]
mod testing;

pub use bulk::BulkSubmission;
pub use client::MarketplaceClient;
pub use descriptions::{feed_description, item_description, order_description};
pub use feed::Feed;
pub use item::Item;
pub use order::{CANCEL_REASON, Order, OrderStatus};
pub use pagination::{AggregatedList, CursorPaginator, OffsetPaginator};

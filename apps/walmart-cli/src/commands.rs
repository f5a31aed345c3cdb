//! Command dispatch.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;
use walmart_core::{ClientConfig, Envelope, FilePayload, ParamValue, Params};
use walmart_marketplace::{Feed, Item, MarketplaceClient, Order};

use crate::cli::{Command, FeedCommand, ItemCommand, OrderCommand, OrderFilters};

/// Run `command` against the configured marketplace and return the JSON to print.
pub async fn run(command: Command, config: &ClientConfig) -> Result<Value> {
    let client = MarketplaceClient::new(config).context("failed to build marketplace client")?;
    info!(environment = %config.environment, "running command");
    match command {
        Command::Feeds(command) => run_feed(&client.feeds, command).await,
        Command::Items(command) => run_item(&client.items, command).await,
        Command::Orders(command) => run_order(&client.orders, command).await,
    }
}

async fn run_feed(feeds: &Feed, command: FeedCommand) -> Result<Value> {
    let envelope = match command {
        FeedCommand::List {
            feed_id,
            limit,
            offset,
        } => {
            let params = params_of([
                ("feedId", feed_id.map(ParamValue::from)),
                ("limit", limit.map(ParamValue::from)),
                ("offset", offset.map(ParamValue::from)),
            ]);
            feeds.list(params).await?
        }
        FeedCommand::ListAll => return Ok(pages(feeds.list_all_pages().await?)),
        FeedCommand::Get { feed_id, details } => feeds.get(&feed_id, details).await?,
        FeedCommand::Upload { path, feed_type } => {
            let payload = file_payload(&path).await?;
            feeds.upload(feed_type.as_deref(), payload).await?
        }
    };
    Ok(envelope.into_value())
}

async fn run_item(items: &Item, command: ItemCommand) -> Result<Value> {
    let envelope = match command {
        ItemCommand::List { sku, limit, offset } => {
            let params = params_of([
                ("sku", sku.map(ParamValue::from)),
                ("limit", limit.map(ParamValue::from)),
                ("offset", offset.map(ParamValue::from)),
            ]);
            items.list(params).await?
        }
        ItemCommand::ListAll => return Ok(pages(items.list_all_pages().await?)),
        ItemCommand::Get { sku } => items.get(&sku).await?,
        ItemCommand::Retire { sku } => items.retire(&sku).await?,
        ItemCommand::Bulk { path } => items.bulk(&read_json(&path).await?).await?,
    };
    Ok(envelope.into_value())
}

async fn run_order(orders: &Order, command: OrderCommand) -> Result<Value> {
    let envelope = match command {
        OrderCommand::List(filters) => list_orders(orders, filters).await?,
        OrderCommand::Get { purchase_order_id } => orders.get(&purchase_order_id).await?,
        OrderCommand::Ack { purchase_order_id } => {
            orders.acknowledge(&purchase_order_id).await?
        }
        OrderCommand::Cancel {
            purchase_order_id,
            path,
        } => {
            orders
                .cancel(&purchase_order_id, &read_json(&path).await?)
                .await?
        }
        OrderCommand::Ship {
            purchase_order_id,
            path,
        } => {
            orders
                .ship(&purchase_order_id, &read_json(&path).await?)
                .await?
        }
        OrderCommand::Refund {
            purchase_order_id,
            path,
        } => {
            orders
                .refund(&purchase_order_id, &read_json(&path).await?)
                .await?
        }
    };
    Ok(envelope.into_value())
}

async fn list_orders(orders: &Order, filters: OrderFilters) -> Result<Envelope> {
    let params = order_params(&filters);
    let envelope = match (filters.released, filters.all_cursors) {
        (false, false) => orders.list_all(params).await?,
        (false, true) => orders.list_all_with_all_cursors(params).await?,
        (true, false) => orders.list_released(params).await?,
        (true, true) => orders.list_released_with_all_cursors(params).await?,
    };
    Ok(envelope)
}

fn order_params(filters: &OrderFilters) -> Params {
    params_of([
        ("status", filters.status.as_deref().map(ParamValue::from)),
        (
            "createdStartDate",
            filters.created_start_date.as_deref().map(ParamValue::from),
        ),
        (
            "createdEndDate",
            filters.created_end_date.as_deref().map(ParamValue::from),
        ),
        ("limit", filters.limit.map(ParamValue::from)),
    ])
}

fn params_of<const N: usize>(pairs: [(&str, Option<ParamValue>); N]) -> Params {
    pairs
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)))
        .collect()
}

fn pages(pages: Vec<Envelope>) -> Value {
    Value::Array(pages.into_iter().map(Envelope::into_value).collect())
}

async fn read_json(path: &Path) -> Result<Value> {
    let raw = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
}

async fn file_payload(path: &Path) -> Result<FilePayload> {
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map_or_else(|| "file.xml".to_owned(), |name| name.to_string_lossy().into_owned());
    Ok(FilePayload::new("file", content, filename, "text/xml"))
}

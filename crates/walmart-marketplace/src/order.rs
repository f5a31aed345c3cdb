//! Order resource.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use walmart_core::{
    ClientConfig, CommandExecutor, Envelope, MarketplaceError, MarketplaceResult, Params,
};
use walmart_xml::{PathRule, XmlSchema, render};

use crate::client::http_executor;
use crate::descriptions::order_description;
use crate::pagination::{CursorPaginator, ORDER_PAGE_SIZE};

/// Namespace of order documents.
pub const ORDERS_NAMESPACE: &str = "http://walmart.com/mp/v3/orders";

/// Secondary namespace declared on shipment documents.
pub const WALMART_NAMESPACE: &str = "http://walmart.com";

/// Cancellation reason used for seller-initiated cancellations.
pub const CANCEL_REASON: &str = "CANCEL_BY_SELLER";

/// Element key of orders inside `elements`.
const ORDER_ELEMENT_KEY: &str = "order";

/// Order line status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Placed, not yet acknowledged.
    Created,
    /// Acknowledged by the seller.
    Acknowledged,
    /// Shipped.
    Shipped,
    /// Cancelled.
    Cancelled,
}

impl OrderStatus {
    /// Wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Acknowledged => "Acknowledged",
            Self::Shipped => "Shipped",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema of an `<ns3:orderCancellation>` document.
#[must_use]
pub fn cancellation_schema() -> XmlSchema {
    XmlSchema::new()
        .rule(
            "/orderCancellation",
            PathRule::new().namespace("ns3").child_namespace("ns3"),
        )
        .rule(
            "/orderCancellation/orderLines",
            PathRule::new().send_items_as("orderLine").required(),
        )
        .rule(
            "/orderCancellation/orderLines/orderLine/orderLineStatuses",
            PathRule::new().send_items_as("orderLineStatus"),
        )
        .declare_namespace("ns3", ORDERS_NAMESPACE)
}

/// Schema of an `<ns2:orderShipment>` document.
#[must_use]
pub fn shipment_schema() -> XmlSchema {
    XmlSchema::new()
        .rule(
            "/orderShipment",
            PathRule::new().namespace("ns2").child_namespace("ns2"),
        )
        .rule(
            "/orderShipment/orderLines",
            PathRule::new().send_items_as("orderLine").required(),
        )
        .rule(
            "/orderShipment/orderLines/orderLine/orderLineStatuses",
            PathRule::new().send_items_as("orderLineStatus"),
        )
        .declare_namespace("ns2", ORDERS_NAMESPACE)
        .declare_namespace("ns3", WALMART_NAMESPACE)
}

/// Schema of an `<ns3:orderRefund>` document.
#[must_use]
pub fn refund_schema() -> XmlSchema {
    XmlSchema::new()
        .rule(
            "/orderRefund",
            PathRule::new().namespace("ns3").child_namespace("ns3"),
        )
        .rule(
            "/orderRefund/orderLines",
            PathRule::new().send_items_as("orderLine").required(),
        )
        .rule(
            "/orderRefund/orderLines/orderLine/refunds",
            PathRule::new().send_items_as("refund"),
        )
        .rule(
            "/orderRefund/orderLines/orderLine/refunds/refund/refundCharges",
            PathRule::new().send_items_as("refundCharge"),
        )
        .declare_namespace("ns3", ORDERS_NAMESPACE)
}

/// Orders: listing, lookup, acknowledgement and the XML mutations.
///
/// `list` cannot be inherited as a dynamic call here; [`Order::list_orders`]
/// is the explicit equivalent.
#[derive(Clone)]
pub struct Order {
    executor: Arc<dyn CommandExecutor>,
}

impl fmt::Debug for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Order").finish_non_exhaustive()
    }
}

impl Order {
    /// Build an order client over HTTP.
    pub fn new(config: &ClientConfig) -> MarketplaceResult<Self> {
        Ok(Self::with_executor(http_executor(config, order_description())?))
    }

    /// Build an order client over any executor.
    #[must_use]
    pub fn with_executor(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    /// Fetch one order.
    pub async fn get(&self, purchase_order_id: &str) -> MarketplaceResult<Envelope> {
        require_id(purchase_order_id)?;
        self.executor
            .execute("Get", Params::new().with("purchaseOrderId", purchase_order_id))
            .await
    }

    /// Acknowledge an order.
    pub async fn acknowledge(&self, purchase_order_id: &str) -> MarketplaceResult<Envelope> {
        require_id(purchase_order_id)?;
        self.executor
            .execute(
                "Acknowledge",
                Params::new().with("purchaseOrderId", purchase_order_id),
            )
            .await
    }

    /// One page of orders. A 404 becomes the canonical empty result.
    pub async fn list_all(&self, params: Params) -> MarketplaceResult<Envelope> {
        self.list_or_empty("List", params).await
    }

    /// Same as [`Order::list_all`].
    pub async fn list_orders(&self, params: Params) -> MarketplaceResult<Envelope> {
        self.list_all(params).await
    }

    /// One page of released orders. A 404 becomes the canonical empty result.
    pub async fn list_released(&self, params: Params) -> MarketplaceResult<Envelope> {
        self.list_or_empty("ListReleased", params).await
    }

    /// Every order across all cursor pages.
    pub async fn list_all_with_all_cursors(&self, params: Params) -> MarketplaceResult<Envelope> {
        self.list_with_all_cursors("List", params).await
    }

    /// Every released order across all cursor pages.
    pub async fn list_released_with_all_cursors(
        &self,
        params: Params,
    ) -> MarketplaceResult<Envelope> {
        self.list_with_all_cursors("ListReleased", params).await
    }

    /// Cancel order lines.
    ///
    /// `order` is the `{"orderCancellation": {...}}` document.
    pub async fn cancel(
        &self,
        purchase_order_id: &str,
        order: &Value,
    ) -> MarketplaceResult<Envelope> {
        self.submit("CancelOrder", purchase_order_id, order, &cancellation_schema())
            .await
    }

    /// Ship order lines.
    ///
    /// `order` is the `{"orderShipment": {...}}` document.
    pub async fn ship(
        &self,
        purchase_order_id: &str,
        order: &Value,
    ) -> MarketplaceResult<Envelope> {
        self.submit("ShipOrder", purchase_order_id, order, &shipment_schema())
            .await
    }

    /// Refund order lines.
    ///
    /// `order` is the `{"orderRefund": {...}}` document.
    pub async fn refund(
        &self,
        purchase_order_id: &str,
        order: &Value,
    ) -> MarketplaceResult<Envelope> {
        self.submit("RefundOrder", purchase_order_id, order, &refund_schema())
            .await
    }

    async fn list_or_empty(&self, operation: &str, params: Params) -> MarketplaceResult<Envelope> {
        match self.executor.execute(operation, params).await {
            Err(err) if err.is_not_found() => {
                debug!(operation, "No orders found");
                Ok(Envelope::empty_list())
            }
            other => other,
        }
    }

    async fn list_with_all_cursors(
        &self,
        operation: &str,
        params: Params,
    ) -> MarketplaceResult<Envelope> {
        let aggregated = CursorPaginator::new(ORDER_PAGE_SIZE)
            .with_element_key(ORDER_ELEMENT_KEY)
            .fetch_all(|page| self.executor.execute(operation, page), params)
            .await?;
        debug!(
            operation,
            pages = aggregated.pages(),
            orders = aggregated.elements().len(),
            total_count = aggregated.total_count(),
            "Collected orders across cursors"
        );
        Ok(aggregated.into_envelope())
    }

    async fn submit(
        &self,
        operation: &str,
        purchase_order_id: &str,
        order: &Value,
        schema: &XmlSchema,
    ) -> MarketplaceResult<Envelope> {
        require_id(purchase_order_id)?;
        if is_empty(order) {
            return Err(MarketplaceError::Validation(
                "order cannot be empty".to_owned(),
            ));
        }

        let document = render(order, schema)?;
        self.executor
            .execute(
                operation,
                Params::new()
                    .with("purchaseOrderId", purchase_order_id)
                    .with("order", document.into_string()),
            )
            .await
    }
}

fn require_id(purchase_order_id: &str) -> MarketplaceResult<()> {
    if purchase_order_id.trim().is_empty() {
        return Err(MarketplaceError::Validation(
            "purchaseOrderId cannot be empty".to_owned(),
        ));
    }
    Ok(())
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

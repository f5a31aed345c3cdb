//! Built-in service descriptions for the marketplace resources.
//!
//! Each description is validated when an executor is built from it. All
//! operations live under `/{ApiVersion}`; a configured country inserts its
//! segment right after it.

use http::Method;
use walmart_core::{Operation, ParamType, ParameterSpec, ServiceDescription};

/// API version substituted for `{ApiVersion}`.
pub const API_VERSION: &str = "v3";

/// Default `feedType` of a feed upload.
pub const DEFAULT_FEED_TYPE: &str = "CONTENT_PRODUCT";

/// `feedType` of a bulk item upload.
pub const ITEM_FEED_TYPE: &str = "item";

/// Feed resource: list, get and upload feeds.
#[must_use]
pub fn feed_description() -> ServiceDescription {
    ServiceDescription::new("feed", API_VERSION)
        .with_operation(
            Operation::new("List", Method::GET, "/{ApiVersion}/feeds")
                .param("feedId", ParameterSpec::query(ParamType::String))
                .param("limit", ParameterSpec::query(ParamType::Integer).maximum(50))
                .param("offset", ParameterSpec::query(ParamType::Integer)),
        )
        .with_operation(
            Operation::new("Get", Method::GET, "/{ApiVersion}/feeds/{feedId}")
                .param("feedId", ParameterSpec::uri())
                .param("includeDetails", ParameterSpec::query(ParamType::String))
                .param("limit", ParameterSpec::query(ParamType::Integer).maximum(1000))
                .param("offset", ParameterSpec::query(ParamType::Integer)),
        )
        .with_operation(
            Operation::new("Post", Method::POST, "/{ApiVersion}/feeds")
                .param(
                    "feedType",
                    ParameterSpec::query(ParamType::String).default_value(DEFAULT_FEED_TYPE),
                )
                .param("file", ParameterSpec::post_file()),
        )
}

/// Item resource: list, get, retire and bulk-upload items.
#[must_use]
pub fn item_description() -> ServiceDescription {
    ServiceDescription::new("item", API_VERSION)
        .with_operation(
            Operation::new("List", Method::GET, "/{ApiVersion}/items")
                .param("sku", ParameterSpec::query(ParamType::String))
                .param("limit", ParameterSpec::query(ParamType::Integer))
                .param("offset", ParameterSpec::query(ParamType::Integer))
                .param("nextCursor", ParameterSpec::query(ParamType::String)),
        )
        .with_operation(
            Operation::new("Get", Method::GET, "/{ApiVersion}/items/{sku}")
                .param("sku", ParameterSpec::uri()),
        )
        .with_operation(
            Operation::new("Retire", Method::DELETE, "/{ApiVersion}/items/{sku}")
                .param("sku", ParameterSpec::uri()),
        )
        .with_operation(
            Operation::new("BulkUpdate", Method::POST, "/{ApiVersion}/feeds")
                .param(
                    "feedType",
                    ParameterSpec::query(ParamType::String).default_value(ITEM_FEED_TYPE),
                )
                .param("file", ParameterSpec::post_file()),
        )
}

/// Order resource: list, get, acknowledge, cancel, ship and refund orders.
#[must_use]
pub fn order_description() -> ServiceDescription {
    let list_params = |op: Operation| {
        op.param("sku", ParameterSpec::query(ParamType::String))
            .param("customerOrderId", ParameterSpec::query(ParamType::String))
            .param("purchaseOrderId", ParameterSpec::query(ParamType::String))
            .param("status", ParameterSpec::query(ParamType::String))
            .param("createdStartDate", ParameterSpec::query(ParamType::String))
            .param("createdEndDate", ParameterSpec::query(ParamType::String))
            .param("fromExpectedShipDate", ParameterSpec::query(ParamType::String))
            .param("toExpectedShipDate", ParameterSpec::query(ParamType::String))
            .param("limit", ParameterSpec::query(ParamType::Integer).maximum(200))
            .param("nextCursor", ParameterSpec::query(ParamType::String))
    };
    let mutation = |name: &str, action: &str| {
        Operation::new(
            name,
            Method::POST,
            format!("/{{ApiVersion}}/orders/{{purchaseOrderId}}/{action}"),
        )
        .param("purchaseOrderId", ParameterSpec::uri())
        .param("order", ParameterSpec::body())
    };

    ServiceDescription::new("order", API_VERSION)
        .with_operation(list_params(Operation::new(
            "List",
            Method::GET,
            "/{ApiVersion}/orders",
        )))
        .with_operation(list_params(Operation::new(
            "ListReleased",
            Method::GET,
            "/{ApiVersion}/orders/released",
        )))
        .with_operation(
            Operation::new("Get", Method::GET, "/{ApiVersion}/orders/{purchaseOrderId}")
                .param("purchaseOrderId", ParameterSpec::uri()),
        )
        .with_operation(
            Operation::new(
                "Acknowledge",
                Method::POST,
                "/{ApiVersion}/orders/{purchaseOrderId}/acknowledge",
            )
            .param("purchaseOrderId", ParameterSpec::uri()),
        )
        .with_operation(mutation("CancelOrder", "cancel"))
        .with_operation(mutation("ShipOrder", "shipping"))
        .with_operation(mutation("RefundOrder", "refund"))
}

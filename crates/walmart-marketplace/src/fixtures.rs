//! Canned responses served in the mock environment.
//!
//! Every built-in operation gets one response shaped like the live API's.
//! Feed and item responses are JSON; order responses are namespaced XML so
//! the mock exercises the same decoding path as the live order endpoints.

use http::Method;
use serde_json::json;
use walmart_core::ServiceDescription;
use walmart_http::{MockTransport, RawResponse};

/// Feed id used throughout the feed fixtures.
pub const MOCK_FEED_ID: &str = "1898c657-085c-4761-95fa-4ae515025e87";
/// SKU used throughout the item fixtures.
pub const MOCK_SKU: &str = "MOCK-SKU-0001";
/// Purchase order id used throughout the order fixtures.
pub const MOCK_PURCHASE_ORDER_ID: &str = "1577684050862";

const ORDER_LIST_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ns3:list xmlns:ns3="http://walmart.com/mp/v3/orders">
  <ns3:meta>
    <ns3:totalCount>1</ns3:totalCount>
    <ns3:limit>200</ns3:limit>
  </ns3:meta>
  <ns3:elements>
    <ns3:order>
      <ns3:purchaseOrderId>1577684050862</ns3:purchaseOrderId>
      <ns3:customerOrderId>4021603841173</ns3:customerOrderId>
      <ns3:orderDate>2016-05-11T23:16:37.000Z</ns3:orderDate>
      <ns3:orderLines>
        <ns3:orderLine>
          <ns3:lineNumber>1</ns3:lineNumber>
          <ns3:item><ns3:sku>MOCK-SKU-0001</ns3:sku></ns3:item>
          <ns3:orderLineStatuses>
            <ns3:orderLineStatus>
              <ns3:status>Created</ns3:status>
              <ns3:statusQuantity>
                <ns3:unitOfMeasurement>EACH</ns3:unitOfMeasurement>
                <ns3:amount>1</ns3:amount>
              </ns3:statusQuantity>
            </ns3:orderLineStatus>
          </ns3:orderLineStatuses>
        </ns3:orderLine>
      </ns3:orderLines>
    </ns3:order>
  </ns3:elements>
</ns3:list>"#;

/// A single order; `status` fills every line status.
fn order_xml(status: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ns3:order xmlns:ns3="http://walmart.com/mp/v3/orders">
  <ns3:purchaseOrderId>{MOCK_PURCHASE_ORDER_ID}</ns3:purchaseOrderId>
  <ns3:customerOrderId>4021603841173</ns3:customerOrderId>
  <ns3:orderLines>
    <ns3:orderLine>
      <ns3:lineNumber>1</ns3:lineNumber>
      <ns3:orderLineStatuses>
        <ns3:orderLineStatus><ns3:status>{status}</ns3:status></ns3:orderLineStatus>
      </ns3:orderLineStatuses>
    </ns3:orderLine>
  </ns3:orderLines>
</ns3:order>"#
    )
}

fn feed_summary() -> serde_json::Value {
    json!({
        "feedId": MOCK_FEED_ID,
        "feedSource": "MARKETPLACE_PARTNER",
        "feedType": "item",
        "partnerId": "100009",
        "itemsReceived": 1,
        "itemsSucceeded": 1,
        "itemsFailed": 0,
        "itemsProcessing": 0,
        "feedStatus": "PROCESSED",
        "feedDate": 1_462_566_788_000_i64,
    })
}

fn item_summary() -> serde_json::Value {
    json!({
        "mart": "WALMART_US",
        "sku": MOCK_SKU,
        "wpid": "7K69FC732QRU",
        "gtin": "00883929412133",
        "productName": "Mock Product",
        "productType": "Movies",
        "price": {"currency": "USD", "amount": 9.99},
        "publishedStatus": "PUBLISHED",
    })
}

/// The canned response for `operation` of service `service`.
fn canned(service: &str, operation: &str) -> Option<RawResponse> {
    let response = match (service, operation) {
        ("feed", "List") => RawResponse::json(
            200,
            &json!({
                "totalResults": 1,
                "offset": 0,
                "limit": 50,
                "results": {"feed": [feed_summary()]},
            }),
        ),
        ("feed", "Get") => {
            let mut feed = feed_summary();
            feed["itemDetails"] = json!({
                "itemIngestionStatus": [
                    {"sku": MOCK_SKU, "ingestionStatus": "SUCCESS", "index": 0}
                ]
            });
            RawResponse::json(200, &feed)
        }
        ("feed", "Post") | ("item", "BulkUpdate") => {
            RawResponse::json(200, &json!({"feedId": MOCK_FEED_ID}))
        }
        ("item", "List") => RawResponse::json(
            200,
            &json!({"ItemResponse": [item_summary()], "totalItems": 1}),
        ),
        ("item", "Get") => RawResponse::json(200, &json!({"ItemResponse": [item_summary()]})),
        ("item", "Retire") => RawResponse::json(
            200,
            &json!({
                "sku": MOCK_SKU,
                "message": "Thank you. Your item has been submitted for retirement \
                            from Walmart Catalog.",
            }),
        ),
        ("order", "List" | "ListReleased") => RawResponse::xml(200, ORDER_LIST_XML),
        ("order", "Get") => RawResponse::xml(200, order_xml("Created")),
        ("order", "Acknowledge") => RawResponse::xml(200, order_xml("Acknowledged")),
        ("order", "CancelOrder") => RawResponse::xml(200, order_xml("Cancelled")),
        ("order", "ShipOrder") => RawResponse::xml(200, order_xml("Shipped")),
        ("order", "RefundOrder") => RawResponse::xml(200, order_xml("Shipped")),
        _ => return None,
    };
    Some(response)
}

/// A [`MockTransport`] answering every operation of `description` with a
/// canned response.
///
/// Fixtures are registered against the operation URI templates, so a
/// country-rewritten description is served under its country segment.
/// Operations without a canned response answer 404.
#[must_use]
pub fn mock_transport(description: &ServiceDescription) -> MockTransport {
    description
        .operations()
        .fold(MockTransport::new(), |transport, operation| {
            match canned(&description.name, &operation.name) {
                Some(response) => {
                    transport.fixture(operation.http_method.clone(), &operation.uri, response)
                }
                None => transport,
            }
        })
}

#[cfg(test)]
mod tests {
    use walmart_core::Country;

    use super::*;
    use crate::descriptions::{feed_description, item_description, order_description};

    #[test]
    fn test_should_cover_every_builtin_operation() {
        for description in [feed_description(), item_description(), order_description()] {
            for operation in description.operations() {
                assert!(
                    canned(&description.name, &operation.name).is_some(),
                    "{}::{} has no canned response",
                    description.name,
                    operation.name
                );
            }
        }
    }

    #[tokio::test]
    async fn test_should_serve_country_rewritten_paths() {
        use walmart_core::RequestBody;
        use walmart_http::{OutboundRequest, Transport};

        let transport = mock_transport(&feed_description().with_country(Country::Canada));
        let request = |path: &str| OutboundRequest {
            method: Method::GET,
            url: format!("mock://marketplace{path}"),
            headers: Vec::new(),
            body: RequestBody::Empty,
        };

        let canada = transport.send(request("/v3/ca/feeds")).await.unwrap();
        let domestic = transport.send(request("/v3/feeds")).await.unwrap();
        assert_eq!(canada.status, 200);
        assert_eq!(domestic.status, 404);
    }
}

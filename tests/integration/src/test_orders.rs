//! Order integration tests over the mock transport.

#[cfg(test)]
mod tests {
    use http::Method;
    use serde_json::json;
    use walmart_core::{MarketplaceError, Params, RequestBody};
    use walmart_http::{MockTransport, RawResponse};
    use walmart_xml::read_value;

    use crate::{canada_config, mock_config, mock_orders};

    const ORDERS_PAGE_ONE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ns2:list xmlns:ns2="http://walmart.com/mp/v3/orders">
  <ns2:meta>
    <ns2:totalCount>3</ns2:totalCount>
    <ns2:limit>200</ns2:limit>
    <ns2:nextCursor>?limit=200&amp;hasMoreElements=true&amp;soIndex=3</ns2:nextCursor>
  </ns2:meta>
  <ns2:elements>
    <ns2:order><ns2:purchaseOrderId>1001</ns2:purchaseOrderId></ns2:order>
    <ns2:order><ns2:purchaseOrderId>1002</ns2:purchaseOrderId></ns2:order>
  </ns2:elements>
</ns2:list>"#;

    const ORDERS_PAGE_TWO: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ns2:list xmlns:ns2="http://walmart.com/mp/v3/orders">
  <ns2:meta><ns2:totalCount>3</ns2:totalCount></ns2:meta>
  <ns2:elements>
    <ns2:order><ns2:purchaseOrderId>1003</ns2:purchaseOrderId></ns2:order>
  </ns2:elements>
</ns2:list>"#;

    #[tokio::test]
    async fn test_should_follow_xml_cursors_across_pages() {
        let mock = MockTransport::new()
            .route(Method::GET, "/v3/orders", RawResponse::xml(200, ORDERS_PAGE_ONE))
            .route(Method::GET, "/v3/orders", RawResponse::xml(200, ORDERS_PAGE_TWO));
        let orders = mock_orders(&mock_config(), &mock);

        let result = orders
            .list_all_with_all_cursors(Params::new().with("status", "Created"))
            .await
            .unwrap();

        assert_eq!(result.total_count(), Some(3));
        let ids: Vec<&str> = result.elements().unwrap()["order"]
            .as_array()
            .unwrap()
            .iter()
            .map(|order| order["purchaseOrderId"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["1001", "1002", "1003"]);

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].url.contains("limit=200"));
        assert!(requests[0].url.contains("status=Created"));
        assert!(!requests[0].url.contains("nextCursor"));
        assert!(requests[1].url.contains("nextCursor="));
    }

    #[tokio::test]
    async fn test_should_return_canonical_empty_list_on_not_found() {
        let mock = MockTransport::new();
        let orders = mock_orders(&mock_config(), &mock);

        let single = orders.list_released(Params::new()).await.unwrap();
        let all = orders
            .list_released_with_all_cursors(Params::new())
            .await
            .unwrap();

        let expected = json!({"statusCode": 200, "meta": {"totalCount": 0}, "elements": []});
        assert_eq!(single.as_value(), &expected);
        assert_eq!(all.as_value(), &expected);
        assert!(
            mock.requests()
                .iter()
                .all(|r| r.path() == "/v3/orders/released")
        );
    }

    #[tokio::test]
    async fn test_should_propagate_server_errors_from_listing() {
        let mock = MockTransport::new().route(
            Method::GET,
            "/v3/orders",
            RawResponse::new(500, Some("text/plain"), "boom"),
        );
        let orders = mock_orders(&mock_config(), &mock);

        let err = orders.list_all(Params::new()).await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
    }

    #[tokio::test]
    async fn test_should_send_cancellation_document_as_xml_body() {
        let mock = MockTransport::new().route(
            Method::POST,
            "/v3/orders/4242/cancel",
            RawResponse::json(200, &json!({"order": {"purchaseOrderId": "4242"}})),
        );
        let orders = mock_orders(&mock_config(), &mock);
        let cancellation = json!({
            "orderCancellation": {
                "orderLines": [{
                    "lineNumber": "1",
                    "orderLineStatuses": [{
                        "status": "Cancelled",
                        "cancellationReason": "CANCEL_BY_SELLER",
                        "statusQuantity": {"unitOfMeasurement": "EACH", "amount": "1"}
                    }]
                }]
            }
        });

        let envelope = orders.cancel("4242", &cancellation).await.unwrap();
        assert_eq!(envelope.status_code(), Some(200));

        let requests = mock.requests();
        let RequestBody::Xml(body) = &requests[0].body else {
            panic!("expected XML body, got {:?}", requests[0].body);
        };
        assert!(body.contains("<ns3:orderCancellation"));
        assert!(body.contains(r#"xmlns:ns3="http://walmart.com/mp/v3/orders""#));
        assert!(body.contains("<ns3:cancellationReason>CANCEL_BY_SELLER</ns3:cancellationReason>"));
        assert!(requests[0].header("WM_SEC.AUTH_SIGNATURE").is_some());

        let parsed = read_value(body.as_bytes()).unwrap();
        assert_eq!(parsed["orderLines"]["orderLine"]["lineNumber"], "1");
    }

    #[tokio::test]
    async fn test_should_reject_invalid_submissions_before_sending() {
        let mock = MockTransport::new();
        let orders = mock_orders(&mock_config(), &mock);

        let err = orders.ship("", &json!({"orderShipment": {}})).await.unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation(_)));
        let err = orders.refund("4242", &json!({})).await.unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation(_)));
        let err = orders
            .cancel("4242", &json!({"orderCancellation": {"note": "x"}}))
            .await
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::Mapping(_)));

        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_should_route_canadian_orders_through_country_segment() {
        let mock = MockTransport::new().route(
            Method::POST,
            "/v3/ca/orders/77/acknowledge",
            RawResponse::json(200, &json!({"order": {"purchaseOrderId": "77"}})),
        );
        let orders = mock_orders(&canada_config(), &mock);

        let envelope = orders.acknowledge("77").await.unwrap();
        assert_eq!(envelope.get("order").unwrap()["purchaseOrderId"], "77");
        assert_eq!(mock.requests()[0].path(), "/v3/ca/orders/77/acknowledge");
    }
}

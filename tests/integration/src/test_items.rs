//! Item integration tests over the mock transport.

#[cfg(test)]
mod tests {
    use http::Method;
    use serde_json::{Value, json};
    use walmart_core::{MarketplaceError, Params, RequestBody};
    use walmart_http::{MockTransport, RawResponse};
    use walmart_xml::read_value;

    use crate::{mock_config, mock_items};

    #[tokio::test]
    async fn test_should_upload_items_as_multipart_feed() {
        let mock = MockTransport::new().route(
            Method::POST,
            "/v3/feeds",
            RawResponse::json(200, &json!({"feedId": "F-1"})),
        );
        let items = mock_items(&mock_config(), &mock);
        let records = json!([
            {"sku": "SKU-1", "price": {"currency": "USD", "amount": "9.99"}},
            {"sku": "SKU-2", "price": {"currency": "USD", "amount": "19.99"}}
        ]);

        let envelope = items.bulk(&records).await.unwrap();
        assert_eq!(envelope.get("feedId"), Some(&json!("F-1")));

        let request = &mock.requests()[0];
        assert!(request.url.contains("feedType=item"));
        let RequestBody::Multipart(file) = &request.body else {
            panic!("expected multipart body, got {:?}", request.body);
        };
        assert_eq!(file.field_name, "file");
        assert_eq!(file.filename, "file.xml");
        let parsed = read_value(&file.content).unwrap();
        assert_eq!(parsed["MPItem"][1]["sku"], "SKU-2");
    }

    #[tokio::test]
    async fn test_should_reject_non_sequence_bulk_input() {
        let mock = MockTransport::new();
        let items = mock_items(&mock_config(), &mock);

        let err = items.bulk(&json!({"sku": "SKU-1"})).await.unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation(_)));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_should_walk_item_pages_by_offset() {
        let page = |count: usize| {
            let records: Vec<Value> = (0..count).map(|i| json!({"sku": format!("S{i}")})).collect();
            RawResponse::json(200, &json!({"ItemResponse": records, "totalItems": 25}))
        };
        let mock = MockTransport::new()
            .route(Method::GET, "/v3/items", page(20))
            .route(Method::GET, "/v3/items", page(5));
        let items = mock_items(&mock_config(), &mock);

        let pages = items.list_all_pages().await.unwrap();
        assert_eq!(pages.len(), 2);
        let requests = mock.requests();
        assert!(requests[0].url.contains("offset=0"));
        assert!(requests[1].url.contains("offset=20"));
    }

    #[tokio::test]
    async fn test_should_escape_sku_and_surface_not_found() {
        let mock = MockTransport::new();
        let items = mock_items(&mock_config(), &mock);

        let err = items.get("A B/1").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!mock.requests()[0].url.contains("A B/1"));
    }

    #[tokio::test]
    async fn test_should_reject_non_integer_limit() {
        let mock = MockTransport::new();
        let items = mock_items(&mock_config(), &mock);

        let err = items
            .list(Params::new().with("limit", "ten"))
            .await
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation(_)));
        assert_eq!(mock.request_count(), 0);
    }
}

//! Feed integration tests over the mock transport.

#[cfg(test)]
mod tests {
    use http::Method;
    use serde_json::json;
    use walmart_core::{FilePayload, MarketplaceError, Params, RequestBody};
    use walmart_http::{MockTransport, RawResponse};
    use walmart_marketplace::Feed;
    use walmart_marketplace::fixtures::MOCK_FEED_ID;

    use crate::{mock_config, mock_feeds};

    const FEED_STATUS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ns2:PartnerFeedResponse xmlns:ns2="http://walmart.com/">
  <ns2:feedId>F-9</ns2:feedId>
  <ns2:feedStatus>PROCESSED</ns2:feedStatus>
  <ns2:itemsReceived>2</ns2:itemsReceived>
</ns2:PartnerFeedResponse>"#;

    #[tokio::test]
    async fn test_should_decode_xml_feed_status() {
        let mock = MockTransport::new().route(
            Method::GET,
            "/v3/feeds/F-9",
            RawResponse::xml(200, FEED_STATUS),
        );
        let feeds = mock_feeds(&mock_config(), &mock);

        let envelope = feeds.get("F-9", true).await.unwrap();
        assert_eq!(envelope.status_code(), Some(200));
        assert_eq!(envelope.get("feedStatus"), Some(&json!("PROCESSED")));
        assert_eq!(envelope.get("itemsReceived"), Some(&json!("2")));
        assert!(mock.requests()[0].url.contains("includeDetails=true"));
    }

    #[tokio::test]
    async fn test_should_default_feed_type_on_upload() {
        let mock = MockTransport::new().route(
            Method::POST,
            "/v3/feeds",
            RawResponse::json(200, &json!({"feedId": "F-10"})),
        );
        let feeds = mock_feeds(&mock_config(), &mock);
        let payload = FilePayload::new("file", "<MPItemFeed/>", "feed.xml", "text/xml");

        feeds.upload(None, payload).await.unwrap();

        let request = &mock.requests()[0];
        assert!(request.url.contains("feedType=CONTENT_PRODUCT"));
        assert!(matches!(
            &request.body,
            RequestBody::Multipart(file) if file.filename == "feed.xml"
        ));
    }

    #[tokio::test]
    async fn test_should_stop_feed_pagination_on_short_page() {
        let feeds_page = |count: usize| {
            let feed: Vec<_> = (0..count).map(|i| json!({"feedId": format!("F{i}")})).collect();
            RawResponse::json(200, &json!({"totalResults": 23, "results": {"feed": feed}}))
        };
        let mock = MockTransport::new()
            .route(Method::GET, "/v3/feeds", feeds_page(20))
            .route(Method::GET, "/v3/feeds", feeds_page(3))
            .route(Method::GET, "/v3/feeds", feeds_page(20));
        let feeds = mock_feeds(&mock_config(), &mock);

        let pages = feeds.list_all_pages().await.unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_should_enforce_feed_list_limit() {
        let mock = MockTransport::new();
        let feeds = mock_feeds(&mock_config(), &mock);

        let err = feeds
            .list(Params::new().with("limit", 51_i64))
            .await
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation(_)));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_should_answer_feed_calls_in_mock_environment() {
        let feeds = Feed::new(&mock_config()).unwrap();

        let list = feeds.list(Params::new()).await.unwrap();
        assert_eq!(list.status_code(), Some(200));
        assert!(list.get("totalResults").is_some_and(serde_json::Value::is_number));

        let feed = feeds.get(MOCK_FEED_ID, true).await.unwrap();
        assert_eq!(feed.status_code(), Some(200));
        assert_eq!(feed.get("feedStatus"), Some(&json!("PROCESSED")));
    }
}

//! Tests against the live marketplace.

#[cfg(test)]
mod tests {
    use walmart_core::Params;
    use walmart_marketplace::MarketplaceClient;

    use crate::live_config;

    #[tokio::test]
    #[ignore = "requires live credentials"]
    async fn test_should_list_feeds() {
        let client = MarketplaceClient::new(&live_config()).expect("client");
        let envelope = client
            .feeds
            .list(Params::new().with("limit", 5_i64))
            .await
            .expect("list feeds");
        assert_eq!(envelope.status_code(), Some(200));
    }

    #[tokio::test]
    #[ignore = "requires live credentials"]
    async fn test_should_list_released_orders() {
        let client = MarketplaceClient::new(&live_config()).expect("client");
        let envelope = client
            .orders
            .list_released(Params::new().with("limit", 10_i64))
            .await
            .expect("list released orders");
        assert_eq!(envelope.status_code(), Some(200));
        assert!(envelope.total_count().is_some());
    }

    #[tokio::test]
    #[ignore = "requires live credentials"]
    async fn test_should_list_items() {
        let client = MarketplaceClient::new(&live_config()).expect("client");
        let envelope = client
            .items
            .list(Params::new().with("limit", 5_i64))
            .await
            .expect("list items");
        assert_eq!(envelope.status_code(), Some(200));
    }
}

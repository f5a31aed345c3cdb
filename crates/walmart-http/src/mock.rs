//! In-process transport for the mock environment.
//!
//! Two kinds of routes answer requests:
//!
//! - queued routes, keyed by method and exact URL path, each holding a FIFO
//!   queue of responses consumed one per request;
//! - fixtures, keyed by method and a path template whose `{name}` segments
//!   match any single segment, answering every matching request.
//!
//! Queued routes win over fixtures. Among fixtures the one with the most
//! literal segments wins. Anything unmatched gets `404 Not Found`. Only the
//! most recent [`MAX_RECORDED_REQUESTS`] requests are kept.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use http::Method;
use parking_lot::Mutex;
use tracing::debug;
use walmart_core::MarketplaceResult;

use crate::transport::{OutboundRequest, RawResponse, Transport};

/// Number of requests a [`MockTransport`] remembers.
pub const MAX_RECORDED_REQUESTS: usize = 256;

#[derive(Debug)]
struct Fixture {
    method: Method,
    segments: Vec<Segment>,
    response: RawResponse,
}

#[derive(Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder,
}

impl Fixture {
    fn new(method: Method, template: &str, response: RawResponse) -> Self {
        let segments = split_path(template)
            .map(|segment| {
                if segment.starts_with('{') && segment.ends_with('}') {
                    Segment::Placeholder
                } else {
                    Segment::Literal(segment.to_owned())
                }
            })
            .collect();
        Self {
            method,
            segments,
            response,
        }
    }

    /// Number of literal segments if `path` matches.
    fn score(&self, method: &Method, path: &str) -> Option<usize> {
        if *method != self.method {
            return None;
        }
        let mut literals = 0;
        let mut parts = split_path(path);
        for segment in &self.segments {
            let part = parts.next()?;
            if let Segment::Literal(literal) = segment {
                if literal != part {
                    return None;
                }
                literals += 1;
            }
        }
        parts.next().is_none().then_some(literals)
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

#[derive(Debug, Default)]
struct MockState {
    routes: HashMap<(Method, String), VecDeque<RawResponse>>,
    fixtures: Vec<Fixture>,
    requests: VecDeque<OutboundRequest>,
}

impl MockState {
    fn respond(&mut self, method: &Method, path: &str) -> RawResponse {
        if let Some(response) = self
            .routes
            .get_mut(&(method.clone(), path.to_owned()))
            .and_then(VecDeque::pop_front)
        {
            return response;
        }
        self.fixtures
            .iter()
            .filter_map(|fixture| fixture.score(method, path).map(|score| (score, fixture)))
            .max_by_key(|(score, _)| *score)
            .map_or_else(|| RawResponse::empty(404), |(_, fixture)| fixture.response.clone())
    }

    fn record(&mut self, request: OutboundRequest) {
        if self.requests.len() == MAX_RECORDED_REQUESTS {
            self.requests.pop_front();
        }
        self.requests.push_back(request);
    }
}

/// A [`Transport`] that never leaves the process.
///
/// Clones share state, so a test can keep a handle after moving a clone into
/// an executor.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// A transport with no routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `response` for `method` + `path`.
    #[must_use]
    pub fn route(self, method: Method, path: impl Into<String>, response: RawResponse) -> Self {
        self.push(method, path, response);
        self
    }

    /// Queue `response` for `method` + `path` on a shared handle.
    pub fn push(&self, method: Method, path: impl Into<String>, response: RawResponse) {
        self.state
            .lock()
            .routes
            .entry((method, path.into()))
            .or_default()
            .push_back(response);
    }

    /// Answer every `method` request matching `template` with `response`.
    ///
    /// `template` is a path such as `/{ApiVersion}/feeds/{feedId}`.
    #[must_use]
    pub fn fixture(self, method: Method, template: &str, response: RawResponse) -> Self {
        self.state
            .lock()
            .fixtures
            .push(Fixture::new(method, template, response));
        self
    }

    /// The most recent requests, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.state.lock().requests.iter().cloned().collect()
    }

    /// Number of recorded requests.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.state.lock().requests.len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: OutboundRequest) -> MarketplaceResult<RawResponse> {
        let mut state = self.state.lock();
        let response = state.respond(&request.method, request.path());
        debug!(
            method = %request.method,
            path = %request.path(),
            status = response.status,
            "Mock response"
        );
        state.record(request);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use walmart_core::RequestBody;

    use super::*;

    fn get(url: &str) -> OutboundRequest {
        OutboundRequest {
            method: Method::GET,
            url: url.to_owned(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    #[tokio::test]
    async fn test_should_answer_routes_in_fifo_order() {
        let mock = MockTransport::new()
            .route(Method::GET, "/v3/orders", RawResponse::json(200, &json!({"page": 1})))
            .route(Method::GET, "/v3/orders", RawResponse::json(200, &json!({"page": 2})));

        let first = mock.send(get("mock://marketplace/v3/orders?limit=200")).await.unwrap();
        let second = mock.send(get("mock://marketplace/v3/orders?nextCursor=x")).await.unwrap();
        let third = mock.send(get("mock://marketplace/v3/orders")).await.unwrap();

        assert_eq!(first.body, json!({"page": 1}).to_string());
        assert_eq!(second.body, json!({"page": 2}).to_string());
        assert_eq!(third.status, 404);
        assert_eq!(mock.request_count(), 3);
    }

    #[tokio::test]
    async fn test_should_return_not_found_for_unknown_route() {
        let mock = MockTransport::new();
        let response = mock.send(get("mock://marketplace/v3/items")).await.unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(mock.requests()[0].url, "mock://marketplace/v3/items");
    }

    #[tokio::test]
    async fn test_should_share_state_between_clones() {
        let mock = MockTransport::new();
        let handle = mock.clone();
        handle.push(Method::POST, "/v3/feeds", RawResponse::empty(202));

        let response = mock
            .send(OutboundRequest {
                method: Method::POST,
                ..get("mock://marketplace/v3/feeds")
            })
            .await
            .unwrap();
        assert_eq!(response.status, 202);
        assert_eq!(handle.request_count(), 1);
    }

    #[tokio::test]
    async fn test_should_answer_fixtures_repeatedly() {
        let mock = MockTransport::new().fixture(
            Method::GET,
            "/{ApiVersion}/feeds/{feedId}",
            RawResponse::json(200, &json!({"feedStatus": "PROCESSED"})),
        );

        for id in ["a", "b"] {
            let response = mock
                .send(get(&format!("mock://marketplace/v3/feeds/{id}?includeDetails=true")))
                .await
                .unwrap();
            assert_eq!(response.status, 200);
        }
        let deeper = mock.send(get("mock://marketplace/v3/feeds/a/items")).await.unwrap();
        assert_eq!(deeper.status, 404);
    }

    #[tokio::test]
    async fn test_should_prefer_queued_routes_and_literal_fixtures() {
        let mock = MockTransport::new()
            .fixture(
                Method::GET,
                "/{ApiVersion}/orders/{purchaseOrderId}",
                RawResponse::json(200, &json!({"kind": "order"})),
            )
            .fixture(
                Method::GET,
                "/{ApiVersion}/orders/released",
                RawResponse::json(200, &json!({"kind": "released"})),
            )
            .route(Method::GET, "/v3/orders/released", RawResponse::empty(503));

        let queued = mock.send(get("mock://marketplace/v3/orders/released")).await.unwrap();
        let released = mock.send(get("mock://marketplace/v3/orders/released")).await.unwrap();
        let order = mock.send(get("mock://marketplace/v3/orders/42")).await.unwrap();

        assert_eq!(queued.status, 503);
        assert_eq!(released.body, json!({"kind": "released"}).to_string());
        assert_eq!(order.body, json!({"kind": "order"}).to_string());
    }

    #[tokio::test]
    async fn test_should_cap_recorded_requests() {
        let mock = MockTransport::new();
        for i in 0..MAX_RECORDED_REQUESTS + 5 {
            mock.send(get(&format!("mock://marketplace/v3/items/{i}")))
                .await
                .unwrap();
        }

        let requests = mock.requests();
        assert_eq!(requests.len(), MAX_RECORDED_REQUESTS);
        assert_eq!(requests[0].url, "mock://marketplace/v3/items/5");
    }
}

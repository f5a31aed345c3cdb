//! Cursor and offset pagination over list operations.
//!
//! Both paginators take the list operation as a closure from [`Params`] to a
//! future [`Envelope`], so they work over any [`CommandExecutor`] call and can
//! be driven by scripted closures in tests.
//!
//! [`CommandExecutor`]: walmart_core::CommandExecutor

use std::future::Future;

use serde_json::{Map, Value, json};
use tracing::debug;
use walmart_core::{Envelope, MarketplaceResult, Params};

/// Page size of cursor-paginated order listings.
pub const ORDER_PAGE_SIZE: i64 = 200;

/// Page size of offset-paginated feed and item listings.
pub const OFFSET_PAGE_SIZE: i64 = 20;

const LIMIT_PARAM: &str = "limit";
const OFFSET_PARAM: &str = "offset";
const NEXT_CURSOR_PARAM: &str = "nextCursor";

/// Elements of every page folded into one ordered sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedList {
    total_count: u64,
    elements: Vec<Value>,
    element_key: Option<String>,
    pages: usize,
}

impl AggregatedList {
    fn new(total_count: u64, element_key: Option<String>) -> Self {
        Self {
            total_count,
            elements: Vec::new(),
            element_key,
            pages: 0,
        }
    }

    /// `meta.totalCount` as reported by the first page.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// All elements, in page order.
    #[must_use]
    pub fn elements(&self) -> &[Value] {
        &self.elements
    }

    /// Number of pages folded in. Zero when the first page was not found.
    #[must_use]
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Whether nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Shape the result as a response envelope.
    ///
    /// With no pages this is [`Envelope::empty_list`]. Otherwise `elements`
    /// holds the sequence directly, or under the element key when one is set:
    /// `{"statusCode": 200, "meta": {"totalCount": n}, "elements": {"order": [...]}}`.
    #[must_use]
    pub fn into_envelope(self) -> Envelope {
        if self.pages == 0 {
            return Envelope::empty_list();
        }
        let elements = Value::Array(self.elements);
        let elements = match self.element_key {
            Some(key) => {
                let mut map = Map::new();
                map.insert(key, elements);
                Value::Object(map)
            }
            None => elements,
        };
        Envelope::from_value(json!({
            "statusCode": 200,
            "meta": { "totalCount": self.total_count },
            "elements": elements,
        }))
    }
}

/// Follows `meta.nextCursor` until the stream ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorPaginator {
    page_size: i64,
    element_key: Option<String>,
}

impl Default for CursorPaginator {
    fn default() -> Self {
        Self::new(ORDER_PAGE_SIZE)
    }
}

impl CursorPaginator {
    /// A paginator requesting `page_size` elements per page.
    #[must_use]
    pub fn new(page_size: i64) -> Self {
        Self {
            page_size,
            element_key: None,
        }
    }

    /// Read page elements from `elements.<key>` instead of `elements`.
    #[must_use]
    pub fn with_element_key(mut self, key: impl Into<String>) -> Self {
        self.element_key = Some(key.into());
        self
    }

    /// Fetch every page and fold them together.
    ///
    /// `limit` is set to the page size on every call. A 404 on the first page
    /// yields an empty result; a 404 on a later page ends the stream. Any
    /// other error aborts and is returned unchanged. `totalCount` is taken
    /// from the first page even when later pages disagree.
    pub async fn fetch_all<F, Fut>(
        &self,
        mut list: F,
        base_params: Params,
    ) -> MarketplaceResult<AggregatedList>
    where
        F: FnMut(Params) -> Fut,
        Fut: Future<Output = MarketplaceResult<Envelope>>,
    {
        let mut params = base_params;
        params.insert(LIMIT_PARAM, self.page_size);
        let mut aggregated = AggregatedList::new(0, self.element_key.clone());

        loop {
            let page = match list(params.clone()).await {
                Ok(page) => page,
                Err(err) if err.is_not_found() => {
                    debug!(pages = aggregated.pages, "List answered 404, ending pagination");
                    break;
                }
                Err(err) => return Err(err),
            };

            if aggregated.pages == 0 {
                aggregated.total_count = page.total_count().unwrap_or(0);
            }
            aggregated.pages += 1;
            aggregated
                .elements
                .extend(page_elements(&page, self.element_key.as_deref()));

            match page.next_cursor() {
                Some(cursor) => {
                    debug!(page = aggregated.pages, cursor, "Following next cursor");
                    params.insert(NEXT_CURSOR_PARAM, cursor);
                }
                None => break,
            }
        }

        Ok(aggregated)
    }
}

/// Walks `limit`/`offset` pages until a short page or a 404.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetPaginator {
    page_size: i64,
    element_path: Vec<String>,
}

impl OffsetPaginator {
    /// A paginator counting page elements at the dotted `element_path`,
    /// e.g. `results.feed`.
    #[must_use]
    pub fn new(page_size: i64, element_path: &str) -> Self {
        Self {
            page_size,
            element_path: element_path
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Fetch pages starting at offset zero.
    ///
    /// Stops after a page holding fewer than `page_size` elements, or when
    /// the endpoint answers 404. Other errors are returned unchanged.
    pub async fn fetch_all<F, Fut>(&self, mut list: F) -> MarketplaceResult<Vec<Envelope>>
    where
        F: FnMut(Params) -> Fut,
        Fut: Future<Output = MarketplaceResult<Envelope>>,
    {
        let mut pages = Vec::new();
        let mut offset = 0_i64;

        loop {
            let params = Params::new()
                .with(LIMIT_PARAM, self.page_size)
                .with(OFFSET_PARAM, offset);
            let page = match list(params).await {
                Ok(page) => page,
                Err(err) if err.is_not_found() => break,
                Err(err) => return Err(err),
            };

            let count = self.count_elements(&page);
            pages.push(page);
            if i64::try_from(count).unwrap_or(i64::MAX) < self.page_size {
                break;
            }
            offset += self.page_size;
        }

        debug!(pages = pages.len(), "Offset pagination finished");
        Ok(pages)
    }

    fn count_elements(&self, page: &Envelope) -> usize {
        let mut value = page.as_value();
        for key in &self.element_path {
            match value.get(key) {
                Some(next) => value = next,
                None => return 0,
            }
        }
        normalize(value).len()
    }
}

/// Elements of one page, with a singleton normalized to a one-element list.
fn page_elements(page: &Envelope, key: Option<&str>) -> Vec<Value> {
    let section = match (page.elements(), key) {
        (Some(elements), Some(key)) => elements.get(key),
        (elements, None) => elements,
        (None, Some(_)) => None,
    };
    section.map(normalize).unwrap_or_default()
}

fn normalize(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        Value::Null => Vec::new(),
        Value::String(s) if s.is_empty() => Vec::new(),
        Value::Object(map) if map.is_empty() => Vec::new(),
        other => vec![other.clone()],
    }
}

//! Parsed response envelopes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// One response's parsed body plus its `statusCode`.
///
/// List endpoints put the payload under `elements` and pagination data under
/// `meta` (`totalCount`, `nextCursor`). Bodies decoded from XML carry every
/// scalar as a string, so the numeric accessors accept both forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(Value);

impl Envelope {
    /// Wrap a decoded body, injecting `statusCode`.
    ///
    /// Non-object bodies are kept under a `body` key.
    #[must_use]
    pub fn from_body(status_code: u16, body: Value) -> Self {
        let mut map = match body {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("body".to_owned(), other);
                map
            }
        };
        map.insert("statusCode".to_owned(), Value::from(status_code));
        Self(Value::Object(map))
    }

    /// Wrap an already shaped JSON value.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// The canonical successful-but-empty list result.
    ///
    /// List endpoints answer 404 when nothing matches; callers see this instead.
    #[must_use]
    pub fn empty_list() -> Self {
        Self(json!({
            "statusCode": 200,
            "meta": { "totalCount": 0 },
            "elements": [],
        }))
    }

    /// The `statusCode` field.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.0
            .get("statusCode")
            .and_then(value_as_u64)
            .and_then(|n| u16::try_from(n).ok())
    }

    /// The `meta` section.
    #[must_use]
    pub fn meta(&self) -> Option<&Value> {
        self.0.get("meta")
    }

    /// The `elements` section.
    #[must_use]
    pub fn elements(&self) -> Option<&Value> {
        self.0.get("elements")
    }

    /// `meta.nextCursor`, when more pages exist.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.meta()
            .and_then(|m| m.get("nextCursor"))
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
    }

    /// `meta.totalCount`.
    #[must_use]
    pub fn total_count(&self) -> Option<u64> {
        self.meta()
            .and_then(|m| m.get("totalCount"))
            .and_then(value_as_u64)
    }

    /// Top-level field lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Borrow the underlying JSON value.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume into the underlying JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

fn value_as_u64(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

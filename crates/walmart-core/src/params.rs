//! Request parameters.

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::description::ParamType;

/// A file-like payload submitted as one part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    /// Form field name.
    pub field_name: String,
    /// File content.
    pub content: Bytes,
    /// File name reported in the part's `Content-Disposition`.
    pub filename: String,
    /// Content type of the part.
    pub content_type: String,
}

impl FilePayload {
    /// Create a new payload.
    pub fn new(
        field_name: impl Into<String>,
        content: impl Into<Bytes>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            content: content.into(),
            filename: filename.into(),
            content_type: content_type.into(),
        }
    }

    /// The content as UTF-8 text, if it is valid UTF-8.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }
}

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A string value.
    Text(String),
    /// An integer value.
    Integer(i64),
    /// A boolean value.
    Boolean(bool),
    /// A file submitted as multipart.
    File(FilePayload),
}

impl ParamValue {
    /// The wire representation for URI and query locations.
    ///
    /// Files have no textual form and yield `None`.
    #[must_use]
    pub fn to_wire_string(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Integer(n) => Some(n.to_string()),
            Self::Boolean(b) => Some(b.to_string()),
            Self::File(_) => None,
        }
    }

    /// Interpret this value as an integer, parsing text when needed.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Whether this value can be sent for a parameter of type `kind`.
    #[must_use]
    pub fn fits(&self, kind: ParamType) -> bool {
        match kind {
            ParamType::String => !matches!(self, Self::File(_)),
            ParamType::Integer => self.as_integer().is_some(),
            ParamType::Boolean => match self {
                Self::Boolean(_) => true,
                Self::Text(s) => s == "true" || s == "false",
                _ => false,
            },
            ParamType::File => matches!(self, Self::File(_)),
        }
    }

    /// Whether the value is empty text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<FilePayload> for ParamValue {
    fn from(value: FilePayload) -> Self {
        Self::File(value)
    }
}

/// Named parameters for one operation call.
///
/// # Examples
///
/// ```
/// use walmart_core::{ParamValue, Params};
///
/// let params = Params::new().with("limit", 200_i64).with("status", "Created");
/// assert_eq!(params.get("limit"), Some(&ParamValue::Integer(200)));
/// assert_eq!(params.get_str("status"), Some("Created"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a parameter, returning the previous value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.0.insert(name.into(), value.into())
    }

    /// Look up a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    /// Look up a text parameter.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(ParamValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Remove a parameter.
    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.0.remove(name)
    }

    /// Whether a parameter is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Params {
    type Item = (String, ParamValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_replace_existing_value() {
        let mut params = Params::new().with("nextCursor", "a");
        let previous = params.insert("nextCursor", "b");
        assert_eq!(previous, Some(ParamValue::Text("a".into())));
        assert_eq!(params.get_str("nextCursor"), Some("b"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_should_check_value_types() {
        assert!(ParamValue::from(5_i64).fits(ParamType::Integer));
        assert!(ParamValue::from("17").fits(ParamType::Integer));
        assert!(!ParamValue::from("seventeen").fits(ParamType::Integer));
        assert!(ParamValue::from(true).fits(ParamType::String));
        assert!(ParamValue::from("false").fits(ParamType::Boolean));
        let file = FilePayload::new("file", "<a/>", "file.xml", "text/xml");
        assert!(ParamValue::from(file.clone()).fits(ParamType::File));
        assert!(!ParamValue::from(file).fits(ParamType::String));
    }

    #[test]
    fn test_should_render_wire_strings() {
        assert_eq!(ParamValue::from(200_u32).to_wire_string().as_deref(), Some("200"));
        assert_eq!(ParamValue::from(false).to_wire_string().as_deref(), Some("false"));
        let file = FilePayload::new("file", "x", "file.xml", "text/xml");
        assert_eq!(ParamValue::from(file).to_wire_string(), None);
    }

    #[test]
    fn test_should_collect_from_pairs() {
        let params: Params = [("a", "1"), ("b", "2")].into_iter().collect();
        let names: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["a", "b"]);
    }
}

//! Bulk submission payloads.

use serde_json::{Map, Value};
use walmart_core::{FilePayload, MarketplaceError, MarketplaceResult};
use walmart_xml::{PathRule, XmlDocument, XmlSchema, render};

/// Multipart field name of a bulk file.
pub const BULK_FIELD_NAME: &str = "file";
/// File name of a bulk file.
pub const BULK_FILENAME: &str = "file.xml";
/// Content type of a bulk file.
pub const BULK_CONTENT_TYPE: &str = "text/xml";

/// Renders a sequence of records under a fixed wrapper element and packs the
/// document as a multipart file.
///
/// Each record becomes one `<item_tag>` child of `<wrapper>`, in input order:
///
/// ```
/// use serde_json::json;
/// use walmart_marketplace::BulkSubmission;
///
/// let payload = BulkSubmission::item_feed()
///     .build(&json!([{"sku": "A-1"}, {"sku": "B-2"}]))
///     .unwrap();
/// assert_eq!(payload.filename, "file.xml");
/// assert!(payload.text().unwrap().ends_with(
///     "<MPItemFeed><MPItem><sku>A-1</sku></MPItem><MPItem><sku>B-2</sku></MPItem></MPItemFeed>"
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkSubmission {
    wrapper: String,
    item_tag: String,
}

impl BulkSubmission {
    /// A builder wrapping records as `<wrapper><item_tag>..</item_tag>..</wrapper>`.
    pub fn new(wrapper: impl Into<String>, item_tag: impl Into<String>) -> Self {
        Self {
            wrapper: wrapper.into(),
            item_tag: item_tag.into(),
        }
    }

    /// The item feed: `<MPItemFeed>` of `<MPItem>` records.
    #[must_use]
    pub fn item_feed() -> Self {
        Self::new("MPItemFeed", "MPItem")
    }

    /// Mapping schema for this wrapper and item tag.
    #[must_use]
    pub fn schema(&self) -> XmlSchema {
        XmlSchema::new().rule(
            format!("/{}/{}", self.wrapper, self.item_tag),
            PathRule::new()
                .send_items_as(self.item_tag.as_str())
                .include_wrapping_tag(false),
        )
    }

    /// Render `items` as an XML document.
    ///
    /// # Errors
    ///
    /// [`MarketplaceError::Validation`] if `items` is not a sequence; mapping
    /// errors from the XML layer otherwise.
    pub fn render(&self, items: &Value) -> MarketplaceResult<XmlDocument> {
        if !items.is_array() {
            return Err(MarketplaceError::Validation(format!(
                "{} items must be a sequence",
                self.item_tag
            )));
        }

        let mut inner = Map::new();
        inner.insert(self.item_tag.clone(), items.clone());
        let mut root = Map::new();
        root.insert(self.wrapper.clone(), Value::Object(inner));

        Ok(render(&Value::Object(root), &self.schema())?)
    }

    /// Render `items` and wrap the document as a [`FilePayload`].
    pub fn build(&self, items: &Value) -> MarketplaceResult<FilePayload> {
        let document = self.render(items)?;
        Ok(FilePayload::new(
            BULK_FIELD_NAME,
            document.into_bytes(),
            BULK_FILENAME,
            BULK_CONTENT_TYPE,
        ))
    }
}

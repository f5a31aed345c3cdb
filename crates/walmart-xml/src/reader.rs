//! Response XML decoding.
//!
//! Marketplace responses are namespaced XML (`<ns2:list xmlns:ns2=...>`).
//! [`read_value`] turns such a body into a JSON value so that XML and JSON
//! responses share one envelope shape:
//!
//! - the root element is dropped and its content returned
//! - namespace prefixes are stripped (local names only)
//! - repeated sibling elements are collected into an array, in order
//! - a single child stays an object; text-only elements become strings
//! - attributes are ignored

use quick_xml::Reader;
use quick_xml::events::Event;
use serde_json::{Map, Value};

use crate::error::XmlError;

struct Frame {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn new(name: String) -> Self {
        Self {
            name,
            children: Map::new(),
            text: String::new(),
        }
    }

    fn into_value(self) -> Value {
        if self.children.is_empty() {
            Value::String(self.text.trim().to_owned())
        } else {
            Value::Object(self.children)
        }
    }

    fn insert(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }
}

/// Decode an XML document into a JSON value.
///
/// # Errors
///
/// Returns [`XmlError::Parse`] if the document is malformed, has no root
/// element or uses an unknown entity.
///
/// # Examples
///
/// ```
/// use walmart_xml::read_value;
///
/// let body = br#"<ns2:list xmlns:ns2="http://walmart.com/">
///   <ns2:meta><ns2:totalCount>2</ns2:totalCount></ns2:meta>
/// </ns2:list>"#;
/// let value = read_value(body).unwrap();
/// assert_eq!(value["meta"]["totalCount"], "2");
/// ```
pub fn read_value(xml: &[u8]) -> Result<Value, XmlError> {
    let mut reader = Reader::from_reader(xml);
    let mut stack: Vec<Frame> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(Frame::new(local_name(e.local_name().as_ref())?)),
            Event::Empty(e) => {
                let name = local_name(e.local_name().as_ref())?;
                match stack.last_mut() {
                    Some(parent) => parent.insert(name, Value::String(String::new())),
                    None => return Ok(Value::String(String::new())),
                }
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| XmlError::Parse("unbalanced end tag".to_owned()))?;
                match stack.last_mut() {
                    Some(parent) => {
                        let name = frame.name.clone();
                        parent.insert(name, frame.into_value());
                    }
                    None => return Ok(frame.into_value()),
                }
            }
            Event::Text(e) => {
                if let Some(frame) = stack.last_mut() {
                    let decoded = e
                        .decode()
                        .map_err(|err| XmlError::Parse(err.to_string()))?;
                    let unescaped = quick_xml::escape::unescape(&decoded)
                        .map_err(|err| XmlError::Parse(err.to_string()))?;
                    frame.text.push_str(&unescaped);
                }
            }
            Event::CData(e) => {
                if let Some(frame) = stack.last_mut() {
                    let decoded = e
                        .decode()
                        .map_err(|err| XmlError::Parse(err.to_string()))?;
                    frame.text.push_str(&decoded);
                }
            }
            Event::GeneralRef(e) => {
                if let Some(frame) = stack.last_mut() {
                    if let Some(ch) = e.resolve_char_ref()? {
                        frame.text.push(ch);
                    } else {
                        let entity = e
                            .decode()
                            .map_err(|err| XmlError::Parse(err.to_string()))?;
                        let resolved = quick_xml::escape::resolve_predefined_entity(&entity)
                            .ok_or_else(|| XmlError::Parse(format!("unknown entity &{entity};")))?;
                        frame.text.push_str(resolved);
                    }
                }
            }
            Event::Eof => {
                return Err(XmlError::Parse(if stack.is_empty() {
                    "missing root element".to_owned()
                } else {
                    "unexpected end of document".to_owned()
                }));
            }
            // Declaration, comments, processing instructions, doctype.
            _ => {}
        }
    }
}

fn local_name(raw: &[u8]) -> Result<String, XmlError> {
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|err| XmlError::Parse(err.to_string()))
}

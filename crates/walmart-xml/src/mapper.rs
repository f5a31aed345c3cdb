//! Schema-driven mapping from nested data to XML.
//!
//! Rendering happens in two passes: the input is first resolved into a small
//! element tree (names, prefixes, text) while the schema rules are checked,
//! then the tree is written out with quick-xml. Resolving first lets an
//! element whose children were all suppressed collapse to `<tag/>`.

use std::collections::BTreeSet;
use std::fmt;
use std::io;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde_json::Value;

use crate::error::XmlError;
use crate::schema::{PathRule, XmlSchema};

/// A rendered XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    xml: String,
}

impl XmlDocument {
    /// The document text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.xml
    }

    /// Consume into the document text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.xml
    }

    /// Consume into UTF-8 bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.xml.into_bytes()
    }
}

impl fmt::Display for XmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.xml)
    }
}

/// Render `data` as an XML document under `schema`.
///
/// `data` must be an object with exactly one member, which becomes the root
/// element. Namespaces applied by at least one rule are declared on the root;
/// declarations no rule refers to are left out.
///
/// # Errors
///
/// - [`XmlError::UndeclaredNamespace`] if a rule references an undeclared prefix
/// - [`XmlError::InvalidName`] if a key is not a valid element name
/// - [`XmlError::Mapping`] if the data does not fit the schema
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use walmart_xml::{PathRule, XmlSchema, render};
///
/// let schema = XmlSchema::new().rule("/lines/items", PathRule::new().send_items_as("line"));
/// let doc = render(&json!({"lines": {"items": ["a", "b"]}}), &schema).unwrap();
/// assert!(doc.as_str().ends_with("<lines><items><line>a</line><line>b</line></items></lines>"));
/// ```
pub fn render(data: &Value, schema: &XmlSchema) -> Result<XmlDocument, XmlError> {
    schema.validate()?;

    let (root_name, root_value) = match data {
        Value::Object(map) if map.len() == 1 => map
            .iter()
            .next()
            .ok_or_else(|| XmlError::Mapping("document must have a single root".to_owned()))?,
        _ => {
            return Err(XmlError::Mapping(
                "document must be an object with a single root member".to_owned(),
            ));
        }
    };

    let root_path = format!("/{root_name}");
    if schema
        .rule_at(&root_path)
        .is_some_and(|rule| !rule.include_wrapping_tag)
    {
        return Err(XmlError::Mapping(format!(
            "root element {root_name} cannot be suppressed"
        )));
    }

    let mut resolver = Resolver {
        schema,
        visited: BTreeSet::new(),
    };
    let mut roots = Vec::with_capacity(1);
    resolver.element(root_name, root_value, &root_path, None, &mut roots)?;
    resolver.check_required()?;

    let root = roots
        .pop()
        .ok_or_else(|| XmlError::Mapping(format!("root element {root_name} has no value")))?;

    let mut buf = Vec::with_capacity(512);
    let mut writer = Writer::new(&mut buf);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    let declarations: Vec<(String, &str)> = schema
        .referenced_namespaces()
        .map(|(prefix, uri)| (format!("xmlns:{prefix}"), uri))
        .collect();
    write_node(&mut writer, &root, &declarations)?;

    let xml = String::from_utf8(buf)
        .map_err(|err| XmlError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))?;
    tracing::trace!(root = %root_name, len = xml.len(), "rendered XML document");
    Ok(XmlDocument { xml })
}

/// A resolved element.
#[derive(Debug)]
struct Node {
    name: String,
    content: Content,
}

#[derive(Debug)]
enum Content {
    Text(String),
    Children(Vec<Node>),
}

struct Resolver<'a> {
    schema: &'a XmlSchema,
    visited: BTreeSet<String>,
}

impl Resolver<'_> {
    /// Resolve the element `name` at `path` into `out`.
    ///
    /// A suppressed wrapper pushes its children into `out` directly.
    fn element(
        &mut self,
        name: &str,
        value: &Value,
        path: &str,
        inherited: Option<&str>,
        out: &mut Vec<Node>,
    ) -> Result<(), XmlError> {
        if value.is_null() {
            return Ok(());
        }
        validate_name(name)?;
        self.visited.insert(path.to_owned());

        let rule = self.schema.rule_at(path);
        if let Some(rule) = rule {
            check_rule(rule, value, path)?;
        }
        let prefix = rule.and_then(|r| r.namespace.as_deref()).or(inherited);
        let child_prefix = rule
            .and_then(|r| r.child_namespace.as_deref())
            .or(inherited);

        let content = match value {
            Value::Object(map) => {
                let mut children = Vec::with_capacity(map.len());
                for (key, child) in map {
                    let child_path = format!("{path}/{key}");
                    self.element(key, child, &child_path, child_prefix, &mut children)?;
                }
                Content::Children(children)
            }
            Value::Array(items) => {
                let item_tag = rule.and_then(|r| r.send_items_as.as_deref());
                let mut children = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let tag = item_tag.map_or_else(|| format!("item{index}"), str::to_owned);
                    let item_path = format!("{path}/{tag}");
                    self.element(&tag, item, &item_path, child_prefix, &mut children)?;
                }
                Content::Children(children)
            }
            Value::Bool(b) => Content::Text(if *b { "true" } else { "false" }.to_owned()),
            Value::Number(n) => Content::Text(n.to_string()),
            Value::String(s) => Content::Text(s.clone()),
            Value::Null => return Ok(()),
        };

        if rule.is_some_and(|r| !r.include_wrapping_tag) {
            match content {
                Content::Children(children) => out.extend(children),
                Content::Text(_) => {
                    return Err(XmlError::Mapping(format!(
                        "cannot drop the wrapping tag of scalar value at {path}"
                    )));
                }
            }
            return Ok(());
        }

        out.push(Node {
            name: qualify(prefix, name),
            content,
        });
        Ok(())
    }

    /// Every `required` rule must have been reached.
    fn check_required(&self) -> Result<(), XmlError> {
        for (path, rule) in self.schema.rules() {
            if rule.required && !self.visited.contains(path) {
                return Err(XmlError::Mapping(format!(
                    "required element {path} is missing"
                )));
            }
        }
        Ok(())
    }
}

fn check_rule(rule: &PathRule, value: &Value, path: &str) -> Result<(), XmlError> {
    if rule.send_items_as.is_some() && !value.is_array() {
        return Err(XmlError::Mapping(format!(
            "expected a sequence at {path} for sendItemsAs"
        )));
    }
    let empty = match value {
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    };
    if rule.required && empty {
        return Err(XmlError::Mapping(format!(
            "required element {path} must not be empty"
        )));
    }
    Ok(())
}

fn qualify(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}:{name}"),
        None => name.to_owned(),
    }
}

/// Accepts `[A-Za-z_][A-Za-z0-9_.-]*`, including non-ASCII letters.
fn validate_name(name: &str) -> Result<(), XmlError> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(XmlError::InvalidName(name.to_owned()))
    }
}

fn write_node<W: io::Write>(
    writer: &mut Writer<W>,
    node: &Node,
    attributes: &[(String, &str)],
) -> Result<(), XmlError> {
    let mut start = BytesStart::new(node.name.as_str());
    for (key, value) in attributes {
        start.push_attribute((key.as_str(), *value));
    }

    match &node.content {
        Content::Text(text) if text.is_empty() => writer.write_event(Event::Empty(start))?,
        Content::Children(children) if children.is_empty() => {
            writer.write_event(Event::Empty(start))?;
        }
        Content::Text(text) => {
            writer.write_event(Event::Start(start))?;
            writer.write_event(Event::Text(BytesText::new(text)))?;
            writer.write_event(Event::End(BytesEnd::new(node.name.as_str())))?;
        }
        Content::Children(children) => {
            writer.write_event(Event::Start(start))?;
            for child in children {
                write_node(writer, child, &[])?;
            }
            writer.write_event(Event::End(BytesEnd::new(node.name.as_str())))?;
        }
    }
    Ok(())
}

//! XML mapping schemas.
//!
//! An [`XmlSchema`] attaches a [`PathRule`] to structural paths of the input
//! data. Paths are made of output element names without prefixes, starting at
//! the root: `/orderCancellation/orderLines/orderLine/orderLineStatuses`.
//! A sequence member's path is its container's path plus the member tag, even
//! when the container element itself is suppressed.

use std::collections::BTreeMap;

use crate::error::XmlError;

/// Mapping rules for one structural path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRule {
    /// Tag for each member of the sequence at this path.
    pub send_items_as: Option<String>,
    /// Whether the container element is written. Defaults to `true`.
    pub include_wrapping_tag: bool,
    /// Prefix of the element at this path.
    pub namespace: Option<String>,
    /// Prefix inherited by every element below this path.
    pub child_namespace: Option<String>,
    /// Whether the data at this path must exist and be non-empty.
    pub required: bool,
}

impl Default for PathRule {
    fn default() -> Self {
        Self {
            send_items_as: None,
            include_wrapping_tag: true,
            namespace: None,
            child_namespace: None,
            required: false,
        }
    }
}

impl PathRule {
    /// An empty rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rename each sequence member to `tag`.
    #[must_use]
    pub fn send_items_as(mut self, tag: impl Into<String>) -> Self {
        self.send_items_as = Some(tag.into());
        self
    }

    /// Write or suppress the container element.
    #[must_use]
    pub fn include_wrapping_tag(mut self, include: bool) -> Self {
        self.include_wrapping_tag = include;
        self
    }

    /// Prefix the element at this path.
    #[must_use]
    pub fn namespace(mut self, prefix: impl Into<String>) -> Self {
        self.namespace = Some(prefix.into());
        self
    }

    /// Prefix every element below this path.
    #[must_use]
    pub fn child_namespace(mut self, prefix: impl Into<String>) -> Self {
        self.child_namespace = Some(prefix.into());
        self
    }

    /// Require non-empty data at this path.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Path rules plus the `@namespaces` declaration table.
///
/// # Examples
///
/// ```
/// use walmart_xml::{PathRule, XmlSchema};
///
/// let schema = XmlSchema::new()
///     .rule(
///         "/orderCancellation",
///         PathRule::new().namespace("ns3").child_namespace("ns3"),
///     )
///     .rule("/orderCancellation/orderLines", PathRule::new().send_items_as("orderLine"))
///     .declare_namespace("ns3", "http://walmart.com/mp/v3/orders");
/// assert!(schema.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlSchema {
    rules: BTreeMap<String, PathRule>,
    namespaces: BTreeMap<String, String>,
}

impl XmlSchema {
    /// An empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a rule to `path`.
    #[must_use]
    pub fn rule(mut self, path: impl Into<String>, rule: PathRule) -> Self {
        self.rules.insert(path.into(), rule);
        self
    }

    /// Declare a namespace prefix.
    #[must_use]
    pub fn declare_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.namespaces.insert(prefix.into(), uri.into());
        self
    }

    /// The rule at `path`, if any.
    #[must_use]
    pub fn rule_at(&self, path: &str) -> Option<&PathRule> {
        self.rules.get(path)
    }

    /// All rules in path order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &PathRule)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Declared namespaces in prefix order.
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &str)> {
        self.namespaces.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Declared namespaces that some rule applies, in prefix order.
    ///
    /// A declaration no rule refers to has no effect on the output.
    pub fn referenced_namespaces(&self) -> impl Iterator<Item = (&str, &str)> {
        self.namespaces().filter(|(prefix, _)| {
            self.rules.values().any(|rule| {
                rule.namespace.as_deref() == Some(*prefix)
                    || rule.child_namespace.as_deref() == Some(*prefix)
            })
        })
    }

    /// Check that every referenced prefix is declared.
    pub fn validate(&self) -> Result<(), XmlError> {
        for rule in self.rules.values() {
            for prefix in [&rule.namespace, &rule.child_namespace].into_iter().flatten() {
                if !self.namespaces.contains_key(prefix) {
                    return Err(XmlError::UndeclaredNamespace(prefix.clone()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_default_to_wrapping_tag() {
        let rule = PathRule::new();
        assert!(rule.include_wrapping_tag);
        assert!(!rule.required);
        assert_eq!(rule.send_items_as, None);
    }

    #[test]
    fn test_should_reject_undeclared_child_namespace() {
        let schema = XmlSchema::new()
            .rule("/orderRefund", PathRule::new().child_namespace("ns3"))
            .declare_namespace("ns2", "http://walmart.com/mp/v3/orders");
        let err = schema.validate().unwrap_err();
        assert!(matches!(err, XmlError::UndeclaredNamespace(p) if p == "ns3"));
    }

    #[test]
    fn test_should_accept_unreferenced_declarations() {
        let schema = XmlSchema::new()
            .declare_namespace("ns2", "http://walmart.com/mp/v3/orders")
            .declare_namespace("ns3", "http://walmart.com");
        assert!(schema.validate().is_ok());
        assert_eq!(schema.namespaces().count(), 2);
        assert_eq!(schema.referenced_namespaces().count(), 0);
    }

    #[test]
    fn test_should_list_only_applied_namespaces() {
        let schema = XmlSchema::new()
            .rule("/orderShipment", PathRule::new().namespace("ns2"))
            .rule("/orderShipment/orderLines", PathRule::new().child_namespace("ns4"))
            .declare_namespace("ns2", "http://walmart.com/mp/v3/orders")
            .declare_namespace("ns3", "http://walmart.com")
            .declare_namespace("ns4", "http://walmart.com/mp/v3/lines");
        let prefixes: Vec<&str> = schema.referenced_namespaces().map(|(p, _)| p).collect();
        assert_eq!(prefixes, ["ns2", "ns4"]);
    }
}

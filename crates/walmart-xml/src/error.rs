//! XML error types.

use std::io;

use walmart_core::MarketplaceError;

/// Errors raised while rendering or reading XML.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An I/O error during XML writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An error from the underlying quick-xml library.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// The input data does not fit the schema.
    #[error("{0}")]
    Mapping(String),

    /// A namespace prefix is used but not declared in `@namespaces`.
    #[error("undeclared namespace prefix: {0}")]
    UndeclaredNamespace(String),

    /// A key cannot be used as an XML element name.
    #[error("invalid element name: {0:?}")]
    InvalidName(String),

    /// Malformed XML input.
    #[error("failed to parse XML: {0}")]
    Parse(String),
}

impl From<XmlError> for MarketplaceError {
    fn from(err: XmlError) -> Self {
        match err {
            XmlError::Mapping(msg) => Self::Mapping(msg),
            XmlError::Parse(msg) => Self::Decode(msg),
            XmlError::QuickXml(e) => Self::Decode(e.to_string()),
            other @ (XmlError::Io(_)
            | XmlError::UndeclaredNamespace(_)
            | XmlError::InvalidName(_)) => Self::Serialization(other.to_string()),
        }
    }
}

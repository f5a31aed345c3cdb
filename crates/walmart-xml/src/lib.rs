//! XML layer for the Walmart Marketplace client.
//!
//! Mutation endpoints (order cancellation, shipment, refund, bulk item feeds)
//! take XML documents built from nested JSON-like data; most responses come
//! back as namespaced XML. This crate covers both directions:
//!
//! - [`render`] maps a [`serde_json::Value`] to an [`XmlDocument`] under an
//!   [`XmlSchema`] (item renaming, wrapper suppression, namespace prefixes)
//! - [`read_value`] decodes a response body into a [`serde_json::Value`],
//!   dropping the root element and namespace prefixes
//!
//! # Conventions
//!
//! - XML declaration: `<?xml version="1.0" encoding="UTF-8"?>`
//! - Booleans: lowercase `true`/`false`
//! - `null` members are omitted
//! - Sequence members without a rename rule are emitted as `item{index}`

pub mod error;
pub mod mapper;
pub mod reader;
pub mod schema;

pub use error::XmlError;
pub use mapper::{XmlDocument, render};
pub use reader::read_value;
pub use schema::{PathRule, XmlSchema};

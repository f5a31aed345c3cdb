//! Core types, configuration and request preparation for the Walmart
//! Marketplace client.
//!
//! This crate holds everything the resource façades and the HTTP layer share:
//!
//! - [`MarketplaceError`] and [`MarketplaceResult`]
//! - [`ClientConfig`], [`Environment`] and [`Country`]
//! - [`Params`] / [`ParamValue`] / [`FilePayload`] for request parameters
//! - [`Envelope`] for parsed responses
//! - [`ServiceDescription`] and friends: the typed, validated description of
//!   every operation a resource exposes
//! - [`prepare_request`], which turns an operation name plus parameters into a
//!   [`PreparedRequest`]
//! - [`CommandExecutor`], the boundary trait the façades dispatch through

mod config;
mod description;
mod envelope;
mod error;
mod executor;
mod params;
mod request;

pub use config::{BASE_URL_PRODUCTION, BASE_URL_STAGING, ClientConfig, Country, Environment};
pub use description::{
    API_VERSION_PARAM, COUNTRY_PARAM, Operation, ParamLocation, ParamType, ParameterSpec,
    ResponseModel, ServiceDescription, template_placeholders,
};
pub use envelope::Envelope;
pub use error::{MarketplaceError, MarketplaceResult};
pub use executor::CommandExecutor;
pub use params::{FilePayload, ParamValue, Params};
pub use request::{PreparedRequest, RequestBody, prepare_request};

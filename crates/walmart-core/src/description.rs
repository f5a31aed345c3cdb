//! Typed service descriptions.
//!
//! A [`ServiceDescription`] lists every [`Operation`] a resource exposes: its
//! HTTP method, URI template (with `{ApiVersion}` and optional `{Country}`
//! placeholders), parameter schema and response model. Descriptions are
//! validated once at client construction; country routing is applied with the
//! pure [`ServiceDescription::with_country`] transformation.

use std::collections::BTreeMap;

use http::Method;

use crate::config::Country;
use crate::error::{MarketplaceError, MarketplaceResult};
use crate::params::{ParamValue, Params};

/// Name of the API version parameter present in every operation.
pub const API_VERSION_PARAM: &str = "ApiVersion";

/// Name of the country parameter added by [`ServiceDescription::with_country`].
pub const COUNTRY_PARAM: &str = "Country";

/// Where a parameter travels in the HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    /// Substituted into the URI template.
    Uri,
    /// Appended to the query string.
    Query,
    /// Sent as a request header.
    Header,
    /// Sent as the raw XML request body.
    Body,
    /// Sent as a multipart file part.
    PostFile,
}

/// Declared parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Free text.
    String,
    /// Whole number.
    Integer,
    /// `true` / `false`.
    Boolean,
    /// A [`FilePayload`](crate::FilePayload).
    File,
}

/// Schema of one operation parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    /// Whether the parameter must be present before dispatch.
    pub required: bool,
    /// Declared type.
    pub kind: ParamType,
    /// Transport location.
    pub location: ParamLocation,
    /// Upper bound for integer parameters.
    pub maximum: Option<i64>,
    /// Value used when the caller omits the parameter.
    pub default: Option<ParamValue>,
    /// Wire name when it differs from the parameter name.
    pub sent_as: Option<String>,
}

impl ParameterSpec {
    fn new(kind: ParamType, location: ParamLocation, required: bool) -> Self {
        Self {
            required,
            kind,
            location,
            maximum: None,
            default: None,
            sent_as: None,
        }
    }

    /// A required string URI segment.
    #[must_use]
    pub fn uri() -> Self {
        Self::new(ParamType::String, ParamLocation::Uri, true)
    }

    /// An optional query parameter.
    #[must_use]
    pub fn query(kind: ParamType) -> Self {
        Self::new(kind, ParamLocation::Query, false)
    }

    /// An optional string header.
    #[must_use]
    pub fn header() -> Self {
        Self::new(ParamType::String, ParamLocation::Header, false)
    }

    /// A required raw XML body.
    #[must_use]
    pub fn body() -> Self {
        Self::new(ParamType::String, ParamLocation::Body, true)
    }

    /// A required multipart file.
    #[must_use]
    pub fn post_file() -> Self {
        Self::new(ParamType::File, ParamLocation::PostFile, true)
    }

    /// Mark as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set an integer upper bound.
    #[must_use]
    pub fn maximum(mut self, maximum: i64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Set a default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<ParamValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set the wire name.
    #[must_use]
    pub fn sent_as(mut self, name: impl Into<String>) -> Self {
        self.sent_as = Some(name.into());
        self
    }
}

/// How a successful response body is turned into an envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ResponseModel {
    /// `statusCode` plus every field of the decoded body.
    #[default]
    Result,
    /// `statusCode` only; the body is ignored.
    Empty,
}

/// One API operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Operation name used for dispatch.
    pub name: String,
    /// HTTP method.
    pub http_method: Method,
    /// URI template, e.g. `/{ApiVersion}/orders/{purchaseOrderId}`.
    pub uri: String,
    /// Response model.
    pub response_model: ResponseModel,
    /// Parameter schema keyed by parameter name.
    pub parameters: BTreeMap<String, ParameterSpec>,
}

impl Operation {
    /// Create an operation. The required `ApiVersion` URI parameter is declared
    /// automatically.
    pub fn new(name: impl Into<String>, http_method: Method, uri: impl Into<String>) -> Self {
        let mut parameters = BTreeMap::new();
        parameters.insert(API_VERSION_PARAM.to_owned(), ParameterSpec::uri());
        Self {
            name: name.into(),
            http_method,
            uri: uri.into(),
            response_model: ResponseModel::default(),
            parameters,
        }
    }

    /// Declare a parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, spec: ParameterSpec) -> Self {
        self.parameters.insert(name.into(), spec);
        self
    }

    /// Set the response model.
    #[must_use]
    pub fn response_model(mut self, model: ResponseModel) -> Self {
        self.response_model = model;
        self
    }

    /// Look up a parameter schema.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.get(name)
    }

    fn validate(&self) -> MarketplaceResult<()> {
        let invalid =
            |reason: String| MarketplaceError::Description(format!("{}: {reason}", self.name));

        if !self.uri.starts_with('/') {
            return Err(invalid(format!("uri must start with '/': {}", self.uri)));
        }
        let placeholders = template_placeholders(&self.uri);
        if !placeholders.contains(&API_VERSION_PARAM) {
            return Err(invalid(format!("uri lacks {{{API_VERSION_PARAM}}}")));
        }
        for placeholder in &placeholders {
            match self.parameters.get(*placeholder) {
                Some(spec) if spec.location == ParamLocation::Uri && spec.required => {}
                Some(_) => {
                    return Err(invalid(format!(
                        "placeholder {{{placeholder}}} must be a required uri parameter"
                    )));
                }
                None => {
                    return Err(invalid(format!(
                        "placeholder {{{placeholder}}} has no parameter"
                    )));
                }
            }
        }

        let mut bodies = 0;
        for (name, spec) in &self.parameters {
            if spec.location == ParamLocation::Uri && !placeholders.contains(&name.as_str()) {
                return Err(invalid(format!("uri parameter {name} is not in the template")));
            }
            if matches!(spec.location, ParamLocation::Body | ParamLocation::PostFile) {
                bodies += 1;
            }
            if spec.maximum.is_some() && spec.kind != ParamType::Integer {
                return Err(invalid(format!("maximum on non-integer parameter {name}")));
            }
            if let Some(default) = &spec.default {
                if !default.fits(spec.kind) {
                    return Err(invalid(format!("default of {name} does not match its type")));
                }
            }
            if (spec.kind == ParamType::File) != (spec.location == ParamLocation::PostFile) {
                return Err(invalid(format!("{name}: files travel as post files only")));
            }
        }
        if bodies > 1 {
            return Err(invalid("more than one body parameter".to_owned()));
        }
        Ok(())
    }
}

/// Declarative description of a resource's operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescription {
    /// Resource name, used in logs.
    pub name: String,
    /// Value substituted for `{ApiVersion}`.
    pub api_version: String,
    /// Base URL override carried by the description itself.
    pub base_url: Option<String>,
    /// Country the operations were rewritten for.
    pub country: Option<Country>,
    operations: BTreeMap<String, Operation>,
}

impl ServiceDescription {
    /// Create an empty description.
    pub fn new(name: impl Into<String>, api_version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api_version: api_version.into(),
            base_url: None,
            country: None,
            operations: BTreeMap::new(),
        }
    }

    /// Add an operation.
    #[must_use]
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.insert(operation.name.clone(), operation);
        self
    }

    /// Set the base URL override.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Look up an operation by name.
    pub fn operation(&self, name: &str) -> MarketplaceResult<&Operation> {
        self.operations.get(name).ok_or_else(|| {
            MarketplaceError::Description(format!("{}: unknown operation {name}", self.name))
        })
    }

    /// Iterate over operations in name order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.values()
    }

    /// Validate every operation.
    pub fn validate(&self) -> MarketplaceResult<()> {
        if self.api_version.trim().is_empty() {
            return Err(MarketplaceError::Description(format!(
                "{}: empty api version",
                self.name
            )));
        }
        self.operations.values().try_for_each(Operation::validate)
    }

    /// Parameters every call of this description receives implicitly.
    #[must_use]
    pub fn default_params(&self) -> Params {
        let mut params = Params::new().with(API_VERSION_PARAM, self.api_version.as_str());
        if let Some(country) = self.country {
            params.insert(COUNTRY_PARAM, country.as_str());
        }
        params
    }

    /// Return a copy routed through a country segment.
    ///
    /// Every operation URI gets `/{Country}` inserted immediately after
    /// `{ApiVersion}` and a required `Country` URI parameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use http::Method;
    /// use walmart_core::{Country, Operation, ServiceDescription};
    ///
    /// let description = ServiceDescription::new("feed", "v3")
    ///     .with_operation(Operation::new("List", Method::GET, "/{ApiVersion}/feeds"));
    /// let rewritten = description.with_country(Country::Canada);
    ///
    /// let op = rewritten.operation("List").unwrap();
    /// assert_eq!(op.uri, "/{ApiVersion}/{Country}/feeds");
    /// assert!(op.parameter("Country").unwrap().required);
    /// assert_eq!(description.operation("List").unwrap().uri, "/{ApiVersion}/feeds");
    /// ```
    #[must_use]
    pub fn with_country(&self, country: Country) -> Self {
        let marker = format!("{{{API_VERSION_PARAM}}}");
        let operations = self
            .operations
            .iter()
            .map(|(name, op)| {
                let Some(pos) = op.uri.find(&marker) else {
                    return (name.clone(), op.clone());
                };
                let split = pos + marker.len();
                let uri = format!(
                    "{}/{{{COUNTRY_PARAM}}}{}",
                    &op.uri[..split],
                    &op.uri[split..]
                );
                let rewritten = Operation {
                    uri,
                    ..op.clone()
                }
                .param(COUNTRY_PARAM, ParameterSpec::uri());
                (name.clone(), rewritten)
            })
            .collect();

        Self {
            country: Some(country),
            operations,
            ..self.clone()
        }
    }
}

/// Placeholder names of a URI template, in order of appearance.
///
/// ```
/// use walmart_core::template_placeholders;
///
/// assert_eq!(
///     template_placeholders("/{ApiVersion}/orders/{purchaseOrderId}/cancel"),
///     ["ApiVersion", "purchaseOrderId"]
/// );
/// ```
#[must_use]
pub fn template_placeholders(uri: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = uri;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        names.push(&after[..end]);
        rest = &after[end + 1..];
    }
    names
}

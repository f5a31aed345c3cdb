//! Request preparation.
//!
//! [`prepare_request`] resolves an operation of a [`ServiceDescription`],
//! validates the caller's parameters against its schema and lays each value
//! out in its transport location. The result is a transport-agnostic
//! [`PreparedRequest`]; signing and sending happen in the HTTP layer.

use http::Method;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::description::{ParamLocation, ParamType, ResponseModel, ServiceDescription};
use crate::error::{MarketplaceError, MarketplaceResult};
use crate::params::{FilePayload, ParamValue, Params};

/// Characters escaped inside a URI path segment.
///
/// Everything but RFC 3986 unreserved characters is encoded, including `/`,
/// so a value can never introduce extra segments.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Body of a prepared request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// Raw XML document.
    Xml(String),
    /// A single multipart file part.
    Multipart(FilePayload),
}

/// A fully resolved request, ready to be signed and sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// Operation name.
    pub operation: String,
    /// HTTP method.
    pub method: Method,
    /// Expanded path, e.g. `/v3/orders/123/cancel`.
    pub path: String,
    /// Query parameters in declaration (name) order.
    pub query: Vec<(String, String)>,
    /// Operation-specific headers.
    pub headers: Vec<(String, String)>,
    /// Request body.
    pub body: RequestBody,
    /// How to decode the response.
    pub response_model: ResponseModel,
}

impl PreparedRequest {
    /// Full URL of this request against `base_url`.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        if !self.query.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(&self.query)
                .finish();
            url.push('?');
            url.push_str(&query);
        }
        url
    }
}

/// Build a [`PreparedRequest`] for `operation`.
///
/// The description's implicit parameters (`ApiVersion`, `Country`) are merged
/// first, then the caller's. Unknown parameters, missing or empty required
/// parameters, mistyped values and integers above `maximum` are rejected with
/// [`MarketplaceError::Validation`]. Absent optional parameters are omitted.
pub fn prepare_request(
    description: &ServiceDescription,
    operation: &str,
    params: Params,
) -> MarketplaceResult<PreparedRequest> {
    let op = description.operation(operation)?;
    let invalid = |reason: String| MarketplaceError::Validation(format!("{operation}: {reason}"));

    let mut merged = Params::new();
    for (name, value) in description.default_params() {
        if op.parameter(&name).is_some() {
            merged.insert(name, value);
        }
    }
    for (name, value) in params {
        if op.parameter(&name).is_none() {
            return Err(invalid(format!("unknown parameter {name}")));
        }
        merged.insert(name, value);
    }

    let mut path = op.uri.clone();
    let mut query = Vec::new();
    let mut headers = Vec::new();
    let mut body = RequestBody::Empty;

    for (name, spec) in &op.parameters {
        let value = match merged.get(name).or(spec.default.as_ref()) {
            Some(value) => value,
            None if spec.required => {
                return Err(invalid(format!("missing required parameter {name}")));
            }
            None => continue,
        };

        if spec.required && value.is_blank() {
            return Err(invalid(format!("parameter {name} must not be empty")));
        }
        if !value.fits(spec.kind) {
            return Err(invalid(format!(
                "parameter {name} must be of type {:?}",
                spec.kind
            )));
        }
        if let (Some(maximum), Some(n)) = (spec.maximum, value.as_integer()) {
            if n > maximum {
                return Err(invalid(format!(
                    "parameter {name} must be at most {maximum}, got {n}"
                )));
            }
        }

        let wire_name = spec.sent_as.as_deref().unwrap_or(name).to_owned();
        match spec.location {
            ParamLocation::Uri => {
                let text = wire_value(value, spec.kind);
                let encoded = utf8_percent_encode(&text, URI_ENCODE_SET).to_string();
                path = path.replace(&format!("{{{name}}}"), &encoded);
            }
            ParamLocation::Query => query.push((wire_name, wire_value(value, spec.kind))),
            ParamLocation::Header => headers.push((wire_name, wire_value(value, spec.kind))),
            ParamLocation::Body => body = RequestBody::Xml(wire_value(value, spec.kind)),
            ParamLocation::PostFile => {
                if let ParamValue::File(file) = value {
                    body = RequestBody::Multipart(file.clone());
                }
            }
        }
    }

    tracing::trace!(operation, path = %path, "prepared request");

    Ok(PreparedRequest {
        operation: op.name.clone(),
        method: op.http_method.clone(),
        path,
        query,
        headers,
        body,
        response_model: op.response_model,
    })
}

/// Textual form of a value, normalizing integers given as text.
fn wire_value(value: &ParamValue, kind: ParamType) -> String {
    match (kind, value.as_integer()) {
        (ParamType::Integer, Some(n)) => n.to_string(),
        _ => value.to_wire_string().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Country;
    use crate::description::{Operation, ParameterSpec};

    fn orders() -> ServiceDescription {
        ServiceDescription::new("order", "v3")
            .with_operation(
                Operation::new("List", Method::GET, "/{ApiVersion}/orders")
                    .param("limit", ParameterSpec::query(ParamType::Integer).maximum(200))
                    .param("nextCursor", ParameterSpec::query(ParamType::String))
                    .param(
                        "status",
                        ParameterSpec::query(ParamType::String).default_value("Created"),
                    ),
            )
            .with_operation(
                Operation::new(
                    "CancelOrder",
                    Method::POST,
                    "/{ApiVersion}/orders/{purchaseOrderId}/cancel",
                )
                .param("purchaseOrderId", ParameterSpec::uri())
                .param("order", ParameterSpec::body()),
            )
            .with_operation(
                Operation::new("BulkUpdate", Method::POST, "/{ApiVersion}/feeds")
                    .param(
                        "feedType",
                        ParameterSpec::query(ParamType::String).default_value("item"),
                    )
                    .param("file", ParameterSpec::post_file()),
            )
    }

    #[test]
    fn test_should_build_query_with_defaults() {
        let request = prepare_request(&orders(), "List", Params::new().with("limit", 200_i64))
            .expect("valid request");

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/v3/orders");
        assert_eq!(
            request.query,
            vec![
                ("limit".to_owned(), "200".to_owned()),
                ("status".to_owned(), "Created".to_owned()),
            ]
        );
        assert_eq!(request.body, RequestBody::Empty);
    }

    #[test]
    fn test_should_omit_absent_optional_parameters() {
        let request = prepare_request(&orders(), "List", Params::new()).expect("valid request");
        assert!(request.query.iter().all(|(k, _)| k != "nextCursor" && k != "limit"));
    }

    #[test]
    fn test_should_reject_missing_required_parameter() {
        let err = prepare_request(
            &orders(),
            "CancelOrder",
            Params::new().with("order", "<x/>"),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error: CancelOrder: missing required parameter purchaseOrderId"
        );
    }

    #[test]
    fn test_should_reject_empty_required_parameter() {
        let params = Params::new().with("purchaseOrderId", " ").with("order", "<x/>");
        let err = prepare_request(&orders(), "CancelOrder", params).unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation(_)));
    }

    #[test]
    fn test_should_reject_unknown_parameter() {
        let err = prepare_request(&orders(), "List", Params::new().with("bogus", "1")).unwrap_err();
        assert!(err.to_string().contains("unknown parameter bogus"));
    }

    #[test]
    fn test_should_enforce_maximum() {
        let err =
            prepare_request(&orders(), "List", Params::new().with("limit", 500_i64)).unwrap_err();
        assert!(err.to_string().contains("at most 200"));
    }

    #[test]
    fn test_should_reject_mistyped_value() {
        let err =
            prepare_request(&orders(), "List", Params::new().with("limit", "lots")).unwrap_err();
        assert!(err.to_string().contains("must be of type Integer"));
    }

    #[test]
    fn test_should_percent_encode_uri_segments() {
        let params = Params::new()
            .with("purchaseOrderId", "12/34 5")
            .with("order", "<orderCancellation/>");
        let request = prepare_request(&orders(), "CancelOrder", params).expect("valid request");

        assert_eq!(request.path, "/v3/orders/12%2F34%205/cancel");
        assert_eq!(
            request.body,
            RequestBody::Xml("<orderCancellation/>".to_owned())
        );
    }

    #[test]
    fn test_should_route_through_country_segment() {
        let description = orders().with_country(Country::Canada);
        let params = Params::new()
            .with("purchaseOrderId", "99")
            .with("order", "<x/>");
        let request = prepare_request(&description, "CancelOrder", params).expect("valid request");
        assert_eq!(request.path, "/v3/ca/orders/99/cancel");
    }

    #[test]
    fn test_should_attach_multipart_file() {
        let file = FilePayload::new("file", "<MPItemFeed/>", "file.xml", "text/xml");
        let request = prepare_request(
            &orders(),
            "BulkUpdate",
            Params::new().with("file", file.clone()),
        )
        .expect("valid request");

        assert_eq!(request.body, RequestBody::Multipart(file));
        assert_eq!(request.query, vec![("feedType".to_owned(), "item".to_owned())]);
    }

    #[test]
    fn test_should_render_full_url() {
        let request = prepare_request(
            &orders(),
            "List",
            Params::new().with("nextCursor", "?limit=10&soIndex=2"),
        )
        .expect("valid request");
        assert_eq!(
            request.url("https://marketplace.walmartapis.com/"),
            "https://marketplace.walmartapis.com/v3/orders\
             ?nextCursor=%3Flimit%3D10%26soIndex%3D2&status=Created"
        );
    }
}

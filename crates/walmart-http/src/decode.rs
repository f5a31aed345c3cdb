//! Response decoding.

use serde_json::Value;
use walmart_core::{Envelope, MarketplaceError, MarketplaceResult, ResponseModel};

use crate::transport::RawResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyFormat {
    Json,
    Xml,
    Text,
}

/// Decode a raw response into an [`Envelope`].
///
/// Non-2xx statuses become [`MarketplaceError::Transport`] carrying the body
/// text. JSON bodies are parsed as-is; XML bodies go through
/// [`walmart_xml::read_value`]. The format is taken from `Content-Type` and
/// sniffed from the first byte when the header is missing or generic.
pub fn decode_response(
    response: RawResponse,
    model: ResponseModel,
) -> MarketplaceResult<Envelope> {
    let status = response.status;
    if !(200..300).contains(&status) {
        let body = String::from_utf8_lossy(&response.body).into_owned();
        return Err(MarketplaceError::transport(status, body));
    }

    let trimmed = response.body.trim_ascii();
    if model == ResponseModel::Empty || trimmed.is_empty() {
        return Ok(Envelope::from_body(status, Value::Null));
    }

    let body = match detect_format(response.content_type.as_deref(), trimmed) {
        BodyFormat::Json => serde_json::from_slice(trimmed)
            .map_err(|e| MarketplaceError::Decode(format!("invalid JSON body: {e}")))?,
        BodyFormat::Xml => walmart_xml::read_value(trimmed)?,
        BodyFormat::Text => Value::String(String::from_utf8_lossy(trimmed).into_owned()),
    };
    Ok(Envelope::from_body(status, body))
}

fn detect_format(content_type: Option<&str>, body: &[u8]) -> BodyFormat {
    let content_type = content_type.unwrap_or_default().to_ascii_lowercase();
    if content_type.contains("json") {
        return BodyFormat::Json;
    }
    if content_type.contains("xml") {
        return BodyFormat::Xml;
    }
    match body.first() {
        Some(b'{' | b'[') => BodyFormat::Json,
        Some(b'<') => BodyFormat::Xml,
        _ => BodyFormat::Text,
    }
}

//! String-to-sign construction.

use http::Method;

/// Build the string to sign for one request.
///
/// `url` is the full request URL including the query string, exactly as it
/// will be sent. `timestamp_ms` is milliseconds since the Unix epoch.
///
/// ```text
/// consumer_id\nurl\nMETHOD\ntimestamp_ms\n
/// ```
#[must_use]
pub fn string_to_sign(consumer_id: &str, url: &str, method: &Method, timestamp_ms: i64) -> String {
    format!(
        "{consumer_id}\n{url}\n{}\n{timestamp_ms}\n",
        method.as_str().to_ascii_uppercase()
    )
}

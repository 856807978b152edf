//! Interpretation of raw Duo API output.
//!
//! The vendor tooling may print banner or status lines before the JSON body,
//! so the payload starts at the first `{`. Everything here is a pure function
//! of the input text.

use serde_json::{Map, Value};

/// Return the JSON candidate within `raw`: the text from the first `{`
/// onwards, or the literal `{}` when there is none.
#[must_use]
pub fn extract_json_payload(raw: &str) -> &str {
    match raw.find('{') {
        Some(start) => &raw[start..],
        None => "{}",
    }
}

/// Extract and parse the JSON payload of `raw`.
pub fn parse_payload(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(extract_json_payload(raw))
}

/// Unwrap the standard Duo envelope `{"stat": "OK", "response": {...}}`.
///
/// Only an object `response` member is unwrapped. Documents without one
/// (no member, or a string/array/null member such as the `""` Duo returns
/// for a deletion) are returned whole, so the result stays a mapping.
#[must_use]
pub fn unwrap_envelope(document: Value) -> Value {
    match document {
        Value::Object(mut map) if map.get("response").is_some_and(Value::is_object) => map
            .remove("response")
            .unwrap_or_else(|| Value::Object(Map::new())),
        other => other,
    }
}

/// Vendor-reported failure inside an otherwise successful response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorFailure {
    pub code: Option<i64>,
    pub message: String,
}

impl std::fmt::Display for VendorFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} (code {code})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Detect `{"stat": "FAIL", "code": .., "message": .., "message_detail": ..}`.
#[must_use]
pub fn vendor_failure(document: &Value) -> Option<VendorFailure> {
    let stat = document.get("stat")?.as_str()?;
    if !stat.eq_ignore_ascii_case("FAIL") {
        return None;
    }

    let message = document
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("request failed");
    let message = match document.get("message_detail").and_then(Value::as_str) {
        Some(detail) => format!("{message}: {detail}"),
        None => message.to_string(),
    };

    Some(VendorFailure {
        code: document.get("code").and_then(Value::as_i64),
        message,
    })
}

//! Structured results: per-call [`ApiOutcome`] and the final
//! [`OperationResult`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ApiCallFailure, MfaError};
use crate::response::parse_payload;

/// Interpreted result of one capability call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiOutcome {
    pub success: bool,
    pub raw_text: String,
    pub parsed_json: Option<Value>,
    pub error_detail: Option<String>,
}

impl ApiOutcome {
    /// Interpret the capability's return value. Parsing follows
    /// [`parse_payload`].
    #[must_use]
    pub fn from_call(result: Result<String, ApiCallFailure>) -> Self {
        match result {
            Ok(raw_text) => match parse_payload(&raw_text) {
                Ok(json) => Self {
                    success: true,
                    raw_text,
                    parsed_json: Some(json),
                    error_detail: None,
                },
                Err(e) => Self {
                    success: false,
                    raw_text,
                    parsed_json: None,
                    error_detail: Some(e.to_string()),
                },
            },
            Err(failure) => Self {
                success: false,
                raw_text: String::new(),
                parsed_json: None,
                error_detail: Some(failure.detail),
            },
        }
    }
}

/// Final output of one invocation.
///
/// Serialized as the JSON document the CLI prints; `msg` and `failed` appear
/// only on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResult {
    pub changed: bool,
    /// Echo of the input username.
    pub original_message: String,
    pub response: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,
}

impl OperationResult {
    /// A run that touched nothing (check mode).
    #[must_use]
    pub fn unchanged(username: impl Into<String>) -> Self {
        Self {
            changed: false,
            original_message: username.into(),
            response: Value::Object(Map::new()),
            msg: None,
            failed: false,
        }
    }

    /// A successful mutating call.
    #[must_use]
    pub fn changed(username: impl Into<String>, response: Value) -> Self {
        Self {
            changed: true,
            original_message: username.into(),
            response,
            msg: None,
            failed: false,
        }
    }

    /// A fatal failure. The message comes from [`MfaError`]'s `Display`,
    /// which never includes key material.
    #[must_use]
    pub fn failure(username: impl Into<String>, error: &MfaError) -> Self {
        Self {
            changed: false,
            original_message: username.into(),
            response: Value::Object(Map::new()),
            msg: Some(error.to_string()),
            failed: true,
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.msg.as_deref()
    }
}

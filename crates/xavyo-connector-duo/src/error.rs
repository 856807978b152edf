//! Duo connector error types.
//!
//! Every variant is terminal for the invocation: the connector never retries
//! and never falls back to another action. Messages are built from usernames,
//! paths and vendor diagnostics only, so key material cannot leak through
//! `Display` or `Debug`.

use thiserror::Error;

use crate::action::MfaAction;
use crate::config::ConfigError;

/// Result alias used throughout the connector.
pub type MfaResult<T> = Result<T, MfaError>;

/// Errors surfaced by the Duo connector.
#[derive(Debug, Error)]
pub enum MfaError {
    /// Directory lookup failed, returned malformed data, or found no user.
    #[error("Failed to retrieve user ID for {username}: {reason}")]
    Lookup { username: String, reason: String },

    /// The enroll/mutating call failed at the transport or authentication layer.
    #[error("Duo API call failed ({action}): {detail}")]
    ApiCall { action: MfaAction, detail: String },

    /// The call succeeded but its output could not be interpreted as JSON.
    #[error("Failed to parse Duo API response ({reason}): {raw}")]
    ResponseParse { raw: String, reason: String },

    /// The invocation itself is invalid (blank username, host or key).
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Missing or invalid connection settings, or client construction failed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MfaError {
    /// Short machine-readable kind, used for exit codes and structured logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Lookup { .. } => "lookup",
            Self::ApiCall { .. } => "api_call",
            Self::ResponseParse { .. } => "response_parse",
            Self::Validation(_) => "validation",
            Self::Config(_) => "config",
        }
    }
}

/// Call-level failure reported by a [`crate::client::DirectoryApi`]
/// implementation.
///
/// This is the equivalent of the vendor client exiting non-zero: the request
/// never produced a usable body. `detail` is the capability's own diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct ApiCallFailure {
    /// HTTP status, when the server answered at all.
    pub status: Option<u16>,
    pub detail: String,
}

impl ApiCallFailure {
    #[must_use]
    pub fn transport(detail: impl Into<String>) -> Self {
        Self {
            status: None,
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn http(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            detail: detail.into(),
        }
    }
}

impl From<ConfigError> for MfaError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<reqwest::Error> for ApiCallFailure {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors embed the request URL; the query string never carries
        // credentials, so the message is safe to keep.
        if e.is_timeout() {
            Self::transport(format!("request timed out: {e}"))
        } else if e.is_connect() {
            Self::transport(format!("connection failed: {e}"))
        } else {
            Self::transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_message_names_user() {
        let err = MfaError::Lookup {
            username: "bob".to_string(),
            reason: "User ID not found in response".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to retrieve user ID for bob: User ID not found in response"
        );
        assert_eq!(err.kind(), "lookup");
    }

    #[test]
    fn test_api_call_message_names_action() {
        let err = MfaError::ApiCall {
            action: MfaAction::Bypass,
            detail: "HTTP 401: invalid signature".to_string(),
        };
        assert!(err.to_string().contains("bypass"));
        assert!(err.to_string().contains("invalid signature"));
    }

    #[test]
    fn test_parse_error_keeps_raw_output() {
        let raw = "x".repeat(4096);
        let err = MfaError::ResponseParse {
            raw: raw.clone(),
            reason: "no JSON object found".to_string(),
        };
        assert!(err.to_string().ends_with(&raw));
    }

    #[test]
    fn test_config_error_conversion() {
        let err = MfaError::from(ConfigError::MissingVar("DUO_SKEY".to_string()));
        assert!(matches!(err, MfaError::Config(_)));
        assert_eq!(err.kind(), "config");
        assert_eq!(
            err.to_string(),
            "Configuration error: missing required environment variable: DUO_SKEY"
        );
    }

    #[test]
    fn test_call_failure_constructors() {
        assert_eq!(ApiCallFailure::transport("boom").status, None);
        assert_eq!(ApiCallFailure::http(503, "down").status, Some(503));
        assert_eq!(ApiCallFailure::http(503, "down").to_string(), "down");
    }
}

//! Username → Duo `user_id` resolution.

use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::DirectoryApi;
use crate::error::{MfaError, MfaResult};
use crate::request::ApiRequestDescriptor;
use crate::response::parse_payload;

/// Opaque Duo user identifier, valid for the current invocation only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentifier(String);

impl UserIdentifier {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Look up `username` in the directory and return its `user_id`.
///
/// A single failed lookup is fatal; there are no retries.
#[instrument(skip(api))]
pub async fn resolve_user_id(api: &dyn DirectoryApi, username: &str) -> MfaResult<UserIdentifier> {
    let lookup_error = |reason: String| MfaError::Lookup {
        username: username.to_string(),
        reason,
    };

    let raw = api
        .call(&ApiRequestDescriptor::user_lookup(username))
        .await
        .map_err(|e| lookup_error(e.to_string()))?;

    let document = parse_payload(&raw).map_err(|e| lookup_error(format!("invalid JSON: {e}")))?;
    let user_id = user_id_from_lookup(&document).map_err(|reason| lookup_error(reason.into()))?;

    debug!(user_id = %user_id, "resolved Duo user");
    Ok(user_id)
}

/// Pull the first record's `user_id` out of a `GET /admin/v1/users` body.
fn user_id_from_lookup(document: &Value) -> Result<UserIdentifier, &'static str> {
    let records = document
        .get("response")
        .ok_or("User ID not found in response")?
        .as_array()
        .ok_or("unexpected lookup response: 'response' is not a list")?;

    let first = records.first().ok_or("User ID not found in response")?;

    let user_id = first
        .get("user_id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or("user record has no user_id")?;

    // The id becomes a path segment of the follow-up request.
    if !user_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err("user record has an invalid user_id");
    }

    Ok(UserIdentifier(user_id.to_string()))
}

//! Execution of the enroll/bypass/delete call and interpretation of its
//! output.

use tracing::{info, instrument};

use crate::action::MfaAction;
use crate::client::DirectoryApi;
use crate::error::{MfaError, MfaResult};
use crate::outcome::{ApiOutcome, OperationResult};
use crate::request::ApiRequestDescriptor;
use crate::resolver::UserIdentifier;
use crate::response::{unwrap_envelope, vendor_failure};

/// Perform `action` for `username`.
///
/// Bypass and Delete address the user by `user_id`, which the caller must
/// have resolved beforehand. Every successful call reports `changed = true`.
#[instrument(skip(api, user_id), fields(user_id = user_id.map(UserIdentifier::as_str)))]
pub async fn execute_action(
    api: &dyn DirectoryApi,
    action: MfaAction,
    username: &str,
    user_id: Option<&UserIdentifier>,
) -> MfaResult<OperationResult> {
    let request =
        ApiRequestDescriptor::for_action(action, username, user_id.map(UserIdentifier::as_str))
            .ok_or_else(|| MfaError::Lookup {
                username: username.to_string(),
                reason: format!("no user ID resolved for {action}"),
            })?;

    let call = api.call(&request).await;
    if let Err(failure) = &call {
        return Err(MfaError::ApiCall {
            action,
            detail: failure.detail.clone(),
        });
    }

    let outcome = ApiOutcome::from_call(call);
    let response = interpret(action, outcome)?;

    info!(%action, "Duo user updated");
    Ok(OperationResult::changed(username, response))
}

/// Turn a completed call into the response payload, or the matching error.
fn interpret(action: MfaAction, outcome: ApiOutcome) -> MfaResult<serde_json::Value> {
    let ApiOutcome {
        success,
        raw_text,
        parsed_json,
        error_detail,
    } = outcome;

    let document = match parsed_json {
        Some(document) if success => document,
        _ => {
            return Err(MfaError::ResponseParse {
                raw: raw_text,
                reason: error_detail.unwrap_or_else(|| "invalid JSON".to_string()),
            })
        }
    };

    // Blank output (204 No Content) is an empty object; any other text must
    // contain a JSON object.
    if !raw_text.trim().is_empty() && !raw_text.contains('{') {
        return Err(MfaError::ResponseParse {
            raw: raw_text,
            reason: "no JSON object in output".to_string(),
        });
    }

    if let Some(failure) = vendor_failure(&document) {
        return Err(MfaError::ApiCall {
            action,
            detail: failure.to_string(),
        });
    }

    Ok(unwrap_envelope(document))
}

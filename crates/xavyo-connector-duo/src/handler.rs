//! Top-level lifecycle flow: check mode, optional lookup, then the action.

use tracing::{info, instrument};

use crate::action::ActionRequest;
use crate::client::DirectoryApi;
use crate::error::MfaResult;
use crate::executor::execute_action;
use crate::outcome::OperationResult;
use crate::resolver::resolve_user_id;

/// Whether the run may touch the remote directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Perform the lookup and the action.
    #[default]
    Apply,
    /// Dry run: return an unchanged result without any network call.
    Check,
}

/// Run one invocation against `api`.
///
/// The mode is decided once, before any request is issued. Calls are strictly
/// sequential: the lookup (Bypass/Delete only) completes before the action.
#[instrument(skip_all, fields(username = %request.username, action = %request.action, ?mode))]
pub async fn run(
    request: &ActionRequest,
    api: &dyn DirectoryApi,
    mode: RunMode,
) -> MfaResult<OperationResult> {
    if mode == RunMode::Check {
        info!("check mode, skipping Duo API calls");
        return Ok(OperationResult::unchanged(&request.username));
    }

    let user_id = if request.action.requires_user_id() {
        Some(resolve_user_id(api, &request.username).await?)
    } else {
        None
    };

    execute_action(api, request.action, &request.username, user_id.as_ref()).await
}

//! Single-invocation execution: build the client, run the flow, render the
//! result.

use tracing::info;
use xavyo_connector_duo::client::DuoClient;
use xavyo_connector_duo::handler::{self, RunMode};
use xavyo_connector_duo::outcome::OperationResult;

use crate::args::Cli;
use crate::error::CliResult;

/// Run the requested action and return the structured result.
pub async fn execute(cli: &Cli) -> CliResult<OperationResult> {
    let config = cli.duo_config()?;
    let request = cli.action_request(&config)?;
    let mode = cli.run_mode();

    // Check mode: no client, no network.
    if mode == RunMode::Check {
        return Ok(OperationResult::unchanged(&request.username));
    }

    let client = DuoClient::new(&config)?;
    info!(host = %request.host, action = %request.action, "running Duo action");

    Ok(handler::run(&request, &client, mode).await?)
}

/// Render a result as the JSON document printed on stdout.
pub fn render(result: &OperationResult) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|e| {
        format!("{{\"failed\": true, \"msg\": \"failed to serialize result: {e}\"}}")
    })
}

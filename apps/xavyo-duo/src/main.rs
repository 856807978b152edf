//! xavyo-duo - manage the MFA state of a single Duo user
//!
//! Enrolls a user, puts them in bypass, or deletes them, then prints the
//! outcome as JSON on stdout.

use clap::Parser;
use xavyo_connector_duo::outcome::OperationResult;
use xavyo_duo::args::Cli;
use xavyo_duo::error::CliError;
use xavyo_duo::logging::{self, LogLevel};
use xavyo_duo::run;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = logging::init(LogLevel::from_occurrences(cli.verbose)) {
        e.print();
    }

    match run::execute(&cli).await {
        Ok(result) => {
            println!("{}", run::render(&result));
            std::process::exit(0);
        }
        Err(e) => {
            fail(&cli.username, &e);
            std::process::exit(e.exit_code());
        }
    }
}

fn fail(username: &str, error: &CliError) {
    tracing::error!(error = %error, "Duo action failed");
    let result = match error {
        CliError::Mfa(e) => OperationResult::failure(username, e),
        other => {
            let mut result = OperationResult::unchanged(username);
            result.msg = Some(other.to_string());
            result.failed = true;
            result
        }
    };
    println!("{}", run::render(&result));
    error.print();
}

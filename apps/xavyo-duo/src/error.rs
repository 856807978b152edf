//! CLI error types and exit codes

use thiserror::Error;
use xavyo_connector_duo::MfaError;

/// Exit codes for the CLI
/// - 0: Success (including check mode)
/// - 1: General error
/// - 2: User lookup failed
/// - 3: Duo API call failed
/// - 4: Duo API response could not be parsed
/// - 5: Invalid input or configuration
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Mfa(#[from] MfaError),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Mfa(e) => match e {
                MfaError::Lookup { .. } => 2,
                MfaError::ApiCall { .. } => 3,
                MfaError::ResponseParse { .. } => 4,
                MfaError::Validation(_) | MfaError::Config(_) => 5,
            },
            CliError::Logging(_) => 1,
        }
    }

    /// Print the error to stderr with appropriate formatting
    pub fn print(&self) {
        let use_color = std::env::var("NO_COLOR").is_err();

        if use_color {
            eprintln!("\x1b[31mError:\x1b[0m {}", self);
        } else {
            eprintln!("Error: {}", self);
        }

        if let Some(suggestion) = self.suggestion() {
            if use_color {
                eprintln!("\n\x1b[33mSuggestion:\x1b[0m {}", suggestion);
            } else {
                eprintln!("\nSuggestion: {}", suggestion);
            }
        }
    }

    /// Get a suggested action for this error
    fn suggestion(&self) -> Option<&'static str> {
        match self {
            CliError::Mfa(MfaError::Lookup { .. }) => {
                Some("Check that the username exists in Duo and the integration has Admin API read permission.")
            }
            CliError::Mfa(MfaError::ApiCall { .. }) => {
                Some("Verify the API host and the integration/secret key pair.")
            }
            CliError::Mfa(MfaError::Config(_)) => {
                Some("Pass --host/--ikey/--skey or set DUO_HOST, DUO_IKEY and DUO_SKEY.")
            }
            _ => None,
        }
    }
}

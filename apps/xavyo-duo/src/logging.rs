//! Logging setup for the CLI.
//!
//! Logs go to stderr so that stdout carries only the JSON result. `RUST_LOG`
//! overrides the level chosen by flags.

use tracing_subscriber::EnvFilter;

use crate::error::{CliError, CliResult};

/// Verbosity level for CLI output
///
/// Levels are ordered: Normal < Verbose < Debug < Trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Warnings and errors only (default)
    #[default]
    Normal = 0,
    /// Progress messages for each operation
    Verbose = 1,
    /// HTTP method, path and status
    Debug = 2,
    /// Everything, including dependency internals
    Trace = 3,
}

impl LogLevel {
    /// Map a repeated `-v` count to a level.
    pub fn from_occurrences(count: u8) -> Self {
        match count {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Default filter directive for this level.
    pub fn directive(&self) -> &'static str {
        match self {
            Self::Normal => "warn",
            Self::Verbose => "warn,xavyo_connector_duo=info,xavyo_duo=info",
            Self::Debug => "warn,xavyo_connector_duo=debug,xavyo_duo=debug",
            Self::Trace => "trace",
        }
    }
}

/// Install the global subscriber.
pub fn init(level: LogLevel) -> CliResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}

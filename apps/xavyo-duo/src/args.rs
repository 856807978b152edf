//! Command-line arguments
//!
//! Connection settings given as flags take precedence over the matching
//! `DUO_*` environment variables; both go through
//! [`DuoConfig::from_reader`].

use std::env::VarError;

use clap::{ArgAction, Parser};
use xavyo_connector_duo::action::{ActionRequest, MfaAction};
use xavyo_connector_duo::config::DuoConfig;
use xavyo_connector_duo::handler::RunMode;
use xavyo_connector_duo::secret::SecretKey;
use xavyo_connector_duo::MfaResult;

/// xavyo-duo - Enroll, bypass or delete a single Duo MFA user
#[derive(Parser, Debug)]
#[command(name = "xavyo-duo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Username of the user to enroll, bypass or delete
    #[arg(long, short = 'u', env = "DUO_USERNAME")]
    pub username: String,

    /// Duo API hostname (e.g. api-XXXXXXXX.duosecurity.com) [env: DUO_HOST]
    #[arg(long)]
    pub host: Option<String>,

    /// Duo integration key [env: DUO_IKEY]
    #[arg(long, value_parser = parse_secret)]
    pub ikey: Option<SecretKey>,

    /// Duo secret key [env: DUO_SKEY]
    #[arg(long, value_parser = parse_secret)]
    pub skey: Option<SecretKey>,

    /// Action to perform
    #[arg(long, short = 'a', env = "DUO_ACTION", value_enum, default_value_t = MfaAction::Enroll)]
    pub action: MfaAction,

    /// Check mode: report what would happen without calling Duo
    #[arg(long, alias = "dry-run")]
    pub check: bool,

    /// Per-request timeout in seconds [env: DUO_TIMEOUT_SECS, default: 30]
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_secret(value: &str) -> Result<SecretKey, String> {
    if value.trim().is_empty() {
        return Err("value must not be empty".to_string());
    }
    Ok(SecretKey::new(value))
}

impl Cli {
    /// Validated single-user request for the resolved connection settings.
    pub fn action_request(&self, config: &DuoConfig) -> MfaResult<ActionRequest> {
        ActionRequest::new(
            self.username.clone(),
            config.host.clone(),
            config.ikey.clone(),
            config.skey.clone(),
            self.action,
        )
    }

    /// Connection settings from flags, falling back to the process
    /// environment.
    pub fn duo_config(&self) -> MfaResult<DuoConfig> {
        self.duo_config_with(|key| std::env::var(key))
    }

    /// Connection settings from flags, falling back to `env`.
    pub fn duo_config_with<F>(&self, env: F) -> MfaResult<DuoConfig>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let config = DuoConfig::from_reader(|key| {
            let flag = match key {
                "DUO_HOST" => self.host.clone(),
                "DUO_IKEY" => self.ikey.as_ref().map(|k| k.expose_secret().to_string()),
                "DUO_SKEY" => self.skey.as_ref().map(|k| k.expose_secret().to_string()),
                "DUO_TIMEOUT_SECS" => self.timeout_secs.map(|secs| secs.to_string()),
                _ => None,
            };
            flag.map_or_else(|| env(key), Ok)
        })?;
        Ok(config)
    }

    pub fn run_mode(&self) -> RunMode {
        if self.check {
            RunMode::Check
        } else {
            RunMode::Apply
        }
    }
}

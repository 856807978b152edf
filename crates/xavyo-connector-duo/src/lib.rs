//! # Duo MFA Connector
//!
//! Lifecycle management of a single user in the Duo Security directory:
//! enroll a new user, put an existing user in bypass, or delete them.
//!
//! ## Flow
//!
//! 1. [`resolver::resolve_user_id`] maps a username to its Duo `user_id`
//!    (Bypass and Delete only).
//! 2. [`executor::execute_action`] builds the request for the action, calls
//!    the API and interprets the output.
//! 3. [`handler::run`] composes the two and honors check mode.
//!
//! Network access goes through the [`client::DirectoryApi`] trait;
//! [`client::DuoClient`] is the signed HTTPS implementation.
//!
//! ## Example
//!
//! ```ignore
//! use xavyo_connector_duo::prelude::*;
//!
//! // DUO_HOST, DUO_IKEY, DUO_SKEY and optionally DUO_TIMEOUT_SECS
//! let config = DuoConfig::from_env()?;
//! let client = DuoClient::new(&config)?;
//! let request = ActionRequest::new("alice", &config.host, config.ikey.clone(),
//!     config.skey.clone(), MfaAction::Enroll)?;
//! let result = run(&request, &client, RunMode::Apply).await?;
//! println!("{}", serde_json::to_string(&result)?);
//! ```

pub mod action;
pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod handler;
pub mod outcome;
pub mod request;
pub mod resolver;
pub mod response;
pub mod secret;
pub mod signing;

pub use error::{ApiCallFailure, MfaError, MfaResult};

/// Commonly used types.
pub mod prelude {
    pub use crate::action::{ActionRequest, MfaAction};
    pub use crate::client::{DirectoryApi, DuoClient};
    pub use crate::config::DuoConfig;
    pub use crate::error::{ApiCallFailure, MfaError, MfaResult};
    pub use crate::handler::{run, RunMode};
    pub use crate::outcome::OperationResult;
    pub use crate::secret::SecretKey;
}

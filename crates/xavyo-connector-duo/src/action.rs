//! Invocation types: the requested action and the validated request.

use std::fmt;

use crate::error::{MfaError, MfaResult};
use crate::secret::SecretKey;

/// Lifecycle action applied to a single Duo user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum MfaAction {
    /// Start second-factor registration for the user.
    #[default]
    Enroll,
    /// Temporarily disable second-factor enforcement.
    Bypass,
    /// Remove the user from the directory.
    Delete,
}

impl MfaAction {
    pub const ALL: [MfaAction; 3] = [Self::Enroll, Self::Bypass, Self::Delete];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enroll => "enroll",
            Self::Bypass => "bypass",
            Self::Delete => "delete",
        }
    }

    /// Whether the action addresses an existing user record and therefore
    /// needs the username resolved to a Duo `user_id` first.
    #[must_use]
    pub fn requires_user_id(self) -> bool {
        matches!(self, Self::Bypass | Self::Delete)
    }
}

impl fmt::Display for MfaAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated single-user invocation.
#[derive(Debug, Clone)]
pub struct ActionRequest {
    pub username: String,
    pub host: String,
    pub ikey: SecretKey,
    pub skey: SecretKey,
    pub action: MfaAction,
}

impl ActionRequest {
    /// Build a request, rejecting blank fields.
    pub fn new(
        username: impl Into<String>,
        host: impl Into<String>,
        ikey: SecretKey,
        skey: SecretKey,
        action: MfaAction,
    ) -> MfaResult<Self> {
        let username = username.into();
        let host = host.into();

        if username.trim().is_empty() {
            return Err(MfaError::Validation("username must not be empty".into()));
        }
        if host.trim().is_empty() {
            return Err(MfaError::Validation("host must not be empty".into()));
        }
        if ikey.is_empty() {
            return Err(MfaError::Validation("ikey must not be empty".into()));
        }
        if skey.is_empty() {
            return Err(MfaError::Validation("skey must not be empty".into()));
        }

        Ok(Self {
            username,
            host,
            ikey,
            skey,
            action,
        })
    }
}

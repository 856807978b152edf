//! Request descriptors and the action-to-endpoint table.

use std::fmt;

use crate::action::MfaAction;

/// Path of the directory user collection (lookup by `username`).
pub const USERS_PATH: &str = "/admin/v1/users";

/// Path of the Auth API enrollment endpoint.
pub const ENROLL_PATH: &str = "/auth/v2/enroll";

/// HTTP methods used by the connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }

    /// Whether parameters travel in the request body rather than the query.
    #[must_use]
    pub fn has_form_body(self) -> bool {
        matches!(self, Self::Post)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One API call: method, path and ordered parameters.
///
/// Built fresh per call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequestDescriptor {
    method: HttpMethod,
    path: String,
    params: Vec<(String, String)>,
}

impl ApiRequestDescriptor {
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Directory lookup of a single username.
    #[must_use]
    pub fn user_lookup(username: &str) -> Self {
        Self::new(HttpMethod::Get, USERS_PATH).with_param("username", username)
    }

    /// Request for `action`.
    ///
    /// Returns `None` when the action addresses an existing user and no
    /// `user_id` was supplied.
    #[must_use]
    pub fn for_action(action: MfaAction, username: &str, user_id: Option<&str>) -> Option<Self> {
        let request = match action {
            MfaAction::Enroll => {
                Self::new(HttpMethod::Post, ENROLL_PATH).with_param("username", username)
            }
            MfaAction::Bypass => Self::new(HttpMethod::Post, user_path(user_id?))
                .with_param("status", "bypass"),
            MfaAction::Delete => Self::new(HttpMethod::Delete, user_path(user_id?)),
        };
        Some(request)
    }
}

impl fmt::Display for ApiRequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// `/admin/v1/users/{user_id}` with the id percent-encoded as one segment.
fn user_path(user_id: &str) -> String {
    format!("{USERS_PATH}/{}", urlencoding::encode(user_id))
}

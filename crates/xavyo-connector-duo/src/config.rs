//! Duo connection configuration.

use std::time::Duration;

use crate::secret::SecretKey;

/// Default HTTP timeout for a single Duo API call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for one Duo account.
#[derive(Debug, Clone)]
pub struct DuoConfig {
    /// API hostname, e.g. `api-XXXXXXXX.duosecurity.com`.
    pub host: String,

    /// Integration key.
    pub ikey: SecretKey,

    /// Secret key.
    pub skey: SecretKey,

    /// Per-request timeout. There are no retries, so this bounds each call.
    pub timeout: Duration,
}

impl DuoConfig {
    #[must_use]
    pub fn new(host: impl Into<String>, ikey: SecretKey, skey: SecretKey) -> Self {
        Self {
            host: host.into(),
            ikey,
            skey,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_reader(|key| std::env::var(key))
    }

    /// Load configuration from a custom variable reader.
    ///
    /// Reads `DUO_HOST`, `DUO_IKEY`, `DUO_SKEY` (required) and
    /// `DUO_TIMEOUT_SECS` (optional).
    pub fn from_reader<F>(reader: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let required = |key: &str| {
            reader(key)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingVar(key.to_string()))
        };

        let host = required("DUO_HOST")?;
        let ikey = SecretKey::new(required("DUO_IKEY")?);
        let skey = SecretKey::new(required("DUO_SKEY")?);

        let timeout_secs = match reader("DUO_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue("DUO_TIMEOUT_SECS".into(), e.to_string())
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self::new(host, ikey, skey).with_timeout(Duration::from_secs(timeout_secs)))
    }

    /// Base URL derived from the host. A host that already carries a scheme
    /// is used as is.
    #[must_use]
    pub fn base_url(&self) -> String {
        let host = self.host.trim().trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{host}")
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(String),

    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::env::VarError;

    /// Create a reader closure from a HashMap (no global env mutation).
    fn make_reader(vars: HashMap<&str, &str>) -> impl Fn(&str) -> Result<String, VarError> {
        let owned: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| owned.get(key).cloned().ok_or(VarError::NotPresent)
    }

    fn required_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("DUO_HOST", "api-test.duosecurity.com"),
            ("DUO_IKEY", "DIXXXXXXXXXXXXXXXXXX"),
            ("DUO_SKEY", "secretsecretsecret"),
        ])
    }

    #[test]
    fn test_defaults() {
        let config = DuoConfig::from_reader(make_reader(required_vars())).unwrap();
        assert_eq!(config.host, "api-test.duosecurity.com");
        assert_eq!(config.ikey.expose_secret(), "DIXXXXXXXXXXXXXXXXXX");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_custom_timeout() {
        let mut vars = required_vars();
        vars.insert("DUO_TIMEOUT_SECS", "5");
        let config = DuoConfig::from_reader(make_reader(vars)).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_timeout() {
        let mut vars = required_vars();
        vars.insert("DUO_TIMEOUT_SECS", "soon");
        let err = DuoConfig::from_reader(make_reader(vars)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key, _) if key == "DUO_TIMEOUT_SECS"));
    }

    #[test]
    fn test_missing_and_blank_vars() {
        for key in ["DUO_HOST", "DUO_IKEY", "DUO_SKEY"] {
            let mut vars = required_vars();
            vars.remove(key);
            let err = DuoConfig::from_reader(make_reader(vars)).unwrap_err();
            assert!(matches!(err, ConfigError::MissingVar(ref k) if k == key));

            let mut vars = required_vars();
            vars.insert(key, "   ");
            assert!(DuoConfig::from_reader(make_reader(vars)).is_err());
        }
    }

    #[test]
    fn test_debug_hides_keys() {
        let config = DuoConfig::from_reader(make_reader(required_vars())).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("DIXXXXXXXXXXXXXXXXXX"));
        assert!(!debug.contains("secretsecretsecret"));
    }

    #[test]
    fn test_base_url() {
        let config = DuoConfig::new("api-test.duosecurity.com", "i".into(), "s".into());
        assert_eq!(config.base_url(), "https://api-test.duosecurity.com");

        let config = DuoConfig::new("http://127.0.0.1:8080/", "i".into(), "s".into());
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
    }
}

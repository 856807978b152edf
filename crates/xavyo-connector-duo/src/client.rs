//! Duo API capability and its reqwest-based implementation.
//!
//! [`DirectoryApi`] is the seam between the lifecycle flow and the network:
//! "perform method M on path P with parameters Q, return the raw body or
//! fail". [`DuoClient`] fulfils it with signed HTTPS requests.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, DATE};
use reqwest::Client;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::DuoConfig;
use crate::error::{ApiCallFailure, MfaError, MfaResult};
use crate::request::ApiRequestDescriptor;
use crate::response::vendor_failure;
use crate::secret::SecretKey;
use crate::signing::{canonical_params, rfc2822_now, sign_request};

/// Capability to perform one authenticated Duo API call.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Perform `request` and return the raw response text.
    async fn call(&self, request: &ApiRequestDescriptor) -> Result<String, ApiCallFailure>;
}

/// Signed HTTP client for the Duo Admin and Auth APIs.
#[derive(Debug, Clone)]
pub struct DuoClient {
    /// Base URL requests are sent to (scheme + authority).
    base_url: Url,
    /// Authority covered by the signature (lowercased when signing).
    signing_host: String,
    ikey: SecretKey,
    skey: SecretKey,
    http_client: Client,
}

impl DuoClient {
    /// Create a client from connection settings.
    pub fn new(config: &DuoConfig) -> MfaResult<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("xavyo-connector-duo/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MfaError::Config(format!("Failed to build HTTP client: {e}")))?;

        Self::with_http_client(
            &config.base_url(),
            config.ikey.clone(),
            config.skey.clone(),
            http_client,
        )
    }

    /// Create a client with a pre-built `reqwest::Client` (for testing).
    pub fn with_http_client(
        base_url: &str,
        ikey: SecretKey,
        skey: SecretKey,
        http_client: Client,
    ) -> MfaResult<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| MfaError::Config(format!("Invalid Duo host '{base_url}': {e}")))?;
        let host = base_url
            .host_str()
            .ok_or_else(|| MfaError::Config(format!("Duo host '{base_url}' has no hostname")))?;
        let signing_host = match base_url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        Ok(Self {
            base_url,
            signing_host,
            ikey,
            skey,
            http_client,
        })
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, request: &ApiRequestDescriptor) -> Result<Url, ApiCallFailure> {
        let mut url = self
            .base_url
            .join(request.path())
            .map_err(|e| ApiCallFailure::transport(format!("invalid path {}: {e}", request.path())))?;
        if !request.method().has_form_body() && !request.params().is_empty() {
            url.set_query(Some(&canonical_params(request.params())));
        }
        Ok(url)
    }
}

#[async_trait]
impl DirectoryApi for DuoClient {
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    async fn call(&self, request: &ApiRequestDescriptor) -> Result<String, ApiCallFailure> {
        let url = self.url_for(request)?;
        let headers = sign_request(
            &self.ikey,
            &self.skey,
            &self.signing_host,
            &rfc2822_now(),
            request,
        );

        debug!("Duo {} {}", request.method(), request.path());

        let method = reqwest::Method::from_bytes(request.method().as_str().as_bytes())
            .map_err(|e| ApiCallFailure::transport(e.to_string()))?;
        let mut builder = self
            .http_client
            .request(method, url)
            .header(DATE, &headers.date)
            .header(AUTHORIZATION, &headers.authorization);

        if request.method().has_form_body() {
            builder = builder
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(canonical_params(request.params()));
        }

        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            debug!(status = status.as_u16(), "Duo call succeeded");
            return Ok(body);
        }

        warn!(status = status.as_u16(), "Duo call failed");
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        let detail = match serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .as_ref()
            .and_then(vendor_failure)
        {
            Some(failure) => format!("HTTP {}: {failure}", status.as_u16()),
            None if body.is_empty() => format!("HTTP {status}"),
            None => format!("HTTP {}: {body}", status.as_u16()),
        };
        Err(ApiCallFailure::http(status.as_u16(), detail))
    }
}

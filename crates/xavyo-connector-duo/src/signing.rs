//! Duo request signing.
//!
//! Every Admin/Auth API call is authenticated with HTTP Basic auth where the
//! username is the integration key and the password is an HMAC over a
//! canonical form of the request:
//!
//! ```text
//! {date}\n{METHOD}\n{lowercase host}\n{path}\n{sorted, encoded params}
//! ```

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::request::ApiRequestDescriptor;
use crate::secret::SecretKey;

type HmacSha1 = Hmac<Sha1>;

/// Percent-encode and sort parameters the way the Duo canonicalizer does:
/// RFC 3986 unreserved characters pass through, everything else is `%XX`,
/// pairs are ordered by key then value and joined with `&`.
#[must_use]
pub fn canonical_params(params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| {
            (
                urlencoding::encode(k).into_owned(),
                urlencoding::encode(v).into_owned(),
            )
        })
        .collect();
    encoded.sort();

    encoded
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Canonical string covered by the signature.
#[must_use]
pub fn canonicalize(date: &str, host: &str, request: &ApiRequestDescriptor) -> String {
    [
        date.to_string(),
        request.method().as_str().to_string(),
        host.to_lowercase(),
        request.path().to_string(),
        canonical_params(request.params()),
    ]
    .join("\n")
}

/// Hex-encoded HMAC-SHA1 of `canon` keyed by the secret key.
#[must_use]
pub fn sign(skey: &SecretKey, canon: &str) -> String {
    let mut mac = <HmacSha1 as Mac>::new_from_slice(skey.expose_secret().as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(canon.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Signed headers for one request.
pub struct SignedHeaders {
    pub date: String,
    /// Full `Authorization` header value (`Basic ...`).
    pub authorization: String,
}

impl std::fmt::Debug for SignedHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedHeaders")
            .field("date", &self.date)
            .field("authorization", &crate::secret::REDACTED)
            .finish()
    }
}

/// Produce the `Date` and `Authorization` headers for `request`.
#[must_use]
pub fn sign_request(
    ikey: &SecretKey,
    skey: &SecretKey,
    host: &str,
    date: &str,
    request: &ApiRequestDescriptor,
) -> SignedHeaders {
    let canon = canonicalize(date, host, request);
    let signature = sign(skey, &canon);
    let credentials = format!("{}:{signature}", ikey.expose_secret());

    SignedHeaders {
        date: date.to_string(),
        authorization: format!("Basic {}", BASE64.encode(credentials)),
    }
}

/// Current time in the RFC 2822 form Duo expects in the `Date` header.
#[must_use]
pub fn rfc2822_now() -> String {
    chrono::Utc::now().to_rfc2822()
}

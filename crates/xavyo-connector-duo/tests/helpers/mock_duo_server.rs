//! Mock Duo API using wiremock.

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use xavyo_connector_duo::client::DuoClient;
use xavyo_connector_duo::secret::SecretKey;

pub const TEST_IKEY: &str = "DIWJ8X6AEYOR5OMC6TQ1";
pub const TEST_SKEY: &str = "Zh5eGmUq9zpfQnyUIu5OL9iWoMMv5ZNmk3zT1x6i";

pub struct MockDuoServer {
    pub server: MockServer,
}

impl MockDuoServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// A `DuoClient` signed with the test key pair, pointed at this server.
    pub fn client(&self) -> DuoClient {
        DuoClient::with_http_client(
            &self.uri(),
            SecretKey::new(TEST_IKEY),
            SecretKey::new(TEST_SKEY),
            reqwest::Client::new(),
        )
        .expect("mock server URI is valid")
    }

    /// `GET /admin/v1/users?username=..` returning a single user.
    pub async fn mock_user_lookup(&self, username: &str, user_id: &str) {
        Mock::given(method("GET"))
            .and(path("/admin/v1/users"))
            .and(query_param("username", username))
            .and(header_exists("authorization"))
            .and(header_exists("date"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "stat": "OK",
                "response": [{ "user_id": user_id, "username": username, "status": "active" }]
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// `GET /admin/v1/users?username=..` returning no match.
    pub async fn mock_user_not_found(&self, username: &str) {
        Mock::given(method("GET"))
            .and(path("/admin/v1/users"))
            .and(query_param("username", username))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "stat": "OK", "response": [] })),
            )
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mount a JSON response for `verb path`.
    pub async fn mock_json(&self, verb: &str, route: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Fail the test if `verb path` is ever called.
    pub async fn forbid(&self, verb: &str, route: &str) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }
}

/// Standard Duo error body.
pub fn duo_error(code: i64, message: &str) -> Value {
    json!({ "stat": "FAIL", "code": code, "message": message })
}

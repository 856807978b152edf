//! In-memory [`DirectoryApi`] that records every call and replays scripted
//! responses in order.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use xavyo_connector_duo::client::DirectoryApi;
use xavyo_connector_duo::error::ApiCallFailure;
use xavyo_connector_duo::request::ApiRequestDescriptor;

#[derive(Default)]
pub struct RecordingApi {
    responses: Mutex<VecDeque<Result<String, ApiCallFailure>>>,
    calls: Mutex<Vec<ApiRequestDescriptor>>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful raw response.
    pub fn respond(self, raw: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(raw.to_string()));
        self
    }

    /// Queue a call-level failure.
    pub fn fail(self, failure: ApiCallFailure) -> Self {
        self.responses.lock().unwrap().push_back(Err(failure));
        self
    }

    /// Requests issued so far, in order.
    pub fn calls(&self) -> Vec<ApiRequestDescriptor> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DirectoryApi for RecordingApi {
    async fn call(&self, request: &ApiRequestDescriptor) -> Result<String, ApiCallFailure> {
        self.calls.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiCallFailure::transport("no scripted response")))
    }
}

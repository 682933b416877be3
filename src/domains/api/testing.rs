//! Recording stub client for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::client::ApiClient;
use super::error::{ApiError, ApiResult};
use super::request::ApiRequest;

/// An [`ApiClient`] that returns a canned reply and records every request.
pub struct StubClient {
    reply: ApiResult<Value>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl StubClient {
    pub fn json(body: Value) -> Self {
        Self::with_reply(Ok(body))
    }

    pub fn status(status: u16, status_text: &str, body: &str) -> Self {
        Self::with_reply(Err(ApiError::status(status, status_text, body)))
    }

    pub fn transport_failure(msg: &str) -> Self {
        Self::with_reply(Err(ApiError::transport(msg)))
    }

    fn with_reply(reply: ApiResult<Value>) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of requests sent so far.
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ApiClient for StubClient {
    async fn send(&self, request: ApiRequest) -> ApiResult<Value> {
        self.requests.lock().unwrap().push(request);
        self.reply.clone()
    }
}

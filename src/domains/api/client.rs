//! HTTP client for the email service.
//!
//! [`ApiClient`] is the seam between the dispatch gateway and the network.
//! [`ReqwestApiClient`] is the production implementation; tests substitute
//! a recording stub.

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::error::{ApiError, ApiResult};
use super::request::ApiRequest;
use crate::core::config::ApiConfig;

/// Header carrying the account's API key (`X-API-Key`), in canonical lowercase.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Sends one request to the email service and returns the decoded JSON body.
///
/// Non-2xx replies are errors; an empty 2xx body decodes to `Value::Null`.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ApiResult<Value>;
}

/// `reqwest`-backed [`ApiClient`].
#[derive(Clone)]
pub struct ReqwestApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ReqwestApiClient {
    /// Build a client authenticated with the configured API key.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::invalid_url(&config.base_url, e.to_string()))?;

        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| ApiError::Config("API key contains invalid header characters".into()))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }
}

#[async_trait]
impl ApiClient for ReqwestApiClient {
    #[instrument(skip_all, fields(method = %request.method, path = %request.path()))]
    async fn send(&self, request: ApiRequest) -> ApiResult<Value> {
        let url = request.url(&self.base_url)?;
        debug!("Making request to: {}", url);

        let mut builder = self.http.request(request.method.into(), url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            warn!("API responded with {}: {}", status, body);
            return Err(ApiError::status(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                body,
            ));
        }

        debug!("API response received: {} bytes", bytes.len());

        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

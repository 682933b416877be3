//! Outbound request shape.
//!
//! An [`ApiRequest`] is a method, a list of raw path segments, optional query
//! pairs and an optional JSON body. Segments are percent-encoded only when
//! the final URL is built against the configured base URL.

use std::fmt;

use reqwest::Url;
use serde_json::Value;

use super::error::{ApiError, ApiResult};

/// HTTP methods used by the email service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A single request against the email service.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new<I, S>(method: HttpMethod, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(HttpMethod::Get, segments)
    }

    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(HttpMethod::Post, segments)
    }

    pub fn delete<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(HttpMethod::Delete, segments)
    }

    /// Append a query pair.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append a `cursor` query pair when the cursor is present and non-empty.
    pub fn with_cursor(self, cursor: Option<&str>) -> Self {
        match cursor {
            Some(c) if !c.is_empty() => self.with_query("cursor", c),
            _ => self,
        }
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Human-readable path with query string, as used in logs.
    pub fn path(&self) -> String {
        let mut path = format!("/{}", self.segments.join("/"));
        if !self.query.is_empty() {
            path.push('?');
            path.push_str(&serde_urlencoded::to_string(&self.query).unwrap_or_default());
        }
        path
    }

    /// Resolve this request against a base URL.
    ///
    /// Any path already present on the base URL is kept as a prefix. Empty
    /// and dot-only segments are refused, since the URL parser would drop them.
    pub fn url(&self, base: &Url) -> ApiResult<Url> {
        if let Some(bad) = self
            .segments
            .iter()
            .find(|s| matches!(s.as_str(), "" | "." | ".."))
        {
            return Err(ApiError::invalid_url(
                self.path(),
                format!("invalid path segment '{bad}'"),
            ));
        }

        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::invalid_url(base.as_str(), "URL cannot be a base"))?;
            segments.pop_if_empty().extend(self.segments.iter());
        }

        if self.query.is_empty() {
            url.set_query(None);
        } else {
            let query = serde_urlencoded::to_string(&self.query)
                .map_err(|e| ApiError::invalid_url(base.as_str(), e.to_string()))?;
            url.set_query(Some(&query));
        }

        Ok(url)
    }
}

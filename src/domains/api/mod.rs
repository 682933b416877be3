//! Email service API domain.
//!
//! This module holds everything needed to talk to the remote disposable
//! email service:
//!
//! - `client.rs` - The `ApiClient` seam and its `reqwest` implementation
//! - `request.rs` - Outbound request shape (method, path, query, body)
//! - `models.rs` - Typed views of the service's JSON replies
//! - `error.rs` - Remote call error types

mod client;
mod error;
pub mod models;
mod request;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{API_KEY_HEADER, ApiClient, ReqwestApiClient};
pub use error::{ApiError, ApiResult};
pub use request::{ApiRequest, HttpMethod};

//! Transport layer for the MCP server.
//!
//! Two transports are available:
//! - **STDIO**: standard input/output, the regular MCP mode. Feature: `stdio`
//! - **HTTP**: JSON-RPC over POST requests. Feature: `http`
//!
//! Both hand every tool call to the same [`McpServer`](crate::core::McpServer),
//! so envelopes are identical whichever transport carries them.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;

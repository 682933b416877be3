//! Temporary Email MCP Server Library
//!
//! This crate exposes a disposable email service to MCP clients. Each of the
//! nine tools maps to exactly one REST call; replies are rendered as text and
//! every failure comes back as an error envelope rather than a protocol error.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **api**: the `ApiClient` seam, request shapes and reply models
//!   - **tools**: tool registry, typed calls, formatting and the dispatch gateway
//!
//! # Example
//!
//! ```rust,no_run
//! use tempmail_mcp_server::{core::McpServer, core::Config, core::TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let transport = TransportService::new(config.transport.clone());
//!     let server = McpServer::new(config)?;
//!     transport.run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
pub use domains::tools::{DispatchGateway, ToolInvocation};

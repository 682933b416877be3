//! Domains module containing business logic organized by bounded contexts.
//!
//! - **api**: the remote disposable email service and its HTTP client
//! - **tools**: the MCP tool catalogue and the dispatch gateway in front of it

pub mod api;
pub mod tools;

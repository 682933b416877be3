//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Every tool maps to exactly one call against the email service.
//!
//! ## Architecture
//!
//! - `registry.rs` - Static tool catalogue and input contracts
//! - `gateway.rs` - Validation, dispatch and the error envelope
//! - `call.rs` - Typed tool calls and their request shapes
//! - `format.rs` - Text rendering of service replies
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add a `ToolKind` variant and a descriptor to `registry.rs`
//! 2. Add the matching `ToolCall` variant, request and render arms in `call.rs`
//! 3. Add a formatter to `format.rs`

mod call;
mod error;
pub mod format;
mod gateway;
pub mod registry;

pub use call::ToolCall;
pub use error::ToolError;
pub use gateway::{DispatchGateway, ToolInvocation};
pub use registry::{FieldContract, FieldType, ToolDescriptor, ToolKind, find_tool, list_tools};

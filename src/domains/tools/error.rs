//! Tool-specific error types.

use thiserror::Error;

use crate::domains::api::ApiError;

/// Errors that can occur while dispatching a tool call.
///
/// Every variant is rendered into an error envelope by the gateway; none of
/// them escapes to the protocol layer.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not in the registry.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A required argument was absent or null.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// An argument was present but unusable.
    #[error("Invalid argument '{field}': {reason}")]
    InvalidArgument { field: String, reason: String },

    /// The remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The remote service answered with an unexpected body shape.
    #[error("Unexpected response from service: {0}")]
    InvalidResponse(String),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "missing argument" error.
    pub fn missing_argument(field: impl Into<String>) -> Self {
        Self::MissingArgument(field.into())
    }

    /// Create a new "invalid argument" error.
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a new "invalid response" error.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}

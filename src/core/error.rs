//! Error types and handling for the MCP server.
//!
//! Startup failures: configuration problems and a client that cannot be
//! built. Failures inside a tool call never reach this type; the gateway
//! turns them into error envelopes.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the email service client.
    #[error("API error: {0}")]
    Api(#[from] crate::domains::api::ApiError),

    /// A required setting is absent. Fatal at startup.
    #[error("Missing required configuration: {0} is not set")]
    MissingConfig(String),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new missing configuration error.
    pub fn missing_config(name: impl Into<String>) -> Self {
        Self::MissingConfig(name.into())
    }

    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

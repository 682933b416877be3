//! Configuration management for the MCP server.
//!
//! Configuration is read once from environment variables (and an optional
//! `.env` file) at startup and is read-only afterwards.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Required: API key of the email service account.
pub const API_KEY_VAR: &str = "TEMPMAIL_API_KEY";

/// Optional: base URL of the email service.
pub const BASE_URL_VAR: &str = "TEMPMAIL_BASE_URL";

/// Production host of the email service.
pub const DEFAULT_BASE_URL: &str = "https://chat-tempmail.com";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Email service connection settings.
    pub api: ApiConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Connection settings for the email service.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Sent as `X-API-Key` on every request.
    pub api_key: String,

    /// Requests are resolved against this URL.
    pub base_url: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiConfig {
    /// Create settings for the production host.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// A log-safe rendering of the API key.
    pub fn masked_key(&self) -> String {
        let prefix: String = self.api_key.chars().take(4).collect();
        if self.api_key.chars().count() <= 8 {
            "****".to_string()
        } else {
            format!("{prefix}****")
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "mcp-server-tempmail".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Load the logging level from `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut logging = Self::default();
        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            logging.level = level;
        }
        logging
    }
}

impl Config {
    /// Create a configuration with default values around the given API settings.
    pub fn new(api: ApiConfig) -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
            api,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Fails when `TEMPMAIL_API_KEY` is absent or empty, or when
    /// `TEMPMAIL_BASE_URL` is not a valid URL.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::missing_config(API_KEY_VAR))?;

        let mut config = Self::new(ApiConfig::new(api_key));

        if let Some(base_url) = std::env::var(BASE_URL_VAR)
            .ok()
            .filter(|url| !url.trim().is_empty())
        {
            config.api.base_url = base_url.trim().to_string();
        }

        reqwest::Url::parse(&config.api.base_url).map_err(|e| {
            Error::config(format!(
                "{} '{}' is not a valid URL: {}",
                BASE_URL_VAR, config.api.base_url, e
            ))
        })?;

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        info!("API key loaded: {}", config.api.masked_key());
        info!("Base URL: {}", config.api.base_url);

        Ok(config)
    }
}

// Serializes tests that touch process environment variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

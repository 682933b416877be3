//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating tool calls to the dispatch gateway.
//!
//! `call_tool` forwards every request to the gateway, including calls to
//! unknown tools, so that all failures reach the client as error envelopes
//! instead of protocol errors.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Result;
use crate::domains::api::{ApiClient, ReqwestApiClient};
use crate::domains::tools::{DispatchGateway, ToolInvocation};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Gateway handling tool calls.
    gateway: Arc<DispatchGateway>,
}

impl McpServer {
    /// Create a new MCP server talking to the configured email service.
    pub fn new(config: Config) -> Result<Self> {
        let client = ReqwestApiClient::new(&config.api)?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Create a server around an existing API client.
    pub fn with_client(config: Config, client: Arc<dyn ApiClient>) -> Self {
        Self {
            config: Arc::new(config),
            gateway: Arc::new(DispatchGateway::new(client)),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the dispatch gateway.
    pub fn gateway(&self) -> &DispatchGateway {
        &self.gateway
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools as JSON (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn list_tools_json(&self) -> Vec<serde_json::Value> {
        self.gateway
            .list_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema,
                    "annotations": t.annotations,
                })
            })
            .collect()
    }

    /// Call a tool and render its envelope as JSON (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool_json(&self, invocation: ToolInvocation) -> serde_json::Value {
        let result = self.gateway.handle(invocation).await;
        serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        })
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Temporary email server. Create disposable addresses, read their \
                 messages and manage the account webhook."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.gateway.list_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let invocation =
            ToolInvocation::new(request.name.to_string(), request.arguments.unwrap_or_default());
        Ok(self.gateway.handle(invocation).await)
    }
}

//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating tool discovery and dispatch to the
//! [`ToolRegistry`]. Every transport goes through the same registry, so
//! validation and error mapping are identical over stdio and HTTP.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::*,
    service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::config::Config;
use super::error::Result;
use crate::domains::tools::{ToolError, ToolRegistry};
use crate::domains::transit::TransitClient;

/// Instructions reported to clients on initialization.
pub const INSTRUCTIONS: &str = "Public transit information: search stops and places, \
     read departure and arrival boards, plan journeys, inspect trips and watch vehicles \
     move on a map. Start with locations_search to turn names into stop ids.";

/// The main MCP server handler.
///
/// Cheap to clone; the registry is shared.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registered transit tools.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails if the upstream base URL is unusable.
    pub fn new(config: Config) -> Result<Self> {
        let client = TransitClient::new(&config.upstream)?;
        let registry = ToolRegistry::with_transit_tools(client);
        info!("Registered {} tools", registry.tool_names().len());

        Ok(Self::with_registry(config, registry))
    }

    /// Create a server around an existing registry.
    pub fn with_registry(config: Config, registry: ToolRegistry) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
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

    /// All registered tools with their input schemas.
    pub fn tools(&self) -> Vec<Tool> {
        self.registry.tools()
    }

    /// Run a tool and wrap its output as pretty-printed JSON text.
    pub async fn invoke_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> std::result::Result<CallToolResult, ToolError> {
        let value = self.registry.call_tool(name, arguments).await?;
        let text = serde_json::to_string_pretty(&value)
            .map_err(|e| ToolError::execution_failed(format!("Failed to encode result: {e}")))?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
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
            tools: self.tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let name: &str = &request.name;
        tokio::select! {
            result = self.invoke_tool(name, request.arguments) => result.map_err(McpError::from),
            _ = context.ct.cancelled() => {
                warn!("Tool call cancelled by client");
                Err(McpError::internal_error("Tool call cancelled", None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::UpstreamConfig;
    use crate::domains::transit::testing::StubUpstream;
    use axum::http::StatusCode;
    use serde_json::json;

    async fn server_with_stub(status: StatusCode, body: serde_json::Value) -> (McpServer, StubUpstream) {
        let stub = StubUpstream::start(status, body).await;
        let config = Config {
            upstream: UpstreamConfig {
                base_url: stub.base_url.clone(),
                ..UpstreamConfig::default()
            },
            ..Config::default()
        };
        (McpServer::new(config).unwrap(), stub)
    }

    fn text_of(result: &CallToolResult) -> String {
        result.content[0].as_text().unwrap().text.clone()
    }

    #[test]
    fn test_invalid_base_url_fails_startup() {
        let config = Config {
            upstream: UpstreamConfig {
                base_url: "not a url".to_string(),
                ..UpstreamConfig::default()
            },
            ..Config::default()
        };
        assert!(McpServer::new(config).is_err());
    }

    #[tokio::test]
    async fn test_server_info_advertises_tools() {
        let (server, _stub) = server_with_stub(StatusCode::OK, json!([])).await;
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("locations_search"));
        assert_eq!(server.tools().len(), 8);
    }

    #[tokio::test]
    async fn test_invoke_tool_returns_pretty_json_text() {
        let body = json!([{ "type": "stop", "id": "900100003", "name": "S+U Alexanderplatz" }]);
        let (server, _stub) = server_with_stub(StatusCode::OK, body.clone()).await;

        let result = server
            .invoke_tool("locations_search", json!({ "query": "Alexanderplatz" }).as_object().cloned())
            .await
            .unwrap();

        let text = text_of(&result);
        assert!(text.contains('\n'));
        assert_eq!(serde_json::from_str::<serde_json::Value>(&text).unwrap(), body);
        assert_ne!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_invoke_tool_errors_map_to_protocol_codes() {
        let (server, _stub) = server_with_stub(StatusCode::OK, json!([])).await;

        let err = server.invoke_tool("teleport", None).await.unwrap_err();
        assert_eq!(McpError::from(err).code, ErrorCode::METHOD_NOT_FOUND);

        let err = server.invoke_tool("locations_search", None).await.unwrap_err();
        let mcp = McpError::from(err);
        assert_eq!(mcp.code, ErrorCode::INVALID_PARAMS);
        assert!(mcp.data.is_some());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_internal_error() {
        let (server, _stub) =
            server_with_stub(StatusCode::SERVICE_UNAVAILABLE, json!({})).await;

        let err = server
            .invoke_tool("stop_details", json!({ "stopId": "900100003" }).as_object().cloned())
            .await
            .unwrap_err();

        let mcp = McpError::from(err);
        assert_eq!(mcp.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(mcp.message, "Failed to get stop details: HTTP 503");
    }
}

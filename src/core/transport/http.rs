//! HTTP transport implementation.
//!
//! JSON-RPC over POST requests, so plain HTTP clients (curl, browsers,
//! gateways) can discover and call the transit tools.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rmcp::model::JsonObject;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::server::INSTRUCTIONS;
use crate::domains::tools::ToolError;

/// Protocol revision answered to `initialize`.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data,
            }),
        }
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<Value>) -> Self {
        Self::error(id, -32601, "Method not found", None)
    }

    /// Invalid request error.
    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, -32600, "Invalid Request", None)
    }

    /// Invalid params error.
    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg, None)
    }

    /// Internal error.
    pub fn internal_error(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32603, msg, None)
    }

    /// Error response for a failed tool call, same codes as over stdio.
    pub fn tool_error(id: Option<Value>, err: ToolError) -> Self {
        Self::error(id, err.code().0, err.to_string(), err.data())
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    server: McpServer,
    rpc_path: String,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    fn router(&self, server: McpServer) -> Router {
        let state = AppState {
            server,
            rpc_path: self.config.rpc_path.clone(),
        };

        let app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app.layer(cors)
        } else {
            app
        }
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr, cors_status
        );
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::Serve(e.to_string()))?;

        Ok(())
    }
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "rpc": state.rpc_path,
            "health": "/health"
        },
        "protocol": "JSON-RPC 2.0",
        "tools": state.server.tools().iter().map(|t| t.name.to_string()).collect::<Vec<_>>()
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Handle JSON-RPC requests.
///
/// Notifications get `202 Accepted` with an empty body.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> Response {
    tracing::Span::current().record("method", &request.method);
    info!("Received JSON-RPC request: {}", request.method);

    match process_request(&state, request).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Process a JSON-RPC request; `None` when no reply is owed.
async fn process_request(state: &AppState, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    if request.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::invalid_request(request.id));
    }

    let response = match request.method.as_str() {
        "initialize" => handle_initialize(state, request),
        "ping" => JsonRpcResponse::success(request.id, serde_json::json!({})),
        "tools/list" => handle_tools_list(state, request),
        "tools/call" => handle_tools_call(state, request).await,

        // Stateless, so there is nothing to update
        method if method.starts_with("notifications/") => {
            info!("Received notification: {}", method);
            return None;
        }

        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id)
        }
    };

    Some(response)
}

fn handle_initialize(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing initialize request");

    let result = serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": state.server.name(),
            "version": state.server.version()
        },
        "instructions": INSTRUCTIONS
    });

    JsonRpcResponse::success(request.id, result)
}

fn handle_tools_list(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing tools/list request");

    match serde_json::to_value(state.server.tools()) {
        Ok(tools) => JsonRpcResponse::success(request.id, serde_json::json!({ "tools": tools })),
        Err(e) => JsonRpcResponse::internal_error(request.id, e.to_string()),
    }
}

async fn handle_tools_call(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let Some(params) = request.params else {
        return JsonRpcResponse::invalid_params(request.id, "Missing params");
    };

    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return JsonRpcResponse::invalid_params(request.id, "Missing tool name");
    };

    let arguments: Option<JsonObject> = match params.get("arguments") {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map.clone()),
        Some(_) => {
            return JsonRpcResponse::invalid_params(request.id, "Tool arguments must be an object");
        }
    };

    info!("Processing tools/call request for {}", name);
    match state.server.invoke_tool(name, arguments).await {
        Ok(result) => match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => JsonRpcResponse::internal_error(request.id, e.to_string()),
        },
        Err(err) => {
            warn!("Tool call failed: {}", err);
            JsonRpcResponse::tool_error(request.id, err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::core::config::UpstreamConfig;
    use crate::domains::transit::testing::StubUpstream;
    use serde_json::json;

    async fn state_with_stub(status: StatusCode, body: Value) -> (AppState, StubUpstream) {
        let stub = StubUpstream::start(status, body).await;
        let config = Config {
            upstream: UpstreamConfig {
                base_url: stub.base_url.clone(),
                ..UpstreamConfig::default()
            },
            ..Config::default()
        };
        let state = AppState {
            server: McpServer::new(config).unwrap(),
            rpc_path: "/mcp".to_string(),
        };
        (state, stub)
    }

    /// Run a request that must produce a reply.
    async fn reply(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
        process_request(state, request)
            .await
            .expect("request should get a reply")
    }

    fn rpc(method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params,
        }
    }

    #[tokio::test]
    async fn test_initialize_and_list() {
        let (state, _stub) = state_with_stub(StatusCode::OK, json!([])).await;

        let init = reply(&state, rpc("initialize", None)).await;
        let result = init.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "transit-mcp-server");
        assert!(result["capabilities"]["tools"].is_object());

        let list = reply(&state, rpc("tools/list", None)).await;
        let tools = list.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), 8);
        assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
    }

    #[tokio::test]
    async fn test_tools_call_success() {
        let body = json!([{ "type": "stop", "id": "900100003" }]);
        let (state, stub) = state_with_stub(StatusCode::OK, body.clone()).await;

        let response = reply(
            &state,
            rpc(
                "tools/call",
                Some(json!({ "name": "locations_search", "arguments": { "query": "Alex" } })),
            ),
        )
        .await;

        assert!(response.error.is_none());
        let text = response.result.unwrap()["content"][0]["text"]
            .as_str()
            .unwrap()
            .to_string();
        assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), body);
        assert_eq!(stub.only_request().path, "/locations");
    }

    #[tokio::test]
    async fn test_tools_call_error_codes() {
        let (state, stub) = state_with_stub(StatusCode::OK, json!([])).await;

        let unknown = reply(
            &state,
            rpc("tools/call", Some(json!({ "name": "teleport" }))),
        )
        .await;
        assert_eq!(unknown.error.unwrap().code, -32601);

        let invalid = reply(
            &state,
            rpc(
                "tools/call",
                Some(json!({ "name": "journey_plan", "arguments": { "from": "A" } })),
            ),
        )
        .await;
        let error = invalid.error.unwrap();
        assert_eq!(error.code, -32602);
        assert_eq!(error.data.unwrap()["violations"][0]["field"], "to");

        let not_object = reply(
            &state,
            rpc(
                "tools/call",
                Some(json!({ "name": "radar", "arguments": [52.6, 13.3] })),
            ),
        )
        .await;
        assert_eq!(not_object.error.unwrap().code, -32602);

        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_internal_error() {
        let (state, _stub) = state_with_stub(StatusCode::BAD_GATEWAY, json!({})).await;

        let response = reply(
            &state,
            rpc(
                "tools/call",
                Some(json!({ "name": "trip_details", "arguments": { "tripId": "1|2|3" } })),
            ),
        )
        .await;

        let error = response.error.unwrap();
        assert_eq!(error.code, -32603);
        assert_eq!(error.message, "Failed to get trip details: HTTP 502");
    }

    #[tokio::test]
    async fn test_unknown_method_and_bad_version() {
        let (state, _stub) = state_with_stub(StatusCode::OK, json!([])).await;

        let response = reply(&state, rpc("resources/list", None)).await;
        assert_eq!(response.error.unwrap().code, -32601);

        let mut request = rpc("ping", None);
        request.jsonrpc = "1.0".to_string();
        let response = reply(&state, request).await;
        assert_eq!(response.error.unwrap().code, -32600);

        let response = reply(&state, rpc("ping", None)).await;
        assert_eq!(response.result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_notifications_get_no_reply() {
        let (state, stub) = state_with_stub(StatusCode::OK, json!([])).await;

        let mut initialized = rpc("notifications/initialized", None);
        initialized.id = None;
        assert!(process_request(&state, initialized).await.is_none());

        let cancelled = rpc("notifications/cancelled", Some(json!({ "requestId": 1 })));
        assert!(process_request(&state, cancelled).await.is_none());
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn test_notification_is_accepted_without_body() {
        let (state, _stub) = state_with_stub(StatusCode::OK, json!([])).await;
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: "notifications/initialized".to_string(),
            params: None,
        };

        let response = handle_rpc(State(state.clone()), Json(request)).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());

        let response = handle_rpc(State(state), Json(rpc("ping", None))).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}

//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The catalog advertised by `tools/list`
//! - Dispatch for `tools/call`, shared by every transport
//!
//! A call goes through two stages. Validation looks the tool up, checks the
//! arguments against its constraint set, decodes them and runs its
//! [`Validate`](super::Validate) rules. Execution only starts once all of
//! that has passed.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::model::{JsonObject, Tool};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::definitions::{
    JourneyPlanTool, LocationsNearbyTool, LocationsSearchTool, RadarTool, StopArrivalsTool,
    StopDeparturesTool, StopDetailsTool, TripDetailsTool,
};
use super::error::{ToolError, ValidationError};
use super::handlers::{TransitTool, Validate};
use super::schema::ConstraintSet;
use crate::domains::transit::TransitClient;

type BoxedHandler = Arc<
    dyn Fn(TransitClient, JsonObject) -> BoxFuture<'static, Result<Value, ToolError>>
        + Send
        + Sync,
>;

struct RegisteredTool {
    tool: Tool,
    constraints: ConstraintSet,
    handler: BoxedHandler,
}

/// Tool registry - manages all available tools.
///
/// Immutable once built; share it behind an `Arc`. Calls hold no state
/// between them and can run concurrently.
pub struct ToolRegistry {
    client: TransitClient,
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new(client: TransitClient) -> Self {
        Self {
            client,
            tools: Vec::new(),
        }
    }

    /// Create a registry with the full transit tool catalog.
    pub fn with_transit_tools(client: TransitClient) -> Self {
        Self::new(client)
            .register(LocationsSearchTool)
            .register(LocationsNearbyTool)
            .register(StopDetailsTool)
            .register(StopDeparturesTool)
            .register(StopArrivalsTool)
            .register(JourneyPlanTool)
            .register(TripDetailsTool)
            .register(RadarTool)
    }

    /// Add a tool. Its discovery schema is generated here and read back
    /// into the constraint set used for validation.
    pub fn register<T: TransitTool>(mut self, tool: T) -> Self {
        let model = T::to_tool();
        let constraints = ConstraintSet::from_schema(&model.input_schema);
        let tool = Arc::new(tool);
        let handler: BoxedHandler = Arc::new(move |client: TransitClient, arguments: JsonObject| {
            run_tool(Arc::clone(&tool), client, arguments).boxed()
        });

        self.tools.push(RegisteredTool {
            tool: model,
            constraints,
            handler,
        });
        self
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.tool.name.as_ref()).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.iter().map(|t| t.tool.clone()).collect()
    }

    /// Constraint set for a registered tool.
    pub fn constraints(&self, name: &str) -> Option<&ConstraintSet> {
        self.find(name).map(|t| &t.constraints)
    }

    fn find(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.iter().find(|t| t.tool.name == name)
    }

    /// Dispatch a tool call to the appropriate handler.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<Value, ToolError> {
        let entry = self.find(name).ok_or_else(|| {
            warn!("Unknown tool requested: {}", name);
            ToolError::not_found(name)
        })?;

        let arguments = entry
            .constraints
            .validate(arguments.unwrap_or_default())
            .inspect_err(|e| warn!("Rejected arguments: {}", e))?;

        info!("Executing tool");
        (entry.handler)(self.client.clone(), arguments).await
    }
}

/// Decode, apply cross-field rules, then execute.
async fn run_tool<T: TransitTool>(
    tool: Arc<T>,
    client: TransitClient,
    arguments: JsonObject,
) -> Result<Value, ToolError> {
    let params: T::Params =
        serde_json::from_value(Value::Object(arguments)).map_err(ValidationError::from_decode)?;
    params
        .validate()
        .inspect_err(|e| warn!("Rejected arguments: {}", e))?;

    tool.execute(&client, params).await
}

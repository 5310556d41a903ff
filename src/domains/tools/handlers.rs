//! Tool handler traits.
//!
//! Every transit tool implements [`TransitTool`]: a parameter type that
//! doubles as its constraint declaration, a name, a description, and an
//! async `execute` that talks to the upstream through a [`TransitClient`].

use std::sync::Arc;

use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{ToolError, ValidationError};
use super::schema::input_schema_for;
use crate::domains::transit::TransitClient;

/// Rules that span several fields or need domain parsing.
///
/// Runs after the generic schema checks and before `execute`.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// A capability exposed to MCP clients.
#[async_trait::async_trait]
pub trait TransitTool: Send + Sync + 'static {
    /// Arguments, declared with serde defaults and schemars bounds.
    type Params: DeserializeOwned + JsonSchema + Validate + Send + 'static;

    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Run the tool with arguments that already passed validation.
    async fn execute(&self, client: &TransitClient, params: Self::Params)
    -> Result<Value, ToolError>;

    /// Create a Tool model for this tool (metadata).
    fn to_tool() -> Tool
    where
        Self: Sized,
    {
        Tool::new(
            Self::NAME,
            Self::DESCRIPTION,
            Arc::new(input_schema_for::<Self::Params>()),
        )
    }
}

//! Tool-specific error types.

use rmcp::{ErrorData as McpError, model::ErrorCode};
use serde::Serialize;
use thiserror::Error;

/// One argument that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Arguments rejected before the tool ran.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", render_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

fn render_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// A single violation.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![FieldViolation::new(field, message)])
    }

    /// Typed decoding failed after the generic checks passed.
    pub fn from_decode(err: serde_json::Error) -> Self {
        Self::field("arguments", err.to_string())
    }

    /// Names of the rejected fields, in report order.
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }

    /// Whether `field` is among the rejected fields.
    pub fn involves(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(#[from] ValidationError),

    /// The tool ran and failed; the message names the failing operation.
    #[error("{0}")]
    ExecutionFailed(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    /// JSON-RPC error code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::METHOD_NOT_FOUND,
            Self::InvalidArguments(_) => ErrorCode::INVALID_PARAMS,
            Self::ExecutionFailed(_) => ErrorCode::INTERNAL_ERROR,
        }
    }

    /// Structured detail for the error response, if any.
    pub fn data(&self) -> Option<serde_json::Value> {
        match self {
            Self::InvalidArguments(err) => Some(serde_json::json!({
                "violations": err.violations
            })),
            _ => None,
        }
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        McpError::new(err.code(), err.to_string(), err.data())
    }
}

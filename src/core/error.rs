//! Error types and handling for the MCP server.
//!
//! Failures that stop the server from starting. Per-call failures are
//! [`ToolError`](crate::domains::tools::ToolError)s and never reach this type.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Startup error for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// The transit client could not be built from the configuration.
    #[error("Transit client error: {0}")]
    Transit(#[from] crate::domains::transit::TransitError),
}

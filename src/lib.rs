//! Transit MCP Server Library
//!
//! A Model Context Protocol (MCP) server that exposes a public transit REST
//! API as tools: location search, stop boards, journey planning, trip
//! details and a live vehicle radar.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: tool definitions, argument validation and dispatch
//!   - **transit**: the HTTP client for the upstream transit API
//!
//! # Example
//!
//! ```rust,no_run
//! use transit_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};

//! Domains module containing business logic organized by bounded contexts.
//!
//! - `tools` - what MCP clients see: tool catalog, validation, dispatch
//! - `transit` - how the server talks to the upstream transit API

pub mod tools;
pub mod transit;

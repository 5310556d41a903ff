//! Tools domain module.
//!
//! Each transit capability is exposed to MCP clients as a tool.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations
//! - `handlers.rs` - The [`TransitTool`] and [`Validate`] traits
//! - `schema.rs` - Input schema generation and the constraint set read back from it
//! - `registry.rs` - Central tool registry and dispatch, shared by all transports
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a params struct and a tool struct in `definitions/`
//! 2. Implement `Validate` (empty if there are no cross-field rules) and `TransitTool`
//! 3. Export it in `definitions/mod.rs`
//! 4. Register it in `ToolRegistry::with_transit_tools`

pub mod definitions;
mod error;
mod handlers;
mod registry;
mod schema;

pub use error::{FieldViolation, ToolError, ValidationError};
pub use handlers::{TransitTool, Validate};
pub use registry::ToolRegistry;
pub use schema::{ConstraintSet, FieldConstraint, ValueKind, input_schema_for};

//! Transit domain module.
//!
//! Everything that talks to, or prepares input for, the upstream transit
//! REST API:
//!
//! - `client.rs` - HTTP translation client
//! - `query.rs` - typed query-string parameters
//! - `validators.rs` - coordinate and identifier validators
//! - `models.rs` - response envelopes and the upstream error body
//! - `error.rs` - client error type

mod client;
mod error;
pub mod models;
mod query;
pub mod validators;

#[cfg(test)]
pub(crate) mod testing;

pub use client::TransitClient;
pub use error::TransitError;
pub use query::{QueryParams, QueryValue};
pub use validators::{CoordinateError, Coordinates, parse_coordinates, validate_identifier};

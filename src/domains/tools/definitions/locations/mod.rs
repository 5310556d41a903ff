//! Location lookup tools.

mod nearby;
mod search;

pub use nearby::{LocationsNearbyParams, LocationsNearbyTool};
pub use search::{LocationsSearchParams, LocationsSearchTool};

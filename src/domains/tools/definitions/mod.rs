//! Tool definitions module.
//!
//! One file (or folder) per upstream resource. Each tool pairs a parameter
//! struct, which is also its advertised input schema, with an `execute`
//! that calls the transit API.

mod common;
mod journeys;
mod locations;
mod radar;
mod stops;
mod trips;

pub use journeys::{Accessibility, JourneyPlanParams, JourneyPlanTool, WalkingSpeed};
pub use locations::{
    LocationsNearbyParams, LocationsNearbyTool, LocationsSearchParams, LocationsSearchTool,
};
pub use radar::{RadarParams, RadarTool};
pub use stops::{
    StopArrivalsTool, StopDeparturesTool, StopDetailsParams, StopDetailsTool, StopEventsParams,
};
pub use trips::{TripDetailsParams, TripDetailsTool};

//! Nearby locations tool.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::{default_language, default_true, failed};
use crate::domains::tools::{ToolError, TransitTool, Validate};
use crate::domains::transit::{Coordinates, QueryParams, TransitClient};

/// Parameters for a proximity search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LocationsNearbyParams {
    /// Position as "latitude,longitude", e.g. "52.5200,13.4050".
    #[schemars(with = "String")]
    pub coordinates: Coordinates,

    /// Maximum number of results.
    #[serde(default = "default_results")]
    #[schemars(range(min = 1, max = 100))]
    pub results: u32,

    /// Search radius in meters.
    #[serde(default = "default_distance")]
    #[schemars(range(min = 1, max = 10000))]
    pub distance: u32,

    /// Include stops and stations.
    #[serde(default = "default_true")]
    pub stops: bool,

    /// Include points of interest.
    #[serde(default)]
    pub poi: bool,

    /// Language for names and remarks.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_results() -> u32 {
    8
}

fn default_distance() -> u32 {
    1000
}

impl Validate for LocationsNearbyParams {}

/// Nearby locations tool.
pub struct LocationsNearbyTool;

#[async_trait::async_trait]
impl TransitTool for LocationsNearbyTool {
    type Params = LocationsNearbyParams;

    const NAME: &'static str = "locations_nearby";

    const DESCRIPTION: &'static str = "Find stops and points of interest around a position. \
         Results are ordered by distance and include the walking distance in meters.";

    #[instrument(skip_all, fields(coordinates = %params.coordinates))]
    async fn execute(&self, client: &TransitClient, params: Self::Params) -> Result<Value, ToolError> {
        let Coordinates {
            latitude,
            longitude,
        } = params.coordinates;
        info!("Searching locations within {}m of {},{}", params.distance, latitude, longitude);

        let query = QueryParams::new()
            .with("latitude", latitude)
            .with("longitude", longitude)
            .with("results", params.results)
            .with("distance", params.distance)
            .with("stops", params.stops)
            .with("poi", params.poi)
            .with("language", params.language);

        let locations: Vec<Value> = client
            .get_json(&["locations", "nearby"], &query)
            .await
            .map_err(failed("Failed to find nearby locations"))?;

        Ok(Value::Array(locations))
    }
}

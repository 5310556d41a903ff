//! Location search tool.
//!
//! Free-text lookup of stops, addresses and points of interest.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::{default_language, default_true, failed};
use crate::domains::tools::{ToolError, TransitTool, Validate};
use crate::domains::transit::{QueryParams, TransitClient};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for location search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LocationsSearchParams {
    /// Search text, e.g. a station name, address or landmark.
    pub query: String,

    /// Maximum number of results.
    #[serde(default = "default_results")]
    #[schemars(range(min = 1, max = 100))]
    pub results: u32,

    /// Include addresses in the results.
    #[serde(default = "default_true")]
    pub addresses: bool,

    /// Include points of interest in the results.
    #[serde(default = "default_true")]
    pub poi: bool,

    /// For stops, also return the lines serving them.
    #[serde(default)]
    pub lines_of_stops: bool,

    /// Language for names and remarks.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_results() -> u32 {
    10
}

impl Validate for LocationsSearchParams {}

// ============================================================================
// Tool Definition
// ============================================================================

/// Location search tool.
pub struct LocationsSearchTool;

#[async_trait::async_trait]
impl TransitTool for LocationsSearchTool {
    type Params = LocationsSearchParams;

    const NAME: &'static str = "locations_search";

    const DESCRIPTION: &'static str = "Search for stops, addresses and points of interest by name. \
         Returns matching locations with ids, coordinates and the transport products serving each stop. \
         Use the returned stop ids with the stop and journey tools.";

    #[instrument(skip_all, fields(query = %params.query))]
    async fn execute(&self, client: &TransitClient, params: Self::Params) -> Result<Value, ToolError> {
        info!("Searching locations matching: {}", params.query);

        let query = QueryParams::new()
            .with("query", params.query)
            .with("results", params.results)
            .with("addresses", params.addresses)
            .with("poi", params.poi)
            .with("linesOfStops", params.lines_of_stops)
            .with("language", params.language);

        let locations: Vec<Value> = client
            .get_json(&["locations"], &query)
            .await
            .map_err(failed("Failed to search locations"))?;

        info!("Found {} location(s)", locations.len());
        Ok(Value::Array(locations))
    }
}

//! Trip details tool.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use super::common::{default_language, default_true, failed, require_identifier};
use crate::domains::tools::{ToolError, TransitTool, Validate, ValidationError};
use crate::domains::transit::models::TripEnvelope;
use crate::domains::transit::{QueryParams, TransitClient};

/// Parameters for a trip lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TripDetailsParams {
    /// Trip id as returned by departures, arrivals or journey legs.
    pub trip_id: String,

    /// Line name, e.g. "U5". Some backends need it to resolve the trip.
    #[serde(default)]
    pub line_name: Option<String>,

    /// Include every stopover along the trip.
    #[serde(default = "default_true")]
    pub stopovers: bool,

    /// Include the trip geometry.
    #[serde(default)]
    pub polyline: bool,

    /// Language for names and remarks.
    #[serde(default = "default_language")]
    pub language: String,
}

impl Validate for TripDetailsParams {
    fn validate(&self) -> Result<(), ValidationError> {
        require_identifier("tripId", &self.trip_id)
    }
}

pub struct TripDetailsTool;

#[async_trait::async_trait]
impl TransitTool for TripDetailsTool {
    type Params = TripDetailsParams;

    const NAME: &'static str = "trip_details";

    const DESCRIPTION: &'static str = "Get a single vehicle run: line, origin, destination \
         and the ordered stopovers with planned and real-time times.";

    #[instrument(skip_all, fields(trip_id = %params.trip_id))]
    async fn execute(&self, client: &TransitClient, params: Self::Params) -> Result<Value, ToolError> {
        info!("Fetching trip");

        let query = QueryParams::new()
            .with_opt("lineName", params.line_name.as_ref())
            .with("stopovers", params.stopovers)
            .with("polyline", params.polyline)
            .with("language", &params.language);

        let envelope: TripEnvelope = client
            .get_json(&["trips", params.trip_id.as_str()], &query)
            .await
            .map_err(failed("Failed to get trip details"))?;

        Ok(envelope.trip)
    }
}

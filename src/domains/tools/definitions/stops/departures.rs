//! Departure board tool.

use serde_json::Value;
use tracing::{info, instrument};

use super::StopEventsParams;
use crate::domains::tools::definitions::common::failed;
use crate::domains::tools::{ToolError, TransitTool};
use crate::domains::transit::TransitClient;
use crate::domains::transit::models::DeparturesEnvelope;

pub struct StopDeparturesTool;

#[async_trait::async_trait]
impl TransitTool for StopDeparturesTool {
    type Params = StopEventsParams;

    const NAME: &'static str = "stop_departures";

    const DESCRIPTION: &'static str = "Get upcoming departures at a stop with real-time delays, \
         platforms and service remarks.";

    #[instrument(skip_all, fields(stop_id = %params.stop_id))]
    async fn execute(&self, client: &TransitClient, params: Self::Params) -> Result<Value, ToolError> {
        info!("Fetching departures for the next {} minutes", params.duration);

        let envelope: DeparturesEnvelope = client
            .get_json(&["stops", params.stop_id.as_str(), "departures"], &params.to_query())
            .await
            .map_err(failed("Failed to get departures"))?;

        info!("Found {} departure(s)", envelope.departures.len());
        Ok(Value::Array(envelope.departures))
    }
}

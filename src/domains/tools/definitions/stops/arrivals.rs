//! Arrival board tool.

use serde_json::Value;
use tracing::{info, instrument};

use super::StopEventsParams;
use crate::domains::tools::definitions::common::failed;
use crate::domains::tools::{ToolError, TransitTool};
use crate::domains::transit::TransitClient;
use crate::domains::transit::models::ArrivalsEnvelope;

pub struct StopArrivalsTool;

#[async_trait::async_trait]
impl TransitTool for StopArrivalsTool {
    type Params = StopEventsParams;

    const NAME: &'static str = "stop_arrivals";

    const DESCRIPTION: &'static str = "Get upcoming arrivals at a stop with real-time delays, \
         platforms and service remarks.";

    #[instrument(skip_all, fields(stop_id = %params.stop_id))]
    async fn execute(&self, client: &TransitClient, params: Self::Params) -> Result<Value, ToolError> {
        info!("Fetching arrivals for the next {} minutes", params.duration);

        let envelope: ArrivalsEnvelope = client
            .get_json(&["stops", params.stop_id.as_str(), "arrivals"], &params.to_query())
            .await
            .map_err(failed("Failed to get arrivals"))?;

        Ok(Value::Array(envelope.arrivals))
    }
}

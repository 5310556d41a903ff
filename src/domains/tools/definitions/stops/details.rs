//! Stop details tool.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::{default_language, failed, require_identifier};
use crate::domains::tools::{ToolError, TransitTool, Validate, ValidationError};
use crate::domains::transit::{QueryParams, TransitClient};

/// Parameters for a stop lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StopDetailsParams {
    /// Stop or station id, e.g. "900100003".
    pub stop_id: String,

    /// Also return the lines serving the stop.
    #[serde(default)]
    pub lines_of_stops: bool,

    /// Language for names and remarks.
    #[serde(default = "default_language")]
    pub language: String,
}

impl Validate for StopDetailsParams {
    fn validate(&self) -> Result<(), ValidationError> {
        require_identifier("stopId", &self.stop_id)
    }
}

pub struct StopDetailsTool;

#[async_trait::async_trait]
impl TransitTool for StopDetailsTool {
    type Params = StopDetailsParams;

    const NAME: &'static str = "stop_details";

    const DESCRIPTION: &'static str = "Get details about a stop or station: name, location, \
         served transport products and, optionally, the lines calling there.";

    #[instrument(skip_all, fields(stop_id = %params.stop_id))]
    async fn execute(&self, client: &TransitClient, params: Self::Params) -> Result<Value, ToolError> {
        info!("Fetching stop details");

        let query = QueryParams::new()
            .with("linesOfStops", params.lines_of_stops)
            .with("language", params.language);

        let stop: Map<String, Value> = client
            .get_json(&["stops", params.stop_id.as_str()], &query)
            .await
            .map_err(failed("Failed to get stop details"))?;

        Ok(Value::Object(stop))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::test_support::call_with_stub;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_details_returns_object_directly() {
        let body = json!({
            "type": "stop", "id": "900100003", "name": "S+U Alexanderplatz",
            "products": { "suburban": true, "subway": true }
        });
        let (result, stub) = call_with_stub(
            StopDetailsTool::NAME,
            json!({ "stopId": "900100003", "linesOfStops": true }),
            StatusCode::OK,
            body.clone(),
        )
        .await;

        assert_eq!(result.unwrap(), body);
        let request = stub.only_request();
        assert_eq!(request.path, "/stops/900100003");
        assert_eq!(request.param("linesOfStops"), Some("true"));
        assert!(!request.has_param("stopId"));
    }

    #[tokio::test]
    async fn test_details_not_found_is_prefixed() {
        let (result, _stub) = call_with_stub(
            StopDetailsTool::NAME,
            json!({ "stopId": "000" }),
            StatusCode::NOT_FOUND,
            json!({ "error": true, "msg": "stop not found" }),
        )
        .await;

        assert_eq!(
            result.unwrap_err().to_string(),
            "Failed to get stop details: HTTP 404: stop not found"
        );
    }

    #[tokio::test]
    async fn test_details_parent_segment_id_is_rejected() {
        let (result, stub) = call_with_stub(
            StopDetailsTool::NAME,
            json!({ "stopId": ".." }),
            StatusCode::OK,
            json!({ "departures": [] }),
        )
        .await;

        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn test_details_rejects_array_body() {
        let (result, _stub) = call_with_stub(
            StopDetailsTool::NAME,
            json!({ "stopId": "900100003" }),
            StatusCode::OK,
            json!([]),
        )
        .await;

        let message = result.unwrap_err().to_string();
        assert!(message.starts_with("Failed to get stop details: invalid response body"));
    }
}

//! Radar tool: vehicles moving inside a bounding box.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, instrument};

use super::common::{default_language, default_true, failed};
use crate::domains::tools::{FieldViolation, ToolError, TransitTool, Validate, ValidationError};
use crate::domains::transit::{QueryParams, TransitClient};

/// Parameters for a radar query.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RadarParams {
    /// Northern latitude of the box.
    #[schemars(range(min = -90, max = 90))]
    pub north: f64,

    /// Western longitude of the box.
    #[schemars(range(min = -180, max = 180))]
    pub west: f64,

    /// Southern latitude of the box.
    #[schemars(range(min = -90, max = 90))]
    pub south: f64,

    /// Eastern longitude of the box.
    #[schemars(range(min = -180, max = 180))]
    pub east: f64,

    /// Maximum number of vehicles.
    #[serde(default = "default_results")]
    #[schemars(range(min = 1, max = 256))]
    pub results: u32,

    /// Time span to compute movements for, in seconds.
    #[serde(default = "default_duration")]
    #[schemars(range(min = 1, max = 30))]
    pub duration: u32,

    /// Number of positions per vehicle within the time span.
    #[serde(default = "default_frames")]
    #[schemars(range(min = 1, max = 20))]
    pub frames: u32,

    /// Include the shape of each vehicle's route.
    #[serde(default = "default_true")]
    pub polylines: bool,

    /// Language for names and remarks.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_results() -> u32 {
    256
}

fn default_duration() -> u32 {
    30
}

fn default_frames() -> u32 {
    3
}

impl Validate for RadarParams {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();
        if self.north <= self.south {
            violations.push(FieldViolation::new("north", "must be greater than south"));
        }
        if self.east <= self.west {
            violations.push(FieldViolation::new("east", "must be greater than west"));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(violations))
        }
    }
}

pub struct RadarTool;

#[async_trait::async_trait]
impl TransitTool for RadarTool {
    type Params = RadarParams;

    const NAME: &'static str = "radar";

    const DESCRIPTION: &'static str = "Show vehicles currently moving inside a bounding box, \
         with their line, direction, position and upcoming stopovers.";

    #[instrument(skip_all)]
    async fn execute(&self, client: &TransitClient, params: Self::Params) -> Result<Value, ToolError> {
        info!(
            "Radar over N{} W{} S{} E{}",
            params.north, params.west, params.south, params.east
        );

        let query = QueryParams::new()
            .with("north", params.north)
            .with("west", params.west)
            .with("south", params.south)
            .with("east", params.east)
            .with("results", params.results)
            .with("duration", params.duration)
            .with("frames", params.frames)
            .with("polylines", params.polylines)
            .with("language", params.language);

        let radar: Map<String, Value> = client
            .get_json(&["radar"], &query)
            .await
            .map_err(failed("Failed to get radar data"))?;

        Ok(Value::Object(radar))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::test_support::call_with_stub;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_radar_passes_box_and_returns_object() {
        let body = json!({
            "movements": [{ "tripId": "1|2|3", "line": { "name": "M10" },
                            "location": { "latitude": 52.53, "longitude": 13.41 } }],
            "realtimeDataUpdatedAt": 1700000000
        });
        let (result, stub) = call_with_stub(
            RadarTool::NAME,
            json!({ "north": 52.6, "west": 13.3, "south": 52.5, "east": 13.5 }),
            StatusCode::OK,
            body.clone(),
        )
        .await;

        assert_eq!(result.unwrap(), body);

        let request = stub.only_request();
        assert_eq!(request.path, "/radar");
        assert_eq!(request.param("north"), Some("52.6"));
        assert_eq!(request.param("west"), Some("13.3"));
        assert_eq!(request.param("south"), Some("52.5"));
        assert_eq!(request.param("east"), Some("13.5"));
        assert_eq!(request.param("results"), Some("256"));
        assert_eq!(request.param("duration"), Some("30"));
        assert_eq!(request.param("frames"), Some("3"));
        assert_eq!(request.param("polylines"), Some("true"));
    }

    #[tokio::test]
    async fn test_radar_inverted_box_sends_nothing() {
        let (result, stub) = call_with_stub(
            RadarTool::NAME,
            json!({ "north": 52.5, "west": 13.5, "south": 52.6, "east": 13.3 }),
            StatusCode::OK,
            json!({}),
        )
        .await;

        match result {
            Err(ToolError::InvalidArguments(err)) => assert_eq!(err.fields(), vec!["north", "east"]),
            other => panic!("expected invalid arguments, got {other:?}"),
        }
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn test_radar_rejects_frames_above_limit() {
        let (result, stub) = call_with_stub(
            RadarTool::NAME,
            json!({ "north": 52.6, "west": 13.3, "south": 52.5, "east": 13.5, "frames": 21 }),
            StatusCode::OK,
            json!({}),
        )
        .await;

        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn test_radar_upstream_error_is_prefixed() {
        let (result, _stub) = call_with_stub(
            RadarTool::NAME,
            json!({ "north": 52.6, "west": 13.3, "south": 52.5, "east": 13.5 }),
            StatusCode::OK,
            json!({ "error": true, "msg": "bounding box too large" }),
        )
        .await;

        assert_eq!(
            result.unwrap_err().to_string(),
            "Failed to get radar data: bounding box too large"
        );
    }
}

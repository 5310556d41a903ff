//! Journey planning tool.
//!
//! Routes between two locations, optionally via a third, either leaving at
//! or arriving by a given time.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use super::common::{default_language, default_true, failed, require_identifier};
use crate::domains::tools::{FieldViolation, ToolError, TransitTool, Validate, ValidationError};
use crate::domains::transit::models::JourneysEnvelope;
use crate::domains::transit::{QueryParams, TransitClient};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Required level of step-free access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Accessibility {
    Partial,
    Complete,
}

impl Accessibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Partial => "partial",
            Self::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum WalkingSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl WalkingSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Normal => "normal",
            Self::Fast => "fast",
        }
    }
}

/// Parameters for journey planning.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JourneyPlanParams {
    /// Origin stop id.
    pub from: String,

    /// Destination stop id.
    pub to: String,

    /// Stop id the journey must pass through.
    #[serde(default)]
    pub via: Option<String>,

    /// Leave at this time, e.g. "tomorrow 8am". Cannot be combined with `arrival`.
    #[serde(default)]
    pub departure: Option<String>,

    /// Arrive by this time. Cannot be combined with `departure`.
    #[serde(default)]
    pub arrival: Option<String>,

    /// Maximum number of journeys.
    #[serde(default = "default_results")]
    #[schemars(range(min = 1, max = 6))]
    pub results: u32,

    /// Maximum number of transfers, -1 for unlimited.
    #[serde(default = "default_transfers")]
    #[schemars(range(min = -1, max = 10))]
    pub transfers: i32,

    /// Minimum time for a transfer in minutes.
    #[serde(default)]
    #[schemars(range(min = 0, max = 60))]
    pub transfer_time: u32,

    /// Required accessibility: "partial" or "complete".
    #[serde(default)]
    pub accessibility: Option<Accessibility>,

    /// Only use connections that allow taking a bike.
    #[serde(default)]
    pub bike: bool,

    /// Walking speed used for footpaths and transfers.
    #[serde(default)]
    pub walking_speed: WalkingSpeed,

    /// Allow the journey to start with a walk to a nearby stop.
    #[serde(default = "default_true")]
    pub start_with_walking: bool,

    /// Allow the journey to end with a walk from a nearby stop.
    #[serde(default = "default_true")]
    pub end_with_walking: bool,

    /// Language for names and remarks.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_results() -> u32 {
    3
}

fn default_transfers() -> i32 {
    -1
}

impl Validate for JourneyPlanParams {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();
        for (field, id) in [("from", &self.from), ("to", &self.to)] {
            if let Err(err) = require_identifier(field, id) {
                violations.extend(err.violations);
            }
        }

        if self.departure.is_some() && self.arrival.is_some() {
            let message = "departure and arrival cannot both be set";
            violations.push(FieldViolation::new("departure", message));
            violations.push(FieldViolation::new("arrival", message));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(violations))
        }
    }
}

impl JourneyPlanParams {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with("from", &self.from)
            .with("to", &self.to)
            .with_opt("via", self.via.as_ref())
            .with_opt("departure", self.departure.as_ref())
            .with_opt("arrival", self.arrival.as_ref())
            .with("results", self.results)
            .with("transfers", self.transfers)
            .with("transferTime", self.transfer_time)
            .with_opt("accessibility", self.accessibility.map(|a| a.as_str()))
            .with("bike", self.bike)
            .with("walkingSpeed", self.walking_speed.as_str())
            .with("startWithWalking", self.start_with_walking)
            .with("endWithWalking", self.end_with_walking)
            .with("language", &self.language)
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Journey planning tool.
pub struct JourneyPlanTool;

#[async_trait::async_trait]
impl TransitTool for JourneyPlanTool {
    type Params = JourneyPlanParams;

    const NAME: &'static str = "journey_plan";

    const DESCRIPTION: &'static str = "Plan journeys between two stops. \
         Each journey lists its legs with lines, platforms, planned and real-time times, \
         and walking segments. Set either a departure or an arrival time, not both.";

    #[instrument(skip_all, fields(from = %params.from, to = %params.to))]
    async fn execute(&self, client: &TransitClient, params: Self::Params) -> Result<Value, ToolError> {
        info!("Planning journey");

        let envelope: JourneysEnvelope = client
            .get_json(&["journeys"], &params.to_query())
            .await
            .map_err(failed("Failed to plan journey"))?;

        info!("Found {} journey(s)", envelope.journeys.len());
        Ok(Value::Array(envelope.journeys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::test_support::call_with_stub;
    use axum::http::StatusCode;
    use serde_json::json;

    fn params(value: Value) -> JourneyPlanParams {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_params_defaults() {
        let p = params(json!({ "from": "900100003", "to": "900017101" }));
        assert_eq!(p.results, 3);
        assert_eq!(p.transfers, -1);
        assert_eq!(p.transfer_time, 0);
        assert_eq!(p.walking_speed, WalkingSpeed::Normal);
        assert!(p.accessibility.is_none());
        assert!(!p.bike);
        assert!(p.start_with_walking);
        assert!(p.end_with_walking);
    }

    #[test]
    fn test_departure_and_arrival_are_exclusive() {
        let p = params(json!({
            "from": "900100003", "to": "900017101",
            "departure": "tomorrow 8am", "arrival": "tomorrow 9am"
        }));

        let err = p.validate().unwrap_err();
        assert!(err.involves("departure"));
        assert!(err.involves("arrival"));
    }

    #[test]
    fn test_blank_endpoints_are_reported_together() {
        let p = params(json!({ "from": "", "to": " " }));
        assert_eq!(p.validate().unwrap_err().fields(), vec!["from", "to"]);
    }

    #[test]
    fn test_query_omits_absent_optionals() {
        let query = params(json!({ "from": "900100003", "to": "900017101" })).to_query();
        assert!(!query.contains("via"));
        assert!(!query.contains("departure"));
        assert!(!query.contains("arrival"));
        assert!(!query.contains("accessibility"));
        assert!(query.contains("walkingSpeed"));
    }

    #[tokio::test]
    async fn test_plan_unwraps_journeys() {
        let journey = json!({
            "type": "journey",
            "legs": [{ "origin": { "id": "900100003" }, "destination": { "id": "900017101" },
                       "line": { "name": "U5" }, "departureDelay": null }]
        });
        let (result, stub) = call_with_stub(
            JourneyPlanTool::NAME,
            json!({
                "from": "900100003", "to": "900017101", "via": "900003201",
                "arrival": "2024-05-01T09:00:00+02:00",
                "accessibility": "complete", "walkingSpeed": "slow", "results": 1
            }),
            StatusCode::OK,
            json!({ "journeys": [journey], "earlierRef": "abc", "laterRef": "def" }),
        )
        .await;

        assert_eq!(result.unwrap(), json!([journey]));

        let request = stub.only_request();
        assert_eq!(request.path, "/journeys");
        assert_eq!(request.param("from"), Some("900100003"));
        assert_eq!(request.param("via"), Some("900003201"));
        assert_eq!(request.param("arrival"), Some("2024-05-01T09:00:00+02:00"));
        assert!(!request.has_param("departure"));
        assert_eq!(request.param("accessibility"), Some("complete"));
        assert_eq!(request.param("walkingSpeed"), Some("slow"));
        assert_eq!(request.param("transfers"), Some("-1"));
        assert_eq!(request.param("results"), Some("1"));
    }

    #[tokio::test]
    async fn test_plan_with_both_times_sends_nothing() {
        let (result, stub) = call_with_stub(
            JourneyPlanTool::NAME,
            json!({
                "from": "900100003", "to": "900017101",
                "departure": "tomorrow 8am", "arrival": "tomorrow 9am"
            }),
            StatusCode::OK,
            json!({ "journeys": [] }),
        )
        .await;

        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn test_plan_upstream_error_is_prefixed() {
        let (result, _stub) = call_with_stub(
            JourneyPlanTool::NAME,
            json!({ "from": "900100003", "to": "900017101" }),
            StatusCode::OK,
            json!({ "error": true, "msg": "no connections found" }),
        )
        .await;

        assert_eq!(
            result.unwrap_err().to_string(),
            "Failed to plan journey: no connections found"
        );
    }
}

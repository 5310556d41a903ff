//! Response shapes the server inspects.
//!
//! Transit entities (locations, departures, journeys, trips, radar movements)
//! pass through untouched as JSON values. Only the error body and the named
//! envelopes around result lists are typed here.

use serde::Deserialize;
use serde_json::Value;

/// Application-level error body, sent with any status including 200.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamErrorBody {
    pub error: bool,
    #[serde(default)]
    pub msg: Option<String>,
}

impl UpstreamErrorBody {
    /// Extract the error message if `body` is error-shaped.
    pub fn detect(body: &Value) -> Option<String> {
        let parsed = Self::deserialize(body).ok()?;
        if !parsed.error {
            return None;
        }
        Some(
            parsed
                .msg
                .unwrap_or_else(|| "unknown upstream error".to_string()),
        )
    }
}

/// `GET /stops/{id}/departures`
#[derive(Debug, Deserialize)]
pub struct DeparturesEnvelope {
    pub departures: Vec<Value>,
}

/// `GET /stops/{id}/arrivals`
#[derive(Debug, Deserialize)]
pub struct ArrivalsEnvelope {
    pub arrivals: Vec<Value>,
}

/// `GET /journeys`
#[derive(Debug, Deserialize)]
pub struct JourneysEnvelope {
    pub journeys: Vec<Value>,
}

/// `GET /trips/{id}`
#[derive(Debug, Deserialize)]
pub struct TripEnvelope {
    pub trip: Value,
}

//! Stop tools: details and the departure/arrival boards.

mod arrivals;
mod departures;
mod details;

use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{default_language, default_true, require_identifier};
use crate::domains::tools::{Validate, ValidationError};
use crate::domains::transit::QueryParams;

pub use arrivals::StopArrivalsTool;
pub use departures::StopDeparturesTool;
pub use details::{StopDetailsParams, StopDetailsTool};

/// Parameters shared by the departure and arrival boards.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StopEventsParams {
    /// Stop or station id, e.g. "900100003".
    pub stop_id: String,

    /// Start of the time window, e.g. "tomorrow 6pm" or an ISO 8601 date. Defaults to now.
    #[serde(default)]
    pub when: Option<String>,

    /// Length of the time window in minutes.
    #[serde(default = "default_duration")]
    #[schemars(range(min = 1, max = 1440))]
    pub duration: u32,

    /// Maximum number of results.
    #[serde(default = "default_results")]
    #[schemars(range(min = 1, max = 100))]
    pub results: u32,

    /// Include service remarks and warnings.
    #[serde(default = "default_true")]
    pub remarks: bool,

    /// Language for names and remarks.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_duration() -> u32 {
    120
}

fn default_results() -> u32 {
    10
}

impl Validate for StopEventsParams {
    fn validate(&self) -> Result<(), ValidationError> {
        require_identifier("stopId", &self.stop_id)
    }
}

impl StopEventsParams {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with_opt("when", self.when.as_ref())
            .with("duration", self.duration)
            .with("results", self.results)
            .with("remarks", self.remarks)
            .with("language", &self.language)
    }
}

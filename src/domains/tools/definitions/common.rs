//! Common utilities shared across transit tools.

use tracing::warn;

use crate::domains::tools::error::{ToolError, ValidationError};
use crate::domains::transit::{TransitError, validate_identifier};

/// Default response language.
pub fn default_language() -> String {
    "en".to_string()
}

pub fn default_true() -> bool {
    true
}

/// Reject an empty path identifier (`stopId`, `tripId`).
pub fn require_identifier(field: &str, id: &str) -> Result<(), ValidationError> {
    validate_identifier(id).map_err(|msg| ValidationError::field(field, msg))
}

/// Wrap a client failure with the name of the operation that failed.
pub fn failed(operation: &'static str) -> impl FnOnce(TransitError) -> ToolError {
    move |err| {
        warn!("{}: {}", operation, err);
        ToolError::execution_failed(format!("{operation}: {err}"))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_identifier() {
        assert!(require_identifier("stopId", "900100003").is_ok());
        let err = require_identifier("stopId", " ").unwrap_err();
        assert_eq!(err.fields(), vec!["stopId"]);
    }

    #[test]
    fn test_failed_prefixes_message() {
        let err = failed("Failed to plan journey")(TransitError::Upstream("no results".into()));
        assert_eq!(err.to_string(), "Failed to plan journey: no results");
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }
}

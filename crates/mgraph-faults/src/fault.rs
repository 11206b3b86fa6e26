//! Canonical fault record produced by classification.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Coarse fault bucket used for logging, metrics, and high-level handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultCategory {
    /// Credentials missing, expired, or rejected (401-class).
    Authentication,
    /// Caller is known but not permitted (403-class).
    Authorization,
    /// The request itself is malformed or unprocessable (400/422-class).
    Validation,
    /// The service is shedding load (429-class).
    Throttling,
    /// Server-side failure (5xx-class).
    Service,
    /// The request never reached the service.
    Network,
    /// Shape of the error was not recognized.
    #[default]
    Unknown,
}

impl FaultCategory {
    /// Stable lowercase name, as emitted in logs and diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Authorization => "authorization",
            Self::Validation => "validation",
            Self::Throttling => "throttling",
            Self::Service => "service",
            Self::Network => "network",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for FaultCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the envelope's nested inner error.
///
/// The wire protocol allows a single nesting level; the record is a sequence
/// member so deeper protocols can be accommodated without a schema change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerErrorRecord {
    pub code: String,
    pub message: String,
    pub odata_type: String,
    pub request_id: String,
    pub client_request_id: String,
    pub date: String,
}

/// One entry of the envelope's parallel `details` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetailRecord {
    pub code: String,
    pub message: String,
    pub target: String,
}

/// Normalized record of one error occurrence, regardless of origin shape.
///
/// Built fresh per occurrence by [`crate::classify`], fully populated within
/// that call, then consumed read-only by the categorizer, the retry
/// predicates, the backoff calculator, and the diagnostic renderer. String
/// fields use the empty string for "absent". `status_code` 0 means the
/// failure happened below the protocol layer and no response was seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CanonicalFault {
    pub status_code: u16,
    pub error_code: String,
    pub error_message: String,
    /// Field or resource the server blames, when it says.
    pub target: String,
    /// True iff the structured protocol-envelope shape matched.
    pub is_odata_error: bool,
    /// Assigned by the categorizer; the only field recomputed after
    /// extraction.
    pub category: FaultCategory,
    pub request_id: String,
    pub client_request_id: String,
    pub correlation_id: String,
    pub error_date: String,
    /// Server-supplied wait hint, verbatim header value.
    pub retry_after: String,
    pub throttled_reason: String,
    pub inner_errors: Vec<InnerErrorRecord>,
    pub error_details: Vec<ErrorDetailRecord>,
    /// Free-form metadata, e.g. the looked-up description for known codes.
    pub additional_data: Map<String, Value>,
    /// Newline-joined `key: [values]` dump of every header seen.
    /// Diagnostics only.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub raw_header_dump: String,
}

impl CanonicalFault {
    /// True when no response was received at all.
    #[must_use]
    pub const fn is_transport_failure(&self) -> bool {
        self.status_code == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names_are_stable() {
        for (category, name) in [
            (FaultCategory::Authentication, "authentication"),
            (FaultCategory::Authorization, "authorization"),
            (FaultCategory::Validation, "validation"),
            (FaultCategory::Throttling, "throttling"),
            (FaultCategory::Service, "service"),
            (FaultCategory::Network, "network"),
            (FaultCategory::Unknown, "unknown"),
        ] {
            assert_eq!(category.as_str(), name);
            assert_eq!(category.to_string(), name);
        }
    }

    #[test]
    fn zero_fault_is_transport_with_empty_sequences() {
        let fault = CanonicalFault::default();
        assert!(fault.is_transport_failure());
        assert!(fault.inner_errors.is_empty());
        assert!(fault.error_details.is_empty());
        assert_eq!(fault.category, FaultCategory::Unknown);
    }
}

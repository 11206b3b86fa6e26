//! Fault categorization.

use crate::fault::{CanonicalFault, FaultCategory};

/// Assign a category to a fault. Status code wins; the error code's text is
/// only consulted for statuses outside the known buckets. Total: every fault
/// gets one of the named buckets, with `Service` as the final default.
/// `Unknown` is reserved for the normalizer's unrecognized-shape branch and
/// is never produced here.
#[must_use]
pub fn categorize(fault: &CanonicalFault) -> FaultCategory {
    match fault.status_code {
        401 => FaultCategory::Authentication,
        403 => FaultCategory::Authorization,
        400 | 422 => FaultCategory::Validation,
        429 => FaultCategory::Throttling,
        500 | 502 | 503 | 504 => FaultCategory::Service,
        0 => FaultCategory::Network,
        _ => categorize_by_code(&fault.error_code),
    }
}

fn categorize_by_code(code: &str) -> FaultCategory {
    let lower = code.to_lowercase();
    if lower.contains("auth") {
        FaultCategory::Authentication
    } else if lower.contains("forbidden") {
        FaultCategory::Authorization
    } else if lower.contains("throttle") {
        FaultCategory::Throttling
    } else if lower.contains("network") {
        FaultCategory::Network
    } else {
        FaultCategory::Service
    }
}

//! Retry predicates over canonical faults.
//!
//! Three independent families: generic, delete-path, and read-after-write.
//! They overlap but are deliberately not unified. The read family treats
//! 404/409 as retryable (propagation lag after a create/update is expected)
//! while the delete family treats them as terminal; collapsing the tables
//! would lose that asymmetry. Every predicate answers `false` for an absent
//! fault.

use crate::fault::CanonicalFault;

const RETRYABLE_STATUSES: [u16; 5] = [429, 503, 502, 504, 500];

const RETRYABLE_CODES: [&str; 6] = [
    "ServiceUnavailable",
    "RequestThrottled",
    "RequestTimeout",
    "InternalServerError",
    "BadGateway",
    "GatewayTimeout",
];

/// Code the service reports while an unassignment is still propagating;
/// a delete retried after the wait succeeds.
const DELETE_PROPAGATION_CODE: &str = "5001";

const DELETE_NON_RETRYABLE_STATUSES: [u16; 9] =
    [200, 204, 400, 401, 403, 404, 409, 410, 422];

const DELETE_NON_RETRYABLE_CODES: [&str; 9] = [
    "BadRequest",
    "Unauthorized",
    "Forbidden",
    "AccessDenied",
    "NotFound",
    "Conflict",
    "Gone",
    "UnprocessableEntity",
    "ValidationError",
];

const READ_RETRYABLE_STATUSES: [u16; 8] = [404, 409, 423, 429, 500, 503, 502, 504];

const READ_RETRYABLE_CODES: [&str; 11] = [
    "NotFound",
    "ResourceNotFound",
    "RequestThrottled",
    "TooManyRequests",
    "ServiceUnavailable",
    "RequestTimeout",
    "InternalServerError",
    "BadGateway",
    "GatewayTimeout",
    "NetworkError",
    "ConnectionTimeout",
];

// 404 and 409 are intentionally absent from both read non-retryable tables.
const READ_NON_RETRYABLE_STATUSES: [u16; 9] =
    [200, 204, 400, 401, 403, 405, 406, 410, 422];

const READ_NON_RETRYABLE_CODES: [&str; 8] = [
    "Unauthorized",
    "Forbidden",
    "AccessDenied",
    "BadRequest",
    "ValidationError",
    "UnprocessableEntity",
    "Conflict",
    "Gone",
];

fn code_in(fault: &CanonicalFault, codes: &[&str]) -> bool {
    codes.iter().any(|code| fault.error_code == *code)
}

/// Generic retry predicate used by plain operations.
#[must_use]
pub fn is_retryable(fault: Option<&CanonicalFault>) -> bool {
    fault.is_some_and(|fault| {
        RETRYABLE_STATUSES.contains(&fault.status_code) || code_in(fault, &RETRYABLE_CODES)
    })
}

/// Delete-path: transient server trouble, plus the assignment-propagation
/// code, warrants another attempt.
#[must_use]
pub fn is_retryable_delete(fault: Option<&CanonicalFault>) -> bool {
    fault.is_some_and(|fault| {
        RETRYABLE_STATUSES.contains(&fault.status_code)
            || fault.error_code == DELETE_PROPAGATION_CODE
    })
}

/// Delete-path: success and permanent client errors are terminal.
///
/// A fault may be neither retryable nor non-retryable here; the caller's
/// loop decides the default.
#[must_use]
pub fn is_non_retryable_delete(fault: Option<&CanonicalFault>) -> bool {
    fault.is_some_and(|fault| {
        DELETE_NON_RETRYABLE_STATUSES.contains(&fault.status_code)
            || code_in(fault, &DELETE_NON_RETRYABLE_CODES)
    })
}

/// Read-after-write: 404/409 count as retryable because a freshly written
/// resource may not be visible yet.
#[must_use]
pub fn is_retryable_read(fault: Option<&CanonicalFault>) -> bool {
    fault.is_some_and(|fault| {
        READ_RETRYABLE_STATUSES.contains(&fault.status_code)
            || code_in(fault, &READ_RETRYABLE_CODES)
    })
}

/// Read-after-write terminal set. Must never grow 404/409.
#[must_use]
pub fn is_non_retryable_read(fault: Option<&CanonicalFault>) -> bool {
    fault.is_some_and(|fault| {
        READ_NON_RETRYABLE_STATUSES.contains(&fault.status_code)
            || code_in(fault, &READ_NON_RETRYABLE_CODES)
    })
}

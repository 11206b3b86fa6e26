//! Known provider error codes and their one-line descriptions.
//!
//! Data, not behavior: the table feeds `additional_data` and the diagnostic
//! renderer. Built once at first use and immutable afterwards.

use std::collections::HashMap;

use once_cell::sync::Lazy;

static DESCRIPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Authentication
        (
            "InvalidAuthenticationToken",
            "The access token is missing, malformed, or signed for another audience",
        ),
        (
            "ExpiredAuthenticationToken",
            "The access token has expired and must be refreshed",
        ),
        (
            "AuthenticationFailure",
            "The service could not authenticate the caller",
        ),
        ("Unauthorized", "The request lacks valid credentials"),
        ("TokenExpired", "The credential used for this request has expired"),
        // Authorization
        (
            "AccessDenied",
            "The caller is authenticated but not permitted to perform this operation",
        ),
        ("Forbidden", "The tenant or role assignment forbids this operation"),
        (
            "InsufficientPrivileges",
            "The consented permission set does not cover this operation",
        ),
        (
            "NotAllowed",
            "The operation is blocked by policy for this resource",
        ),
        // Request validation
        ("BadRequest", "The request body or query is malformed"),
        ("InvalidRequest", "The request does not satisfy the resource schema"),
        (
            "InvalidProperty",
            "A property value is missing, read-only, or out of range",
        ),
        (
            "MalformedEntity",
            "The payload could not be parsed as the expected entity",
        ),
        (
            "UnprocessableEntity",
            "The request is well-formed but semantically invalid",
        ),
        ("ValidationError", "One or more fields failed server-side validation"),
        (
            "InvalidRange",
            "The requested range or page window is not satisfiable",
        ),
        ("PreconditionFailed", "An If-Match or ETag precondition did not hold"),
        ("NotSupported", "The resource does not support this operation"),
        // Missing / conflicting resources
        ("NotFound", "The resource does not exist or is not yet visible"),
        ("ResourceNotFound", "No resource matches the supplied identifier"),
        ("ItemNotFound", "The item was deleted or never existed"),
        ("Conflict", "The request conflicts with the current resource state"),
        (
            "ResourceAlreadyExists",
            "A resource with the same identity already exists",
        ),
        ("Gone", "The resource existed but has been permanently removed"),
        // Throttling
        ("RequestThrottled", "The tenant is being throttled; slow down"),
        ("TooManyRequests", "Request rate exceeded the service limit"),
        (
            "ActivityLimitReached",
            "A per-activity quota was exhausted for this window",
        ),
        (
            "QuotaLimitReached",
            "The tenant quota for this resource type is exhausted",
        ),
        // Service-side failures
        ("InternalServerError", "The service hit an unexpected internal error"),
        ("GeneralException", "An unclassified service-side exception occurred"),
        ("ServiceUnavailable", "The service is temporarily unable to respond"),
        (
            "ServiceNotAvailable",
            "The backing service is offline or being updated",
        ),
        ("BadGateway", "An upstream dependency returned an invalid response"),
        ("GatewayTimeout", "An upstream dependency did not respond in time"),
        ("RequestTimeout", "The request did not complete within the deadline"),
        // Transport-level synthetics
        ("ConnectionRefused", "The endpoint actively refused the connection"),
        ("HostNotFound", "The endpoint hostname did not resolve"),
        (
            "NetworkUnreachable",
            "No network route to the endpoint is available",
        ),
        (
            "CertificateError",
            "TLS certificate validation failed for the endpoint",
        ),
        ("URLError", "The request failed before an HTTP response was produced"),
        // Fallbacks
        ("ApiError", "The service returned an error without an envelope"),
        ("UnknownError", "The error shape was not recognized"),
        (
            "5001",
            "The resource is still assigned and is waiting for asynchronous unassignment",
        ),
    ])
});

/// One-line description for a known provider error code.
#[must_use]
pub fn describe(code: &str) -> Option<&'static str> {
    if code.is_empty() {
        return None;
    }
    DESCRIPTIONS.get(code).copied()
}

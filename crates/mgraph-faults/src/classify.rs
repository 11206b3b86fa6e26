//! Fault normalization: turning a raw failure into one canonical record.

use thiserror::Error;
use tracing::trace;

use crate::category::categorize;
use crate::envelope::{EnvelopeError, ErrorEnvelope, decode_envelope};
use crate::fault::{CanonicalFault, FaultCategory};
use crate::headers::{HeaderBag, HeaderSet, extract_headers};

/// A failure reported by the HTTP layer before any response was produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("transport failure: {cause}")]
pub struct TransportFailure {
    /// HTTP method or verb-like label. Logging only.
    pub operation: String,
    /// Request URL. Logging only.
    pub url: String,
    /// The underlying cause text, as produced by the transport stack.
    pub cause: String,
}

/// A structured protocol-envelope failure: status, headers, and optionally
/// the decoded main error.
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("management API returned status {status}")]
pub struct ProtocolFailure {
    pub status: u16,
    pub headers: HeaderSet,
    pub error: Option<EnvelopeError>,
}

/// A non-envelope API failure: just status, headers, and a message.
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("API error {status}: {message}")]
pub struct GenericFailure {
    pub status: u16,
    pub headers: HeaderSet,
    pub message: String,
}

/// Every failure shape the engine recognizes, plus a catch-all.
///
/// Matched exhaustively by [`classify`]; callers that cannot name a shape
/// use [`ApiFailure::Unrecognized`] rather than inventing one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiFailure {
    #[error(transparent)]
    Transport(#[from] TransportFailure),
    #[error(transparent)]
    Protocol(#[from] ProtocolFailure),
    #[error(transparent)]
    Api(#[from] GenericFailure),
    #[error("unrecognized failure: {0}")]
    Unrecognized(String),
}

/// Substring probes for transport causes, checked in priority order.
const TRANSPORT_CAUSES: [(&str, &str, u16); 5] = [
    ("context deadline exceeded", "RequestTimeout", 504),
    ("connection refused", "ConnectionRefused", 503),
    ("no such host", "HostNotFound", 503),
    ("network is unreachable", "NetworkUnreachable", 503),
    ("certificate", "CertificateError", 503),
];

/// Normalize one failure into a [`CanonicalFault`].
///
/// `operation` labels the calling resource operation for tracing; it does
/// not influence the result. The function is total: every input yields a
/// fully-populated record with a category assigned.
#[must_use]
pub fn classify(operation: &str, failure: &ApiFailure) -> CanonicalFault {
    let mut fault = CanonicalFault::default();

    match failure {
        ApiFailure::Transport(transport) => {
            trace!(operation, url = %transport.url, "classifying transport failure");
            classify_transport(&mut fault, transport);
        }
        ApiFailure::Protocol(protocol) => {
            trace!(operation, status = protocol.status, "classifying envelope failure");
            fault.status_code = protocol.status;
            fault.is_odata_error = true;
            extract_headers(&mut fault, &protocol.headers);
            if let Some(error) = &protocol.error {
                decode_envelope(&mut fault, error);
            }
        }
        ApiFailure::Api(generic) => {
            trace!(operation, status = generic.status, "classifying generic API failure");
            fault.status_code = generic.status;
            fault.error_code = "ApiError".to_string();
            fault.error_message = generic.message.clone();
            extract_headers(&mut fault, &generic.headers);
        }
        ApiFailure::Unrecognized(text) => {
            trace!(operation, "classifying unrecognized failure");
            fault.status_code = 500;
            fault.error_code = "UnknownError".to_string();
            fault.error_message = text.clone();
            fault.category = FaultCategory::Unknown;
            return fault;
        }
    }

    fault.category = categorize(&fault);
    trace!(
        operation,
        status = fault.status_code,
        code = %fault.error_code,
        category = %fault.category,
        "fault classified"
    );
    fault
}

fn classify_transport(fault: &mut CanonicalFault, transport: &TransportFailure) {
    fault.error_message = transport.cause.clone();

    let lower = transport.cause.to_lowercase();
    let matched = TRANSPORT_CAUSES
        .iter()
        .find(|(probe, _, _)| lower.contains(probe));

    let (code, status) = matched.map_or(("URLError", 400), |&(_, code, status)| (code, status));
    fault.error_code = code.to_string();
    fault.status_code = status;
}

/// Build and classify a failure from raw response parts.
///
/// Attempts the envelope decode on `body` first and falls back to the
/// generic API shape, so callers holding a status, a header bag, and a body
/// string do not have to pick a shape themselves.
#[must_use]
pub fn classify_response(
    operation: &str,
    status: u16,
    headers: &dyn HeaderBag,
    body: &str,
) -> CanonicalFault {
    let mut header_set = HeaderSet::new();
    for key in headers.keys() {
        for value in headers.values(&key) {
            header_set.insert(key.clone(), value);
        }
    }

    let failure = match ErrorEnvelope::from_json(body) {
        Some(envelope) => ApiFailure::Protocol(ProtocolFailure {
            status,
            headers: header_set,
            error: envelope.error,
        }),
        None => ApiFailure::Api(GenericFailure {
            status,
            headers: header_set,
            message: body.trim().to_string(),
        }),
    };

    classify(operation, &failure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn transport(cause: &str) -> ApiFailure {
        ApiFailure::Transport(TransportFailure {
            operation: "GET".to_string(),
            url: "https://graph.example.com/v1/managedDevices".to_string(),
            cause: cause.to_string(),
        })
    }

    #[test]
    fn transport_causes_map_in_priority_order() {
        let cases = [
            ("Get ...: context deadline exceeded", "RequestTimeout", 504),
            ("dial tcp 10.0.0.1:443: connection refused", "ConnectionRefused", 503),
            ("lookup graph.example.com: no such host", "HostNotFound", 503),
            ("connect: network is unreachable", "NetworkUnreachable", 503),
            ("x509: certificate signed by unknown authority", "CertificateError", 503),
            ("unsupported protocol scheme", "URLError", 400),
        ];
        for (cause, code, status) in cases {
            let fault = classify("device_read", &transport(cause));
            assert_eq!(fault.error_code, code, "cause: {cause}");
            assert_eq!(fault.status_code, status, "cause: {cause}");
            assert_eq!(fault.error_message, cause);
            assert!(!fault.is_odata_error);
        }
    }

    #[test]
    fn transport_matching_ignores_case() {
        let fault = classify("device_read", &transport("TLS Certificate rejected"));
        assert_eq!(fault.error_code, "CertificateError");
    }

    #[test]
    fn deadline_wins_over_later_probes() {
        // A cause mentioning both a deadline and a certificate takes the
        // higher-priority deadline mapping.
        let fault = classify(
            "device_read",
            &transport("certificate fetch: context deadline exceeded"),
        );
        assert_eq!(fault.error_code, "RequestTimeout");
        assert_eq!(fault.status_code, 504);
    }

    #[test]
    fn transport_category_follows_the_status_code() {
        // The categorizer runs after the branch label: 503 lands in the
        // service bucket, the generic URLError's 400 in validation.
        let refused = classify("device_read", &transport("connection refused"));
        assert_eq!(refused.category, FaultCategory::Service);

        let generic = classify("device_read", &transport("bad URL"));
        assert_eq!(generic.category, FaultCategory::Validation);
    }

    #[test]
    fn generic_api_failure_gets_the_fixed_code() {
        let failure = ApiFailure::Api(GenericFailure {
            status: 502,
            headers: HeaderSet::from_pairs([("request-id", "req-7")]),
            message: "upstream hiccup".to_string(),
        });
        let fault = classify("device_update", &failure);
        assert_eq!(fault.error_code, "ApiError");
        assert_eq!(fault.error_message, "upstream hiccup");
        assert_eq!(fault.status_code, 502);
        assert_eq!(fault.request_id, "req-7");
        assert!(!fault.is_odata_error);
        assert_eq!(fault.category, FaultCategory::Service);
    }

    #[test]
    fn unrecognized_failures_pin_the_unknown_category() {
        let fault = classify(
            "device_delete",
            &ApiFailure::Unrecognized("poll task panicked".to_string()),
        );
        assert_eq!(fault.status_code, 500);
        assert_eq!(fault.error_code, "UnknownError");
        assert_eq!(fault.error_message, "poll task panicked");
        assert_eq!(fault.category, FaultCategory::Unknown);
    }

    #[test]
    fn classification_is_deterministic() {
        let failure = ApiFailure::Protocol(ProtocolFailure {
            status: 429,
            headers: HeaderSet::from_pairs([
                ("retry-after", "5"),
                ("request-id", "req-1"),
            ]),
            error: Some(EnvelopeError {
                code: Some("RequestThrottled".to_string()),
                message: Some("Slow down".to_string()),
                ..EnvelopeError::default()
            }),
        });
        let first = classify("device_create", &failure);
        let second = classify("device_create", &failure);
        assert_eq!(first, second);
    }

    #[test]
    fn classify_response_prefers_the_envelope_shape() {
        let headers = HeaderSet::from_pairs([("request-id", "req-2")]);
        let fault = classify_response(
            "device_read",
            400,
            &headers,
            r#"{"error": {"code": "BadRequest", "message": "nope"}}"#,
        );
        assert!(fault.is_odata_error);
        assert_eq!(fault.error_code, "BadRequest");
        assert_eq!(fault.request_id, "req-2");

        let fallback = classify_response("device_read", 502, &headers, "Bad Gateway");
        assert!(!fallback.is_odata_error);
        assert_eq!(fallback.error_code, "ApiError");
        assert_eq!(fallback.error_message, "Bad Gateway");
    }
}

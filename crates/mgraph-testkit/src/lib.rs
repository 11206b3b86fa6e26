//! Fixtures and mock infrastructure for testing fault classification.
//!
//! Canned protocol envelopes, header bags, and wiremock mounts so tests can
//! exercise the classification engine against realistic response shapes
//! without hand-writing JSON in every test.

use mgraph_faults::{
    ApiFailure, EnvelopeError, ErrorEnvelope, GenericFailure, HeaderSet, ProtocolFailure,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A canned response, buildable piece by piece, convertible into the
/// failure shapes the engine classifies.
#[derive(Debug, Clone, Default)]
pub struct ResponseFixture {
    pub status: u16,
    pub headers: HeaderSet,
    pub body: String,
}

impl ResponseFixture {
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Builder: add one header.
    #[must_use]
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Builder: set the raw body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Builder: set an envelope body from a main-error JSON fragment.
    #[must_use]
    pub fn with_envelope(self, error: &serde_json::Value) -> Self {
        let body = json!({ "error": error }).to_string();
        self.with_body(body)
    }

    /// The protocol-envelope failure shape, when the body decodes as one;
    /// otherwise the generic API shape.
    #[must_use]
    pub fn into_failure(self) -> ApiFailure {
        match ErrorEnvelope::from_json(&self.body) {
            Some(envelope) => ApiFailure::Protocol(ProtocolFailure {
                status: self.status,
                headers: self.headers,
                error: envelope.error,
            }),
            None => ApiFailure::Api(GenericFailure {
                status: self.status,
                headers: self.headers,
                message: self.body,
            }),
        }
    }

    /// The envelope main error alone, for decoder-level tests.
    #[must_use]
    pub fn envelope_error(&self) -> Option<EnvelopeError> {
        ErrorEnvelope::from_json(&self.body).and_then(|envelope| envelope.error)
    }
}

/// The tracking headers a well-behaved service response carries.
#[must_use]
pub fn standard_headers() -> HeaderSet {
    HeaderSet::from_pairs([
        ("request-id", "00000000-0000-0000-0000-00000000beef"),
        ("client-request-id", "00000000-0000-0000-0000-00000000cafe"),
        ("ms-correlation-id", "00000000-0000-0000-0000-00000000f00d"),
        ("date", "Tue, 03 Mar 2026 10:00:00 GMT"),
    ])
}

/// A main-error fragment with code, message, and target.
#[must_use]
pub fn envelope_json(code: &str, message: &str, target: &str) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message,
    });
    if !target.is_empty() {
        error["target"] = json!(target);
    }
    error
}

/// A throttling main error as the service actually shapes it.
#[must_use]
pub fn throttled_envelope_json() -> serde_json::Value {
    json!({
        "code": "RequestThrottled",
        "message": "Request rate limit exceeded, try again later",
        "innerError": {
            "request-id": "00000000-0000-0000-0000-00000000beef",
            "date": "2026-03-03T10:00:00"
        }
    })
}

/// Convert a reqwest header map into the engine's header bag.
#[must_use]
pub fn header_set_from_reqwest(headers: &reqwest::header::HeaderMap) -> HeaderSet {
    let mut set = HeaderSet::new();
    for (key, value) in headers {
        if let Ok(text) = value.to_str() {
            set.insert(key.as_str(), text);
        }
    }
    set
}

/// Mount a throttled (429 + Retry-After) endpoint on `server`.
pub async fn mount_throttled(server: &MockServer, route: &str, retry_after_secs: u32) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", retry_after_secs.to_string().as_str())
                .insert_header("request-id", "00000000-0000-0000-0000-00000000beef")
                .set_body_json(json!({ "error": throttled_envelope_json() })),
        )
        .mount(server)
        .await;
}

/// Mount an arbitrary envelope error on `server`.
pub async fn mount_envelope_error(
    server: &MockServer,
    route: &str,
    status: u16,
    error: &serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("request-id", "00000000-0000-0000-0000-00000000beef")
                .insert_header("client-request-id", "00000000-0000-0000-0000-00000000cafe")
                .set_body_json(json!({ "error": error })),
        )
        .mount(server)
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use mgraph_faults::classify;

    #[test]
    fn fixture_with_envelope_body_becomes_a_protocol_failure() {
        let failure = ResponseFixture::new(400)
            .with_header("request-id", "req-1")
            .with_envelope(&envelope_json("BadRequest", "nope", "displayName"))
            .into_failure();

        let fault = classify("fixture", &failure);
        assert!(fault.is_odata_error);
        assert_eq!(fault.error_code, "BadRequest");
        assert_eq!(fault.target, "displayName");
    }

    #[test]
    fn fixture_with_plain_body_becomes_a_generic_failure() {
        let failure = ResponseFixture::new(502)
            .with_body("Bad Gateway")
            .into_failure();

        let fault = classify("fixture", &failure);
        assert!(!fault.is_odata_error);
        assert_eq!(fault.error_code, "ApiError");
    }

    #[test]
    fn throttled_envelope_decodes() {
        let fixture = ResponseFixture::new(429).with_envelope(&throttled_envelope_json());
        let error = fixture.envelope_error().expect("envelope");
        assert_eq!(error.code.as_deref(), Some("RequestThrottled"));
        assert!(error.inner_error.is_some());
    }
}

//! End-to-end classification scenarios over canned response fixtures.

use std::time::Duration;

use mgraph_faults::{
    ApiFailure, FaultCategory, TransportFailure, classify, compute_delay, render_diagnostic, retry,
};
use mgraph_testkit::{ResponseFixture, envelope_json, standard_headers, throttled_envelope_json};
use pretty_assertions::assert_eq;

fn fixture_with_standard_headers(status: u16) -> ResponseFixture {
    let mut fixture = ResponseFixture::new(status);
    fixture.headers = standard_headers();
    fixture
}

#[test]
fn validation_error_carries_target_and_tracking_ids() {
    let failure = fixture_with_standard_headers(400)
        .with_envelope(&envelope_json(
            "BadRequest",
            "Property 'displayName' is read-only",
            "deviceConfigurations",
        ))
        .into_failure();

    let fault = classify("device_configuration_create", &failure);

    assert_eq!(fault.status_code, 400);
    assert_eq!(fault.category, FaultCategory::Validation);
    assert_eq!(fault.target, "deviceConfigurations");
    assert!(fault.is_odata_error);
    assert_eq!(fault.request_id, "00000000-0000-0000-0000-00000000beef");
    assert_eq!(
        fault.client_request_id,
        "00000000-0000-0000-0000-00000000cafe"
    );
    assert_eq!(fault.error_date, "Tue, 03 Mar 2026 10:00:00 GMT");
}

#[test]
fn expired_token_is_authentication_and_never_retried() {
    let failure = fixture_with_standard_headers(401)
        .with_envelope(&envelope_json(
            "InvalidAuthenticationToken",
            "Access token has expired",
            "",
        ))
        .into_failure();

    let fault = classify("device_read", &failure);

    assert_eq!(fault.category, FaultCategory::Authentication);
    assert!(!retry::is_retryable(Some(&fault)));
    assert!(!retry::is_retryable_read(Some(&fault)));
    assert!(retry::is_non_retryable_read(Some(&fault)));
}

#[test]
fn missing_resource_right_after_create_is_worth_another_read() {
    let failure = ResponseFixture::new(404).into_failure();
    let fault = classify("device_read_after_create", &failure);

    assert!(retry::is_retryable_read(Some(&fault)));
    assert!(!retry::is_non_retryable_read(Some(&fault)));
}

#[test]
fn throttled_response_defers_to_the_server_hint() {
    let failure = fixture_with_standard_headers(429)
        .with_header("retry-after", "5")
        .with_envelope(&throttled_envelope_json())
        .into_failure();

    let fault = classify("device_list", &failure);

    assert_eq!(fault.category, FaultCategory::Throttling);
    assert!(retry::is_retryable(Some(&fault)));
    assert_eq!(fault.retry_after, "5");
    for attempt in [1, 3, 7] {
        assert_eq!(compute_delay(&fault, attempt), Duration::from_secs(5));
    }
}

#[test]
fn refused_connection_normalizes_to_a_service_fault() {
    let failure = ApiFailure::Transport(TransportFailure {
        operation: "POST".to_string(),
        url: "https://graph.example.com/v1/deviceConfigurations".to_string(),
        cause: "dial tcp 192.0.2.7:443: connection refused".to_string(),
    });

    let fault = classify("device_configuration_create", &failure);

    assert_eq!(fault.status_code, 503);
    assert_eq!(fault.error_code, "ConnectionRefused");
    assert_eq!(fault.category, FaultCategory::Service);
    assert!(retry::is_retryable(Some(&fault)));
}

#[test]
fn repeated_classification_is_byte_identical() {
    let failure = fixture_with_standard_headers(403)
        .with_envelope(&envelope_json("AccessDenied", "Missing role assignment", ""))
        .into_failure();

    let first = classify("policy_assign", &failure);
    let second = classify("policy_assign", &failure);
    assert_eq!(first, second);
    assert_eq!(
        render_diagnostic("assigning policy", &first),
        render_diagnostic("assigning policy", &second)
    );
}

#[test]
fn diagnostic_for_a_decoded_envelope_names_the_blamed_field() {
    let failure = fixture_with_standard_headers(400)
        .with_envelope(&envelope_json(
            "BadRequest",
            "Property 'displayName' is read-only",
            "deviceConfigurations",
        ))
        .into_failure();
    let fault = classify("device_configuration_update", &failure);

    let rendered = render_diagnostic("updating device configuration", &fault);
    assert!(rendered.contains("status 400"));
    assert!(rendered.contains("Target: deviceConfigurations"));
    assert!(rendered.contains("Code: BadRequest"));
    assert!(rendered.contains("Category: validation"));
    assert!(rendered.contains("request id 00000000-0000-0000-0000-00000000beef"));
}

#[test]
fn header_retry_after_survives_even_without_an_envelope() {
    let failure = ResponseFixture::new(503)
        .with_header("retry-after", "12")
        .with_body("Service Unavailable")
        .into_failure();

    let fault = classify("device_delete", &failure);
    assert_eq!(fault.error_code, "ApiError");
    assert_eq!(compute_delay(&fault, 4), Duration::from_secs(12));
}

//! Protocol-envelope error payloads and their decoder.
//!
//! The management API wraps failures in a nested OData-style envelope:
//! a main error carrying an optional `details` array and at most one
//! `innerError`. The decoder flattens that structure into the canonical
//! fault record. It is transport-agnostic and treats every missing piece
//! as "leave the field empty".

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codes;
use crate::fault::{CanonicalFault, ErrorDetailRecord, InnerErrorRecord};

/// Key under which the looked-up code description is stashed in
/// `additional_data`.
pub const ERROR_DESCRIPTION_KEY: &str = "error_description";

/// Top-level body wrapper: `{"error": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: Option<EnvelopeError>,
}

impl ErrorEnvelope {
    /// Best-effort decode of a raw response body. `None` when the body is
    /// not an envelope (or not JSON at all); that is not an error condition.
    #[must_use]
    pub fn from_json(body: &str) -> Option<Self> {
        let envelope: Self = serde_json::from_str(body).ok()?;
        envelope.error.is_some().then_some(envelope)
    }
}

/// The envelope's main error object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeError {
    pub code: Option<String>,
    pub message: Option<String>,
    pub target: Option<String>,
    #[serde(default)]
    pub details: Vec<EnvelopeDetail>,
    #[serde(rename = "innerError", alias = "innererror")]
    pub inner_error: Option<EnvelopeInnerError>,
}

/// One element of the main error's `details` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeDetail {
    pub code: Option<String>,
    pub message: Option<String>,
    pub target: Option<String>,
}

/// The single-level nested inner error.
///
/// Tracking fields use the wire names (`request-id`, `client-request-id`);
/// `date` may arrive as a string or a number, hence the loose `Value`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeInnerError {
    pub code: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "@odata.type")]
    pub odata_type: Option<String>,
    #[serde(rename = "request-id")]
    pub request_id: Option<String>,
    #[serde(rename = "client-request-id")]
    pub client_request_id: Option<String>,
    pub date: Option<Value>,
}

/// Flatten `error` into `fault`.
///
/// Copies non-empty `code`/`message`/`target` verbatim, records every
/// detail in order, and extracts the inner error. Inner tracking fields
/// back-fill the outer ones only when those are still empty, and the inner
/// `@odata.type` stands in for a missing outer error code (the inner type
/// is often the more specific of the two).
pub fn decode_envelope(fault: &mut CanonicalFault, error: &EnvelopeError) {
    if let Some(code) = non_empty(error.code.as_deref()) {
        fault.error_code = code.to_string();
    }
    if let Some(message) = non_empty(error.message.as_deref()) {
        fault.error_message = message.to_string();
    }
    if let Some(target) = non_empty(error.target.as_deref()) {
        fault.target = target.to_string();
    }

    if let Some(description) = codes::describe(&fault.error_code) {
        fault.additional_data.insert(
            ERROR_DESCRIPTION_KEY.to_string(),
            Value::String(description.to_string()),
        );
    }

    for detail in &error.details {
        fault.error_details.push(ErrorDetailRecord {
            code: detail.code.clone().unwrap_or_default(),
            message: detail.message.clone().unwrap_or_default(),
            target: detail.target.clone().unwrap_or_default(),
        });
    }

    if let Some(inner) = &error.inner_error {
        decode_inner_error(fault, inner);
    }
}

fn decode_inner_error(fault: &mut CanonicalFault, inner: &EnvelopeInnerError) {
    let record = InnerErrorRecord {
        code: inner.code.clone().unwrap_or_default(),
        message: inner.message.clone().unwrap_or_default(),
        odata_type: inner.odata_type.clone().unwrap_or_default(),
        request_id: inner.request_id.clone().unwrap_or_default(),
        client_request_id: inner.client_request_id.clone().unwrap_or_default(),
        date: inner.date.as_ref().map(stringify).unwrap_or_default(),
    };

    if fault.request_id.is_empty() && !record.request_id.is_empty() {
        fault.request_id = record.request_id.clone();
    }
    if fault.client_request_id.is_empty() && !record.client_request_id.is_empty() {
        fault.client_request_id = record.client_request_id.clone();
    }
    if fault.error_date.is_empty() && !record.date.is_empty() {
        fault.error_date = record.date.clone();
    }
    if fault.error_code.is_empty() && !record.odata_type.is_empty() {
        fault.error_code = record.odata_type.clone();
    }

    fault.inner_errors.push(record);
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

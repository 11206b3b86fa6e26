//! Human-readable rendering of a canonical fault.

use std::fmt::Write as _;

use crate::codes;
use crate::fault::CanonicalFault;

/// Render a multi-section diagnostic message for `fault`.
///
/// Sections are joined with newlines and each is emitted only when it has
/// content: summary, raw message, code (with looked-up description), target,
/// one line per detail, one line per inner error, tracking IDs, category.
#[must_use]
pub fn render_diagnostic(prefix: &str, fault: &CanonicalFault) -> String {
    let mut sections: Vec<String> = Vec::new();

    let summary = if fault.is_transport_failure() {
        format!("{prefix}: request failed before a response was received")
    } else {
        format!(
            "{prefix}: the management API returned status {}",
            fault.status_code
        )
    };
    sections.push(summary);

    if !fault.error_message.is_empty() {
        sections.push(format!("Message: {}", fault.error_message));
    }

    if !fault.error_code.is_empty() {
        match codes::describe(&fault.error_code) {
            Some(description) => {
                sections.push(format!("Code: {} ({description})", fault.error_code));
            }
            None => sections.push(format!("Code: {}", fault.error_code)),
        }
    }

    if !fault.target.is_empty() {
        sections.push(format!("Target: {}", fault.target));
    }

    for detail in &fault.error_details {
        let mut line = String::from("Detail:");
        if !detail.code.is_empty() {
            let _ = write!(line, " [{}]", detail.code);
        }
        if !detail.message.is_empty() {
            let _ = write!(line, " {}", detail.message);
        }
        if !detail.target.is_empty() {
            let _ = write!(line, " (target: {})", detail.target);
        }
        if line != "Detail:" {
            sections.push(line);
        }
    }

    for inner in &fault.inner_errors {
        let mut line = String::from("Inner error:");
        if !inner.odata_type.is_empty() {
            let _ = write!(line, " type {}", inner.odata_type);
        }
        if !inner.code.is_empty() {
            let _ = write!(line, " code {}", inner.code);
        }
        if !inner.message.is_empty() {
            let _ = write!(line, " {}", inner.message);
        }
        if line != "Inner error:" {
            sections.push(line);
        }
    }

    let mut tracking: Vec<String> = Vec::new();
    if !fault.request_id.is_empty() {
        tracking.push(format!("request id {}", fault.request_id));
    }
    if !fault.client_request_id.is_empty() {
        tracking.push(format!("client request id {}", fault.client_request_id));
    }
    if !fault.correlation_id.is_empty() {
        tracking.push(format!("correlation id {}", fault.correlation_id));
    }
    if !fault.error_date.is_empty() {
        tracking.push(format!("date {}", fault.error_date));
    }
    if !tracking.is_empty() {
        sections.push(format!("Tracking: {}", tracking.join(", ")));
    }

    sections.push(format!("Category: {}", fault.category));

    sections.join("\n")
}

//! Fault classification and retry taxonomy for management graph API clients.
//!
//! Resource operations hand every failure they see to [`classify`], which
//! normalizes transport errors, protocol-envelope errors, and plain API
//! errors into one [`CanonicalFault`] record. The record then feeds four
//! independent consumers: the categorizer, the retry predicate families,
//! the backoff calculator, and the diagnostic renderer. The engine performs
//! no I/O and never waits; retry loops live in the caller.
//!
//! ```
//! use mgraph_faults::{ApiFailure, TransportFailure, classify, compute_delay, retry};
//!
//! let failure = ApiFailure::Transport(TransportFailure {
//!     operation: "GET".into(),
//!     url: "https://graph.example.com/v1/managedDevices/42".into(),
//!     cause: "dial tcp: connection refused".into(),
//! });
//! let fault = classify("device_read", &failure);
//! assert_eq!(fault.error_code, "ConnectionRefused");
//! if retry::is_retryable(Some(&fault)) {
//!     let _wait = compute_delay(&fault, 1);
//! }
//! ```

pub mod backoff;
pub mod category;
pub mod classify;
pub mod codes;
pub mod diagnostics;
pub mod envelope;
pub mod fault;
pub mod headers;
pub mod retry;

pub use backoff::{BackoffPolicy, compute_delay};
pub use category::categorize;
pub use classify::{
    ApiFailure, GenericFailure, ProtocolFailure, TransportFailure, classify, classify_response,
};
pub use codes::describe;
pub use diagnostics::render_diagnostic;
pub use envelope::{
    EnvelopeDetail, EnvelopeError, EnvelopeInnerError, ErrorEnvelope, decode_envelope,
};
pub use fault::{CanonicalFault, ErrorDetailRecord, FaultCategory, InnerErrorRecord};
pub use headers::{HeaderBag, HeaderSet, extract_headers};

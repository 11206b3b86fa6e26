//! Diagnostic header extraction.
//!
//! Management API responses carry a handful of tracking and throttling
//! headers worth surfacing on every fault. Extraction is best-effort: a
//! missing or malformed header is normal, never an error.

use serde::{Deserialize, Serialize};

use crate::fault::CanonicalFault;

/// Minimal capability surface for a bag of response headers.
///
/// Implemented by [`HeaderSet`]; callers holding another representation
/// (an HTTP client's header map, a recorded fixture) implement this instead
/// of converting.
pub trait HeaderBag {
    /// Every header key present, in the bag's own order.
    fn keys(&self) -> Vec<String>;

    /// All values for `key`, matched case-insensitively. Empty if absent.
    fn values(&self, key: &str) -> Vec<String>;
}

/// Insertion-ordered header multimap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSet {
    entries: Vec<(String, Vec<String>)>,
}

impl HeaderSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a value, merging into an existing key (case-insensitive).
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some((_, values)) = self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&key))
        {
            values.push(value);
        } else {
            self.entries.push((key, vec![value]));
        }
    }

    /// Build from `(key, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut set = Self::new();
        for (key, value) in pairs {
            set.insert(key, value);
        }
        set
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl HeaderBag for HeaderSet {
    fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(key, _)| key.clone()).collect()
    }

    fn values(&self, key: &str) -> Vec<String> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(key))
            .map(|(_, values)| values.clone())
            .unwrap_or_default()
    }
}

/// The headers worth promoting to typed fault fields.
const TRACKED_HEADERS: [&str; 6] = [
    "request-id",
    "client-request-id",
    "ms-correlation-id",
    "retry-after",
    "x-throttled-reason",
    "date",
];

/// Populate the fault's header-derived fields from `headers`.
///
/// Each tracked field is assigned at most once, from the first value of the
/// first matching key; fields already set are left alone. Every key/value
/// pair, tracked or not, lands in `raw_header_dump`.
pub fn extract_headers(fault: &mut CanonicalFault, headers: &dyn HeaderBag) {
    for key in headers.keys() {
        let values = headers.values(&key);
        fault
            .raw_header_dump
            .push_str(&format!("{key}: {values:?}\n"));

        let Some(first) = values.first().filter(|value| !value.is_empty()) else {
            continue;
        };

        let lower = key.to_ascii_lowercase();
        let Some(position) = TRACKED_HEADERS.iter().position(|h| *h == lower) else {
            continue;
        };

        let field = match position {
            0 => &mut fault.request_id,
            1 => &mut fault.client_request_id,
            2 => &mut fault.correlation_id,
            3 => &mut fault.retry_after,
            4 => &mut fault.throttled_reason,
            _ => &mut fault.error_date,
        };
        if field.is_empty() {
            first.clone_into(field);
        }
    }
}

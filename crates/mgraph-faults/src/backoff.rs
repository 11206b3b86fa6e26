//! Backoff computation for retry loops.
//!
//! The engine only computes durations; the caller's loop does the waiting
//! and honors cancellation. A server-supplied `Retry-After` hint always
//! beats the computed delay.

use std::time::Duration;

use rand::Rng;

use crate::fault::CanonicalFault;

/// Tunables for the computed delay. `Default` carries the normative
/// constants; the builders exist for callers with unusual ceilings.
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    /// Quadratic growth unit: delay grows as `attempt² × step`.
    pub step: Duration,
    /// Fraction of the base delay the jitter may add or remove.
    pub jitter_ratio: f64,
    /// Hard cap, applied after jitter.
    pub ceiling: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            step: Duration::from_secs(1),
            jitter_ratio: 0.25,
            ceiling: Duration::from_secs(300),
        }
    }
}

impl BackoffPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the quadratic growth unit.
    #[must_use]
    pub const fn with_step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    /// Builder: set the jitter ratio (clamped to [0, 1] at use).
    #[must_use]
    pub const fn with_jitter_ratio(mut self, ratio: f64) -> Self {
        self.jitter_ratio = ratio;
        self
    }

    /// Builder: set the hard ceiling.
    #[must_use]
    pub const fn with_ceiling(mut self, ceiling: Duration) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// Delay before retry number `attempt` (1-indexed, the caller's loop
    /// counter).
    ///
    /// A parseable `retry_after` on the fault (whole seconds) is returned
    /// verbatim. Otherwise the delay grows quadratically with bounded
    /// uniform jitter, floored at one step if jitter drove it negative and
    /// capped at the ceiling afterwards.
    #[must_use]
    pub fn delay_for(&self, fault: &CanonicalFault, attempt: u32) -> Duration {
        if let Some(hint) = parse_retry_after(&fault.retry_after) {
            return hint;
        }

        let base = f64::from(attempt) * f64::from(attempt) * self.step.as_secs_f64();
        let ratio = self.jitter_ratio.clamp(0.0, 1.0);
        let jitter = rand::rng().random_range(-1.0..=1.0) * ratio * base;

        let mut secs = base + jitter;
        if secs < 0.0 {
            secs = self.step.as_secs_f64();
        }
        Duration::from_secs_f64(secs.min(self.ceiling.as_secs_f64()))
    }
}

/// Delay before retry number `attempt`, under the default policy.
#[must_use]
pub fn compute_delay(fault: &CanonicalFault, attempt: u32) -> Duration {
    BackoffPolicy::default().delay_for(fault, attempt)
}

fn parse_retry_after(value: &str) -> Option<Duration> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<u64>().ok().map(Duration::from_secs)
}

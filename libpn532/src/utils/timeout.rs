//! Timeout defaults and bounds.

use std::time::Duration;

/// Default per-command deadline.
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Default interval between two InListPassiveTarget calls while waiting
/// for a tag.
pub const DEFAULT_POLLING_PERIOD_MS: u64 = 100;

/// Accepted polling period range.
pub const MIN_POLLING_PERIOD_MS: u64 = 10;
pub const MAX_POLLING_PERIOD_MS: u64 = 10_000;

/// Longest single blocking step (transport read, sleep) before the
/// cancellation token is checked again.
pub const CANCEL_TICK_MS: u64 = 10;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

pub fn default_timeout() -> Duration {
    ms(DEFAULT_TIMEOUT_MS)
}

pub fn default_polling_period() -> Duration {
    ms(DEFAULT_POLLING_PERIOD_MS)
}

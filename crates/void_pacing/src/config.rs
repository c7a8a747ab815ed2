//! Coalescer configuration
//!
//! Intervals are kept in fractional milliseconds so that update rates which
//! do not divide a second evenly (30 Hz, 144 Hz) survive without rounding.

use std::time::Duration;
use serde::{Serialize, Deserialize};

/// Default idle-mode sentinel. Intervals above this mean "render when the
/// loop is otherwise idle" rather than a literal deadline.
pub const DEFAULT_IDLE_THRESHOLD_MS: f64 = 10_000.0;

/// Default target update rate
pub const DEFAULT_UPDATE_RATE: f64 = 60.0;

/// Convert an update rate in Hz to a frame interval in milliseconds.
///
/// A rate of zero or below (or NaN) has no meaningful deadline and maps to
/// an infinite interval, which the coalescer treats as idle mode.
pub fn interval_ms_for_update_rate(rate_hz: f64) -> f64 {
    if rate_hz.is_nan() || rate_hz <= 0.0 {
        f64::INFINITY
    } else {
        1000.0 / rate_hz
    }
}

/// Convert fractional milliseconds to a `Duration`, saturating on overflow
pub fn duration_from_ms(ms: f64) -> Duration {
    if ms.is_nan() || ms <= 0.0 {
        Duration::ZERO
    } else {
        Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX)
    }
}

/// Render coalescer configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoalescerConfig {
    /// Whether redraw requests are honoured at all
    pub render_enabled: bool,
    /// Target interval between renders, in milliseconds
    pub target_interval_ms: f64,
    /// Intervals above this arm the deferred render with no delay
    pub idle_threshold_ms: f64,
}

impl CoalescerConfig {
    /// Create a configuration targeting the given update rate
    pub fn with_update_rate(rate_hz: f64) -> Self {
        Self {
            target_interval_ms: interval_ms_for_update_rate(rate_hz),
            ..Self::default()
        }
    }

    /// Replace non-finite or negative values with usable ones
    pub fn sanitized(mut self) -> Self {
        self.target_interval_ms = sanitize_interval(self.target_interval_ms);
        if !is_valid_idle_threshold(self.idle_threshold_ms) {
            log::warn!(
                "Invalid idle threshold {} ms, using {} ms",
                self.idle_threshold_ms,
                DEFAULT_IDLE_THRESHOLD_MS
            );
            self.idle_threshold_ms = DEFAULT_IDLE_THRESHOLD_MS;
        }
        self
    }
}

impl Default for CoalescerConfig {
    fn default() -> Self {
        Self {
            render_enabled: true,
            target_interval_ms: interval_ms_for_update_rate(DEFAULT_UPDATE_RATE),
            idle_threshold_ms: DEFAULT_IDLE_THRESHOLD_MS,
        }
    }
}

/// Negative and NaN intervals are clamped to zero; infinity is kept (idle mode)
/// Idle thresholds must be finite; an infinite one would arm a timer that never fires
pub(crate) fn is_valid_idle_threshold(threshold_ms: f64) -> bool {
    threshold_ms.is_finite() && threshold_ms >= 0.0
}

pub(crate) fn sanitize_interval(interval_ms: f64) -> f64 {
    if interval_ms.is_nan() || interval_ms < 0.0 {
        log::warn!("Invalid target interval {} ms, clamping to 0", interval_ms);
        0.0
    } else {
        interval_ms
    }
}

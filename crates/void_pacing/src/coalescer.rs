//! Render request coalescing
//!
//! Redraw requests can arrive far faster than a view should render (an
//! interactor emits one per mouse move). The coalescer merges every request
//! that lands inside one target interval into a single draw:
//!
//! ```text
//!            request (not sync)                 timer fired / deadline passed
//!   Idle ──────────────────────────► Armed ────────────────────────────────► Idle
//!    │  ▲                              │                                     (draw)
//!    │  └── request (sync): draw now ──┘ request inside interval: coalesced
//!    └──┘
//! ```
//!
//! At most one deferred callback is armed at a time. If the event loop is
//! slow to deliver it, the next request past the deadline renders inline and
//! the late delivery is recognised and dropped.

use std::time::{Duration, Instant};

use crate::config::{
    duration_from_ms, interval_ms_for_update_rate, is_valid_idle_threshold, sanitize_interval,
    CoalescerConfig,
};
use crate::sink::RenderSink;
use crate::stats::CoalescerStats;
use crate::timer::TimerService;

/// What a coalescer entry point did with a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Rendering is disabled; the request was dropped
    Suppressed,
    /// A deferred render was armed
    Deferred {
        /// Delay the timer was armed with
        delay: Duration,
    },
    /// A deferred render is already armed and will cover this request
    Coalesced,
    /// The sink drew
    Rendered,
    /// A render was due but rendering is disabled or the sink is hidden
    Skipped,
    /// The timer fired after the render already happened
    StaleTimer,
    /// The sink reported a draw failure
    DrawFailed,
}

impl RenderOutcome {
    /// Whether the sink drew
    pub fn drew(&self) -> bool {
        matches!(self, Self::Rendered)
    }
}

/// Coalescer phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoalescerPhase {
    /// No deferred render armed
    Idle,
    /// A deferred render is armed
    Armed,
}

/// Mutable coalescing state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoalescerState {
    /// Gate; when false every request is suppressed
    pub render_enabled: bool,
    /// When the armed deferred render was requested; `Some` iff armed
    pub pending_request_start: Option<Instant>,
    /// Target interval between renders, in milliseconds
    pub target_interval_ms: f64,
}

impl CoalescerState {
    fn from_config(config: &CoalescerConfig) -> Self {
        Self {
            render_enabled: config.render_enabled,
            pending_request_start: None,
            target_interval_ms: config.target_interval_ms,
        }
    }
}

/// Debounced redraw scheduler for a single render sink
pub struct RenderCoalescer<T: TimerService, S: RenderSink> {
    state: CoalescerState,
    idle_threshold_ms: f64,
    timer: T,
    sink: S,
    stats: CoalescerStats,
}

impl<T: TimerService, S: RenderSink> RenderCoalescer<T, S> {
    /// Create a coalescer with the default configuration
    pub fn new(timer: T, sink: S) -> Self {
        Self::with_config(CoalescerConfig::default(), timer, sink)
    }

    /// Create with specific configuration
    pub fn with_config(config: CoalescerConfig, timer: T, sink: S) -> Self {
        let config = config.sanitized();
        Self {
            state: CoalescerState::from_config(&config),
            idle_threshold_ms: config.idle_threshold_ms,
            timer,
            sink,
            stats: CoalescerStats::default(),
        }
    }

    /// Ask for a redraw.
    ///
    /// `synchronous` marks a context that needs the result on screen now
    /// (a forced system repaint); such requests bypass coalescing.
    pub fn request_render(&mut self, now: Instant, synchronous: bool) -> RenderOutcome {
        self.stats.requests += 1;

        if !self.state.render_enabled {
            self.stats.suppressed += 1;
            return RenderOutcome::Suppressed;
        }

        if synchronous {
            self.stats.sync_renders += 1;
            return self.render(now, false);
        }

        let Some(start) = self.state.pending_request_start else {
            return self.arm(now);
        };

        let elapsed_ms = now.saturating_duration_since(start).as_secs_f64() * 1000.0;
        if elapsed_ms > self.state.target_interval_ms {
            // The timer has most likely expired but its event is still queued
            log::trace!(
                "Deferred render overdue by {:.1} ms, rendering now",
                elapsed_ms - self.state.target_interval_ms
            );
            self.stats.escape_renders += 1;
            self.render(now, false)
        } else {
            self.stats.coalesced += 1;
            RenderOutcome::Coalesced
        }
    }

    /// Render immediately, cancelling any armed deferred render
    pub fn force_render(&mut self, now: Instant) -> RenderOutcome {
        self.render(now, false)
    }

    /// Deliver the armed deferred render. Called by the timer's owner.
    pub fn on_timer_fired(&mut self, now: Instant) -> RenderOutcome {
        self.render(now, true)
    }

    fn arm(&mut self, now: Instant) -> RenderOutcome {
        let mut delay_ms = self.state.target_interval_ms;
        if delay_ms > self.idle_threshold_ms {
            // Idle mode: the interval is a budget, not a deadline
            delay_ms = 0.0;
        }
        let delay = duration_from_ms(delay_ms);

        self.state.pending_request_start = Some(now);
        match self.timer.arm_single_shot(delay) {
            Ok(()) => {
                self.stats.deferred += 1;
                RenderOutcome::Deferred { delay }
            }
            Err(e) => {
                log::warn!("{}; rendering immediately", e);
                self.stats.arm_failures += 1;
                self.render(now, false)
            }
        }
    }

    fn render(&mut self, now: Instant, called_from_timer: bool) -> RenderOutcome {
        if called_from_timer && self.state.pending_request_start.is_none() {
            log::trace!("Deferred render already performed, ignoring timer");
            self.stats.record_render(RenderOutcome::StaleTimer);
            return RenderOutcome::StaleTimer;
        }

        if called_from_timer {
            self.stats.timer_renders += 1;
        }

        self.timer.disarm();
        if let Some(start) = self.state.pending_request_start.take() {
            log::trace!(
                "Rendering {:.1} ms after request",
                now.saturating_duration_since(start).as_secs_f64() * 1000.0
            );
        }

        let outcome = if !self.state.render_enabled || !self.sink.is_visible() {
            RenderOutcome::Skipped
        } else {
            match self.sink.draw() {
                Ok(()) => RenderOutcome::Rendered,
                Err(e) => {
                    log::warn!("Render failed: {}", e);
                    RenderOutcome::DrawFailed
                }
            }
        };

        self.stats.record_render(outcome);
        outcome
    }

    /// Enable or disable rendering.
    ///
    /// Takes effect on the next request or timer delivery; an armed timer
    /// stays armed and will find nothing to draw.
    pub fn set_render_enabled(&mut self, enabled: bool) {
        self.state.render_enabled = enabled;
    }

    /// Whether rendering is enabled
    pub fn render_enabled(&self) -> bool {
        self.state.render_enabled
    }

    /// Set the target interval between renders
    pub fn set_target_interval_ms(&mut self, interval_ms: f64) {
        self.state.target_interval_ms = sanitize_interval(interval_ms);
    }

    /// Target interval between renders, in milliseconds
    pub fn target_interval_ms(&self) -> f64 {
        self.state.target_interval_ms
    }

    /// Set the target interval from an update rate in Hz
    pub fn set_update_rate(&mut self, rate_hz: f64) {
        self.set_target_interval_ms(interval_ms_for_update_rate(rate_hz));
    }

    /// Set the idle-mode sentinel
    pub fn set_idle_threshold_ms(&mut self, threshold_ms: f64) {
        if !is_valid_idle_threshold(threshold_ms) {
            log::warn!("Ignoring invalid idle threshold {} ms", threshold_ms);
            return;
        }
        self.idle_threshold_ms = threshold_ms;
    }

    /// Idle-mode sentinel, in milliseconds
    pub fn idle_threshold_ms(&self) -> f64 {
        self.idle_threshold_ms
    }

    /// Current phase
    pub fn phase(&self) -> CoalescerPhase {
        if self.state.pending_request_start.is_some() {
            CoalescerPhase::Armed
        } else {
            CoalescerPhase::Idle
        }
    }

    /// Current state
    pub fn state(&self) -> &CoalescerState {
        &self.state
    }

    /// Get statistics
    pub fn stats(&self) -> &CoalescerStats {
        &self.stats
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Get the timer service
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Get mutable timer service
    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Get the render sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get mutable render sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

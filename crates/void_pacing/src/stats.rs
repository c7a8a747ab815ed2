//! Coalescer statistics

use serde::{Serialize, Deserialize};

use crate::coalescer::RenderOutcome;

/// Counters describing what the coalescer did with its requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoalescerStats {
    /// Total `request_render` calls
    pub requests: u64,
    /// Requests dropped because rendering was disabled
    pub suppressed: u64,
    /// Requests that armed a deferred render
    pub deferred: u64,
    /// Requests absorbed by an already armed render
    pub coalesced: u64,
    /// Requests forced through by a synchronous context
    pub sync_renders: u64,
    /// Requests that rendered inline because the armed deadline had passed
    pub escape_renders: u64,
    /// Timer deliveries that rendered (or found nothing to draw)
    pub timer_renders: u64,
    /// Timer deliveries that found the render already done
    pub stale_timer_fires: u64,
    /// Renders skipped because the sink was hidden or rendering disabled
    pub skipped: u64,
    /// Completed draws
    pub draws: u64,
    /// Draws the sink reported as failed
    pub draw_failures: u64,
    /// Deferred renders that could not be armed and were drawn inline
    pub arm_failures: u64,
}

impl CoalescerStats {
    /// Account for the result of a render attempt
    pub(crate) fn record_render(&mut self, outcome: RenderOutcome) {
        match outcome {
            RenderOutcome::Rendered => self.draws += 1,
            RenderOutcome::DrawFailed => self.draw_failures += 1,
            RenderOutcome::Skipped => self.skipped += 1,
            RenderOutcome::StaleTimer => self.stale_timer_fires += 1,
            _ => {}
        }
    }

    /// Fraction of requests that ended up drawing (0.0 - 1.0)
    pub fn draw_ratio(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.draws as f64 / self.requests as f64
        }
    }

    /// Reset statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

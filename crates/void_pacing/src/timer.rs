//! Single-shot timer capability
//!
//! The coalescer never owns an event loop. It asks a `TimerService` to arm
//! one deferred callback and the owner of the loop delivers that callback by
//! calling `RenderCoalescer::on_timer_fired` on the same thread.

use std::time::Duration;

use crate::error::TimerResult;

/// Single-shot deferred callback scheduling on the owning thread
pub trait TimerService {
    /// Arm the deferred callback to fire once after `delay`.
    ///
    /// Arming while already armed replaces the previous deadline.
    fn arm_single_shot(&mut self, delay: Duration) -> TimerResult<()>;

    /// Disarm the callback. Idempotent.
    fn disarm(&mut self);

    /// Whether a callback is currently armed
    fn is_armed(&self) -> bool;
}

/// Timer whose delivery is driven by hand
///
/// Records what was armed and leaves it to the caller to decide when the
/// callback is delivered. Used by tests and by simulations that run on a
/// virtual clock.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    armed: Option<Duration>,
    arm_count: u64,
    disarm_count: u64,
}

impl ManualTimer {
    /// Create an unarmed timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay of the currently armed callback
    pub fn armed_delay(&self) -> Option<Duration> {
        self.armed
    }

    /// Number of times the timer was armed
    pub fn arm_count(&self) -> u64 {
        self.arm_count
    }

    /// Number of disarms that cancelled an armed callback
    pub fn disarm_count(&self) -> u64 {
        self.disarm_count
    }

    /// Consume the armed callback as the loop would on delivery.
    ///
    /// Returns `true` if a callback was armed; the caller then invokes
    /// `on_timer_fired` on the coalescer.
    pub fn fire(&mut self) -> bool {
        self.armed.take().is_some()
    }
}

impl TimerService for ManualTimer {
    fn arm_single_shot(&mut self, delay: Duration) -> TimerResult<()> {
        self.armed = Some(delay);
        self.arm_count += 1;
        Ok(())
    }

    fn disarm(&mut self) {
        if self.armed.take().is_some() {
            self.disarm_count += 1;
        }
    }

    fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_timer_arm_and_fire() {
        let mut timer = ManualTimer::new();
        assert!(!timer.is_armed());

        timer.arm_single_shot(Duration::from_millis(33)).unwrap();
        assert!(timer.is_armed());
        assert_eq!(timer.armed_delay(), Some(Duration::from_millis(33)));

        assert!(timer.fire());
        assert!(!timer.is_armed());
        assert!(!timer.fire());
    }

    #[test]
    fn test_manual_timer_disarm_is_idempotent() {
        let mut timer = ManualTimer::new();
        timer.disarm();
        assert_eq!(timer.disarm_count(), 0);

        timer.arm_single_shot(Duration::ZERO).unwrap();
        timer.disarm();
        timer.disarm();
        assert_eq!(timer.disarm_count(), 1);
        assert_eq!(timer.arm_count(), 1);
    }
}

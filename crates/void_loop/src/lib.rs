//! # void_loop - calloop timer service
//!
//! Delivers a view's deferred render on the thread that runs the calloop
//! event loop. The coalescer arms a one-shot `Timer` source through the loop
//! handle; when it expires the loop hands its shared data to a delivery
//! function, which forwards to `on_timer_fired`.
//!
//! ```text
//! RenderCoalescer ──arm──► CalloopTimer ──insert_source──► EventLoop<D>
//!        ▲                                                     │
//!        └───────────── deliver(&mut D, now) ◄─── Timer expired┘
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use calloop::timer::{TimeoutAction, Timer};
use calloop::{LoopHandle, RegistrationToken};
use void_pacing::{TimerError, TimerResult, TimerService};

/// Delivery function invoked with the loop's shared data when the timer expires
pub type DeliverFn<D> = dyn Fn(&mut D, Instant);

/// `TimerService` backed by a calloop event loop
pub struct CalloopTimer<D: 'static> {
    handle: LoopHandle<'static, D>,
    deliver: Rc<DeliverFn<D>>,
    /// Registration of the armed timer; cleared by the timer callback itself
    token: Rc<Cell<Option<RegistrationToken>>>,
    armed_delay: Option<Duration>,
}

impl<D: 'static> CalloopTimer<D> {
    /// Create a timer that delivers through `deliver` on `handle`'s loop
    pub fn new(handle: LoopHandle<'static, D>, deliver: impl Fn(&mut D, Instant) + 'static) -> Self {
        Self {
            handle,
            deliver: Rc::new(deliver),
            token: Rc::new(Cell::new(None)),
            armed_delay: None,
        }
    }

    /// Delay the current timer was armed with
    pub fn armed_delay(&self) -> Option<Duration> {
        if self.is_armed() {
            self.armed_delay
        } else {
            None
        }
    }

    /// The loop handle this timer registers on
    pub fn handle(&self) -> &LoopHandle<'static, D> {
        &self.handle
    }
}

impl<D: 'static> TimerService for CalloopTimer<D> {
    fn arm_single_shot(&mut self, delay: Duration) -> TimerResult<()> {
        self.disarm();

        let deliver = Rc::clone(&self.deliver);
        let slot = Rc::clone(&self.token);
        let token = self
            .handle
            .insert_source(Timer::from_duration(delay), move |deadline, _, data| {
                slot.set(None);
                let now = Instant::now();
                log::trace!(
                    "Deferred render delivered {:.1} ms late",
                    now.saturating_duration_since(deadline).as_secs_f64() * 1000.0
                );
                (*deliver)(data, now);
                TimeoutAction::Drop
            })
            .map_err(|e| TimerError::Arm(e.error.to_string()))?;

        self.token.set(Some(token));
        self.armed_delay = Some(delay);
        Ok(())
    }

    fn disarm(&mut self) {
        if let Some(token) = self.token.take() {
            self.handle.remove(token);
        }
        self.armed_delay = None;
    }

    fn is_armed(&self) -> bool {
        let token = self.token.take();
        let armed = token.is_some();
        self.token.set(token);
        armed
    }
}

impl<D: 'static> Drop for CalloopTimer<D> {
    fn drop(&mut self) {
        self.disarm();
    }
}

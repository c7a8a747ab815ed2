//! Integration tests for void_pacing
//!
//! Drives the coalescer through timed request sequences on a virtual clock.

use std::time::{Duration, Instant};

use void_pacing::*;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn coalescer_30fps() -> RenderCoalescer<ManualTimer, CountingSink> {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = CoalescerConfig {
        target_interval_ms: 33.0,
        ..CoalescerConfig::default()
    };
    RenderCoalescer::with_config(config, ManualTimer::new(), CountingSink::new())
}

#[test]
fn test_timer_delivers_single_render() {
    let mut c = coalescer_30fps();
    let t0 = Instant::now();

    let outcome = c.request_render(t0, false);
    assert_eq!(outcome, RenderOutcome::Deferred { delay: ms(33) });
    assert_eq!(c.state().pending_request_start, Some(t0));
    assert_eq!(c.timer().armed_delay(), Some(ms(33)));

    // Inside the interval: the armed render covers it
    assert_eq!(c.request_render(t0 + ms(10), false), RenderOutcome::Coalesced);
    assert_eq!(c.state().pending_request_start, Some(t0));

    assert!(c.timer_mut().fire());
    assert_eq!(c.on_timer_fired(t0 + ms(33)), RenderOutcome::Rendered);

    assert_eq!(c.sink().draws(), 1);
    assert_eq!(c.phase(), CoalescerPhase::Idle);
    assert_eq!(c.state().pending_request_start, None);
}

#[test]
fn test_late_timer_after_escape_render() {
    let mut c = coalescer_30fps();
    let t0 = Instant::now();

    c.request_render(t0, false);

    // Timer delivery is held up until t=50; a request at t=40 is overdue
    assert_eq!(c.request_render(t0 + ms(40), false), RenderOutcome::Rendered);
    assert_eq!(c.phase(), CoalescerPhase::Idle);
    assert!(!c.timer().is_armed());

    assert_eq!(c.on_timer_fired(t0 + ms(50)), RenderOutcome::StaleTimer);

    assert_eq!(c.sink().draws(), 1);
    assert_eq!(c.stats().escape_renders, 1);
    assert_eq!(c.stats().stale_timer_fires, 1);
}

#[test]
fn test_sync_request_while_armed_draws_once() {
    let mut c = coalescer_30fps();
    let t0 = Instant::now();

    c.request_render(t0, false);
    assert_eq!(c.request_render(t0 + ms(1), true), RenderOutcome::Rendered);
    assert_eq!(c.on_timer_fired(t0 + ms(33)), RenderOutcome::StaleTimer);

    assert_eq!(c.sink().draws(), 1);
}

#[test]
fn test_continuous_stream_is_paced() {
    let mut c = coalescer_30fps();
    let t0 = Instant::now();
    let mut next_fire: Option<Instant> = None;

    // 250 Hz interactor for one second, timer delivered on schedule
    for tick in 0..250u64 {
        let now = t0 + ms(tick * 4);

        if let Some(deadline) = next_fire {
            if now >= deadline && c.timer_mut().fire() {
                c.on_timer_fired(deadline);
                next_fire = None;
            }
        }

        if let RenderOutcome::Deferred { delay } = c.request_render(now, false) {
            next_fire = Some(now + delay);
        }
    }

    let draws = c.sink().draws();
    assert!(draws >= 25 && draws <= 31, "unexpected draw count {}", draws);
    assert_eq!(c.stats().requests, 250);
    assert!(c.stats().coalesced > 200);
}

#[test]
fn test_reenable_resumes_rendering() {
    let mut c = coalescer_30fps();
    let t0 = Instant::now();

    c.set_render_enabled(false);
    assert_eq!(c.request_render(t0, false), RenderOutcome::Suppressed);

    c.set_render_enabled(true);
    assert_eq!(
        c.request_render(t0 + ms(1), false),
        RenderOutcome::Deferred { delay: ms(33) }
    );
    assert!(c.timer_mut().fire());
    assert_eq!(c.on_timer_fired(t0 + ms(34)), RenderOutcome::Rendered);
}

#[test]
fn test_stats_serialize() {
    let mut c = coalescer_30fps();
    let t0 = Instant::now();
    c.request_render(t0, true);

    let json = serde_json::to_value(c.stats()).unwrap();
    assert_eq!(json["requests"], 1);
    assert_eq!(json["sync_renders"], 1);
    assert_eq!(json["draws"], 1);
}

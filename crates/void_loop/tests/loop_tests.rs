//! Integration tests for void_loop
//!
//! Runs a render coalescer on a real calloop event loop.

use std::time::{Duration, Instant};

use calloop::EventLoop;
use void_loop::CalloopTimer;
use void_pacing::{
    CoalescerConfig, CoalescerPhase, CountingSink, RenderCoalescer, RenderOutcome, TimerService,
};

struct ViewState {
    coalescer: RenderCoalescer<CalloopTimer<ViewState>, CountingSink>,
}

fn setup(interval_ms: f64) -> (EventLoop<'static, ViewState>, ViewState) {
    setup_with(CoalescerConfig {
        target_interval_ms: interval_ms,
        ..CoalescerConfig::default()
    })
}

fn setup_with(config: CoalescerConfig) -> (EventLoop<'static, ViewState>, ViewState) {
    let event_loop: EventLoop<'static, ViewState> = EventLoop::try_new().unwrap();
    let timer = CalloopTimer::new(event_loop.handle(), |state: &mut ViewState, now| {
        state.coalescer.on_timer_fired(now);
    });
    let state = ViewState {
        coalescer: RenderCoalescer::with_config(config, timer, CountingSink::new()),
    };
    (event_loop, state)
}

fn run_until_idle(event_loop: &mut EventLoop<'static, ViewState>, state: &mut ViewState) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while state.coalescer.phase() == CoalescerPhase::Armed && Instant::now() < deadline {
        event_loop
            .dispatch(Some(Duration::from_millis(20)), state)
            .unwrap();
    }
}

#[test]
fn test_requests_coalesce_on_event_loop() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (mut event_loop, mut state) = setup(10.0);
    let now = Instant::now();

    assert!(matches!(
        state.coalescer.request_render(now, false),
        RenderOutcome::Deferred { .. }
    ));
    assert_eq!(state.coalescer.request_render(now, false), RenderOutcome::Coalesced);
    assert!(state.coalescer.timer().is_armed());

    run_until_idle(&mut event_loop, &mut state);

    assert_eq!(state.coalescer.sink().draws(), 1);
    assert_eq!(state.coalescer.stats().timer_renders, 1);
    assert!(!state.coalescer.timer().is_armed());
}

#[test]
fn test_sync_render_disarms_loop_timer() {
    let (mut event_loop, mut state) = setup(10.0);
    let now = Instant::now();

    state.coalescer.request_render(now, false);
    assert_eq!(state.coalescer.request_render(now, true), RenderOutcome::Rendered);
    assert!(!state.coalescer.timer().is_armed());

    event_loop
        .dispatch(Some(Duration::from_millis(40)), &mut state)
        .unwrap();

    assert_eq!(state.coalescer.sink().draws(), 1);
    assert_eq!(state.coalescer.stats().stale_timer_fires, 0);
}

#[test]
fn test_idle_mode_renders_on_next_dispatch() {
    let (mut event_loop, mut state) = setup(f64::INFINITY);
    let now = Instant::now();

    assert_eq!(
        state.coalescer.request_render(now, false),
        RenderOutcome::Deferred { delay: Duration::ZERO }
    );

    run_until_idle(&mut event_loop, &mut state);
    assert_eq!(state.coalescer.sink().draws(), 1);
}

#[test]
fn test_unbounded_idle_threshold_still_delivers() {
    let (mut event_loop, mut state) = setup_with(CoalescerConfig {
        render_enabled: true,
        target_interval_ms: f64::INFINITY,
        idle_threshold_ms: f64::INFINITY,
    });
    let now = Instant::now();

    assert_eq!(
        state.coalescer.request_render(now, false),
        RenderOutcome::Deferred { delay: Duration::ZERO }
    );

    run_until_idle(&mut event_loop, &mut state);
    assert_eq!(state.coalescer.phase(), CoalescerPhase::Idle);
    assert_eq!(state.coalescer.sink().draws(), 1);
}

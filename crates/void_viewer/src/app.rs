//! Headless viewer run
//!
//! Drives one paced view on a calloop event loop. A simulated interactor
//! emits render events at mouse rate for the burst, then the view idles
//! until the run ends.

use std::time::{Duration, Instant};

use calloop::timer::{TimeoutAction, Timer};
use calloop::EventLoop;
use serde::Serialize;
use thiserror::Error;
use void_loop::CalloopTimer;
use void_pacing::CoalescerStats;
use void_view::{AbstractView, BasicInteractor, HeadlessWindow, RequestOrigin};

use crate::config::{ConfigError, ViewerConfig};

/// Viewer errors
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Event loop error: {0}")]
    EventLoop(#[from] calloop::Error),

    #[error("Report serialization failed: {0}")]
    Report(#[from] serde_json::Error),
}

/// View type driven by the viewer
pub type ViewerView = AbstractView<CalloopTimer<ViewerState>, HeadlessWindow>;

/// Data shared with every event source
pub struct ViewerState {
    pub view: ViewerView,
    burst_until: Instant,
    interactor_events: u64,
}

/// Summary of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct ViewerReport {
    pub elapsed_ms: f64,
    pub target_interval_ms: f64,
    pub interactor_events: u64,
    pub frames: u64,
    pub effective_fps: f64,
    pub stats: CoalescerStats,
}

impl ViewerReport {
    /// Pretty JSON rendering of the report
    pub fn to_json(&self) -> Result<String, ViewerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the view described by `config` on `event_loop`
fn build_view(config: &ViewerConfig, event_loop: &EventLoop<'static, ViewerState>) -> ViewerView {
    let timer = CalloopTimer::new(event_loop.handle(), |state: &mut ViewerState, now| {
        state.view.on_timer_fired(now);
    });
    let window = HeadlessWindow::new(config.simulation.layers)
        .with_draw_cost(Duration::from_millis(config.simulation.draw_cost_ms));

    let mut view = AbstractView::with_config(config.pacing.coalescer_config(), timer, window);
    view.set_corner_annotation_text(config.view.annotation.clone());
    view.set_background_color(config.view.background);
    view.set_background_color2(config.view.background2);
    view.set_gradient_background(config.view.gradient);
    view.set_interactor(Box::new(BasicInteractor::new("simulated")));
    view
}

/// Run the viewer until `duration_ms` has elapsed
pub fn run(config: &ViewerConfig) -> Result<ViewerReport, ViewerError> {
    config.validate()?;

    let mut event_loop: EventLoop<'static, ViewerState> = EventLoop::try_new()?;
    let handle = event_loop.handle();
    let sim = &config.simulation;

    let start = Instant::now();
    let mut state = ViewerState {
        view: build_view(config, &event_loop),
        burst_until: start + Duration::from_millis(sim.burst_ms),
        interactor_events: 0,
    };

    log::info!(
        "Viewer running for {} ms at {:.2} ms/frame",
        sim.duration_ms,
        state.view.target_interval_ms()
    );

    // First expose
    state.view.schedule_render(start, RequestOrigin::System);

    let interval = Duration::from_millis(sim.interactor_interval_ms);
    handle
        .insert_source(Timer::from_duration(interval), move |_, _, state: &mut ViewerState| {
            let now = Instant::now();
            if now >= state.burst_until {
                log::debug!("Interactor burst finished after {} events", state.interactor_events);
                return TimeoutAction::Drop;
            }
            state.interactor_events += 1;
            state.view.on_interactor_render_event(now);
            TimeoutAction::ToDuration(interval)
        })
        .map_err(|e| e.error)?;

    let signal = event_loop.get_signal();
    handle
        .insert_source(
            Timer::from_duration(Duration::from_millis(sim.duration_ms)),
            move |_, _, _| {
                signal.stop();
                TimeoutAction::Drop
            },
        )
        .map_err(|e| e.error)?;

    event_loop.run(Some(Duration::from_millis(100)), &mut state, |_| {})?;

    let elapsed = start.elapsed().as_secs_f64();
    let frames = state.view.render_window().frame_count();
    let report = ViewerReport {
        elapsed_ms: elapsed * 1000.0,
        target_interval_ms: state.view.target_interval_ms(),
        interactor_events: state.interactor_events,
        frames,
        effective_fps: if elapsed > 0.0 { frames as f64 / elapsed } else { 0.0 },
        stats: state.view.stats().clone(),
    };

    log::info!(
        "Viewer finished: {} frames for {} interactor events ({:.1} fps)",
        report.frames,
        report.interactor_events,
        report.effective_fps
    );
    Ok(report)
}

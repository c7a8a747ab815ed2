//! Abstract paced view
//!
//! Owns the render window through a `RenderCoalescer`. Nothing else may
//! render the window: system repaints render at once, interactor and
//! application requests are coalesced to the desired update rate.

use std::time::Instant;

use serde::{Serialize, Deserialize};
use void_pacing::{
    CoalescerConfig, CoalescerPhase, CoalescerStats, RenderCoalescer, RenderOutcome,
    TimerService,
};

use crate::annotation::{Corner, CornerAnnotation};
use crate::color::Rgb;
use crate::error::{ViewError, ViewResult};
use crate::interactor::Interactor;
use crate::window::{Background, RenderWindow};

/// Minimum size a view can usefully be laid out at
pub const MINIMUM_SIZE_HINT: (u32, u32) = (50, 50);

/// Preferred view size
pub const SIZE_HINT: (u32, u32) = (300, 300);

/// Corner the view's own annotation text goes to
pub const ANNOTATION_CORNER: Corner = Corner::UpperLeft;

/// Where a redraw request comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestOrigin {
    /// Window exposed, resized or otherwise repainted by the system
    System,
    /// Render event from the bound interactor
    Interactor,
    /// Scene change made by the application
    Application,
}

impl RequestOrigin {
    /// Whether the request needs the result on screen before returning
    pub fn is_synchronous(&self) -> bool {
        matches!(self, Self::System)
    }
}

/// A view that paces its own rendering
pub struct AbstractView<T: TimerService, W: RenderWindow> {
    coalescer: RenderCoalescer<T, W>,
    interactor: Option<Box<dyn Interactor>>,
    annotation: CornerAnnotation,
}

impl<T: TimerService, W: RenderWindow> AbstractView<T, W> {
    /// Create a view with the default pacing configuration
    pub fn new(timer: T, window: W) -> Self {
        Self::with_config(CoalescerConfig::default(), timer, window)
    }

    /// Create with specific pacing configuration
    pub fn with_config(config: CoalescerConfig, timer: T, window: W) -> Self {
        Self {
            coalescer: RenderCoalescer::with_config(config, timer, window),
            interactor: None,
            annotation: CornerAnnotation::new(),
        }
    }

    // --- Rendering ---

    /// Request a redraw
    pub fn schedule_render(&mut self, now: Instant, origin: RequestOrigin) -> RenderOutcome {
        let outcome = self.coalescer.request_render(now, origin.is_synchronous());
        log::trace!("{:?} render request: {:?}", origin, outcome);
        outcome
    }

    /// Render now, cancelling any pending deferred render
    pub fn force_render(&mut self, now: Instant) -> RenderOutcome {
        self.coalescer.force_render(now)
    }

    /// Deliver the deferred render armed by `schedule_render`
    pub fn on_timer_fired(&mut self, now: Instant) -> RenderOutcome {
        self.coalescer.on_timer_fired(now)
    }

    /// Enable or disable rendering
    pub fn set_render_enabled(&mut self, enabled: bool) {
        self.coalescer.set_render_enabled(enabled);
    }

    /// Whether rendering is enabled
    pub fn render_enabled(&self) -> bool {
        self.coalescer.render_enabled()
    }

    /// Set the desired update rate in Hz; zero or below renders when idle
    pub fn set_desired_update_rate(&mut self, rate_hz: f64) {
        self.coalescer.set_update_rate(rate_hz);
    }

    /// Set the target interval between renders directly
    pub fn set_target_interval_ms(&mut self, interval_ms: f64) {
        self.coalescer.set_target_interval_ms(interval_ms);
    }

    /// Target interval between renders, in milliseconds
    pub fn target_interval_ms(&self) -> f64 {
        self.coalescer.target_interval_ms()
    }

    /// Pacing phase
    pub fn phase(&self) -> CoalescerPhase {
        self.coalescer.phase()
    }

    /// Pacing statistics
    pub fn stats(&self) -> &CoalescerStats {
        self.coalescer.stats()
    }

    /// The pacing timer
    pub fn timer(&self) -> &T {
        self.coalescer.timer()
    }

    /// Mutable pacing timer
    pub fn timer_mut(&mut self) -> &mut T {
        self.coalescer.timer_mut()
    }

    /// The render window
    pub fn render_window(&self) -> &W {
        self.coalescer.sink()
    }

    /// Mutable render window
    pub fn render_window_mut(&mut self) -> &mut W {
        self.coalescer.sink_mut()
    }

    // --- Interactor ---

    /// Bind an interactor, returning the previous one.
    ///
    /// The new interactor loses the right to render directly; the previous
    /// one gets it back.
    pub fn set_interactor(&mut self, mut interactor: Box<dyn Interactor>) -> Option<Box<dyn Interactor>> {
        interactor.set_enable_render(false);
        log::debug!("Binding interactor '{}'", interactor.name());

        let mut previous = self.interactor.replace(interactor);
        if let Some(previous) = previous.as_mut() {
            previous.set_enable_render(true);
        }
        previous
    }

    /// Unbind the interactor
    pub fn take_interactor(&mut self) -> Option<Box<dyn Interactor>> {
        let mut interactor = self.interactor.take()?;
        interactor.set_enable_render(true);
        Some(interactor)
    }

    /// The bound interactor
    pub fn interactor(&self) -> Option<&dyn Interactor> {
        self.interactor.as_deref()
    }

    /// Handle a render event from the bound interactor.
    ///
    /// Returns `None` when no interactor is bound.
    pub fn on_interactor_render_event(&mut self, now: Instant) -> Option<RenderOutcome> {
        if self.interactor.is_none() {
            log::debug!("Render event with no interactor bound, ignoring");
            return None;
        }
        Some(self.schedule_render(now, RequestOrigin::Interactor))
    }

    // --- Annotation ---

    /// Replace the annotation with `text` in the upper-left corner
    pub fn set_corner_annotation_text(&mut self, text: impl Into<String>) {
        self.annotation.clear_all_texts();
        self.annotation.set_text(ANNOTATION_CORNER, text);
    }

    /// Text in the upper-left corner
    pub fn corner_annotation_text(&self) -> &str {
        self.annotation.text(ANNOTATION_CORNER)
    }

    /// The full corner annotation
    pub fn corner_annotation(&self) -> &CornerAnnotation {
        &self.annotation
    }

    /// Mutable corner annotation
    pub fn corner_annotation_mut(&mut self) -> &mut CornerAnnotation {
        &mut self.annotation
    }

    // --- Backgrounds ---

    fn for_each_background(&mut self, mut apply: impl FnMut(&mut Background)) {
        let window = self.coalescer.sink_mut();
        for layer in 0..window.layer_count() {
            if let Some(background) = window.background_mut(layer) {
                apply(background);
            }
        }
    }

    fn first_background(&self) -> Option<&Background> {
        self.coalescer.sink().background(0)
    }

    /// Set the background colour of every layer
    pub fn set_background_color(&mut self, color: Rgb) {
        self.for_each_background(|b| b.color = color);
    }

    /// Background colour of the first layer
    pub fn background_color(&self) -> Option<Rgb> {
        self.first_background().map(|b| b.color)
    }

    /// Set the gradient top colour of every layer
    pub fn set_background_color2(&mut self, color: Rgb) {
        self.for_each_background(|b| b.color2 = color);
    }

    /// Gradient top colour of the first layer
    pub fn background_color2(&self) -> Option<Rgb> {
        self.first_background().map(|b| b.color2)
    }

    /// Enable or disable the gradient on every layer
    pub fn set_gradient_background(&mut self, enable: bool) {
        self.for_each_background(|b| b.gradient = enable);
    }

    /// Whether the first layer draws a gradient
    pub fn gradient_background(&self) -> bool {
        self.first_background().map(|b| b.gradient).unwrap_or(false)
    }

    /// Replace the background of one layer
    pub fn set_layer_background(&mut self, layer: usize, background: Background) -> ViewResult<()> {
        let slot = self
            .coalescer
            .sink_mut()
            .background_mut(layer)
            .ok_or(ViewError::MissingLayer(layer))?;
        *slot = background;
        Ok(())
    }

    // --- Layout hints ---

    /// Smallest useful size
    pub fn minimum_size_hint(&self) -> (u32, u32) {
        MINIMUM_SIZE_HINT
    }

    /// Preferred size
    pub fn size_hint(&self) -> (u32, u32) {
        SIZE_HINT
    }

    /// Views prefer a height that depends on their width
    pub fn has_height_for_width(&self) -> bool {
        true
    }

    /// Render windows tend to be square
    pub fn height_for_width(&self, width: u32) -> u32 {
        width
    }
}

//! Render sink capability

use crate::error::DrawResult;

/// The thing that actually draws
///
/// `draw` is synchronous and assumed expensive. The coalescer only calls it
/// while rendering is enabled and the sink reports itself visible.
pub trait RenderSink {
    /// Perform the draw
    fn draw(&mut self) -> DrawResult<()>;

    /// Whether the sink is currently shown
    fn is_visible(&self) -> bool;
}

impl<S: RenderSink + ?Sized> RenderSink for Box<S> {
    fn draw(&mut self) -> DrawResult<()> {
        (**self).draw()
    }

    fn is_visible(&self) -> bool {
        (**self).is_visible()
    }
}

/// Sink that only counts draws
#[derive(Debug, Clone)]
pub struct CountingSink {
    draws: u64,
    visible: bool,
}

impl CountingSink {
    /// Create a visible sink with no draws
    pub fn new() -> Self {
        Self {
            draws: 0,
            visible: true,
        }
    }

    /// Number of completed draws
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Show or hide the sink
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl Default for CountingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for CountingSink {
    fn draw(&mut self) -> DrawResult<()> {
        self.draws += 1;
        Ok(())
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

//! Render windows
//!
//! A render window is the view's render sink plus the renderer layers whose
//! backgrounds the view controls. Scene content is the renderer's business.

use std::time::Duration;

use serde::{Serialize, Deserialize};
use void_pacing::{DrawError, DrawResult, RenderSink};

use crate::color::Rgb;

/// Background of one renderer layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Background {
    /// Bottom colour (the only colour without gradient)
    pub color: Rgb,
    /// Top colour of the gradient
    pub color2: Rgb,
    /// Blend from `color` to `color2`
    pub gradient: bool,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            color: Rgb::BLACK,
            color2: Rgb::new(0.2, 0.2, 0.2),
            gradient: false,
        }
    }
}

/// Render sink with renderer layers
pub trait RenderWindow: RenderSink {
    /// Number of renderer layers
    fn layer_count(&self) -> usize;

    /// Background of a layer
    fn background(&self, layer: usize) -> Option<&Background>;

    /// Mutable background of a layer
    fn background_mut(&mut self, layer: usize) -> Option<&mut Background>;
}

/// Window that draws nowhere
///
/// Counts draws, can simulate draw cost and target loss. Used by tests and
/// by the headless viewer.
#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    layers: Vec<Background>,
    visible: bool,
    lost: bool,
    draw_cost: Duration,
    frame_count: u64,
}

impl HeadlessWindow {
    /// Create a visible window with `layers` renderer layers
    pub fn new(layers: usize) -> Self {
        Self {
            layers: vec![Background::default(); layers],
            visible: true,
            lost: false,
            draw_cost: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Block for `cost` on every draw
    pub fn with_draw_cost(mut self, cost: Duration) -> Self {
        self.draw_cost = cost;
        self
    }

    /// Show or hide the window
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Simulate losing (or recovering) the render target
    pub fn set_lost(&mut self, lost: bool) {
        self.lost = lost;
    }

    /// Completed draws
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl RenderSink for HeadlessWindow {
    fn draw(&mut self) -> DrawResult<()> {
        if self.lost {
            return Err(DrawError::TargetLost);
        }
        if !self.draw_cost.is_zero() {
            std::thread::sleep(self.draw_cost);
        }
        self.frame_count += 1;
        log::debug!("Headless frame {}", self.frame_count);
        Ok(())
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

impl RenderWindow for HeadlessWindow {
    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn background(&self, layer: usize) -> Option<&Background> {
        self.layers.get(layer)
    }

    fn background_mut(&mut self, layer: usize) -> Option<&mut Background> {
        self.layers.get_mut(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_draw() {
        let mut window = HeadlessWindow::new(1);
        window.draw().unwrap();
        window.draw().unwrap();
        assert_eq!(window.frame_count(), 2);

        window.set_lost(true);
        assert_eq!(window.draw(), Err(DrawError::TargetLost));
        assert_eq!(window.frame_count(), 2);
    }

    #[test]
    fn test_layers() {
        let mut window = HeadlessWindow::new(2);
        assert_eq!(window.layer_count(), 2);
        assert!(window.background(2).is_none());

        window.background_mut(1).unwrap().gradient = true;
        assert!(window.background(1).unwrap().gradient);
        assert!(!window.background(0).unwrap().gradient);
    }
}

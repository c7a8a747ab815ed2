//! # Void View
//!
//! Paced 3D view for Void Engine providing:
//! - Redraw routing (system repaints, interactor and application requests)
//! - Frame-rate pacing through `void_pacing`
//! - Interactor binding that keeps interactors from rendering on their own
//! - Corner annotation and layer background state
//!
//! ## Architecture
//!
//! ```text
//! System ─────────┐
//! Interactor ─────┼──► AbstractView ──► RenderCoalescer ──► RenderWindow
//! Application ────┘                          │
//!                                       TimerService
//! ```

pub mod annotation;
pub mod color;
pub mod error;
pub mod interactor;
pub mod view;
pub mod window;

pub use annotation::{Corner, CornerAnnotation};
pub use color::Rgb;
pub use error::{ViewError, ViewResult};
pub use interactor::{BasicInteractor, Interactor};
pub use view::{AbstractView, RequestOrigin, ANNOTATION_CORNER, MINIMUM_SIZE_HINT, SIZE_HINT};
pub use window::{Background, HeadlessWindow, RenderWindow};

pub use void_pacing::{CoalescerConfig, CoalescerPhase, CoalescerStats, RenderOutcome};

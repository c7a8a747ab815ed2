//! # Void Pacing
//!
//! Redraw pacing for Void Engine views:
//! - Render request coalescing against a target frame interval
//! - Idle-mode rendering for "still" update rates
//! - Race-safe handling of late timer delivery
//!
//! ## Architecture
//!
//! ```text
//! redraw requests ──► RenderCoalescer ──► RenderSink::draw
//!                          │    ▲
//!                  arm/disarm  on_timer_fired
//!                          ▼    │
//!                       TimerService
//!                   (owning event loop)
//! ```
//!
//! Everything runs on the thread that owns the view. The coalescer never
//! blocks except for the draw it performs inline.

pub mod coalescer;
pub mod config;
pub mod error;
pub mod sink;
pub mod stats;
pub mod timer;

pub use coalescer::{CoalescerPhase, CoalescerState, RenderCoalescer, RenderOutcome};
pub use config::{
    duration_from_ms, interval_ms_for_update_rate, CoalescerConfig, DEFAULT_IDLE_THRESHOLD_MS,
    DEFAULT_UPDATE_RATE,
};
pub use error::{DrawError, DrawResult, TimerError, TimerResult};
pub use sink::{CountingSink, RenderSink};
pub use stats::CoalescerStats;
pub use timer::{ManualTimer, TimerService};

//! # Void Viewer
//!
//! Headless viewer that runs a paced view on a calloop event loop and
//! reports how many interactor render events turned into frames.

pub mod app;
pub mod config;

pub use app::{run, ViewerError, ViewerReport, ViewerState, ViewerView};
pub use config::{
    ConfigError, PacingConfig, SimulationConfig, ViewSettings, ViewerConfig, CONFIG_ENV,
    DEFAULT_CONFIG_FILE, UPDATE_RATE_ENV,
};

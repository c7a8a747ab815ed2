//! # Void Widgets
//!
//! Toolkit-free value models behind Void Engine view controls. The models
//! own numeric state and its rules; drawing and layout belong to whichever
//! UI layer hosts them.

pub mod slider_spin_box;

pub use slider_spin_box::{
    round_to_decimals, Alignment, SliderSpinBox, ValueChangedFn, DEFAULT_DECIMALS,
    DEFAULT_MAXIMUM, MAX_DECIMALS,
};

//! Slider + spin box value model
//!
//! Holds the numeric state shared by a slider and its companion spin box:
//! range, precision, stepping and the text decorations. Every stored number
//! is rounded to the current number of decimals, and the value is always
//! kept inside `[minimum, maximum]`.

use serde::{Deserialize, Serialize};

/// Largest supported number of decimals
pub const MAX_DECIMALS: u32 = 15;

/// Default number of decimals
pub const DEFAULT_DECIMALS: u32 = 2;

/// Default upper bound of the range
pub const DEFAULT_MAXIMUM: f64 = 99.99;

/// Horizontal alignment of the spin box text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    /// Text hugs the left edge
    #[default]
    Left,
    /// Text is centred
    Center,
    /// Text hugs the right edge
    Right,
}

/// Round `value` to `decimals` places, leaving values that would overflow untouched
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

/// Callback invoked with the new value
pub type ValueChangedFn = dyn FnMut(f64);

/// Value model of a slider paired with a spin box
pub struct SliderSpinBox {
    value: f64,
    minimum: f64,
    maximum: f64,
    single_step: f64,
    tick_interval: f64,
    decimals: u32,
    prefix: String,
    suffix: String,
    alignment: Alignment,
    auto_spin_box_width: bool,
    value_changed: Option<Box<ValueChangedFn>>,
}

impl SliderSpinBox {
    pub fn new() -> Self {
        Self {
            value: 0.0,
            minimum: 0.0,
            maximum: DEFAULT_MAXIMUM,
            single_step: 1.0,
            tick_interval: 0.0,
            decimals: DEFAULT_DECIMALS,
            prefix: String::new(),
            suffix: String::new(),
            alignment: Alignment::Left,
            auto_spin_box_width: true,
            value_changed: None,
        }
    }

    /// Register the value-changed listener, replacing any previous one
    pub fn on_value_changed(&mut self, callback: impl FnMut(f64) + 'static) {
        self.value_changed = Some(Box::new(callback));
    }

    // --- Value ---

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Set the value, rounded to `decimals` and clamped to the range
    pub fn set_value(&mut self, value: f64) {
        if value.is_nan() {
            log::warn!("Ignoring NaN slider value");
            return;
        }
        self.store_value(value);
    }

    /// Move the value by `steps` single steps
    pub fn step_by(&mut self, steps: i32) {
        self.set_value(self.value + f64::from(steps) * self.single_step);
    }

    /// Return the value to the minimum
    pub fn reset(&mut self) {
        self.store_value(self.minimum);
    }

    /// Position of the value within the range, in `[0, 1]`
    pub fn slider_position(&self) -> f64 {
        let span = self.maximum - self.minimum;
        if span <= 0.0 {
            0.0
        } else {
            (self.value - self.minimum) / span
        }
    }

    /// Set the value from a slider position in `[0, 1]`
    pub fn set_slider_position(&mut self, position: f64) {
        if position.is_nan() {
            return;
        }
        let position = position.clamp(0.0, 1.0);
        self.set_value(self.minimum + position * (self.maximum - self.minimum));
    }

    // --- Range ---

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    /// Set the lower bound. Raises the maximum and the value when needed.
    pub fn set_minimum(&mut self, minimum: f64) {
        if minimum.is_nan() {
            return;
        }
        self.minimum = round_to_decimals(minimum, self.decimals);
        self.maximum = self.maximum.max(self.minimum);
        self.store_value(self.value);
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    /// Set the upper bound. Lowers the minimum and the value when needed.
    pub fn set_maximum(&mut self, maximum: f64) {
        if maximum.is_nan() {
            return;
        }
        self.maximum = round_to_decimals(maximum, self.decimals);
        self.minimum = self.minimum.min(self.maximum);
        self.store_value(self.value);
    }

    /// Set both bounds; a reversed range collapses onto `minimum`
    pub fn set_range(&mut self, minimum: f64, maximum: f64) {
        if minimum.is_nan() || maximum.is_nan() {
            return;
        }
        self.minimum = round_to_decimals(minimum, self.decimals);
        self.maximum = round_to_decimals(maximum, self.decimals).max(self.minimum);
        self.store_value(self.value);
    }

    // --- Precision and stepping ---

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Change the precision, re-rounding the range and the value
    pub fn set_decimals(&mut self, decimals: u32) {
        if decimals > MAX_DECIMALS {
            log::warn!("Clamping {} decimals to {}", decimals, MAX_DECIMALS);
        }
        self.decimals = decimals.min(MAX_DECIMALS);
        self.minimum = round_to_decimals(self.minimum, self.decimals);
        self.maximum = round_to_decimals(self.maximum, self.decimals).max(self.minimum);
        self.store_value(self.value);
    }

    pub fn single_step(&self) -> f64 {
        self.single_step
    }

    /// Negative steps are ignored
    pub fn set_single_step(&mut self, step: f64) {
        if step.is_nan() || step < 0.0 {
            log::warn!("Ignoring invalid single step {}", step);
            return;
        }
        self.single_step = step;
    }

    pub fn tick_interval(&self) -> f64 {
        self.tick_interval
    }

    /// Distance between slider ticks; 0 hides them
    pub fn set_tick_interval(&mut self, interval: f64) {
        if interval.is_nan() || interval < 0.0 {
            log::warn!("Ignoring invalid tick interval {}", interval);
            return;
        }
        self.tick_interval = interval;
    }

    // --- Spin box presentation ---

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn set_suffix(&mut self, suffix: impl Into<String>) {
        self.suffix = suffix.into();
    }

    pub fn spin_box_alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn set_spin_box_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    pub fn is_auto_spin_box_width(&self) -> bool {
        self.auto_spin_box_width
    }

    pub fn set_auto_spin_box_width(&mut self, auto: bool) {
        self.auto_spin_box_width = auto;
    }

    /// Spin box text: prefix, value at `decimals` places, suffix
    pub fn text(&self) -> String {
        format!(
            "{}{:.*}{}",
            self.prefix, self.decimals as usize, self.value, self.suffix
        )
    }

    fn store_value(&mut self, value: f64) {
        let value = round_to_decimals(value, self.decimals).clamp(self.minimum, self.maximum);
        if value == self.value {
            return;
        }
        self.value = value;
        log::trace!("Slider value changed to {}", value);
        if let Some(callback) = self.value_changed.as_mut() {
            callback(value);
        }
    }
}

impl Default for SliderSpinBox {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SliderSpinBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliderSpinBox")
            .field("value", &self.value)
            .field("minimum", &self.minimum)
            .field("maximum", &self.maximum)
            .field("single_step", &self.single_step)
            .field("tick_interval", &self.tick_interval)
            .field("decimals", &self.decimals)
            .field("prefix", &self.prefix)
            .field("suffix", &self.suffix)
            .field("alignment", &self.alignment)
            .field("auto_spin_box_width", &self.auto_spin_box_width)
            .finish_non_exhaustive()
    }
}

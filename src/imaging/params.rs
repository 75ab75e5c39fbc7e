//! Parameter types for enhancement.
//!
//! These structs describe *what* to do to an image, not *how*. They are the
//! interface between whatever produces factor values (a slider, a CLI flag, a
//! replayed event) and the [`pipeline`](super::pipeline), which does the
//! pixel work.
//!
//! ## Types
//!
//! - [`Adjustment`]: Names one of the four enhancement stages.
//! - [`AdjustmentState`]: The four factors read by the pipeline. 1.0 everywhere is identity.
//! - [`SliderRange`]: Bounds a UI control reports within; clamps and rounds raw input.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four enhancement stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adjustment {
    Saturation,
    Sharpness,
    Contrast,
    Brightness,
}

impl Adjustment {
    /// Every adjustment, in pipeline order.
    pub const ALL: [Adjustment; 4] = [
        Adjustment::Saturation,
        Adjustment::Sharpness,
        Adjustment::Contrast,
        Adjustment::Brightness,
    ];

    /// Lowercase label used in CLI output and replay scripts.
    pub fn label(self) -> &'static str {
        match self {
            Adjustment::Saturation => "saturation",
            Adjustment::Sharpness => "sharpness",
            Adjustment::Contrast => "contrast",
            Adjustment::Brightness => "brightness",
        }
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current factor for each adjustment.
///
/// Fields are plain `f32`s: the pipeline accepts any finite value and
/// clamping belongs to whoever feeds this struct (see [`SliderRange`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdjustmentState {
    pub saturation: f32,
    pub sharpness: f32,
    pub contrast: f32,
    pub brightness: f32,
}

impl Default for AdjustmentState {
    fn default() -> Self {
        Self {
            saturation: 1.0,
            sharpness: 1.0,
            contrast: 1.0,
            brightness: 1.0,
        }
    }
}

impl AdjustmentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, adjustment: Adjustment) -> f32 {
        match adjustment {
            Adjustment::Saturation => self.saturation,
            Adjustment::Sharpness => self.sharpness,
            Adjustment::Contrast => self.contrast,
            Adjustment::Brightness => self.brightness,
        }
    }

    pub fn set(&mut self, adjustment: Adjustment, value: f32) {
        let slot = match adjustment {
            Adjustment::Saturation => &mut self.saturation,
            Adjustment::Sharpness => &mut self.sharpness,
            Adjustment::Contrast => &mut self.contrast,
            Adjustment::Brightness => &mut self.brightness,
        };
        *slot = value;
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, adjustment: Adjustment, value: f32) -> Self {
        self.set(adjustment, value);
        self
    }

    /// True when every factor is exactly 1.0.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Restore all factors to 1.0.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Numeric range a factor control reports within.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
}

impl SliderRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamp a raw control value into range and round it to two decimals.
    ///
    /// NaN collapses to 1.0 so a bad entry can never poison the pipeline.
    pub fn apply(&self, value: f32) -> f32 {
        if value.is_nan() {
            return 1.0_f32.max(self.min).min(self.max);
        }
        round_to_hundredths(value.max(self.min).min(self.max))
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Round to two decimal places, the precision factor entries display.
pub fn round_to_hundredths(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

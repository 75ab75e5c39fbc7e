//! The enhancement pipeline and working-image derivation.
//!
//! These functions combine calculations with enhancers. They never mutate
//! their inputs: every result is a fresh buffer derived from the source and
//! the current parameters, so the same inputs always reproduce the same
//! output.

use super::calculations::{AspectRatio, calculate_fit_dimensions};
use super::enhance::{Brightness, Color, Contrast, Enhancer, Sharpness};
use super::params::{Adjustment, AdjustmentState};
use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Stage order used by [`enhance`]. Each stage consumes the previous output.
pub const PIPELINE_ORDER: [Adjustment; 4] = Adjustment::ALL;

impl Adjustment {
    /// The enhancer implementing this adjustment.
    pub fn enhancer(self) -> &'static dyn Enhancer {
        match self {
            Adjustment::Saturation => &Color,
            Adjustment::Sharpness => &Sharpness,
            Adjustment::Contrast => &Contrast,
            Adjustment::Brightness => &Brightness,
        }
    }
}

/// Apply a single adjustment stage.
#[must_use = "returns the adjusted image"]
pub fn apply_adjustment(image: &RgbaImage, adjustment: Adjustment, factor: f32) -> RgbaImage {
    adjustment.enhancer().enhance(image, factor)
}

/// Run all four stages in [`PIPELINE_ORDER`].
#[must_use = "returns the enhanced image"]
pub fn enhance(image: &RgbaImage, state: &AdjustmentState) -> RgbaImage {
    enhance_in_order(image, state, &PIPELINE_ORDER)
}

/// Run the given stages in the given order.
///
/// Stages whose factor is 1.0 are skipped. The order matters: contrast, for
/// example, pivots on the mean of whatever image it receives.
#[must_use = "returns the enhanced image"]
pub fn enhance_in_order(
    image: &RgbaImage,
    state: &AdjustmentState,
    order: &[Adjustment],
) -> RgbaImage {
    let mut current = image.clone();
    for &adjustment in order {
        let factor = state.get(adjustment);
        if factor == 1.0 {
            continue;
        }
        tracing::debug!(stage = %adjustment, factor, "applying adjustment");
        current = apply_adjustment(&current, adjustment, factor);
    }
    current
}

/// Resize `source` to fit a display area, preserving its aspect ratio.
#[must_use = "returns the working image"]
pub fn derive_working_image(
    source: &RgbaImage,
    available: (u32, u32),
    filter: FilterType,
) -> RgbaImage {
    let aspect = AspectRatio::new(source.width(), source.height());
    let (width, height) = calculate_fit_dimensions(aspect, available.0, available.1);
    if (width, height) == source.dimensions() {
        return source.clone();
    }
    tracing::debug!(
        from_width = source.width(),
        from_height = source.height(),
        width,
        height,
        "deriving working image"
    );
    imageops::resize(source, width, height, filter)
}

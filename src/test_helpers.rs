//! Shared test utilities for the phototune test suite.
//!
//! Provides synthetic image fixtures and pixel-level assertions that print
//! the first differing pixel instead of dumping two whole buffers.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let img = gradient_image(32, 16);
//! let out = enhance(&img, &AdjustmentState::default());
//! assert_pixels_eq(&out, &img);
//! ```

use image::{Rgba, RgbaImage};

// =========================================================================
// Fixtures
// =========================================================================

/// Image where every channel varies so no enhancer is a coincidental no-op.
pub fn gradient_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            ((x * 37 + y * 11) % 256) as u8,
            ((x * 5 + y * 53) % 256) as u8,
            ((x * 91 + y * 3 + 17) % 256) as u8,
            255,
        ])
    })
}

/// Image filled with a single colour.
pub fn solid_image(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(rgba))
}

// =========================================================================
// Assertions: panic with the first offending pixel
// =========================================================================

/// Assert two images are identical in size and every channel.
pub fn assert_pixels_eq(actual: &RgbaImage, expected: &RgbaImage) {
    assert_pixels_close(actual, expected, 0);
}

/// Assert two images match in size and differ by at most `tolerance` per channel.
pub fn assert_pixels_close(actual: &RgbaImage, expected: &RgbaImage, tolerance: u8) {
    assert_eq!(
        actual.dimensions(),
        expected.dimensions(),
        "image dimensions differ"
    );
    for (x, y, px) in actual.enumerate_pixels() {
        let want = expected.get_pixel(x, y);
        let off = px
            .0
            .iter()
            .zip(want.0.iter())
            .any(|(a, b)| a.abs_diff(*b) > tolerance);
        if off {
            panic!(
                "pixel ({x}, {y}) is {:?}, expected {:?} (tolerance {tolerance})",
                px.0, want.0
            );
        }
    }
}

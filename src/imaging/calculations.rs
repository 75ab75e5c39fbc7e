//! Pure calculation functions for display dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Image proportions reduced to lowest terms, e.g. 1920x1080 becomes 16:9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    /// Reduce `width:height` by their greatest common divisor.
    ///
    /// A degenerate `0x0` input yields `1:1` so callers never divide by zero.
    pub fn new(width: u32, height: u32) -> Self {
        let divisor = gcd(width, height);
        if divisor == 0 {
            return Self {
                width: 1,
                height: 1,
            };
        }
        Self {
            width: width / divisor,
            height: height / divisor,
        }
    }

    /// True when the width term is the larger one. Squares count as wide.
    pub fn is_wide(self) -> bool {
        self.width >= self.height
    }
}

impl From<(u32, u32)> for AspectRatio {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Calculate the display size for an image inside an available area.
///
/// The image's longer dimension is scaled to the matching dimension of the
/// area and the other follows from the aspect ratio, so the image is never
/// distorted.
///
/// # Arguments
/// * `aspect` - Image aspect ratio
/// * `available_width` - Width of the display area in pixels
/// * `available_height` - Height of the display area in pixels
///
/// # Returns
/// * `(width, height)` - Display dimensions, rounded, each at least 1
///
/// # Examples
/// ```
/// # use phototune::imaging::{AspectRatio, calculate_fit_dimensions};
/// // 16:9 landscape in an 800x900 panel → width drives: 800x450
/// assert_eq!(calculate_fit_dimensions(AspectRatio::new(16, 9), 800, 900), (800, 450));
///
/// // 9:16 portrait in the same panel → height drives: 506x900
/// assert_eq!(calculate_fit_dimensions(AspectRatio::new(9, 16), 800, 900), (506, 900));
/// ```
pub fn calculate_fit_dimensions(
    aspect: AspectRatio,
    available_width: u32,
    available_height: u32,
) -> (u32, u32) {
    let AspectRatio {
        width: aspect_w,
        height: aspect_h,
    } = aspect;

    let (w, h) = if aspect.is_wide() {
        // Landscape or square: width fills the area
        let w = available_width as f64;
        (w, w * aspect_h as f64 / aspect_w as f64)
    } else {
        // Portrait: height fills the area
        let h = available_height as f64;
        (h * aspect_w as f64 / aspect_h as f64, h)
    };

    (to_pixels(w), to_pixels(h))
}

fn to_pixels(value: f64) -> u32 {
    (value.round() as u32).max(1)
}

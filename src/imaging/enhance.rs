//! The four enhancers.
//!
//! Every enhancer works the same way: build a *degenerate* version of the
//! image (what the image looks like at factor 0), then blend
//!
//! ```text
//! out = degenerate + (image - degenerate) * factor
//! ```
//!
//! per colour channel, rounded and clamped to `0..=255`. Factor 1.0 returns
//! the image untouched, factors between 0 and 1 move toward the degenerate
//! image, factors above 1 push away from it, and negative factors
//! extrapolate past it.
//!
//! | Enhancer | Degenerate image |
//! |---|---|
//! | [`Color`] | grayscale (ITU-R 601 luma) |
//! | [`Sharpness`] | 3x3 smoothed copy, border pixels untouched |
//! | [`Contrast`] | flat gray at the mean luma |
//! | [`Brightness`] | black |
//!
//! Alpha never takes part in the blend.

use image::{Rgba, RgbaImage};

/// One adjustment kind, parameterized at call time by a scalar factor.
pub trait Enhancer {
    /// The image this enhancer blends away from.
    fn degenerate(&self, image: &RgbaImage) -> RgbaImage;

    /// Apply the enhancement at `factor`.
    ///
    /// Non-finite factors leave the image unchanged.
    #[must_use = "returns the enhanced image"]
    fn enhance(&self, image: &RgbaImage, factor: f32) -> RgbaImage {
        if factor == 1.0 || !factor.is_finite() {
            return image.clone();
        }
        blend(&self.degenerate(image), image, factor)
    }
}

/// Saturation. Factor 0 is grayscale.
#[derive(Debug, Clone, Copy, Default)]
pub struct Color;

/// Sharpness. Factor 0 is a softened image, 2 is a sharpened one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sharpness;

/// Contrast. Factor 0 is a solid gray.
#[derive(Debug, Clone, Copy, Default)]
pub struct Contrast;

/// Brightness. Factor 0 is black.
#[derive(Debug, Clone, Copy, Default)]
pub struct Brightness;

impl Enhancer for Color {
    fn degenerate(&self, image: &RgbaImage) -> RgbaImage {
        let mut gray = image.clone();
        for px in gray.pixels_mut() {
            let l = luma(px);
            *px = Rgba([l, l, l, px[3]]);
        }
        gray
    }
}

impl Enhancer for Contrast {
    fn degenerate(&self, image: &RgbaImage) -> RgbaImage {
        let mean = mean_luma(image);
        let mut flat = image.clone();
        for px in flat.pixels_mut() {
            *px = Rgba([mean, mean, mean, px[3]]);
        }
        flat
    }
}

impl Enhancer for Brightness {
    fn degenerate(&self, image: &RgbaImage) -> RgbaImage {
        let mut black = image.clone();
        for px in black.pixels_mut() {
            *px = Rgba([0, 0, 0, px[3]]);
        }
        black
    }
}

/// Smoothing kernel, row-major, sums to [`SMOOTH_WEIGHT`].
const SMOOTH_KERNEL: [u32; 9] = [1, 1, 1, 1, 5, 1, 1, 1, 1];
const SMOOTH_WEIGHT: u32 = 13;

impl Enhancer for Sharpness {
    fn degenerate(&self, image: &RgbaImage) -> RgbaImage {
        let (w, h) = image.dimensions();
        let mut smoothed = image.clone();
        if w < 3 || h < 3 {
            return smoothed;
        }

        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let mut sums = [0u32; 3];
                for (i, weight) in SMOOTH_KERNEL.iter().enumerate() {
                    let sx = x + (i as u32 % 3) - 1;
                    let sy = y + (i as u32 / 3) - 1;
                    let src = image.get_pixel(sx, sy);
                    for (c, sum) in sums.iter_mut().enumerate() {
                        *sum += src[c] as u32 * weight;
                    }
                }
                let out = smoothed.get_pixel_mut(x, y);
                for (c, sum) in sums.iter().enumerate() {
                    out[c] = ((sum + SMOOTH_WEIGHT / 2) / SMOOTH_WEIGHT) as u8;
                }
            }
        }
        smoothed
    }
}

/// ITU-R 601 luma, rounded: `(299 R + 587 G + 114 B) / 1000`.
pub(crate) fn luma(px: &Rgba<u8>) -> u8 {
    let [r, g, b, _] = px.0;
    ((r as u32 * 299 + g as u32 * 587 + b as u32 * 114 + 500) / 1000) as u8
}

/// Mean luma over all pixels, rounded. An empty image reports mid-gray.
fn mean_luma(image: &RgbaImage) -> u8 {
    let count = image.width() as u64 * image.height() as u64;
    if count == 0 {
        return 128;
    }
    let total: u64 = image.pixels().map(|px| luma(px) as u64).sum();
    (total as f64 / count as f64).round() as u8
}

/// Interpolate (or extrapolate) from `degenerate` toward `image` by `factor`.
///
/// Output alpha is taken from `image`.
fn blend(degenerate: &RgbaImage, image: &RgbaImage, factor: f32) -> RgbaImage {
    let mut out = image.clone();
    for (px, base) in out.pixels_mut().zip(degenerate.pixels()) {
        for c in 0..3 {
            let from = base[c] as f32;
            let to = px[c] as f32;
            px[c] = (from + (to - from) * factor).round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{assert_pixels_eq, gradient_image, solid_image};

    #[test]
    fn luma_weights_primaries() {
        assert_eq!(luma(&Rgba([255, 255, 255, 255])), 255);
        assert_eq!(luma(&Rgba([0, 0, 0, 255])), 0);
        assert_eq!(luma(&Rgba([255, 0, 0, 255])), 76);
        assert_eq!(luma(&Rgba([0, 255, 0, 255])), 150);
        assert_eq!(luma(&Rgba([0, 0, 255, 255])), 29);
    }

    #[test]
    fn every_enhancer_is_identity_at_one() {
        let img = gradient_image(17, 11);
        let enhancers: [&dyn Enhancer; 4] = [&Color, &Sharpness, &Contrast, &Brightness];
        for enhancer in enhancers {
            assert_pixels_eq(&enhancer.enhance(&img, 1.0), &img);
        }
    }

    #[test]
    fn non_finite_factor_is_identity() {
        let img = gradient_image(8, 8);
        assert_pixels_eq(&Contrast.enhance(&img, f32::NAN), &img);
        assert_pixels_eq(&Brightness.enhance(&img, f32::INFINITY), &img);
    }

    #[test]
    fn color_zero_is_grayscale() {
        let img = gradient_image(9, 9);
        let gray = Color.enhance(&img, 0.0);
        for (px, orig) in gray.pixels().zip(img.pixels()) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert_eq!(px[0], luma(orig));
        }
    }

    #[test]
    fn color_negative_inverts_chroma_around_gray() {
        // luma(200, 100, 50) = (59800 + 58700 + 5700 + 500) / 1000 = 124
        let img = solid_image(2, 2, [200, 100, 50, 255]);
        let out = Color.enhance(&img, -1.0);
        // 2 * 124 - channel
        assert_eq!(out.get_pixel(0, 0).0, [48, 148, 198, 255]);
    }

    #[test]
    fn brightness_zero_is_black_and_keeps_alpha() {
        let img = solid_image(4, 3, [90, 180, 250, 77]);
        let out = Brightness.enhance(&img, 0.0);
        for px in out.pixels() {
            assert_eq!(px.0, [0, 0, 0, 77]);
        }
    }

    #[test]
    fn brightness_scales_and_clamps() {
        let img = solid_image(1, 1, [100, 200, 0, 255]);
        assert_eq!(Brightness.enhance(&img, 0.5).get_pixel(0, 0).0, [50, 100, 0, 255]);
        assert_eq!(Brightness.enhance(&img, 2.0).get_pixel(0, 0).0, [200, 255, 0, 255]);
    }

    #[test]
    fn contrast_zero_is_flat_mean() {
        // Two gray pixels at 100 and 200 → mean 150.
        let mut img = solid_image(2, 1, [100, 100, 100, 255]);
        img.put_pixel(1, 0, Rgba([200, 200, 200, 255]));
        let out = Contrast.enhance(&img, 0.0);
        assert_eq!(out.get_pixel(0, 0).0, [150, 150, 150, 255]);
        assert_eq!(out.get_pixel(1, 0).0, [150, 150, 150, 255]);
    }

    #[test]
    fn contrast_amplifies_around_mean() {
        let mut img = solid_image(2, 1, [100, 100, 100, 255]);
        img.put_pixel(1, 0, Rgba([200, 200, 200, 255]));
        let out = Contrast.enhance(&img, 3.0);
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(out.get_pixel(1, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn sharpness_degenerate_leaves_border_alone() {
        let img = gradient_image(6, 5);
        let smooth = Sharpness.degenerate(&img);
        for x in 0..6 {
            assert_eq!(smooth.get_pixel(x, 0), img.get_pixel(x, 0));
            assert_eq!(smooth.get_pixel(x, 4), img.get_pixel(x, 4));
        }
        for y in 0..5 {
            assert_eq!(smooth.get_pixel(0, y), img.get_pixel(0, y));
            assert_eq!(smooth.get_pixel(5, y), img.get_pixel(5, y));
        }
    }

    #[test]
    fn sharpness_smooths_isolated_spike() {
        // Single bright pixel in a black 3x3 field: 255 * 5 / 13 ≈ 98.
        let mut img = solid_image(3, 3, [0, 0, 0, 255]);
        img.put_pixel(1, 1, Rgba([255, 255, 255, 255]));
        let smooth = Sharpness.degenerate(&img);
        assert_eq!(smooth.get_pixel(1, 1).0, [98, 98, 98, 255]);

        // Factor 2 pushes the spike further from its smoothed value.
        let sharp = Sharpness.enhance(&img, 2.0);
        assert_eq!(sharp.get_pixel(1, 1).0, [255, 255, 255, 255]);
        let soft = Sharpness.enhance(&img, 0.0);
        assert_eq!(soft.get_pixel(1, 1).0, [98, 98, 98, 255]);
    }

    #[test]
    fn sharpness_on_tiny_image_is_noop() {
        let img = gradient_image(2, 7);
        assert_pixels_eq(&Sharpness.enhance(&img, 3.0), &img);
    }

    #[test]
    fn negative_factors_do_not_panic() {
        let img = gradient_image(5, 5);
        let enhancers: [&dyn Enhancer; 3] = [&Color, &Sharpness, &Contrast];
        for enhancer in enhancers {
            let out = enhancer.enhance(&img, -1.0);
            assert_eq!(out.dimensions(), img.dimensions());
        }
    }

    #[test]
    fn empty_image_passes_through() {
        let img = RgbaImage::new(0, 0);
        assert_eq!(Contrast.enhance(&img, 0.5).dimensions(), (0, 0));
        assert_eq!(Sharpness.enhance(&img, 0.5).dimensions(), (0, 0));
    }
}

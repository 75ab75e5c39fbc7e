//! Image processing: enhancement, display fitting, and file I/O.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode / encode** | `image::ImageReader`, `DynamicImage::write_to` |
//! | **Working image** | `image::imageops::resize` to the fitted display size |
//! | **Enhance** | four blend-from-degenerate enhancers, fixed order |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing adjustments
//! - **Enhance**: The [`Enhancer`] trait and its four implementations
//! - **Pipeline**: Stage composition and working-image derivation
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
pub mod enhance;
mod params;
pub mod pipeline;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend, SourceImage, output_format};
pub use calculations::{AspectRatio, calculate_fit_dimensions};
pub use enhance::Enhancer;
pub use params::{Adjustment, AdjustmentState, SliderRange, round_to_hundredths};
pub use pipeline::{
    PIPELINE_ORDER, apply_adjustment, derive_working_image, enhance, enhance_in_order,
};
pub use rust_backend::RustBackend;

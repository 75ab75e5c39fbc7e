//! # phototune
//!
//! A small photo adjuster: saturation, sharpness, contrast and brightness,
//! each driven by a single factor where 1.0 means "leave it alone".
//!
//! # Architecture: Derived Images
//!
//! An editing session never mutates pixels in place. Everything shown or
//! saved is derived from the source image and a handful of scalars:
//!
//! ```text
//! source ──fit(display area)──▶ working ──enhance(factors)──▶ enhanced
//!   │                                                          (preview)
//!   └────────────────────enhance(factors)──────────────────▶ saved file
//! ```
//!
//! Moving a slider re-runs `enhance` on the working image. Resizing the
//! display re-derives the working image and keeps the factors. Saving runs
//! the same pipeline against the full-resolution source.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Enhancers, the fixed-order pipeline, aspect-fit math, image I/O |
//! | [`session`] | Event-driven editing state that a front-end (or a script) drives |
//! | [`config`] | `phototune.toml` loading, validation and merging over stock defaults |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Fixed Pipeline Order
//!
//! Adjustments always run saturation → sharpness → contrast → brightness,
//! each on the previous stage's output. Contrast pivots on the mean luma of
//! the image it receives, so reordering stages changes the result. See
//! [`imaging::PIPELINE_ORDER`].
//!
//! ## Front-End Agnostic Session
//!
//! [`session::Session`] takes [`session::Event`] values and returns
//! [`session::Outcome`] values. Dialogs are modelled as `Option<PathBuf>`
//! (`None` = cancelled), so windowing code stays a thin translation layer and
//! the same logic is exercised by the `replay` command and the test suite.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, resampling and encoding use the `image` crate only. No system
//! libraries are needed.

pub mod config;
pub mod imaging;
pub mod output;
pub mod session;

#[cfg(test)]
pub(crate) mod test_helpers;

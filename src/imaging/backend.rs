//! Image I/O backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the editor needs
//! from disk: open (decode) and save (encode). Everything between those two
//! happens on in-memory RGBA buffers.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Tests use the
//! recording `MockBackend` below so session logic never touches the disk.

use image::{ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("Failed to encode {}: {reason}", path.display())]
    Encode { path: PathBuf, reason: String },
    #[error("Unsupported output format for {}: expected .jpg, .jpeg, .png, .ico or .gif", path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// A decoded image as the editor holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pub pixels: RgbaImage,
    /// Container format the pixels were decoded from, when known.
    pub format: Option<ImageFormat>,
}

impl SourceImage {
    pub fn new(pixels: RgbaImage, format: Option<ImageFormat>) -> Self {
        Self { pixels, format }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

/// Output formats with an encoder compiled in, keyed by lowercase extension.
const OUTPUT_FORMATS: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("ico", ImageFormat::Ico),
    ("gif", ImageFormat::Gif),
];

/// Every extension [`output_format`] accepts.
pub fn supported_output_extensions() -> impl Iterator<Item = &'static str> {
    OUTPUT_FORMATS.iter().map(|(ext, _)| *ext)
}

/// Infer the encoder for `path` from its extension (case-insensitive).
///
/// A missing or unknown extension is an error: nothing should be written
/// under a name that doesn't describe its contents.
pub fn output_format(path: &Path) -> Result<ImageFormat, BackendError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    ext.and_then(|ext| {
        OUTPUT_FORMATS
            .iter()
            .find(|(candidate, _)| *candidate == ext)
            .map(|(_, format)| *format)
    })
    .ok_or_else(|| BackendError::UnsupportedFormat {
        path: path.to_path_buf(),
    })
}

/// Trait for image I/O backends.
pub trait ImageBackend {
    /// Decode the image at `path`.
    fn open(&self, path: &Path) -> Result<SourceImage, BackendError>;

    /// Encode `image` to `path`, format chosen by [`output_format`].
    ///
    /// Implementations must not leave a partial file at `path` on failure.
    fn save(&self, image: &RgbaImage, path: &Path) -> Result<(), BackendError>;
}

impl<B: ImageBackend + ?Sized> ImageBackend for &B {
    fn open(&self, path: &Path) -> Result<SourceImage, BackendError> {
        (**self).open(path)
    }

    fn save(&self, image: &RgbaImage, path: &Path) -> Result<(), BackendError> {
        (**self).save(image, path)
    }
}

//! Pure Rust image I/O backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, ICO, GIF) | `image::ImageReader` with content sniffing |
//! | Encode | `image::DynamicImage::write_to`, format from extension |
//! | Atomic write | `tempfile::NamedTempFile::persist` in the destination directory |

use super::backend::{BackendError, ImageBackend, SourceImage, output_format};
use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use std::io::{Cursor, Write};
use std::path::Path;

/// Backend using the `image` crate's decoders and encoders.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode into memory so a failing encoder never touches the destination.
fn encode(image: &RgbaImage, format: ImageFormat, path: &Path) -> Result<Vec<u8>, BackendError> {
    let dynamic = DynamicImage::ImageRgba8(image.clone());
    // JPEG has no alpha channel.
    let dynamic = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(dynamic.to_rgb8()),
        _ => dynamic,
    };

    let mut bytes = Cursor::new(Vec::new());
    dynamic
        .write_to(&mut bytes, format)
        .map_err(|e| BackendError::Encode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(bytes.into_inner())
}

/// Write `bytes` to `path` via a sibling temp file and an atomic rename.
fn write_atomically(bytes: &[u8], path: &Path) -> Result<(), BackendError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(bytes)?;
    staged.flush()?;
    staged.persist(path).map_err(|e| BackendError::Io(e.error))?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn open(&self, path: &Path) -> Result<SourceImage, BackendError> {
        let decode_error = |reason: String| BackendError::Decode {
            path: path.to_path_buf(),
            reason,
        };

        let reader = ImageReader::open(path)?
            .with_guessed_format()
            .map_err(|e| decode_error(e.to_string()))?;
        let format = reader.format();
        let decoded = reader.decode().map_err(|e| decode_error(e.to_string()))?;

        tracing::info!(
            path = %path.display(),
            width = decoded.width(),
            height = decoded.height(),
            ?format,
            "opened image"
        );
        Ok(SourceImage::new(decoded.to_rgba8(), format))
    }

    fn save(&self, image: &RgbaImage, path: &Path) -> Result<(), BackendError> {
        let format = output_format(path)?;
        let bytes = encode(image, format, path)?;
        write_atomically(&bytes, path)?;
        tracing::info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            ?format,
            "saved image"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{assert_pixels_close, assert_pixels_eq, gradient_image};
    use image::Rgba;

    #[test]
    fn png_roundtrip_is_lossless() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.png");
        let img = gradient_image(40, 30);

        let backend = RustBackend::new();
        backend.save(&img, &path).unwrap();
        let reopened = backend.open(&path).unwrap();

        assert_eq!(reopened.format, Some(ImageFormat::Png));
        assert_pixels_eq(&reopened.pixels, &img);
    }

    #[test]
    fn png_keeps_alpha() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("alpha.png");
        let img = RgbaImage::from_pixel(3, 3, Rgba([10, 20, 30, 40]));

        let backend = RustBackend::new();
        backend.save(&img, &path).unwrap();
        assert_eq!(backend.open(&path).unwrap().pixels.get_pixel(1, 1).0, [10, 20, 30, 40]);
    }

    #[test]
    fn jpeg_roundtrip_within_tolerance() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.jpg");
        let img = RgbaImage::from_fn(32, 32, |x, y| {
            Rgba([(64 + x) as u8, (96 + y) as u8, 128, 255])
        });

        let backend = RustBackend::new();
        backend.save(&img, &path).unwrap();
        let reopened = backend.open(&path).unwrap();

        assert_eq!(reopened.format, Some(ImageFormat::Jpeg));
        assert_pixels_close(&reopened.pixels, &img, 12);
    }

    #[test]
    fn gif_and_ico_encode() {
        let tmp = tempfile::TempDir::new().unwrap();
        let img = gradient_image(16, 16);
        let backend = RustBackend::new();

        for name in ["out.gif", "out.ico"] {
            let path = tmp.path().join(name);
            backend.save(&img, &path).unwrap();
            assert_eq!(backend.open(&path).unwrap().dimensions(), (16, 16));
        }
    }

    #[test]
    fn format_is_sniffed_from_content() {
        let tmp = tempfile::TempDir::new().unwrap();
        let png = tmp.path().join("real.png");
        let backend = RustBackend::new();
        backend.save(&gradient_image(5, 5), &png).unwrap();

        // Misleading extension: the PNG signature still wins.
        let renamed = tmp.path().join("mislabelled.jpg");
        std::fs::rename(&png, &renamed).unwrap();
        assert_eq!(backend.open(&renamed).unwrap().format, Some(ImageFormat::Png));
    }

    #[test]
    fn unknown_extension_writes_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.bmp");

        let result = RustBackend::new().save(&gradient_image(4, 4), &path);
        assert!(matches!(result, Err(BackendError::UnsupportedFormat { .. })));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_encode_leaves_no_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("too-big.ico");

        // ICO entries max out at 256x256.
        let result = RustBackend::new().save(&RgbaImage::new(300, 300), &path);
        assert!(matches!(result, Err(BackendError::Encode { .. })));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn save_overwrites_existing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.png");
        let backend = RustBackend::new();

        backend.save(&gradient_image(4, 4), &path).unwrap();
        backend.save(&gradient_image(8, 2), &path).unwrap();
        assert_eq!(backend.open(&path).unwrap().dimensions(), (8, 2));
    }

    #[test]
    fn open_nonexistent_file_errors() {
        let result = RustBackend::new().open(Path::new("/nonexistent/image.png"));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn open_garbage_is_decode_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("garbage.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let result = RustBackend::new().open(&path);
        assert!(matches!(result, Err(BackendError::Decode { .. })));
    }
}

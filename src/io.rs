//! Image container I/O.
//!
//! The core library deals only in raw RGBA buffers; this module is the
//! boundary where file formats exist. Any format the `image` crate can
//! decode is accepted on input; the output format is inferred from the
//! destination file extension.

use std::path::Path;

use image::RgbaImage;
use raster_core::{RasterError, RasterImage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("Image codec error: {0}")]
    Codec(#[from] image::ImageError),

    #[error("Buffer error: {0}")]
    Buffer(#[from] RasterError),
}

/// Load an image file, converted to RGBA.
pub fn load(path: &Path) -> Result<RasterImage, IoError> {
    let decoded = image::open(path)?.into_rgba8();
    let (width, height) = decoded.dimensions();
    Ok(RasterImage::from_raw(width, height, decoded.into_raw())?)
}

/// Save an image; the format follows the file extension.
pub fn save(image: RasterImage, path: &Path) -> Result<(), IoError> {
    let (width, height) = (image.width(), image.height());
    // from_raw only fails on a length mismatch, which RasterImage's own
    // invariant rules out.
    let out = RgbaImage::from_raw(width, height, image.into_raw()).ok_or(
        RasterError::BufferSizeMismatch {
            expected: width as usize * height as usize * 4,
            actual: 0,
        },
    )?;
    out.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let error = IoError::Buffer(RasterError::InvalidDimensions {
            width: 0,
            height: 4,
        });
        assert!(error.to_string().starts_with("Buffer error:"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = load(Path::new("/nonexistent/input.png")).unwrap_err();
        assert!(matches!(err, IoError::Codec(_)));
    }
}

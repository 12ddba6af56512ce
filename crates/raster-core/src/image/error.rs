//! Error types for raster operations.

use thiserror::Error;

/// Error type for raster image construction and transforms.
///
/// Every operation that can fail validates its inputs up front and returns
/// one of these variants before touching the destination buffer, so a failed
/// call always leaves its inputs unmodified.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RasterError {
    /// Zero-area dimensions requested.
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },

    /// Raw pixel buffer length does not match `width * height * 4`.
    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch {
        /// Required buffer length in bytes
        expected: usize,
        /// Provided buffer length in bytes
        actual: usize,
    },

    /// Binary operation between images of unequal dimensions.
    #[error("image dimensions differ: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },

    /// A caller-supplied parameter is out of the operation's domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

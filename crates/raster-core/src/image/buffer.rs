//! Owned RGBA pixel buffer.
//!
//! [`RasterImage`] is the single image representation every transform in the
//! crate operates on: a contiguous row-major byte array, 4 bytes per pixel
//! (R, G, B, A), with bounds-checked `(x, y)` accessors. The invariant
//! `pixels.len() == width * height * 4` holds for the lifetime of the value;
//! dimension-changing operations return a new `RasterImage` rather than
//! reallocating in place.

use super::error::RasterError;

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Grayscale luminance weights for R, G, B.
const LUMA_WEIGHTS: [f32; 3] = [0.30, 0.59, 0.11];

/// An owned width x height RGBA image.
///
/// Row 0 is first in the array; the crate imposes no top/bottom convention
/// beyond that (container I/O layers are responsible for any row reversal
/// their format requires, and must be consistent between load and save).
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Create a zero-filled image (transparent black).
    ///
    /// Callers that need an opaque canvas must set alpha explicitly.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
        })
    }

    /// Take ownership of an existing RGBA byte buffer.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(RasterError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The raw RGBA bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Consume the image, yielding the raw byte buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Byte offset of pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image. All transforms in this crate
    /// iterate within bounds; an out-of-range access is a programming error.
    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) out of bounds for {}x{} image",
            x,
            y,
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    /// Read the RGBA pixel at `(x, y)`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Write the RGBA pixel at `(x, y)`.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.pixels[i..i + 4].copy_from_slice(&rgba);
    }

    /// Composite the image onto a black background, dividing out alpha.
    ///
    /// Returns a new `width * height * 3` RGB byte buffer. A pixel with
    /// alpha 0 maps to (0, 0, 0) regardless of its stored color; otherwise
    /// each channel becomes `clamp(floor(channel * 255 / alpha), 0, 255)`.
    /// The source image is not modified.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.pixel_count() * 3);
        for px in self.pixels.chunks_exact(BYTES_PER_PIXEL) {
            rgb.extend_from_slice(&composite_on_black([px[0], px[1], px[2], px[3]]));
        }
        rgb
    }

    /// Convert to grayscale in place.
    ///
    /// Luminance is `0.30*R + 0.59*G + 0.11*B`, truncated to an integer and
    /// written into all three color channels. Alpha is untouched. Idempotent.
    pub fn to_grayscale(&mut self) {
        for px in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            let luma = (LUMA_WEIGHTS[0] * px[0] as f32
                + LUMA_WEIGHTS[1] * px[1] as f32
                + LUMA_WEIGHTS[2] * px[2] as f32) as u8;
            px[0] = luma;
            px[1] = luma;
            px[2] = luma;
        }
    }

    /// Zero-fill the entire buffer, alpha included.
    pub fn clear_to_black(&mut self) {
        self.pixels.fill(0);
    }

    /// Replace this image with its per-channel absolute difference from
    /// `other`, computed over the black-composited RGB values of both.
    ///
    /// Alpha becomes 255 everywhere. Fails with
    /// [`RasterError::DimensionMismatch`] if the images differ in size,
    /// leaving both unmodified.
    pub fn difference(&mut self, other: &RasterImage) -> Result<(), RasterError> {
        if self.width != other.width || self.height != other.height {
            return Err(RasterError::DimensionMismatch {
                left_width: self.width,
                left_height: self.height,
                right_width: other.width,
                right_height: other.height,
            });
        }
        for (px, opx) in self
            .pixels
            .chunks_exact_mut(BYTES_PER_PIXEL)
            .zip(other.pixels.chunks_exact(BYTES_PER_PIXEL))
        {
            let a = composite_on_black([px[0], px[1], px[2], px[3]]);
            let b = composite_on_black([opx[0], opx[1], opx[2], opx[3]]);
            for c in 0..3 {
                px[c] = a[c].abs_diff(b[c]);
            }
            px[3] = 255;
        }
        Ok(())
    }
}

/// Divide out alpha against a black background for a single pixel.
#[inline]
fn composite_on_black(rgba: [u8; 4]) -> [u8; 3] {
    let alpha = rgba[3];
    if alpha == 0 {
        return [0, 0, 0];
    }
    let scale = 255.0 / alpha as f32;
    let mut rgb = [0u8; 3];
    for c in 0..3 {
        let val = (rgba[c] as f32 * scale).floor() as i32;
        rgb[c] = val.clamp(0, 255) as u8;
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent_black() {
        let img = RasterImage::new(3, 2).unwrap();
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
        assert!(img.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert_eq!(
            RasterImage::new(0, 5),
            Err(RasterError::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
    }

    #[test]
    fn test_from_raw_validates_length() {
        let err = RasterImage::from_raw(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            RasterError::BufferSizeMismatch {
                expected: 16,
                actual: 15
            }
        );
        assert!(RasterImage::from_raw(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut img = RasterImage::new(4, 4).unwrap();
        img.set(2, 3, [10, 20, 30, 40]);
        assert_eq!(img.get(2, 3), [10, 20, 30, 40]);
        assert_eq!(img.get(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_out_of_bounds_panics() {
        let img = RasterImage::new(2, 2).unwrap();
        let _ = img.get(2, 0);
    }

    #[test]
    fn test_to_rgb_opaque_passthrough() {
        let mut img = RasterImage::new(1, 1).unwrap();
        img.set(0, 0, [100, 150, 200, 255]);
        assert_eq!(img.to_rgb(), vec![100, 150, 200]);
    }

    #[test]
    fn test_to_rgb_zero_alpha_is_black() {
        let mut img = RasterImage::new(1, 1).unwrap();
        img.set(0, 0, [255, 255, 255, 0]);
        assert_eq!(img.to_rgb(), vec![0, 0, 0]);
    }

    #[test]
    fn test_to_rgb_divides_out_alpha_with_clamp() {
        let mut img = RasterImage::new(1, 1).unwrap();
        // 200 * 255/128 = 398.4 -> clamps to 255; 50 * 255/128 = 99.6 -> 99
        img.set(0, 0, [200, 50, 0, 128]);
        assert_eq!(img.to_rgb(), vec![255, 99, 0]);
    }

    #[test]
    fn test_grayscale_weights_and_alpha() {
        let mut img = RasterImage::new(1, 1).unwrap();
        img.set(0, 0, [100, 100, 100, 77]);
        img.to_grayscale();
        assert_eq!(img.get(0, 0), [100, 100, 100, 77]);

        img.set(0, 0, [255, 0, 0, 200]);
        img.to_grayscale();
        // 0.30 * 255 = 76.5 -> truncates to 76
        assert_eq!(img.get(0, 0), [76, 76, 76, 200]);
    }

    #[test]
    fn test_clear_to_black_zeroes_alpha() {
        let mut img = RasterImage::new(2, 2).unwrap();
        img.set(1, 1, [9, 9, 9, 255]);
        img.clear_to_black();
        assert!(img.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_difference_with_self_is_black_opaque() {
        let mut img = RasterImage::new(2, 2).unwrap();
        img.set(0, 0, [10, 20, 30, 255]);
        img.set(1, 1, [200, 100, 50, 128]);
        let copy = img.clone();
        img.difference(&copy).unwrap();
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(img.get(x, y), [0, 0, 0, 255]);
            }
        }
    }

    #[test]
    fn test_difference_dimension_mismatch_leaves_inputs_alone() {
        let mut img = RasterImage::new(2, 2).unwrap();
        img.set(0, 0, [1, 2, 3, 4]);
        let other = RasterImage::new(3, 2).unwrap();
        let before = img.clone();
        let err = img.difference(&other).unwrap_err();
        assert_eq!(
            err,
            RasterError::DimensionMismatch {
                left_width: 2,
                left_height: 2,
                right_width: 3,
                right_height: 2
            }
        );
        assert_eq!(img, before);
    }
}

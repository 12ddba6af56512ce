//! Normalized floating-point staging buffer.
//!
//! Convolution, resampling and error diffusion all work on a transient
//! `width * height * 3` array of f32 samples in [0, 1] (alpha dropped),
//! created from a [`RasterImage`] and written back when the operation
//! completes. The buffer is owned by a single operation and never escapes it.

use super::buffer::{RasterImage, BYTES_PER_PIXEL};

/// Interleaved RGB float samples in [0, 1], row-major.
#[derive(Debug, Clone)]
pub struct ChannelPlanes {
    width: usize,
    height: usize,
    samples: Vec<f32>,
}

impl ChannelPlanes {
    /// Stage the RGB channels of `image` as normalized floats.
    pub fn from_image(image: &RasterImage) -> Self {
        let width = image.width() as usize;
        let height = image.height() as usize;
        let mut samples = Vec::with_capacity(width * height * 3);
        for px in image.as_bytes().chunks_exact(BYTES_PER_PIXEL) {
            samples.push(px[0] as f32 / 255.0);
            samples.push(px[1] as f32 / 255.0);
            samples.push(px[2] as f32 / 255.0);
        }
        Self {
            width,
            height,
            samples,
        }
    }

    /// A zeroed buffer with the same dimensions as `image`.
    pub fn zeroed_like(image: &RasterImage) -> Self {
        let width = image.width() as usize;
        let height = image.height() as usize;
        Self {
            width,
            height,
            samples: vec![0.0; width * height * 3],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize, channel: usize) -> usize {
        debug_assert!(x < self.width && y < self.height && channel < 3);
        (y * self.width + x) * 3 + channel
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, channel: usize) -> f32 {
        self.samples[self.index(x, y, channel)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, channel: usize, value: f32) {
        let i = self.index(x, y, channel);
        self.samples[i] = value;
    }

    #[inline]
    pub fn add(&mut self, x: usize, y: usize, channel: usize, delta: f32) {
        let i = self.index(x, y, channel);
        self.samples[i] += delta;
    }

    /// Write the staged samples back over the image's RGB channels,
    /// scaling to [0, 255] with a saturating truncation. Alpha is untouched.
    ///
    /// # Panics
    ///
    /// Panics if `image` does not have the dimensions this buffer was
    /// created with.
    pub fn write_back(&self, image: &mut RasterImage) {
        assert_eq!(image.width() as usize, self.width);
        assert_eq!(image.height() as usize, self.height);
        for (px, rgb) in image
            .as_bytes_mut()
            .chunks_exact_mut(BYTES_PER_PIXEL)
            .zip(self.samples.chunks_exact(3))
        {
            px[0] = (rgb[0] * 255.0) as u8;
            px[1] = (rgb[1] * 255.0) as u8;
            px[2] = (rgb[2] * 255.0) as u8;
        }
    }
}

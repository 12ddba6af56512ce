//! Kernel convolution.
//!
//! All filters are expressed as a [`Kernel`] (square weight table plus bias)
//! applied by [`convolve`]. Near the borders, kernel taps that fall outside
//! the image are skipped without renormalizing the remaining weights, so
//! blur filters darken slightly toward the edges. Alpha is never filtered.

mod kernel;

pub use kernel::Kernel;

use crate::image::{ChannelPlanes, RasterImage};

/// Convolve the image's RGB channels with `kernel`, in place.
///
/// The source samples are staged once up front, so the filter always reads
/// original values rather than already-filtered neighbors. Results are
/// clamped to [0, 1] before writing back.
pub fn convolve(image: &mut RasterImage, kernel: &Kernel) {
    let source = ChannelPlanes::from_image(image);
    let mut output = ChannelPlanes::zeroed_like(image);

    let width = source.width() as i64;
    let height = source.height() as i64;
    let radius = kernel.radius() as i64;

    for y in 0..height {
        for x in 0..width {
            for c in 0..3 {
                let mut acc = 0.0f32;
                for ky in 0..kernel.size() as i64 {
                    for kx in 0..kernel.size() as i64 {
                        let sx = x + kx - radius;
                        let sy = y + ky - radius;
                        if sx < 0 || sx >= width || sy < 0 || sy >= height {
                            continue;
                        }
                        acc += kernel.weight(kx as usize, ky as usize)
                            * source.get(sx as usize, sy as usize, c);
                    }
                }
                let value = (acc + kernel.bias()).clamp(0.0, 1.0);
                output.set(x as usize, y as usize, c, value);
            }
        }
    }

    output.write_back(image);
}

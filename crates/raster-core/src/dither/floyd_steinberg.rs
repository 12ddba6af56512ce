//! Serpentine Floyd-Steinberg error diffusion.

use crate::image::{ChannelPlanes, RasterImage};

/// Diffusion weights for a left-to-right scan, as (dx, dy, weight/16).
/// Mirrored in dx on right-to-left rows.
const DIFFUSION: [(i64, i64, f32); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Target bit depth for error diffusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DitherMode {
    /// Convert to grayscale first, then diffuse to 1 bit per channel.
    Grayscale,
    /// Diffuse each channel independently to 3/3/2 bits.
    Color,
}

impl DitherMode {
    /// Number of quantization levels per channel, minus one.
    fn level_steps(self) -> [f32; 3] {
        match self {
            DitherMode::Grayscale => [1.0, 1.0, 1.0],
            DitherMode::Color => [7.0, 7.0, 3.0],
        }
    }
}

/// Floyd-Steinberg dithering with a serpentine scan.
///
/// Rows alternate direction: even rows run left to right, odd rows right to
/// left with the diffusion pattern mirrored horizontally. Each channel value
/// snaps to its nearest quantization level and the residual is distributed
/// to the four unvisited neighbors; error falling outside the image is
/// discarded. Alpha is untouched.
pub fn floyd_steinberg(image: &mut RasterImage, mode: DitherMode) {
    if mode == DitherMode::Grayscale {
        image.to_grayscale();
    }
    let steps = mode.level_steps();

    let mut planes = ChannelPlanes::from_image(image);
    let width = planes.width() as i64;
    let height = planes.height() as i64;

    for y in 0..height {
        let rightward = y % 2 == 0;
        for step in 0..width {
            let x = if rightward { step } else { width - 1 - step };

            for c in 0..3 {
                let old = planes.get(x as usize, y as usize, c);
                let new = quantize_level(old, steps[c]);
                planes.set(x as usize, y as usize, c, new);
                let error = old - new;

                for &(dx, dy, weight) in &DIFFUSION {
                    let effective_dx = if rightward { dx } else { -dx };
                    let nx = x + effective_dx;
                    let ny = y + dy;
                    if nx >= 0 && nx < width && ny >= 0 && ny < height {
                        planes.add(nx as usize, ny as usize, c, error * weight);
                    }
                }
            }
        }
    }

    planes.write_back(image);
}

/// Snap a [0, 1] sample to the nearest of `steps + 1` evenly spaced levels.
#[inline]
fn quantize_level(value: f32, steps: f32) -> f32 {
    (value.clamp(0.0, 1.0) * steps).round() / steps
}

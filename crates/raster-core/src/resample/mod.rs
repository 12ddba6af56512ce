//! Resampling: half-size, double-size, arbitrary upscaling, and rotation.
//!
//! Every operation returns a new owned image; the input is read-only. All
//! four share the border policy of the filters: kernel taps falling outside
//! the source are skipped without renormalizing, and output alpha is always
//! 255.

use crate::image::{ChannelPlanes, RasterError, RasterImage};

/// 3x3 binomial kernel used by [`half_size`], normalized by 16.
const BINOMIAL_3X3: [[f32; 3]; 3] = [[1.0, 2.0, 1.0], [2.0, 4.0, 2.0], [1.0, 2.0, 1.0]];

/// 4x4 binomial kernel used by [`resize`] and [`rotate`], normalized by 64.
const BINOMIAL_4X4: [[f32; 4]; 4] = [
    [1.0, 3.0, 3.0, 1.0],
    [3.0, 9.0, 9.0, 3.0],
    [3.0, 9.0, 9.0, 3.0],
    [1.0, 3.0, 3.0, 1.0],
];

/// 1D reconstruction filters for [`double_size`], chosen by output-coordinate
/// parity: even coordinates align with a source sample, odd ones fall
/// between two.
const EVEN_TAPS: [f32; 3] = [1.0, 2.0, 1.0];
const ODD_TAPS: [f32; 4] = [1.0, 3.0, 3.0, 1.0];

/// Normalization for the combined 2D double-size filter, indexed by
/// `(y % 2) + (x % 2)`: 1/16, 1/32, 1/64.
const DOUBLE_NORM: [f32; 3] = [0.0625, 0.03125, 0.015625];

/// Downsample to `width / 2` by `height / 2`.
///
/// Each destination pixel is the 3x3 binomial average around source
/// `(2x, 2y)`. Fails if either halved dimension reaches zero.
pub fn half_size(image: &RasterImage) -> Result<RasterImage, RasterError> {
    let out_width = image.width() / 2;
    let out_height = image.height() / 2;
    let mut out = RasterImage::new(out_width, out_height)?;

    let source = ChannelPlanes::from_image(image);
    let src_width = source.width() as i64;
    let src_height = source.height() as i64;

    for y in 0..out_height as i64 {
        for x in 0..out_width as i64 {
            let mut rgb = [0.0f32; 3];
            for ky in 0..3i64 {
                for kx in 0..3i64 {
                    let sx = 2 * x + kx - 1;
                    let sy = 2 * y + ky - 1;
                    if sx < 0 || sx >= src_width || sy < 0 || sy >= src_height {
                        continue;
                    }
                    let weight = BINOMIAL_3X3[ky as usize][kx as usize] / 16.0;
                    for (c, acc) in rgb.iter_mut().enumerate() {
                        *acc += weight * source.get(sx as usize, sy as usize, c);
                    }
                }
            }
            out.set(x as u32, y as u32, to_rgba(rgb));
        }
    }
    Ok(out)
}

/// Upsample to `width * 2` by `height * 2` with parity-dependent binomial
/// reconstruction filters.
pub fn double_size(image: &RasterImage) -> Result<RasterImage, RasterError> {
    let out_width = image.width() * 2;
    let out_height = image.height() * 2;
    let mut out = RasterImage::new(out_width, out_height)?;

    let source = ChannelPlanes::from_image(image);
    let src_width = source.width() as i64;
    let src_height = source.height() as i64;

    for y in 0..out_height as i64 {
        let y_taps: &[f32] = if y % 2 == 0 { &EVEN_TAPS } else { &ODD_TAPS };
        for x in 0..out_width as i64 {
            let x_taps: &[f32] = if x % 2 == 0 { &EVEN_TAPS } else { &ODD_TAPS };
            let norm = DOUBLE_NORM[((y % 2) + (x % 2)) as usize];

            let mut rgb = [0.0f32; 3];
            for (ky, &wy) in y_taps.iter().enumerate() {
                for (kx, &wx) in x_taps.iter().enumerate() {
                    let sx = x / 2 - 1 + kx as i64;
                    let sy = y / 2 - 1 + ky as i64;
                    if sx < 0 || sx >= src_width || sy < 0 || sy >= src_height {
                        continue;
                    }
                    let weight = wy * wx * norm;
                    for (c, acc) in rgb.iter_mut().enumerate() {
                        *acc += weight * source.get(sx as usize, sy as usize, c);
                    }
                }
            }
            out.set(x as u32, y as u32, to_rgba(rgb));
        }
    }
    Ok(out)
}

/// Upscale by `scale` using the fixed 4x4 binomial kernel around source
/// `(x / scale, y / scale)`. Only magnification is supported.
pub fn resize(image: &RasterImage, scale: f32) -> Result<RasterImage, RasterError> {
    if !scale.is_finite() || scale < 1.0 {
        return Err(RasterError::InvalidParameter(format!(
            "resize scale must be a finite value >= 1.0, got {scale}"
        )));
    }
    let out_width = (image.width() as f32 * scale) as u32;
    let out_height = (image.height() as f32 * scale) as u32;
    let mut out = RasterImage::new(out_width, out_height)?;

    let source = ChannelPlanes::from_image(image);
    for y in 0..out_height {
        for x in 0..out_width {
            let sx = (x as f32 / scale) as i64;
            let sy = (y as f32 / scale) as i64;
            let rgb = sample_4x4(&source, sx, sy);
            out.set(x, y, to_rgba(rgb));
        }
    }
    Ok(out)
}

/// Rotate clockwise by `degrees` about the origin, keeping the input
/// dimensions. Content rotated out of frame is lost; uncovered regions come
/// out black. `degrees` must be finite.
pub fn rotate(image: &RasterImage, degrees: f32) -> Result<RasterImage, RasterError> {
    if !degrees.is_finite() {
        return Err(RasterError::InvalidParameter(format!(
            "rotation angle must be finite, got {degrees}"
        )));
    }
    let mut out = RasterImage::new(image.width(), image.height())?;

    let radians = -degrees.to_radians();
    let (sin, cos) = radians.sin_cos();

    let source = ChannelPlanes::from_image(image);
    for y in 0..out.height() {
        for x in 0..out.width() {
            let fx = x as f32;
            let fy = y as f32;
            let sx = (fx * cos - fy * sin) as i64;
            let sy = (fx * sin + fy * cos) as i64;
            let rgb = sample_4x4(&source, sx, sy);
            out.set(x, y, to_rgba(rgb));
        }
    }
    Ok(out)
}

/// 4x4 binomial-weighted sample with taps at `(sx - 1 .. sx + 2)`,
/// out-of-bounds taps skipped.
fn sample_4x4(source: &ChannelPlanes, sx: i64, sy: i64) -> [f32; 3] {
    let src_width = source.width() as i64;
    let src_height = source.height() as i64;
    let mut rgb = [0.0f32; 3];
    for ky in 0..4i64 {
        for kx in 0..4i64 {
            let tx = sx - 1 + kx;
            let ty = sy - 1 + ky;
            if tx < 0 || tx >= src_width || ty < 0 || ty >= src_height {
                continue;
            }
            let weight = BINOMIAL_4X4[ky as usize][kx as usize] / 64.0;
            for (c, acc) in rgb.iter_mut().enumerate() {
                *acc += weight * source.get(tx as usize, ty as usize, c);
            }
        }
    }
    rgb
}

/// Clamp a float RGB triple and attach an opaque alpha.
#[inline]
fn to_rgba(rgb: [f32; 3]) -> [u8; 4] {
    [
        (rgb[0].clamp(0.0, 1.0) * 255.0) as u8,
        (rgb[1].clamp(0.0, 1.0) * 255.0) as u8,
        (rgb[2].clamp(0.0, 1.0) * 255.0) as u8,
        255,
    ]
}

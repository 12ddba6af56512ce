//! Color reduction (quantization).
//!
//! Two palette-reduction strategies:
//!
//! - [`quantize_uniform`]: deterministic per-channel bit reduction to an
//!   8-bit RRRGGGBB layout (3 bits red, 3 green, 2 blue). No palette table.
//! - [`quantize_populosity`]: data-driven reduction. Colors are coarsened to
//!   5 bits per channel, the 256 most frequent coarse colors become the
//!   palette, and every pixel is remapped to its nearest palette entry.
//!
//! Both operate in place and never touch alpha.

use crate::image::{RasterImage, BYTES_PER_PIXEL};

/// Number of 15-bit histogram buckets (5 bits per channel).
const BUCKET_COUNT: usize = 1 << 15;

/// Palette size for populosity quantization.
const PALETTE_SIZE: usize = 256;

/// Reduce each pixel to 3/3/2 significant bits per channel.
///
/// R and G map to `round((v >> 5) * 255/7)`, B to `(v >> 6) * 85`, so the
/// output values span the full [0, 255] range at each bit depth.
pub fn quantize_uniform(image: &mut RasterImage) {
    for px in image.as_bytes_mut().chunks_exact_mut(BYTES_PER_PIXEL) {
        px[0] = ((px[0] >> 5) as f32 * (255.0 / 7.0)).round() as u8;
        px[1] = ((px[1] >> 5) as f32 * (255.0 / 7.0)).round() as u8;
        px[2] = (px[2] >> 6) * 85;
    }
}

/// Reduce the image to its 256 most popular coarse colors.
///
/// The histogram buckets colors by their top 5 bits per channel, packed as
/// `(r5 << 10) | (g5 << 5) | b5`. Buckets are ordered by descending count
/// with a stable sort, so equal-count buckets keep their ascending packed
/// index order -- the remap is therefore fully deterministic. Each pixel is
/// assigned the palette entry minimizing squared Euclidean distance in
/// normalized RGB (linear scan, first-found minimum wins ties).
pub fn quantize_populosity(image: &mut RasterImage) {
    // Coarse histogram over 32768 buckets.
    let mut histogram = vec![0u32; BUCKET_COUNT];
    for px in image.as_bytes().chunks_exact(BYTES_PER_PIXEL) {
        histogram[pack_key(px[0], px[1], px[2])] += 1;
    }

    let mut order: Vec<u16> = (0..BUCKET_COUNT as u32).map(|i| i as u16).collect();
    order.sort_by(|&a, &b| histogram[b as usize].cmp(&histogram[a as usize]));

    // Top 256 buckets, expanded to normalized RGB for distance comparison.
    let palette: Vec<(u16, [f32; 3])> = order[..PALETTE_SIZE]
        .iter()
        .map(|&key| {
            (
                key,
                [
                    ((key >> 10) & 0x1f) as f32 / 31.0,
                    ((key >> 5) & 0x1f) as f32 / 31.0,
                    (key & 0x1f) as f32 / 31.0,
                ],
            )
        })
        .collect();

    for px in image.as_bytes_mut().chunks_exact_mut(BYTES_PER_PIXEL) {
        let target = [
            px[0] as f32 / 255.0,
            px[1] as f32 / 255.0,
            px[2] as f32 / 255.0,
        ];

        let mut best = 0usize;
        let mut best_dist = f32::MAX;
        for (i, (_, color)) in palette.iter().enumerate() {
            let dist = (color[0] - target[0]).powi(2)
                + (color[1] - target[1]).powi(2)
                + (color[2] - target[2]).powi(2);
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }

        let key = palette[best].0;
        px[0] = (((key >> 10) & 0x1f) << 3) as u8;
        px[1] = (((key >> 5) & 0x1f) << 3) as u8;
        px[2] = ((key & 0x1f) << 3) as u8;
    }
}

/// Pack a color into its 15-bit histogram bucket.
#[inline]
fn pack_key(r: u8, g: u8, b: u8) -> usize {
    (((r >> 3) as usize) << 10) | (((g >> 3) as usize) << 5) | ((b >> 3) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn uniform_levels_rg() -> Vec<u8> {
        (0..8u32)
            .map(|k| (k as f32 * (255.0 / 7.0)).round() as u8)
            .collect()
    }

    #[test]
    fn test_uniform_output_levels() {
        let mut img = RasterImage::new(16, 16).unwrap();
        // Deterministic pseudo-gradient covering all byte values.
        for y in 0..16 {
            for x in 0..16 {
                let v = (y * 16 + x) as u8;
                img.set(x, y, [v, v.wrapping_mul(3), v.wrapping_mul(7), 255]);
            }
        }
        quantize_uniform(&mut img);

        let rg_levels: HashSet<u8> = uniform_levels_rg().into_iter().collect();
        let b_levels: HashSet<u8> = [0u8, 85, 170, 255].into_iter().collect();
        for y in 0..16 {
            for x in 0..16 {
                let [r, g, b, a] = img.get(x, y);
                assert!(rg_levels.contains(&r), "bad red level {}", r);
                assert!(rg_levels.contains(&g), "bad green level {}", g);
                assert!(b_levels.contains(&b), "bad blue level {}", b);
                assert_eq!(a, 255);
            }
        }
    }

    #[test]
    fn test_uniform_extremes_map_to_extremes() {
        let mut img = RasterImage::new(2, 1).unwrap();
        img.set(0, 0, [0, 0, 0, 255]);
        img.set(1, 0, [255, 255, 255, 255]);
        quantize_uniform(&mut img);
        assert_eq!(img.get(0, 0), [0, 0, 0, 255]);
        assert_eq!(img.get(1, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_populosity_at_most_256_colors() {
        // Pseudo-random-ish image with far more than 256 coarse colors.
        let mut img = RasterImage::new(64, 64).unwrap();
        for y in 0..64u32 {
            for x in 0..64u32 {
                let r = ((x * 37 + y * 11) % 256) as u8;
                let g = ((x * 13 + y * 53) % 256) as u8;
                let b = ((x * 7 + y * 29) % 256) as u8;
                img.set(x, y, [r, g, b, 255]);
            }
        }
        quantize_populosity(&mut img);

        let mut colors = HashSet::new();
        for y in 0..64 {
            for x in 0..64 {
                let [r, g, b, _] = img.get(x, y);
                colors.insert((r, g, b));
            }
        }
        assert!(colors.len() <= 256, "got {} distinct colors", colors.len());
    }

    #[test]
    fn test_populosity_preserves_dominant_coarse_color() {
        // One dominant color plus a sprinkle of others: the dominant coarse
        // color must survive as itself (5-bit truncated, shifted back).
        let mut img = RasterImage::new(8, 8).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                img.set(x, y, [200, 100, 50, 255]);
            }
        }
        img.set(0, 0, [10, 240, 90, 255]);
        quantize_populosity(&mut img);

        let expected = [(200u8 >> 3) << 3, (100u8 >> 3) << 3, (50u8 >> 3) << 3];
        let [r, g, b, a] = img.get(4, 4);
        assert_eq!([r, g, b], expected);
        assert_eq!(a, 255);
    }

    #[test]
    fn test_populosity_alpha_untouched() {
        let mut img = RasterImage::new(2, 2).unwrap();
        img.set(0, 0, [1, 2, 3, 77]);
        quantize_populosity(&mut img);
        assert_eq!(img.get(0, 0)[3], 77);
    }
}

//! Threshold-family dithers.

use rand::Rng;

use crate::image::{RasterImage, BYTES_PER_PIXEL};

/// Fixed mid-point threshold.
const MID_THRESHOLD: u8 = 128;

/// Random perturbation range: +/- 20% of 256.
const PERTURBATION: i32 = 51;

/// 4x4 clustered-dot threshold matrix, indexed `[y % 4][x % 4]`.
const CLUSTER_MATRIX: [[u8; 4]; 4] = [
    [180, 90, 150, 60],
    [15, 240, 210, 105],
    [120, 195, 225, 30],
    [45, 135, 75, 165],
];

/// Grayscale, then snap every channel to 255 if it strictly exceeds 128,
/// else 0. Alpha untouched.
pub fn threshold(image: &mut RasterImage) {
    image.to_grayscale();
    for px in image.as_bytes_mut().chunks_exact_mut(BYTES_PER_PIXEL) {
        for c in 0..3 {
            px[c] = if px[c] > MID_THRESHOLD { 255 } else { 0 };
        }
    }
}

/// Random dithering: one uniform draw in [-51, 51] per pixel, shared across
/// the three channels, added to the grayscale value before thresholding.
///
/// Output depends on `rng`; pass a seeded generator for reproducibility.
pub fn random<R: Rng>(image: &mut RasterImage, rng: &mut R) {
    image.to_grayscale();
    for px in image.as_bytes_mut().chunks_exact_mut(BYTES_PER_PIXEL) {
        let jitter = rng.gen_range(-PERTURBATION..=PERTURBATION);
        for c in 0..3 {
            px[c] = if px[c] as i32 + jitter > MID_THRESHOLD as i32 {
                255
            } else {
                0
            };
        }
    }
}

/// Brightness-preserving dithering: each channel is thresholded against its
/// own mean value (truncated to an integer) instead of the fixed 128, so the
/// expected output brightness matches the input per channel.
pub fn brightness_preserving(image: &mut RasterImage) {
    image.to_grayscale();
    let pixel_count = image.pixel_count() as f64;
    for c in 0..3 {
        let sum: f64 = image
            .as_bytes()
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| px[c] as f64)
            .sum();
        let channel_threshold = (sum / pixel_count) as u8;

        for px in image.as_bytes_mut().chunks_exact_mut(BYTES_PER_PIXEL) {
            px[c] = if px[c] > channel_threshold { 255 } else { 0 };
        }
    }
}

/// Ordered (clustered-dot) dithering against the fixed 4x4 matrix.
pub fn ordered_cluster(image: &mut RasterImage) {
    image.to_grayscale();
    let width = image.width();
    let height = image.height();
    for y in 0..height {
        for x in 0..width {
            let cell = CLUSTER_MATRIX[(y % 4) as usize][(x % 4) as usize];
            let mut px = image.get(x, y);
            for c in 0..3 {
                px[c] = if px[c] > cell { 255 } else { 0 };
            }
            image.set(x, y, px);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gray_image(width: u32, height: u32, value: u8) -> RasterImage {
        let mut img = RasterImage::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                img.set(x, y, [value, value, value, 255]);
            }
        }
        img
    }

    fn is_binary(image: &RasterImage) -> bool {
        image
            .as_bytes()
            .chunks_exact(BYTES_PER_PIXEL)
            .all(|px| px[..3].iter().all(|&v| v == 0 || v == 255))
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut at = gray_image(1, 1, 128);
        threshold(&mut at);
        assert_eq!(at.get(0, 0), [0, 0, 0, 255], "128 is not > 128");

        let mut above = gray_image(1, 1, 129);
        threshold(&mut above);
        assert_eq!(above.get(0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_random_is_binary_and_seeded_reproducible() {
        let img = gray_image(16, 16, 128);

        let mut a = img.clone();
        random(&mut a, &mut StdRng::seed_from_u64(7));
        let mut b = img.clone();
        random(&mut b, &mut StdRng::seed_from_u64(7));

        assert!(is_binary(&a));
        assert_eq!(a, b, "same seed must give identical output");
    }

    #[test]
    fn test_random_extremes_unaffected() {
        // 0 + 51 = 51 <= 128 and 255 - 51 = 204 > 128: extremes never flip.
        let mut dark = gray_image(8, 8, 0);
        random(&mut dark, &mut StdRng::seed_from_u64(1));
        assert!(dark
            .as_bytes()
            .chunks_exact(BYTES_PER_PIXEL)
            .all(|px| px[0] == 0));

        let mut light = gray_image(8, 8, 255);
        random(&mut light, &mut StdRng::seed_from_u64(1));
        assert!(light
            .as_bytes()
            .chunks_exact(BYTES_PER_PIXEL)
            .all(|px| px[0] == 255));
    }

    #[test]
    fn test_brightness_preserving_uses_channel_mean() {
        // Half 60, half 200: mean 130. 60 -> 0, 200 -> 255.
        let mut img = RasterImage::new(2, 1).unwrap();
        img.set(0, 0, [60, 60, 60, 255]);
        img.set(1, 0, [200, 200, 200, 255]);
        brightness_preserving(&mut img);
        assert_eq!(img.get(0, 0), [0, 0, 0, 255]);
        assert_eq!(img.get(1, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_brightness_preserving_flat_image_goes_dark() {
        // Uniform value equals the mean; strict > means everything drops to 0.
        let mut img = gray_image(4, 4, 90);
        brightness_preserving(&mut img);
        assert!(img
            .as_bytes()
            .chunks_exact(BYTES_PER_PIXEL)
            .all(|px| px[0] == 0 && px[1] == 0 && px[2] == 0));
    }

    #[test]
    fn test_ordered_cluster_follows_matrix() {
        // Gray 128 against the matrix: cells < 128 turn white, >= 128 black.
        let mut img = gray_image(4, 4, 128);
        ordered_cluster(&mut img);
        for y in 0..4u32 {
            for x in 0..4u32 {
                let expected = if 128 > CLUSTER_MATRIX[y as usize][x as usize] {
                    255
                } else {
                    0
                };
                assert_eq!(img.get(x, y)[0], expected, "cell ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_ordered_cluster_tiles_beyond_4x4() {
        let mut img = gray_image(8, 8, 100);
        ordered_cluster(&mut img);
        for y in 0..4u32 {
            for x in 0..4u32 {
                assert_eq!(img.get(x, y), img.get(x + 4, y + 4));
            }
        }
    }
}

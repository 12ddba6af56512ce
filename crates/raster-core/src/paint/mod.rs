//! Painterly rendering.
//!
//! Multi-pass stroke synthesis in the style of Hertzmann: a fixed ladder of
//! brush radii is applied coarsest-first, each pass laying jittered circular
//! strokes whose colors are averaged from a float snapshot of the *original*
//! image. The canvas starts white and each pass paints over the previous
//! one, so fine brushes progressively restore detail on top of the broad
//! underpainting.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::image::{ChannelPlanes, RasterImage};

/// Brush radii applied in order, coarsest first.
pub const BRUSH_RADII: [u32; 5] = [100, 40, 10, 4, 2];

/// Jitter applied to each stroke's nominal radius.
const RADIUS_JITTER: std::ops::Range<f32> = 0.7..1.2;

/// Maximum per-axis center displacement, in pixels.
const CENTER_JITTER: i32 = 10;

/// A single circular brush stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    pub radius: u32,
    pub x: i32,
    pub y: i32,
    pub color: [u8; 4],
}

/// Repaint the image as layered brush strokes.
///
/// Stroke placement, radius jitter, and per-pass draw order all come from
/// `rng`, so a seeded generator reproduces the exact same painting.
pub fn painterly<R: Rng>(image: &mut RasterImage, rng: &mut R) {
    let reference = ChannelPlanes::from_image(image);
    let width = image.width() as i32;
    let height = image.height() as i32;

    for px in image.as_bytes_mut().chunks_exact_mut(4) {
        px[0] = 255;
        px[1] = 255;
        px[2] = 255;
    }

    for &brush in &BRUSH_RADII {
        let mut strokes = Vec::new();
        let step = brush as i32;
        let mut cy = step / 2;
        while cy < height {
            let mut cx = step / 2;
            while cx < width {
                // Draw order matters for reproducibility: radius factor
                // first, then x offset, then y offset.
                let radius = (brush as f32 * rng.gen_range(RADIUS_JITTER)) as u32;
                let x = cx + rng.gen_range(-CENTER_JITTER..=CENTER_JITTER);
                let y = cy + rng.gen_range(-CENTER_JITTER..=CENTER_JITTER);
                if let Some(color) = window_average(&reference, x, y, radius as i32) {
                    strokes.push(Stroke {
                        radius,
                        x,
                        y,
                        color,
                    });
                }
                cx += step;
            }
            cy += step;
        }

        strokes.shuffle(rng);
        for stroke in &strokes {
            paint_stroke(image, stroke);
        }
    }
}

/// Average reference color over a square window of half-width `radius`
/// centered at `(x, y)`, clamped to the image. Returns `None` when the
/// clamped window is empty (center too far outside the image).
fn window_average(
    reference: &ChannelPlanes,
    x: i32,
    y: i32,
    radius: i32,
) -> Option<[u8; 4]> {
    let width = reference.width() as i32;
    let height = reference.height() as i32;

    let x0 = (x - radius).max(0);
    let x1 = (x + radius).min(width - 1);
    let y0 = (y - radius).max(0);
    let y1 = (y + radius).min(height - 1);
    if x0 > x1 || y0 > y1 {
        return None;
    }

    let mut sums = [0.0f64; 3];
    for sy in y0..=y1 {
        for sx in x0..=x1 {
            for (c, sum) in sums.iter_mut().enumerate() {
                *sum += reference.get(sx as usize, sy as usize, c) as f64;
            }
        }
    }
    let count = ((x1 - x0 + 1) * (y1 - y0 + 1)) as f64;
    Some([
        (sums[0] / count * 255.0) as u8,
        (sums[1] / count * 255.0) as u8,
        (sums[2] / count * 255.0) as u8,
        255,
    ])
}

/// Render one stroke: an opaque disk of the stroke color, plus a one-pixel
/// ring at squared distance `radius^2 + 1` blended 50/50 with the canvas
/// (alpha included).
pub fn paint_stroke(image: &mut RasterImage, stroke: &Stroke) {
    let width = image.width() as i32;
    let height = image.height() as i32;
    let radius = stroke.radius as i32;
    let disk_sq = radius * radius;

    for dy in -radius..=radius {
        let py = stroke.y + dy;
        if py < 0 || py >= height {
            continue;
        }
        for dx in -radius..=radius {
            let px = stroke.x + dx;
            if px < 0 || px >= width {
                continue;
            }
            let dist_sq = dx * dx + dy * dy;
            if dist_sq <= disk_sq {
                image.set(px as u32, py as u32, stroke.color);
            } else if dist_sq == disk_sq + 1 {
                let old = image.get(px as u32, py as u32);
                let mut blended = [0u8; 4];
                for c in 0..4 {
                    blended[c] =
                        ((old[c] as u16 + stroke.color[c] as u16) / 2) as u8;
                }
                image.set(px as u32, py as u32, blended);
            }
        }
    }
}

//! Halftoning (dithering).
//!
//! Threshold-family dithers ([`threshold`], [`random`],
//! [`brightness_preserving`], [`ordered_cluster`]) convert the image to
//! grayscale and reduce each pixel to pure black or white against a fixed,
//! randomized, mean-derived, or position-dependent threshold.
//!
//! [`floyd_steinberg`] performs serpentine error diffusion instead, in either
//! grayscale (1-bit) or per-channel color (3/3/2-bit) mode.
//!
//! Stochastic variants take the random source as a parameter so callers can
//! inject a seeded generator for reproducible output.

mod floyd_steinberg;
mod threshold;

pub use floyd_steinberg::{floyd_steinberg, DitherMode};
pub use threshold::{brightness_preserving, ordered_cluster, random, threshold};

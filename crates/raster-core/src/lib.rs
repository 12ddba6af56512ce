//! raster-core: in-memory RGBA image transforms
//!
//! This library implements a set of classic raster operations on an owned
//! RGBA byte buffer: color reduction, halftoning, kernel convolution,
//! resampling, and painterly rendering.
//!
//! # Quick Start
//!
//! All operations work on a [`RasterImage`]:
//!
//! ```
//! use raster_core::{dither, filter, RasterImage};
//!
//! let mut image = RasterImage::new(64, 64).unwrap();
//! image.to_grayscale();
//! filter::convolve(&mut image, &filter::Kernel::gaussian());
//! dither::threshold(&mut image);
//! ```
//!
//! # Design
//!
//! Operations come in two shapes:
//!
//! - **In-place transforms** (`&mut RasterImage`): quantization, dithering,
//!   convolution, painting. Dimensions never change.
//! - **Resampling** (`&RasterImage -> Result<RasterImage>`): half, double,
//!   resize, rotate. These return a new owned image; the caller decides
//!   whether to replace the old one.
//!
//! Float staging is an internal detail: convolution, error diffusion, and
//! resampling all expand the RGB channels to normalized f32, work there,
//! and write saturated bytes back. Alpha is carried through untouched by
//! every in-place transform; resampling emits opaque output.
//!
//! Stochastic operations (random dither, painterly rendering) take an
//! `&mut impl Rng` instead of owning a random source, so the same seed
//! reproduces the same output bit for bit.

pub mod dither;
pub mod filter;
pub mod image;
pub mod paint;
pub mod quant;
pub mod resample;


pub use image::{ChannelPlanes, RasterError, RasterImage, BYTES_PER_PIXEL};

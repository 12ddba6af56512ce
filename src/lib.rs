//! Daub: file-level front end for the raster-core transforms.
//!
//! The binary in `main.rs` provides the CLI; this library exposes the I/O
//! layer so integration tests can load and save images the same way the
//! binary does.

pub mod io;

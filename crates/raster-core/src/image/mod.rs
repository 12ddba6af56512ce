//! Image representation: the owned RGBA buffer, the transient float staging
//! buffer used by filters, and the crate's error taxonomy.

mod buffer;
mod error;
mod planes;

pub use buffer::{RasterImage, BYTES_PER_PIXEL};
pub use error::RasterError;
pub use planes::ChannelPlanes;

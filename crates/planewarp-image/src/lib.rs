#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image representation for raster processing.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};

/// An 8-bit RGBA raster, the pixel format exchanged with the outer application.
pub type Rgba8 = Image<u8, 4>;

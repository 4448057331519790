#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// utilities to draw on images.
pub mod draw;

/// error types for the warping engine.
pub mod error;

/// utilities for interpolation.
pub(crate) mod interpolation;

/// module containing parallelization utilities.
pub mod parallel;

/// image geometric transformations module.
pub mod warp;

pub use error::WarpError;

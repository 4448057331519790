#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the linear algebra kernels.
pub mod error;

/// Fixed-size 3x3 matrix helpers.
pub mod mat33;

/// Dense row-major matrix container.
pub mod matrix;

/// Operations over dense matrices.
pub mod ops;

pub use crate::error::LinalgError;
pub use crate::matrix::Matrix;
pub use crate::ops::{
    gaussian_elimination, gaussian_elimination_with_pivots, inverse_3x3, matmul, matvec,
    transpose,
};

/// Magnitude below which a candidate pivot is treated as zero.
pub const PIVOT_EPS: f64 = 1e-9;

/// Magnitude below which a 3x3 determinant is treated as zero.
pub const DET_EPS: f64 = 1e-9;

#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Example: robust estimation
//!
//! ```rust
//! use planewarp_geometry::{find_homography, EstimationMethod, RansacParams};
//!
//! let points1 = vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [5.0, 3.0]];
//! let points2: Vec<[f64; 2]> = points1.iter().map(|p| [p[0] + 2.0, p[1] - 1.0]).collect();
//!
//! let params = RansacParams {
//!     random_seed: Some(7),
//!     ..Default::default()
//! };
//! let estimate = find_homography(&points1, &points2, &params)?;
//!
//! assert_eq!(estimate.method, EstimationMethod::Ransac);
//! assert_eq!(estimate.inliers.len(), 5);
//! # Ok::<(), planewarp_geometry::HomographyError>(())
//! ```

/// Error types for homography estimation.
pub mod error;

/// Caller-level entry point routing between the direct solver and RANSAC.
pub mod estimate;

/// The homography type and the 4-point DLT solver.
pub mod homography;

/// RANSAC-based robust homography estimation.
pub mod ransac;

pub use error::HomographyError;
pub use estimate::{find_homography, EstimationMethod, HomographyEstimate};
pub use homography::{
    homography_4pt2d, DegeneracyPolicy, Homography, HomographySolution, SolverParams,
};
pub use ransac::{
    find_homography_ransac, find_homography_ransac_with_rng, RansacParams, RansacResult,
};

/// Number of correspondences in a minimal sample.
pub const SAMPLE_SIZE: usize = 4;

use planewarp_linalg::LinalgError;
use thiserror::Error;

/// Error types for homography estimation.
#[derive(Debug, Error, PartialEq)]
pub enum HomographyError {
    /// Not enough correspondences to estimate a homography.
    #[error("Homography estimation requires at least {required} correspondences, got {actual}")]
    InsufficientCorrespondences {
        /// Minimum number of correspondences required
        required: usize,
        /// Actual number of correspondences provided
        actual: usize,
    },

    /// The two point sequences do not have the same length.
    #[error("Mismatched array lengths: {left_name} ({left_len}) != {right_name} ({right_len})")]
    MismatchedArrayLengths {
        /// Label for the left-hand slice
        left_name: &'static str,
        /// Length of the left-hand slice
        left_len: usize,
        /// Label for the right-hand slice
        right_name: &'static str,
        /// Length of the right-hand slice
        right_len: usize,
    },

    /// The linear system was rank deficient and the strict policy rejected the solution.
    #[error("Degenerate point configuration, no usable pivot for coefficients {zeroed_pivots:?}")]
    DegenerateConfiguration {
        /// Coefficients of `h` that back-substitution could not determine
        zeroed_pivots: Vec<usize>,
    },

    /// The solver produced NaN or infinite coefficients.
    #[error("Homography solver produced non-finite coefficients")]
    NonFiniteSolution,

    /// RANSAC did not find a model supported by enough inliers.
    #[error("No consensus model: best hypothesis has {actual} inliers, {required} required")]
    NoConsensus {
        /// Minimum number of inliers required
        required: usize,
        /// Inlier count of the best hypothesis
        actual: usize,
    },

    /// Linear algebra failure.
    #[error(transparent)]
    Linalg(#[from] LinalgError),
}

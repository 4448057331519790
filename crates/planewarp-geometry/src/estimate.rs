use crate::homography::{homography_4pt2d, Homography};
use crate::ransac::{find_homography_ransac, RansacParams};
use crate::{HomographyError, SAMPLE_SIZE};

/// Which estimator produced a [`HomographyEstimate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimationMethod {
    /// Exactly four correspondences solved directly.
    Direct,
    /// More than four correspondences solved with RANSAC.
    Ransac,
}

/// Homography estimate returned by [`find_homography`].
#[derive(Debug, Clone, PartialEq)]
pub struct HomographyEstimate {
    /// Mapping from the first point set to the second.
    pub homography: Homography,
    /// Estimator that was used.
    pub method: EstimationMethod,
    /// Indices of the correspondences supporting the homography.
    pub inliers: Vec<usize>,
    /// Coefficients the solver zeroed for lack of a pivot.
    pub zeroed_pivots: Vec<usize>,
}

impl HomographyEstimate {
    /// Whether the homography came from a rank-deficient or unnormalizable solve.
    ///
    /// Degenerate estimates are returned under [`DegeneracyPolicy::Lenient`] and should not
    /// be trusted for warping.
    ///
    /// [`DegeneracyPolicy::Lenient`]: crate::DegeneracyPolicy::Lenient
    pub fn is_degenerate(&self) -> bool {
        !self.zeroed_pivots.is_empty() || !self.homography.is_normalized()
    }
}

/// Estimate the homography mapping `points1` onto `points2`.
///
/// Exactly four pairs go to the direct solver, larger sets to RANSAC.
///
/// # Errors
///
/// * [`HomographyError::MismatchedArrayLengths`] if the slices differ in length.
/// * [`HomographyError::InsufficientCorrespondences`] with fewer than 4 pairs.
/// * Any error of [`homography_4pt2d`] or [`find_homography_ransac`].
pub fn find_homography(
    points1: &[[f64; 2]],
    points2: &[[f64; 2]],
    params: &RansacParams,
) -> Result<HomographyEstimate, HomographyError> {
    if points1.len() != points2.len() {
        return Err(HomographyError::MismatchedArrayLengths {
            left_name: "points1",
            left_len: points1.len(),
            right_name: "points2",
            right_len: points2.len(),
        });
    }

    match points1.len() {
        n if n < SAMPLE_SIZE => Err(HomographyError::InsufficientCorrespondences {
            required: SAMPLE_SIZE,
            actual: n,
        }),
        SAMPLE_SIZE => {
            let x1 = [points1[0], points1[1], points1[2], points1[3]];
            let x2 = [points2[0], points2[1], points2[2], points2[3]];
            let solution = homography_4pt2d(&x1, &x2, &params.solver)?;
            if solution.is_degenerate() {
                log::debug!(
                    "direct solve is degenerate, zeroed pivots {:?}",
                    solution.zeroed_pivots
                );
            }
            Ok(HomographyEstimate {
                homography: solution.homography,
                method: EstimationMethod::Direct,
                inliers: (0..SAMPLE_SIZE).collect(),
                zeroed_pivots: solution.zeroed_pivots,
            })
        }
        _ => {
            let result = find_homography_ransac(points1, points2, params)?;
            Ok(HomographyEstimate {
                homography: result.homography,
                method: EstimationMethod::Ransac,
                inliers: result.inliers,
                zeroed_pivots: result.zeroed_pivots,
            })
        }
    }
}

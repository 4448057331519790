//! RANSAC-based robust wrapper for the 4-point homography solver.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::homography::{homography_4pt2d, Homography, HomographySolution, SolverParams};
use crate::{HomographyError, SAMPLE_SIZE};

/// Parameters for RANSAC over the 4-point solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RansacParams {
    /// Number of RANSAC trials.
    pub max_iterations: usize,
    /// Pixel distance below which a correspondence counts as an inlier.
    pub inlier_threshold: f64,
    /// Optional fixed seed for reproducible sampling.
    pub random_seed: Option<u64>,
    /// Minimum inlier count for the best model to be accepted.
    pub min_inliers: usize,
    /// Parameters forwarded to the minimal solver.
    pub solver: SolverParams,
}

impl Default for RansacParams {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            inlier_threshold: 5.0,
            random_seed: None,
            min_inliers: SAMPLE_SIZE,
            solver: SolverParams::default(),
        }
    }
}

/// RANSAC result for homography estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct RansacResult {
    /// Best homography found, returned as fitted on its minimal sample.
    pub homography: Homography,
    /// Indices of inlier correspondences, ascending.
    pub inliers: Vec<usize>,
    /// Root mean square transfer error over the inliers.
    pub reproj_rmse: f64,
    /// Number of trials that were run.
    pub iterations: usize,
    /// Coefficients the winning minimal solve zeroed for lack of a pivot.
    pub zeroed_pivots: Vec<usize>,
    num_points: usize,
}

impl RansacResult {
    /// Number of inliers supporting the homography.
    pub fn num_inliers(&self) -> usize {
        self.inliers.len()
    }

    /// Fraction of the correspondences that are inliers.
    pub fn inlier_ratio(&self) -> f64 {
        if self.num_points == 0 {
            return 0.0;
        }
        self.inliers.len() as f64 / self.num_points as f64
    }

    /// Whether the winning model came from a rank-deficient or unnormalizable solve.
    pub fn is_degenerate(&self) -> bool {
        !self.zeroed_pivots.is_empty() || !self.homography.is_normalized()
    }
}

/// Estimate a homography robustly from point correspondences.
///
/// The random generator is seeded from `params.random_seed` when set, otherwise from the
/// operating system.
///
/// # Arguments
///
/// * `points1` - Points in the source image.
/// * `points2` - Corresponding points in the destination image.
/// * `params` - RANSAC parameters.
///
/// # Errors
///
/// * [`HomographyError::MismatchedArrayLengths`] if the slices differ in length.
/// * [`HomographyError::InsufficientCorrespondences`] with fewer than 4 pairs.
/// * [`HomographyError::NoConsensus`] if no model reaches `params.min_inliers`.
pub fn find_homography_ransac(
    points1: &[[f64; 2]],
    points2: &[[f64; 2]],
    params: &RansacParams,
) -> Result<RansacResult, HomographyError> {
    let mut rng: StdRng = match params.random_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    find_homography_ransac_with_rng(points1, points2, params, &mut rng)
}

/// Same as [`find_homography_ransac`], drawing samples from the given generator.
pub fn find_homography_ransac_with_rng<R: Rng + ?Sized>(
    points1: &[[f64; 2]],
    points2: &[[f64; 2]],
    params: &RansacParams,
    rng: &mut R,
) -> Result<RansacResult, HomographyError> {
    let n = points1.len();
    if n != points2.len() {
        return Err(HomographyError::MismatchedArrayLengths {
            left_name: "points1",
            left_len: n,
            right_name: "points2",
            right_len: points2.len(),
        });
    }
    if n < SAMPLE_SIZE {
        return Err(HomographyError::InsufficientCorrespondences {
            required: SAMPLE_SIZE,
            actual: n,
        });
    }

    let mut best: Option<(HomographySolution, Vec<usize>)> = None;
    let mut iterations = 0;

    for iter in 0..params.max_iterations {
        iterations = iter + 1;

        let sample = sample_distinct(rng, n);
        let x1 = sample.map(|i| points1[i]);
        let x2 = sample.map(|i| points2[i]);

        let candidate = match homography_4pt2d(&x1, &x2, &params.solver) {
            Ok(solution) => solution,
            Err(e) => {
                log::trace!("RANSAC iteration {iter}: sample {sample:?} rejected: {e}");
                continue;
            }
        };

        let inliers = classify_inliers(points1, points2, &candidate.homography, params.inlier_threshold);

        let best_count = best.as_ref().map_or(0, |(_, b)| b.len());
        if inliers.len() > best_count {
            log::debug!(
                "RANSAC iteration {iter}: new best model with {}/{n} inliers",
                inliers.len()
            );
            let all_inliers = inliers.len() == n;
            best = Some((candidate, inliers));
            // no later model can beat a full consensus
            if all_inliers {
                break;
            }
        }
    }

    let (solution, inliers) = match best {
        Some(b) if b.1.len() >= params.min_inliers => b,
        other => {
            let actual = other.map_or(0, |(_, b)| b.len());
            return Err(HomographyError::NoConsensus {
                required: params.min_inliers,
                actual,
            });
        }
    };

    let HomographySolution {
        homography,
        zeroed_pivots,
    } = solution;
    if !zeroed_pivots.is_empty() {
        log::debug!("RANSAC best model is rank deficient, zeroed pivots {zeroed_pivots:?}");
    }
    let reproj_rmse = inlier_rmse(points1, points2, &homography, &inliers);

    log::debug!(
        "RANSAC finished after {iterations} iterations: {}/{n} inliers, rmse {reproj_rmse:.4} px",
        inliers.len()
    );

    Ok(RansacResult {
        homography,
        inliers,
        reproj_rmse,
        iterations,
        zeroed_pivots,
        num_points: n,
    })
}

/// Draw 4 distinct indices in `0..n`, redrawing any duplicate.
fn sample_distinct<R: Rng + ?Sized>(rng: &mut R, n: usize) -> [usize; SAMPLE_SIZE] {
    let mut sample = [0usize; SAMPLE_SIZE];
    let mut filled = 0;
    while filled < SAMPLE_SIZE {
        let idx = rng.random_range(0..n);
        if !sample[..filled].contains(&idx) {
            sample[filled] = idx;
            filled += 1;
        }
    }
    sample
}

/// Indices whose transfer error is strictly below `threshold`.
///
/// Points that `h` sends to the line at infinity are never inliers.
fn classify_inliers(
    points1: &[[f64; 2]],
    points2: &[[f64; 2]],
    h: &Homography,
    threshold: f64,
) -> Vec<usize> {
    points1
        .iter()
        .zip(points2.iter())
        .enumerate()
        .filter_map(|(i, (p1, p2))| {
            h.transfer_error(*p1, *p2)
                .filter(|&d| d < threshold)
                .map(|_| i)
        })
        .collect()
}

fn inlier_rmse(
    points1: &[[f64; 2]],
    points2: &[[f64; 2]],
    h: &Homography,
    inliers: &[usize],
) -> f64 {
    if inliers.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = inliers
        .iter()
        .filter_map(|&i| h.transfer_error(points1[i], points2[i]))
        .map(|d| d * d)
        .sum();
    (sum_sq / inliers.len() as f64).sqrt()
}

use planewarp_linalg::{
    gaussian_elimination,
    mat33::{inverse_mat33, mat33_mul_vec3},
    LinalgError, Matrix, PIVOT_EPS,
};
use serde::{Deserialize, Serialize};

use crate::HomographyError;

/// Magnitude below which a homogeneous coordinate is treated as zero.
pub(crate) const W_EPS: f64 = 1e-9;

/// A 3x3 projective transform between two image planes, stored row-major.
///
/// Homographies produced by this crate are normalized so that the bottom-right entry is 1,
/// unless that entry is numerically zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Homography(pub [[f64; 3]; 3]);

impl Homography {
    /// The identity transform.
    pub const IDENTITY: Self = Self([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    /// Create a homography from 9 row-major values.
    pub fn from_array(h: [f64; 9]) -> Self {
        Self([[h[0], h[1], h[2]], [h[3], h[4], h[5]], [h[6], h[7], h[8]]])
    }

    /// The 9 row-major values of the matrix.
    pub fn as_array(&self) -> [f64; 9] {
        let m = &self.0;
        [
            m[0][0], m[0][1], m[0][2], m[1][0], m[1][1], m[1][2], m[2][0], m[2][1], m[2][2],
        ]
    }

    /// Borrow the matrix rows.
    pub fn matrix(&self) -> &[[f64; 3]; 3] {
        &self.0
    }

    /// Whether the bottom-right entry equals 1.
    pub fn is_normalized(&self) -> bool {
        (self.0[2][2] - 1.0).abs() < 1e-12
    }

    /// Divide every entry by the bottom-right one, or return `None` if it is ~0.
    pub fn normalized(&self) -> Option<Self> {
        let s = self.0[2][2];
        if s.abs() < W_EPS {
            return None;
        }
        let mut out = self.0;
        out.iter_mut().flatten().for_each(|v| *v /= s);
        Some(Self(out))
    }

    /// Map a point through the homography.
    ///
    /// Returns `None` when the point maps to infinity (`|w| < 1e-9`).
    pub fn project(&self, p: [f64; 2]) -> Option<[f64; 2]> {
        let mut out = [0.0; 3];
        mat33_mul_vec3(&self.0, &[p[0], p[1], 1.0], &mut out);
        if out[2].abs() < W_EPS {
            return None;
        }
        Some([out[0] / out[2], out[1] / out[2]])
    }

    /// Euclidean distance between the projection of `p1` and `p2`.
    pub fn transfer_error(&self, p1: [f64; 2], p2: [f64; 2]) -> Option<f64> {
        let q = self.project(p1)?;
        Some((q[0] - p2[0]).hypot(q[1] - p2[1]))
    }

    /// The inverse transform.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::NotInvertible`] when the matrix is singular.
    pub fn inverse(&self) -> Result<Self, LinalgError> {
        Ok(Self(inverse_mat33(&self.0)?))
    }

    fn is_finite(&self) -> bool {
        self.0.iter().flatten().all(|v| v.is_finite())
    }
}

impl Default for Homography {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[[f64; 3]; 3]> for Homography {
    fn from(m: [[f64; 3]; 3]) -> Self {
        Self(m)
    }
}

impl From<Homography> for Matrix {
    fn from(h: Homography) -> Self {
        Matrix::from(h.0)
    }
}

impl std::fmt::Display for Homography {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.0 {
            writeln!(f, "[{:>14.8}, {:>14.8}, {:>14.8}]", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

/// How the solver treats rank deficient systems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneracyPolicy {
    /// Zero the undetermined coefficients and return the solution flagged as degenerate.
    #[default]
    Lenient,
    /// Fail with [`HomographyError::DegenerateConfiguration`].
    Strict,
}

/// Parameters for the 4-point solver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverParams {
    /// Policy applied when back-substitution hits a near-zero pivot.
    pub degeneracy: DegeneracyPolicy,
}

/// Output of the 4-point solver.
#[derive(Debug, Clone, PartialEq)]
pub struct HomographySolution {
    /// The estimated homography, normalized when possible.
    pub homography: Homography,
    /// Indices of the coefficients of `h` that were set to zero for lack of a pivot.
    pub zeroed_pivots: Vec<usize>,
}

impl HomographySolution {
    /// Number of determined coefficients in the 8x9 system.
    pub fn rank(&self) -> usize {
        8 - self.zeroed_pivots.len()
    }

    /// Whether the solution came from a rank deficient system or could not be normalized.
    pub fn is_degenerate(&self) -> bool {
        !self.zeroed_pivots.is_empty() || !self.homography.is_normalized()
    }
}

/// Compute the homography matrix from four 2d point correspondences.
///
/// The homogeneous system `A h = 0` is built from the direct linear transform, reduced with
/// Gaussian elimination and solved by back-substitution with the gauge `h[8] = 1`.
///
/// # Arguments
///
/// * `x1` - The source 2d points with shape (4, 2).
/// * `x2` - The destination 2d points with shape (4, 2).
/// * `params` - Solver parameters.
///
/// # Returns
///
/// The homography from src to dst together with the degeneracy diagnostics.
///
/// # Errors
///
/// * [`HomographyError::NonFiniteSolution`] if the coefficients are not finite.
/// * [`HomographyError::DegenerateConfiguration`] for rank deficient systems under
///   [`DegeneracyPolicy::Strict`].
///
/// # Example
///
/// ```
/// use planewarp_geometry::{homography_4pt2d, SolverParams};
///
/// let x1 = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
/// let x2 = [[2.0, 3.0], [3.0, 3.0], [3.0, 4.0], [2.0, 4.0]];
///
/// let solution = homography_4pt2d(&x1, &x2, &SolverParams::default()).unwrap();
/// let h = solution.homography.matrix();
///
/// assert!((h[0][2] - 2.0).abs() < 1e-9);
/// assert!((h[1][2] - 3.0).abs() < 1e-9);
/// assert!(!solution.is_degenerate());
/// ```
pub fn homography_4pt2d(
    x1: &[[f64; 2]; 4],
    x2: &[[f64; 2]; 4],
    params: &SolverParams,
) -> Result<HomographySolution, HomographyError> {
    // construct matrix A
    let mut mat_a = Matrix::zeros(8, 9);
    for (i, (p1, p2)) in x1.iter().zip(x2.iter()).enumerate() {
        let ([u1, v1], [u2, v2]) = (*p1, *p2);
        let (r0, r1) = (2 * i, 2 * i + 1);

        mat_a[(r0, 0)] = -u1;
        mat_a[(r0, 1)] = -v1;
        mat_a[(r0, 2)] = -1.0;
        mat_a[(r0, 6)] = u1 * u2;
        mat_a[(r0, 7)] = v1 * u2;
        mat_a[(r0, 8)] = u2;

        mat_a[(r1, 3)] = -u1;
        mat_a[(r1, 4)] = -v1;
        mat_a[(r1, 5)] = -1.0;
        mat_a[(r1, 6)] = u1 * v2;
        mat_a[(r1, 7)] = v1 * v2;
        mat_a[(r1, 8)] = v2;
    }

    let mat_b = gaussian_elimination(&mat_a);

    // back-substitution with the gauge fixed at h[8] = 1
    let mut h = [0.0f64; 9];
    h[8] = 1.0;
    let mut zeroed_pivots = Vec::new();

    for i in (0..8).rev() {
        let pivot = mat_b[(i, i)];
        if pivot.abs() < PIVOT_EPS {
            h[i] = 0.0;
            zeroed_pivots.push(i);
            continue;
        }
        let sum: f64 = ((i + 1)..9).map(|j| mat_b[(i, j)] * h[j]).sum();
        h[i] = -sum / pivot;
    }
    zeroed_pivots.reverse();

    let raw = Homography::from_array(h);
    let homography = raw.normalized().unwrap_or(raw);

    if !homography.is_finite() {
        return Err(HomographyError::NonFiniteSolution);
    }

    let solution = HomographySolution {
        homography,
        zeroed_pivots,
    };

    if params.degeneracy == DegeneracyPolicy::Strict && solution.is_degenerate() {
        return Err(HomographyError::DegenerateConfiguration {
            zeroed_pivots: solution.zeroed_pivots,
        });
    }

    Ok(solution)
}

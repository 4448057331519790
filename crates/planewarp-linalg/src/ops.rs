use crate::mat33::inverse_mat33;
use crate::{LinalgError, Matrix, PIVOT_EPS};

/// Reduce a matrix to row-echelon form with partial pivoting.
///
/// For every pivot column `k` the row with the largest magnitude at or below row `k` is
/// swapped into row `k` and all entries below it are eliminated. Columns without a usable
/// pivot (magnitude below [`PIVOT_EPS`]) are left as they are.
///
/// # Arguments
///
/// * `a` - The input matrix. It is not modified.
///
/// # Returns
///
/// A row-echelon copy of the input.
///
/// # Example
///
/// ```
/// use planewarp_linalg::{gaussian_elimination, Matrix};
///
/// let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
/// let b = gaussian_elimination(&a);
///
/// assert_eq!(b.row(0), &[3.0, 4.0]);
/// assert!(b[(1, 0)].abs() < 1e-12);
/// ```
pub fn gaussian_elimination(a: &Matrix) -> Matrix {
    gaussian_elimination_with_pivots(a).0
}

/// Same as [`gaussian_elimination`], also returning the columns that had no usable pivot.
pub fn gaussian_elimination_with_pivots(a: &Matrix) -> (Matrix, Vec<usize>) {
    let mut m = a.clone();
    let (rows, cols) = m.shape();
    let mut missing = Vec::new();

    for k in 0..rows.min(cols) {
        // find the row with the largest magnitude in column k
        let mut max_row = k;
        let mut max_val = m[(k, k)].abs();
        for r in (k + 1)..rows {
            let v = m[(r, k)].abs();
            if v > max_val {
                max_val = v;
                max_row = r;
            }
        }

        if max_val < PIVOT_EPS {
            missing.push(k);
            continue;
        }

        m.swap_rows(k, max_row);

        let pivot = m[(k, k)];
        for r in (k + 1)..rows {
            let factor = m[(r, k)] / pivot;
            if factor == 0.0 {
                continue;
            }
            for c in k..cols {
                let v = m[(k, c)];
                m[(r, c)] -= factor * v;
            }
        }
    }

    (m, missing)
}

/// Multiply two matrices.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] when `a.cols() != b.rows()`.
pub fn matmul(a: &Matrix, b: &Matrix) -> Result<Matrix, LinalgError> {
    if a.cols() != b.rows() {
        return Err(LinalgError::DimensionMismatch {
            op: "matmul",
            left: a.shape(),
            right: b.shape(),
        });
    }

    let mut out = Matrix::zeros(a.rows(), b.cols());
    for i in 0..a.rows() {
        let a_row = a.row(i);
        for j in 0..b.cols() {
            out[(i, j)] = a_row
                .iter()
                .enumerate()
                .map(|(k, &a_ik)| a_ik * b[(k, j)])
                .sum();
        }
    }

    Ok(out)
}

/// Return a new matrix with rows and columns swapped.
pub fn transpose(a: &Matrix) -> Matrix {
    let mut out = Matrix::zeros(a.cols(), a.rows());
    for i in 0..a.rows() {
        for j in 0..a.cols() {
            out[(j, i)] = a[(i, j)];
        }
    }
    out
}

/// Invert a 3x3 matrix.
///
/// # Errors
///
/// * [`LinalgError::DimensionMismatch`] if `a` is not 3x3.
/// * [`LinalgError::NotInvertible`] if the determinant magnitude is below `1e-9`.
pub fn inverse_3x3(a: &Matrix) -> Result<Matrix, LinalgError> {
    let m = a.to_mat33()?;
    Ok(Matrix::from(inverse_mat33(&m)?))
}

/// Multiply a matrix by a vector.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] when `a.cols() != v.len()`.
pub fn matvec(a: &Matrix, v: &[f64]) -> Result<Vec<f64>, LinalgError> {
    if a.cols() != v.len() {
        return Err(LinalgError::DimensionMismatch {
            op: "matvec",
            left: a.shape(),
            right: (v.len(), 1),
        });
    }

    Ok((0..a.rows())
        .map(|i| a.row(i).iter().zip(v.iter()).map(|(x, y)| x * y).sum())
        .collect())
}

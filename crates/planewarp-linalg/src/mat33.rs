use crate::{LinalgError, DET_EPS};

/// Compute the determinant of a 3x3 matrix by cofactor expansion along the first row.
#[rustfmt::skip]
pub fn det_mat33(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1]) -
    m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0]) +
    m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Compute the adjugate (transposed cofactor matrix) of a 3x3 matrix.
#[rustfmt::skip]
pub fn adjugate_mat33(m: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    [
        [
            m[1][1] * m[2][2] - m[1][2] * m[2][1],  // [0, 0]
            m[0][2] * m[2][1] - m[0][1] * m[2][2],  // [0, 1]
            m[0][1] * m[1][2] - m[0][2] * m[1][1],  // [0, 2]
        ],
        [
            m[1][2] * m[2][0] - m[1][0] * m[2][2],  // [1, 0]
            m[0][0] * m[2][2] - m[0][2] * m[2][0],  // [1, 1]
            m[0][2] * m[1][0] - m[0][0] * m[1][2],  // [1, 2]
        ],
        [
            m[1][0] * m[2][1] - m[1][1] * m[2][0],  // [2, 0]
            m[0][1] * m[2][0] - m[0][0] * m[2][1],  // [2, 1]
            m[0][0] * m[1][1] - m[0][1] * m[1][0],  // [2, 2]
        ],
    ]
}

/// Invert a 3x3 matrix using the closed-form adjugate formula.
///
/// # Arguments
///
/// * `m` - The matrix to invert.
///
/// # Errors
///
/// Returns [`LinalgError::NotInvertible`] when `|det(m)| < 1e-9`.
///
/// # Example
///
/// ```
/// use planewarp_linalg::mat33::inverse_mat33;
///
/// let m = [[1.0, 0.0, -1.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]];
/// let inv = inverse_mat33(&m).unwrap();
/// assert_eq!(inv, [[1.0, 0.0, 1.0], [0.0, 1.0, -1.0], [0.0, 0.0, 1.0]]);
/// ```
pub fn inverse_mat33(m: &[[f64; 3]; 3]) -> Result<[[f64; 3]; 3], LinalgError> {
    let det = det_mat33(m);

    if !det.is_finite() || det.abs() < DET_EPS {
        return Err(LinalgError::NotInvertible { det });
    }

    let adj = adjugate_mat33(m);
    let inv_det = 1.0 / det;

    let mut inv = [[0.0; 3]; 3];
    for (inv_row, adj_row) in inv.iter_mut().zip(adj.iter()) {
        for (dst, &src) in inv_row.iter_mut().zip(adj_row.iter()) {
            *dst = src * inv_det;
        }
    }

    Ok(inv)
}

/// Multiply a 3x3 matrix by a 3-vector.
///
/// * `m` - The 3x3 matrix.
/// * `v` - The input vector.
/// * `out` - The output vector `m * v`.
pub fn mat33_mul_vec3(m: &[[f64; 3]; 3], v: &[f64; 3], out: &mut [f64; 3]) {
    for (o, row) in out.iter_mut().zip(m.iter()) {
        *o = row[0] * v[0] + row[1] * v[1] + row[2] * v[2];
    }
}

/// Multiply two 3x3 matrices.
pub fn mat33_mul_mat33(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
        }
    }
    out
}

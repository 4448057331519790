/// An error type for the linalg module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// The operand shapes are not compatible for the requested operation.
    #[error("Dimension mismatch in {op}: {left:?} vs {right:?}")]
    DimensionMismatch {
        /// Name of the operation that failed.
        op: &'static str,
        /// Shape of the left operand as (rows, cols).
        left: (usize, usize),
        /// Shape of the right operand as (rows, cols).
        right: (usize, usize),
    },

    /// The data length does not match the requested shape.
    #[error("Data length ({actual}) does not match the matrix shape ({expected})")]
    InvalidShape {
        /// Number of elements implied by the shape.
        expected: usize,
        /// Number of elements provided.
        actual: usize,
    },

    /// The matrix is singular (or numerically close to it).
    #[error("Matrix is not invertible, determinant {det:e}")]
    NotInvertible {
        /// The determinant that failed the check.
        det: f64,
    },
}

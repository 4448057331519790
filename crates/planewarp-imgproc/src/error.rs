use planewarp_linalg::LinalgError;

/// An error type for the warping engine.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WarpError {
    /// The transform could not be inverted for inverse mapping.
    #[error("Transform is not invertible: {0}")]
    NotInvertible(#[from] LinalgError),

    /// A split percentage outside `[0, 100]` or not finite.
    #[error("Split percentage must be a finite value in [0, 100], got {0}")]
    InvalidSplit(f64),

    /// The requested rows are not inside the destination raster.
    #[error("Row range {start}..{end} is outside an image with {height} rows")]
    InvalidRowRange {
        /// First requested row.
        start: usize,
        /// One past the last requested row.
        end: usize,
        /// Height of the destination raster.
        height: usize,
    },
}

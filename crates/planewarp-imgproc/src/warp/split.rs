use crate::WarpError;

/// Rectangular region of the destination, anchored at the top-left corner, that receives
/// warped pixels.
///
/// `split_x` and `split_y` are percentages of the destination width and height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitRegion {
    split_x: f64,
    split_y: f64,
}

impl SplitRegion {
    /// Create a split region from two percentages.
    ///
    /// # Errors
    ///
    /// Returns [`WarpError::InvalidSplit`] if a value is not finite or outside `[0, 100]`.
    ///
    /// # Example
    ///
    /// ```
    /// use planewarp_imgproc::warp::SplitRegion;
    ///
    /// let split = SplitRegion::new(50.0, 100.0).unwrap();
    /// assert_eq!(split.col_limit(10), 5);
    /// assert_eq!(split.row_limit(7), 7);
    ///
    /// assert!(SplitRegion::new(101.0, 0.0).is_err());
    /// ```
    pub fn new(split_x: f64, split_y: f64) -> Result<Self, WarpError> {
        for v in [split_x, split_y] {
            if !v.is_finite() || !(0.0..=100.0).contains(&v) {
                return Err(WarpError::InvalidSplit(v));
            }
        }
        Ok(Self { split_x, split_y })
    }

    /// The region covering the whole destination.
    pub fn full() -> Self {
        Self {
            split_x: 100.0,
            split_y: 100.0,
        }
    }

    /// Horizontal cutoff in percent.
    pub fn split_x(&self) -> f64 {
        self.split_x
    }

    /// Vertical cutoff in percent.
    pub fn split_y(&self) -> f64 {
        self.split_y
    }

    /// Guide position along x, `split_x% * width`.
    pub fn boundary_x(&self, width: usize) -> f64 {
        self.split_x / 100.0 * width as f64
    }

    /// Guide position along y, `split_y% * height`.
    pub fn boundary_y(&self, height: usize) -> f64 {
        self.split_y / 100.0 * height as f64
    }

    /// Number of leading columns `x` with `x < split_x% * width`.
    pub fn col_limit(&self, width: usize) -> usize {
        (self.boundary_x(width).ceil() as usize).min(width)
    }

    /// Number of leading rows `y` with `y < split_y% * height`.
    pub fn row_limit(&self, height: usize) -> usize {
        (self.boundary_y(height).ceil() as usize).min(height)
    }
}

impl Default for SplitRegion {
    fn default() -> Self {
        Self::full()
    }
}

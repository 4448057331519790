use std::ops::Range;

use rayon::prelude::*;

use planewarp_image::Image;

/// Controls how row-wise image operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,
}

/// Apply a function to a range of rows of an image.
///
/// The closure receives the row index and the interleaved pixel data of that row.
///
/// # Panics
///
/// Panics if `rows.end` exceeds the image height. Callers validate the range.
pub fn for_each_row<T, const C: usize>(
    dst: &mut Image<T, C>,
    rows: Range<usize>,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) where
    T: Send,
{
    let stride = dst.cols() * C;
    if stride == 0 || rows.is_empty() {
        return;
    }

    let first = rows.start;
    let data = &mut dst.as_slice_mut()[rows.start * stride..rows.end * stride];

    match strategy {
        ExecutionStrategy::Serial => data
            .chunks_exact_mut(stride)
            .enumerate()
            .for_each(|(i, row)| f(first + i, row)),
        ExecutionStrategy::ParallelRows => data
            .par_chunks_exact_mut(stride)
            .enumerate()
            .for_each(|(i, row)| f(first + i, row)),
    }
}

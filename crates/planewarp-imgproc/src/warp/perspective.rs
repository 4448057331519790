use std::ops::Range;
use std::time::Instant;

use planewarp_image::Image;
use planewarp_linalg::mat33::{inverse_mat33, mat33_mul_vec3};

use super::SplitRegion;
use crate::{
    draw::{draw_dashed_line, GuideStyle},
    interpolation::bilinear_interpolation,
    parallel::{self, ExecutionStrategy},
    WarpError,
};

fn transform_point(x: f64, y: f64, m: &[[f64; 3]; 3]) -> (f64, f64) {
    let mut out = [0.0; 3];
    mat33_mul_vec3(m, &[x, y, 1.0], &mut out);
    (out[0] / out[2], out[1] / out[2])
}

/// Fill the first `row.len() / C` pixels of destination row `y` from the source.
fn warp_row<const C: usize>(src: &Image<u8, C>, inv_m: &[[f64; 3]; 3], y: usize, row: &mut [u8]) {
    let (src_cols, src_rows) = (src.cols() as f64, src.rows() as f64);

    row.chunks_exact_mut(C)
        .enumerate()
        .for_each(|(x, dst_pixel)| {
            let (sx, sy) = transform_point(x as f64, y as f64, inv_m);
            // also rejects the nan/inf produced by points at infinity
            if sx >= 0.0 && sx < src_cols && sy >= 0.0 && sy < src_rows {
                dst_pixel.copy_from_slice(&bilinear_interpolation(src, sx, sy));
            }
        });
}

/// Warp the source into a copy of `base`, restricted to a split region.
///
/// Every destination pixel `(x, y)` inside the region is inverse mapped through `m`; pixels
/// landing inside the source are bilinearly sampled, all others keep the value of `base`.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `base` - The destination image the warp is composited on. It is not modified.
/// * `m` - The 3x3 perspective transformation matrix src -> dst.
/// * `split` - Region of the destination that receives warped pixels.
/// * `strategy` - How destination rows are scheduled.
///
/// # Returns
///
/// A new image with the size of `base`.
///
/// # Errors
///
/// Returns [`WarpError::NotInvertible`] if `m` is singular, before any pixel is written.
///
/// # Example
///
/// ```
/// use planewarp_image::{Image, ImageSize};
/// use planewarp_imgproc::parallel::ExecutionStrategy;
/// use planewarp_imgproc::warp::{warp_perspective_split, SplitRegion};
///
/// let size = ImageSize { width: 4, height: 3 };
/// let src = Image::<u8, 4>::from_size_val(size, 200).unwrap();
/// let base = Image::<u8, 4>::from_size_val(size, 0).unwrap();
///
/// // shift one pixel to the right
/// let m = [[1.0, 0.0, 1.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
///
/// let dst = warp_perspective_split(
///     &src,
///     &base,
///     &m,
///     SplitRegion::full(),
///     ExecutionStrategy::Serial,
/// )
/// .unwrap();
///
/// assert_eq!(dst.pixel(0, 0).unwrap(), &[0, 0, 0, 0]);
/// assert_eq!(dst.pixel(1, 0).unwrap(), &[200, 200, 200, 200]);
/// ```
pub fn warp_perspective_split<const C: usize>(
    src: &Image<u8, C>,
    base: &Image<u8, C>,
    m: &[[f64; 3]; 3],
    split: SplitRegion,
    strategy: ExecutionStrategy,
) -> Result<Image<u8, C>, WarpError> {
    let inv_m = inverse_mat33(m)?;

    let mut dst = base.clone();
    let col_limit = split.col_limit(dst.cols());
    let row_limit = split.row_limit(dst.rows());

    if col_limit == 0 || row_limit == 0 {
        return Ok(dst);
    }

    let start = Instant::now();
    parallel::for_each_row(&mut dst, 0..row_limit, strategy, |y, row| {
        warp_row(src, &inv_m, y, &mut row[..col_limit * C]);
    });

    log::debug!(
        "warped {col_limit}x{row_limit} of {} ({strategy:?}) in {:?}",
        base.size(),
        start.elapsed()
    );

    Ok(dst)
}

/// Warp a range of destination rows in place.
///
/// Rows outside the split region are left untouched, so a full warp can be produced by
/// calling this over consecutive chunks of `0..dst.rows()`.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image, already holding the base pixels.
/// * `inv_m` - The inverse transform dst -> src.
/// * `split` - Region of the destination that receives warped pixels.
/// * `rows` - Destination rows to process.
///
/// # Errors
///
/// Returns [`WarpError::InvalidRowRange`] if `rows` is reversed or exceeds the height.
pub fn warp_rows_split<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    inv_m: &[[f64; 3]; 3],
    split: SplitRegion,
    rows: Range<usize>,
) -> Result<(), WarpError> {
    if rows.start > rows.end || rows.end > dst.rows() {
        return Err(WarpError::InvalidRowRange {
            start: rows.start,
            end: rows.end,
            height: dst.rows(),
        });
    }

    let col_limit = split.col_limit(dst.cols());
    let row_limit = split.row_limit(dst.rows());
    let rows = rows.start.min(row_limit)..rows.end.min(row_limit);

    if col_limit == 0 {
        return Ok(());
    }

    parallel::for_each_row(dst, rows, ExecutionStrategy::Serial, |y, row| {
        warp_row(src, inv_m, y, &mut row[..col_limit * C]);
    });

    Ok(())
}

/// Warp the source onto `base` and overlay dashed guides along the split boundaries.
///
/// The vertical guide sits at `x = split_x% * width` and the horizontal one at
/// `y = split_y% * height`, both spanning the whole destination. A guide on the far edge
/// (100%) falls outside the image and is not drawn.
///
/// # Errors
///
/// Same as [`warp_perspective_split`].
pub fn render_preview(
    src: &Image<u8, 4>,
    base: &Image<u8, 4>,
    m: &[[f64; 3]; 3],
    split: SplitRegion,
    strategy: ExecutionStrategy,
    guides: &GuideStyle,
) -> Result<Image<u8, 4>, WarpError> {
    let mut dst = warp_perspective_split(src, base, m, split, strategy)?;

    let (width, height) = (dst.cols() as i64, dst.rows() as i64);
    if width == 0 || height == 0 {
        return Ok(dst);
    }

    let gx = split.boundary_x(dst.cols()).floor() as i64;
    let gy = split.boundary_y(dst.rows()).floor() as i64;

    if gx < width {
        draw_dashed_line(
            &mut dst,
            (gx, 0),
            (gx, height - 1),
            guides.color,
            guides.dash,
            guides.gap,
            guides.thickness,
        );
    }
    if gy < height {
        draw_dashed_line(
            &mut dst,
            (0, gy),
            (width - 1, gy),
            guides.color,
            guides.dash,
            guides.gap,
            guides.thickness,
        );
    }

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planewarp_image::{ImageError, ImageSize};
    use planewarp_linalg::LinalgError;

    const IDENTITY: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

    fn gradient(width: usize, height: usize) -> Result<Image<u8, 4>, ImageError> {
        let mut data = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 10) as u8, (y * 10) as u8, 7, 255]);
            }
        }
        Image::new(ImageSize { width, height }, data)
    }

    fn solid(width: usize, height: usize, v: u8) -> Result<Image<u8, 4>, ImageError> {
        Image::from_size_val(ImageSize { width, height }, v)
    }

    #[test]
    fn transform_point() {
        let m = [[1.0, 0.0, -1.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]];
        let (x, y) = super::transform_point(1.0, 1.0, &m);
        assert_eq!((x, y), (0.0, 2.0));
    }

    #[test]
    fn warp_identity_2x2_is_exact() -> Result<(), Box<dyn std::error::Error>> {
        let src = Image::<u8, 4>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![
                1, 2, 3, 4, 50, 60, 70, 80, //
                9, 10, 11, 12, 250, 251, 252, 253,
            ],
        )?;
        let base = solid(2, 2, 0)?;

        for strategy in [ExecutionStrategy::Serial, ExecutionStrategy::ParallelRows] {
            let dst = warp_perspective_split(&src, &base, &IDENTITY, SplitRegion::full(), strategy)?;
            assert_eq!(dst, src);
        }
        Ok(())
    }

    #[test]
    fn warp_zero_split_keeps_base() -> Result<(), Box<dyn std::error::Error>> {
        let src = gradient(6, 5)?;
        let base = gradient(8, 4)?;
        let m = [[1.1, 0.1, -2.0], [0.05, 0.9, 1.0], [0.001, 0.002, 1.0]];

        for split in [SplitRegion::new(0.0, 100.0)?, SplitRegion::new(100.0, 0.0)?] {
            let dst = warp_perspective_split(&src, &base, &m, split, ExecutionStrategy::default())?;
            assert_eq!(dst.as_slice(), base.as_slice());
        }
        Ok(())
    }

    #[test]
    fn warp_respects_split_region() -> Result<(), Box<dyn std::error::Error>> {
        let src = solid(4, 4, 200)?;
        let base = solid(4, 4, 0)?;
        let split = SplitRegion::new(50.0, 75.0)?;

        let dst = warp_perspective_split(&src, &base, &IDENTITY, split, ExecutionStrategy::Serial)?;
        for y in 0..4 {
            for x in 0..4 {
                let expected = if x < 2 && y < 3 { 200 } else { 0 };
                assert_eq!(dst.pixel(x, y)?, &[expected; 4], "pixel ({x}, {y})");
            }
        }
        Ok(())
    }

    #[test]
    fn warp_empty_source_keeps_base() -> Result<(), Box<dyn std::error::Error>> {
        let base = gradient(5, 4)?;
        for (w, h) in [(0, 3), (3, 0), (0, 0)] {
            let src = solid(w, h, 200)?;
            let dst = warp_perspective_split(
                &src,
                &base,
                &IDENTITY,
                SplitRegion::full(),
                ExecutionStrategy::Serial,
            )?;
            assert_eq!(dst.as_slice(), base.as_slice());
        }
        Ok(())
    }

    #[test]
    fn warp_out_of_source_keeps_base() -> Result<(), Box<dyn std::error::Error>> {
        let src = solid(2, 2, 200)?;
        let base = solid(4, 2, 9)?;
        // translate the source 2 pixels to the right
        let m = [[1.0, 0.0, 2.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

        let dst = warp_perspective_split(&src, &base, &m, SplitRegion::full(), ExecutionStrategy::Serial)?;
        assert_eq!(dst.pixel(0, 0)?, &[9; 4]);
        assert_eq!(dst.pixel(1, 1)?, &[9; 4]);
        assert_eq!(dst.pixel(2, 0)?, &[200; 4]);
        assert_eq!(dst.pixel(3, 1)?, &[200; 4]);
        Ok(())
    }

    #[test]
    fn warp_singular_matrix_fails() -> Result<(), ImageError> {
        let src = solid(2, 2, 1)?;
        let base = solid(2, 2, 0)?;
        let m = [[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 0.0, 1.0]];

        let res = warp_perspective_split(&src, &base, &m, SplitRegion::full(), ExecutionStrategy::Serial);
        assert_eq!(
            res,
            Err(WarpError::NotInvertible(LinalgError::NotInvertible { det: 0.0 }))
        );
        Ok(())
    }

    #[test]
    fn warp_rows_in_chunks_matches_full_warp() -> Result<(), Box<dyn std::error::Error>> {
        let src = gradient(9, 7)?;
        let base = solid(10, 8, 3)?;
        let m = [[0.9, -0.05, 0.5], [0.04, 1.05, -0.3], [0.002, -0.001, 1.0]];
        let split = SplitRegion::new(80.0, 60.0)?;

        let full = warp_perspective_split(&src, &base, &m, split, ExecutionStrategy::ParallelRows)?;

        let inv_m = inverse_mat33(&m)?;
        let mut chunked = base.clone();
        for start in (0..8).step_by(3) {
            warp_rows_split(&src, &mut chunked, &inv_m, split, start..(start + 3).min(8))?;
        }
        assert_eq!(chunked, full);

        assert_eq!(
            warp_rows_split(&src, &mut chunked, &inv_m, split, 4..9),
            Err(WarpError::InvalidRowRange {
                start: 4,
                end: 9,
                height: 8
            })
        );
        Ok(())
    }

    #[test]
    fn render_preview_draws_guides() -> Result<(), Box<dyn std::error::Error>> {
        let src = solid(10, 10, 0)?;
        let base = solid(10, 10, 0)?;
        let guides = GuideStyle {
            color: [255, 0, 0, 255],
            dash: 2,
            gap: 2,
            thickness: 1,
        };
        let split = SplitRegion::new(50.0, 100.0)?;

        let dst = render_preview(&src, &base, &IDENTITY, split, ExecutionStrategy::Serial, &guides)?;

        // vertical guide at x = 5, dashed from the top
        assert_eq!(dst.pixel(5, 0)?, &[255, 0, 0, 255]);
        assert_eq!(dst.pixel(5, 1)?, &[255, 0, 0, 255]);
        assert_eq!(dst.pixel(5, 2)?, &[0; 4]);
        assert_eq!(dst.pixel(5, 4)?, &[255, 0, 0, 255]);
        // horizontal guide at y = 10 lies outside the image
        for x in (0..10).filter(|&x| x != 5) {
            assert_eq!(dst.pixel(x, 9)?, &[0; 4]);
        }
        Ok(())
    }
}

use planewarp_image::Image;

/// Kernel for bilinear interpolation over a `u8` image.
///
/// The right and bottom neighbours are clamped to the last column and row, so sampling
/// anywhere in `[0, width) x [0, height)` only reads valid pixels. Each channel is blended
/// in `f64`, rounded to nearest and clamped to `[0, 255]`.
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate, in `[0, width)`.
/// * `v` - The y coordinate of the pixel to interpolate, in `[0, height)`.
///
/// # Returns
///
/// The interpolated pixel values.
///
/// # Panics
///
/// Panics if the image has zero width or height. The warp only samples coordinates inside
/// the source, so an empty source is never sampled.
pub(crate) fn bilinear_interpolation<const C: usize>(
    image: &Image<u8, C>,
    u: f64,
    v: f64,
) -> [u8; C] {
    let (rows, cols) = (image.rows(), image.cols());

    let x0 = (u.floor() as usize).min(cols - 1);
    let y0 = (v.floor() as usize).min(rows - 1);
    let x1 = (x0 + 1).min(cols - 1);
    let y1 = (y0 + 1).min(rows - 1);

    let tx = u - x0 as f64;
    let ty = v - y0 as f64;

    let data = image.as_slice();
    let p00 = &data[(y0 * cols + x0) * C..][..C];
    let p01 = &data[(y0 * cols + x1) * C..][..C];
    let p10 = &data[(y1 * cols + x0) * C..][..C];
    let p11 = &data[(y1 * cols + x1) * C..][..C];

    let mut pixel = [0u8; C];
    for k in 0..C {
        let top = p00[k] as f64 * (1.0 - tx) + p01[k] as f64 * tx;
        let bottom = p10[k] as f64 * (1.0 - tx) + p11[k] as f64 * tx;
        let value = top * (1.0 - ty) + bottom * ty;
        pixel[k] = value.round().clamp(0.0, 255.0) as u8;
    }

    pixel
}

#[cfg(test)]
mod tests {
    use super::bilinear_interpolation;
    use planewarp_image::{Image, ImageError, ImageSize};

    fn ramp() -> Result<Image<u8, 1>, ImageError> {
        Image::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0, 100, 50, 200],
        )
    }

    #[test]
    fn bilinear_on_grid_is_exact() -> Result<(), ImageError> {
        let image = ramp()?;
        assert_eq!(bilinear_interpolation(&image, 0.0, 0.0), [0]);
        assert_eq!(bilinear_interpolation(&image, 1.0, 0.0), [100]);
        assert_eq!(bilinear_interpolation(&image, 0.0, 1.0), [50]);
        assert_eq!(bilinear_interpolation(&image, 1.0, 1.0), [200]);
        Ok(())
    }

    #[test]
    fn bilinear_blends_and_rounds() -> Result<(), ImageError> {
        let image = ramp()?;
        // top 50, bottom 125, mixed 87.5
        assert_eq!(bilinear_interpolation(&image, 0.5, 0.5), [88]);
        // top 25, bottom 87.5, mixed 40.625
        assert_eq!(bilinear_interpolation(&image, 0.25, 0.25), [41]);
        Ok(())
    }

    #[test]
    fn bilinear_clamps_last_column() -> Result<(), ImageError> {
        let image = ramp()?;
        // x1 and y1 collapse onto the last pixel
        assert_eq!(bilinear_interpolation(&image, 1.75, 1.5), [200]);
        Ok(())
    }
}

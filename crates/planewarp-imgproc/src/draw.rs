use planewarp_image::Image;

/// Appearance of the dashed guides drawn along the split boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideStyle {
    /// Colour of the guide pixels.
    pub color: [u8; 4],
    /// Number of pixels drawn per dash.
    pub dash: usize,
    /// Number of pixels skipped between dashes.
    pub gap: usize,
    /// Line thickness in pixels.
    pub thickness: usize,
}

impl Default for GuideStyle {
    fn default() -> Self {
        Self {
            color: [255, 0, 0, 255],
            dash: 5,
            gap: 5,
            thickness: 1,
        }
    }
}

/// Helper function to set a pixel's color, handling bounds checking.
#[inline]
fn set_pixel<const C: usize>(img: &mut Image<u8, C>, x: i64, y: i64, color: [u8; C]) {
    if x >= 0 && y >= 0 {
        // out of bounds writes are clipped
        let _ = img.set_pixel(x as usize, y as usize, color);
    }
}

/// Draws a dashed line on an image inplace using Bresenham's line algorithm.
///
/// Pixels along the line are counted from `p0`; the first `dash` are drawn, the next `gap`
/// skipped, and so on. Parts of the line outside the image are clipped.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `p0` - The start point of the line as a tuple of (x, y).
/// * `p1` - The end point of the line as a tuple of (x, y).
/// * `color` - The color of the line as an array of `C` elements.
/// * `dash` - Length of each dash in pixels. Nothing is drawn when 0.
/// * `gap` - Length of each gap in pixels. A solid line is drawn when 0.
/// * `thickness` - The thickness of the line. (thickness > 1 is approximate).
pub fn draw_dashed_line<const C: usize>(
    img: &mut Image<u8, C>,
    p0: (i64, i64),
    p1: (i64, i64),
    color: [u8; C],
    dash: usize,
    gap: usize,
    thickness: usize,
) {
    if dash == 0 {
        return;
    }
    let period = dash + gap;

    let (mut x0, mut y0) = p0;
    let (x1, y1) = p1;

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut err = dx - dy;
    let half = (thickness / 2) as i64;
    let mut step = 0usize;

    loop {
        if step % period < dash {
            for i in -half..=half {
                for j in -half..=half {
                    set_pixel(img, x0 + i, y0 + j, color);
                }
            }
        }

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
        step += 1;
    }
}

use facemorph_image::Image;
use std::cmp::{max, min};

/// Distance in pixels within which a pixel on a polygon edge counts as inside.
const EDGE_EPS: f32 = 1e-4;

/// Helper function to set a pixel's color, handling bounds checking.
#[inline]
fn set_pixel<T: Copy, const C: usize>(img: &mut Image<T, C>, x: i64, y: i64, color: [T; C]) {
    if x >= 0 && x < img.cols() as i64 && y >= 0 && y < img.rows() as i64 {
        img.pixel_mut(x as usize, y as usize).copy_from_slice(&color);
    }
}

/// Horizontal extent of a convex polygon on the scanline `y`.
///
/// Returns `None` if the scanline misses the polygon.
fn scanline_span(vertices: &[(f32, f32)], y: f32) -> Option<(f32, f32)> {
    let mut span: Option<(f32, f32)> = None;
    let mut extend = |x: f32| {
        span = Some(match span {
            Some((lo, hi)) => (lo.min(x), hi.max(x)),
            None => (x, x),
        });
    };

    let n = vertices.len();
    for i in 0..n {
        let (x0, y0) = vertices[i];
        let (x1, y1) = vertices[(i + 1) % n];
        let (lo, hi) = (y0.min(y1), y0.max(y1));

        if y < lo - EDGE_EPS || y > hi + EDGE_EPS {
            continue;
        }

        if (y1 - y0).abs() <= EDGE_EPS {
            // horizontal edge, both endpoints bound the span
            extend(x0);
            extend(x1);
        } else {
            let t = ((y.clamp(lo, hi) - y0) / (y1 - y0)).clamp(0.0, 1.0);
            extend(x0 + t * (x1 - x0));
        }
    }

    span
}

/// Fills a closed convex polygon inplace using a scanline rasterizer.
///
/// A pixel `(x, y)` is filled when its integer coordinate lies inside the
/// polygon or on its boundary, so two polygons sharing an edge both cover the
/// pixels on that edge. Vertices are real valued and may lie outside the
/// image, the fill is clipped to the image extent.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `vertices` - The polygon vertices, in order, as `(x, y)`.
/// * `color` - The fill color as an array of `C` elements.
///
/// # Examples
///
/// ```
/// use facemorph_image::{Image, ImageSize};
/// use facemorph_imgproc::draw::fill_convex_poly;
///
/// let mut mask = Image::<f32, 1>::from_size_val(ImageSize { width: 3, height: 3 }, 0.0).unwrap();
/// fill_convex_poly(&mut mask, &[(0.0, 0.0), (2.0, 0.0), (0.0, 2.0)], [1.0]);
///
/// assert_eq!(mask.as_slice(), &[1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
/// ```
pub fn fill_convex_poly<T: Copy, const C: usize>(
    img: &mut Image<T, C>,
    vertices: &[(f32, f32)],
    color: [T; C],
) {
    if vertices.is_empty() || img.size().is_empty() {
        return;
    }

    let y_min = vertices.iter().map(|p| p.1).fold(f32::INFINITY, f32::min);
    let y_max = vertices
        .iter()
        .map(|p| p.1)
        .fold(f32::NEG_INFINITY, f32::max);

    let row_start = ((y_min - EDGE_EPS).ceil() as i64).max(0);
    let row_end = ((y_max + EDGE_EPS).floor() as i64).min(img.rows() as i64 - 1);

    for y in row_start..=row_end {
        let Some((x_lo, x_hi)) = scanline_span(vertices, y as f32) else {
            continue;
        };

        let col_start = ((x_lo - EDGE_EPS).ceil() as i64).max(0);
        let col_end = ((x_hi + EDGE_EPS).floor() as i64).min(img.cols() as i64 - 1);

        for x in col_start..=col_end {
            set_pixel(img, x, y, color);
        }
    }
}

/// Draws a line on an image inplace using a standard Bresenham's line algorithm.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `p0` - The start point of the line as a tuple of (x, y).
/// * `p1` - The end point of the line as a tuple of (x, y).
/// * `color` - The color of the line as an array of `C` elements.
/// * `thickness` - The thickness of the line. (Note: thickness > 1 is approximate).
pub fn draw_line<T: Copy, const C: usize>(
    img: &mut Image<T, C>,
    p0: (i64, i64),
    p1: (i64, i64),
    color: [T; C],
    thickness: usize,
) {
    let (mut x0, mut y0) = p0;
    let (x1, y1) = p1;

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut err = dx - dy;

    let half_thickness = thickness as i64 / 2;

    loop {
        if thickness <= 1 {
            set_pixel(img, x0, y0, color);
        } else {
            // approximate thickness with a small square centered at the point
            for i in -half_thickness..=half_thickness {
                for j in -half_thickness..=half_thickness {
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
    }
}

/// Draws a filled rectangle on an image inplace.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `top_left` - The top-left corner coordinates (x, y), inclusive.
/// * `bottom_right` - The bottom-right corner coordinates (x, y), exclusive.
/// * `color` - The fill color of the rectangle.
pub fn draw_filled_rect<T: Copy, const C: usize>(
    img: &mut Image<T, C>,
    top_left: (i64, i64),
    bottom_right: (i64, i64),
    color: [T; C],
) {
    let (x_start, y_start) = top_left;
    let (x_end, y_end) = bottom_right;

    // clamp coordinates to image bounds
    let x_min = max(0, min(x_start, x_end));
    let y_min = max(0, min(y_start, y_end));
    let x_max = min(img.cols() as i64, max(x_start, x_end));
    let y_max = min(img.rows() as i64, max(y_start, y_end));

    for y in y_min..y_max {
        for x in x_min..x_max {
            set_pixel(img, x, y, color);
        }
    }
}

use facemorph_image::Image;

use crate::interpolation::{interpolate_pixel, BorderMode, InterpolationMode};
use crate::parallel;

/// Smallest absolute determinant accepted when solving for an affine map.
const COLLINEAR_EPS: f64 = 1e-9;

/// Errors raised by the warping routines.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WarpError {
    /// The three source points do not span a triangle.
    #[error("source points are collinear, the affine transform is undefined")]
    CollinearPoints,
}

/// Computes the 2x3 affine transformation mapping three points onto three others.
///
/// The result `m` satisfies `transform_point(src[i], m) == dst[i]` for the
/// three correspondences, up to floating point precision. The system is
/// solved in double precision with Cramer's rule.
///
/// # Arguments
///
/// * `src` - The vertices of the source triangle.
/// * `dst` - The vertices of the destination triangle.
///
/// # Errors
///
/// Returns [`WarpError::CollinearPoints`] if the source triangle has no area.
pub fn get_affine_transform(
    src: &[(f32, f32); 3],
    dst: &[(f32, f32); 3],
) -> Result<[f32; 6], WarpError> {
    let [(x0, y0), (x1, y1), (x2, y2)] = (*src).map(|(x, y)| (x as f64, y as f64));

    let det = x0 * (y1 - y2) - y0 * (x1 - x2) + (x1 * y2 - x2 * y1);
    if !det.is_finite() || det.abs() < COLLINEAR_EPS {
        return Err(WarpError::CollinearPoints);
    }

    // solve [x y 1] * [a b c]^T = r for one output coordinate
    let solve = |r0: f64, r1: f64, r2: f64| -> [f64; 3] {
        let a = r0 * (y1 - y2) - y0 * (r1 - r2) + (r1 * y2 - r2 * y1);
        let b = x0 * (r1 - r2) - r0 * (x1 - x2) + (x1 * r2 - x2 * r1);
        let c = x0 * (y1 * r2 - y2 * r1) - y0 * (x1 * r2 - x2 * r1) + r0 * (x1 * y2 - x2 * y1);
        [a / det, b / det, c / det]
    };

    let [u0, u1, u2] = (*dst).map(|(u, _)| u as f64);
    let [v0, v1, v2] = (*dst).map(|(_, v)| v as f64);

    let [a, b, c] = solve(u0, u1, u2);
    let [d, e, f] = solve(v0, v1, v2);

    Ok([a, b, c, d, e, f].map(|x| x as f32))
}

/// Inverts a 2x3 affine transformation matrix.
///
/// Arguments:
///
/// * `m` - The 2x3 affine transformation matrix.
///
/// Returns:
///
/// The inverted 2x3 affine transformation matrix.
pub fn invert_affine_transform(m: &[f32; 6]) -> [f32; 6] {
    let (a, b, c, d, e, f) = (m[0], m[1], m[2], m[3], m[4], m[5]);

    // follow OpenCV: check for determinant == 0
    // https://github.com/opencv/opencv/blob/4.9.0/modules/imgproc/src/imgwarp.cpp#L2765
    let determinant = a * e - b * d;
    let inv_determinant = if determinant != 0.0 {
        1.0 / determinant
    } else {
        0.0
    };

    let new_a = e * inv_determinant;
    let new_b = -b * inv_determinant;
    let new_d = -d * inv_determinant;
    let new_e = a * inv_determinant;
    let new_c = -(new_a * c + new_b * f);
    let new_f = -(new_d * c + new_e * f);

    [new_a, new_b, new_c, new_d, new_e, new_f]
}

/// Applies an affine transformation to a point.
pub fn transform_point(x: f32, y: f32, m: &[f32; 6]) -> (f32, f32) {
    let u = m[0] * x + m[1] * y + m[2];
    let v = m[3] * x + m[4] * y + m[5];
    (u, v)
}

/// Applies an affine transformation to an image.
///
/// Every destination pixel is mapped back into `src` through the inverse of
/// `m` and sampled there.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (height, width, channels).
/// * `m` - The 2x3 affine transformation matrix from `src` to `dst` coordinates.
/// * `interpolation` - The interpolation mode to use.
/// * `border` - With [`BorderMode::Constant`] destination pixels that map
///   outside `src` are left untouched; with [`BorderMode::Replicate`] they
///   take the value of the closest edge pixel.
///
/// # Example
///
/// ```
/// use facemorph_image::{Image, ImageSize};
/// use facemorph_imgproc::interpolation::{BorderMode, InterpolationMode};
/// use facemorph_imgproc::warp::warp_affine;
///
/// let src = Image::<_, 3>::from_size_val(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     1f32,
/// ).unwrap();
///
/// let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
/// let mut dst = Image::<_, 3>::from_size_val(src.size(), 0.0).unwrap();
///
/// warp_affine(&src, &mut dst, &m, InterpolationMode::Nearest, BorderMode::Constant);
///
/// assert_eq!(dst.as_slice(), src.as_slice());
/// ```
pub fn warp_affine<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    m: &[f32; 6],
    interpolation: InterpolationMode,
    border: BorderMode,
) {
    // invert affine transform matrix to find corresponding positions in src from dst
    let m_inv = invert_affine_transform(m);

    parallel::par_iter_rows_indexed(dst, |x, y, dst_pixel| {
        let (u, v) = transform_point(x as f32, y as f32, &m_inv);
        if let Some(px) = interpolate_pixel(src, u, v, interpolation, border) {
            dst_pixel.copy_from_slice(&px);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::{get_affine_transform, invert_affine_transform, transform_point, WarpError};
    use crate::interpolation::{BorderMode, InterpolationMode};
    use approx::assert_relative_eq;
    use facemorph_image::{Image, ImageError, ImageSize};
    use rand::Rng;

    #[test]
    fn warp_affine_smoke_ch3() -> Result<(), ImageError> {
        let image = Image::<_, 3>::new(
            ImageSize {
                width: 4,
                height: 5,
            },
            vec![0f32; 4 * 5 * 3],
        )?;

        let new_size = ImageSize {
            width: 2,
            height: 3,
        };

        let mut image_transformed = Image::<_, 3>::from_size_val(new_size, 0.0)?;

        super::warp_affine(
            &image,
            &mut image_transformed,
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            InterpolationMode::Bilinear,
            BorderMode::Constant,
        );

        assert_eq!(image_transformed.num_channels(), 3);
        assert_eq!(image_transformed.size().width, 2);
        assert_eq!(image_transformed.size().height, 3);

        Ok(())
    }

    #[test]
    fn warp_affine_correctness_identity() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 4,
                height: 5,
            },
            (0..20).map(|x| x as f32).collect(),
        )?;

        let mut image_transformed = Image::<_, 1>::from_size_val(image.size(), 0.0)?;

        super::warp_affine(
            &image,
            &mut image_transformed,
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            InterpolationMode::Bilinear,
            BorderMode::Replicate,
        );

        assert_eq!(image_transformed.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn warp_affine_translation_constant_border() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 3,
                height: 1,
            },
            vec![1.0f32, 2.0, 3.0],
        )?;

        let mut image_transformed = Image::<_, 1>::from_size_val(image.size(), -1.0)?;

        // shift one pixel to the right
        super::warp_affine(
            &image,
            &mut image_transformed,
            &[1.0, 0.0, 1.0, 0.0, 1.0, 0.0],
            InterpolationMode::Nearest,
            BorderMode::Constant,
        );

        assert_eq!(image_transformed.as_slice(), &[-1.0, 1.0, 2.0]);

        Ok(())
    }

    #[test]
    fn warp_affine_translation_replicate_border() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 3,
                height: 1,
            },
            vec![1.0f32, 2.0, 3.0],
        )?;

        let mut image_transformed = Image::<_, 1>::from_size_val(image.size(), -1.0)?;

        super::warp_affine(
            &image,
            &mut image_transformed,
            &[1.0, 0.0, 2.0, 0.0, 1.0, 0.0],
            InterpolationMode::Bilinear,
            BorderMode::Replicate,
        );

        assert_eq!(image_transformed.as_slice(), &[1.0, 1.0, 1.0]);

        Ok(())
    }

    #[test]
    fn affine_transform_maps_vertices_exactly() -> Result<(), WarpError> {
        let mut rng = rand::rng();

        for _ in 0..100 {
            let mut point = || {
                (
                    rng.random_range(-50.0f32..150.0),
                    rng.random_range(-50.0f32..150.0),
                )
            };
            let src = [point(), point(), point()];
            let dst = [point(), point(), point()];

            // random triangles may be close to degenerate, those are rejected
            let area: f32 = (src[1].0 - src[0].0) * (src[2].1 - src[0].1)
                - (src[2].0 - src[0].0) * (src[1].1 - src[0].1);
            if area.abs() < 500.0 {
                continue;
            }

            let m = get_affine_transform(&src, &dst)?;
            for (s, d) in src.iter().zip(dst.iter()) {
                let (u, v) = transform_point(s.0, s.1, &m);
                assert_relative_eq!(u, d.0, epsilon = 1e-3);
                assert_relative_eq!(v, d.1, epsilon = 1e-3);
            }
        }

        Ok(())
    }

    #[test]
    fn affine_transform_collinear() {
        let src = [(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)];
        let dst = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)];
        assert_eq!(
            get_affine_transform(&src, &dst),
            Err(WarpError::CollinearPoints)
        );

        let repeated = [(3.0, 4.0), (3.0, 4.0), (5.0, 1.0)];
        assert_eq!(
            get_affine_transform(&repeated, &dst),
            Err(WarpError::CollinearPoints)
        );
    }

    #[test]
    fn invert_affine_round_trip() -> Result<(), WarpError> {
        let src = [(0.0, 0.0), (4.0, 1.0), (1.0, 3.0)];
        let dst = [(2.0, 2.0), (9.0, 0.5), (3.0, 8.0)];
        let m = get_affine_transform(&src, &dst)?;
        let m_inv = invert_affine_transform(&m);

        let (u, v) = transform_point(2.5, 1.5, &m);
        let (x, y) = transform_point(u, v, &m_inv);
        assert_relative_eq!(x, 2.5, epsilon = 1e-4);
        assert_relative_eq!(y, 1.5, epsilon = 1e-4);

        Ok(())
    }
}

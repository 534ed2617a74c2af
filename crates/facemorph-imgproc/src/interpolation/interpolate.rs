use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use facemorph_image::Image;

/// Interpolation mode for the resampling operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    #[default]
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
}

/// How samples falling outside the source image are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum BorderMode {
    /// Out of bounds samples produce no value.
    ///
    /// Example: ...d c b a | - - - -...
    Constant,

    /// The outermost row or column of pixels is repeated.
    ///
    /// Example: ...d c b a | a a a a...
    #[default]
    Replicate,
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use.
/// * `border` - The policy for coordinates outside the image.
///
/// # Returns
///
/// The interpolated pixel value, or `None` when the coordinate falls outside
/// the image with [`BorderMode::Constant`] or the image is empty.
pub fn interpolate_pixel<const C: usize>(
    image: &Image<f32, C>,
    u: f32,
    v: f32,
    interpolation: InterpolationMode,
    border: BorderMode,
) -> Option<[f32; C]> {
    if image.size().is_empty() || !u.is_finite() || !v.is_finite() {
        return None;
    }

    let (cols, rows) = (image.cols() as f32, image.rows() as f32);

    let (u, v) = match border {
        BorderMode::Constant => {
            if u < 0.0 || u >= cols || v < 0.0 || v >= rows {
                return None;
            }
            (u, v)
        }
        BorderMode::Replicate => (u.clamp(0.0, cols - 1.0), v.clamp(0.0, rows - 1.0)),
    };

    Some(match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v),
    })
}

#[cfg(test)]
mod tests {
    use super::{interpolate_pixel, BorderMode, InterpolationMode};
    use approx::assert_relative_eq;
    use facemorph_image::{Image, ImageError};

    fn ramp() -> Result<Image<f32, 1>, ImageError> {
        // 3x2 horizontal ramp
        Image::new([3, 2].into(), vec![0.0, 10.0, 20.0, 0.0, 10.0, 20.0])
    }

    #[test]
    fn bilinear_midpoint() -> Result<(), ImageError> {
        let image = ramp()?;
        let px = interpolate_pixel(
            &image,
            0.5,
            0.5,
            InterpolationMode::Bilinear,
            BorderMode::Constant,
        );
        assert_relative_eq!(px.map_or(f32::NAN, |p| p[0]), 5.0);
        Ok(())
    }

    #[test]
    fn bilinear_on_grid_is_exact() -> Result<(), ImageError> {
        let image = Image::<f32, 3>::new(
            [2, 2].into(),
            vec![1., 2., 3., 4., 5., 6., 7., 8., 9., 10., 11., 12.],
        )?;
        let px = interpolate_pixel(
            &image,
            1.0,
            1.0,
            InterpolationMode::Bilinear,
            BorderMode::Replicate,
        );
        assert_eq!(px, Some([10., 11., 12.]));
        Ok(())
    }

    #[test]
    fn constant_border_rejects_outside() -> Result<(), ImageError> {
        let image = ramp()?;
        for (u, v) in [(-0.5, 0.0), (3.0, 0.0), (0.0, 2.5)] {
            assert_eq!(
                interpolate_pixel(
                    &image,
                    u,
                    v,
                    InterpolationMode::Bilinear,
                    BorderMode::Constant
                ),
                None
            );
        }
        Ok(())
    }

    #[test]
    fn replicate_border_clamps() -> Result<(), ImageError> {
        let image = ramp()?;
        let left = interpolate_pixel(
            &image,
            -4.0,
            0.3,
            InterpolationMode::Bilinear,
            BorderMode::Replicate,
        );
        let right = interpolate_pixel(
            &image,
            7.5,
            -2.0,
            InterpolationMode::Nearest,
            BorderMode::Replicate,
        );
        assert_eq!(left, Some([0.0]));
        assert_eq!(right, Some([20.0]));
        Ok(())
    }

    #[test]
    fn nearest_rounds() -> Result<(), ImageError> {
        let image = ramp()?;
        let px = interpolate_pixel(
            &image,
            1.6,
            0.2,
            InterpolationMode::Nearest,
            BorderMode::Constant,
        );
        assert_eq!(px, Some([20.0]));
        Ok(())
    }

    #[test]
    fn empty_image_has_no_samples() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new([0, 0].into(), vec![])?;
        assert_eq!(
            interpolate_pixel(
                &image,
                0.0,
                0.0,
                InterpolationMode::Bilinear,
                BorderMode::Replicate
            ),
            None
        );
        Ok(())
    }
}

use facemorph_image::{Image, ImageSize};
use facemorph_imgproc::{
    crop::{crop_rect, Rect},
    draw::fill_convex_poly,
    interpolation::{BorderMode, InterpolationMode},
    warp::{get_affine_transform, warp_affine},
};

use crate::error::MorphError;
use crate::mesh::TriangleIndex;
use crate::point::{signed_area2, PointSet};

/// The contribution of one triangle to the output canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct TrianglePatch<const C: usize> {
    /// Region of the canvas covered by the patch, inside the canvas.
    pub rect: Rect,
    /// Per pixel weight of the patch, 1 inside the triangle and 0 outside.
    pub mask: Image<f32, 1>,
    /// The blended pixels, the size of `rect`.
    pub pixels: Image<f32, C>,
}

/// Warps and blends single triangles of the mesh.
///
/// Holds the read-only inputs shared by every triangle of one frame, so
/// triangles can be rendered independently and concurrently.
pub struct TriangleRenderer<'a, const C: usize> {
    /// The first source image.
    pub image_a: &'a Image<f32, C>,
    /// The second source image, same size as `image_a`.
    pub image_b: &'a Image<f32, C>,
    /// Points of the first image.
    pub points_a: &'a PointSet,
    /// Points of the second image.
    pub points_b: &'a PointSet,
    /// Blended points of the output image.
    pub points_out: &'a PointSet,
    /// Blend factor in `[0, 1]`.
    pub alpha: f32,
    /// Sampling used when warping the sources.
    pub interpolation: InterpolationMode,
    /// Policy for samples outside the source crops.
    pub border: BorderMode,
    /// Triangles with a smaller area in any frame are skipped.
    pub min_triangle_area: f32,
}

/// Vertices relative to the origin of `rect`.
fn to_local(t: &[(f32, f32); 3], rect: &Rect) -> [(f32, f32); 3] {
    let (ox, oy) = (rect.x as f32, rect.y as f32);
    t.map(|(x, y)| (x - ox, y - oy))
}

impl<const C: usize> TriangleRenderer<'_, C> {
    /// Render one triangle into a patch.
    ///
    /// Returns `Ok(None)` when the triangle is degenerate in any of the three
    /// frames or falls entirely outside the image; such a triangle leaves no
    /// trace on the canvas.
    ///
    /// # Errors
    ///
    /// Fails if the images differ in size, the point sets differ in length or
    /// the triangle addresses a point out of range.
    pub fn render(&self, triangle: &TriangleIndex) -> Result<Option<TrianglePatch<C>>, MorphError> {
        self.check_inputs()?;

        let num_points = self.points_a.len();
        let vertices = |points: &PointSet| {
            points
                .triangle(triangle)
                .ok_or(MorphError::InvalidTriangleIndex(triangle.0, num_points))
        };
        let t_a = vertices(self.points_a)?;
        let t_b = vertices(self.points_b)?;
        let t_o = vertices(self.points_out)?;

        if [&t_a, &t_b, &t_o].iter().any(|t| {
            let area = 0.5 * signed_area2(t).abs();
            area.is_nan() || area < self.min_triangle_area
        }) {
            log::debug!("skipping degenerate triangle {:?}", triangle.0);
            return Ok(None);
        }

        let size: ImageSize = self.image_a.size();
        let r_o = Rect::bounding(&t_o).clip_to(size);
        let r_a = Rect::bounding(&t_a).clip_to(size);
        let r_b = Rect::bounding(&t_b).clip_to(size);

        if r_o.is_empty() || r_a.is_empty() || r_b.is_empty() {
            log::debug!("skipping triangle {:?} outside the image", triangle.0);
            return Ok(None);
        }

        let t_o_local = to_local(&t_o, &r_o);

        let mut mask = Image::from_size_val(r_o.size(), 0.0f32)?;
        fill_convex_poly(&mut mask, &t_o_local, [1.0]);

        let Some(warped_a) = self.warp_patch(self.image_a, &t_a, &r_a, &t_o_local, &r_o)? else {
            return Ok(None);
        };
        let Some(warped_b) = self.warp_patch(self.image_b, &t_b, &r_b, &t_o_local, &r_o)? else {
            return Ok(None);
        };

        let alpha = self.alpha;
        let blended = warped_a
            .as_slice()
            .iter()
            .zip(warped_b.as_slice())
            .map(|(&a, &b)| (1.0 - alpha) * a + alpha * b)
            .collect();

        Ok(Some(TrianglePatch {
            rect: r_o,
            mask,
            pixels: Image::new(r_o.size(), blended)?,
        }))
    }

    fn check_inputs(&self) -> Result<(), MorphError> {
        if self.image_a.size() != self.image_b.size() {
            return Err(MorphError::ImageSizeMismatch(
                self.image_a.size(),
                self.image_b.size(),
            ));
        }

        let n = self.points_a.len();
        for other in [self.points_b, self.points_out] {
            if other.len() != n {
                return Err(MorphError::PointSetLengthMismatch(n, other.len()));
            }
        }

        Ok(())
    }

    /// Crop `src` to `src_rect` and warp the crop onto the output rectangle.
    fn warp_patch(
        &self,
        src: &Image<f32, C>,
        t_src: &[(f32, f32); 3],
        src_rect: &Rect,
        t_dst_local: &[(f32, f32); 3],
        dst_rect: &Rect,
    ) -> Result<Option<Image<f32, C>>, MorphError> {
        let t_src_local = to_local(t_src, src_rect);

        let m = match get_affine_transform(&t_src_local, t_dst_local) {
            Ok(m) => m,
            Err(err) => {
                log::debug!("skipping triangle: {err}");
                return Ok(None);
            }
        };

        let crop = crop_rect(src, src_rect)?;
        let mut warped = Image::from_size_val(dst_rect.size(), 0.0f32)?;
        warp_affine(&crop, &mut warped, &m, self.interpolation, self.border);

        Ok(Some(warped))
    }
}

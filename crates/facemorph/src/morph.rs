use facemorph_image::{Image, ImageDtype, ImageError};
use facemorph_imgproc::{
    interpolation::{BorderMode, InterpolationMode},
    parallel::{self, ExecutionStrategy},
};
use rayon::prelude::*;

use crate::canvas::Canvas;
use crate::error::MorphError;
use crate::interpolate::interpolate_points;
use crate::landmarks::{RawTriangle, Triangulator};
use crate::mesh::CorrespondenceMesh;
use crate::point::PointSet;
use crate::render::TriangleRenderer;

/// Parameters of the morphing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MorphConfig {
    /// Sampling used when warping the source triangles.
    pub interpolation: InterpolationMode,
    /// Policy for samples falling outside a source crop.
    pub border: BorderMode,
    /// How the triangles of a frame are scheduled.
    pub strategy: ExecutionStrategy,
    /// Triangles with a smaller area, in pixels, in any frame are skipped.
    pub min_triangle_area: f32,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            interpolation: InterpolationMode::Bilinear,
            border: BorderMode::Replicate,
            strategy: ExecutionStrategy::Serial,
            min_triangle_area: 1e-3,
        }
    }
}

/// Summary of how much of the mesh made it to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphStatus {
    /// Every triangle was rendered.
    Complete,
    /// Some degenerate triangles were skipped.
    Partial {
        /// Number of skipped triangles.
        skipped: usize,
    },
    /// Nothing was rendered, the output is the blank canvas.
    NoRenderableTriangles,
}

/// A rendered frame.
#[derive(Debug, Clone)]
pub struct MorphOutput<const C: usize> {
    /// The blended image, in the working range of the sources.
    pub image: Image<f32, C>,
    /// Number of triangles written to the image.
    pub rendered: usize,
    /// Number of degenerate triangles skipped.
    pub skipped: usize,
}

impl<const C: usize> MorphOutput<C> {
    /// How much of the mesh was rendered.
    pub fn status(&self) -> MorphStatus {
        match (self.rendered, self.skipped) {
            (0, _) => MorphStatus::NoRenderableTriangles,
            (_, 0) => MorphStatus::Complete,
            (_, skipped) => MorphStatus::Partial { skipped },
        }
    }

    /// Round and saturate the image to 8 bits.
    pub fn to_u8(&self) -> Result<Image<u8, C>, ImageError> {
        let data = self
            .image
            .as_slice()
            .iter()
            .map(|&v| u8::from_f32(v))
            .collect();
        Image::new(self.image.size(), data)
    }
}

/// Two images, their landmarks and the mesh shared by both.
///
/// The session validates its inputs once and can then render any number of
/// frames; the mesh is never rebuilt.
#[derive(Debug, Clone)]
pub struct MorphSession<const C: usize> {
    image_a: Image<f32, C>,
    image_b: Image<f32, C>,
    points_a: PointSet,
    points_b: PointSet,
    mesh: CorrespondenceMesh,
}

impl<const C: usize> MorphSession<C> {
    /// Create a session from a triangulation of `points_a`.
    ///
    /// # Arguments
    ///
    /// * `image_a` - The first image.
    /// * `points_a` - Points of the first image.
    /// * `image_b` - The second image, same size as `image_a`.
    /// * `points_b` - Points of the second image, index aligned with `points_a`.
    /// * `triangles` - Triangulation of `points_a`, by coordinates.
    ///
    /// # Errors
    ///
    /// Fails if the images differ in size, the point sets differ in length
    /// or a triangle vertex is not a point of `points_a`.
    pub fn new(
        image_a: Image<f32, C>,
        points_a: PointSet,
        image_b: Image<f32, C>,
        points_b: PointSet,
        triangles: &[RawTriangle],
    ) -> Result<Self, MorphError> {
        let mesh = CorrespondenceMesh::from_triangulation(&points_a, triangles, image_a.size())?;
        Self::from_mesh(image_a, points_a, image_b, points_b, mesh)
    }

    /// Create a session, triangulating `points_a` with `triangulator`.
    pub fn with_triangulator<T: Triangulator + ?Sized>(
        image_a: Image<f32, C>,
        points_a: PointSet,
        image_b: Image<f32, C>,
        points_b: PointSet,
        triangulator: &T,
    ) -> Result<Self, MorphError> {
        let triangles = triangulator.triangulate(&points_a, image_a.size());
        Self::new(image_a, points_a, image_b, points_b, &triangles)
    }

    /// Create a session from an existing mesh.
    pub fn from_mesh(
        image_a: Image<f32, C>,
        points_a: PointSet,
        image_b: Image<f32, C>,
        points_b: PointSet,
        mesh: CorrespondenceMesh,
    ) -> Result<Self, MorphError> {
        if image_a.size() != image_b.size() {
            return Err(MorphError::ImageSizeMismatch(
                image_a.size(),
                image_b.size(),
            ));
        }

        if points_a.len() != points_b.len() {
            return Err(MorphError::PointSetLengthMismatch(
                points_a.len(),
                points_b.len(),
            ));
        }

        mesh.check_point_set(&points_a)?;

        log::debug!(
            "morph session: {} points, {} triangles, {}",
            points_a.len(),
            mesh.len(),
            image_a.size()
        );

        Ok(Self {
            image_a,
            image_b,
            points_a,
            points_b,
            mesh,
        })
    }

    /// The mesh shared by both images and every rendered frame.
    pub fn mesh(&self) -> &CorrespondenceMesh {
        &self.mesh
    }

    /// Points of the first image.
    pub fn points_a(&self) -> &PointSet {
        &self.points_a
    }

    /// Points of the second image.
    pub fn points_b(&self) -> &PointSet {
        &self.points_b
    }

    /// Render the frame at blend factor `alpha`.
    ///
    /// `alpha = 0` reproduces the first image and `alpha = 1` the second,
    /// within sampling precision, over the area covered by the mesh.
    /// Pixels outside every triangle stay at zero.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidAlpha`] if `alpha` is not in `[0, 1]`.
    pub fn morph(&self, alpha: f32, config: &MorphConfig) -> Result<MorphOutput<C>, MorphError> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(MorphError::InvalidAlpha(alpha));
        }

        let points_out = interpolate_points(&self.points_a, &self.points_b, alpha)?;

        let renderer = TriangleRenderer {
            image_a: &self.image_a,
            image_b: &self.image_b,
            points_a: &self.points_a,
            points_b: &self.points_b,
            points_out: &points_out,
            alpha,
            interpolation: config.interpolation,
            border: config.border,
            min_triangle_area: config.min_triangle_area,
        };

        // every triangle renders into its own patch, patches are merged in mesh order
        let patches = parallel::map_with_strategy(self.mesh.triangles(), config.strategy, |t| {
            renderer.render(t)
        });

        let mut canvas = Canvas::new(self.image_a.size())?;
        let (mut rendered, mut skipped) = (0, 0);

        for patch in patches {
            match patch? {
                Some(patch) => {
                    canvas.composite(&patch);
                    rendered += 1;
                }
                None => skipped += 1,
            }
        }

        if rendered == 0 {
            log::warn!(
                "no renderable triangles at alpha {alpha}: {} in mesh, output left blank",
                self.mesh.len()
            );
        } else if skipped > 0 {
            log::debug!("alpha {alpha}: {rendered} triangles rendered, {skipped} skipped");
        }

        Ok(MorphOutput {
            image: canvas.into_image(),
            rendered,
            skipped,
        })
    }

    /// Render one frame per blend factor, concurrently.
    ///
    /// Frames are independent and returned in the order of `alphas`.
    pub fn morph_sequence(
        &self,
        alphas: &[f32],
        config: &MorphConfig,
    ) -> Result<Vec<MorphOutput<C>>, MorphError> {
        alphas
            .par_iter()
            .map(|&alpha| self.morph(alpha, config))
            .collect()
    }
}

/// `n` blend factors evenly spaced over `[0, 1]`, both ends included.
pub fn blend_steps(n: usize) -> Vec<f32> {
    match n {
        0 => vec![],
        1 => vec![0.0],
        _ => (0..n).map(|i| i as f32 / (n - 1) as f32).collect(),
    }
}

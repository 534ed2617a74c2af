//! Contracts for the external landmark detector and triangulator, and the
//! construction of the point sets fed to the morphing engine.

use facemorph_image::{Image, ImageSize};

use crate::error::MorphError;
use crate::point::{Point2, PointSet};

/// Number of anchor points appended to every landmark set.
pub const NUM_BORDER_ANCHORS: usize = 8;

/// A triangle given by the coordinates of its vertices.
pub type RawTriangle = [Point2; 3];

/// Detects an ordered list of landmark points in an image.
///
/// Implementations must be index stable: the point at position `i` denotes
/// the same feature on every call and for every image.
pub trait LandmarkDetector {
    /// The error reported when detection fails.
    type Error: std::error::Error;

    /// Detect the landmarks of `image`. An empty list means nothing was found.
    fn detect(&self, image: &Image<u8, 3>) -> Result<Vec<Point2>, Self::Error>;
}

/// Triangulates a point set.
///
/// The result is an unordered collection of triangles whose vertices are
/// points of the set, given by coordinates. Triangles touching auxiliary
/// vertices outside `bounds` may be returned, they are discarded when the
/// correspondence mesh is built.
pub trait Triangulator {
    /// Triangulate `points`, which lie inside an image of size `bounds`.
    fn triangulate(&self, points: &PointSet, bounds: ImageSize) -> Vec<RawTriangle>;
}

impl<F> Triangulator for F
where
    F: Fn(&PointSet, ImageSize) -> Vec<RawTriangle>,
{
    fn triangulate(&self, points: &PointSet, bounds: ImageSize) -> Vec<RawTriangle> {
        self(points, bounds)
    }
}

/// The anchor points pinning a mesh to the frame of an image.
///
/// The four corners and the four edge midpoints, midpoints rounded down:
/// top-left, top-middle, top-right, middle-left, middle-right, bottom-left,
/// bottom-middle and bottom-right.
pub fn border_anchors(size: ImageSize) -> [Point2; NUM_BORDER_ANCHORS] {
    let right = size.width.saturating_sub(1) as f32;
    let bottom = size.height.saturating_sub(1) as f32;
    let mid_x = (size.width / 2) as f32;
    let mid_y = (size.height / 2) as f32;

    [
        Point2::new(0.0, 0.0),
        Point2::new(mid_x, 0.0),
        Point2::new(right, 0.0),
        Point2::new(0.0, mid_y),
        Point2::new(right, mid_y),
        Point2::new(0.0, bottom),
        Point2::new(mid_x, bottom),
        Point2::new(right, bottom),
    ]
}

impl PointSet {
    /// Build the point set of an image from its detected landmarks.
    ///
    /// The landmarks keep their order and are followed by the
    /// [`border_anchors`] of the image.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::NoLandmarks`] if `landmarks` is empty. An image
    /// without landmarks cannot be morphed meaningfully.
    pub fn from_landmarks(landmarks: &[Point2], size: ImageSize) -> Result<Self, MorphError> {
        if landmarks.is_empty() {
            return Err(MorphError::NoLandmarks(size.to_string()));
        }

        let mut points = Vec::with_capacity(landmarks.len() + NUM_BORDER_ANCHORS);
        points.extend_from_slice(landmarks);
        points.extend_from_slice(&border_anchors(size));

        Ok(Self::new(points))
    }
}

/// Run a detector on an image and build its point set.
///
/// # Arguments
///
/// * `detector` - The landmark detector.
/// * `image` - The image to analyse.
/// * `label` - A name for the image, used in error messages.
pub fn detect_point_set<D: LandmarkDetector>(
    detector: &D,
    image: &Image<u8, 3>,
    label: &str,
) -> Result<PointSet, MorphError> {
    let landmarks = detector
        .detect(image)
        .map_err(|e| MorphError::Detector(e.to_string()))?;

    log::debug!("{label}: {} landmarks detected", landmarks.len());

    if landmarks.is_empty() {
        return Err(MorphError::NoLandmarks(label.to_string()));
    }

    PointSet::from_landmarks(&landmarks, image.size())
}

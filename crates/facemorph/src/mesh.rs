use std::collections::HashMap;

use facemorph_image::ImageSize;
use facemorph_imgproc::crop::Rect;

use crate::error::MorphError;
use crate::landmarks::RawTriangle;
use crate::point::{Point2, PointSet};

/// Three distinct indices into a point set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TriangleIndex(pub [usize; 3]);

/// Triangles given by point indices, shared by index aligned point sets.
///
/// The mesh is built once from the triangulation of one point set and is
/// valid for every point set with the same number of points: the source
/// images' and the interpolated one alike.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct CorrespondenceMesh {
    triangles: Vec<TriangleIndex>,
    num_points: usize,
}

/// Exact lookup key of a coordinate. `-0.0` and `0.0` share a key.
fn point_key(p: &Point2) -> (u32, u32) {
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

impl CorrespondenceMesh {
    /// Build a mesh from the triangulation of `points`.
    ///
    /// Triangles with a vertex outside the image frame `bounds` are
    /// discarded, those come from the auxiliary vertices of the triangulator.
    /// Every remaining vertex is resolved to the index of the point with the
    /// exact same coordinates. When several points share coordinates any of
    /// them may be picked, and triangles that collapse onto fewer than three
    /// distinct indices are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::UnmatchedVertex`] if a vertex inside the frame is
    /// not a point of `points`, the triangulation was not built from them.
    ///
    /// # Examples
    ///
    /// ```
    /// use facemorph::image::ImageSize;
    /// use facemorph::{CorrespondenceMesh, Point2, PointSet, TriangleIndex};
    ///
    /// let points = PointSet::new(vec![
    ///     Point2::new(0.0, 0.0),
    ///     Point2::new(9.0, 0.0),
    ///     Point2::new(0.0, 9.0),
    /// ]);
    /// let triangles = [[points[2], points[0], points[1]]];
    /// let mesh = CorrespondenceMesh::from_triangulation(
    ///     &points,
    ///     &triangles,
    ///     ImageSize { width: 10, height: 10 },
    /// ).unwrap();
    ///
    /// assert_eq!(mesh.triangles(), &[TriangleIndex([2, 0, 1])]);
    /// ```
    pub fn from_triangulation(
        points: &PointSet,
        triangles: &[RawTriangle],
        bounds: ImageSize,
    ) -> Result<Self, MorphError> {
        let frame = Rect {
            x: 0,
            y: 0,
            width: bounds.width,
            height: bounds.height,
        };

        let mut lookup: HashMap<(u32, u32), usize> = HashMap::with_capacity(points.len());
        for (i, p) in points.iter().enumerate() {
            lookup.entry(point_key(p)).or_insert(i);
        }

        let mut mesh = Vec::with_capacity(triangles.len());
        let mut outside = 0;
        let mut collapsed = 0;

        for triangle in triangles {
            if !triangle.iter().all(|p| frame.contains(p.x, p.y)) {
                outside += 1;
                continue;
            }

            let mut idx = [0usize; 3];
            for (slot, p) in idx.iter_mut().zip(triangle.iter()) {
                *slot = *lookup
                    .get(&point_key(p))
                    .ok_or(MorphError::UnmatchedVertex(p.x, p.y))?;
            }

            if idx[0] == idx[1] || idx[1] == idx[2] || idx[0] == idx[2] {
                collapsed += 1;
                continue;
            }

            mesh.push(TriangleIndex(idx));
        }

        log::debug!(
            "correspondence mesh: {} triangles kept, {} outside the frame, {} collapsed",
            mesh.len(),
            outside,
            collapsed
        );

        Ok(Self {
            triangles: mesh,
            num_points: points.len(),
        })
    }

    /// Build a mesh from index triangles directly.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidTriangleIndex`] if an index is not below
    /// `num_points` or a triangle repeats an index.
    pub fn from_indices(
        triangles: Vec<TriangleIndex>,
        num_points: usize,
    ) -> Result<Self, MorphError> {
        for &TriangleIndex(idx) in &triangles {
            let [i, j, k] = idx;
            if i.max(j).max(k) >= num_points || i == j || j == k || i == k {
                return Err(MorphError::InvalidTriangleIndex(idx, num_points));
            }
        }

        Ok(Self {
            triangles,
            num_points,
        })
    }

    /// The triangles, in triangulation order.
    pub fn triangles(&self) -> &[TriangleIndex] {
        &self.triangles
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no triangle.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Number of points of the point sets this mesh applies to.
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Check that `points` can be addressed by this mesh.
    pub fn check_point_set(&self, points: &PointSet) -> Result<(), MorphError> {
        if points.len() != self.num_points {
            return Err(MorphError::MeshCardinalityMismatch(
                self.num_points,
                points.len(),
            ));
        }
        Ok(())
    }
}

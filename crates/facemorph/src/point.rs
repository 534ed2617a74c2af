use crate::mesh::TriangleIndex;

/// A 2D point in image coordinates, `x` along the columns and `y` along the rows.
#[derive(Clone, Copy, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Point2 {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point2 {
    /// Create a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<Point2> for (f32, f32) {
    fn from(p: Point2) -> Self {
        (p.x, p.y)
    }
}

/// An ordered sequence of points.
///
/// The position of a point is its identity: index `i` denotes the same
/// feature in every point set that is index aligned with this one.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PointSet {
    points: Vec<Point2>,
}

impl PointSet {
    /// Create a point set from an ordered list of points.
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Number of points in the set.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the set has no point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get the point at `index`.
    pub fn get(&self, index: usize) -> Option<&Point2> {
        self.points.get(index)
    }

    /// The points, in order.
    pub fn as_slice(&self) -> &[Point2] {
        &self.points
    }

    /// Iterate over the points, in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point2> {
        self.points.iter()
    }

    /// The three vertices addressed by a triangle, as `(x, y)` tuples.
    ///
    /// Returns `None` if an index of the triangle is out of range.
    pub fn triangle(&self, triangle: &TriangleIndex) -> Option<[(f32, f32); 3]> {
        let [i, j, k] = triangle.0;
        Some([
            (*self.get(i)?).into(),
            (*self.get(j)?).into(),
            (*self.get(k)?).into(),
        ])
    }
}

impl From<Vec<Point2>> for PointSet {
    fn from(points: Vec<Point2>) -> Self {
        Self::new(points)
    }
}

impl std::ops::Index<usize> for PointSet {
    type Output = Point2;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point2;
    type IntoIter = std::slice::Iter<'a, Point2>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Twice the signed area of a triangle, positive for counter-clockwise
/// vertices in a y-up frame.
pub(crate) fn signed_area2(t: &[(f32, f32); 3]) -> f32 {
    let [(x0, y0), (x1, y1), (x2, y2)] = *t;
    (x1 - x0) * (y2 - y0) - (x2 - x0) * (y1 - y0)
}

//! Debug overlays of point sets and meshes.

use facemorph_image::Image;
use facemorph_imgproc::draw::{draw_filled_rect, draw_line};

use crate::mesh::CorrespondenceMesh;
use crate::point::{Point2, PointSet};

fn to_pixel(p: &Point2) -> (i64, i64) {
    (p.x.round() as i64, p.y.round() as i64)
}

/// Draw every point as a 3x3 dot centered on its rounded coordinates.
pub fn draw_landmarks<T: Copy, const C: usize>(
    img: &mut Image<T, C>,
    points: &PointSet,
    color: [T; C],
) {
    for p in points {
        let (x, y) = to_pixel(p);
        draw_filled_rect(img, (x - 1, y - 1), (x + 2, y + 2), color);
    }
}

/// Draw the edges of every triangle of `mesh` laid over `points`.
///
/// Shared edges are drawn once per triangle.
pub fn draw_mesh<T: Copy, const C: usize>(
    img: &mut Image<T, C>,
    points: &PointSet,
    mesh: &CorrespondenceMesh,
    color: [T; C],
) {
    for triangle in mesh.triangles() {
        let [i, j, k] = triangle.0;
        for (a, b) in [(i, j), (j, k), (k, i)] {
            if let (Some(pa), Some(pb)) = (points.get(a), points.get(b)) {
                draw_line(img, to_pixel(pa), to_pixel(pb), color, 1);
            }
        }
    }
}

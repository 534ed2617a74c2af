#![allow(dead_code)]

use facemorph::image::{Image, ImageSize};
use facemorph::{LandmarkDetector, Point2, PointSet, RawTriangle};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Bowyer-Watson Delaunay triangulation.
///
/// Triangles touching the auxiliary super triangle are returned as well, with
/// vertices far outside the image, like a subdivision based triangulator does.
pub fn delaunay(points: &PointSet, _bounds: ImageSize) -> Vec<RawTriangle> {
    let mut vertices: Vec<(f64, f64)> = points.iter().map(|p| (p.x as f64, p.y as f64)).collect();
    let n = vertices.len();
    if n == 0 {
        return vec![];
    }

    let (mut min_x, mut min_y) = (f64::MAX, f64::MAX);
    let (mut max_x, mut max_y) = (f64::MIN, f64::MIN);
    for &(x, y) in &vertices {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    let d = 20.0 * (max_x - min_x).max(max_y - min_y).max(1.0);
    let (mid_x, mid_y) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);

    vertices.push((mid_x - 2.0 * d, mid_y - d));
    vertices.push((mid_x + 2.0 * d, mid_y - d));
    vertices.push((mid_x, mid_y + 2.0 * d));

    let mut triangles: Vec<[usize; 3]> = vec![[n, n + 1, n + 2]];

    for i in 0..n {
        let p = vertices[i];
        if vertices[..i].contains(&p) {
            continue;
        }

        let (bad, good): (Vec<[usize; 3]>, Vec<[usize; 3]>) = triangles
            .into_iter()
            .partition(|t| in_circumcircle(&vertices, t, p));

        // edges of the cavity are the ones not shared by two bad triangles
        let mut boundary: Vec<(usize, usize)> = Vec::new();
        for t in &bad {
            for (a, b) in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
                let shared = bad.iter().filter(|o| o.contains(&a) && o.contains(&b)).count();
                if shared == 1 {
                    boundary.push((a, b));
                }
            }
        }

        triangles = good;
        triangles.extend(boundary.into_iter().map(|(a, b)| [a, b, i]));
    }

    triangles
        .into_iter()
        .map(|t| t.map(|v| Point2::new(vertices[v].0 as f32, vertices[v].1 as f32)))
        .collect()
}

fn in_circumcircle(vertices: &[(f64, f64)], t: &[usize; 3], p: (f64, f64)) -> bool {
    let [a, b, c] = t.map(|v| vertices[v]);
    let (ax, ay) = (a.0 - p.0, a.1 - p.1);
    let (bx, by) = (b.0 - p.0, b.1 - p.1);
    let (cx, cy) = (c.0 - p.0, c.1 - p.1);

    let det = (ax * ax + ay * ay) * (bx * cy - cx * by) - (bx * bx + by * by) * (ax * cy - cx * ay)
        + (cx * cx + cy * cy) * (ax * by - bx * ay);
    let orientation = (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0);

    if orientation > 0.0 {
        det > 0.0
    } else {
        det < 0.0
    }
}

/// A detector returning the same landmarks for every image.
pub struct FixedDetector(pub Vec<Point2>);

impl LandmarkDetector for FixedDetector {
    type Error = std::convert::Infallible;

    fn detect(&self, _image: &Image<u8, 3>) -> Result<Vec<Point2>, Self::Error> {
        Ok(self.0.clone())
    }
}

/// Landmarks at generic positions inside a 100x100 frame.
pub fn face_a() -> Vec<Point2> {
    vec![
        Point2::new(30.0, 40.0),
        Point2::new(70.0, 35.0),
        Point2::new(52.0, 72.0),
        Point2::new(47.0, 55.0),
    ]
}

/// The landmarks of [`face_a`] moved around.
pub fn face_b() -> Vec<Point2> {
    vec![
        Point2::new(33.0, 44.0),
        Point2::new(66.0, 31.0),
        Point2::new(55.0, 75.0),
        Point2::new(45.0, 58.0),
    ]
}

pub fn solid(size: ImageSize, color: [u8; 3]) -> Image<u8, 3> {
    let data = (0..size.width * size.height).flat_map(|_| color).collect();
    Image::new(size, data).expect("valid image")
}

/// A smooth gradient, distinct in every channel.
pub fn gradient(size: ImageSize) -> Image<f32, 3> {
    let mut data = Vec::with_capacity(size.width * size.height * 3);
    for y in 0..size.height {
        for x in 0..size.width {
            data.extend_from_slice(&[x as f32 * 2.0, y as f32 * 2.0, (x + y) as f32]);
        }
    }
    Image::new(size, data).expect("valid image")
}

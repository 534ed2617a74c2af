use crate::error::MorphError;
use crate::point::{Point2, PointSet};

/// Blend two index aligned point sets.
///
/// Every output point is `(1 - alpha) * a[i] + alpha * b[i]`, so `alpha = 0`
/// reproduces `a` and `alpha = 1` reproduces `b`.
///
/// # Errors
///
/// Returns [`MorphError::PointSetLengthMismatch`] if the sets differ in length.
///
/// # Examples
///
/// ```
/// use facemorph::{interpolate_points, Point2, PointSet};
///
/// let a = PointSet::new(vec![Point2::new(0.0, 0.0)]);
/// let b = PointSet::new(vec![Point2::new(10.0, 4.0)]);
///
/// let mid = interpolate_points(&a, &b, 0.5).unwrap();
/// assert_eq!(mid[0], Point2::new(5.0, 2.0));
/// ```
pub fn interpolate_points(a: &PointSet, b: &PointSet, alpha: f32) -> Result<PointSet, MorphError> {
    if a.len() != b.len() {
        return Err(MorphError::PointSetLengthMismatch(a.len(), b.len()));
    }

    let points = a
        .iter()
        .zip(b.iter())
        .map(|(pa, pb)| {
            Point2::new(
                (1.0 - alpha) * pa.x + alpha * pb.x,
                (1.0 - alpha) * pa.y + alpha * pb.y,
            )
        })
        .collect::<Vec<_>>();

    Ok(PointSet::new(points))
}

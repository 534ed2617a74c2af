use facemorph_image::{ImageError, ImageSize};

/// An error type for the morphing engine.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MorphError {
    /// Two point sets that must be index aligned have different lengths.
    #[error("Point set length mismatch: {0} != {1}")]
    PointSetLengthMismatch(usize, usize),

    /// The two source images do not share the same size.
    #[error("Source images must have the same size: {0} != {1}")]
    ImageSizeMismatch(ImageSize, ImageSize),

    /// The landmark detector returned no point for an image.
    #[error("No landmarks detected in {0}")]
    NoLandmarks(String),

    /// The landmark detector itself failed.
    #[error("Landmark detection failed: {0}")]
    Detector(String),

    /// A triangulation vertex is not a point of the set it was built from.
    #[error("Triangulation vertex ({0}, {1}) does not match any point of the point set")]
    UnmatchedVertex(f32, f32),

    /// A mesh is used with a point set of a different cardinality.
    #[error("Mesh was built for {0} points but the point set has {1}")]
    MeshCardinalityMismatch(usize, usize),

    /// A triangle repeats an index or addresses a point out of range.
    #[error("Triangle {0:?} is not valid for a set of {1} points")]
    InvalidTriangleIndex([usize; 3], usize),

    /// The blend factor is outside `[0, 1]`.
    #[error("Blend factor must lie in [0, 1], got {0}")]
    InvalidAlpha(f32),

    /// Error propagated from the image types.
    #[error(transparent)]
    Image(#[from] ImageError),
}

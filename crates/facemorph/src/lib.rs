#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Accumulation of rendered triangles into the output image.
pub mod canvas;

/// Error types of the morphing engine.
pub mod error;

/// Blending of corresponding point sets.
pub mod interpolate;

pub mod landmarks;

/// Triangle meshes shared by corresponding point sets.
pub mod mesh;

/// The morphing pipeline.
pub mod morph;

pub mod overlay;

/// Points and point sets.
pub mod point;

/// Warping and blending of single triangles.
pub mod render;

pub use crate::error::MorphError;
pub use crate::interpolate::interpolate_points;
pub use crate::landmarks::{
    border_anchors, detect_point_set, LandmarkDetector, RawTriangle, Triangulator,
};
pub use crate::mesh::{CorrespondenceMesh, TriangleIndex};
pub use crate::morph::{blend_steps, MorphConfig, MorphOutput, MorphSession, MorphStatus};
pub use crate::point::{Point2, PointSet};

#[doc(inline)]
pub use facemorph_image as image;

#[doc(inline)]
pub use facemorph_imgproc as imgproc;

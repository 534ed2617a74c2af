//! Geometric image transformations using affine warps.
//!
//! This module provides functions for applying 2D affine transformations to images:
//!
//! - Solving the affine transform that maps one triangle onto another
//! - Affine transform inversion
//! - Inverse-mapped warping with a configurable border policy
//!
//! # Examples
//!
//! Mapping a unit triangle onto a scaled and translated copy:
//!
//! ```
//! use facemorph_imgproc::warp::{get_affine_transform, transform_point};
//!
//! let src = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)];
//! let dst = [(5.0, 5.0), (7.0, 5.0), (5.0, 7.0)];
//! let m = get_affine_transform(&src, &dst).unwrap();
//! assert_eq!(transform_point(1.0, 0.0, &m), (7.0, 5.0));
//! ```

mod affine;

pub use affine::{
    get_affine_transform, invert_affine_transform, transform_point, warp_affine, WarpError,
};

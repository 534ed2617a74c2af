//! Pixel interpolation methods for image transformations.
//!
//! This module provides the sampling kernels used when resampling images
//! during geometric transformations like affine warping.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)
//! - **Bilinear**: Smooth linear interpolation between adjacent pixels
//!
//! # Border Modes
//!
//! - **Constant**: samples outside the source are skipped, leaving the destination untouched
//! - **Replicate**: samples outside the source take the value of the closest edge pixel

mod bilinear;
mod interpolate;
mod nearest;

pub use interpolate::{interpolate_pixel, BorderMode, InterpolationMode};

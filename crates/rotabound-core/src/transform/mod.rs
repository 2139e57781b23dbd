//! Geometric transforms: affine matrices and bounding-box rotation.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, x grows right, y grows down
//! - Pixel `(i, j)` covers `[i, i+1) × [j, j+1)`; its centre is `(i + 0.5, j + 0.5)`
//! - Rotation angles are in degrees, positive = counter-clockwise in image
//!   coordinates (clockwise as seen on screen)

mod affine;
mod rotation;

pub use affine::{sin_cos_degrees, AffineTransform};
pub use rotation::{
    compute_rotated_bounds, compute_rotation, rotate_bound, rotate_bound_with, BoundsRounding,
    InterpolationFilter, RotateOptions, RotatedCanvas,
};

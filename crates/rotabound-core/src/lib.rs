//! Rotabound Core - bounding-box rotation and area resampling
//!
//! Rotates an image without cropping it (the canvas grows to fit the
//! rotated content) and resamples rasters to exact sizes with area
//! interpolation. Loading and saving go through the `image` crate.
//!
//! # Pipeline
//!
//! ```text
//! decode -> rotate_bound -> resize(original height, original width) -> encode
//! ```
//!
//! [`rotate_and_restore`] runs the two middle stages.

pub mod decode;
pub mod encode;
pub mod error;
pub mod pipeline;
pub mod raster;
pub mod resize;
pub mod transform;

pub use error::{TransformError, TransformResult};
pub use pipeline::{rotate_and_restore, PipelineOptions, DEFAULT_ANGLE};
pub use raster::Raster;
pub use resize::{resize, resize_with, FilterType};
pub use transform::{
    compute_rotated_bounds, rotate_bound, rotate_bound_with, BoundsRounding, InterpolationFilter,
    RotateOptions,
};

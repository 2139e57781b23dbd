//! Image loading.
//!
//! This module provides functionality for:
//! - Decoding PNG and JPEG images into a [`Raster`](crate::raster::Raster)
//! - Applying EXIF orientation so the raster is upright
//! - Reading image files from disk
//!
//! Decoding itself is done by the `image` crate.

mod reader;
mod types;

pub use reader::{decode_image, decode_image_no_orientation, get_orientation, open_image};
pub use types::{DecodeError, Orientation};

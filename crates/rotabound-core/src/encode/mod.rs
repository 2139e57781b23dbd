//! Image encoding for the output sink.
//!
//! This module provides functionality for:
//! - Encoding rasters to PNG (every channel layout, lossless)
//! - Encoding rasters to JPEG with configurable quality (alpha is dropped)
//!
//! # Examples
//!
//! ```ignore
//! use rotabound_core::encode::encode_png;
//!
//! let png_bytes = encode_png(&raster).unwrap();
//! std::fs::write("rotated.png", png_bytes).unwrap();
//! ```

mod jpeg;
mod png;
mod types;

pub use jpeg::encode_jpeg;
pub use png::encode_png;
pub use types::EncodeError;

//! Error type shared by the rotation and resampling stages.
//!
//! Every variant describes invalid input. The operations are pure, so a
//! failure is returned before any output is allocated and retrying with the
//! same arguments fails the same way.

use thiserror::Error;

/// Errors returned by raster transforms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// The source raster has no pixels.
    #[error("Invalid raster dimensions: width ({width}) and height ({height}) must be non-zero")]
    EmptyRaster { width: u32, height: u32 },

    /// A requested output size has a zero dimension.
    #[error("Invalid target size: width ({width}) and height ({height}) must be non-zero")]
    InvalidTargetSize { width: u32, height: u32 },

    /// Pixel buffer length doesn't match width * height * channels.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Channel count outside 1..=4.
    #[error("Unsupported channel count: {0} (expected 1 to 4)")]
    UnsupportedChannels(u8),

    /// Rotation angle is NaN or infinite.
    #[error("Rotation angle must be finite, got {0}")]
    NonFiniteAngle(f64),
}

/// Result alias for raster transforms.
pub type TransformResult<T> = Result<T, TransformError>;

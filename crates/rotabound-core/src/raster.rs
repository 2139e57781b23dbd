//! Owned 8-bit raster with an explicit channel layout.

use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

use crate::error::{TransformError, TransformResult};

/// Largest supported channel count (RGBA).
pub const MAX_CHANNELS: u8 = 4;

/// An image as interleaved 8-bit samples.
///
/// Supported layouts:
/// - 1 channel: gray
/// - 2 channels: gray + alpha
/// - 3 channels: RGB
/// - 4 channels: RGBA
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Samples per pixel (1 to 4).
    pub channels: u8,
    /// Pixel data in row-major order.
    /// Length should be width * height * channels.
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Create a raster, checking the channel count and buffer length.
    ///
    /// Zero-sized rasters are accepted here (see [`Raster::is_empty`]); the
    /// transforms reject them.
    pub fn new(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> TransformResult<Self> {
        let raster = Self {
            width,
            height,
            channels,
            pixels,
        };
        raster.check_layout()?;
        Ok(raster)
    }

    /// Create a raster where every pixel has the given value.
    ///
    /// `value` must have exactly `channels` samples.
    pub fn filled(width: u32, height: u32, value: &[u8]) -> TransformResult<Self> {
        let channels = u8::try_from(value.len())
            .map_err(|_| TransformError::UnsupportedChannels(u8::MAX))?;
        check_channels(channels)?;
        let pixels = value.repeat(width as usize * height as usize);
        Self::new(width, height, channels, pixels)
    }

    /// Convert any decoded image into the closest 8-bit layout.
    ///
    /// Deeper or floating-point images are narrowed to 8 bits; the presence
    /// of color and alpha is preserved.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());
        let (channels, pixels) = match img {
            DynamicImage::ImageLuma8(buf) => (1, buf.into_raw()),
            DynamicImage::ImageLumaA8(buf) => (2, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (3, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (4, buf.into_raw()),
            other => {
                let color = other.color();
                match (color.has_color(), color.has_alpha()) {
                    (false, false) => (1, other.into_luma8().into_raw()),
                    (false, true) => (2, other.into_luma_alpha8().into_raw()),
                    (true, false) => (3, other.into_rgb8().into_raw()),
                    (true, true) => (4, other.into_rgba8().into_raw()),
                }
            }
        };
        Self {
            width,
            height,
            channels,
            pixels,
        }
    }

    /// Convert to an `image::DynamicImage` for codec and filter work.
    ///
    /// Returns `None` if the layout is invalid.
    pub fn to_dynamic(&self) -> Option<DynamicImage> {
        let (w, h) = (self.width, self.height);
        let pixels = self.pixels.clone();
        match self.channels {
            1 => GrayImage::from_raw(w, h, pixels).map(DynamicImage::ImageLuma8),
            2 => GrayAlphaImage::from_raw(w, h, pixels).map(DynamicImage::ImageLumaA8),
            3 => RgbImage::from_raw(w, h, pixels).map(DynamicImage::ImageRgb8),
            4 => RgbaImage::from_raw(w, h, pixels).map(DynamicImage::ImageRgba8),
            _ => None,
        }
    }

    /// `(height, width)`, the order used when restoring a shape.
    pub fn shape(&self) -> (u32, u32) {
        (self.height, self.width)
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Samples of the pixel at `(x, y)`.
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let ch = self.channels as usize;
        let idx = y as usize * self.stride() + x as usize * ch;
        &self.pixels[idx..idx + ch]
    }

    /// Validate a raster before transforming it.
    pub(crate) fn ensure_valid(&self) -> TransformResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TransformError::EmptyRaster {
                width: self.width,
                height: self.height,
            });
        }
        self.check_layout()
    }

    fn check_layout(&self) -> TransformResult<()> {
        check_channels(self.channels)?;
        let expected = self.pixel_count() * self.channels as usize;
        if self.pixels.len() != expected {
            return Err(TransformError::InvalidPixelData {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }
}

fn check_channels(channels: u8) -> TransformResult<()> {
    if channels == 0 || channels > MAX_CHANNELS {
        return Err(TransformError::UnsupportedChannels(channels));
    }
    Ok(())
}

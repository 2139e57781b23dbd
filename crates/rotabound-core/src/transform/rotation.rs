//! Bounding-box rotation with nearest, bilinear and Lanczos3 interpolation.
//!
//! The output canvas grows so the whole rotated image fits (no cropping).
//!
//! # Algorithm
//!
//! For a `w × h` source rotated by θ the canvas is:
//! ```text
//! new_w = h*|sin θ| + w*|cos θ|
//! new_h = h*|cos θ| + w*|sin θ|
//! ```
//! rounded with a [`BoundsRounding`] policy. The rotation pivots on the
//! source centre `(w/2, h/2)` and is then translated by
//! `(new_w/2 - w/2, new_h/2 - h/2)` so the content sits in the middle of the
//! canvas.
//!
//! Pixels are produced by inverse mapping: each destination pixel centre is
//! sent back through the inverse transform and the source is sampled there.
//! Samples that fall outside the source read the fill color, so pixels on
//! the rotated border blend into the background.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::affine::{sin_cos_degrees, AffineTransform};
use crate::error::{TransformError, TransformResult};
use crate::raster::Raster;

/// Slack subtracted before rounding up so float noise on an exact integer
/// never adds a pixel.
const BOUNDS_EPSILON: f64 = 1e-6;

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Nearest source pixel - fastest, blocky edges.
    Nearest,
    /// Bilinear interpolation over the 4 nearest pixels.
    #[default]
    Bilinear,
    /// Lanczos3 over a 6x6 neighborhood - sharper, slower.
    Lanczos3,
}

/// How the fractional bounding box is turned into whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsRounding {
    /// Round up. The canvas always contains every rotated corner.
    #[default]
    Ceil,
    /// Round to the nearest integer.
    Round,
    /// Drop the fractional part. May clip up to one pixel per edge.
    Truncate,
}

impl BoundsRounding {
    /// Apply the policy to a bounding-box extent. Never returns 0.
    pub fn apply(self, extent: f64) -> u32 {
        let rounded = match self {
            BoundsRounding::Ceil => (extent - BOUNDS_EPSILON).ceil(),
            BoundsRounding::Round => extent.round(),
            BoundsRounding::Truncate => (extent + BOUNDS_EPSILON).trunc(),
        };
        (rounded as u32).max(1)
    }
}

/// Options for [`rotate_bound_with`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RotateOptions {
    /// Sampling filter.
    pub interpolation: InterpolationFilter,
    /// Background for uncovered pixels as `[r, g, b, a]`.
    ///
    /// Gray rasters use `r`; gray+alpha rasters use `r` and `a`.
    pub fill: [u8; 4],
    /// Rounding of the enlarged canvas.
    pub rounding: BoundsRounding,
}

impl RotateOptions {
    /// Fill value laid out for a raster with `channels` samples per pixel.
    pub fn fill_for(&self, channels: u8) -> Vec<u8> {
        let [r, g, b, a] = self.fill;
        match channels {
            1 => vec![r],
            2 => vec![r, a],
            3 => vec![r, g, b],
            _ => vec![r, g, b, a],
        }
    }
}

/// Geometry of a bounding-box rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedCanvas {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Maps source coordinates onto the canvas.
    pub transform: AffineTransform,
    /// Maps canvas coordinates back onto the source.
    pub inverse: AffineTransform,
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// # Arguments
///
/// * `width` - Original image width
/// * `height` - Original image height
/// * `angle_degrees` - Rotation angle in degrees (any finite value)
/// * `rounding` - How fractional extents become whole pixels
///
/// # Returns
///
/// Tuple of (new_width, new_height) for the rotated bounding box.
pub fn compute_rotated_bounds(
    width: u32,
    height: u32,
    angle_degrees: f64,
    rounding: BoundsRounding,
) -> (u32, u32) {
    let (sin, cos) = sin_cos_degrees(angle_degrees);
    let (sin, cos) = (sin.abs(), cos.abs());

    let w = width as f64;
    let h = height as f64;

    let new_w = rounding.apply(h * sin + w * cos);
    let new_h = rounding.apply(h * cos + w * sin);

    (new_w, new_h)
}

/// Compute the canvas size and the centred rotation transform.
pub fn compute_rotation(
    width: u32,
    height: u32,
    angle_degrees: f64,
    rounding: BoundsRounding,
) -> RotatedCanvas {
    let (new_w, new_h) = compute_rotated_bounds(width, height, angle_degrees, rounding);

    let src_cx = width as f64 / 2.0;
    let src_cy = height as f64 / 2.0;
    let dst_cx = new_w as f64 / 2.0;
    let dst_cy = new_h as f64 / 2.0;

    let transform = AffineTransform::rotation(src_cx, src_cy, angle_degrees)
        .then_translate(dst_cx - src_cx, dst_cy - src_cy);
    let inverse = AffineTransform::rotation(dst_cx, dst_cy, -angle_degrees)
        .then_translate(src_cx - dst_cx, src_cy - dst_cy);

    RotatedCanvas {
        width: new_w,
        height: new_h,
        transform,
        inverse,
    }
}

/// Rotate an image onto a canvas that exactly bounds the result.
///
/// Uses bilinear sampling, a black (transparent) background and rounds the
/// canvas up. See [`rotate_bound_with`] for the knobs.
///
/// # Errors
///
/// * [`TransformError::EmptyRaster`] if the source has a zero dimension
/// * [`TransformError::InvalidPixelData`] / [`TransformError::UnsupportedChannels`]
///   for a malformed raster
/// * [`TransformError::NonFiniteAngle`] for NaN or infinite angles
pub fn rotate_bound(source: &Raster, angle_degrees: f64) -> TransformResult<Raster> {
    rotate_bound_with(source, angle_degrees, &RotateOptions::default())
}

/// Rotate an image onto a bounding canvas with explicit options.
///
/// The source is left untouched; a new raster is returned.
pub fn rotate_bound_with(
    source: &Raster,
    angle_degrees: f64,
    options: &RotateOptions,
) -> TransformResult<Raster> {
    source.ensure_valid()?;
    if !angle_degrees.is_finite() {
        return Err(TransformError::NonFiniteAngle(angle_degrees));
    }

    let canvas = compute_rotation(source.width, source.height, angle_degrees, options.rounding);
    debug!(
        "rotating {}x{} by {} degrees onto {}x{} canvas",
        source.width, source.height, angle_degrees, canvas.width, canvas.height
    );

    if canvas.width == source.width
        && canvas.height == source.height
        && canvas.transform.is_identity(0.0)
    {
        trace!("identity rotation, copying source");
        return Ok(source.clone());
    }

    let fill = options.fill_for(source.channels);
    let ch = source.channels as usize;
    let dst_stride = canvas.width as usize * ch;
    let mut output = vec![0u8; dst_stride * canvas.height as usize];

    for (dst_y, row) in output.chunks_exact_mut(dst_stride).enumerate() {
        for (dst_x, out) in row.chunks_exact_mut(ch).enumerate() {
            let (src_x, src_y) = canvas
                .inverse
                .apply(dst_x as f64 + 0.5, dst_y as f64 + 0.5);

            // Index space: pixel centres on integer coordinates
            let (x, y) = (src_x - 0.5, src_y - 0.5);

            match options.interpolation {
                InterpolationFilter::Nearest => sample_nearest(source, x, y, &fill, out),
                InterpolationFilter::Bilinear => sample_bilinear(source, x, y, &fill, out),
                InterpolationFilter::Lanczos3 => sample_lanczos3(source, x, y, &fill, out),
            }
        }
    }

    Ok(Raster {
        width: canvas.width,
        height: canvas.height,
        channels: source.channels,
        pixels: output,
    })
}

/// Read one sample as f64, substituting the fill value outside the image.
#[inline]
fn sample_or_fill(image: &Raster, px: i64, py: i64, c: usize, fill: &[u8]) -> f64 {
    if px < 0 || py < 0 || px >= image.width as i64 || py >= image.height as i64 {
        return fill[c] as f64;
    }
    let idx = py as usize * image.stride() + px as usize * image.channels as usize + c;
    image.pixels[idx] as f64
}

#[inline]
fn to_sample(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Sample the nearest source pixel.
fn sample_nearest(image: &Raster, x: f64, y: f64, fill: &[u8], out: &mut [u8]) {
    let px = (x + 0.5).floor() as i64;
    let py = (y + 0.5).floor() as i64;

    if px < 0 || py < 0 || px >= image.width as i64 || py >= image.height as i64 {
        out.copy_from_slice(fill);
        return;
    }

    out.copy_from_slice(image.pixel(px as u32, py as u32));
}

/// Sample a pixel using bilinear interpolation.
///
/// Neighbors outside the image contribute the fill value.
fn sample_bilinear(image: &Raster, x: f64, y: f64, fill: &[u8], out: &mut [u8]) {
    let (w, h) = (image.width as f64, image.height as f64);
    let x0 = x.floor();
    let y0 = y.floor();

    // All four neighbors outside
    if x0 < -1.0 || y0 < -1.0 || x0 >= w || y0 >= h {
        out.copy_from_slice(fill);
        return;
    }

    // Fractional distances
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    for (c, sample) in out.iter_mut().enumerate() {
        let p00 = sample_or_fill(image, x0, y0, c, fill);
        let p10 = sample_or_fill(image, x0 + 1, y0, c, fill);
        let p01 = sample_or_fill(image, x0, y0 + 1, c, fill);
        let p11 = sample_or_fill(image, x0 + 1, y0 + 1, c, fill);

        let v = p00 * (1.0 - fx) * (1.0 - fy)
            + p10 * fx * (1.0 - fy)
            + p01 * (1.0 - fx) * fy
            + p11 * fx * fy;
        *sample = to_sample(v);
    }
}

/// Sample a pixel using Lanczos3 interpolation.
///
/// Falls back to bilinear within 3 pixels of the border, where the kernel
/// would reach outside the image.
fn sample_lanczos3(image: &Raster, x: f64, y: f64, fill: &[u8], out: &mut [u8]) {
    let (w, h) = (image.width as i64, image.height as i64);

    if x < 2.0 || x >= (w - 3) as f64 || y < 2.0 || y >= (h - 3) as f64 {
        sample_bilinear(image, x, y, fill, out);
        return;
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let ch = image.channels as usize;

    let mut sum = [0.0f64; 4];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        let py = y0 + ky;
        let wy = lanczos_weight(y - py as f64, 3.0);
        for kx in -2..=3 {
            let px = x0 + kx;
            let weight = lanczos_weight(x - px as f64, 3.0) * wy;
            let pixel = image.pixel(px as u32, py as u32);
            for c in 0..ch {
                sum[c] += pixel[c] as f64 * weight;
            }
            weight_sum += weight;
        }
    }

    if weight_sum.abs() < f64::EPSILON {
        out.copy_from_slice(fill);
        return;
    }
    for (c, sample) in out.iter_mut().enumerate() {
        *sample = to_sample(sum[c] / weight_sum);
    }
}

/// Lanczos kernel weight function.
///
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;

    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}

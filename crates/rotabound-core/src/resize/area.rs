//! Area-relation resampling.
//!
//! Works one axis at a time. Along an axis that shrinks, output pixel `d`
//! averages the source interval `[d*s, (d+1)*s)` (with `s = src / dst`),
//! weighting each source pixel by how much of it the interval covers. Along
//! an axis that grows, it falls back to linear interpolation between pixel
//! centres, clamped at the edges.

use crate::raster::Raster;

/// Coverage below this is treated as zero.
const COVERAGE_EPSILON: f64 = 1e-9;

/// Source taps contributing to one output position.
#[derive(Debug, Clone, PartialEq)]
struct Taps {
    /// Index of the first contributing source pixel.
    start: usize,
    /// Normalized weights for `start`, `start + 1`, ...
    weights: Vec<f64>,
}

/// Compute the taps for every output position along one axis.
fn axis_taps(src_len: usize, dst_len: usize) -> Vec<Taps> {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|d| {
            if scale >= 1.0 {
                area_taps(d, scale, src_len)
            } else {
                linear_taps(d, scale, src_len)
            }
        })
        .collect()
}

/// Fractional coverage of `[d*scale, (d+1)*scale)`.
fn area_taps(d: usize, scale: f64, src_len: usize) -> Taps {
    let begin = d as f64 * scale;
    let end = ((d + 1) as f64 * scale).min(src_len as f64);

    let first = (begin.floor() as usize).min(src_len - 1);
    let mut weights = Vec::with_capacity(scale.ceil() as usize + 1);
    let mut s = first;
    while s < src_len && (s as f64) < end {
        let lo = begin.max(s as f64);
        let hi = end.min(s as f64 + 1.0);
        weights.push((hi - lo).max(0.0));
        s += 1;
    }

    // Drop slivers left by float error at either end
    let mut start = first;
    while weights.len() > 1 && weights[0] < COVERAGE_EPSILON {
        weights.remove(0);
        start += 1;
    }
    while weights.len() > 1 && weights[weights.len() - 1] < COVERAGE_EPSILON {
        weights.pop();
    }

    normalize(start, weights)
}

/// Linear interpolation between the two nearest pixel centres.
fn linear_taps(d: usize, scale: f64, src_len: usize) -> Taps {
    let pos = (d as f64 + 0.5) * scale - 0.5;
    let last = src_len - 1;

    if pos <= 0.0 {
        return Taps {
            start: 0,
            weights: vec![1.0],
        };
    }
    let i0 = pos.floor() as usize;
    if i0 >= last {
        return Taps {
            start: last,
            weights: vec![1.0],
        };
    }
    let t = pos - i0 as f64;
    Taps {
        start: i0,
        weights: vec![1.0 - t, t],
    }
}

fn normalize(start: usize, mut weights: Vec<f64>) -> Taps {
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        for w in &mut weights {
            *w /= total;
        }
    }
    Taps { start, weights }
}

#[inline]
fn to_sample(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Resample with the area policy. Dimensions must already be validated.
pub(crate) fn resize_area(source: &Raster, target_width: u32, target_height: u32) -> Raster {
    let ch = source.channels as usize;
    let (src_w, src_h) = (source.width as usize, source.height as usize);
    let (dst_w, dst_h) = (target_width as usize, target_height as usize);

    let x_taps = axis_taps(src_w, dst_w);
    let y_taps = axis_taps(src_h, dst_h);

    // Horizontal pass: src_h rows of dst_w pixels
    let mut horizontal = vec![0.0f64; src_h * dst_w * ch];
    for (src_row, out_row) in source
        .pixels
        .chunks_exact(source.stride())
        .zip(horizontal.chunks_exact_mut(dst_w * ch))
    {
        for (taps, out) in x_taps.iter().zip(out_row.chunks_exact_mut(ch)) {
            for (k, weight) in taps.weights.iter().enumerate() {
                let idx = (taps.start + k) * ch;
                for c in 0..ch {
                    out[c] += src_row[idx + c] as f64 * weight;
                }
            }
        }
    }

    // Vertical pass
    let row_len = dst_w * ch;
    let mut output = vec![0u8; dst_h * row_len];
    let mut acc = vec![0.0f64; row_len];
    for (taps, out_row) in y_taps.iter().zip(output.chunks_exact_mut(row_len)) {
        acc.iter_mut().for_each(|v| *v = 0.0);
        for (k, weight) in taps.weights.iter().enumerate() {
            let row_start = (taps.start + k) * row_len;
            let row = &horizontal[row_start..row_start + row_len];
            for (a, v) in acc.iter_mut().zip(row) {
                *a += v * weight;
            }
        }
        for (o, a) in out_row.iter_mut().zip(&acc) {
            *o = to_sample(*a);
        }
    }

    Raster {
        width: target_width,
        height: target_height,
        channels: source.channels,
        pixels: output,
    }
}

//! 2×3 affine transforms.
//!
//! A transform maps a point `(x, y)` to:
//! ```text
//! x' = a*x + b*y + tx
//! y' = c*x + d*y + ty
//! ```
//!
//! Coordinates are continuous: pixel `(i, j)` covers `[i, i+1) × [j, j+1)`
//! and its centre sits at `(i + 0.5, j + 0.5)`.

/// Below this determinant a transform is treated as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// 2D affine transformation matrix (6 coefficients).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    /// Coefficients [a, b, tx, c, d, ty]
    coeffs: [f64; 6],
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform {
    /// Create the identity transformation.
    pub fn identity() -> Self {
        Self {
            coeffs: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        }
    }

    /// Create from raw coefficients `[a, b, tx, c, d, ty]`.
    pub fn from_coeffs(coeffs: [f64; 6]) -> Self {
        Self { coeffs }
    }

    /// Get the raw coefficients.
    pub fn coeffs(&self) -> &[f64; 6] {
        &self.coeffs
    }

    /// Rotation about `(center_x, center_y)`.
    ///
    /// Positive angles rotate counter-clockwise in image coordinates
    /// (x right, y down), which looks clockwise on screen:
    /// ```text
    /// x' = cos*(x - cx) - sin*(y - cy) + cx
    /// y' = sin*(x - cx) + cos*(y - cy) + cy
    /// ```
    pub fn rotation(center_x: f64, center_y: f64, angle_degrees: f64) -> Self {
        let (sin, cos) = sin_cos_degrees(angle_degrees);
        Self {
            coeffs: [
                cos,
                -sin,
                (1.0 - cos) * center_x + sin * center_y,
                sin,
                cos,
                (1.0 - cos) * center_y - sin * center_x,
            ],
        }
    }

    /// This transform followed by a translation.
    pub fn then_translate(&self, dx: f64, dy: f64) -> Self {
        let mut coeffs = self.coeffs;
        coeffs[2] += dx;
        coeffs[5] += dy;
        Self { coeffs }
    }

    /// Determinant of the linear part.
    pub fn determinant(&self) -> f64 {
        let [a, b, _, c, d, _] = self.coeffs;
        a * d - b * c
    }

    /// Compute the inverse transformation.
    ///
    /// Returns `None` for singular matrices.
    pub fn inverse(&self) -> Option<Self> {
        let [a, b, tx, c, d, ty] = self.coeffs;
        let det = self.determinant();
        if det.abs() < SINGULAR_EPSILON {
            return None;
        }
        let inv_a = d / det;
        let inv_b = -b / det;
        let inv_c = -c / det;
        let inv_d = a / det;
        Some(Self {
            coeffs: [
                inv_a,
                inv_b,
                -(inv_a * tx + inv_b * ty),
                inv_c,
                inv_d,
                -(inv_c * tx + inv_d * ty),
            ],
        })
    }

    /// Map a point through this transform.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let [a, b, tx, c, d, ty] = self.coeffs;
        (a * x + b * y + tx, c * x + d * y + ty)
    }

    /// Check whether every coefficient matches the identity within `tolerance`.
    pub fn is_identity(&self, tolerance: f64) -> bool {
        self.coeffs
            .iter()
            .zip(Self::identity().coeffs.iter())
            .all(|(v, id)| (v - id).abs() <= tolerance)
    }
}

/// Sine and cosine of an angle in degrees.
///
/// Exact multiples of 90° return exact values so axis-aligned rotations
/// stay lossless.
pub fn sin_cos_degrees(angle_degrees: f64) -> (f64, f64) {
    let normalized = angle_degrees.rem_euclid(360.0);
    if normalized == 0.0 {
        (0.0, 1.0)
    } else if normalized == 90.0 {
        (1.0, 0.0)
    } else if normalized == 180.0 {
        (0.0, -1.0)
    } else if normalized == 270.0 {
        (-1.0, 0.0)
    } else {
        normalized.to_radians().sin_cos()
    }
}

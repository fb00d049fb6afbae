//! Complex scalar helpers.
//!
//! Amplitudes are plain [`Complex64`] values; arithmetic (`+`, `-`, `*`,
//! conjugation) comes from `num-complex`. This module adds the tolerance-based
//! comparison used throughout the simulator and a few named accessors.

pub use num_complex::Complex64;

/// Absolute tolerance for comparing real and imaginary parts.
pub const EPSILON: f64 = 1e-10;

/// Shorthand constructor.
#[inline]
pub fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// Extra operations on complex scalars.
pub trait ComplexExt {
    /// Modulus `|z|`.
    fn magnitude(&self) -> f64;
    /// Squared modulus `|z|^2`, the probability weight of an amplitude.
    fn magnitude_squared(&self) -> f64;
    /// Argument computed with the two-argument arctangent.
    fn phase(&self) -> f64;
    /// True only for an exact zero.
    fn is_zero_exact(&self) -> bool;
    /// Divide both parts by a real scalar.
    fn div_real(&self, scalar: f64) -> Complex64;
    /// Component-wise comparison with absolute tolerance [`EPSILON`].
    fn approx_eq(&self, other: &Complex64) -> bool;
}

impl ComplexExt for Complex64 {
    fn magnitude(&self) -> f64 {
        self.norm()
    }

    fn magnitude_squared(&self) -> f64 {
        self.norm_sqr()
    }

    fn phase(&self) -> f64 {
        self.im.atan2(self.re)
    }

    fn is_zero_exact(&self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }

    fn div_real(&self, scalar: f64) -> Complex64 {
        Complex64::new(self.re / scalar, self.im / scalar)
    }

    fn approx_eq(&self, other: &Complex64) -> bool {
        (self.re - other.re).abs() < EPSILON && (self.im - other.im).abs() < EPSILON
    }
}

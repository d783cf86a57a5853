// Copyright 2026 the Polyroots Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horner evaluation of polynomials and of the monic cubic and quartic.
//!
//! Coefficient slices are ordered from the highest degree down to the
//! constant term, the same order the solver constructors take.

use num_complex::Complex64;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Evaluate the polynomial with coefficients `coeffs` at `x`.
///
/// `coeffs[0]` multiplies the highest power. An empty slice is the zero
/// polynomial.
///
/// ```
/// use polyroots::eval_poly;
///
/// // x³ - 6x² + 11x - 6
/// assert_eq!(eval_poly(&[1.0, -6.0, 11.0, -6.0], 4.0), 6.0);
/// ```
pub fn eval_poly(coeffs: &[f64], x: f64) -> f64 {
    match coeffs.split_first() {
        Some((&lead, rest)) => rest.iter().fold(lead, |acc, &c| acc * x + c),
        None => 0.0,
    }
}

/// Evaluate the real polynomial with coefficients `coeffs` at a complex point.
pub fn eval_poly_complex(coeffs: &[f64], z: Complex64) -> Complex64 {
    match coeffs.split_first() {
        Some((&lead, rest)) => rest
            .iter()
            .fold(Complex64::new(lead, 0.0), |acc, &c| acc * z + c),
        None => Complex64::new(0.0, 0.0),
    }
}

/// Evaluate the polynomial with coefficients `|coeffs|` at `|x|`.
///
/// This bounds the magnitude of every partial sum of the Horner recurrence,
/// so `MACHINE_EPSILON * eval_poly_bound(coeffs, x)` is the scale of the
/// rounding error in [`eval_poly`] at `x`.
pub fn eval_poly_bound(coeffs: &[f64], x: f64) -> f64 {
    let x = x.abs();
    coeffs.iter().fold(0.0, |acc, &c| acc * x + c.abs())
}

/// Evaluate `x³ + a x² + b x + c`.
#[inline]
pub fn eval_monic_cubic(x: f64, a: f64, b: f64, c: f64) -> f64 {
    ((x + a) * x + b) * x + c
}

/// Evaluate `x³ + a x² + b x + c` and its first derivative.
#[inline]
pub fn eval_monic_cubic_deriv(x: f64, a: f64, b: f64, c: f64) -> (f64, f64) {
    let (p, dp, _) = eval_monic_cubic_deriv2(x, a, b, c);
    (p, dp)
}

/// Evaluate `x³ + a x² + b x + c` and its first two derivatives.
#[inline]
pub fn eval_monic_cubic_deriv2(x: f64, a: f64, b: f64, c: f64) -> (f64, f64, f64) {
    let mut p = x + a;
    let mut dp = x + p;
    p = p * x + b;
    let ddp = 2.0 * (x + dp);
    dp = dp * x + p;
    p = p * x + c;
    (p, dp, ddp)
}

/// Evaluate `x⁴ + a x³ + b x² + c x + d`.
#[inline]
pub fn eval_monic_quartic(x: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    (((x + a) * x + b) * x + c) * x + d
}

/// Evaluate `x⁴ + a x³ + b x² + c x + d` and its first derivative.
#[inline]
pub fn eval_monic_quartic_deriv(x: f64, a: f64, b: f64, c: f64, d: f64) -> (f64, f64) {
    let (p, dp, _) = eval_monic_quartic_deriv2(x, a, b, c, d);
    (p, dp)
}

/// Evaluate `x⁴ + a x³ + b x² + c x + d` and its first two derivatives.
#[inline]
pub fn eval_monic_quartic_deriv2(x: f64, a: f64, b: f64, c: f64, d: f64) -> (f64, f64, f64) {
    let mut p = x + a;
    let mut ddp = 2.0;
    let mut dp = x + p;
    p = p * x + b;
    for coeff in [c, d] {
        ddp = ddp * x + 2.0 * dp;
        dp = dp * x + p;
        p = p * x + coeff;
    }
    (p, dp, ddp)
}

/// The Halley correction for a root estimate, given the value and first two
/// derivatives there.
///
/// Falls back to the Newton step when the Halley denominator would more than
/// double it.
#[inline]
pub(crate) fn halley_step(p: f64, dp: f64, ddp: f64) -> f64 {
    let newton = p / dp;
    let denom = 1.0 - 0.5 * newton * ddp / dp;
    if denom > 0.5 {
        newton / denom
    } else {
        newton
    }
}

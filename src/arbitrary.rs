// Copyright 2026 the Polyroots Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utilities for fuzz and/or property testing using `arbitrary`.
//!
//! Coefficient arrays are ordered highest degree first, like the solver
//! constructors. Apart from [`finite_float`], the generators build on
//! [`scaled_float`], whose moderate magnitudes keep the roots of the
//! generated polynomials representable and the residual checks meaningful.

use arbitrary::Unstructured;
use arrayvec::ArrayVec;

use crate::{Cubic, Quadratic, Quartic};

fn check_finite(f: f64) -> Result<f64, arbitrary::Error> {
    if f.is_finite() {
        Ok(f)
    } else {
        Err(arbitrary::Error::IncorrectFormat)
    }
}

/// An arbitrary finite float, of any magnitude.
pub fn finite_float(u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    check_finite(u.arbitrary()?)
}

/// A float of magnitude between `2^-30` and `2^31`, of either sign.
pub fn scaled_float(u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    let mantissa: u64 = u.arbitrary()?;
    let mantissa = mantissa & ((1u64 << 52) - 1);
    // Biased exponents around 1023, the exponent of 1.0.
    let exponent: u64 = u.int_in_range(993..=1053)?;
    let negative: bool = u.arbitrary()?;
    let sign: u64 = if negative { 1u64 << 63 } else { 0 };
    Ok(f64::from_bits(sign | (exponent << 52) | mantissa))
}

/// A float within 32 ulps of `orig`.
pub fn nearby_float(orig: f64, u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    let ulps: i32 = u.int_in_range(-32..=32)?;
    let scale = 1.0f64 + f64::from(ulps) * f64::EPSILON;
    check_finite(orig * scale)
}

/// Arbitrary coefficients with a nonzero leading term.
///
/// Lower coefficients are sometimes zero and sometimes almost equal to their
/// neighbor, to reach the special cases of the solvers.
pub fn coeffs<const N: usize>(u: &mut Unstructured<'_>) -> Result<[f64; N], arbitrary::Error> {
    let mut coeffs = [0.0; N];
    for i in 0..N {
        let choice: u8 = u.int_in_range(0..=5)?;
        coeffs[i] = match (i, choice) {
            (0, _) | (_, 3..=5) => scaled_float(u)?,
            (_, 0) => 0.0,
            _ => nearby_float(coeffs[i - 1], u)?,
        };
    }
    Ok(coeffs)
}

/// A polynomial built from `N - 1` planted real roots, returned along with
/// the roots.
///
/// The roots are biased towards being almost repeated.
///
/// # Panics
///
/// If `N` is not between 2 and 5.
pub fn planted<const N: usize>(
    u: &mut Unstructured<'_>,
) -> Result<([f64; N], ArrayVec<f64, 4>), arbitrary::Error> {
    assert!((2..=5).contains(&N), "planted polynomials have degree 1 to 4");

    let mut roots = ArrayVec::new();
    let mut r = scaled_float(u)?;
    roots.push(r);
    for _ in 2..N {
        let close: bool = u.arbitrary()?;
        r = if close {
            nearby_float(r, u)?
        } else {
            scaled_float(u)?
        };
        roots.push(r);
    }

    let mut coeffs = [0.0; N];
    coeffs[0] = 1.0;
    for (n, &root) in roots.iter().enumerate() {
        // Multiply by (x - root); the degree so far is n.
        for k in (1..=n + 1).rev() {
            coeffs[k] -= root * coeffs[k - 1];
        }
    }

    let scale = scaled_float(u)?;
    for c in &mut coeffs {
        *c = check_finite(*c * scale)?;
    }
    Ok((coeffs, roots))
}

/// Generate an arbitrary quadratic.
pub fn quadratic(u: &mut Unstructured<'_>) -> Result<Quadratic, arbitrary::Error> {
    let [a, b, c] = coeffs(u)?;
    Ok(Quadratic::new(a, b, c))
}

/// Generate an arbitrary cubic.
pub fn cubic(u: &mut Unstructured<'_>) -> Result<Cubic, arbitrary::Error> {
    let [a, b, c, d] = coeffs(u)?;
    Ok(Cubic::new(a, b, c, d))
}

/// Generate an arbitrary quartic.
pub fn quartic(u: &mut Unstructured<'_>) -> Result<Quartic, arbitrary::Error> {
    let [a, b, c, d, e] = coeffs(u)?;
    Ok(Quartic::new(a, b, c, d, e))
}

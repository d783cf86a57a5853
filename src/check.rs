// Copyright 2026 the Polyroots Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Residual reports for computed roots.

use core::fmt;

use arrayvec::ArrayVec;
use num_complex::Complex64;

use crate::common::MACHINE_EPSILON;
use crate::eval::{eval_poly_bound, eval_poly_complex};

/// Multiple of the Horner rounding bound a residual may reach before the
/// root is reported as inaccurate.
const RESIDUAL_FACTOR: f64 = 32.0;

/// How well a set of computed roots satisfies its polynomial.
///
/// For each root `z` this records `|p(z)|` together with the tolerance it is
/// held to, `32 ε · Σ |c_k| |z|^k`. That is the scale of the rounding error
/// of evaluating `p` near `z`, so a root passes when it is a root of a
/// polynomial whose coefficients differ from the given ones only in the last
/// few bits.
///
/// Produced by the `check` method of each solver.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Check {
    roots: ArrayVec<Complex64, 4>,
    residuals: ArrayVec<f64, 4>,
    tolerances: ArrayVec<f64, 4>,
}

impl Check {
    /// Measure `roots` against the polynomial with coefficients `coeffs`,
    /// highest degree first.
    pub(crate) fn new(coeffs: &[f64], roots: impl IntoIterator<Item = Complex64>) -> Self {
        let mut check = Self::default();
        for z in roots {
            let residual = eval_poly_complex(coeffs, z).norm();
            let tolerance = RESIDUAL_FACTOR * MACHINE_EPSILON * eval_poly_bound(coeffs, z.norm());
            check.roots.push(z);
            check.residuals.push(residual);
            check.tolerances.push(tolerance);
        }
        check
    }

    /// Whether every residual is within its tolerance.
    ///
    /// A non-finite residual never passes.
    pub fn is_ok(&self) -> bool {
        self.residuals
            .iter()
            .zip(&self.tolerances)
            .all(|(residual, tolerance)| residual <= tolerance)
    }

    /// The roots that were checked.
    pub fn roots(&self) -> &[Complex64] {
        &self.roots
    }

    /// `|p(z)|` for each root `z`.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// The tolerance each residual is held to.
    pub fn tolerances(&self) -> &[f64] {
        &self.tolerances
    }

    /// The largest ratio of residual to tolerance, or zero if there are no
    /// roots. Exactly zero residuals count as zero even when the tolerance
    /// is zero.
    pub fn worst_ratio(&self) -> f64 {
        self.residuals
            .iter()
            .zip(&self.tolerances)
            .map(|(&residual, &tolerance)| {
                if residual == 0.0 {
                    0.0
                } else {
                    residual / tolerance
                }
            })
            .fold(0.0, f64::max)
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.roots.is_empty() {
            return write!(f, "no roots to check");
        }
        for ((z, residual), tolerance) in
            self.roots.iter().zip(&self.residuals).zip(&self.tolerances)
        {
            let verdict = if residual <= tolerance { "ok" } else { "FAILED" };
            writeln!(
                f,
                "x = {} {:+}i  |p(x)| = {:e}  (tolerance {:e})  {}",
                z.re, z.im, residual, tolerance, verdict
            )?;
        }
        if self.is_ok() {
            write!(f, "all roots ok")
        } else {
            write!(f, "some roots FAILED")
        }
    }
}

/// Assert that the sum and the product of `roots` match Vieta's formulas
/// for `coeffs` to within `rel`, relative to the magnitudes involved.
#[cfg(test)]
pub(crate) fn assert_vieta(coeffs: &[f64], roots: &[Complex64], rel: f64) {
    let degree = coeffs.len() - 1;
    assert_eq!(roots.len(), degree, "{roots:?}");
    let lead = coeffs[0];

    let sum: Complex64 = roots.iter().sum();
    let expected = -coeffs[1] / lead;
    let magnitude = roots.iter().map(|z| z.norm()).sum::<f64>() + expected.abs();
    assert!(
        (sum - expected).norm() <= rel * magnitude,
        "sum of {roots:?} is {sum}, expected {expected}"
    );

    let product: Complex64 = roots.iter().product();
    let sign = if degree % 2 == 0 { 1.0 } else { -1.0 };
    let expected = sign * coeffs[degree] / lead;
    let magnitude = roots.iter().map(|z| z.norm()).product::<f64>() + expected.abs();
    assert!(
        (product - expected).norm() <= rel * magnitude,
        "product of {roots:?} is {product}, expected {expected}"
    );
}

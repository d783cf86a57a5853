// Copyright 2026 the Polyroots Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Roots of quartic polynomials.

use core::fmt;

use arrayvec::ArrayVec;
use num_complex::Complex64;

use crate::check::Check;
use crate::common::{
    pow2_floor, scale_monic, sort_roots, MACHINE_EPSILON, MULTIPLICITY_TOLERANCE, SQRT_EPSILON,
};
use crate::cubic::Cubic;
use crate::eval::{
    eval_monic_quartic, eval_monic_quartic_deriv2, eval_poly, eval_poly_complex, halley_step,
};
use crate::quadratic::Quadratic;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Upper bound on the Newton steps used to refine the quadratic factors.
const MAX_FACTOR_STEPS: usize = 16;

/// The roots of `a x⁴ + b x³ + c x² + d x + e`.
///
/// The monic, rescaled quartic is split into two quadratic factors
/// `(x² + α₁ x + β₁)(x² + α₂ x + β₂)` using a real root of its resolvent
/// cubic. Each member of a factor pair is computed so that it does not
/// suffer cancellation, the factors are refined with Newton's method on
/// the equations relating them to the coefficients, and the roots of each
/// factor come from [`Quadratic`].
///
/// Complex conjugate pairs occupy the leading root slots as
/// `(re, im)` with `im > 0`, ordered by real part. The remaining slots hold
/// the real roots in increasing order. With `a` zero the solver reduces to
/// [`Cubic`] on `(b, c, d, e)`. Like [`Cubic`], it switches to the
/// reciprocal roots of `e x⁴ + d x³ + c x² + b x + a` when scaling would
/// push the coefficients out of range.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quartic {
    coeffs: [f64; 5],
    r: [f64; 4],
    num_real_roots: usize,
    num_complex_roots: usize,
    iterations: usize,
}

/// The factor pair `(x² + α₁ x + β₁)(x² + α₂ x + β₂)`, packed as
/// `[α₁, β₁, α₂, β₂]`.
type Factors = [f64; 4];

impl Quartic {
    /// Solve `a x⁴ + b x³ + c x² + d x + e = 0`.
    ///
    /// ```
    /// use polyroots::Quartic;
    ///
    /// let quartic = Quartic::new(1.0, -10.0, 35.0, -50.0, 24.0);
    /// let roots = quartic.real_roots();
    /// assert_eq!(roots.len(), 4);
    /// for (root, expected) in roots.iter().zip([1.0, 2.0, 3.0, 4.0]) {
    ///     assert!((root - expected).abs() < 1e-13);
    /// }
    /// ```
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64) -> Self {
        let mut quartic = Self::default();
        quartic.setup(a, b, c, d, e);
        quartic
    }

    /// Replace the coefficients and recompute the roots.
    pub fn setup(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64) {
        *self = Self {
            coeffs: [a, b, c, d, e],
            ..Self::default()
        };
        self.find_roots();
    }

    fn find_roots(&mut self) {
        let [a, b, c, d, e] = self.coeffs;
        if a == 0.0 {
            self.take_cubic(&Cubic::new(b, c, d, e), None);
        } else if e == 0.0 {
            self.take_cubic(&Cubic::new(a, b, c, d), Some(0.0));
        } else {
            let (scale, scaled, in_range) = monic_scaling([b / a, c / a, d / a, e / a]);
            if !in_range {
                let (rscale, rscaled, rin_range) = monic_scaling([d / e, c / e, b / e, a / e]);
                if rin_range {
                    log::debug!(
                        "quartic coefficients out of range, solving for reciprocal roots"
                    );
                    self.solve_monic(rscaled, rscale);
                    self.invert_roots();
                    return;
                }
            }
            self.solve_monic(scaled, scale);
        }
    }

    /// Copy the roots of a cubic factor, plus an optional extra real root.
    fn take_cubic(&mut self, cubic: &Cubic, extra: Option<f64>) {
        let mut reals: ArrayVec<f64, 4> = cubic.real_roots().into_iter().collect();
        reals.extend(extra);
        sort_roots(&mut reals);

        let mut slot = 0;
        if cubic.is_complex() {
            let pair = cubic.root0();
            self.r[0] = pair.re;
            self.r[1] = pair.im;
            self.num_complex_roots = 2;
            slot = 2;
        }
        self.r[slot..slot + reals.len()].copy_from_slice(&reals);
        self.num_real_roots = reals.len();
        self.iterations = cubic.iterations();
    }

    /// The roots of `x⁴ + a x³ + b x² + c x + d`, with `d` nonzero, given as
    /// the roots of the polynomial scaled down by `scale`.
    fn solve_monic(&mut self, [a, b, c, d]: [f64; 4], scale: f64) {
        let (y, r2, s2) = resolvent_root(a, b, c, d);

        // R S = (a y - 2c) / 4. Take the larger of R and S as a square root
        // and divide for the other.
        let rs = (a * y - 2.0 * c) / 4.0;
        let (r, s) = if r2 >= s2 {
            let r = r2.sqrt();
            (r, if r != 0.0 { rs / r } else { 0.0 })
        } else {
            let s = s2.sqrt();
            (rs / s, s)
        };

        // The factors are x² + (a/2 ± R) x + (y/2 ± S). In each pair, the
        // member where the terms add is computed directly and the other one
        // from a product relation.
        let (ha, hy) = (a / 2.0, y / 2.0);
        let (beta1, beta2) = if (hy >= 0.0) == (s >= 0.0) {
            let beta1 = hy + s;
            (beta1, if beta1 != 0.0 { d / beta1 } else { hy - s })
        } else {
            let beta2 = hy - s;
            (if beta2 != 0.0 { d / beta2 } else { hy + s }, beta2)
        };
        let coeffs = [a, b, c, d];
        let factors = if (ha >= 0.0) == (r >= 0.0) {
            let alpha1 = ha + r;
            let alpha2 = least_error(
                [
                    Some(ha - r),
                    (alpha1 != 0.0).then(|| (b - y) / alpha1),
                    (beta1 != 0.0).then(|| (c - alpha1 * beta2) / beta1),
                ],
                |alpha2| factor_error([alpha1, beta1, alpha2, beta2], coeffs),
            );
            [alpha1, beta1, alpha2, beta2]
        } else {
            let alpha2 = ha - r;
            let alpha1 = least_error(
                [
                    Some(ha + r),
                    (alpha2 != 0.0).then(|| (b - y) / alpha2),
                    (beta2 != 0.0).then(|| (c - alpha2 * beta1) / beta2),
                ],
                |alpha1| factor_error([alpha1, beta1, alpha2, beta2], coeffs),
            );
            [alpha1, beta1, alpha2, beta2]
        };

        let (factors, steps) = refine_factors(factors, coeffs);
        self.iterations = steps;

        let mut pairs: ArrayVec<(f64, f64), 2> = ArrayVec::new();
        let mut reals: ArrayVec<f64, 4> = ArrayVec::new();
        for (alpha, beta) in [(factors[0], factors[1]), (factors[2], factors[3])] {
            let half = 0.5 * alpha;
            let disc = half * half - beta;
            if disc.abs() <= MULTIPLICITY_TOLERANCE * (half * half).max(beta.abs()) {
                let x = self.polish(-half, coeffs);
                reals.extend([x * scale, x * scale]);
                continue;
            }
            let q = Quadratic::new(1.0, alpha, beta);
            if q.is_complex() {
                pairs.push((q.real_root0() * scale, q.real_root1() * scale));
            } else {
                for x in q.real_roots() {
                    reals.push(self.polish(x, coeffs) * scale);
                }
            }
        }
        self.store_roots(pairs, reals);
        log::trace!(
            "quartic solved with {} refinement steps: {} real, {} complex",
            self.iterations,
            self.num_real_roots,
            self.num_complex_roots
        );
    }

    /// Lay out complex pairs `(re, im)` and real roots in the root slots.
    fn store_roots(&mut self, mut pairs: ArrayVec<(f64, f64), 2>, mut reals: ArrayVec<f64, 4>) {
        if pairs.len() == 2 && pairs[1] < pairs[0] {
            pairs.swap(0, 1);
        }
        sort_roots(&mut reals);

        let mut slot = 0;
        for (re, im) in &pairs {
            self.r[slot] = *re;
            self.r[slot + 1] = *im;
            slot += 2;
        }
        self.r[slot..slot + reals.len()].copy_from_slice(&reals);
        self.num_complex_roots = 2 * pairs.len();
        self.num_real_roots = reals.len();
    }

    /// Replace each root `x` by `1 / x`, keeping the slot layout.
    fn invert_roots(&mut self) {
        let pairs = self.r[..self.num_complex_roots]
            .chunks_exact(2)
            .map(|pair| {
                let z = Complex64::new(pair[0], -pair[1]).finv();
                (z.re, z.im)
            })
            .collect();
        let reals = self.real_roots().into_iter().map(|x| 1.0 / x).collect();
        self.store_roots(pairs, reals);
    }

    /// Take one Halley step towards a real root of the scaled monic quartic,
    /// if that reduces the residual.
    ///
    /// Steps longer than `sqrt(ε) |x|` are refused, since they mean the
    /// estimate sits next to a multiple root where the step is meaningless.
    fn polish(&mut self, x: f64, [a, b, c, d]: [f64; 4]) -> f64 {
        let (p, dp, ddp) = eval_monic_quartic_deriv2(x, a, b, c, d);
        if p == 0.0 || dp == 0.0 {
            return x;
        }
        let step = halley_step(p, dp, ddp);
        if step.is_nan() || step.abs() > SQRT_EPSILON * x.abs() {
            return x;
        }
        let polished = x - step;
        if eval_monic_quartic(polished, a, b, c, d).abs() < p.abs() {
            self.iterations += 1;
            polished
        } else {
            x
        }
    }

    /// The coefficients `[a, b, c, d, e]`, highest degree first.
    pub fn coeffs(&self) -> &[f64; 5] {
        &self.coeffs
    }

    /// The number of real roots, counted with multiplicity.
    pub fn num_real_roots(&self) -> usize {
        self.num_real_roots
    }

    /// The number of complex roots: 0, 2 or 4.
    pub fn num_complex_roots(&self) -> usize {
        self.num_complex_roots
    }

    /// The number of refinement steps taken, on the quadratic factors and
    /// on the real roots. For a degenerate quartic this is the count of the
    /// underlying cubic.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// The real roots, in increasing order, repeated by multiplicity.
    pub fn real_roots(&self) -> ArrayVec<f64, 4> {
        let start = self.num_complex_roots;
        self.r[start..start + self.num_real_roots]
            .iter()
            .copied()
            .collect()
    }

    /// The strictly positive real roots, in increasing order.
    pub fn positive_roots(&self) -> ArrayVec<f64, 4> {
        self.real_roots().into_iter().filter(|&r| r > 0.0).collect()
    }

    /// The strictly negative real roots, in increasing order.
    pub fn negative_roots(&self) -> ArrayVec<f64, 4> {
        self.real_roots().into_iter().filter(|&r| r < 0.0).collect()
    }

    /// The first root slot.
    pub fn real_root0(&self) -> f64 {
        self.r[0]
    }

    /// The second root slot.
    pub fn real_root1(&self) -> f64 {
        self.r[1]
    }

    /// The third root slot.
    pub fn real_root2(&self) -> f64 {
        self.r[2]
    }

    /// The fourth root slot.
    pub fn real_root3(&self) -> f64 {
        self.r[3]
    }

    /// The first root; for a complex pair, the one with positive imaginary part.
    pub fn root0(&self) -> Complex64 {
        if self.num_complex_roots > 0 {
            Complex64::new(self.r[0], self.r[1])
        } else {
            Complex64::new(self.r[0], 0.0)
        }
    }

    /// The second root; the conjugate of [`root0`](Self::root0) for a
    /// complex pair.
    pub fn root1(&self) -> Complex64 {
        if self.num_complex_roots > 0 {
            Complex64::new(self.r[0], -self.r[1])
        } else {
            Complex64::new(self.r[1], 0.0)
        }
    }

    /// The third root; for a second complex pair, the one with positive
    /// imaginary part.
    pub fn root2(&self) -> Complex64 {
        if self.num_complex_roots > 2 {
            Complex64::new(self.r[2], self.r[3])
        } else {
            Complex64::new(self.r[2], 0.0)
        }
    }

    /// The fourth root; the conjugate of [`root2`](Self::root2) for a
    /// second complex pair.
    pub fn root3(&self) -> Complex64 {
        if self.num_complex_roots > 2 {
            Complex64::new(self.r[2], -self.r[3])
        } else {
            Complex64::new(self.r[3], 0.0)
        }
    }

    /// All the roots, complex pairs first.
    pub fn roots(&self) -> ArrayVec<Complex64, 4> {
        [self.root0(), self.root1(), self.root2(), self.root3()]
            .into_iter()
            .take(self.num_real_roots + self.num_complex_roots)
            .collect()
    }

    /// Evaluate the polynomial at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        eval_poly(&self.coeffs, x)
    }

    /// Evaluate the polynomial at a complex point.
    pub fn eval_complex(&self, z: Complex64) -> Complex64 {
        eval_poly_complex(&self.coeffs, z)
    }

    /// Compare the residuals at the computed roots against rounding level.
    pub fn check(&self) -> Check {
        Check::new(&self.coeffs, self.roots())
    }
}

/// The power of two that brings the roots of `x⁴ + a x³ + b x² + c x + d`
/// near unit size, the correspondingly scaled coefficients, and whether they
/// are all still in range.
fn monic_scaling(coeffs: [f64; 4]) -> (f64, [f64; 4], bool) {
    let [a, b, c, d] = coeffs;
    let scale = pow2_floor(
        a.abs()
            .max(b.abs().sqrt())
            .max(c.abs().cbrt())
            .max(d.abs().sqrt().sqrt()),
    );
    let (scaled, in_range) = scale_monic(coeffs, scale);
    (scale, scaled, in_range)
}

/// Pick a real root `y` of the resolvent cubic of `x⁴ + a x³ + b x² + c x + d`
/// and return it with `R² = a²/4 - b + y` and `S² = y²/4 - d`.
///
/// Roots that make either square negative beyond rounding are skipped; of
/// the rest, the one with the largest `max(R², S²)` is best conditioned.
fn resolvent_root(a: f64, b: f64, c: f64, d: f64) -> (f64, f64, f64) {
    let resolvent = Cubic::new(
        1.0,
        -b,
        a * c - 4.0 * d,
        -(a * a * d - 4.0 * b * d + c * c),
    );
    let candidates = resolvent.real_roots();

    let mut best: Option<(f64, f64, f64, f64)> = None;
    for &y in &candidates {
        let r2 = a * a / 4.0 - b + y;
        let s2 = y * y / 4.0 - d;
        let r2_tol = MULTIPLICITY_TOLERANCE * (a * a / 4.0).max(b.abs()).max(y.abs());
        let s2_tol = MULTIPLICITY_TOLERANCE * (y * y / 4.0).max(d.abs());
        if r2 < -r2_tol || s2 < -s2_tol {
            continue;
        }
        let (r2, s2) = (r2.max(0.0), s2.max(0.0));
        let key = r2.max(s2);
        if best.map_or(true, |(best_key, ..)| key > best_key) {
            best = Some((key, y, r2, s2));
        }
    }
    if let Some((_, y, r2, s2)) = best {
        return (y, r2, s2);
    }

    let y = candidates.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    log::debug!("no resolvent root gives real factors, falling back to y = {y}");
    (y, (a * a / 4.0 - b + y).max(0.0), (y * y / 4.0 - d).max(0.0))
}

/// Choose the finite candidate with the smallest error, preferring earlier
/// candidates on ties. The first candidate is the fallback.
fn least_error(candidates: [Option<f64>; 3], error: impl Fn(f64) -> f64) -> f64 {
    let mut best: Option<(f64, f64)> = None;
    for x in candidates.into_iter().flatten() {
        if !x.is_finite() {
            continue;
        }
        let err = error(x);
        if best.map_or(true, |(best_err, _)| err < best_err) {
            best = Some((err, x));
        }
    }
    match (best, candidates[0]) {
        (Some((_, x)), _) | (None, Some(x)) => x,
        (None, None) => 0.0,
    }
}

/// The relative backward error of a factorization: for each coefficient
/// equation, the mismatch divided by the magnitudes of the terms involved.
fn factor_error([a1, b1, a2, b2]: Factors, [a, b, c, d]: [f64; 4]) -> f64 {
    let equations = [
        (b1 * b2, (b1 * b2).abs() + d.abs(), d),
        (
            a1 * b2 + a2 * b1,
            (a1 * b2).abs() + (a2 * b1).abs() + c.abs(),
            c,
        ),
        (
            b1 + a1 * a2 + b2,
            b1.abs() + (a1 * a2).abs() + b2.abs() + b.abs(),
            b,
        ),
        (a1 + a2, a1.abs() + a2.abs() + a.abs(), a),
    ];
    equations
        .iter()
        .filter(|(_, magnitude, _)| *magnitude > 0.0)
        .map(|(value, magnitude, target)| (value - target).abs() / magnitude)
        .sum()
}

/// Refine the factors with Newton's method on
/// `α₁ + α₂ = a`, `β₁ + α₁α₂ + β₂ = b`, `α₁β₂ + α₂β₁ = c`, `β₁β₂ = d`.
///
/// The Jacobian is inverted in closed form. Newton's method can get worse
/// before it gets better when the factors have nearby roots, so the best
/// iterate seen is returned, along with the number of steps taken.
fn refine_factors(mut x: Factors, coeffs: [f64; 4]) -> (Factors, usize) {
    let [a, b, c, d] = coeffs;
    let mut err = factor_error(x, coeffs);
    let mut best = (err, x);
    let mut steps = 0;
    while steps < MAX_FACTOR_STEPS && err > MACHINE_EPSILON {
        let [a1, b1, a2, b2] = x;
        let da = a1 - a2;
        let det = b1 * b1 + b1 * (-a2 * da - 2.0 * b2) + b2 * (a1 * da + b2);
        if det == 0.0 {
            break;
        }
        let j00 = da;
        let j01 = b2 - b1;
        let j02 = b1 * a2 - a1 * b2;
        let j03 = -b1 * j01 - a1 * j02;
        let inverse = [
            [j00, j01, j02, j03],
            [a1 * j00 + j01, -b1 * j00, -b1 * j01, -b1 * j02],
            [-j00, -j01, -j02, j02 * a2 + j01 * b2],
            [-a2 * j00 - j01, j00 * b2, b2 * j01, b2 * j02],
        ];
        let residual = [
            b1 * b2 - d,
            b1 * a2 + a1 * b2 - c,
            b1 + a1 * a2 + b2 - b,
            a1 + a2 - a,
        ];
        let mut next = x;
        for (xk, row) in next.iter_mut().zip(&inverse) {
            let dot = row
                .iter()
                .zip(&residual)
                .fold(0.0, |acc, (j, f)| acc + j * f);
            *xk -= dot / det;
        }
        if !next.iter().all(|v| v.is_finite()) {
            break;
        }
        x = next;
        err = factor_error(x, coeffs);
        steps += 1;
        if err < best.0 {
            best = (err, x);
        }
    }
    (best.1, steps)
}

impl fmt::Display for Quartic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e] = self.coeffs;
        writeln!(f, "quartic: {a} x^4 + {b} x^3 + {c} x^2 + {d} x + {e}")?;
        write!(
            f,
            "{} real, {} complex after {} iterations:",
            self.num_real_roots, self.num_complex_roots, self.iterations
        )?;
        for z in self.roots() {
            write!(f, " {}", z)?;
        }
        Ok(())
    }
}

// Copyright 2026 the Polyroots Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Roots of cubic polynomials.

use core::fmt;

use arrayvec::ArrayVec;
use num_complex::Complex64;

use crate::check::Check;
use crate::common::{
    pow2_floor, scale_monic, sort_roots, MACHINE_EPSILON, MAX_ITERATIONS, MULTIPLICITY_TOLERANCE,
};
use crate::eval::{
    eval_monic_cubic, eval_monic_cubic_deriv2, eval_poly, eval_poly_complex, halley_step,
};
use crate::quadratic::Quadratic;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// The roots of `a x³ + b x² + c x + d`.
///
/// The solver follows N. Flocke, "Algorithm 954: An Accurate and Efficient
/// Cubic and Quartic Equation Solver for Physical Applications". The
/// polynomial is made monic and rescaled by a power of two, one real root is
/// isolated with Halley's method from a starting point where convergence is
/// monotone, and the remaining quadratic factor is obtained by deflation.
///
/// The three root slots hold, for a real result, the roots in increasing
/// order. When [`is_complex`](Self::is_complex) is set, slots 0 and 1 hold
/// the real part and the positive imaginary part of a conjugate pair, and
/// slot 2 holds the real root.
///
/// When `a` is zero the solver reduces to [`Quadratic`] on `(b, c, d)`, and
/// the counts and flags are those of the quadratic. When the coefficients
/// span so many orders of magnitude that scaling would underflow or overflow
/// them, the roots are computed as the reciprocals of the roots of
/// `d x³ + c x² + b x + a`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cubic {
    coeffs: [f64; 4],
    r: [f64; 3],
    num_roots: usize,
    iterations: usize,
    complex: bool,
    double: bool,
    triple: bool,
}

impl Cubic {
    /// Solve `a x³ + b x² + c x + d = 0`.
    ///
    /// ```
    /// use polyroots::Cubic;
    ///
    /// let cubic = Cubic::new(1.0, -6.0, 11.0, -6.0);
    /// assert_eq!(cubic.real_roots().as_slice(), &[1.0, 2.0, 3.0]);
    /// ```
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        let mut cubic = Self::default();
        cubic.setup(a, b, c, d);
        cubic
    }

    /// Replace the coefficients and recompute the roots.
    pub fn setup(&mut self, a: f64, b: f64, c: f64, d: f64) {
        *self = Self {
            coeffs: [a, b, c, d],
            ..Self::default()
        };
        self.find_roots();
    }

    fn find_roots(&mut self) {
        let [a, b, c, d] = self.coeffs;
        if a == 0.0 {
            let q = Quadratic::new(b, c, d);
            self.num_roots = q.num_roots();
            self.complex = q.is_complex();
            self.double = q.is_double();
            self.r = [q.real_root0(), q.real_root1(), 0.0];
            return;
        }
        self.num_roots = 3;
        if d == 0.0 {
            self.split_zero_root(&Quadratic::new(a, b, c));
            return;
        }
        let (scale, scaled, in_range) = monic_scaling([b / a, c / a, d / a]);
        if !in_range {
            let (rscale, rscaled, rin_range) = monic_scaling([c / d, b / d, a / d]);
            if rin_range {
                log::debug!("cubic coefficients out of range, solving for reciprocal roots");
                self.solve_monic(rscaled, rscale);
                self.invert_roots();
                return;
            }
        }
        self.solve_monic(scaled, scale);
    }

    /// The roots of `x (a x² + b x + c)`.
    fn split_zero_root(&mut self, q: &Quadratic) {
        let (x0, x1) = (q.real_root0(), q.real_root1());
        if q.is_complex() {
            self.complex = true;
            self.r = [x0, x1, 0.0];
            return;
        }
        self.r = [x0, x1, 0.0];
        sort_roots(&mut self.r);
        self.triple = q.is_double() && x0 == 0.0;
        self.double = !self.triple && (q.is_double() || x0 == 0.0 || x1 == 0.0);
    }

    /// The roots of `x³ + a x² + b x + c`, with `c` nonzero, given as the
    /// roots of the polynomial scaled down by `scale`.
    fn solve_monic(&mut self, [a, b, c]: [f64; 3], scale: f64) {
        // Shifting x by a/3 leaves x³ + p x + q; both vanish for a triple root.
        let shift = a / 3.0;
        let p = b - a * shift;
        let q = c - shift * (b - 2.0 * shift * shift);
        let p_tol = MULTIPLICITY_TOLERANCE * b.abs().max((a * shift).abs());
        let q_tol = MULTIPLICITY_TOLERANCE
            * c.abs()
                .max((shift * b).abs())
                .max((2.0 * shift * shift * shift).abs());
        if p.abs() <= p_tol && q.abs() <= q_tol {
            let x = -shift * scale;
            self.r = [x; 3];
            self.triple = true;
            return;
        }

        let x = self.isolate_root(a, b, c);

        // Deflate by (x - root), from whichever end is stable.
        let (e, f) = if x.abs() * x * x > c.abs() {
            let f = -c / x;
            ((f - b) / x, f)
        } else {
            let e = a + x;
            (e, b + x * e)
        };

        let half = 0.5 * e;
        let disc = half * half - f;
        if disc.abs() <= MULTIPLICITY_TOLERANCE * (half * half).max(f.abs()) {
            self.r = [x * scale, -half * scale, -half * scale];
            sort_roots(&mut self.r);
            self.double = true;
            return;
        }
        let factor = Quadratic::new(1.0, e, f);
        self.r = [
            factor.real_root0() * scale,
            factor.real_root1() * scale,
            x * scale,
        ];
        if factor.is_complex() {
            self.complex = true;
        } else {
            self.double = factor.is_double();
            sort_roots(&mut self.r);
        }
    }

    /// Replace each root `x` by `1 / x`, keeping the slot layout.
    fn invert_roots(&mut self) {
        if self.complex {
            let pair = Complex64::new(self.r[0], -self.r[1]).finv();
            self.r = [pair.re, pair.im, 1.0 / self.r[2]];
        } else {
            for x in &mut self.r {
                *x = 1.0 / *x;
            }
            sort_roots(&mut self.r);
        }
    }

    /// Find one real root of the scaled monic cubic.
    ///
    /// The start is on the far side of the inflection point from where the
    /// cubic crosses zero, beyond the local extremum if there is one. From
    /// there Halley's method converges without overshooting.
    fn isolate_root(&mut self, a: f64, b: f64, c: f64) -> f64 {
        let inflection = -a / 3.0;
        let y = eval_monic_cubic(inflection, a, b, c);
        let mut x = if y == 0.0 {
            inflection
        } else {
            let disc = a * a - 3.0 * b;
            let mut offset = y.cbrt().abs();
            if disc > 0.0 {
                offset = offset.max(2.0 / 3.0 * disc.sqrt());
            }
            inflection - offset.copysign(y)
        };

        let mut last_step = f64::INFINITY;
        let mut iterations = 0;
        while iterations < MAX_ITERATIONS {
            let (p, dp, ddp) = eval_monic_cubic_deriv2(x, a, b, c);
            if p == 0.0 || dp == 0.0 {
                break;
            }
            let step = halley_step(p, dp, ddp);
            // A step that fails to shrink means we are oscillating at
            // rounding level.
            if step.is_nan() || step.abs() >= last_step {
                break;
            }
            iterations += 1;
            x -= step;
            last_step = step.abs();
            if last_step <= MACHINE_EPSILON * x.abs() {
                break;
            }
        }
        if iterations == MAX_ITERATIONS {
            log::debug!("cubic root isolation stopped after {iterations} Halley steps at x = {x}");
        } else {
            log::trace!("cubic root isolated after {iterations} Halley steps");
        }
        self.iterations = iterations;
        x
    }

    /// The coefficients `[a, b, c, d]`, highest degree first.
    pub fn coeffs(&self) -> &[f64; 4] {
        &self.coeffs
    }

    /// The number of roots, counted with multiplicity.
    ///
    /// This is 3 unless `a` is zero, in which case it is the count for the
    /// quadratic `b x² + c x + d`.
    pub fn num_roots(&self) -> usize {
        self.num_roots
    }

    /// The number of Halley steps spent isolating the first root.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether two of the roots are a complex conjugate pair.
    pub fn is_complex(&self) -> bool {
        self.complex
    }

    /// Whether exactly two of the roots coincide.
    ///
    /// Two computed roots are merged when the discriminant of the deflated
    /// quadratic vanishes to within a few ulps of its terms. The merged
    /// roots are bit-identical.
    pub fn is_double(&self) -> bool {
        self.double
    }

    /// Whether all three roots coincide.
    pub fn is_triple(&self) -> bool {
        self.triple
    }

    /// The real roots, in increasing order, repeated by multiplicity.
    pub fn real_roots(&self) -> ArrayVec<f64, 3> {
        if self.complex {
            // A degenerate quadratic has no real root besides the pair.
            return self.r[2..self.num_roots.max(2)].iter().copied().collect();
        }
        self.r[..self.num_roots].iter().copied().collect()
    }

    /// The strictly positive real roots, in increasing order.
    pub fn positive_roots(&self) -> ArrayVec<f64, 3> {
        self.real_roots().into_iter().filter(|&r| r > 0.0).collect()
    }

    /// The strictly negative real roots, in increasing order.
    pub fn negative_roots(&self) -> ArrayVec<f64, 3> {
        self.real_roots().into_iter().filter(|&r| r < 0.0).collect()
    }

    /// The first root slot: the smallest real root, or the real part of the
    /// complex pair.
    pub fn real_root0(&self) -> f64 {
        self.r[0]
    }

    /// The second root slot: the middle real root, or the imaginary part of
    /// the complex pair.
    pub fn real_root1(&self) -> f64 {
        self.r[1]
    }

    /// The third root slot, always a real root (when there are three roots).
    pub fn real_root2(&self) -> f64 {
        self.r[2]
    }

    /// The first root; for a complex pair, the one with positive imaginary part.
    pub fn root0(&self) -> Complex64 {
        if self.complex {
            Complex64::new(self.r[0], self.r[1])
        } else {
            Complex64::new(self.r[0], 0.0)
        }
    }

    /// The second root; for a complex pair, the one with negative imaginary part.
    pub fn root1(&self) -> Complex64 {
        if self.complex {
            Complex64::new(self.r[0], -self.r[1])
        } else {
            Complex64::new(self.r[1], 0.0)
        }
    }

    /// The third root, which is always real.
    pub fn root2(&self) -> Complex64 {
        Complex64::new(self.r[2], 0.0)
    }

    /// All the roots, complex pair first.
    pub fn roots(&self) -> ArrayVec<Complex64, 3> {
        [self.root0(), self.root1(), self.root2()]
            .into_iter()
            .take(self.num_roots)
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

/// The power of two that brings the roots of `x³ + a x² + b x + c` near
/// unit size, the correspondingly scaled coefficients, and whether they are
/// all still in range.
fn monic_scaling(coeffs: [f64; 3]) -> (f64, [f64; 3], bool) {
    let [a, b, c] = coeffs;
    let scale = pow2_floor(a.abs().max(b.abs().sqrt()).max(c.abs().cbrt()));
    let (scaled, in_range) = scale_monic(coeffs, scale);
    (scale, scaled, in_range)
}

impl fmt::Display for Cubic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.coeffs;
        writeln!(f, "cubic: {a} x^3 + {b} x^2 + {c} x + {d}")?;
        if self.num_roots == 0 {
            return write!(f, "no roots");
        }
        let kind = if self.triple {
            "triple root"
        } else if self.double {
            "double root"
        } else if self.complex {
            "complex pair"
        } else {
            "simple roots"
        };
        write!(f, "{kind} after {} iterations:", self.iterations)?;
        for z in self.roots() {
            write!(f, " {}", z)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::assert_vieta;

    fn assert_near(actual: &[f64], expected: &[f64], rel: f64) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (x, y) in actual.iter().zip(expected) {
            assert!(
                (x - y).abs() <= rel * y.abs().max(1.0),
                "{actual:?} vs {expected:?}"
            );
        }
    }

    fn assert_exact_multiplicity(cubic: &Cubic) {
        let [r0, r1, r2] = cubic.r;
        if cubic.is_triple() {
            assert_eq!(r0.to_bits(), r1.to_bits());
            assert_eq!(r1.to_bits(), r2.to_bits());
        }
        if cubic.is_double() {
            assert!(r0.to_bits() == r1.to_bits() || r1.to_bits() == r2.to_bits());
        }
    }

    #[test]
    fn three_real_roots() {
        let cubic = Cubic::new(1.0, -6.0, 11.0, -6.0);
        assert_eq!(cubic.num_roots(), 3);
        assert!(!cubic.is_complex() && !cubic.is_double() && !cubic.is_triple());
        assert_eq!(cubic.real_roots().as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(cubic.iterations(), 0);
        assert!(cubic.check().is_ok());
    }

    #[test]
    fn widely_separated_roots() {
        let cubic = Cubic::new(1.0, -1000003.0, 3000002.0, -2000000.0);
        assert_near(&cubic.real_roots(), &[1.0, 2.0, 1e6], 1e-14);
        assert!(cubic.check().is_ok());

        // The roots are close to 1e-6 and 1e6, but not exactly there.
        let cubic = Cubic::new(1.0, -1.000002e6, 2.000001e6, -2.0);
        assert_near(
            &cubic.real_roots(),
            &[1.000000000001e-6, 2.0, 999999.999999],
            1e-12,
        );
        // The small root is accurate to full relative precision.
        assert!((cubic.real_root0() / 1.000000000001e-6 - 1.0).abs() < 1e-14);
        assert!(cubic.check().is_ok());
    }

    #[test]
    fn one_real_root_and_pair() {
        let cubic = Cubic::new(1.0, -3.0, 1.00000003e8, -1.00000001e8);
        assert!(cubic.is_complex());
        assert_eq!(cubic.num_roots(), 3);
        assert_near(&[cubic.real_root0(), cubic.real_root1()], &[1.0, 1e4], 1e-12);
        assert_near(&cubic.real_roots(), &[1.0], 1e-12);
        assert_eq!(cubic.root1(), cubic.root0().conj());
        assert!(cubic.check().is_ok());

        let cubic = Cubic::new(1.0, -1.000002e6, 1.02000001e8, -1.00000001e14);
        assert!(cubic.is_complex());
        assert_near(&cubic.real_roots(), &[1e6], 1e-12);
        assert_near(&[cubic.root0().re, cubic.root0().im], &[1.0, 1e4], 1e-9);
        assert!(cubic.check().is_ok());

        let cubic = Cubic::new(1.0, -2.000001, 1.00000001e8, -100.000001);
        assert!(cubic.is_complex());
        assert_near(&cubic.real_roots(), &[1e-6], 1e-12);
        assert!((cubic.real_root2() / 1.00000000000002e-6 - 1.0).abs() < 1e-14);
        assert_near(&[cubic.root0().re, cubic.root0().im], &[1.0, 1e4], 1e-12);
        assert!(cubic.check().is_ok());
    }

    #[test]
    fn ill_conditioned_pair() {
        // Roots 1e-6 and 10000 ± 0.001, which are too close to resolve, so
        // only the residuals are meaningful.
        let cubic = Cubic::new(
            1.0,
            -20000000001.0 / 1e6,
            100000000019999.0 / 1e6,
            -99999999999999.0 / 1e12,
        );
        assert_eq!(cubic.roots().len(), 3);
        assert!(cubic.check().is_ok());
    }

    #[test]
    fn complex_layout() {
        let cubic = Cubic::new(1.0, 0.0, 0.0, -8.0);
        assert!(cubic.is_complex());
        assert_near(
            &[cubic.real_root0(), cubic.real_root1(), cubic.real_root2()],
            &[-1.0, 3f64.sqrt(), 2.0],
            1e-15,
        );
        let roots = cubic.roots();
        assert_eq!(roots.len(), 3);
        assert!(roots[0].im > 0.0);
        assert_eq!(roots[1], roots[0].conj());
        assert_eq!(roots[2].im, 0.0);

        let cubic = Cubic::new(1.0, 1.0, 1.0, 1.0);
        assert!(cubic.is_complex());
        assert_near(&cubic.r, &[0.0, 1.0, -1.0], 1e-15);
    }

    #[test]
    fn double_roots() {
        let cubic = Cubic::new(1.0, -4.0, 5.0, -2.0);
        assert!(cubic.is_double());
        assert_near(&cubic.real_roots(), &[1.0, 1.0, 2.0], 1e-15);
        assert_exact_multiplicity(&cubic);

        let cubic = Cubic::new(1.0, 0.0, -3.0, 2.0);
        assert!(cubic.is_double());
        assert_near(&cubic.real_roots(), &[-2.0, 1.0, 1.0], 1e-15);
        assert_exact_multiplicity(&cubic);
    }

    #[test]
    fn triple_roots() {
        let cubic = Cubic::new(1.0, -3.0, 3.0, -1.0);
        assert!(cubic.is_triple());
        assert!(!cubic.is_double());
        assert_eq!(cubic.real_roots().as_slice(), &[1.0, 1.0, 1.0]);

        let cubic = Cubic::new(2.0, -18.0, 54.0, -54.0);
        assert!(cubic.is_triple());
        assert_eq!(cubic.real_roots().as_slice(), &[3.0, 3.0, 3.0]);

        let cubic = Cubic::new(1.0, 0.0, 0.0, 0.0);
        assert!(cubic.is_triple());
        assert_eq!(cubic.real_roots().as_slice(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn zero_constant_term() {
        let cubic = Cubic::new(1.0, -2.0, 1.0, 0.0);
        assert!(cubic.is_double());
        assert_eq!(cubic.real_roots().as_slice(), &[0.0, 1.0, 1.0]);

        let cubic = Cubic::new(1.0, -1.0, 0.0, 0.0);
        assert!(cubic.is_double());
        assert_eq!(cubic.real_roots().as_slice(), &[0.0, 0.0, 1.0]);

        let cubic = Cubic::new(2.0, 0.0, -8.0, 0.0);
        assert!(!cubic.is_double());
        assert_near(&cubic.real_roots(), &[-2.0, 0.0, 2.0], 1e-15);

        let cubic = Cubic::new(1.0, 0.0, 1.0, 0.0);
        assert!(cubic.is_complex());
        assert_eq!(cubic.real_roots().as_slice(), &[0.0]);
        assert_eq!(cubic.root0(), Complex64::new(0.0, 1.0));
    }

    #[test]
    fn degenerate() {
        let cubic = Cubic::new(0.0, 1.0, -3.0, 2.0);
        assert_eq!(cubic.num_roots(), 2);
        assert_eq!(cubic.real_roots().as_slice(), &[1.0, 2.0]);

        let cubic = Cubic::new(0.0, 1.0, 0.0, 1.0);
        assert_eq!(cubic.num_roots(), 2);
        assert!(cubic.is_complex());
        assert!(cubic.real_roots().is_empty());
        assert_eq!(cubic.roots().len(), 2);

        let cubic = Cubic::new(0.0, 0.0, 2.0, -1.0);
        assert_eq!(cubic.num_roots(), 1);
        assert_eq!(cubic.real_roots().as_slice(), &[0.5]);

        let cubic = Cubic::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(cubic.num_roots(), 0);
        assert!(cubic.roots().is_empty());
    }

    #[test]
    fn close_roots() {
        // A perturbed double root near -1, next to a simple root near -2.
        let cubic = Cubic::new(1.0, 4.0, 5.0, 2.0 - 1e-12);
        let roots = cubic.real_roots();
        assert_eq!(roots.len(), 3);
        assert_near(
            &roots,
            &[-1.9999999999989999, -1.0000010000449493, -0.9999989999560507],
            1e-9,
        );
        assert!(cubic.check().is_ok());

        // The perturbation in the other direction makes the pair complex.
        let cubic = Cubic::new(1.0, 4.0, 5.0, 2.0 + 1e-12);
        assert!(cubic.is_complex());
        assert_near(&cubic.real_roots(), &[-2.0], 1e-11);
    }

    #[test]
    fn scaling() {
        for s in [1e-100, 1e-20, 1.0, 1e20, 1e100] {
            let cubic = Cubic::new(1.0, -6.0 * s, 11.0 * s * s, -6.0 * s * s * s);
            let roots = cubic.real_roots();
            assert_near(
                &[roots[0] / s, roots[1] / s, roots[2] / s],
                &[1.0, 2.0, 3.0],
                1e-14,
            );
        }
    }

    #[test]
    fn tiny_leading_coefficient() {
        // Scaling for the root near -1e300 would flush the other
        // coefficients to zero.
        let cubic = Cubic::new(1e-300, 1.0, 1.0, 1.0);
        assert!(cubic.is_complex());
        assert!(!cubic.is_double());
        assert_near(
            &[cubic.real_root0(), cubic.real_root1()],
            &[-0.5, 0.75f64.sqrt()],
            1e-15,
        );
        assert!((cubic.real_root2() / -1e300 - 1.0).abs() < 1e-15);
        assert!(cubic.eval_complex(cubic.root0()).norm() < 1e-14);
        assert!(cubic.eval_complex(cubic.root1()).norm() < 1e-14);

        // Here it is the constant term that is out of reach.
        let cubic = Cubic::new(1.0, 1e200, 0.0, 1.0);
        assert!(cubic.is_complex());
        assert_near(&cubic.real_roots(), &[-1e200], 1e-15);
        assert!(cubic.root0().re.abs() < 1e-300);
        assert!((cubic.root0().im / 1e-100 - 1.0).abs() < 1e-15);
    }

    #[test]
    fn sign_filters() {
        let cubic = Cubic::new(1.0, 0.0, -1.0, 0.0);
        assert_eq!(cubic.positive_roots().as_slice(), &[1.0]);
        assert_eq!(cubic.negative_roots().as_slice(), &[-1.0]);
    }

    #[test]
    fn setup_and_display() {
        let mut cubic = Cubic::new(1.0, -3.0, 3.0, -1.0);
        assert!(cubic.to_string().contains("triple root"));
        cubic.setup(1.0, -6.0, 11.0, -6.0);
        assert!(!cubic.is_triple());
        assert_eq!(cubic.coeffs(), &[1.0, -6.0, 11.0, -6.0]);
        assert_eq!(cubic.eval(4.0), 6.0);
        assert_eq!(
            cubic.eval_complex(Complex64::new(2.0, 0.0)),
            Complex64::new(0.0, 0.0)
        );
        assert!(cubic.to_string().contains("simple roots"));
    }

    #[test]
    fn residuals() {
        arbtest::arbtest(|u| {
            let cubic = crate::arbitrary::cubic(u)?;
            let real = cubic.real_roots();
            assert!(real.windows(2).all(|w| w[0] <= w[1]), "{cubic}");
            assert_exact_multiplicity(&cubic);
            let flags = [cubic.is_complex(), cubic.is_double(), cubic.is_triple()];
            assert!(flags.iter().filter(|&&f| f).count() <= 1, "{cubic}");
            let check = cubic.check();
            assert!(check.is_ok(), "{cubic}\n{check}");
            assert_vieta(cubic.coeffs(), &cubic.roots(), 64.0 * MACHINE_EPSILON);
            Ok(())
        })
        .budget_ms(2_000);
    }

    #[test]
    fn planted_roots() {
        arbtest::arbtest(|u| {
            let (coeffs, _) = crate::arbitrary::planted::<4>(u)?;
            let [a, b, c, d] = coeffs;
            let cubic = Cubic::new(a, b, c, d);
            assert_eq!(cubic.roots().len(), 3);
            let check = cubic.check();
            assert!(check.is_ok(), "{cubic}\n{check}");
            assert_vieta(&coeffs, &cubic.roots(), 64.0 * MACHINE_EPSILON);
            Ok(())
        })
        .budget_ms(2_000);
    }

    #[test]
    fn wild_coefficients() {
        arbtest::arbtest(|u| {
            let a = crate::arbitrary::finite_float(u)?;
            let b = crate::arbitrary::finite_float(u)?;
            let c = crate::arbitrary::finite_float(u)?;
            let d = crate::arbitrary::finite_float(u)?;
            let cubic = Cubic::new(a, b, c, d);
            assert!(cubic.iterations() <= MAX_ITERATIONS);
            assert!(cubic.roots().len() <= 3);
            Ok(())
        })
        .budget_ms(1_000);
    }

    #[test]
    fn integer_roots() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(954);
        for _ in 0..1000 {
            let mut expected = [0.0; 3];
            for x in &mut expected {
                *x = f64::from(rng.random_range(-20_i32..=20));
            }
            sort_roots(&mut expected);
            let [x0, x1, x2] = expected;
            let cubic = Cubic::new(
                1.0,
                -(x0 + x1 + x2),
                x0 * x1 + x0 * x2 + x1 * x2,
                -x0 * x1 * x2,
            );
            assert!(!cubic.is_complex(), "{cubic}");
            // Repeated roots are ill-conditioned, so only demand a
            // square-root-of-epsilon match.
            assert_near(&cubic.real_roots(), &expected, 1e-6);
            assert!(cubic.check().is_ok(), "{cubic}");
        }
    }
}

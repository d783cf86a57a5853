// Copyright 2026 the Polyroots Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Roots of quadratic polynomials.

use core::fmt;

use arrayvec::ArrayVec;
use num_complex::Complex64;

use crate::check::Check;
use crate::eval::{eval_poly, eval_poly_complex};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// The roots of `a x² + b x + c`.
///
/// All the work happens when the solver is constructed, so the accessors are
/// cheap. The roots are computed without the cancellation of the textbook
/// formula: the discriminant is formed from ratios that cannot overflow, and
/// the smaller root is recovered from the product of the roots.
///
/// Depending on [`is_complex`](Self::is_complex), the two root slots hold
/// either the real roots in increasing order, or the real part and the
/// (positive) imaginary part of a conjugate pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quadratic {
    coeffs: [f64; 3],
    r0: f64,
    r1: f64,
    num_roots: usize,
    complex: bool,
    double: bool,
}

impl Quadratic {
    /// Solve `a x² + b x + c = 0`.
    ///
    /// If `a` is zero this degenerates to the linear equation `b x + c = 0`,
    /// which has one root unless `b` is zero too.
    ///
    /// ```
    /// use polyroots::Quadratic;
    ///
    /// let q = Quadratic::new(1.0, -3.0, 2.0);
    /// assert_eq!(q.real_roots().as_slice(), &[1.0, 2.0]);
    /// ```
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        let mut quadratic = Self::default();
        quadratic.setup(a, b, c);
        quadratic
    }

    /// Replace the coefficients and recompute the roots.
    pub fn setup(&mut self, a: f64, b: f64, c: f64) {
        *self = Self {
            coeffs: [a, b, c],
            ..Self::default()
        };
        self.find_roots();
    }

    fn find_roots(&mut self) {
        let [a, b, c] = self.coeffs;
        if a == 0.0 {
            if b != 0.0 {
                self.num_roots = 1;
                self.r0 = -c / b;
            }
            return;
        }
        self.num_roots = 2;
        if c == 0.0 {
            self.double = b == 0.0;
            if !self.double {
                let r = -b / a;
                if r < 0.0 {
                    self.r0 = r;
                } else {
                    self.r1 = r;
                }
            }
            return;
        }

        // Here hb² - a c = s e, with the scale s chosen to keep the products
        // in range.
        let hb = 0.5 * b;
        let (e, d) = if hb.abs() < c.abs() {
            let e = hb * (hb / c.abs()) - if c < 0.0 { -a } else { a };
            (e, e.abs().sqrt() * c.abs().sqrt())
        } else {
            let e = 1.0 - (a / hb) * (c / hb);
            (e, e.abs().sqrt() * hb.abs())
        };

        if e < 0.0 {
            self.complex = true;
            self.r0 = -hb / a;
            self.r1 = (d / a).abs();
        } else if d == 0.0 {
            self.double = true;
            self.r0 = -hb / a;
            self.r1 = self.r0;
        } else {
            // Add magnitudes for the larger root, divide for the smaller.
            let d = if hb >= 0.0 { -d } else { d };
            let big = (d - hb) / a;
            let small = if big != 0.0 { (c / big) / a } else { 0.0 };
            (self.r0, self.r1) = if big > small { (small, big) } else { (big, small) };
        }
    }

    /// The coefficients `[a, b, c]`, highest degree first.
    pub fn coeffs(&self) -> &[f64; 3] {
        &self.coeffs
    }

    /// The number of roots, counted with multiplicity.
    ///
    /// This is 2 for a proper quadratic, 1 for a linear equation, and 0 when
    /// both `a` and `b` are zero.
    pub fn num_roots(&self) -> usize {
        self.num_roots
    }

    /// Whether the roots are a complex conjugate pair.
    pub fn is_complex(&self) -> bool {
        self.complex
    }

    /// Whether the two roots coincide.
    ///
    /// The decision is exact: the computed discriminant must vanish.
    pub fn is_double(&self) -> bool {
        self.double
    }

    /// The real roots, in increasing order.
    ///
    /// A double root appears twice.
    pub fn real_roots(&self) -> ArrayVec<f64, 2> {
        if self.complex {
            return ArrayVec::new();
        }
        [self.r0, self.r1].into_iter().take(self.num_roots).collect()
    }

    /// The strictly positive real roots, in increasing order.
    pub fn positive_roots(&self) -> ArrayVec<f64, 2> {
        self.real_roots().into_iter().filter(|&r| r > 0.0).collect()
    }

    /// The strictly negative real roots, in increasing order.
    pub fn negative_roots(&self) -> ArrayVec<f64, 2> {
        self.real_roots().into_iter().filter(|&r| r < 0.0).collect()
    }

    /// The first root slot.
    ///
    /// This is the smaller real root, or the real part of a complex pair.
    pub fn real_root0(&self) -> f64 {
        self.r0
    }

    /// The second root slot.
    ///
    /// This is the larger real root, or the imaginary part of a complex pair.
    pub fn real_root1(&self) -> f64 {
        self.r1
    }

    /// The first root; for a complex pair, the one with positive imaginary part.
    pub fn root0(&self) -> Complex64 {
        if self.complex {
            Complex64::new(self.r0, self.r1)
        } else {
            Complex64::new(self.r0, 0.0)
        }
    }

    /// The second root; for a complex pair, the one with negative imaginary part.
    pub fn root1(&self) -> Complex64 {
        if self.complex {
            Complex64::new(self.r0, -self.r1)
        } else {
            Complex64::new(self.r1, 0.0)
        }
    }

    /// All the roots, real or complex.
    pub fn roots(&self) -> ArrayVec<Complex64, 2> {
        [self.root0(), self.root1()]
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

    /// Evaluate the polynomial and its derivative at `x`.
    pub fn eval_deriv(&self, x: f64) -> (f64, f64) {
        let [a, b, c] = self.coeffs;
        let p = (a * x + b) * x + c;
        let dp = 2.0 * a * x + b;
        (p, dp)
    }

    /// Compare the residuals at the computed roots against rounding level.
    pub fn check(&self) -> Check {
        Check::new(&self.coeffs, self.roots())
    }
}

impl fmt::Display for Quadratic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.coeffs;
        writeln!(f, "quadratic: {a} x^2 + {b} x + {c}")?;
        match self.num_roots {
            0 => write!(f, "no roots"),
            1 => write!(f, "linear, x = {}", self.r0),
            _ if self.complex => write!(
                f,
                "complex pair, x = {} ± {}i",
                self.r0, self.r1
            ),
            _ if self.double => write!(f, "double root, x = {}", self.r0),
            _ => write!(f, "x0 = {}, x1 = {}", self.r0, self.r1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::assert_vieta;
    use crate::common::MACHINE_EPSILON;

    fn near(x: f64, expected: f64) -> bool {
        (x - expected).abs() <= 1e-14 * expected.abs().max(1.0)
    }

    #[test]
    fn distinct_real() {
        let q = Quadratic::new(1.0, -3.0, 2.0);
        assert_eq!(q.num_roots(), 2);
        assert!(!q.is_complex());
        assert!(!q.is_double());
        assert_eq!(q.real_roots().as_slice(), &[1.0, 2.0]);
        assert!(q.check().is_ok());
    }

    #[test]
    fn complex_pair() {
        let q = Quadratic::new(1.0, 0.0, 1.0);
        assert!(q.is_complex());
        assert!(q.real_roots().is_empty());
        assert_eq!(q.root0(), Complex64::new(0.0, 1.0));
        assert_eq!(q.root1(), Complex64::new(0.0, -1.0));
        assert!(q.check().is_ok());

        let q = Quadratic::new(1.0, 2.0, 5.0);
        assert!(q.is_complex());
        assert_eq!(q.root0(), Complex64::new(-1.0, 2.0));
        assert_eq!(q.root1(), Complex64::new(-1.0, -2.0));
    }

    #[test]
    fn double_root() {
        let q = Quadratic::new(1.0, -2.0, 1.0);
        assert!(q.is_double());
        assert!(!q.is_complex());
        assert_eq!(q.real_roots().as_slice(), &[1.0, 1.0]);

        let q = Quadratic::new(4.0, 4.0, 1.0);
        assert!(q.is_double());
        assert_eq!(q.real_roots().as_slice(), &[-0.5, -0.5]);
    }

    #[test]
    fn degenerate() {
        let q = Quadratic::new(0.0, 0.0, 0.0);
        assert_eq!(q.num_roots(), 0);
        assert!(q.real_roots().is_empty());
        assert!(q.roots().is_empty());
        assert_eq!(q, Quadratic::default());

        let q = Quadratic::new(0.0, 0.0, 3.0);
        assert_eq!(q.num_roots(), 0);

        let q = Quadratic::new(0.0, 2.0, -4.0);
        assert_eq!(q.num_roots(), 1);
        assert_eq!(q.real_roots().as_slice(), &[2.0]);
        assert_eq!(q.roots().as_slice(), &[Complex64::new(2.0, 0.0)]);
    }

    #[test]
    fn zero_constant_term() {
        let q = Quadratic::new(2.0, -4.0, 0.0);
        assert_eq!(q.real_roots().as_slice(), &[0.0, 2.0]);
        assert!(!q.is_double());

        let q = Quadratic::new(2.0, 4.0, 0.0);
        assert_eq!(q.real_roots().as_slice(), &[-2.0, 0.0]);

        let q = Quadratic::new(3.0, 0.0, 0.0);
        assert!(q.is_double());
        assert_eq!(q.real_roots().as_slice(), &[0.0, 0.0]);
    }

    #[test]
    fn no_cancellation() {
        // The textbook formula loses every digit of the small root here.
        let q = Quadratic::new(1.0, -1e8, 1.0);
        let roots = q.real_roots();
        assert!(near(roots[0], 1e-8));
        assert!(near(roots[1], 1e8));
    }

    #[test]
    fn no_overflow() {
        // b² overflows.
        let q = Quadratic::new(1.0, -3e200, 2e300);
        assert!(!q.is_complex());
        assert!(near(q.real_root0(), 2e300 / 3e200));
        assert!(near(q.real_root1(), 3e200));

        // a c underflows.
        let q = Quadratic::new(1e-300, 3e-300, 2e-300);
        assert!(near(q.real_root0(), -2.0));
        assert!(near(q.real_root1(), -1.0));
    }

    #[test]
    fn sign_filters() {
        let q = Quadratic::new(1.0, -1.0, -6.0);
        assert_eq!(q.positive_roots().as_slice(), &[3.0]);
        assert_eq!(q.negative_roots().as_slice(), &[-2.0]);

        let q = Quadratic::new(1.0, -2.0, 0.0);
        assert_eq!(q.positive_roots().as_slice(), &[2.0]);
        assert!(q.negative_roots().is_empty());

        let q = Quadratic::new(1.0, 0.0, 1.0);
        assert!(q.positive_roots().is_empty());
    }

    #[test]
    fn setup_recomputes() {
        let mut q = Quadratic::new(1.0, 0.0, 1.0);
        q.setup(1.0, -3.0, 2.0);
        assert!(!q.is_complex());
        assert_eq!(q.coeffs(), &[1.0, -3.0, 2.0]);
        assert_eq!(q, Quadratic::new(1.0, -3.0, 2.0));
    }

    #[test]
    fn evaluation() {
        let q = Quadratic::new(2.0, -3.0, 1.0);
        assert_eq!(q.eval(2.0), 3.0);
        assert_eq!(q.eval_deriv(2.0), (3.0, 5.0));
        let z = Complex64::new(0.0, 1.0);
        assert_eq!(q.eval_complex(z), Complex64::new(-1.0, -3.0));
    }

    #[test]
    fn display() {
        let text = Quadratic::new(1.0, 0.0, 1.0).to_string();
        assert!(text.contains("complex pair"));
        assert!(Quadratic::new(1.0, -2.0, 1.0).to_string().contains("double root"));
        assert!(Quadratic::default().to_string().contains("no roots"));
    }

    #[test]
    fn residuals() {
        arbtest::arbtest(|u| {
            let q = crate::arbitrary::quadratic(u)?;
            let roots = q.real_roots();
            assert!(roots.windows(2).all(|w| w[0] <= w[1]));
            if q.is_double() {
                assert_eq!(q.real_root0().to_bits(), q.real_root1().to_bits());
            }
            let check = q.check();
            assert!(check.is_ok(), "{q}\n{check}");
            assert_vieta(q.coeffs(), &q.roots(), 8.0 * MACHINE_EPSILON);
            Ok(())
        })
        .budget_ms(2_000);
    }
}

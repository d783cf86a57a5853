// Copyright 2026 the Polyroots Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floating point constants and classification helpers shared by the solvers.

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            $(#[inline]
            fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("polyroots requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs;
    fn cbrt(self) -> Self => cbrt;
    fn copysign(self, sign: Self) -> Self => copysign;
    fn sqrt(self) -> Self => sqrt;
}

/// The distance between `1.0` and the next larger `f64`.
pub const MACHINE_EPSILON: f64 = f64::EPSILON;

/// The square root of [`MACHINE_EPSILON`], exactly `2^-26`.
pub const SQRT_EPSILON: f64 = 1.4901161193847656e-8;

/// Relative tolerance under which two computed roots are reported as one
/// repeated root.
pub(crate) const MULTIPLICITY_TOLERANCE: f64 = 8.0 * MACHINE_EPSILON;

/// Upper bound on the number of Halley steps used to isolate a cubic root.
pub(crate) const MAX_ITERATIONS: usize = 32;

/// Is `x` exactly zero (of either sign)?
///
/// Subnormal values are not zero.
#[inline]
pub fn is_zero(x: f64) -> bool {
    x == 0.0
}

/// Is `x` positive or negative infinity?
#[inline]
pub fn is_infinite(x: f64) -> bool {
    x.is_infinite()
}

/// Is `x` a NaN?
#[inline]
pub fn is_nan(x: f64) -> bool {
    x.is_nan()
}

/// Is `x` neither infinite nor NaN?
#[inline]
pub fn is_regular(x: f64) -> bool {
    x.is_finite()
}

/// The largest power of two not exceeding `x`.
///
/// Returns `1.0` if `x` is zero, subnormal, or not finite. Scaling by the
/// result is exact, which is what the solvers rely on.
pub(crate) fn pow2_floor(x: f64) -> f64 {
    const EXPONENT_MASK: u64 = 0x7ff0_0000_0000_0000;
    if x.is_normal() {
        f64::from_bits(x.to_bits() & EXPONENT_MASK)
    } else {
        1.0
    }
}

/// Divide the lower coefficients `[c₁, c₂, …]` of a monic polynomial by
/// `scale, scale², …`, which divides its roots by `scale`.
///
/// Also reports whether every nonzero coefficient stayed a finite normal
/// number. When one does not, roots have been lost to overflow or underflow.
pub(crate) fn scale_monic<const N: usize>(coeffs: [f64; N], scale: f64) -> ([f64; N], bool) {
    let mut scaled = coeffs;
    let mut in_range = true;
    for (k, c) in scaled.iter_mut().enumerate() {
        for _ in 0..=k {
            *c /= scale;
        }
        in_range &= c.is_finite() && (*c == 0.0 || c.abs() >= f64::MIN_POSITIVE);
    }
    (scaled, in_range)
}

/// Sort a short buffer of roots into ascending order.
pub(crate) fn sort_roots(roots: &mut [f64]) {
    roots.sort_unstable_by(f64::total_cmp);
}

// Copyright 2026 the Polyroots Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accurate roots of low-degree polynomials.
//!
//! The polyroots library computes every root, real and complex, of
//! quadratic, cubic and quartic polynomials. The textbook closed forms lose
//! most of their accuracy to cancellation and overflow when the coefficients
//! are badly scaled; the solvers here are stabilized versions that also
//! classify their results (real or complex, simple or repeated) instead of
//! just returning approximations.
//!
//! The cubic and quartic solvers follow N. Flocke, "Algorithm 954: An
//! Accurate and Efficient Cubic and Quartic Equation Solver for Physical
//! Applications", ACM TOMS 41(4), 2015.
//!
//! Each solver is a small `Copy` value that computes everything eagerly when
//! it is constructed (or re-initialized with `setup`) and then answers
//! queries about the roots.
//!
//! # Examples
//!
//! Three real roots, one of them far away from the others:
//! ```
//! use polyroots::Cubic;
//!
//! let cubic = Cubic::new(1.0, -1000003.0, 3000002.0, -2000000.0);
//! let roots = cubic.real_roots();
//! assert_eq!(roots.len(), 3);
//! assert!((roots[0] - 1.0).abs() < 1e-12);
//! assert!((roots[1] - 2.0).abs() < 1e-12);
//! assert!((roots[2] - 1e6).abs() < 1e-6);
//! ```
//!
//! Complex roots come in conjugate pairs:
//! ```
//! use polyroots::Quadratic;
//!
//! let quadratic = Quadratic::new(1.0, 0.0, 1.0);
//! assert!(quadratic.is_complex());
//! assert_eq!(quadratic.root0().im, 1.0);
//! assert_eq!(quadratic.root1().im, -1.0);
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. This is useful for
//! `no_std` environments. The solvers never allocate.
//!
//! The optional `serde` and `schemars` features derive serialization and
//! schema support for the solver types, and `arbitrary` exposes the
//! generators used by the property tests.
//!
//! [`libm`]: https://docs.rs/libm

// LINEBENDER LINT SET - lib.rs - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision,
    clippy::allow_attributes_without_reason
)]
// Part of the Linebender standard set, relaxed for the tests.
#![cfg_attr(test, allow(clippy::missing_assert_message))]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("polyroots requires either the `std` or `libm` feature");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use libm as _;

mod check;
pub mod common;
mod cubic;
mod eval;
mod quadratic;
mod quartic;

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;

pub use num_complex::Complex64;

pub use crate::check::Check;
pub use crate::cubic::Cubic;
pub use crate::eval::{
    eval_monic_cubic, eval_monic_cubic_deriv, eval_monic_cubic_deriv2, eval_monic_quartic,
    eval_monic_quartic_deriv, eval_monic_quartic_deriv2, eval_poly, eval_poly_bound,
    eval_poly_complex,
};
pub use crate::quadratic::Quadratic;
pub use crate::quartic::Quartic;

// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! # Ring Arithmetic Library
//!
//! Arithmetic in the quotient ring R = Z_q[x]/(f(x)) together with the vectors and
//! matrices over R that lattice-based schemes (Ring-LWE, Module-LWE) are built from.
//!
//! ## Features
//!
//! - Explicit ring handles: every value carries an `Arc<RingContext>`, so independent
//!   rings can coexist and mixing them is reported as an error.
//! - Negacyclic number-theoretic transform for x^N + 1 when q ≡ 1 (mod 2N), with a
//!   schoolbook fallback for every other ring.
//! - Custom and randomly sampled irreducible modulus polynomials.
//! - Vectors and matrices with shape-checked addition, products, transpose,
//!   concatenation and stacking.
//!
//! ## Mathematical Background
//!
//! Elements are polynomials of degree below N with coefficients modulo a prime q.
//! Products are reduced modulo f(x); for f = x^N + 1 this is negacyclic
//! convolution, where x^N ≡ -1. Norms use the balanced representative in
//! (-q/2, q/2].
//!
//! ## Concurrency
//!
//! All values are immutable after construction and every operation allocates its
//! result, so contexts, elements, vectors and matrices can be shared across
//! threads for reading without locking.

pub mod context;
pub mod element;
pub mod errors;
pub mod matrix;
pub mod modular;
pub mod modulus_poly;
pub mod ntt;
pub mod vector;

pub use context::{RingContext, MAX_COEFF_MODULUS};
pub use element::{Representation, RingElement};
pub use errors::{RingError, RingResult};
pub use matrix::RingMatrix;
pub use modulus_poly::ModulusPolynomial;
pub use ntt::NttTables;
pub use vector::RingVector;

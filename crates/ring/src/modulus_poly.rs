// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! The modulus polynomial f(x) of a quotient ring Z_q[x]/(f(x)).

use crate::errors::{RingError, RingResult};
use crate::modular::{add_mod, inv_mod, mul_mod, sub_mod};
use rand::Rng;
use std::fmt;
use tracing::debug;

/// Upper bound on sampling rounds per degree when searching for an irreducible polynomial.
const SEARCH_ROUNDS_PER_DEGREE: usize = 64;

/// A monic modulus polynomial.
///
/// Coefficients of [`ModulusPolynomial::Custom`] are stored in ascending order of
/// degree, including the leading 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModulusPolynomial {
    /// x^degree + 1
    Cyclotomic { degree: usize },
    /// An arbitrary monic polynomial.
    Custom { coefficients: Vec<u64> },
}

impl ModulusPolynomial {
    /// The negacyclic modulus x^degree + 1.
    pub fn cyclotomic(degree: usize) -> Self {
        ModulusPolynomial::Cyclotomic { degree }
    }

    /// A custom modulus from ascending coefficients `[f0, f1, ..., fN]`.
    ///
    /// The polynomial is validated (monic, irreducible) when a ring is built from it.
    pub fn custom(coefficients: Vec<u64>) -> Self {
        ModulusPolynomial::Custom { coefficients }
    }

    /// Degree of the polynomial, which is the ring degree N.
    pub fn degree(&self) -> usize {
        match self {
            ModulusPolynomial::Cyclotomic { degree } => *degree,
            ModulusPolynomial::Custom { coefficients } => coefficients.len().saturating_sub(1),
        }
    }

    pub fn is_cyclotomic(&self) -> bool {
        matches!(self, ModulusPolynomial::Cyclotomic { .. })
    }

    /// Ascending coefficients, leading 1 included.
    pub fn coefficients(&self) -> Vec<u64> {
        match self {
            ModulusPolynomial::Cyclotomic { degree } => {
                let mut coefficients = vec![0u64; degree + 1];
                coefficients[0] = 1;
                coefficients[*degree] = 1;
                coefficients
            }
            ModulusPolynomial::Custom { coefficients } => coefficients.clone(),
        }
    }

    /// Checks the polynomial against the coefficient modulus and returns its
    /// normalized form (custom coefficients reduced into `[0, q)`).
    pub(crate) fn validated(self, q: u64) -> RingResult<Self> {
        match self {
            ModulusPolynomial::Cyclotomic { degree } => {
                if degree == 0 {
                    return Err(RingError::configuration("ring degree must be positive"));
                }
                Ok(ModulusPolynomial::Cyclotomic { degree })
            }
            ModulusPolynomial::Custom { coefficients } => {
                let coefficients: Vec<u64> = coefficients.into_iter().map(|c| c % q).collect();
                if coefficients.len() < 2 {
                    return Err(RingError::configuration(
                        "modulus polynomial must have degree at least 1",
                    ));
                }
                if coefficients.last() != Some(&1) {
                    return Err(RingError::configuration("modulus polynomial must be monic"));
                }
                let poly = ModulusPolynomial::Custom { coefficients };
                if !poly.is_irreducible(q) {
                    return Err(RingError::configuration(format!(
                        "modulus polynomial {poly} is reducible over Z_{q}"
                    )));
                }
                Ok(poly)
            }
        }
    }

    /// Reduces a polynomial of any length modulo f(x) and q.
    ///
    /// The input is in ascending order with residues in `[0, q)`; the output has
    /// exactly N coefficients.
    pub(crate) fn reduce(&self, poly: &[u64], q: u64) -> Vec<u64> {
        let n = self.degree();
        match self {
            ModulusPolynomial::Cyclotomic { .. } => {
                let mut out = vec![0u64; n];
                for (k, &c) in poly.iter().enumerate() {
                    // x^N = -1, so x^k = (-1)^(k / N) x^(k mod N)
                    if (k / n) % 2 == 0 {
                        out[k % n] = add_mod(out[k % n], c, q);
                    } else {
                        out[k % n] = sub_mod(out[k % n], c, q);
                    }
                }
                out
            }
            ModulusPolynomial::Custom { coefficients } => {
                let mut out = poly_rem_monic(poly, coefficients, q);
                out.resize(n, 0);
                out
            }
        }
    }

    /// Ben-Or irreducibility test over Z_q. The polynomial must be monic.
    ///
    /// f of degree N is irreducible iff gcd(f, x^(q^i) - x) = 1 for every i <= N/2.
    pub fn is_irreducible(&self, q: u64) -> bool {
        let f = self.coefficients();
        let n = self.degree();
        if n == 0 {
            return false;
        }

        let x = poly_rem_monic(&[0, 1], &f, q);
        let mut h = x.clone();
        for _ in 1..=n / 2 {
            h = poly_pow_mod(&h, q, &f, q);
            let diff = poly_sub(&h, &x, q);
            let g = poly_gcd(diff, trim(f.clone()), q);
            if g.len() > 1 {
                return false;
            }
        }
        true
    }

    /// Samples monic polynomials of the given degree until one is irreducible over Z_q.
    pub fn random_irreducible<R: Rng + ?Sized>(
        degree: usize,
        q: u64,
        rng: &mut R,
    ) -> RingResult<Self> {
        if degree == 0 {
            return Err(RingError::configuration("ring degree must be positive"));
        }
        let max_rounds = SEARCH_ROUNDS_PER_DEGREE * degree;
        for attempt in 1..=max_rounds {
            let mut coefficients: Vec<u64> = (0..degree).map(|_| rng.gen_range(0..q)).collect();
            coefficients.push(1);
            let candidate = ModulusPolynomial::Custom { coefficients };
            if candidate.is_irreducible(q) {
                debug!(degree, modulus = q, attempt, "found irreducible polynomial");
                return Ok(candidate);
            }
        }
        Err(RingError::configuration(format!(
            "no irreducible polynomial of degree {degree} found over Z_{q} after {max_rounds} attempts"
        )))
    }
}

impl fmt::Display for ModulusPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coefficients = self.coefficients();
        let mut first = true;
        for (degree, coeff) in coefficients.iter().enumerate().rev() {
            if *coeff == 0 {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;

            if degree == 0 || *coeff != 1 {
                write!(f, "{coeff}")?;
            }
            if degree > 0 {
                write!(f, "x")?;
                if degree > 1 {
                    write!(f, "^{degree}")?;
                }
            }
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

fn trim(mut poly: Vec<u64>) -> Vec<u64> {
    while poly.last() == Some(&0) {
        poly.pop();
    }
    poly
}

fn poly_sub(a: &[u64], b: &[u64], q: u64) -> Vec<u64> {
    let len = a.len().max(b.len());
    let out = (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            sub_mod(x, y, q)
        })
        .collect();
    trim(out)
}

/// Full product of two polynomials, length len(a) + len(b) - 1.
pub(crate) fn poly_mul(a: &[u64], b: &[u64], q: u64) -> Vec<u64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0u64; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        if x == 0 {
            continue;
        }
        for (j, &y) in b.iter().enumerate() {
            out[i + j] = add_mod(out[i + j], mul_mod(x, y, q), q);
        }
    }
    out
}

/// Remainder of `a` modulo a monic `f`.
fn poly_rem_monic(a: &[u64], f: &[u64], q: u64) -> Vec<u64> {
    let n = f.len() - 1;
    let mut rem = a.to_vec();
    for k in (n..rem.len()).rev() {
        let c = rem[k];
        if c == 0 {
            continue;
        }
        for (i, &fi) in f.iter().enumerate().take(n) {
            rem[k - n + i] = sub_mod(rem[k - n + i], mul_mod(c, fi, q), q);
        }
        rem[k] = 0;
    }
    rem.truncate(n);
    trim(rem)
}

/// Remainder of `a` modulo a non-zero, trimmed `b` with arbitrary leading coefficient.
fn poly_rem(a: Vec<u64>, b: &[u64], q: u64) -> Vec<u64> {
    let n = b.len() - 1;
    let lead_inv = match b.last().and_then(|&lead| inv_mod(lead, q)) {
        Some(inv) => inv,
        None => return a,
    };
    let mut rem = trim(a);
    while rem.len() > n {
        let k = rem.len() - 1;
        let c = mul_mod(rem[k], lead_inv, q);
        for (i, &bi) in b.iter().enumerate() {
            rem[k - n + i] = sub_mod(rem[k - n + i], mul_mod(c, bi, q), q);
        }
        rem = trim(rem);
    }
    rem
}

fn poly_gcd(mut a: Vec<u64>, mut b: Vec<u64>, q: u64) -> Vec<u64> {
    while !b.is_empty() {
        let r = poly_rem(a, &b, q);
        a = b;
        b = r;
    }
    a
}

fn poly_pow_mod(base: &[u64], mut exp: u64, f: &[u64], q: u64) -> Vec<u64> {
    let mut result = vec![1u64];
    let mut base = base.to_vec();
    while exp > 0 {
        if exp & 1 == 1 {
            result = poly_rem_monic(&poly_mul(&result, &base, q), f, q);
        }
        base = poly_rem_monic(&poly_mul(&base, &base, q), f, q);
        exp >>= 1;
    }
    result
}

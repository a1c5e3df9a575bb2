// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Negacyclic number-theoretic transform over Z_q[x]/(x^N + 1).
//!
//! The transform evaluates a polynomial at the odd powers of a primitive 2N-th
//! root of unity ψ (ψ^N = -1), turning negacyclic convolution into a pointwise
//! product. It exists only when N is a power of two and q ≡ 1 (mod 2N).
//!
//! The forward pass is Cooley-Tukey with bit-reversed twiddles and produces
//! bit-reversed output; the inverse pass is Gentleman-Sande, consumes that
//! ordering and scales by N^{-1}.

use crate::errors::{RingError, RingResult};
use crate::modular::{add_mod, inv_mod, mul_mod, pow_mod, sub_mod};

/// Precomputed twiddle factors for one (N, q) pair.
#[derive(Debug, Clone)]
pub struct NttTables {
    degree: usize,
    modulus: u64,
    /// ψ^{bitrev(i)}
    psi_rev: Vec<u64>,
    /// ψ^{-bitrev(i)}
    psi_inv_rev: Vec<u64>,
    /// N^{-1} mod q
    degree_inv: u64,
}

impl NttTables {
    /// Builds the tables for degree `degree` and prime modulus `modulus`.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::TransformUnavailable`] if the degree is not a power of
    /// two or the modulus is not congruent to 1 modulo 2N.
    pub fn new(degree: usize, modulus: u64) -> RingResult<Self> {
        if !degree.is_power_of_two() {
            return Err(RingError::transform_unavailable(format!(
                "degree {degree} is not a power of two"
            )));
        }
        let two_n = 2 * degree as u64;
        if modulus % two_n != 1 {
            return Err(RingError::transform_unavailable(format!(
                "modulus {modulus} is not 1 mod {two_n}"
            )));
        }

        let psi = find_primitive_root(degree as u64, modulus).ok_or_else(|| {
            RingError::transform_unavailable(format!(
                "no primitive {two_n}-th root of unity mod {modulus}"
            ))
        })?;
        let psi_inv = inv_mod(psi, modulus)
            .ok_or_else(|| RingError::transform_unavailable("root of unity is not invertible"))?;
        let degree_inv = inv_mod(degree as u64, modulus)
            .ok_or_else(|| RingError::transform_unavailable("degree is not invertible"))?;

        let log_n = degree.trailing_zeros();
        let mut psi_rev = vec![0u64; degree];
        let mut psi_inv_rev = vec![0u64; degree];
        let mut power = 1u64;
        let mut inv_power = 1u64;
        for i in 0..degree {
            let j = bit_reverse(i, log_n);
            psi_rev[j] = power;
            psi_inv_rev[j] = inv_power;
            power = mul_mod(power, psi, modulus);
            inv_power = mul_mod(inv_power, psi_inv, modulus);
        }

        Ok(Self {
            degree,
            modulus,
            psi_rev,
            psi_inv_rev,
            degree_inv,
        })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// In-place forward transform. `values` must hold exactly N residues.
    pub fn forward(&self, values: &mut [u64]) {
        debug_assert_eq!(values.len(), self.degree);
        let q = self.modulus;
        let n = self.degree;
        let mut t = n;
        let mut m = 1;
        while m < n {
            t /= 2;
            for i in 0..m {
                let start = 2 * i * t;
                let s = self.psi_rev[m + i];
                for j in start..start + t {
                    let u = values[j];
                    let v = mul_mod(values[j + t], s, q);
                    values[j] = add_mod(u, v, q);
                    values[j + t] = sub_mod(u, v, q);
                }
            }
            m *= 2;
        }
    }

    /// In-place inverse transform, including the N^{-1} scaling.
    pub fn inverse(&self, values: &mut [u64]) {
        debug_assert_eq!(values.len(), self.degree);
        let q = self.modulus;
        let mut t = 1;
        let mut m = self.degree;
        while m > 1 {
            let h = m / 2;
            let mut start = 0;
            for i in 0..h {
                let s = self.psi_inv_rev[h + i];
                for j in start..start + t {
                    let u = values[j];
                    let v = values[j + t];
                    values[j] = add_mod(u, v, q);
                    values[j + t] = mul_mod(sub_mod(u, v, q), s, q);
                }
                start += 2 * t;
            }
            t *= 2;
            m = h;
        }
        for value in values.iter_mut() {
            *value = mul_mod(*value, self.degree_inv, q);
        }
    }

    /// Pointwise product of two transformed polynomials.
    pub fn pointwise(&self, a: &[u64], b: &[u64]) -> Vec<u64> {
        a.iter()
            .zip(b)
            .map(|(&x, &y)| mul_mod(x, y, self.modulus))
            .collect()
    }

    /// Accumulates `a * b` pointwise into `acc`.
    pub fn pointwise_accumulate(&self, acc: &mut [u64], a: &[u64], b: &[u64]) {
        for ((slot, &x), &y) in acc.iter_mut().zip(a).zip(b) {
            *slot = add_mod(*slot, mul_mod(x, y, self.modulus), self.modulus);
        }
    }
}

/// Finds ψ with ψ^N = -1, so ψ has multiplicative order exactly 2N.
fn find_primitive_root(n: u64, q: u64) -> Option<u64> {
    let exponent = (q - 1) / (2 * n);
    (2..q)
        .map(|g| pow_mod(g, exponent, q))
        .find(|&psi| pow_mod(psi, n, q) == q - 1)
}

fn bit_reverse(value: usize, bits: u32) -> usize {
    if bits == 0 {
        return 0;
    }
    value.reverse_bits() >> (usize::BITS - bits)
}

// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Ring parameters shared by every element of one quotient ring.

use crate::errors::{RingError, RingResult};
use crate::modular::is_prime;
use crate::modulus_poly::{poly_mul, ModulusPolynomial};
use crate::ntt::NttTables;
use rand::Rng;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Coefficient moduli must stay below this bound.
pub const MAX_COEFF_MODULUS: u64 = 1 << 62;

/// Parameters (N, q, f) of the ring Z_q[x]/(f(x)).
///
/// A context is immutable once built and is handed out as an `Arc`, so it can be
/// shared freely across threads. Every element, vector and matrix holds a handle
/// to the context it was built in.
///
/// Two contexts compare equal when their degree, coefficient modulus and modulus
/// polynomial agree; the precomputed transform tables are not part of the identity.
#[derive(Debug)]
pub struct RingContext {
    degree: usize,
    coeff_modulus: u64,
    modulus_poly: ModulusPolynomial,
    ntt: Option<NttTables>,
}

impl RingContext {
    /// Builds the ring Z_q[x]/(x^degree + 1).
    ///
    /// # Arguments
    ///
    /// * `degree` - Ring degree N, must be positive.
    /// * `coeff_modulus` - Prime coefficient modulus q below [`MAX_COEFF_MODULUS`].
    ///
    /// # Errors
    ///
    /// Returns [`RingError::Configuration`] for a zero degree or an unusable modulus.
    pub fn new(degree: usize, coeff_modulus: u64) -> RingResult<Arc<Self>> {
        Self::with_modulus_poly(coeff_modulus, ModulusPolynomial::cyclotomic(degree))
    }

    /// Builds a ring over an explicit modulus polynomial.
    ///
    /// Custom polynomials must be monic and irreducible over Z_q. The transformed
    /// domain is only available for x^N + 1.
    pub fn with_modulus_poly(
        coeff_modulus: u64,
        modulus_poly: ModulusPolynomial,
    ) -> RingResult<Arc<Self>> {
        validate_modulus(coeff_modulus)?;
        let modulus_poly = modulus_poly.validated(coeff_modulus)?;
        let degree = modulus_poly.degree();

        let ntt = if modulus_poly.is_cyclotomic() {
            match NttTables::new(degree, coeff_modulus) {
                Ok(tables) => Some(tables),
                Err(err) => {
                    debug!("transformed domain disabled: {err}");
                    None
                }
            }
        } else {
            None
        };

        info!(
            degree,
            modulus = coeff_modulus,
            modulus_poly = %modulus_poly,
            transform = ntt.is_some(),
            "ring context initialized"
        );

        Ok(Arc::new(Self {
            degree,
            coeff_modulus,
            modulus_poly,
            ntt,
        }))
    }

    /// Builds a ring over a randomly sampled irreducible polynomial of the given degree.
    pub fn with_random_irreducible<R: Rng + ?Sized>(
        degree: usize,
        coeff_modulus: u64,
        rng: &mut R,
    ) -> RingResult<Arc<Self>> {
        validate_modulus(coeff_modulus)?;
        let modulus_poly = ModulusPolynomial::random_irreducible(degree, coeff_modulus, rng)?;
        Self::with_modulus_poly(coeff_modulus, modulus_poly)
    }

    /// Ring degree N.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Coefficient modulus q.
    pub fn coeff_modulus(&self) -> u64 {
        self.coeff_modulus
    }

    pub fn modulus_poly(&self) -> &ModulusPolynomial {
        &self.modulus_poly
    }

    /// Transform tables, present when the ring supports the transformed domain.
    pub fn ntt(&self) -> Option<&NttTables> {
        self.ntt.as_ref()
    }

    pub fn supports_transform(&self) -> bool {
        self.ntt.is_some()
    }

    /// Fails with [`RingError::ContextMismatch`] unless both rings are interchangeable.
    pub(crate) fn ensure_same(&self, other: &RingContext) -> RingResult<()> {
        if std::ptr::eq(self, other) || self == other {
            Ok(())
        } else {
            Err(RingError::ContextMismatch)
        }
    }

    /// Ring product of two canonical coefficient vectors of length N.
    pub(crate) fn multiply(&self, a: &[u64], b: &[u64]) -> Vec<u64> {
        match &self.ntt {
            Some(ntt) => {
                let mut fa = a.to_vec();
                let mut fb = b.to_vec();
                ntt.forward(&mut fa);
                ntt.forward(&mut fb);
                let mut product = ntt.pointwise(&fa, &fb);
                ntt.inverse(&mut product);
                product
            }
            None => self
                .modulus_poly
                .reduce(&poly_mul(a, b, self.coeff_modulus), self.coeff_modulus),
        }
    }
}

fn validate_modulus(coeff_modulus: u64) -> RingResult<()> {
    if coeff_modulus < 2 {
        return Err(RingError::configuration(format!(
            "coefficient modulus {coeff_modulus} is smaller than 2"
        )));
    }
    if coeff_modulus >= MAX_COEFF_MODULUS {
        return Err(RingError::configuration(format!(
            "coefficient modulus {coeff_modulus} must be below 2^62"
        )));
    }
    if !is_prime(coeff_modulus) {
        return Err(RingError::configuration(format!(
            "coefficient modulus {coeff_modulus} is not prime"
        )));
    }
    Ok(())
}

impl PartialEq for RingContext {
    fn eq(&self, other: &Self) -> bool {
        self.degree == other.degree
            && self.coeff_modulus == other.coeff_modulus
            && self.modulus_poly == other.modulus_poly
    }
}

impl Eq for RingContext {}

impl fmt::Display for RingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Z_{}[x]/({})", self.coeff_modulus, self.modulus_poly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use tracing_test::traced_test;

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(matches!(
            RingContext::new(0, 17),
            Err(RingError::Configuration { .. })
        ));
        assert!(matches!(
            RingContext::new(4, 1),
            Err(RingError::Configuration { .. })
        ));
        assert!(matches!(
            RingContext::new(4, 15),
            Err(RingError::Configuration { .. })
        ));
        assert!(matches!(
            RingContext::new(4, (1u64 << 62) + 135),
            Err(RingError::Configuration { .. })
        ));
    }

    #[test]
    fn test_transform_availability() {
        let ring = RingContext::new(4, 17).unwrap();
        assert!(ring.supports_transform());
        assert_eq!(ring.degree(), 4);
        assert_eq!(ring.coeff_modulus(), 17);

        // 3329 - 1 is not divisible by 512
        let kyber = RingContext::new(256, 3329).unwrap();
        assert!(!kyber.supports_transform());

        let odd_degree = RingContext::new(3, 17).unwrap();
        assert!(!odd_degree.supports_transform());
    }

    #[test]
    fn test_equality_ignores_handle_identity() {
        let a = RingContext::new(4, 17).unwrap();
        let b = RingContext::new(4, 17).unwrap();
        let c = RingContext::new(8, 17).unwrap();
        assert_eq!(*a, *b);
        assert!(a.ensure_same(&b).is_ok());
        assert_eq!(a.ensure_same(&c), Err(RingError::ContextMismatch));
    }

    #[test]
    fn test_custom_modulus_polynomial() {
        let ring =
            RingContext::with_modulus_poly(7, ModulusPolynomial::custom(vec![1, 0, 1])).unwrap();
        assert_eq!(ring.degree(), 2);
        assert!(!ring.supports_transform());
        assert_eq!(ring.to_string(), "Z_7[x]/(x^2 + 1)");

        let reducible = RingContext::with_modulus_poly(5, ModulusPolynomial::custom(vec![1, 0, 1]));
        assert!(matches!(reducible, Err(RingError::Configuration { .. })));
    }

    #[test]
    fn test_random_irreducible_context() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let ring = RingContext::with_random_irreducible(3, 17, &mut rng).unwrap();
        assert_eq!(ring.degree(), 3);
        assert!(ring.modulus_poly().is_irreducible(17));
    }

    #[test]
    fn test_multiply_paths_agree() {
        // the same negacyclic ring with and without transform tables
        let with_ntt = RingContext::new(8, 17).unwrap();
        let a = [1, 2, 3, 4, 5, 6, 7, 8];
        let b = [16, 0, 3, 0, 9, 1, 0, 2];
        let schoolbook = with_ntt
            .modulus_poly()
            .reduce(&poly_mul(&a, &b, 17), 17);
        assert_eq!(with_ntt.multiply(&a, &b), schoolbook);
    }

    #[test]
    #[traced_test]
    fn test_initialization_is_logged() {
        RingContext::new(4, 17).unwrap();
        assert!(logs_contain("ring context initialized"));
    }
}

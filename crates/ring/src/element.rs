// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Elements of the quotient ring Z_q[x]/(f(x)).

use crate::context::RingContext;
use crate::errors::{RingError, RingResult};
use crate::modular::{add_mod, center, from_signed, mul_mod, neg_mod, pow_mod, sub_mod};
use crate::ntt::NttTables;
use rand::Rng;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Internal representation of a ring element.
///
/// Both variants hold exactly N residues in `[0, q)`. `Canonical` stores the
/// coefficients in ascending order of degree, `Transformed` stores the
/// evaluations produced by the ring's number-theoretic transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Representation {
    Canonical(Vec<u64>),
    Transformed(Vec<u64>),
}

impl Representation {
    pub fn values(&self) -> &[u64] {
        match self {
            Representation::Canonical(values) | Representation::Transformed(values) => values,
        }
    }

    pub fn is_transformed(&self) -> bool {
        matches!(self, Representation::Transformed(_))
    }

    /// Same representation kind, new values.
    fn with_values(&self, values: Vec<u64>) -> Self {
        match self {
            Representation::Canonical(_) => Representation::Canonical(values),
            Representation::Transformed(_) => Representation::Transformed(values),
        }
    }
}

/// A polynomial of degree below N with coefficients in Z_q.
///
/// Elements are immutable: every operation returns a new element in the
/// representation of its left operand.
#[derive(Debug, Clone)]
pub struct RingElement {
    ctx: Arc<RingContext>,
    repr: Representation,
}

impl RingElement {
    /// The element `c mod q`.
    pub fn constant(ctx: &Arc<RingContext>, constant: i64) -> Self {
        let mut values = vec![0u64; ctx.degree()];
        values[0] = from_signed(constant, ctx.coeff_modulus());
        Self::canonical(ctx, values)
    }

    pub fn zero(ctx: &Arc<RingContext>) -> Self {
        Self::canonical(ctx, vec![0u64; ctx.degree()])
    }

    pub fn one(ctx: &Arc<RingContext>) -> Self {
        Self::constant(ctx, 1)
    }

    /// Creates an element from coefficients in ascending order of degree.
    ///
    /// Missing high-degree coefficients are zero; negative values are reduced mod q.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::DegreeExceeded`] if more than N coefficients are given.
    pub fn from_coefficients(ctx: &Arc<RingContext>, coefficients: &[i64]) -> RingResult<Self> {
        let degree = ctx.degree();
        if coefficients.len() > degree {
            return Err(RingError::DegreeExceeded {
                length: coefficients.len(),
                degree,
            });
        }
        let q = ctx.coeff_modulus();
        let mut values: Vec<u64> = coefficients.iter().map(|&c| from_signed(c, q)).collect();
        values.resize(degree, 0);
        Ok(Self::canonical(ctx, values))
    }

    /// Wraps a raw representation produced elsewhere.
    ///
    /// The degree bound is not checked: a canonical vector longer than N is
    /// reduced modulo f(x). A transformed vector must hold exactly N values.
    pub fn from_representation(ctx: &Arc<RingContext>, repr: Representation) -> RingResult<Self> {
        let q = ctx.coeff_modulus();
        let degree = ctx.degree();
        match repr {
            Representation::Canonical(values) => {
                let values: Vec<u64> = values.into_iter().map(|v| v % q).collect();
                let values = if values.len() > degree {
                    ctx.modulus_poly().reduce(&values, q)
                } else {
                    let mut values = values;
                    values.resize(degree, 0);
                    values
                };
                Ok(Self::canonical(ctx, values))
            }
            Representation::Transformed(values) => {
                if !ctx.supports_transform() {
                    return Err(RingError::transform_unavailable(format!(
                        "ring {ctx} has no number-theoretic transform"
                    )));
                }
                if values.len() != degree {
                    return Err(RingError::dimension_mismatch(
                        "transformed representation",
                        degree,
                        values.len(),
                    ));
                }
                Ok(Self {
                    ctx: Arc::clone(ctx),
                    repr: Representation::Transformed(values.into_iter().map(|v| v % q).collect()),
                })
            }
        }
    }

    /// Samples an element with every coefficient uniform in Z_q.
    pub fn random<R: Rng + ?Sized>(ctx: &Arc<RingContext>, rng: &mut R) -> Self {
        let q = ctx.coeff_modulus();
        let values = (0..ctx.degree()).map(|_| rng.gen_range(0..q)).collect();
        Self::canonical(ctx, values)
    }

    /// Samples an element with coefficients uniform in `[-bound, bound]`.
    ///
    /// The bound is capped at q/2.
    pub fn random_bounded<R: Rng + ?Sized>(ctx: &Arc<RingContext>, bound: u64, rng: &mut R) -> Self {
        let q = ctx.coeff_modulus();
        let bound = bound.min(q / 2) as i64;
        let values = (0..ctx.degree())
            .map(|_| from_signed(rng.gen_range(-bound..=bound), q))
            .collect();
        Self::canonical(ctx, values)
    }

    pub(crate) fn canonical(ctx: &Arc<RingContext>, values: Vec<u64>) -> Self {
        Self {
            ctx: Arc::clone(ctx),
            repr: Representation::Canonical(values),
        }
    }

    fn with_repr(&self, repr: Representation) -> Self {
        Self {
            ctx: Arc::clone(&self.ctx),
            repr,
        }
    }

    pub fn context(&self) -> &Arc<RingContext> {
        &self.ctx
    }

    pub fn representation(&self) -> &Representation {
        &self.repr
    }

    pub fn is_transformed(&self) -> bool {
        self.repr.is_transformed()
    }

    /// Converts into the transformed domain.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::TransformUnavailable`] if the ring has no transform.
    pub fn to_transformed(&self) -> RingResult<Self> {
        match self.transformed_values() {
            Some(values) => Ok(self.with_repr(Representation::Transformed(values.into_owned()))),
            None => Err(RingError::transform_unavailable(format!(
                "ring {} has no number-theoretic transform",
                self.ctx
            ))),
        }
    }

    /// Converts into canonical coefficient form.
    pub fn to_canonical(&self) -> Self {
        self.with_repr(Representation::Canonical(
            self.canonical_values().into_owned(),
        ))
    }

    /// Canonical coefficients, inverting the transform if needed.
    pub(crate) fn canonical_values(&self) -> Cow<'_, [u64]> {
        match &self.repr {
            Representation::Canonical(values) => Cow::Borrowed(values),
            Representation::Transformed(values) => {
                let mut values = values.clone();
                // transformed values only exist in rings with tables
                if let Some(ntt) = self.ctx.ntt() {
                    ntt.inverse(&mut values);
                }
                Cow::Owned(values)
            }
        }
    }

    /// Transformed values, or `None` when the ring has no transform.
    pub(crate) fn transformed_values(&self) -> Option<Cow<'_, [u64]>> {
        match &self.repr {
            Representation::Transformed(values) => Some(Cow::Borrowed(values)),
            Representation::Canonical(_) => Some(self.transformed_with(self.ctx.ntt()?)),
        }
    }

    /// Transformed values, forward-transforming canonical coefficients with `ntt`.
    pub(crate) fn transformed_with(&self, ntt: &NttTables) -> Cow<'_, [u64]> {
        match &self.repr {
            Representation::Transformed(values) => Cow::Borrowed(values),
            Representation::Canonical(values) => {
                let mut values = values.clone();
                ntt.forward(&mut values);
                Cow::Owned(values)
            }
        }
    }

    /// Other operand's values in this element's representation.
    fn aligned_values<'a>(&self, other: &'a RingElement) -> RingResult<Cow<'a, [u64]>> {
        self.ctx.ensure_same(&other.ctx)?;
        match (&self.repr, &other.repr) {
            (Representation::Canonical(_), Representation::Canonical(values))
            | (Representation::Transformed(_), Representation::Transformed(values)) => {
                Ok(Cow::Borrowed(values))
            }
            (Representation::Canonical(_), Representation::Transformed(_)) => {
                Ok(other.canonical_values())
            }
            (Representation::Transformed(_), Representation::Canonical(_)) => other
                .transformed_values()
                .ok_or_else(|| RingError::transform_unavailable("operand has no transform")),
        }
    }

    /// The N coefficients in `[0, q)`, ascending order of degree.
    pub fn to_coefficients(&self) -> Vec<u64> {
        self.canonical_values().into_owned()
    }

    /// The N coefficients as balanced representatives in `(-q/2, q/2]`.
    pub fn to_centered_coefficients(&self) -> Vec<i64> {
        let q = self.ctx.coeff_modulus();
        self.canonical_values()
            .iter()
            .map(|&c| center(c, q))
            .collect()
    }

    /// Largest absolute balanced coefficient.
    pub fn infinity_norm(&self) -> u64 {
        self.to_centered_coefficients()
            .iter()
            .map(|c| c.unsigned_abs())
            .max()
            .unwrap_or(0)
    }

    /// Whether some balanced coefficient reaches `bound` in absolute value.
    ///
    /// `true` means the element fails a rejection check `||r||_inf < bound`.
    pub fn check_norm_bound(&self, bound: u64) -> bool {
        self.infinity_norm() >= bound
    }

    /// Splits every coefficient as `r = r1 * 2^d + r0` with `r0` in `(-2^(d-1), 2^(d-1)]`.
    ///
    /// Returns `(r1, r0)`, both canonical.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::InvalidArgument`] unless `1 <= d <= 62`.
    pub fn power2_round(&self, d: u32) -> RingResult<(Self, Self)> {
        validate_power2_shift(d)?;
        let q = self.ctx.coeff_modulus();
        let base = 1u64 << d;
        let (high, low): (Vec<u64>, Vec<u64>) = self
            .canonical_values()
            .iter()
            .map(|&c| {
                let r0 = center(c, base);
                let r1 = (c as i64 - r0) / base as i64;
                (r1 as u64, from_signed(r0, q))
            })
            .unzip();
        Ok((Self::canonical(&self.ctx, high), Self::canonical(&self.ctx, low)))
    }

    /// Splits every coefficient as `r = r1 * alpha + r0` with `r0` in `(-alpha/2, alpha/2]`.
    ///
    /// When `r - r0 = q - 1` the high part wraps to 0 and `r0` is lowered by one,
    /// so the high parts stay below `(q - 1) / alpha` for an `alpha` dividing `q - 1`.
    /// Returns `(r1, r0)`, both canonical.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::InvalidArgument`] unless `2 <= alpha < q`.
    pub fn decompose(&self, alpha: u64) -> RingResult<(Self, Self)> {
        let q = self.ctx.coeff_modulus();
        validate_alpha(alpha, q)?;
        let (high, low): (Vec<u64>, Vec<u64>) = self
            .canonical_values()
            .iter()
            .map(|&c| {
                let r0 = center(c, alpha);
                let shifted = c as i64 - r0;
                if shifted == q as i64 - 1 {
                    (0, from_signed(r0 - 1, q))
                } else {
                    ((shifted / alpha as i64) as u64, from_signed(r0, q))
                }
            })
            .unzip();
        Ok((Self::canonical(&self.ctx, high), Self::canonical(&self.ctx, low)))
    }

    /// High part `r1` of [`RingElement::decompose`].
    pub fn high_bits(&self, alpha: u64) -> RingResult<Self> {
        self.decompose(alpha).map(|(high, _)| high)
    }

    /// Low part `r0` of [`RingElement::decompose`].
    pub fn low_bits(&self, alpha: u64) -> RingResult<Self> {
        self.decompose(alpha).map(|(_, low)| low)
    }

    pub fn is_zero(&self) -> bool {
        self.repr.values().iter().all(|&v| v == 0)
    }

    pub fn neg(&self) -> Self {
        let q = self.ctx.coeff_modulus();
        let values = self.repr.values().iter().map(|&v| neg_mod(v, q)).collect();
        self.with_repr(self.repr.with_values(values))
    }

    /// Coefficient-wise sum.
    pub fn add(&self, other: &RingElement) -> RingResult<Self> {
        let q = self.ctx.coeff_modulus();
        let rhs = self.aligned_values(other)?;
        let values = self
            .repr
            .values()
            .iter()
            .zip(rhs.iter())
            .map(|(&a, &b)| add_mod(a, b, q))
            .collect();
        Ok(self.with_repr(self.repr.with_values(values)))
    }

    /// Coefficient-wise difference.
    pub fn sub(&self, other: &RingElement) -> RingResult<Self> {
        let q = self.ctx.coeff_modulus();
        let rhs = self.aligned_values(other)?;
        let values = self
            .repr
            .values()
            .iter()
            .zip(rhs.iter())
            .map(|(&a, &b)| sub_mod(a, b, q))
            .collect();
        Ok(self.with_repr(self.repr.with_values(values)))
    }

    /// Ring product: convolution reduced modulo f(x) and q.
    ///
    /// Uses the transform when the ring has one, schoolbook multiplication and
    /// polynomial reduction otherwise.
    pub fn mul(&self, other: &RingElement) -> RingResult<Self> {
        self.ctx.ensure_same(&other.ctx)?;
        Ok(self.mul_unchecked(other))
    }

    pub(crate) fn mul_unchecked(&self, other: &RingElement) -> Self {
        match (&self.repr, self.ctx.ntt()) {
            (Representation::Transformed(lhs), Some(ntt)) => {
                let rhs = other.transformed_with(ntt);
                self.with_repr(Representation::Transformed(ntt.pointwise(lhs, &rhs)))
            }
            _ => {
                let lhs = self.canonical_values();
                let rhs = other.canonical_values();
                self.with_repr(Representation::Canonical(self.ctx.multiply(&lhs, &rhs)))
            }
        }
    }

    /// Multiplies every coefficient by `scalar mod q`.
    pub fn scalar_mul(&self, scalar: i64) -> Self {
        let q = self.ctx.coeff_modulus();
        let scalar = from_signed(scalar, q);
        let values = self
            .repr
            .values()
            .iter()
            .map(|&v| mul_mod(v, scalar, q))
            .collect();
        self.with_repr(self.repr.with_values(values))
    }

    /// Adds `constant mod q` to the constant coefficient.
    pub fn add_constant(&self, constant: i64) -> Self {
        let q = self.ctx.coeff_modulus();
        let constant = from_signed(constant, q);
        let values = match &self.repr {
            Representation::Canonical(values) => {
                let mut values = values.clone();
                values[0] = add_mod(values[0], constant, q);
                values
            }
            // a constant evaluates to itself at every point
            Representation::Transformed(values) => {
                values.iter().map(|&v| add_mod(v, constant, q)).collect()
            }
        };
        self.with_repr(self.repr.with_values(values))
    }

    /// Raises the element to `exp` by square-and-multiply.
    pub fn pow(&self, exp: u64) -> Self {
        let q = self.ctx.coeff_modulus();
        match (&self.repr, self.ctx.ntt()) {
            (Representation::Transformed(values), _) => self.with_repr(
                Representation::Transformed(values.iter().map(|&v| pow_mod(v, exp, q)).collect()),
            ),
            (Representation::Canonical(values), Some(ntt)) => {
                let mut values = values.clone();
                ntt.forward(&mut values);
                for value in values.iter_mut() {
                    *value = pow_mod(*value, exp, q);
                }
                ntt.inverse(&mut values);
                self.with_repr(Representation::Canonical(values))
            }
            (Representation::Canonical(_), None) => {
                let mut result = RingElement::one(&self.ctx);
                let mut base = self.clone();
                let mut exp = exp;
                while exp > 0 {
                    if exp & 1 == 1 {
                        result = result.mul_unchecked(&base);
                    }
                    base = base.mul_unchecked(&base);
                    exp >>= 1;
                }
                result
            }
        }
    }

    /// The N x N integer matrix of multiplication by this element.
    ///
    /// Column j holds the balanced coefficients of `self * x^j`, so the matrix
    /// applied to the coefficient vector of `b` yields the coefficients of `self * b`.
    pub fn rotation_matrix(&self) -> Vec<Vec<i64>> {
        let n = self.ctx.degree();
        let q = self.ctx.coeff_modulus();
        let mut matrix = vec![vec![0i64; n]; n];
        let mut column = self.canonical_values().into_owned();
        for j in 0..n {
            for (i, &c) in column.iter().enumerate() {
                matrix[i][j] = center(c, q);
            }
            let mut shifted = Vec::with_capacity(n + 1);
            shifted.push(0);
            shifted.extend_from_slice(&column);
            column = self.ctx.modulus_poly().reduce(&shifted, q);
        }
        matrix
    }
}

pub(crate) fn validate_power2_shift(d: u32) -> RingResult<()> {
    if (1..=62).contains(&d) {
        Ok(())
    } else {
        Err(RingError::invalid_argument(format!(
            "power-of-two rounding shift {d} is outside 1..=62"
        )))
    }
}

pub(crate) fn validate_alpha(alpha: u64, q: u64) -> RingResult<()> {
    if alpha >= 2 && alpha < q {
        Ok(())
    } else {
        Err(RingError::invalid_argument(format!(
            "decomposition base {alpha} is outside [2, {q})"
        )))
    }
}

impl PartialEq for RingElement {
    fn eq(&self, other: &Self) -> bool {
        *self.ctx == *other.ctx && self.canonical_values() == other.canonical_values()
    }
}

impl Eq for RingElement {}

impl fmt::Display for RingElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coefficients = self.to_centered_coefficients();
        let mut first = true;
        for (degree, &coeff) in coefficients.iter().enumerate().rev() {
            if coeff == 0 {
                continue;
            }

            if first {
                if coeff < 0 {
                    write!(f, "-")?;
                }
            } else if coeff > 0 {
                write!(f, " + ")?;
            } else {
                write!(f, " - ")?;
            }
            first = false;

            let abs_coeff = coeff.unsigned_abs();
            if degree == 0 || abs_coeff != 1 {
                write!(f, "{abs_coeff}")?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modulus_poly::ModulusPolynomial;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn toy_ring() -> Arc<RingContext> {
        RingContext::new(4, 17).unwrap()
    }

    #[test]
    fn test_constant_and_padding() {
        let ring = toy_ring();
        assert_eq!(
            RingElement::constant(&ring, -1).to_coefficients(),
            vec![16, 0, 0, 0]
        );
        let e = RingElement::from_coefficients(&ring, &[1, 2]).unwrap();
        assert_eq!(e.to_coefficients(), vec![1, 2, 0, 0]);
        assert!(!e.is_transformed());
    }

    #[test]
    fn test_degree_exceeded() {
        let ring = toy_ring();
        let err = RingElement::from_coefficients(&ring, &[1, 2, 3, 4, 5]).unwrap_err();
        assert_eq!(
            err,
            RingError::DegreeExceeded {
                length: 5,
                degree: 4
            }
        );
    }

    #[test]
    fn test_ring_multiplication() {
        let ring = toy_ring();
        let p = RingElement::from_coefficients(&ring, &[1, 0, 0, 1]).unwrap();
        let q = RingElement::from_coefficients(&ring, &[2, 0, 1, 2]).unwrap();
        let product = p.mul(&q).unwrap();
        assert_eq!(product.to_centered_coefficients(), vec![2, -1, -1, 4]);
        assert_eq!(product.to_string(), "4x^3 - x^2 - x + 2");
    }

    #[test]
    fn test_multiplication_without_wraparound() {
        let ring = RingContext::new(128, 4294954753).unwrap();
        let a = RingElement::from_coefficients(&ring, &[1, 2, 3, 4]).unwrap();
        let b = RingElement::from_coefficients(&ring, &[5, 6, 7, 8]).unwrap();
        let expected = RingElement::from_coefficients(&ring, &[5, 16, 34, 60, 61, 52, 32]).unwrap();
        assert_eq!(a.mul(&b).unwrap(), expected);
    }

    #[test]
    fn test_pow() {
        let ring = RingContext::new(128, 4294954753).unwrap();
        let a = RingElement::from_coefficients(&ring, &[1, 2, 3, 4]).unwrap();
        let expected = RingElement::from_coefficients(
            &ring,
            &[1, 6, 21, 56, 111, 174, 219, 204, 144, 64],
        )
        .unwrap();
        assert_eq!(a.pow(3), expected);
        assert_eq!(a.pow(0), RingElement::one(&ring));

        // the same in a ring without transform tables
        let plain = RingContext::new(12, 13).unwrap();
        let a = RingElement::from_coefficients(&plain, &[1, 2, 3, 4]).unwrap();
        let expected = RingElement::from_coefficients(
            &plain,
            &[1, 6, 21, 56, 111, 174, 219, 204, 144, 64],
        )
        .unwrap();
        assert_eq!(a.pow(3), expected);
    }

    #[test]
    fn test_scalar_mul_and_sub() {
        let ring = RingContext::new(128, 4294954753).unwrap();
        let a = RingElement::from_coefficients(&ring, &[2, 3]).unwrap();
        assert_eq!(
            a.scalar_mul(5),
            RingElement::from_coefficients(&ring, &[10, 15]).unwrap()
        );

        let b = RingElement::from_coefficients(&ring, &[1, 2]).unwrap();
        let c = RingElement::from_coefficients(&ring, &[3, 4]).unwrap();
        let diff = b.sub(&c).unwrap();
        assert_eq!(&diff.to_centered_coefficients()[..3], &[-2, -2, 0]);
    }

    #[test]
    fn test_transformed_round_trip() {
        let ring = toy_ring();
        let p = RingElement::from_coefficients(&ring, &[1, 0, 0, 1]).unwrap();
        let t = p.to_transformed().unwrap();
        assert!(t.is_transformed());
        assert_eq!(t.to_coefficients(), vec![1, 0, 0, 1]);
        assert_eq!(t.infinity_norm(), 1);
        assert_eq!(t, p);
        assert!(!t.to_canonical().is_transformed());
    }

    #[test]
    fn test_mixed_representations() {
        let ring = toy_ring();
        let p = RingElement::from_coefficients(&ring, &[1, 0, 0, 1]).unwrap();
        let q = RingElement::from_coefficients(&ring, &[2, 0, 1, 2]).unwrap();
        let tp = p.to_transformed().unwrap();

        let product = tp.mul(&q).unwrap();
        assert!(product.is_transformed());
        assert_eq!(product.to_centered_coefficients(), vec![2, -1, -1, 4]);

        let sum = q.add(&tp).unwrap();
        assert!(!sum.is_transformed());
        assert_eq!(sum.to_centered_coefficients(), vec![3, 0, 1, 3]);

        let scaled = tp.scalar_mul(3).add_constant(1);
        assert_eq!(scaled.to_coefficients(), vec![4, 0, 0, 3]);

        assert_eq!(tp.pow(2), p.mul(&p).unwrap());
    }

    #[test]
    fn test_transform_unavailable() {
        let ring = RingContext::new(3, 17).unwrap();
        let a = RingElement::from_coefficients(&ring, &[1, 2, 3]).unwrap();
        assert!(matches!(
            a.to_transformed(),
            Err(RingError::TransformUnavailable { .. })
        ));
        assert!(matches!(
            RingElement::from_representation(&ring, Representation::Transformed(vec![1, 2, 3])),
            Err(RingError::TransformUnavailable { .. })
        ));
    }

    #[test]
    fn test_from_representation() {
        let ring = toy_ring();
        // x^4 reduces to -1
        let e =
            RingElement::from_representation(&ring, Representation::Canonical(vec![0, 0, 0, 0, 1]))
                .unwrap();
        assert_eq!(e.to_coefficients(), vec![16, 0, 0, 0]);

        let err =
            RingElement::from_representation(&ring, Representation::Transformed(vec![1, 2]))
                .unwrap_err();
        assert_eq!(
            err,
            RingError::dimension_mismatch("transformed representation", 4, 2)
        );

        let p = RingElement::from_coefficients(&ring, &[3, 1]).unwrap();
        let t = p.to_transformed().unwrap();
        let rebuilt = RingElement::from_representation(&ring, t.representation().clone()).unwrap();
        assert!(rebuilt.is_transformed());
        assert_eq!(rebuilt, p);
    }

    #[test]
    fn test_context_mismatch() {
        let a = RingElement::one(&toy_ring());
        let b = RingElement::one(&RingContext::new(8, 17).unwrap());
        assert_eq!(a.add(&b).unwrap_err(), RingError::ContextMismatch);
        assert_eq!(a.mul(&b).unwrap_err(), RingError::ContextMismatch);

        // separately built but identical rings interoperate
        let c = RingElement::one(&toy_ring());
        assert!(a.add(&c).is_ok());
    }

    #[test]
    fn test_infinity_norm() {
        let ring = toy_ring();
        let e = RingElement::from_coefficients(&ring, &[8, -8, 3, 0]).unwrap();
        assert_eq!(e.infinity_norm(), 8);
        assert_eq!(RingElement::zero(&ring).infinity_norm(), 0);
    }

    #[test]
    fn test_random_bounded() {
        let ring = RingContext::new(64, 8380417).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let e = RingElement::random_bounded(&ring, 3, &mut rng);
        assert!(e.infinity_norm() <= 3);
        let u = RingElement::random(&ring, &mut rng);
        assert!(u.to_coefficients().iter().all(|&c| c < 8380417));
    }

    #[test]
    fn test_rotation_matrix() {
        let ring = toy_ring();
        let a = RingElement::from_coefficients(&ring, &[1, 0, 0, 1]).unwrap();
        let b = RingElement::from_coefficients(&ring, &[2, 0, 1, 2]).unwrap();
        let rot = a.rotation_matrix();
        assert_eq!(
            rot,
            vec![
                vec![1, -1, 0, 0],
                vec![0, 1, -1, 0],
                vec![0, 0, 1, -1],
                vec![1, 0, 0, 1],
            ]
        );

        let b_coeffs = b.to_centered_coefficients();
        let applied: Vec<i64> = rot
            .iter()
            .map(|row| {
                let sum: i64 = row.iter().zip(&b_coeffs).map(|(x, y)| x * y).sum();
                sum.rem_euclid(17)
            })
            .collect();
        let expected: Vec<i64> = a
            .mul(&b)
            .unwrap()
            .to_coefficients()
            .iter()
            .map(|&c| c as i64)
            .collect();
        assert_eq!(applied, expected);
    }

    #[test]
    fn test_check_norm_bound() {
        let ring = toy_ring();
        let e = RingElement::from_coefficients(&ring, &[8, -8, 3, 0]).unwrap();
        assert!(e.check_norm_bound(8));
        assert!(!e.check_norm_bound(9));
        assert!(!RingElement::zero(&ring).check_norm_bound(1));
    }

    #[test]
    fn test_power2_round() {
        let ring = RingContext::new(8, 8380417).unwrap();
        let r = RingElement::from_coefficients(&ring, &[0, 4096, 4097, 12345, -1]).unwrap();
        let (r1, r0) = r.power2_round(13).unwrap();

        assert_eq!(&r1.to_coefficients()[..5], &[0, 0, 1, 2, 1023]);
        assert_eq!(&r0.to_centered_coefficients()[..5], &[0, 4096, -4095, -4039, 0]);
        assert!(!r0.check_norm_bound(4097));

        // r = r1 * 2^13 + r0
        assert_eq!(r1.scalar_mul(1 << 13).add(&r0).unwrap(), r);

        // transformed input gives canonical parts
        let (t1, t0) = r.to_transformed().unwrap().power2_round(13).unwrap();
        assert!(!t1.is_transformed());
        assert_eq!((t1, t0), (r1, r0));

        assert!(matches!(
            r.power2_round(0),
            Err(RingError::InvalidArgument { .. })
        ));
        assert!(matches!(
            r.power2_round(63),
            Err(RingError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_decompose() {
        let ring = RingContext::new(8, 8380417).unwrap();
        // 2 * gamma2 for Dilithium, divides q - 1 sixteen times
        let alpha = 523776;
        let r =
            RingElement::from_coefficients(&ring, &[0, 1, 261888, 261889, 1000000, -1]).unwrap();

        let high = r.high_bits(alpha).unwrap();
        let low = r.low_bits(alpha).unwrap();
        assert_eq!(&high.to_coefficients()[..6], &[0, 0, 0, 1, 2, 0]);
        assert_eq!(
            &low.to_centered_coefficients()[..6],
            &[0, 1, 261888, -261887, -47552, -1]
        );
        assert!(high.to_coefficients().iter().all(|&r1| r1 < 16));

        // r = r1 * alpha + r0
        assert_eq!(high.scalar_mul(alpha as i64).add(&low).unwrap(), r);
        assert_eq!(r.decompose(alpha).unwrap(), (high, low));

        assert!(matches!(
            r.high_bits(1),
            Err(RingError::InvalidArgument { .. })
        ));
        assert!(matches!(
            r.low_bits(8380417),
            Err(RingError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_custom_modulus_arithmetic() {
        // Z_7[x]/(x^2 + 1) is the field with 49 elements
        let ring =
            RingContext::with_modulus_poly(7, ModulusPolynomial::custom(vec![1, 0, 1])).unwrap();
        let i = RingElement::from_coefficients(&ring, &[0, 1]).unwrap();
        assert_eq!(i.mul(&i).unwrap(), RingElement::constant(&ring, -1));
        assert_eq!(i.pow(4), RingElement::one(&ring));
    }

    #[test]
    fn test_display() {
        let ring = toy_ring();
        assert_eq!(RingElement::zero(&ring).to_string(), "0");
        let e = RingElement::from_coefficients(&ring, &[-1, 0, -1, -1]).unwrap();
        assert_eq!(e.to_string(), "-x^3 - x^2 - 1");
    }
}

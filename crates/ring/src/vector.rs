// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Fixed-length vectors of ring elements.

use crate::context::RingContext;
use crate::element::{validate_alpha, validate_power2_shift, RingElement};
use crate::errors::{RingError, RingResult};
use crate::matrix::RingMatrix;
use crate::modular::add_mod;
use rand::Rng;
use std::fmt;
use std::sync::Arc;

/// An ordered sequence of elements of one ring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingVector {
    ctx: Arc<RingContext>,
    elements: Vec<RingElement>,
}

impl RingVector {
    /// Creates a vector from nested coefficient lists, one list per element.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::DegreeExceeded`] if any list is longer than N.
    pub fn from_coefficients<C: AsRef<[i64]>>(
        ctx: &Arc<RingContext>,
        coefficients: &[C],
    ) -> RingResult<Self> {
        let elements = coefficients
            .iter()
            .map(|c| RingElement::from_coefficients(ctx, c.as_ref()))
            .collect::<RingResult<Vec<_>>>()?;
        Ok(Self {
            ctx: Arc::clone(ctx),
            elements,
        })
    }

    /// Creates a vector from explicit elements.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::ContextMismatch`] if an element belongs to another ring.
    pub fn from_elements(ctx: &Arc<RingContext>, elements: Vec<RingElement>) -> RingResult<Self> {
        for element in &elements {
            ctx.ensure_same(element.context())?;
        }
        Ok(Self {
            ctx: Arc::clone(ctx),
            elements,
        })
    }

    pub fn zero(ctx: &Arc<RingContext>, len: usize) -> Self {
        Self {
            ctx: Arc::clone(ctx),
            elements: vec![RingElement::zero(ctx); len],
        }
    }

    /// A vector of `len` uniformly random elements.
    pub fn random<R: Rng + ?Sized>(ctx: &Arc<RingContext>, len: usize, rng: &mut R) -> Self {
        Self {
            ctx: Arc::clone(ctx),
            elements: (0..len).map(|_| RingElement::random(ctx, rng)).collect(),
        }
    }

    /// A vector of `len` elements with coefficients uniform in `[-bound, bound]`.
    pub fn random_bounded<R: Rng + ?Sized>(
        ctx: &Arc<RingContext>,
        len: usize,
        bound: u64,
        rng: &mut R,
    ) -> Self {
        Self {
            ctx: Arc::clone(ctx),
            elements: (0..len)
                .map(|_| RingElement::random_bounded(ctx, bound, rng))
                .collect(),
        }
    }

    /// Builds a vector from elements known to belong to `ctx`.
    pub(crate) fn from_parts(ctx: &Arc<RingContext>, elements: Vec<RingElement>) -> Self {
        Self {
            ctx: Arc::clone(ctx),
            elements,
        }
    }

    pub fn context(&self) -> &Arc<RingContext> {
        &self.ctx
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RingElement> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RingElement> {
        self.elements.iter()
    }

    pub fn elements(&self) -> &[RingElement] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<RingElement> {
        self.elements
    }

    /// Largest infinity norm among the elements, 0 for an empty vector.
    pub fn infinity_norm(&self) -> u64 {
        self.elements
            .iter()
            .map(RingElement::infinity_norm)
            .max()
            .unwrap_or(0)
    }

    /// Whether any element reaches `bound`, see [`RingElement::check_norm_bound`].
    pub fn check_norm_bound(&self, bound: u64) -> bool {
        self.elements.iter().any(|e| e.check_norm_bound(bound))
    }

    /// Element-wise [`RingElement::power2_round`], returning `(r1, r0)`.
    pub fn power2_round(&self, d: u32) -> RingResult<(Self, Self)> {
        validate_power2_shift(d)?;
        let (high, low): (Vec<_>, Vec<_>) = self
            .elements
            .iter()
            .map(|e| e.power2_round(d))
            .collect::<RingResult<Vec<_>>>()?
            .into_iter()
            .unzip();
        Ok((
            Self::from_parts(&self.ctx, high),
            Self::from_parts(&self.ctx, low),
        ))
    }

    pub fn high_bits(&self, alpha: u64) -> RingResult<Self> {
        validate_alpha(alpha, self.ctx.coeff_modulus())?;
        let elements = self
            .elements
            .iter()
            .map(|e| e.high_bits(alpha))
            .collect::<RingResult<Vec<_>>>()?;
        Ok(Self::from_parts(&self.ctx, elements))
    }

    pub fn low_bits(&self, alpha: u64) -> RingResult<Self> {
        validate_alpha(alpha, self.ctx.coeff_modulus())?;
        let elements = self
            .elements
            .iter()
            .map(|e| e.low_bits(alpha))
            .collect::<RingResult<Vec<_>>>()?;
        Ok(Self::from_parts(&self.ctx, elements))
    }

    /// Coefficients of every element, concatenated in order.
    pub fn to_coefficients(&self) -> Vec<u64> {
        self.elements
            .iter()
            .flat_map(|e| e.to_coefficients())
            .collect()
    }

    pub fn to_transformed(&self) -> RingResult<Self> {
        let elements = self
            .elements
            .iter()
            .map(RingElement::to_transformed)
            .collect::<RingResult<Vec<_>>>()?;
        Ok(Self::from_parts(&self.ctx, elements))
    }

    pub fn to_canonical(&self) -> Self {
        Self::from_parts(
            &self.ctx,
            self.elements.iter().map(RingElement::to_canonical).collect(),
        )
    }

    pub fn scalar_mul(&self, scalar: i64) -> Self {
        Self::from_parts(
            &self.ctx,
            self.elements.iter().map(|e| e.scalar_mul(scalar)).collect(),
        )
    }

    /// Multiplies every element by one ring element.
    pub fn mul_element(&self, factor: &RingElement) -> RingResult<Self> {
        self.ctx.ensure_same(factor.context())?;
        Ok(Self::from_parts(
            &self.ctx,
            self.elements
                .iter()
                .map(|e| e.mul_unchecked(factor))
                .collect(),
        ))
    }

    pub fn add(&self, other: &RingVector) -> RingResult<Self> {
        self.ensure_same_shape(other, "vector addition")?;
        let elements = self
            .elements
            .iter()
            .zip(&other.elements)
            .map(|(a, b)| a.add(b))
            .collect::<RingResult<Vec<_>>>()?;
        Ok(Self::from_parts(&self.ctx, elements))
    }

    pub fn sub(&self, other: &RingVector) -> RingResult<Self> {
        self.ensure_same_shape(other, "vector subtraction")?;
        let elements = self
            .elements
            .iter()
            .zip(&other.elements)
            .map(|(a, b)| a.sub(b))
            .collect::<RingResult<Vec<_>>>()?;
        Ok(Self::from_parts(&self.ctx, elements))
    }

    /// Appends the elements of `other`. Lengths need not match.
    pub fn concat(&self, other: &RingVector) -> RingResult<Self> {
        self.ctx.ensure_same(&other.ctx)?;
        let mut elements = self.elements.clone();
        elements.extend(other.elements.iter().cloned());
        Ok(Self::from_parts(&self.ctx, elements))
    }

    /// Sum of the pairwise ring products.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::DimensionMismatch`] if the lengths differ.
    pub fn dot(&self, other: &RingVector) -> RingResult<RingElement> {
        self.ensure_same_shape(other, "dot product")?;
        Ok(self.dot_unchecked(other))
    }

    /// Dot product for operands already known to match.
    ///
    /// In rings with a transform the products are accumulated in the transformed
    /// domain and inverted once.
    pub(crate) fn dot_unchecked(&self, other: &RingVector) -> RingElement {
        let q = self.ctx.coeff_modulus();
        let mut acc = vec![0u64; self.ctx.degree()];
        match self.ctx.ntt() {
            Some(ntt) => {
                for (a, b) in self.elements.iter().zip(&other.elements) {
                    ntt.pointwise_accumulate(
                        &mut acc,
                        &a.transformed_with(ntt),
                        &b.transformed_with(ntt),
                    );
                }
                ntt.inverse(&mut acc);
            }
            None => {
                for (a, b) in self.elements.iter().zip(&other.elements) {
                    let product = a.mul_unchecked(b);
                    for (slot, &c) in acc.iter_mut().zip(product.canonical_values().iter()) {
                        *slot = add_mod(*slot, c, q);
                    }
                }
            }
        }
        RingElement::canonical(&self.ctx, acc)
    }

    /// Vector-matrix product: entry i is the dot product of this vector with row i.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::DimensionMismatch`] if the vector length differs from
    /// the matrix column count.
    pub fn mul_matrix(&self, matrix: &RingMatrix) -> RingResult<RingVector> {
        self.ctx.ensure_same(matrix.context())?;
        if self.len() != matrix.cols() {
            return Err(RingError::dimension_mismatch(
                "vector-matrix product",
                matrix.cols(),
                self.len(),
            ));
        }
        let lhs = if self.ctx.supports_transform() {
            self.to_transformed()?
        } else {
            self.clone()
        };
        let elements = matrix
            .rows_iter()
            .map(|row| lhs.dot_unchecked(row))
            .collect();
        Ok(Self::from_parts(&self.ctx, elements))
    }

    fn ensure_same_shape(&self, other: &RingVector, operation: &'static str) -> RingResult<()> {
        self.ctx.ensure_same(&other.ctx)?;
        if self.len() != other.len() {
            return Err(RingError::dimension_mismatch(
                operation,
                self.len(),
                other.len(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for RingVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, "]")
    }
}

impl<'a> IntoIterator for &'a RingVector {
    type Item = &'a RingElement;
    type IntoIter = std::slice::Iter<'a, RingElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

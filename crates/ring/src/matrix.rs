// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Rectangular matrices of ring elements.
//!
//! A matrix is a non-empty list of [`RingVector`] rows of one common, non-zero
//! length. Every operation checks shapes up front and builds a fresh matrix.

use crate::context::RingContext;
use crate::element::RingElement;
use crate::errors::{RingError, RingResult};
use crate::vector::RingVector;
use rand::Rng;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingMatrix {
    rows: Vec<RingVector>,
}

impl RingMatrix {
    /// Creates a matrix from its rows.
    ///
    /// # Errors
    ///
    /// * [`RingError::EmptyMatrix`] if there are no rows or the rows are empty.
    /// * [`RingError::DimensionMismatch`] if the rows differ in length.
    /// * [`RingError::ContextMismatch`] if the rows belong to different rings.
    pub fn from_rows(rows: Vec<RingVector>) -> RingResult<Self> {
        let first = rows.first().ok_or(RingError::EmptyMatrix)?;
        let cols = first.len();
        if cols == 0 {
            return Err(RingError::EmptyMatrix);
        }
        for row in &rows {
            first.context().ensure_same(row.context())?;
            if row.len() != cols {
                return Err(RingError::dimension_mismatch("matrix rows", cols, row.len()));
            }
        }
        Ok(Self { rows })
    }

    /// Creates a matrix from a row-major nesting of coefficient lists.
    pub fn from_coefficients<R, C>(ctx: &Arc<RingContext>, coefficients: &[R]) -> RingResult<Self>
    where
        R: AsRef<[C]>,
        C: AsRef<[i64]>,
    {
        let rows = coefficients
            .iter()
            .map(|row| RingVector::from_coefficients(ctx, row.as_ref()))
            .collect::<RingResult<Vec<_>>>()?;
        Self::from_rows(rows)
    }

    /// The `size` x `size` identity matrix.
    pub fn identity(ctx: &Arc<RingContext>, size: usize) -> RingResult<Self> {
        let rows = (0..size)
            .map(|i| {
                let elements = (0..size)
                    .map(|j| {
                        if i == j {
                            RingElement::one(ctx)
                        } else {
                            RingElement::zero(ctx)
                        }
                    })
                    .collect();
                RingVector::from_elements(ctx, elements)
            })
            .collect::<RingResult<Vec<_>>>()?;
        Self::from_rows(rows)
    }

    pub fn zero(ctx: &Arc<RingContext>, rows: usize, cols: usize) -> RingResult<Self> {
        Self::from_rows((0..rows).map(|_| RingVector::zero(ctx, cols)).collect())
    }

    /// A matrix with uniformly random entries.
    pub fn random<R: Rng + ?Sized>(
        ctx: &Arc<RingContext>,
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> RingResult<Self> {
        Self::from_rows(
            (0..rows)
                .map(|_| RingVector::random(ctx, cols, rng))
                .collect(),
        )
    }

    /// A matrix with entries whose coefficients are uniform in `[-bound, bound]`.
    pub fn random_bounded<R: Rng + ?Sized>(
        ctx: &Arc<RingContext>,
        rows: usize,
        cols: usize,
        bound: u64,
        rng: &mut R,
    ) -> RingResult<Self> {
        Self::from_rows(
            (0..rows)
                .map(|_| RingVector::random_bounded(ctx, cols, bound, rng))
                .collect(),
        )
    }

    pub fn context(&self) -> &Arc<RingContext> {
        self.rows[0].context()
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.rows[0].len()
    }

    pub fn row(&self, index: usize) -> Option<&RingVector> {
        self.rows.get(index)
    }

    pub fn entry(&self, row: usize, col: usize) -> Option<&RingElement> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn rows_iter(&self) -> std::slice::Iter<'_, RingVector> {
        self.rows.iter()
    }

    pub fn infinity_norm(&self) -> u64 {
        self.rows
            .iter()
            .map(RingVector::infinity_norm)
            .max()
            .unwrap_or(0)
    }

    /// Whether any entry reaches `bound`, see [`RingElement::check_norm_bound`].
    pub fn check_norm_bound(&self, bound: u64) -> bool {
        self.rows.iter().any(|row| row.check_norm_bound(bound))
    }

    /// Entry-wise [`RingElement::power2_round`], returning `(r1, r0)`.
    pub fn power2_round(&self, d: u32) -> RingResult<(Self, Self)> {
        let (high, low): (Vec<_>, Vec<_>) = self
            .rows
            .iter()
            .map(|row| row.power2_round(d))
            .collect::<RingResult<Vec<_>>>()?
            .into_iter()
            .unzip();
        Ok((Self { rows: high }, Self { rows: low }))
    }

    pub fn high_bits(&self, alpha: u64) -> RingResult<Self> {
        let rows = self
            .rows
            .iter()
            .map(|row| row.high_bits(alpha))
            .collect::<RingResult<Vec<_>>>()?;
        Ok(Self { rows })
    }

    pub fn low_bits(&self, alpha: u64) -> RingResult<Self> {
        let rows = self
            .rows
            .iter()
            .map(|row| row.low_bits(alpha))
            .collect::<RingResult<Vec<_>>>()?;
        Ok(Self { rows })
    }

    /// Coefficients of every entry in row-major order.
    pub fn to_coefficients(&self) -> Vec<u64> {
        self.rows
            .iter()
            .flat_map(RingVector::to_coefficients)
            .collect()
    }

    pub fn to_transformed(&self) -> RingResult<Self> {
        let rows = self
            .rows
            .iter()
            .map(RingVector::to_transformed)
            .collect::<RingResult<Vec<_>>>()?;
        Ok(Self { rows })
    }

    pub fn to_canonical(&self) -> Self {
        Self {
            rows: self.rows.iter().map(RingVector::to_canonical).collect(),
        }
    }

    pub fn transpose(&self) -> Self {
        let ctx = self.context();
        let rows = (0..self.cols())
            .map(|j| {
                let column = self
                    .rows
                    .iter()
                    .map(|row| row.elements()[j].clone())
                    .collect();
                RingVector::from_parts(ctx, column)
            })
            .collect();
        Self { rows }
    }

    pub fn scalar_mul(&self, scalar: i64) -> Self {
        Self {
            rows: self.rows.iter().map(|row| row.scalar_mul(scalar)).collect(),
        }
    }

    /// Multiplies every entry by one ring element.
    pub fn mul_element(&self, factor: &RingElement) -> RingResult<Self> {
        let rows = self
            .rows
            .iter()
            .map(|row| row.mul_element(factor))
            .collect::<RingResult<Vec<_>>>()?;
        Ok(Self { rows })
    }

    pub fn add(&self, other: &RingMatrix) -> RingResult<Self> {
        self.ensure_same_shape(other, "matrix addition")?;
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(a, b)| a.add(b))
            .collect::<RingResult<Vec<_>>>()?;
        Ok(Self { rows })
    }

    pub fn sub(&self, other: &RingMatrix) -> RingResult<Self> {
        self.ensure_same_shape(other, "matrix subtraction")?;
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(a, b)| a.sub(b))
            .collect::<RingResult<Vec<_>>>()?;
        Ok(Self { rows })
    }

    /// Joins columns: row i of the result is row i of `self` followed by row i of `other`.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::DimensionMismatch`] if the row counts differ.
    pub fn concat(&self, other: &RingMatrix) -> RingResult<Self> {
        self.context().ensure_same(other.context())?;
        if self.rows() != other.rows() {
            return Err(RingError::dimension_mismatch(
                "horizontal concatenation",
                self.rows(),
                other.rows(),
            ));
        }
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(a, b)| a.concat(b))
            .collect::<RingResult<Vec<_>>>()?;
        Ok(Self { rows })
    }

    /// Appends the rows of `other` below the rows of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::DimensionMismatch`] if the column counts differ.
    pub fn stack(&self, other: &RingMatrix) -> RingResult<Self> {
        self.context().ensure_same(other.context())?;
        if self.cols() != other.cols() {
            return Err(RingError::dimension_mismatch(
                "vertical stacking",
                self.cols(),
                other.cols(),
            ));
        }
        let mut rows = self.rows.clone();
        rows.extend(other.rows.iter().cloned());
        Ok(Self { rows })
    }

    /// Matrix product, computed as dot products of rows of `self` with rows of the
    /// transposed `other`.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::DimensionMismatch`] if `self.cols() != other.rows()`.
    pub fn mul(&self, other: &RingMatrix) -> RingResult<Self> {
        let ctx = self.context();
        ctx.ensure_same(other.context())?;
        if self.cols() != other.rows() {
            return Err(RingError::dimension_mismatch(
                "matrix product",
                self.cols(),
                other.rows(),
            ));
        }

        let (lhs, rhs) = if ctx.supports_transform() {
            (self.to_transformed()?, other.transpose().to_transformed()?)
        } else {
            (self.clone(), other.transpose())
        };

        let rows = lhs
            .rows
            .iter()
            .map(|row| {
                let entries = rhs.rows.iter().map(|col| row.dot_unchecked(col)).collect();
                RingVector::from_parts(ctx, entries)
            })
            .collect();
        Ok(Self { rows })
    }

    /// Matrix-vector product, defined through [`RingVector::mul_matrix`].
    pub fn mul_vector(&self, vector: &RingVector) -> RingResult<RingVector> {
        vector.mul_matrix(self)
    }

    /// Integer matrix of size (rows·N) x (cols·N) whose (i, j) block is the
    /// rotation matrix of entry (i, j).
    pub fn to_integer_matrix(&self) -> Vec<Vec<i64>> {
        let n = self.context().degree();
        let mut out = vec![vec![0i64; self.cols() * n]; self.rows() * n];
        for (i, row) in self.rows.iter().enumerate() {
            for (j, entry) in row.iter().enumerate() {
                for (r, block_row) in entry.rotation_matrix().into_iter().enumerate() {
                    out[i * n + r][j * n..(j + 1) * n].copy_from_slice(&block_row);
                }
            }
        }
        out
    }

    fn ensure_same_shape(&self, other: &RingMatrix, operation: &'static str) -> RingResult<()> {
        self.context().ensure_same(other.context())?;
        if self.rows() != other.rows() {
            return Err(RingError::dimension_mismatch(
                operation,
                self.rows(),
                other.rows(),
            ));
        }
        if self.cols() != other.cols() {
            return Err(RingError::dimension_mismatch(
                operation,
                self.cols(),
                other.cols(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for RingMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{row}")?;
        }
        Ok(())
    }
}

// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Error types for ring arithmetic.
//!
//! Every fallible operation in this crate returns [`RingResult`]. Errors are raised
//! before any output is produced, so callers never observe a partially built value.

use thiserror::Error;

/// Errors that can occur while building rings or operating on their elements.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    /// Invalid ring parameters (zero degree, unusable coefficient modulus, bad modulus polynomial)
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A coefficient list does not fit below the ring degree
    #[error("Degree exceeded: {length} coefficients do not fit in a ring of degree {degree}")]
    DegreeExceeded { length: usize, degree: usize },

    /// Operand shapes are incompatible
    #[error("Dimension mismatch in {operation}: expected {expected}, got {actual}")]
    DimensionMismatch {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A matrix needs at least one row and one column
    #[error("Matrix must have at least one row and one column")]
    EmptyMatrix,

    /// Operands belong to rings with different parameters
    #[error("Operands belong to different rings")]
    ContextMismatch,

    /// The ring has no number-theoretic transform
    #[error("Transformed domain unavailable: {message}")]
    TransformUnavailable { message: String },

    /// A rounding or decomposition parameter is out of range
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

/// Result type alias for ring operations
pub type RingResult<T> = Result<T, RingError>;

impl RingError {
    /// Create a configuration error with a message
    pub fn configuration(message: impl Into<String>) -> Self {
        RingError::Configuration {
            message: message.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch(operation: &'static str, expected: usize, actual: usize) -> Self {
        RingError::DimensionMismatch {
            operation,
            expected,
            actual,
        }
    }

    /// Create a transform error with a message
    pub fn transform_unavailable(message: impl Into<String>) -> Self {
        RingError::TransformUnavailable {
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        RingError::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RingError::dimension_mismatch("vector addition", 3, 2);
        assert_eq!(
            err.to_string(),
            "Dimension mismatch in vector addition: expected 3, got 2"
        );

        let err = RingError::DegreeExceeded {
            length: 5,
            degree: 4,
        };
        assert_eq!(
            err.to_string(),
            "Degree exceeded: 5 coefficients do not fit in a ring of degree 4"
        );

        let err = RingError::configuration("degree must be positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: degree must be positive"
        );
    }
}

//! Error types for transform operations.
//!
//! Every failure is surfaced immediately as a typed error; nothing is retried
//! or recovered inside the crate.

use thiserror::Error;

/// Main error type for transform operations.
#[derive(Error, Debug)]
pub enum TransformError {
    /// An operand's fixed trailing dimensions do not match the expected unit shape.
    #[error("Shape violation: `{name}` shape should end with {expected:?}, got {actual:?}")]
    ShapeViolation {
        name: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Batch shapes that cannot be paired.
    #[error("Shape mismatch: batch shape {transform:?} cannot be paired with batch shape {operand:?}")]
    ShapeMismatch {
        transform: Vec<usize>,
        operand: Vec<usize>,
    },

    /// Operands bound to different devices.
    #[error("Backend mismatch: expected device {expected}, got {actual}")]
    BackendMismatch { expected: String, actual: String },

    /// Operand data of an unsupported kind.
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// Matrix inversion failed.
    #[error("Singular matrix: element {index} of batch {shape:?} is not invertible")]
    Singular { index: usize, shape: Vec<usize> },

    /// A transform variant does not provide the requested operation.
    #[error("Unimplemented: `{operation}` is not supported by {kind}")]
    Unimplemented {
        operation: &'static str,
        kind: &'static str,
    },

    /// Reassembling a batch with no elements.
    #[error("Cannot reassemble an empty batch")]
    EmptyBatch,
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

impl TransformError {
    /// Create a shape violation error.
    pub fn shape_violation(name: impl Into<String>, expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeViolation {
            name: name.into(),
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// Create a shape mismatch error.
    pub fn shape_mismatch(transform: &[usize], operand: &[usize]) -> Self {
        Self::ShapeMismatch {
            transform: transform.to_vec(),
            operand: operand.to_vec(),
        }
    }

    /// Create a backend mismatch error from two device descriptions.
    pub fn backend_mismatch(expected: impl std::fmt::Debug, actual: impl std::fmt::Debug) -> Self {
        Self::BackendMismatch {
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        Self::TypeMismatch(msg.into())
    }

    /// Create an unimplemented capability error.
    pub fn unimplemented(operation: &'static str, kind: &'static str) -> Self {
        Self::Unimplemented { operation, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_violation_display() {
        let err = TransformError::shape_violation("point", &[3], &[4, 2]);
        assert_eq!(
            err.to_string(),
            "Shape violation: `point` shape should end with [3], got [4, 2]"
        );
    }

    #[test]
    fn test_shape_mismatch() {
        let err = TransformError::shape_mismatch(&[5], &[3]);
        assert!(matches!(err, TransformError::ShapeMismatch { .. }));
        let err_str = err.to_string();
        assert!(err_str.contains("[5]"));
        assert!(err_str.contains("[3]"));
    }

    #[test]
    fn test_backend_mismatch_uses_debug() {
        let err = TransformError::backend_mismatch("Cpu", "Cuda(0)");
        assert_eq!(err.to_string(), "Backend mismatch: expected device \"Cpu\", got \"Cuda(0)\"");
    }

    #[test]
    fn test_unimplemented_display() {
        let err = TransformError::unimplemented("inv", "CustomTransform");
        assert_eq!(err.to_string(), "Unimplemented: `inv` is not supported by CustomTransform");
    }
}

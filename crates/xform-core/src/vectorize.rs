//! Batch-shape resolution and vectorization.
//!
//! Every transform-capable value carries a batch shape `S` and every operand a
//! batch shape `B` (the leading dimensions before its fixed unit shape). Exactly
//! one pairing rule applies:
//!
//! * `S == ()`: the single transform is broadcast over every unit of the operand.
//! * `S == B`: the i-th transform is applied to the i-th operand unit.
//! * anything else is a shape mismatch (no prefix or numeric broadcasting).
//!
//! Units are visited in row-major order and results are reassembled with the
//! operand's batch shape. Custom transform logic is written once for a single
//! transform and a single unit; [`vectorize`] lifts it to batches.
//!
//! The affine [`crate::Transform`] does not go through [`vectorize`]: its kernels
//! take the [`Pairing`] from [`resolve_pairing`] and expand `R`/`t` across the
//! operand rows in tensor form. Both paths must agree on every operand.

use burn::tensor::backend::Backend;

use crate::error::{Result, TransformError};

/// A value with a batch shape whose elements can be selected one at a time.
pub trait Batched: Sized {
    /// Leading batch dimensions. Empty for a single, unbatched value.
    fn batch_shape(&self) -> &[usize];

    /// The `index`-th element in row-major order, with an empty batch shape.
    ///
    /// `index` must be smaller than [`Batched::batch_len`].
    fn element(&self, index: usize) -> Self;

    /// Number of elements in the batch (1 when unbatched).
    fn batch_len(&self) -> usize {
        num_elements(self.batch_shape())
    }
}

/// Reassembly of unbatched elements into a batch.
pub trait Stack: Batched + Clone {
    /// Stack `elements` (row-major) into a value of batch shape `batch_shape`.
    fn stack(elements: Vec<Self>, batch_shape: &[usize]) -> Result<Self>;
}

/// Values bound to a device of backend `B`.
pub trait OnDevice<B: Backend> {
    fn device(&self) -> B::Device;
}

/// Fail with a backend mismatch unless both devices are the same.
pub fn ensure_same_device<B: Backend>(expected: &B::Device, actual: &B::Device) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(TransformError::backend_mismatch(expected, actual))
    }
}

/// Number of elements described by a shape (1 for the empty shape).
pub fn num_elements(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// How the elements of a transform are paired with the units of an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pairing {
    /// Unbatched transform, unbatched operand.
    Single,
    /// Unbatched transform, broadcast over every operand unit.
    Broadcast,
    /// Transform and operand share the batch shape; pair element by element.
    Elementwise,
}

/// Resolve the pairing rule for a transform of batch shape `transform` applied
/// to an operand of batch shape `operand`.
pub fn resolve_pairing(transform: &[usize], operand: &[usize]) -> Result<Pairing> {
    if transform.is_empty() {
        if operand.is_empty() {
            Ok(Pairing::Single)
        } else {
            Ok(Pairing::Broadcast)
        }
    } else if transform == operand {
        Ok(Pairing::Elementwise)
    } else {
        Err(TransformError::shape_mismatch(transform, operand))
    }
}

/// Common batch shape of two record fields: equal shapes, or one side unbatched.
pub fn broadcast_batch_shapes(lhs: &[usize], rhs: &[usize]) -> Result<Vec<usize>> {
    if lhs == rhs || rhs.is_empty() {
        Ok(lhs.to_vec())
    } else if lhs.is_empty() {
        Ok(rhs.to_vec())
    } else {
        Err(TransformError::shape_mismatch(lhs, rhs))
    }
}

/// Lift `op`, written for one transform element and one operand unit, to the
/// batch shapes of `transform` and `operand`.
///
/// The result has the operand's batch shape. An operand with an empty batch
/// (some dimension of size 0) is returned as is, keeping its `B + unit` shape.
pub fn vectorize<T, X, F>(transform: &T, operand: &X, op: F) -> Result<X>
where
    T: Batched,
    X: Stack,
    F: Fn(&T, &X) -> Result<X>,
{
    let batch_shape = operand.batch_shape().to_vec();
    let pairing = resolve_pairing(transform.batch_shape(), &batch_shape)?;
    tracing::trace!(?pairing, ?batch_shape, "vectorize");

    let len = num_elements(&batch_shape);
    if len == 0 {
        return Ok(operand.clone());
    }
    let outputs = match pairing {
        Pairing::Single => return op(transform, operand),
        Pairing::Broadcast => (0..len)
            .map(|i| op(transform, &operand.element(i)))
            .collect::<Result<Vec<_>>>()?,
        Pairing::Elementwise => (0..len)
            .map(|i| op(&transform.element(i), &operand.element(i)))
            .collect::<Result<Vec<_>>>()?,
    };
    X::stack(outputs, &batch_shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scalars laid out row-major over a batch shape.
    #[derive(Debug, Clone, PartialEq)]
    struct Scalars {
        shape: Vec<usize>,
        values: Vec<f32>,
    }

    impl Scalars {
        fn new(shape: &[usize], values: Vec<f32>) -> Self {
            assert_eq!(num_elements(shape), values.len());
            Self { shape: shape.to_vec(), values }
        }
    }

    impl Batched for Scalars {
        fn batch_shape(&self) -> &[usize] {
            &self.shape
        }

        fn element(&self, index: usize) -> Self {
            Self::new(&[], vec![self.values[index]])
        }
    }

    impl Stack for Scalars {
        fn stack(elements: Vec<Self>, batch_shape: &[usize]) -> Result<Self> {
            let values = elements.into_iter().flat_map(|e| e.values).collect();
            Ok(Self::new(batch_shape, values))
        }
    }

    fn add(tr: &Scalars, x: &Scalars) -> Result<Scalars> {
        assert!(tr.shape.is_empty() && x.shape.is_empty());
        Ok(Scalars::new(&[], vec![tr.values[0] + x.values[0]]))
    }

    #[test]
    fn test_resolve_pairing_rules() {
        assert_eq!(resolve_pairing(&[], &[]).unwrap(), Pairing::Single);
        assert_eq!(resolve_pairing(&[], &[5]).unwrap(), Pairing::Broadcast);
        assert_eq!(resolve_pairing(&[5, 2], &[5, 2]).unwrap(), Pairing::Elementwise);
    }

    #[test]
    fn test_resolve_pairing_rejects_partial_broadcast() {
        let err = resolve_pairing(&[5], &[3]).unwrap_err();
        assert!(matches!(err, TransformError::ShapeMismatch { .. }));

        // Prefix of the operand shape is not enough.
        assert!(resolve_pairing(&[5], &[5, 2]).is_err());
        // A batched transform cannot be applied to a single unit.
        assert!(resolve_pairing(&[5], &[]).is_err());
        // Numerically broadcastable sizes are still rejected.
        assert!(resolve_pairing(&[1], &[4]).is_err());
    }

    #[test]
    fn test_broadcast_batch_shapes() {
        assert_eq!(broadcast_batch_shapes(&[2, 3], &[2, 3]).unwrap(), vec![2, 3]);
        assert_eq!(broadcast_batch_shapes(&[], &[4]).unwrap(), vec![4]);
        assert_eq!(broadcast_batch_shapes(&[4], &[]).unwrap(), vec![4]);
        assert!(broadcast_batch_shapes(&[4], &[2]).is_err());
    }

    #[test]
    fn test_vectorize_broadcast_keeps_row_major_order() {
        let tr = Scalars::new(&[], vec![10.0]);
        let x = Scalars::new(&[2, 3], vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);

        let out = vectorize(&tr, &x, add).unwrap();
        assert_eq!(out.shape, vec![2, 3]);
        assert_eq!(out.values, vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
    }

    #[test]
    fn test_vectorize_elementwise_pairs_elements() {
        let tr = Scalars::new(&[3], vec![100.0, 200.0, 300.0]);
        let x = Scalars::new(&[3], vec![1.0, 2.0, 3.0]);

        let out = vectorize(&tr, &x, add).unwrap();
        assert_eq!(out.shape, vec![3]);
        assert_eq!(out.values, vec![101.0, 202.0, 303.0]);
    }

    #[test]
    fn test_vectorize_single_calls_once() {
        let tr = Scalars::new(&[], vec![1.0]);
        let x = Scalars::new(&[], vec![2.0]);

        let out = vectorize(&tr, &x, add).unwrap();
        assert_eq!(out, Scalars::new(&[], vec![3.0]));
    }

    #[test]
    fn test_vectorize_empty_batch_keeps_shape() {
        let tr = Scalars::new(&[], vec![10.0]);
        let x = Scalars::new(&[0, 3], Vec::new());

        let out = vectorize(&tr, &x, add).unwrap();
        assert_eq!(out, x);

        let tr = Scalars::new(&[0], Vec::new());
        let x = Scalars::new(&[0], Vec::new());
        assert_eq!(vectorize(&tr, &x, add).unwrap().shape, vec![0]);
    }

    #[test]
    fn test_vectorize_mismatch() {
        let tr = Scalars::new(&[5], vec![0.0; 5]);
        let x = Scalars::new(&[3], vec![0.0; 3]);
        let err = vectorize(&tr, &x, add).unwrap_err();
        assert!(matches!(err, TransformError::ShapeMismatch { .. }));
    }
}

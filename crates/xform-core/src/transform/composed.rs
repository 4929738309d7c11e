//! Composed transform implementation.
//!
//! `left @ right` with at least one custom link cannot be collapsed into a single
//! matrix, so the pair is kept and evaluated lazily:
//! T(x) = left(right(x))

use std::fmt;
use std::sync::Arc;

use burn::tensor::backend::Backend;

use super::custom::{CustomTransform, Kernel};
use super::kind::TransformKind;
use super::trait_::{TransformBase, Transformable};
use crate::error::Result;
use crate::vectorize::{broadcast_batch_shapes, ensure_same_device, Batched, OnDevice, Stack};

/// Lazy composition of two links (`left` after `right`).
///
/// The batch shape is the common batch shape of both links: equal shapes, or one
/// side unbatched.
pub struct ComposedTransform<B: Backend, X> {
    left_tr: TransformKind<B, X>,
    right_tr: TransformKind<B, X>,
    shape: Vec<usize>,
}

impl<B: Backend, X: 'static> ComposedTransform<B, X> {
    /// Create a new composed transform.
    ///
    /// # Arguments
    /// * `left_tr` - The transform applied last
    /// * `right_tr` - The transform applied first
    pub(crate) fn new(left_tr: TransformKind<B, X>, right_tr: TransformKind<B, X>) -> Result<Self> {
        ensure_same_device::<B>(&left_tr.device(), &right_tr.device())?;
        let shape = broadcast_batch_shapes(left_tr.batch_shape(), right_tr.batch_shape())?;
        tracing::debug!(?shape, "composing transforms");
        Ok(Self {
            left_tr,
            right_tr,
            shape,
        })
    }

    pub fn left_tr(&self) -> &TransformKind<B, X> {
        &self.left_tr
    }

    pub fn right_tr(&self) -> &TransformKind<B, X> {
        &self.right_tr
    }

    /// Apply `right_tr`, then `left_tr`.
    pub fn apply(&self, operand: &X) -> Result<X>
    where
        X: Transformable<B> + Stack,
    {
        let intermediate = self.right_tr.apply(operand)?;
        self.left_tr.apply(&intermediate)
    }

    /// `(left ∘ right)⁻¹ = right⁻¹ ∘ left⁻¹`.
    ///
    /// Links are inverted one by one, so this succeeds only when both links are
    /// invertible. Chains reachable from the public constructors always hold a
    /// bound method and fail with `Unimplemented`.
    pub fn inv(&self) -> Result<Self> {
        Self::new(self.right_tr.inv()?, self.left_tr.inv()?)
    }
}

/// Element of a link, leaving unbatched links whole.
fn link_element<B: Backend, X>(link: &TransformKind<B, X>, index: usize) -> TransformKind<B, X> {
    if link.batch_shape().is_empty() {
        link.clone()
    } else {
        link.element(index)
    }
}

impl<B: Backend, X> Batched for ComposedTransform<B, X> {
    fn batch_shape(&self) -> &[usize] {
        &self.shape
    }

    fn element(&self, index: usize) -> Self {
        Self {
            left_tr: link_element(&self.left_tr, index),
            right_tr: link_element(&self.right_tr, index),
            shape: Vec::new(),
        }
    }
}

impl<B: Backend, X> OnDevice<B> for ComposedTransform<B, X> {
    fn device(&self) -> B::Device {
        self.left_tr.device()
    }
}

impl<B: Backend, X> Clone for ComposedTransform<B, X> {
    fn clone(&self) -> Self {
        Self {
            left_tr: self.left_tr.clone(),
            right_tr: self.right_tr.clone(),
            shape: self.shape.clone(),
        }
    }
}

impl<B: Backend, X> fmt::Debug for ComposedTransform<B, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposedTransform")
            .field("left_tr", &self.left_tr)
            .field("right_tr", &self.right_tr)
            .field("batch_shape", &self.shape)
            .finish()
    }
}

impl<B, X> Kernel<B, X> for ComposedTransform<B, X>
where
    B: Backend,
    X: Transformable<B> + Stack + 'static,
{
    fn kind(&self) -> &'static str {
        "ComposedTransform"
    }

    fn batch_shape(&self) -> &[usize] {
        &self.shape
    }

    fn device(&self) -> B::Device {
        <Self as OnDevice<B>>::device(self)
    }

    fn element(&self, index: usize) -> Arc<dyn Kernel<B, X>> {
        Arc::new(Batched::element(self, index))
    }

    fn call(&self, operand: &X) -> Result<X> {
        ComposedTransform::apply(self, operand)
    }

    fn inverse(&self) -> Result<Arc<dyn Kernel<B, X>>> {
        Ok(Arc::new(ComposedTransform::inv(self)?))
    }
}

/// Composed transforms are exposed as custom transforms, so chains nest freely.
impl<B, X> From<ComposedTransform<B, X>> for CustomTransform<B, X>
where
    B: Backend,
    X: Transformable<B> + Stack + 'static,
{
    fn from(composed: ComposedTransform<B, X>) -> Self {
        CustomTransform::from_kernel(Arc::new(composed))
    }
}

impl<B, X> TransformBase<B, X> for ComposedTransform<B, X>
where
    B: Backend,
    X: Transformable<B> + Stack + 'static,
{
    fn apply(&self, operand: &X) -> Result<X> {
        ComposedTransform::apply(self, operand)
    }

    fn inv(&self) -> Result<Self> {
        ComposedTransform::inv(self)
    }
}

//! Custom transforms.
//!
//! A custom transform wraps a user method written for one unbatched owner and one
//! unbatched operand. Batching follows the shared pairing rules: the owner's
//! batch shape is matched against the operand's, and the method is called once
//! per pair.
//!
//! Chains built from custom transforms are lazy: composing returns a
//! [`ComposedTransform`] that only evaluates its links when applied.

use std::fmt;
use std::sync::Arc;

use burn::tensor::backend::Backend;

use super::affine::Transform;
use super::composed::ComposedTransform;
use super::kind::TransformKind;
use super::trait_::{TransformBase, Transformable};
use crate::error::{Result, TransformError};
use crate::vectorize::{ensure_same_device, vectorize, Batched, OnDevice, Stack};

/// Method wrapped by a custom transform: `(owner, operand) -> operand`.
///
/// Receives a single owner element and a single operand unit.
pub type Method<O, X> = fn(&O, &X) -> Result<X>;

/// Object-safe view of a custom transform body.
pub(crate) trait Kernel<B: Backend, X>: Send + Sync {
    fn kind(&self) -> &'static str;

    fn batch_shape(&self) -> &[usize];

    fn device(&self) -> B::Device;

    fn element(&self, index: usize) -> Arc<dyn Kernel<B, X>>;

    /// Apply to an operand whose batch shape pairs as `Single` with this kernel.
    fn call(&self, operand: &X) -> Result<X>;

    fn inverse(&self) -> Result<Arc<dyn Kernel<B, X>>>;
}

/// A method bound to its owner.
struct BoundMethod<O, X> {
    owner: O,
    method: Method<O, X>,
}

impl<B, O, X> Kernel<B, X> for BoundMethod<O, X>
where
    B: Backend,
    O: Batched + OnDevice<B> + Send + Sync + 'static,
    X: 'static,
{
    fn kind(&self) -> &'static str {
        "CustomTransform"
    }

    fn batch_shape(&self) -> &[usize] {
        self.owner.batch_shape()
    }

    fn device(&self) -> B::Device {
        self.owner.device()
    }

    fn element(&self, index: usize) -> Arc<dyn Kernel<B, X>> {
        Arc::new(BoundMethod {
            owner: self.owner.element(index),
            method: self.method,
        })
    }

    fn call(&self, operand: &X) -> Result<X> {
        (self.method)(&self.owner, operand)
    }

    fn inverse(&self) -> Result<Arc<dyn Kernel<B, X>>> {
        Err(TransformError::unimplemented("inv", "CustomTransform"))
    }
}

/// Transform defined by a user method, or a lazy chain containing one.
///
/// # Type Parameters
/// * `B` - The Burn backend
/// * `X` - The operand type, also the output type
pub struct CustomTransform<B: Backend, X> {
    kernel: Arc<dyn Kernel<B, X>>,
}

impl<B: Backend, X: 'static> CustomTransform<B, X> {
    /// Bind `method` to `owner`.
    ///
    /// The transform's batch shape is the owner's batch shape.
    pub fn new<O>(owner: O, method: Method<O, X>) -> Self
    where
        O: Batched + OnDevice<B> + Send + Sync + 'static,
    {
        Self {
            kernel: Arc::new(BoundMethod { owner, method }),
        }
    }

    pub(crate) fn from_kernel(kernel: Arc<dyn Kernel<B, X>>) -> Self {
        Self { kernel }
    }

    /// Apply the transform, vectorized over the batch shapes.
    pub fn apply(&self, operand: &X) -> Result<X>
    where
        X: Stack + OnDevice<B>,
    {
        ensure_same_device::<B>(&self.kernel.device(), &operand.device())?;
        vectorize(self, operand, |tr: &Self, x: &X| tr.kernel.call(x))
    }

    /// Lazy composition `self @ other`: `other` is applied first.
    pub fn compose(&self, other: impl Into<TransformKind<B, X>>) -> Result<Self>
    where
        X: Transformable<B> + Stack,
    {
        let composed = ComposedTransform::new(self.clone().into(), other.into())?;
        Ok(composed.into())
    }

    /// Get the inverse transform.
    ///
    /// A bound method has no inverse, so this fails with
    /// [`TransformError::Unimplemented`](crate::TransformError::Unimplemented).
    /// Every chain built with [`CustomTransform::compose`] or `tr.apply(&custom)`
    /// holds at least one bound method, so inverting such a chain fails as well.
    pub fn inv(&self) -> Result<Self> {
        self.kernel.inverse().map(Self::from_kernel)
    }
}

/// Turn a method into a constructor of custom transforms.
///
/// The returned closure binds the method to each owner it is given.
pub fn make_custom_transform<B, O, X>(method: Method<O, X>) -> impl Fn(O) -> CustomTransform<B, X>
where
    B: Backend,
    O: Batched + OnDevice<B> + Send + Sync + 'static,
    X: 'static,
{
    move |owner| CustomTransform::new(owner, method)
}

impl<B: Backend, X> Clone for CustomTransform<B, X> {
    fn clone(&self) -> Self {
        Self {
            kernel: Arc::clone(&self.kernel),
        }
    }
}

impl<B: Backend, X> fmt::Debug for CustomTransform<B, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.kernel.kind())
            .field("batch_shape", &self.kernel.batch_shape())
            .finish()
    }
}

impl<B: Backend, X> Batched for CustomTransform<B, X> {
    fn batch_shape(&self) -> &[usize] {
        self.kernel.batch_shape()
    }

    fn element(&self, index: usize) -> Self {
        Self {
            kernel: self.kernel.element(index),
        }
    }
}

impl<B: Backend, X> OnDevice<B> for CustomTransform<B, X> {
    fn device(&self) -> B::Device {
        self.kernel.device()
    }
}

/// `tr @ custom` stays lazy: the affine transform is chained after the custom one.
impl<B: Backend, X> Transformable<B> for CustomTransform<B, X>
where
    X: Transformable<B> + Stack + 'static,
{
    fn apply_transform(&self, tr: &Transform<B>) -> Result<Self> {
        let composed = ComposedTransform::new(tr.clone().into(), self.clone().into())?;
        Ok(composed.into())
    }
}

impl<B: Backend, X> TransformBase<B, X> for CustomTransform<B, X>
where
    X: Stack + OnDevice<B> + 'static,
{
    fn apply(&self, operand: &X) -> Result<X> {
        CustomTransform::apply(self, operand)
    }

    fn inv(&self) -> Result<Self> {
        CustomTransform::inv(self)
    }
}

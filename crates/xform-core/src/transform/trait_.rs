//! Transform traits.
//!
//! [`TransformBase`] is the capability shared by every transform variant and
//! [`Transformable`] is implemented by every value an affine transform can be
//! applied to.

use burn::tensor::backend::Backend;

use super::affine::Transform;
use crate::error::Result;
use crate::vectorize::OnDevice;

/// Values an affine [`Transform`] can be applied to (`tr @ value`).
///
/// Arrays are point clouds, rays move their origin and direction, transforms are
/// composed, custom transforms are chained lazily.
pub trait Transformable<B: Backend>: OnDevice<B> + Sized {
    /// Apply `tr` to `self`. Batch shapes are paired per [`crate::vectorize`].
    fn apply_transform(&self, tr: &Transform<B>) -> Result<Self>;
}

/// Capability shared by every transform variant.
///
/// # Type Parameters
/// * `B` - The Burn backend
/// * `X` - The operand type the transform maps
pub trait TransformBase<B: Backend, X> {
    /// Apply the transform to `operand`.
    ///
    /// # Returns
    /// A value of the operand's type, with the operand's batch shape
    fn apply(&self, operand: &X) -> Result<X>;

    /// Get the inverse transform.
    ///
    /// Variants that cannot be inverted fail with
    /// [`crate::error::TransformError::Unimplemented`].
    fn inv(&self) -> Result<Self>
    where
        Self: Sized;
}

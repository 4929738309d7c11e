//! Closed set of transform variants usable as links of a chain.

use std::fmt;

use burn::tensor::backend::Backend;

use super::affine::Transform;
use super::custom::CustomTransform;
use super::trait_::Transformable;
use crate::error::Result;
use crate::vectorize::{Batched, OnDevice, Stack};

/// A link of a composed transform.
pub enum TransformKind<B: Backend, X> {
    Affine(Transform<B>),
    Custom(CustomTransform<B, X>),
}

impl<B: Backend, X: 'static> TransformKind<B, X> {
    /// Apply the link to `operand`.
    pub fn apply(&self, operand: &X) -> Result<X>
    where
        X: Transformable<B> + Stack,
    {
        match self {
            Self::Affine(tr) => tr.apply(operand),
            Self::Custom(tr) => tr.apply(operand),
        }
    }

    /// Invert the link. Fails for bare custom transforms.
    pub fn inv(&self) -> Result<Self> {
        Ok(match self {
            Self::Affine(tr) => Self::Affine(tr.inv()?),
            Self::Custom(tr) => Self::Custom(tr.inv()?),
        })
    }
}

impl<B: Backend, X> Batched for TransformKind<B, X> {
    fn batch_shape(&self) -> &[usize] {
        match self {
            Self::Affine(tr) => tr.batch_shape(),
            Self::Custom(tr) => tr.batch_shape(),
        }
    }

    fn element(&self, index: usize) -> Self {
        match self {
            Self::Affine(tr) => Self::Affine(tr.element(index)),
            Self::Custom(tr) => Self::Custom(tr.element(index)),
        }
    }
}

impl<B: Backend, X> OnDevice<B> for TransformKind<B, X> {
    fn device(&self) -> B::Device {
        match self {
            Self::Affine(tr) => tr.device(),
            Self::Custom(tr) => tr.device(),
        }
    }
}

impl<B: Backend, X> Clone for TransformKind<B, X> {
    fn clone(&self) -> Self {
        match self {
            Self::Affine(tr) => Self::Affine(tr.clone()),
            Self::Custom(tr) => Self::Custom(tr.clone()),
        }
    }
}

impl<B: Backend, X> fmt::Debug for TransformKind<B, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Affine(tr) => f.debug_tuple("Affine").field(tr).finish(),
            Self::Custom(tr) => f.debug_tuple("Custom").field(tr).finish(),
        }
    }
}

impl<B: Backend, X> From<Transform<B>> for TransformKind<B, X> {
    fn from(tr: Transform<B>) -> Self {
        Self::Affine(tr)
    }
}

impl<B: Backend, X> From<CustomTransform<B, X>> for TransformKind<B, X> {
    fn from(tr: CustomTransform<B, X>) -> Self {
        Self::Custom(tr)
    }
}

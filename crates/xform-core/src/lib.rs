//! Composable, batched 3-D transforms over burn tensors.
//!
//! * [`Transform`]: affine `R · p + t`, invertible, composable, batched.
//! * [`CustomTransform`]: a user method lifted to batches.
//! * [`ComposedTransform`]: lazy chains mixing both.

pub mod array;
pub mod config;
pub mod error;
pub mod ray;
pub mod transform;
pub mod vectorize;

pub use array::Array;
pub use config::LookAtConfig;
pub use error::{Result, TransformError};
pub use ray::Ray;
pub use transform::{
    compute_look_at_basis, compute_look_at_basis_with, make_custom_transform, ComposedTransform,
    CustomTransform, Method, Transform, TransformBase, TransformKind, Transformable, BASIS_LABELS,
};
pub use vectorize::{resolve_pairing, vectorize, Batched, OnDevice, Pairing, Stack};

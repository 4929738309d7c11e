//! Transform types and operations.
//!
//! This module provides the affine transform, user-defined custom transforms
//! and their lazy composition.

pub mod affine;
pub mod composed;
pub mod custom;
pub mod kind;
pub mod look_at;
pub mod trait_;

pub use affine::{Transform, BASIS_LABELS};
pub use composed::ComposedTransform;
pub use custom::{make_custom_transform, CustomTransform, Method};
pub use kind::TransformKind;
pub use look_at::{compute_look_at_basis, compute_look_at_basis_with};
pub use trait_::{TransformBase, Transformable};

//! Affine transform implementation.
//!
//! This module provides the rotation/scale/skew + translation transform that the
//! rest of the algebra is built around.

use std::ops::Add;

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use nalgebra::Matrix4;

use super::look_at::{compute_look_at_basis_with, look_at_rows};
use super::trait_::{TransformBase, Transformable};
use crate::array::Array;
use crate::config::LookAtConfig;
use crate::error::{Result, TransformError};
use crate::ray::Ray;
use crate::vectorize::{
    broadcast_batch_shapes, ensure_same_device, num_elements, resolve_pairing, Batched, OnDevice,
    Pairing, Stack,
};

/// Labels of the rows of [`Transform::ray_basis`].
pub const BASIS_LABELS: [&str; 3] = ["x", "y", "z"];

/// Affine Transform (Rotation/Scale/Skew + Translation).
///
/// Maps a point `p` to `R · p + t` and a direction `d` to `R · d`.
///
/// * `R` is a 3×3 matrix (`[[x0, y0, z0], [x1, y1, z1], [x2, y2, z2]]`), columns are
///   the transformed axes. No orthonormality is enforced.
/// * `t` is the translation (`[tx, ty, tz]`), the transformed origin.
///
/// Both fields share one batch shape. Values are immutable: every operation
/// returns a new transform.
#[derive(Debug, Clone)]
pub struct Transform<B: Backend> {
    rotation: Tensor<B, 3>,    // [n, 3, 3]
    translation: Tensor<B, 2>, // [n, 3]
    shape: Vec<usize>,         // batch shape, n = num_elements(shape)
}

impl<B: Backend> Transform<B> {
    fn from_parts(rotation: Tensor<B, 3>, translation: Tensor<B, 2>, shape: Vec<usize>) -> Self {
        Self {
            rotation,
            translation,
            shape,
        }
    }

    /// Create an unbatched transform.
    ///
    /// # Arguments
    /// * `rotation` - Tensor of shape `[3, 3]`
    /// * `translation` - Tensor of shape `[3]`
    pub fn new(rotation: Tensor<B, 2>, translation: Tensor<B, 1>) -> Result<Self> {
        if rotation.dims() != [3, 3] {
            return Err(TransformError::shape_violation("R", &[3, 3], &rotation.dims()));
        }
        if translation.dims() != [3] {
            return Err(TransformError::shape_violation("t", &[3], &translation.dims()));
        }
        ensure_same_device::<B>(&rotation.device(), &translation.device())?;
        Ok(Self::from_parts(
            rotation.reshape([1, 3, 3]),
            translation.reshape([1, 3]),
            Vec::new(),
        ))
    }

    /// Create a (possibly batched) transform from its fields.
    ///
    /// # Arguments
    /// * `rotation` - Array of shape `(*batch, 3, 3)`
    /// * `translation` - Array of shape `(*batch, 3)`
    ///
    /// A field without batch dimensions is broadcast to the other field's batch shape.
    pub fn from_arrays(rotation: &Array<B>, translation: &Array<B>) -> Result<Self> {
        rotation.ensure_unit("R", &[3, 3])?;
        translation.ensure_unit("t", &[3])?;
        ensure_same_device::<B>(&rotation.device(), &translation.device())?;

        let rotation_batch = matrix_batch_shape(rotation);
        let shape = broadcast_batch_shapes(rotation_batch, translation.batch_shape())?;
        let n = num_elements(&shape);
        Ok(Self::from_parts(
            matrix_rows::<B, 3>(rotation, n),
            translation.rows_expanded(n),
            shape,
        ))
    }

    /// Create the identity transform.
    pub fn identity(device: &B::Device) -> Self {
        Self::from_parts(
            Tensor::<B, 2>::eye(3, device).reshape([1, 3, 3]),
            Tensor::<B, 2>::zeros([1, 3], device),
            Vec::new(),
        )
    }

    /// Create a transform from 4×4 homogeneous matrices of shape `(*batch, 4, 4)`.
    ///
    /// `R = M[..., :3, :3]` and `t = M[..., :3, 3]`; the last row is ignored.
    pub fn from_matrix(matrix: &Array<B>) -> Result<Self> {
        matrix.ensure_unit("matrix", &[4, 4])?;
        let shape = matrix_batch_shape(matrix).to_vec();
        let n = num_elements(&shape);
        let m = matrix_rows::<B, 4>(matrix, n);

        let rotation = m.clone().slice([0..n, 0..3, 0..3]);
        let translation = m.slice([0..n, 0..3, 3..4]).reshape([n, 3]);
        Ok(Self::from_parts(rotation, translation, shape))
    }

    /// Create a transform positioned at `pos` and looking at `target`.
    ///
    /// Used to build camera-to-world transforms: world floor is `(x, y)` with `z`
    /// pointing up, and the camera width axis stays parallel to the floor.
    ///
    /// # Arguments
    /// * `pos` - Array of shape `(*batch, 3)`, becomes the translation
    /// * `target` - Array of shape `(*batch, 3)`
    pub fn from_look_at(pos: &Array<B>, target: &Array<B>) -> Result<Self> {
        Self::from_look_at_with(pos, target, &LookAtConfig::new())
    }

    /// Same as [`Transform::from_look_at`] with explicit conventions.
    pub fn from_look_at_with(pos: &Array<B>, target: &Array<B>, config: &LookAtConfig) -> Result<Self> {
        let basis = compute_look_at_basis_with(pos, target, config)?;
        let shape = matrix_batch_shape(&basis).to_vec();
        let n = num_elements(&shape);
        Ok(Self::from_parts(
            matrix_rows::<B, 3>(&basis, n),
            pos.rows_expanded(n),
            shape,
        ))
    }

    /// Returns a new transform at the same position, looking at `target`.
    ///
    /// The whole rotation is replaced by the look-at basis; any scale or prior
    /// orientation in `R` is discarded. The result has the batch shape of `target`.
    pub fn look_at(&self, target: &Array<B>) -> Result<Self> {
        self.look_at_with(target, &LookAtConfig::new())
    }

    /// Same as [`Transform::look_at`] with explicit conventions.
    pub fn look_at_with(&self, target: &Array<B>, config: &LookAtConfig) -> Result<Self> {
        ensure_same_device::<B>(&self.device(), &target.device())?;
        target.ensure_unit("target", &[3])?;

        let pairing = resolve_pairing(&self.shape, target.batch_shape())?;
        let n = target.batch_len();
        let (_, pos) = self.aligned(pairing, n);
        let rotation = look_at_rows(pos.clone(), target.rows(), config.world_up);
        Ok(Self::from_parts(rotation, pos, target.batch_shape().to_vec()))
    }

    /// Rotation/scale part, shape `(*batch, 3, 3)`.
    pub fn rotation(&self) -> Array<B> {
        let n = self.batch_len();
        Array::from_flat(self.rotation.clone().reshape([n * 9]), self.field_shape(&[3, 3]))
    }

    /// Translation part, shape `(*batch, 3)`.
    pub fn translation(&self) -> Array<B> {
        Array::from_rows(self.translation.clone(), self.field_shape(&[3]))
    }

    /// `x` axis of the transformation (`[x0, x1, x2]`).
    pub fn x_dir(&self) -> Array<B> {
        self.axis(0)
    }

    /// `y` axis of the transformation (`[y0, y1, y2]`).
    pub fn y_dir(&self) -> Array<B> {
        self.axis(1)
    }

    /// `z` axis of the transformation (`[z0, z1, z2]`).
    pub fn z_dir(&self) -> Array<B> {
        self.axis(2)
    }

    /// Ray from the origin `t` along the `x` axis.
    pub fn x_ray(&self) -> Ray<B> {
        Ray::from_parts(self.translation(), self.x_dir())
    }

    /// Ray from the origin `t` along the `y` axis.
    pub fn y_ray(&self) -> Ray<B> {
        Ray::from_parts(self.translation(), self.y_dir())
    }

    /// Ray from the origin `t` along the `z` axis.
    pub fn z_ray(&self) -> Ray<B> {
        Ray::from_parts(self.translation(), self.z_dir())
    }

    /// The `(x, y, z)` basis as rays of shape `(*batch, 3)`, labelled by
    /// [`BASIS_LABELS`].
    pub fn ray_basis(&self) -> Ray<B> {
        let n = self.batch_len();
        let shape = self.field_shape(&[3, 3]);
        let pos = self.translation.clone().unsqueeze_dim::<3>(1).expand([n, 3, 3]);
        // Row i of R^T is the i-th axis.
        let dir = self.rotation.clone().swap_dims(1, 2);
        Ray::from_parts(
            Array::from_flat(pos.reshape([n * 9]), shape.clone()),
            Array::from_flat(dir.reshape([n * 9]), shape),
        )
    }

    /// The 4×4 homogeneous matrix `[[R|t], [0, 0, 0, 1]]`, shape `(*batch, 4, 4)`.
    pub fn matrix4x4(&self) -> Array<B> {
        let n = self.batch_len();
        Array::from_flat(self.matrix_tensor().reshape([n * 16]), self.field_shape(&[4, 4]))
    }

    fn matrix_tensor(&self) -> Tensor<B, 3> {
        let n = self.batch_len();
        let top = Tensor::cat(
            vec![self.rotation.clone(), self.translation.clone().unsqueeze_dim::<3>(2)],
            2,
        );
        let bottom = Tensor::<B, 1>::from_floats([0.0, 0.0, 0.0, 1.0], &self.device())
            .reshape([1, 1, 4])
            .expand([n, 1, 4]);
        Tensor::cat(vec![top, bottom], 1)
    }

    /// Returns the inverse transform.
    ///
    /// Each 4×4 matrix is inverted in double precision. Fails with
    /// [`TransformError::Singular`] if any element of the batch is not invertible.
    pub fn inv(&self) -> Result<Self> {
        let n = self.batch_len();
        tracing::debug!(batch = n, "inverting transform");

        let values = self.matrix4x4().to_vec()?;
        let mut inverted = Vec::with_capacity(values.len());
        for (index, chunk) in values.chunks(16).enumerate() {
            let matrix = Matrix4::from_row_slice(&chunk.iter().map(|v| *v as f64).collect::<Vec<_>>());
            let inverse = matrix.try_inverse().ok_or_else(|| TransformError::Singular {
                index,
                shape: self.shape.clone(),
            })?;
            // nalgebra iterates column-major.
            inverted.extend(inverse.transpose().iter().map(|v| *v as f32));
        }

        let matrix = Array::new(inverted, &self.field_shape(&[4, 4]), &self.device())?;
        Self::from_matrix(&matrix)
    }

    /// Apply the transformation to a point cloud `(*batch, 3)`: `R · p + t`.
    pub fn apply_to_pos(&self, point: &Array<B>) -> Result<Array<B>> {
        self.contract("point", point, true)
    }

    /// Apply the transformation to directions `(*batch, 3)`: `R · d`.
    ///
    /// Directions are invariant to translation.
    pub fn apply_to_dir(&self, direction: &Array<B>) -> Result<Array<B>> {
        self.contract("direction", direction, false)
    }

    /// Apply the transformation to any transformable value (`tr @ other`).
    ///
    /// Arrays are treated as point clouds, transforms are composed, custom
    /// transforms are chained lazily.
    pub fn apply<X: Transformable<B>>(&self, other: &X) -> Result<X> {
        ensure_same_device::<B>(&self.device(), &other.device())?;
        other.apply_transform(self)
    }

    /// Translate the position by `translation`, of shape `(3,)` or `(*batch, 3)`.
    pub fn translate(&self, translation: &Array<B>) -> Result<Self> {
        let delta = self.field_rows("translation", translation)?;
        Ok(Self::from_parts(
            self.rotation.clone(),
            self.translation.clone() + delta,
            self.shape.clone(),
        ))
    }

    /// Copy with the translation replaced. Batch shape is preserved.
    pub fn with_translation(&self, translation: &Array<B>) -> Result<Self> {
        let t = self.field_rows("t", translation)?;
        Ok(Self::from_parts(self.rotation.clone(), t, self.shape.clone()))
    }

    /// Copy with the rotation replaced. Batch shape is preserved.
    pub fn with_rotation(&self, rotation: &Array<B>) -> Result<Self> {
        ensure_same_device::<B>(&self.device(), &rotation.device())?;
        rotation.ensure_unit("R", &[3, 3])?;
        let pairing = resolve_pairing(matrix_batch_shape(rotation), &self.shape)?;
        let n = self.batch_len();
        let r = match pairing {
            Pairing::Broadcast => matrix_rows::<B, 3>(rotation, 1).expand([n, 3, 3]),
            Pairing::Single | Pairing::Elementwise => matrix_rows::<B, 3>(rotation, n),
        };
        Ok(Self::from_parts(r, self.translation.clone(), self.shape.clone()))
    }

    /// Whether both transforms have the same batch shape and all entries of `R`
    /// and `t` are within `atol`.
    pub fn all_close(&self, other: &Self, atol: f32) -> Result<bool> {
        Ok(self.shape == other.shape
            && self.rotation().all_close(&other.rotation(), atol)?
            && self.translation().all_close(&other.translation(), atol)?)
    }

    /// `R · x (+ t)` over rows of `operand`, paired per the batch-shape rules.
    fn contract(&self, name: &str, operand: &Array<B>, translate: bool) -> Result<Array<B>> {
        ensure_same_device::<B>(&self.device(), &operand.device())?;
        operand.ensure_unit(name, &[3])?;

        let pairing = resolve_pairing(&self.shape, operand.batch_shape())?;
        let n = operand.batch_len();
        if n == 0 {
            return Ok(operand.clone());
        }
        let (r, t) = self.aligned(pairing, n);

        let rotated = r.matmul(operand.rows().unsqueeze_dim::<3>(2)).reshape([n, 3]);
        let out = if translate { rotated + t } else { rotated };
        Ok(Array::from_rows(out, operand.shape().to_vec()))
    }

    /// Transform rows matched one-to-one with `n` operand units.
    fn aligned(&self, pairing: Pairing, n: usize) -> (Tensor<B, 3>, Tensor<B, 2>) {
        match pairing {
            Pairing::Broadcast => (
                self.rotation.clone().expand([n, 3, 3]),
                self.translation.clone().expand([n, 3]),
            ),
            Pairing::Single | Pairing::Elementwise => (self.rotation.clone(), self.translation.clone()),
        }
    }

    /// Rows of a `(3,)` / `(*batch, 3)` field value, broadcast to this batch.
    fn field_rows(&self, name: &str, value: &Array<B>) -> Result<Tensor<B, 2>> {
        ensure_same_device::<B>(&self.device(), &value.device())?;
        value.ensure_unit(name, &[3])?;
        resolve_pairing(value.batch_shape(), &self.shape)?;
        Ok(value.rows_expanded(self.batch_len()))
    }

    fn axis(&self, index: usize) -> Array<B> {
        let n = self.batch_len();
        let column = self.rotation.clone().narrow(2, index, 1).reshape([n, 3]);
        Array::from_rows(column, self.field_shape(&[3]))
    }

    fn field_shape(&self, unit: &[usize]) -> Vec<usize> {
        let mut shape = self.shape.clone();
        shape.extend_from_slice(unit);
        shape
    }
}

/// Batch shape of an array of `(*batch, k, k)` matrices.
fn matrix_batch_shape<B: Backend>(matrices: &Array<B>) -> &[usize] {
    let shape = matrices.shape();
    &shape[..shape.len() - 2]
}

/// `(*batch, K, K)` matrices as `[n, K, K]`, broadcasting an unbatched matrix.
fn matrix_rows<B: Backend, const K: usize>(matrices: &Array<B>, n: usize) -> Tensor<B, 3> {
    let len = num_elements(matrix_batch_shape(matrices));
    let rows: Tensor<B, 3> = matrices.flat().reshape([len, K, K]);
    if len == n {
        rows
    } else {
        rows.expand([n, K, K])
    }
}

impl<B: Backend> Batched for Transform<B> {
    fn batch_shape(&self) -> &[usize] {
        &self.shape
    }

    fn element(&self, index: usize) -> Self {
        Self::from_parts(
            self.rotation.clone().narrow(0, index, 1),
            self.translation.clone().narrow(0, index, 1),
            Vec::new(),
        )
    }
}

impl<B: Backend> Stack for Transform<B> {
    fn stack(elements: Vec<Self>, batch_shape: &[usize]) -> Result<Self> {
        if elements.is_empty() {
            return Err(TransformError::EmptyBatch);
        }
        let (rotations, translations): (Vec<_>, Vec<_>) =
            elements.into_iter().map(|e| (e.rotation, e.translation)).unzip();
        Ok(Self::from_parts(
            Tensor::cat(rotations, 0),
            Tensor::cat(translations, 0),
            batch_shape.to_vec(),
        ))
    }
}

impl<B: Backend> OnDevice<B> for Transform<B> {
    fn device(&self) -> B::Device {
        self.rotation.device()
    }
}

/// `tr @ self` for two affine transforms: `R' = tr.R · R`, `t' = tr.R · t + tr.t`.
impl<B: Backend> Transformable<B> for Transform<B> {
    fn apply_transform(&self, tr: &Transform<B>) -> Result<Self> {
        ensure_same_device::<B>(&tr.device(), &self.device())?;
        let pairing = resolve_pairing(&tr.shape, &self.shape)?;
        let n = self.batch_len();
        if n == 0 {
            return Ok(self.clone());
        }
        let (r, t) = tr.aligned(pairing, n);

        let rotation = r.clone().matmul(self.rotation.clone());
        let translation = r
            .matmul(self.translation.clone().unsqueeze_dim::<3>(2))
            .reshape([n, 3])
            + t;
        Ok(Self::from_parts(rotation, translation, self.shape.clone()))
    }
}

impl<B: Backend, X: Transformable<B>> TransformBase<B, X> for Transform<B> {
    fn apply(&self, operand: &X) -> Result<X> {
        Transform::apply(self, operand)
    }

    fn inv(&self) -> Result<Self> {
        Transform::inv(self)
    }
}

/// Translate by an unbatched offset.
impl<B: Backend> Add<[f32; 3]> for Transform<B> {
    type Output = Transform<B>;

    fn add(self, translation: [f32; 3]) -> Self::Output {
        let delta = Tensor::<B, 1>::from_floats(translation, &self.device()).reshape([1, 3]);
        Self::from_parts(self.rotation, self.translation + delta, self.shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    fn array(values: Vec<f32>, shape: &[usize]) -> Array<TestBackend> {
        Array::new(values, shape, &Default::default()).unwrap()
    }

    fn sample_transform() -> Transform<TestBackend> {
        // Rotation of 90 degrees around z, scaled by 2 on x, translated by (1, 2, 3).
        let rotation = array(vec![0.0, -1.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 1.0], &[3, 3]);
        let translation = array(vec![1.0, 2.0, 3.0], &[3]);
        Transform::from_arrays(&rotation, &translation).unwrap()
    }

    #[test]
    fn test_identity_leaves_points_unchanged() {
        let device = Default::default();
        let transform = Transform::<TestBackend>::identity(&device);
        let points = array(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]);

        let transformed = transform.apply_to_pos(&points).unwrap();
        assert_eq!(transformed.shape(), &[2, 3]);
        assert_eq!(transformed.to_vec().unwrap(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_apply_to_pos_and_dir() {
        let transform = sample_transform();
        let point = array(vec![1.0, 1.0, 1.0], &[3]);

        // R · p = (-1, 2, 1)
        let pos = transform.apply_to_pos(&point).unwrap().to_vec().unwrap();
        assert_eq!(pos, vec![0.0, 4.0, 4.0]);

        let dir = transform.apply_to_dir(&point).unwrap().to_vec().unwrap();
        assert_eq!(dir, vec![-1.0, 2.0, 1.0]);
    }

    #[test]
    fn test_apply_to_pos_rejects_wrong_unit() {
        let transform = sample_transform();
        let points = array(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]);

        let err = transform.apply_to_pos(&points).unwrap_err();
        assert!(matches!(err, TransformError::ShapeViolation { .. }));
        let err = transform.apply_to_dir(&points).unwrap_err();
        assert!(matches!(err, TransformError::ShapeViolation { .. }));
    }

    #[test]
    fn test_from_matrix_and_matrix4x4() {
        let transform = sample_transform();
        let matrix = transform.matrix4x4();
        assert_eq!(matrix.shape(), &[4, 4]);
        assert_eq!(
            matrix.to_vec().unwrap(),
            vec![
                0.0, -1.0, 0.0, 1.0, //
                2.0, 0.0, 0.0, 2.0, //
                0.0, 0.0, 1.0, 3.0, //
                0.0, 0.0, 0.0, 1.0,
            ]
        );

        let rebuilt = Transform::from_matrix(&matrix).unwrap();
        assert!(rebuilt.all_close(&transform, 0.0).unwrap());
    }

    #[test]
    fn test_from_matrix_rejects_3x3() {
        let err = Transform::from_matrix(&array(vec![0.0; 9], &[3, 3])).unwrap_err();
        assert!(matches!(err, TransformError::ShapeViolation { .. }));
    }

    #[test]
    fn test_inverse_roundtrip() {
        let transform = sample_transform();
        let inverse = transform.inv().unwrap();

        let identity = Transform::identity(&Default::default());
        assert!(transform.apply(&inverse).unwrap().all_close(&identity, 1e-5).unwrap());
        assert!(inverse.apply(&transform).unwrap().all_close(&identity, 1e-5).unwrap());
        assert!(inverse.inv().unwrap().all_close(&transform, 1e-5).unwrap());
    }

    #[test]
    fn test_inverse_of_singular_matrix_fails() {
        let rotation = array(vec![0.0; 9], &[3, 3]);
        let translation = array(vec![1.0, 2.0, 3.0], &[3]);
        let transform = Transform::from_arrays(&rotation, &translation).unwrap();

        let err = transform.inv().unwrap_err();
        assert!(matches!(err, TransformError::Singular { index: 0, .. }));
    }

    #[test]
    fn test_compose_multiplies_rotation_and_moves_translation() {
        let outer = sample_transform();
        let inner = Transform::<TestBackend>::identity(&Default::default()) + [1.0, 0.0, 0.0];

        let composed = outer.apply(&inner).unwrap();
        // t' = R · (1, 0, 0) + t = (0, 2, 0) + (1, 2, 3)
        assert_eq!(composed.translation().to_vec().unwrap(), vec![1.0, 4.0, 3.0]);
        assert!(composed.rotation().all_close(&outer.rotation(), 0.0).unwrap());
    }

    #[test]
    fn test_translate_and_with_translation() {
        let transform = sample_transform();

        let moved = transform.translate(&array(vec![1.0, 1.0, 1.0], &[3])).unwrap();
        assert_eq!(moved.translation().to_vec().unwrap(), vec![2.0, 3.0, 4.0]);

        let replaced = transform.with_translation(&array(vec![0.0, 0.0, 0.0], &[3])).unwrap();
        assert_eq!(replaced.translation().to_vec().unwrap(), vec![0.0, 0.0, 0.0]);
        assert!(replaced.rotation().all_close(&transform.rotation(), 0.0).unwrap());
    }

    #[test]
    fn test_axes_are_columns() {
        let transform = sample_transform();
        assert_eq!(transform.x_dir().to_vec().unwrap(), vec![0.0, 2.0, 0.0]);
        assert_eq!(transform.y_dir().to_vec().unwrap(), vec![-1.0, 0.0, 0.0]);
        assert_eq!(transform.z_dir().to_vec().unwrap(), vec![0.0, 0.0, 1.0]);

        let ray = transform.y_ray();
        assert_eq!(ray.pos().to_vec().unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(ray.dir().to_vec().unwrap(), vec![-1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_ray_basis() {
        let transform = sample_transform();
        let basis = transform.ray_basis();

        assert_eq!(basis.batch_shape(), &[3]);
        assert_eq!(basis.pos().to_vec().unwrap(), [1.0, 2.0, 3.0].repeat(3));
        assert_eq!(
            basis.dir().to_vec().unwrap(),
            vec![0.0, 2.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0]
        );
        assert_eq!(BASIS_LABELS, ["x", "y", "z"]);
    }

    #[test]
    fn test_fields_broadcast_on_construction() {
        let rotation = array(vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0], &[3, 3]);
        let translation = array((0..12).map(|v| v as f32).collect(), &[4, 3]);

        let transform = Transform::from_arrays(&rotation, &translation).unwrap();
        assert_eq!(transform.batch_shape(), &[4]);
        assert_eq!(transform.rotation().shape(), &[4, 3, 3]);

        let mismatched = array(vec![0.0; 6], &[2, 3]);
        let err = Transform::from_arrays(&transform.rotation(), &mismatched).unwrap_err();
        assert!(matches!(err, TransformError::ShapeMismatch { .. }));
    }
}

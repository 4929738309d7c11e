//! Rays: an origin and a direction per batch element.

use burn::tensor::backend::Backend;

use crate::array::Array;
use crate::error::{Result, TransformError};
use crate::transform::{Transform, Transformable};
use crate::vectorize::{ensure_same_device, Batched, OnDevice, Stack};

/// Batch of rays, `pos` and `dir` both of shape `(*batch, 3)`.
#[derive(Debug, Clone)]
pub struct Ray<B: Backend> {
    pos: Array<B>,
    dir: Array<B>,
}

impl<B: Backend> Ray<B> {
    /// Create rays from origins and directions of the same shape.
    pub fn new(pos: Array<B>, dir: Array<B>) -> Result<Self> {
        pos.ensure_unit("pos", &[3])?;
        dir.ensure_unit("dir", &[3])?;
        if pos.shape() != dir.shape() {
            return Err(TransformError::shape_mismatch(pos.batch_shape(), dir.batch_shape()));
        }
        ensure_same_device::<B>(&pos.device(), &dir.device())?;
        Ok(Self::from_parts(pos, dir))
    }

    pub(crate) fn from_parts(pos: Array<B>, dir: Array<B>) -> Self {
        Self { pos, dir }
    }

    pub fn pos(&self) -> &Array<B> {
        &self.pos
    }

    pub fn dir(&self) -> &Array<B> {
        &self.dir
    }
}

impl<B: Backend> Batched for Ray<B> {
    fn batch_shape(&self) -> &[usize] {
        self.pos.batch_shape()
    }

    fn element(&self, index: usize) -> Self {
        Self::from_parts(self.pos.element(index), self.dir.element(index))
    }
}

impl<B: Backend> Stack for Ray<B> {
    fn stack(elements: Vec<Self>, batch_shape: &[usize]) -> Result<Self> {
        let (pos, dir): (Vec<_>, Vec<_>) = elements.into_iter().map(|r| (r.pos, r.dir)).unzip();
        Ok(Self::from_parts(
            Array::stack(pos, batch_shape)?,
            Array::stack(dir, batch_shape)?,
        ))
    }
}

impl<B: Backend> OnDevice<B> for Ray<B> {
    fn device(&self) -> B::Device {
        self.pos.device()
    }
}

/// The origin moves as a point, the direction ignores translation.
impl<B: Backend> Transformable<B> for Ray<B> {
    fn apply_transform(&self, tr: &Transform<B>) -> Result<Self> {
        Ok(Self::from_parts(tr.apply_to_pos(&self.pos)?, tr.apply_to_dir(&self.dir)?))
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

    #[test]
    fn test_ray_transform_ignores_translation_on_dir() {
        let ray = Ray::new(array(vec![0.0, 0.0, 0.0], &[3]), array(vec![1.0, 0.0, 0.0], &[3])).unwrap();
        let tr = Transform::<TestBackend>::identity(&Default::default()) + [0.0, 0.0, 5.0];

        let moved = tr.apply(&ray).unwrap();
        assert_eq!(moved.pos().to_vec().unwrap(), vec![0.0, 0.0, 5.0]);
        assert_eq!(moved.dir().to_vec().unwrap(), vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_ray_rejects_mismatched_fields() {
        let err = Ray::new(array(vec![0.0; 6], &[2, 3]), array(vec![0.0; 3], &[3])).unwrap_err();
        assert!(matches!(err, TransformError::ShapeMismatch { .. }));

        let err = Ray::new(array(vec![0.0; 4], &[2, 2]), array(vec![0.0; 4], &[2, 2])).unwrap_err();
        assert!(matches!(err, TransformError::ShapeViolation { .. }));
    }

    #[test]
    fn test_ray_stack() {
        let ray = Ray::new(
            array((0..6).map(|v| v as f32).collect(), &[2, 3]),
            array(vec![1.0; 6], &[2, 3]),
        )
        .unwrap();
        let elements = (0..2).map(|i| ray.element(i)).collect();
        let stacked = Ray::stack(elements, &[2]).unwrap();
        assert_eq!(stacked.batch_shape(), &[2]);
        assert!(stacked.pos().all_close(ray.pos(), 0.0).unwrap());
    }
}

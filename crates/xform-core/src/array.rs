//! Dynamic-rank float arrays.
//!
//! burn tensors carry their rank in the type, while transform operands have an
//! arbitrary number of batch dimensions. [`Array`] keeps the values as a flat
//! tensor next to the full shape and reshapes to a static rank only inside the
//! kernels that need one.

use burn::tensor::backend::Backend;
use burn::tensor::{Shape, Tensor, TensorData};

use crate::error::{Result, TransformError};
use crate::transform::{Transform, Transformable};
use crate::vectorize::{num_elements, Batched, OnDevice, Stack};

/// Float array of any rank ≥ 1, bound to one device.
///
/// As an operand, the trailing axis is the unit (e.g. `3` for a point) and every
/// leading axis is a batch dimension.
#[derive(Debug, Clone)]
pub struct Array<B: Backend> {
    data: Tensor<B, 1>,
    shape: Vec<usize>,
}

impl<B: Backend> Array<B> {
    /// Create an array from row-major values.
    ///
    /// # Arguments
    /// * `values` - Row-major values, `num_elements(shape)` of them
    /// * `shape` - Full shape, at least one axis
    /// * `device` - Device to create the tensor on
    pub fn new(values: Vec<f32>, shape: &[usize], device: &B::Device) -> Result<Self> {
        if shape.is_empty() {
            return Err(TransformError::shape_violation("array", &[values.len()], shape));
        }
        let expected = num_elements(shape);
        if values.len() != expected {
            return Err(TransformError::shape_violation("values", &[expected], &[values.len()]));
        }
        let data = Tensor::<B, 1>::from_data(TensorData::new(values, [expected]), device);
        Ok(Self::from_flat(data, shape.to_vec()))
    }

    /// Create an array from raw tensor data.
    ///
    /// Only floating point data is accepted.
    pub fn from_data(data: TensorData, device: &B::Device) -> Result<Self> {
        if !data.dtype.is_float() {
            return Err(TransformError::type_mismatch(format!(
                "expected float tensor data, got {:?}",
                data.dtype
            )));
        }
        let shape = data.shape.clone();
        if shape.is_empty() {
            return Err(TransformError::shape_violation("array", &[1], &shape));
        }
        let flat = TensorData {
            shape: vec![num_elements(&shape)],
            ..data
        };
        Ok(Self::from_flat(Tensor::from_data(flat, device), shape))
    }

    /// Wrap a static-rank tensor.
    pub fn from_tensor<const D: usize>(tensor: Tensor<B, D>) -> Self {
        let shape = tensor.dims().to_vec();
        let len = num_elements(&shape);
        Self::from_flat(tensor.reshape([len]), shape)
    }

    pub(crate) fn from_flat(data: Tensor<B, 1>, shape: Vec<usize>) -> Self {
        Self { data, shape }
    }

    /// Rebuild an array from `[units, unit_len]` rows and the full shape.
    pub(crate) fn from_rows(rows: Tensor<B, 2>, shape: Vec<usize>) -> Self {
        let len = num_elements(&shape);
        Self::from_flat(rows.reshape([len]), shape)
    }

    pub(crate) fn flat(&self) -> Tensor<B, 1> {
        self.data.clone()
    }

    /// Full shape.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Size of the trailing (unit) axis.
    pub fn unit_len(&self) -> usize {
        self.shape[self.shape.len() - 1]
    }

    /// Convert to a static-rank tensor. Fails if the rank is not `D`.
    pub fn to_tensor<const D: usize>(&self) -> Result<Tensor<B, D>> {
        if self.shape.len() != D {
            return Err(TransformError::shape_violation(
                format!("rank-{} tensor", D),
                &vec![0; D],
                &self.shape,
            ));
        }
        Ok(self.data.clone().reshape(Shape::from(self.shape.clone())))
    }

    /// Units as rows: `[batch_len, unit_len]`.
    pub(crate) fn rows(&self) -> Tensor<B, 2> {
        self.data.clone().reshape([self.batch_len(), self.unit_len()])
    }

    /// Units as `[n, unit_len]` rows, broadcasting a single unit to `n` rows.
    pub(crate) fn rows_expanded(&self, n: usize) -> Tensor<B, 2> {
        let rows = self.rows();
        if self.batch_len() == n {
            rows
        } else {
            rows.expand([n, self.unit_len()])
        }
    }

    /// Same values under a new shape with the same number of elements.
    pub fn reshape(&self, shape: &[usize]) -> Result<Self> {
        if shape.is_empty() || num_elements(shape) != num_elements(&self.shape) {
            return Err(TransformError::shape_violation("reshape", &self.shape, shape));
        }
        Ok(Self::from_flat(self.data.clone(), shape.to_vec()))
    }

    /// Fail with a shape violation unless the shape ends with `unit`.
    pub(crate) fn ensure_unit(&self, name: &str, unit: &[usize]) -> Result<()> {
        if self.shape.len() >= unit.len() && self.shape.ends_with(unit) {
            Ok(())
        } else {
            Err(TransformError::shape_violation(name, unit, &self.shape))
        }
    }

    /// Read the values back, row-major.
    pub fn to_vec(&self) -> Result<Vec<f32>> {
        self.data
            .to_data()
            .convert::<f32>()
            .to_vec::<f32>()
            .map_err(|e| TransformError::type_mismatch(format!("{:?}", e)))
    }

    /// Whether both arrays have the same shape and all values are within `atol`.
    pub fn all_close(&self, other: &Self, atol: f32) -> Result<bool> {
        if self.shape != other.shape {
            return Ok(false);
        }
        let lhs = self.to_vec()?;
        let rhs = other.to_vec()?;
        Ok(lhs.iter().zip(rhs.iter()).all(|(a, b)| (a - b).abs() <= atol))
    }
}

impl<B: Backend> Batched for Array<B> {
    fn batch_shape(&self) -> &[usize] {
        &self.shape[..self.shape.len() - 1]
    }

    fn element(&self, index: usize) -> Self {
        let unit = self.unit_len();
        let data = self.data.clone().narrow(0, index * unit, unit);
        Self::from_flat(data, vec![unit])
    }
}

impl<B: Backend> Stack for Array<B> {
    fn stack(elements: Vec<Self>, batch_shape: &[usize]) -> Result<Self> {
        let unit_shape = match elements.first() {
            Some(first) => first.shape.clone(),
            None => return Err(TransformError::EmptyBatch),
        };
        if let Some(odd) = elements.iter().find(|e| e.shape != unit_shape) {
            return Err(TransformError::shape_violation("stacked element", &unit_shape, &odd.shape));
        }
        let data = Tensor::cat(elements.into_iter().map(|e| e.data).collect(), 0);
        let mut shape = batch_shape.to_vec();
        shape.extend(unit_shape);
        Ok(Self::from_flat(data, shape))
    }
}

impl<B: Backend> OnDevice<B> for Array<B> {
    fn device(&self) -> B::Device {
        self.data.device()
    }
}

/// Raw arrays are point clouds: `tr @ points` applies the transform to positions.
impl<B: Backend> Transformable<B> for Array<B> {
    fn apply_transform(&self, tr: &Transform<B>) -> Result<Self> {
        tr.apply_to_pos(self)
    }
}

//! Look-at basis synthesis.
//!
//! World floor is `(x, y)` with `z` pointing up. The camera looks along
//! `forward`, its width axis stays parallel to the floor and its height axis
//! completes the frame:
//!
//! ```text
//! forward = normalize(target - pos)
//! w       = forward × up
//! h       = forward × w
//! basis   = [h | w | forward]    (columns)
//! ```
//!
//! `w` and `h` are not normalized. `pos == target` or `forward ∥ up` yields a
//! degenerate basis (NaN or zero columns); no error is raised.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use crate::array::Array;
use crate::config::LookAtConfig;
use crate::error::Result;
use crate::vectorize::{broadcast_batch_shapes, ensure_same_device, num_elements, Batched, OnDevice};

/// Build the look-at basis with the default conventions.
///
/// # Arguments
/// * `pos` - Camera positions, shape `(*batch, 3)`
/// * `target` - Looked-at points, shape `(*batch, 3)`
///
/// # Returns
/// Array of shape `(*batch, 3, 3)` whose columns are `(h, w, forward)`
pub fn compute_look_at_basis<B: Backend>(pos: &Array<B>, target: &Array<B>) -> Result<Array<B>> {
    compute_look_at_basis_with(pos, target, &LookAtConfig::new())
}

/// Build the look-at basis with explicit conventions.
pub fn compute_look_at_basis_with<B: Backend>(
    pos: &Array<B>,
    target: &Array<B>,
    config: &LookAtConfig,
) -> Result<Array<B>> {
    pos.ensure_unit("pos", &[3])?;
    target.ensure_unit("target", &[3])?;
    ensure_same_device::<B>(&pos.device(), &target.device())?;

    let mut shape = broadcast_batch_shapes(pos.batch_shape(), target.batch_shape())?;
    let n = num_elements(&shape);
    let basis = look_at_rows(pos.rows_expanded(n), target.rows_expanded(n), config.world_up);

    shape.extend([3, 3]);
    Ok(Array::from_flat(basis.reshape([n * 9]), shape))
}

/// Look-at bases for `[n, 3]` positions and targets, as `[n, 3, 3]`.
pub(crate) fn look_at_rows<B: Backend>(
    pos: Tensor<B, 2>,
    target: Tensor<B, 2>,
    world_up: [f32; 3],
) -> Tensor<B, 3> {
    let [n, _] = pos.dims();
    let up = Tensor::<B, 1>::from_floats(world_up, &pos.device())
        .reshape([1, 3])
        .expand([n, 3]);

    let forward = normalize(target - pos);
    let width = cross(forward.clone(), up);
    let height = cross(forward.clone(), width.clone());
    Tensor::stack(vec![height, width, forward], 2)
}

fn normalize<B: Backend>(v: Tensor<B, 2>) -> Tensor<B, 2> {
    let norm = (v.clone() * v.clone()).sum_dim(1).sqrt();
    v / norm
}

/// Row-wise cross product of `[n, 3]` tensors.
fn cross<B: Backend>(a: Tensor<B, 2>, b: Tensor<B, 2>) -> Tensor<B, 2> {
    let (a0, a1, a2) = components(a);
    let (b0, b1, b2) = components(b);
    Tensor::cat(
        vec![
            a1.clone() * b2.clone() - a2.clone() * b1.clone(),
            a2 * b0.clone() - a0.clone() * b2,
            a0 * b1 - a1 * b0,
        ],
        1,
    )
}

fn components<B: Backend>(v: Tensor<B, 2>) -> (Tensor<B, 2>, Tensor<B, 2>, Tensor<B, 2>) {
    (
        v.clone().narrow(1, 0, 1),
        v.clone().narrow(1, 1, 1),
        v.narrow(1, 2, 1),
    )
}

//! Camera Chain Example
//!
//! Projects a batch of world points into the image plane of a pinhole camera:
//!
//! 1. Place the camera with a look-at pose (camera-to-world)
//! 2. Wrap the pinhole projection as a custom transform
//! 3. Chain `projection ∘ pose⁻¹` lazily and apply it to the points
//! 4. Compare against applying each link by hand
//!
//! Usage:
//!   cargo run --example camera_chain

use burn_ndarray::NdArray;
use xform_core::{make_custom_transform, Array, Batched, OnDevice, Transform};

type Backend = NdArray<f32>;

/// Pinhole intrinsics: focal length per camera, shape `(*batch, 1)`.
#[derive(Debug, Clone)]
struct Pinhole {
    focal: Array<Backend>,
}

impl Batched for Pinhole {
    fn batch_shape(&self) -> &[usize] {
        self.focal.batch_shape()
    }

    fn element(&self, index: usize) -> Self {
        Self {
            focal: self.focal.element(index),
        }
    }
}

impl OnDevice<Backend> for Pinhole {
    fn device(&self) -> <Backend as burn::tensor::backend::Backend>::Device {
        self.focal.device()
    }
}

/// Camera-frame point `(h, w, depth)` to homogeneous pixel `(f·h/depth, f·w/depth, 1)`.
fn project(camera: &Pinhole, point: &Array<Backend>) -> xform_core::Result<Array<Backend>> {
    let focal = camera.focal.to_vec()?[0];
    let p = point.to_vec()?;
    Array::new(
        vec![focal * p[0] / p[2], focal * p[1] / p[2], 1.0],
        point.shape(),
        &point.device(),
    )
}

fn main() -> anyhow::Result<()> {
    println!("Camera Chain Example");
    println!("====================\n");

    tracing_subscriber::fmt().with_env_filter("info").init();

    let device = Default::default();

    println!("Step 1: Camera pose...");
    let pose = Transform::<Backend>::from_look_at(
        &Array::new(vec![0.0, -5.0, 2.0], &[3], &device)?,
        &Array::new(vec![0.0, 0.0, 0.0], &[3], &device)?,
    )?;
    println!("  camera position: {:?}", pose.translation().to_vec()?);
    println!("  looking along:   {:?}", pose.z_dir().to_vec()?);

    println!("\nStep 2: Pinhole projection...");
    let pinhole = make_custom_transform::<Backend, _, _>(project);
    let projection = pinhole(Pinhole {
        focal: Array::new(vec![800.0], &[1], &device)?,
    });

    println!("\nStep 3: Chaining world-to-pixel...");
    let world_to_camera = pose.inv()?;
    let world_to_pixel = projection.compose(world_to_camera.clone())?;
    println!("  {:?}", world_to_pixel);

    let points = Array::new(
        vec![
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.5, //
            -1.0, 2.0, 1.0,
        ],
        &[4, 3],
        &device,
    )?;
    let pixels = world_to_pixel.apply(&points)?;

    println!("\nStep 4: Checking against sequential application...");
    let by_hand = projection.apply(&world_to_camera.apply(&points)?)?;
    if !pixels.all_close(&by_hand, 1e-3)? {
        anyhow::bail!("chained and sequential projections disagree");
    }

    for (i, pixel) in pixels.to_vec()?.chunks(3).enumerate() {
        println!("  point {} -> pixel ({:.1}, {:.1})", i, pixel[0], pixel[1]);
    }

    println!("\nDone.");
    Ok(())
}

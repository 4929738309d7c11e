//! Configuration.

use burn::config::Config;

/// Conventions used when synthesizing a look-at basis.
#[derive(Config, Debug, PartialEq)]
pub struct LookAtConfig {
    /// World axis pointing up. The camera width axis is kept perpendicular to it.
    #[config(default = "[0.0, 0.0, 1.0]")]
    pub world_up: [f32; 3],
}

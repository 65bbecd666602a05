//! Perspective camera and orbit controller.

mod core;
mod orbit;

pub use core::{Camera, CameraUniform};
pub use orbit::OrbitController;

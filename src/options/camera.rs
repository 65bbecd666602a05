use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and orbit parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Orbit distance from the model (world units).
    #[schemars(title = "Distance", range(min = 0.5, max = 10.0), extend("step" = 0.1))]
    pub distance: f32,
    /// Drag rotation sensitivity (radians per pixel).
    #[schemars(title = "Rotate Speed", range(min = 0.001, max = 0.02), extend("step" = 0.001))]
    pub rotate_speed: f32,
    /// Seconds per full auto-rotation revolution.
    #[schemars(title = "Auto-Rotate Period", range(min = 5.0, max = 120.0), extend("step" = 1.0))]
    pub auto_rotate_period: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            distance: 2.0,
            rotate_speed: 0.005,
            // Three.js autoRotateSpeed = 2 → 2 rpm → 30 s per revolution
            auto_rotate_period: 30.0,
        }
    }
}

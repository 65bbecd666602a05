use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Light rig intensities. Directions are fixed camera-space offsets
/// (see [`LightRig`](crate::renderer::LightRig)).
pub struct LightingOptions {
    /// Ambient light color (0x404040 in the original rig).
    #[schemars(skip)]
    pub ambient_color: [f32; 3],
    /// Ambient intensity multiplier.
    #[schemars(title = "Ambient", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub ambient_intensity: f32,
    /// Key light intensity.
    #[schemars(title = "Key Light", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub key_intensity: f32,
    /// Fill light intensity.
    #[schemars(title = "Fill Light", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub fill_intensity: f32,
    /// Back light intensity.
    #[schemars(title = "Back Light", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub back_intensity: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient_color: [0.25, 0.25, 0.25],
            ambient_intensity: 1.0,
            key_intensity: 1.0,
            fill_intensity: 0.5,
            back_intensity: 1.0,
        }
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Window background and frame pacing.
pub struct DisplayOptions {
    /// Page background color (linear RGB). The scene composites over this,
    /// reproducing the transparent canvas sitting on the page background.
    #[schemars(title = "Background")]
    pub background: [f32; 3],
    /// Target frame rate cap (0 = unlimited; the surface vsyncs regardless).
    #[schemars(title = "FPS Cap", range(min = 0, max = 480))]
    pub target_fps: u32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            background: [0.93, 0.91, 0.88],
            target_fps: 300,
        }
    }
}

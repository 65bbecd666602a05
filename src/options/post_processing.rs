use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Effects", inline)]
#[serde(default)]
/// Noise pass parameters.
pub struct PostProcessingOptions {
    /// UV displacement scale of the noise distortion at full intensity.
    #[schemars(title = "Noise Strength", range(min = 0.0, max = 0.3), extend("step" = 0.005))]
    pub noise_strength: f32,
    /// Film grain contribution at full intensity.
    #[schemars(title = "Grain Strength", range(min = 0.0, max = 0.5), extend("step" = 0.01))]
    pub grain_strength: f32,
    /// Quiet period after the last scroll event before the noise target
    /// decays back to 0 (milliseconds).
    #[schemars(title = "Scroll Settle", range(min = 50, max = 2000))]
    pub scroll_settle_ms: u64,
    /// Fraction of the remaining distance the displayed intensity covers
    /// per frame.
    #[schemars(title = "Smoothing", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub effect_smoothing: f32,
}

impl Default for PostProcessingOptions {
    fn default() -> Self {
        Self {
            noise_strength: 0.08,
            grain_strength: 0.12,
            scroll_settle_ms: 300,
            effect_smoothing: 0.05,
        }
    }
}

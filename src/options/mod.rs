//! Centralized rendering/display options with TOML preset support.
//!
//! All tweakable settings (display, camera, lighting, post-processing
//! effects) are consolidated here. Options serialize to/from TOML; defaults
//! reproduce the showcase page's original constants.

mod camera;
mod display;
mod lighting;
mod post_processing;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use lighting::LightingOptions;
pub use post_processing::PostProcessingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ShowcaseError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[lighting]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Window background and frame pacing.
    pub display: DisplayOptions,
    /// Camera projection and orbit parameters.
    pub camera: CameraOptions,
    /// Light rig intensities.
    pub lighting: LightingOptions,
    /// Noise effect parameters.
    pub post_processing: PostProcessingOptions,
}

impl Options {
    /// Generate JSON Schema describing the options tree.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::Io`] if the file cannot be read or
    /// [`ShowcaseError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, ShowcaseError> {
        let content =
            std::fs::read_to_string(path).map_err(ShowcaseError::Io)?;
        toml::from_str(&content)
            .map_err(|e| ShowcaseError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::OptionsParse`] if serialization fails or
    /// [`ShowcaseError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ShowcaseError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ShowcaseError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ShowcaseError::Io)?;
        }
        std::fs::write(path, content).map_err(ShowcaseError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml_str = r"
[lighting]
fill_intensity = 0.8
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.lighting.fill_intensity, 0.8);
        // Everything else should be default
        assert_eq!(opts.lighting.key_intensity, 1.0);
        assert_eq!(opts.camera.fovy, 75.0);
    }

    #[test]
    fn test_defaults_match_page_constants() {
        let opts = Options::default();
        assert_eq!(opts.camera.fovy, 75.0);
        assert_eq!(opts.camera.znear, 0.1);
        assert_eq!(opts.camera.zfar, 1000.0);
        assert_eq!(opts.camera.distance, 2.0);
        assert_eq!(opts.camera.auto_rotate_period, 30.0);
        assert_eq!(opts.lighting.ambient_color, [0.25, 0.25, 0.25]);
        assert_eq!(opts.lighting.key_intensity, 1.0);
        assert_eq!(opts.lighting.fill_intensity, 0.5);
        assert_eq!(opts.lighting.back_intensity, 1.0);
        assert_eq!(opts.post_processing.scroll_settle_ms, 300);
        assert_eq!(opts.post_processing.effect_smoothing, 0.05);
    }

    #[test]
    fn test_schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("display"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("lighting"));
        assert!(props.contains_key("post_processing"));
    }
}

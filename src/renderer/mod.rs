//! Render passes: scene mesh, post-processing chain, and the page overlay.

mod lighting;
mod mesh_pass;
mod overlay;
pub mod postprocess;

pub use lighting::{LightRig, LightingUniform};
pub use mesh_pass::MeshPass;
pub use overlay::{OverlayBatch, OverlayPass, OverlayVertex};
pub use postprocess::PostProcessStack;

/// Offscreen scene color format. HDR-capable and filterable so the noise
/// pass can sample it.
pub const SCENE_FORMAT: wgpu::TextureFormat =
    wgpu::TextureFormat::Rgba16Float;

/// Scene depth buffer format.
pub const DEPTH_FORMAT: wgpu::TextureFormat =
    wgpu::TextureFormat::Depth32Float;

//! Post-processing chain: noise distortion then background composite.

mod noise;
mod output;
mod post_process;

pub use noise::NoisePass;
pub use output::OutputPass;
pub use post_process::PostProcessStack;

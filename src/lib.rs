//! GPU-accelerated sneaker product showcase built on wgpu.
//!
//! Kickshow renders a single decorative product page: a rotating 3D sneaker
//! model behind a scrolling page overlay, with scroll-reactive
//! post-processing noise, scroll-triggered content reveals, and a
//! load-progress preloader.
//!
//! # Key entry points
//!
//! - [`engine::ShowcaseEngine`] - the main rendering engine
//! - [`viewer::Viewer`] - standalone winit window shell (feature `viewer`)
//! - [`options::Options`] - runtime configuration (display, camera,
//!   lighting, effects)
//! - [`model::ModelLoader`] - background glTF model loading with progress
//!
//! # Architecture
//!
//! The model loads on a background thread, streaming progress events over a
//! channel while the frame loop runs. The main thread owns all GPU state and
//! orchestrates a three-pass pipeline each frame: scene rasterization into an
//! offscreen target, a scroll-reactive noise distortion pass, and an output
//! pass compositing over the page background. The page overlay draws last,
//! directly to the surface, untouched by the noise.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod model;
pub mod options;
pub mod page;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::ShowcaseEngine;
pub use error::ShowcaseError;
pub use input::{InputEvent, MouseButton};
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};

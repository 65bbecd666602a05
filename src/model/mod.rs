//! Product model loading: glTF decode and background streaming.

mod gltf;
mod loader;
mod mesh;

pub use gltf::decode_glb;
pub use loader::{LoadProgress, LoaderEvent, ModelLoader};
pub use mesh::{MeshData, MeshVertex};

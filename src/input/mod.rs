//! Input handling: platform-agnostic event types fed into the engine.

/// Platform-agnostic input events.
pub mod event;

pub use event::{InputEvent, MouseButton};

//! Animation primitives for the showcase page.
//!
//! Provides easing curves, the scroll-driven noise intensity pulse, and the
//! entrance timeline that staggers the post-load reveal of the page.

pub mod easing;
pub mod pulse;
pub mod timeline;

pub use easing::EasingFunction;
pub use pulse::NoisePulse;
pub use timeline::{EntranceChannel, EntranceTimeline, Tween};

//! Page layout and scroll-triggered reveal state.
//!
//! The overlay reproduces the product page: a fixed header bar, a hero
//! section hosting the 3D view, a new-drop card, two content sections, and a
//! full-screen preloader. Sections are one viewport height each; the page
//! scrolls in pixel "page space" while the header and preloader stay fixed.

pub mod content;

use web_time::{Duration, Instant};

use crate::animation::EasingFunction;
use crate::model::LoadProgress;

/// Fixed header bar height in pixels.
pub const HEADER_HEIGHT: f32 = 72.0;

/// Number of fading content sections below the new-drop card.
pub const CONTENT_SECTIONS: usize = 2;

const REVEAL_DELAY: Duration = Duration::from_secs(1);
const REVEAL_DURATION: Duration = Duration::from_secs(1);

/// Vertical page layout derived from the viewport size.
///
/// Sections top to bottom: hero, new-drop, then the content sections, each
/// one viewport height tall.
#[derive(Debug, Clone, Copy)]
pub struct PageLayout {
    viewport_width: f32,
    viewport_height: f32,
}

impl PageLayout {
    /// Layout for the given viewport size in pixels.
    #[must_use]
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
        }
    }

    /// Recompute for a new viewport size.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.viewport_width = viewport_width;
        self.viewport_height = viewport_height;
    }

    /// Viewport width in pixels.
    #[must_use]
    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Viewport height in pixels.
    #[must_use]
    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Total scrollable page height: hero + new-drop + content sections.
    #[must_use]
    pub fn page_height(&self) -> f32 {
        self.viewport_height * (2 + CONTENT_SECTIONS) as f32
    }

    /// Page-space top of the new-drop section.
    #[must_use]
    pub fn new_drop_top(&self) -> f32 {
        self.viewport_height
    }

    /// Page-space top of content section `index`.
    #[must_use]
    pub fn content_top(&self, index: usize) -> f32 {
        self.viewport_height * (2 + index) as f32
    }

    /// Whether content section `index` intersects the visible viewport at
    /// the given scroll offset.
    #[must_use]
    pub fn content_visible(&self, index: usize, scroll_offset: f32) -> bool {
        let top = self.content_top(index);
        let bottom = top + self.viewport_height;
        top < scroll_offset + self.viewport_height && bottom > scroll_offset
    }
}

/// Mutable page state: one-shot reveal timestamps and load progress.
#[derive(Debug, Default)]
pub struct PageState {
    reveal_at: [Option<Instant>; CONTENT_SECTIONS],
    progress: Option<LoadProgress>,
    load_failed: bool,
}

impl PageState {
    /// Fresh page state: nothing revealed, nothing loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record reveal timestamps for content sections that just scrolled into
    /// view. A section's timestamp is set at most once.
    pub fn update_reveals(
        &mut self,
        layout: &PageLayout,
        scroll_offset: f32,
        now: Instant,
    ) {
        for (index, slot) in self.reveal_at.iter_mut().enumerate() {
            if slot.is_none() && layout.content_visible(index, scroll_offset)
            {
                *slot = Some(now);
            }
        }
    }

    /// Content block opacity for section `index`: 0 until revealed, then an
    /// eased 0 → 1 over 1 s after a 1 s delay.
    #[must_use]
    pub fn reveal_alpha(&self, index: usize, now: Instant) -> f32 {
        let Some(revealed) = self.reveal_at.get(index).copied().flatten()
        else {
            return 0.0;
        };
        let elapsed =
            now.saturating_duration_since(revealed + REVEAL_DELAY);
        let t = (elapsed.as_secs_f32() / REVEAL_DURATION.as_secs_f32())
            .min(1.0);
        EasingFunction::QuadraticOut.evaluate(t)
    }

    /// Record a loader progress snapshot.
    pub fn on_progress(&mut self, progress: LoadProgress) {
        self.progress = Some(progress);
    }

    /// Record load failure. The preloader stalls; reveals still work.
    pub fn on_failed(&mut self) {
        self.load_failed = true;
    }

    /// Whether the one asset load failed.
    #[must_use]
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Rounded load percentage, `None` while indeterminate.
    #[must_use]
    pub fn percent(&self) -> Option<f32> {
        self.progress.as_ref().and_then(LoadProgress::percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_is_four_viewports_tall() {
        let layout = PageLayout::new(1280.0, 800.0);
        assert_eq!(layout.page_height(), 3200.0);
        assert_eq!(layout.new_drop_top(), 800.0);
        assert_eq!(layout.content_top(0), 1600.0);
        assert_eq!(layout.content_top(1), 2400.0);
    }

    #[test]
    fn test_content_visibility_tracks_scroll() {
        let layout = PageLayout::new(1280.0, 800.0);
        // At the top only the hero shows
        assert!(!layout.content_visible(0, 0.0));
        // One pixel of section 0 peeking in from the bottom
        assert!(layout.content_visible(0, 801.0));
        // Scrolled to the very bottom: section 1 fills the viewport
        assert!(layout.content_visible(1, 2400.0));
        assert!(!layout.content_visible(0, 2400.0));
    }

    #[test]
    fn test_reveal_is_one_shot() {
        let layout = PageLayout::new(1280.0, 800.0);
        let mut state = PageState::new();
        let t0 = Instant::now();

        state.update_reveals(&layout, 1000.0, t0);
        assert!(state.reveal_at[0].is_some());
        assert!(state.reveal_at[1].is_none());

        // Seeing it again later must not restart the animation
        let t1 = t0 + Duration::from_secs(10);
        state.update_reveals(&layout, 1000.0, t1);
        assert_eq!(state.reveal_at[0], Some(t0));
    }

    #[test]
    fn test_reveal_alpha_waits_out_delay_then_eases_in() {
        let layout = PageLayout::new(1280.0, 800.0);
        let mut state = PageState::new();
        let t0 = Instant::now();
        state.update_reveals(&layout, 1000.0, t0);

        // Unrevealed section stays invisible
        assert_eq!(state.reveal_alpha(1, t0 + Duration::from_secs(60)), 0.0);

        // During the 1s delay
        assert_eq!(
            state.reveal_alpha(0, t0 + Duration::from_millis(900)),
            0.0
        );
        // Mid-fade
        let mid = state.reveal_alpha(0, t0 + Duration::from_millis(1500));
        assert!(mid > 0.0 && mid < 1.0);
        // Complete
        assert_eq!(state.reveal_alpha(0, t0 + Duration::from_secs(2)), 1.0);
    }

    #[test]
    fn test_percent_passes_through_progress() {
        let mut state = PageState::new();
        assert_eq!(state.percent(), None);

        state.on_progress(LoadProgress {
            loaded: 50,
            total: Some(200),
        });
        assert_eq!(state.percent(), Some(25.0));

        state.on_progress(LoadProgress {
            loaded: 50,
            total: None,
        });
        assert_eq!(state.percent(), None);
    }
}

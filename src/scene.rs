//! Scroll state and the model transform it drives.
//!
//! The sneaker sits in a two-level transform stack: a scroll-rotation node
//! whose yaw tracks the page scroll offset, containing a load-position node
//! whose height animates on entrance. Both collapse into one model matrix
//! uploaded per frame.

use glam::{Mat4, Vec3};

/// Radians of model yaw per pixel of scroll offset.
pub const SCROLL_YAW_FACTOR: f32 = 0.001;

/// Page scroll position with browser-style clamping.
///
/// The offset accumulates wheel deltas, clamped to
/// `[0, page_height − viewport_height]`. The yaw formula itself is
/// unclamped; rotation is periodic so any offset is valid.
#[derive(Debug, Clone)]
pub struct ScrollState {
    offset: f32,
    page_height: f32,
    viewport_height: f32,
}

impl ScrollState {
    /// Create scroll state for the given page and viewport extents (pixels).
    #[must_use]
    pub fn new(page_height: f32, viewport_height: f32) -> Self {
        Self {
            offset: 0.0,
            page_height,
            viewport_height,
        }
    }

    /// Accumulate a wheel delta (pixels, positive scrolls the page down),
    /// clamping to the scrollable extent.
    pub fn scroll_by(&mut self, delta: f32) {
        let max = (self.page_height - self.viewport_height).max(0.0);
        self.offset = (self.offset + delta).clamp(0.0, max);
    }

    /// Set the offset directly, without clamping.
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    /// Update extents after a resize, re-clamping the current offset.
    pub fn set_extent(&mut self, page_height: f32, viewport_height: f32) {
        self.page_height = page_height;
        self.viewport_height = viewport_height;
        self.scroll_by(0.0);
    }

    /// Current scroll offset in pixels.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Model yaw in radians derived from the scroll offset.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.offset * SCROLL_YAW_FACTOR
    }
}

/// GPU uniform holding the composed model matrix.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    /// Model-to-world matrix.
    pub model: [[f32; 4]; 4],
}

impl ModelUniform {
    /// Identity transform.
    #[must_use]
    pub fn new() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }

    /// Compose the scroll rotation and entrance rise, re-centering the mesh
    /// so it spins about its own middle:
    /// `Ry(yaw) · T((0, rise, 0) − center)`.
    pub fn set_transform(&mut self, yaw: f32, rise: f32, center: Vec3) {
        let m = Mat4::from_rotation_y(yaw)
            * Mat4::from_translation(Vec3::new(0.0, rise, 0.0) - center);
        self.model = m.to_cols_array_2d();
    }
}

impl Default for ModelUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    #[test]
    fn test_yaw_is_offset_times_factor() {
        let mut scroll = ScrollState::new(4000.0, 1000.0);
        scroll.set_offset(1234.0);
        assert!((scroll.yaw() - 1.234).abs() < 1e-6);

        // Unclamped formula: any offset is valid, rotation is periodic
        scroll.set_offset(TAU / SCROLL_YAW_FACTOR);
        assert!((scroll.yaw() - TAU).abs() < 1e-3);
    }

    #[test]
    fn test_scroll_clamps_to_page_extent() {
        let mut scroll = ScrollState::new(4000.0, 1000.0);
        scroll.scroll_by(-500.0);
        assert_eq!(scroll.offset(), 0.0);
        scroll.scroll_by(10_000.0);
        assert_eq!(scroll.offset(), 3000.0);
    }

    #[test]
    fn test_resize_reclamps_offset() {
        let mut scroll = ScrollState::new(4000.0, 1000.0);
        scroll.scroll_by(3000.0);
        scroll.set_extent(2000.0, 1000.0);
        assert_eq!(scroll.offset(), 1000.0);
    }

    #[test]
    fn test_model_uniform_composes_rotation_then_rise() {
        let mut uniform = ModelUniform::new();
        uniform.set_transform(0.0, -10.0, Vec3::ZERO);
        // Pure translation: origin maps to (0, -10, 0)
        let m = Mat4::from_cols_array_2d(&uniform.model);
        let p = m.transform_point3(Vec3::ZERO);
        assert!((p.y - (-10.0)).abs() < 1e-6);

        // With yaw, the rise still happens along world Y (rotation about Y
        // leaves Y untouched)
        uniform.set_transform(1.0, -10.0, Vec3::ZERO);
        let m = Mat4::from_cols_array_2d(&uniform.model);
        let p = m.transform_point3(Vec3::ZERO);
        assert!((p.y - (-10.0)).abs() < 1e-6);
    }

    #[test]
    fn test_model_uniform_recenters_the_mesh() {
        let center = Vec3::new(1.0, 2.0, 3.0);
        let mut uniform = ModelUniform::new();

        // The mesh center lands at the rise height, not at its source
        // position
        uniform.set_transform(0.0, -10.0, center);
        let m = Mat4::from_cols_array_2d(&uniform.model);
        let p = m.transform_point3(center);
        assert!((p - Vec3::new(0.0, -10.0, 0.0)).length() < 1e-5);

        // Yaw spins the mesh about its own middle: the center stays put
        uniform.set_transform(1.5, 0.0, center);
        let m = Mat4::from_cols_array_2d(&uniform.model);
        let p = m.transform_point3(center);
        assert!(p.length() < 1e-5);
    }
}

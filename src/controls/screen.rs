//! Input-surface bounds and cursor normalization.
//!
//! Both mappings subtract the surface origin so the controls work on
//! embedded viewports, not just full windows. The circle mapping divides
//! both axes by the surface width so angular speed is the same in x and y
//! regardless of aspect ratio.

use glam::Vec2;

/// Cached screen-space bounds (origin + size) of the input surface.
///
/// Refreshed by [`handle_resize`](crate::TrackballControls::handle_resize);
/// callers guarantee `width` and `height` are positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Left edge of the surface in window coordinates.
    pub left: f32,
    /// Top edge of the surface in window coordinates.
    pub top: f32,
    /// Surface width in pixels.
    pub width: f32,
    /// Surface height in pixels.
    pub height: f32,
}

impl ScreenRect {
    /// Rect with an explicit origin.
    #[must_use]
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rect anchored at the window origin.
    #[must_use]
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Width over height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Map a surface position into [0, 1] x [0, 1].
    ///
    /// Used by the zoom and pan channels.
    #[must_use]
    pub fn to_screen(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            (position.x - self.left) / self.width,
            (position.y - self.top) / self.height,
        )
    }

    /// Map a surface position onto the virtual trackball circle.
    ///
    /// X is normalized by the half-width, y by the width with a vertical
    /// flip, centering the surface at the origin. Used by the rotate
    /// channel.
    #[must_use]
    pub fn to_circle(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            (position.x - self.left - self.width * 0.5) / (self.width * 0.5),
            (self.height + 2.0 * (self.top - position.y)) / self.width,
        )
    }
}

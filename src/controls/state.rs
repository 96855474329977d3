//! Discrete gesture state and buffered motion samples.

use glam::Vec2;

/// Gesture classification produced from the current pointer/keyboard
/// configuration.
///
/// The same enum fills the key-override slot, which only ever holds
/// [`Idle`](Self::Idle), [`Rotate`](Self::Rotate), [`Zoom`](Self::Zoom),
/// or [`Pan`](Self::Pan).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureState {
    /// No active gesture.
    #[default]
    Idle,
    /// Mouse-driven orbit.
    Rotate,
    /// Mouse-driven zoom (drag or wheel).
    Zoom,
    /// Mouse-driven pan.
    Pan,
    /// One-finger orbit.
    TouchRotate,
    /// Two-finger pinch zoom combined with pan.
    TouchZoomPan,
}

/// Motion samples for the three independent gesture channels.
///
/// Input callbacks write the `curr`/`end` side; `update` consumes the
/// delta and, in damped mode, eases the `prev`/`start` side toward it
/// instead of snapping.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MotionState {
    /// Previous circle-mapped rotate sample.
    pub(crate) move_prev: Vec2,
    /// Current circle-mapped rotate sample.
    pub(crate) move_curr: Vec2,
    /// Zoom channel baseline (screen-mapped; only y is consumed).
    pub(crate) zoom_start: Vec2,
    /// Latest zoom channel sample.
    pub(crate) zoom_end: Vec2,
    /// Pan channel baseline (screen-mapped).
    pub(crate) pan_start: Vec2,
    /// Latest pan channel sample.
    pub(crate) pan_end: Vec2,
    /// Pinch distance baseline in pixels.
    pub(crate) touch_zoom_distance_start: f32,
    /// Latest pinch distance in pixels.
    pub(crate) touch_zoom_distance_end: f32,
}

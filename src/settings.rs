//! Runtime controller configuration with TOML preset support.
//!
//! All tweakable behavior (speeds, axis gates, damping, distance clamp,
//! button mapping, fly mode) is consolidated here. Settings serialize
//! to/from TOML so embedders can ship interaction presets.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TrackballError;
use crate::input::MouseButton;

/// Gesture assigned to a mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseAction {
    /// Orbit the camera around the target.
    Rotate,
    /// Drag-zoom toward/away from the target.
    Zoom,
    /// Translate camera and target together.
    Pan,
    /// Button does nothing.
    Disabled,
}

/// Mouse button → gesture table.
///
/// Consulted only when a button goes down while no gesture is active, so
/// a second button pressed mid-drag cannot steal the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseMapping {
    /// Gesture for the primary button.
    pub left: MouseAction,
    /// Gesture for the middle button.
    pub middle: MouseAction,
    /// Gesture for the secondary button.
    pub right: MouseAction,
}

impl Default for MouseMapping {
    fn default() -> Self {
        Self {
            left: MouseAction::Rotate,
            middle: MouseAction::Zoom,
            right: MouseAction::Pan,
        }
    }
}

impl MouseMapping {
    /// Gesture assigned to `button`.
    #[must_use]
    pub fn action_for(&self, button: MouseButton) -> MouseAction {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
        }
    }
}

/// All tweakable controller settings. Mutable at runtime through
/// [`TrackballControls::settings`](crate::TrackballControls::settings).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Settings {
    /// Master input gate. When false, pointer/wheel/key events are ignored.
    pub enabled: bool,
    /// Rotation sensitivity multiplier.
    pub rotate_speed: f32,
    /// Zoom sensitivity multiplier.
    pub zoom_speed: f32,
    /// Pan sensitivity multiplier.
    pub pan_speed: f32,
    /// Disable the rotate axis entirely.
    pub no_rotate: bool,
    /// Disable the zoom axis entirely.
    pub no_zoom: bool,
    /// Disable the pan axis entirely.
    pub no_pan: bool,
    /// Snap to the latest input sample instead of easing toward it.
    pub static_moving: bool,
    /// Per-tick easing factor for damped (non-static) motion.
    pub dynamic_damping_factor: f32,
    /// Minimum camera distance from the target.
    pub min_distance: f32,
    /// Maximum camera distance from the target.
    pub max_distance: f32,
    /// Drive forward/backward flight from the zoom axis instead of zooming.
    pub fly_mode: bool,
    /// Mouse button → gesture mapping.
    pub mouse: MouseMapping,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            rotate_speed: 1.0,
            zoom_speed: 1.2,
            pan_speed: 0.3,
            no_rotate: false,
            no_zoom: false,
            no_pan: false,
            static_moving: false,
            dynamic_damping_factor: 0.2,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            fly_mode: false,
            mouse: MouseMapping::default(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, TrackballError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save settings to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), TrackballError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, content)?)
    }
}

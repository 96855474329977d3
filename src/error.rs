//! Crate-level error types.
//!
//! The controller hot path (input handling, per-frame update) is
//! infallible; errors only arise from settings file I/O and the optional
//! viewer event loop.

use std::fmt;

/// Errors produced by the trackball crate.
#[derive(Debug)]
pub enum TrackballError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML settings parsing failure.
    SettingsParse(String),
    /// TOML settings serialization failure.
    SettingsEncode(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for TrackballError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::SettingsParse(msg) => {
                write!(f, "settings parse error: {msg}")
            }
            Self::SettingsEncode(msg) => {
                write!(f, "settings encode error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for TrackballError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TrackballError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for TrackballError {
    fn from(e: toml::de::Error) -> Self {
        Self::SettingsParse(e.to_string())
    }
}

impl From<toml::ser::Error> for TrackballError {
    fn from(e: toml::ser::Error) -> Self {
        Self::SettingsEncode(e.to_string())
    }
}

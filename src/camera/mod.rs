//! Camera types driven by the trackball controls.
//!
//! The camera is owned by the embedder and passed `&mut` into the
//! controller operations that move it.

/// Core camera struct, projection kinds, and GPU uniform types.
pub mod core;

pub use core::{Camera, CameraUniform, Orthographic, Perspective, Projection};

// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Trackball camera controls for interactive 3D viewers.
//!
//! Converts pointer (mouse, multi-touch) and keyboard input into smooth
//! orbit, pan, and zoom of a camera around a target point, with inertial
//! damping, a configurable button/modifier mapping, and support for both
//! perspective and orthographic projections.
//!
//! # Key entry points
//!
//! - [`controls::TrackballControls`] - the controller itself
//! - [`camera::Camera`] - the camera being driven (owned by the embedder)
//! - [`settings::Settings`] - runtime configuration (speeds, axis gates,
//!   damping, distance clamp, button mapping)
//! - [`input::InputEvent`] - the platform-agnostic input vocabulary
//!
//! # Architecture
//!
//! Input callbacks never move the camera directly: they classify the
//! gesture and buffer motion samples. The embedder calls
//! [`update`](controls::TrackballControls::update) once per frame tick,
//! which consumes the buffered motion, applies rotation/zoom/pan with
//! optional inertial damping, and emits a `change` notification only when
//! the pose actually moved. Render loops subscribe via
//! [`on`](controls::TrackballControls::on) to redraw on demand.

pub mod camera;
pub mod controls;
pub mod error;
pub mod events;
pub mod input;
pub mod settings;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use camera::{Camera, Projection};
pub use controls::{ScreenRect, TrackballControls};
pub use error::TrackballError;
pub use events::ControlEvent;
pub use input::{InputEvent, MouseButton};
pub use settings::Settings;

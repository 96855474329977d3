//! Trackball camera controls.
//!
//! [`TrackballControls`] is the interaction core: it consumes
//! [`InputEvent`](crate::input::InputEvent)s, classifies them into gestures,
//! and applies the resulting orbit/zoom/pan transforms to a
//! [`Camera`](crate::camera::Camera) once per frame via
//! [`TrackballControls::update`].

pub mod screen;
pub mod state;
pub mod trackball;

pub use screen::ScreenRect;
pub use state::GestureState;
pub use trackball::TrackballControls;

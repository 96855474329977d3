//! Input handling: the platform-agnostic event vocabulary and the pointer
//! tracker that normalizes mouse/touch into a uniform pointer set.

/// Platform-agnostic input events.
pub mod event;
/// Active pointer set with per-pointer screen positions.
pub mod pointer;

pub use event::{
    InputEvent, Modifiers, MouseButton, PointerEvent, PointerId, PointerKind,
    WheelDelta,
};
pub use pointer::PointerTracker;

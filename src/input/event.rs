use glam::Vec2;

/// Platform-agnostic input events.
///
/// These are fed into
/// [`TrackballControls::handle_event`](crate::TrackballControls::handle_event),
/// which classifies the gesture and buffers motion for the next
/// [`update`](crate::TrackballControls::update) tick.
///
/// # Example
///
/// ```ignore
/// let consumed = controls.handle_event(InputEvent::PointerMove(
///     PointerEvent::mouse(Vec2::new(100.0, 200.0)),
/// ));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A pointer was pressed.
    PointerDown(PointerEvent),
    /// A tracked pointer moved.
    PointerMove(PointerEvent),
    /// A pointer was released.
    PointerUp(PointerEvent),
    /// A pointer was cancelled by the platform (capture lost, palm
    /// rejection). Takes the same bookkeeping path as a release.
    PointerCancel(PointerEvent),
    /// Scroll wheel motion.
    Wheel(WheelDelta),
    /// A key went down; carries the modifier snapshot at press time.
    KeyDown(Modifiers),
    /// A key was released.
    KeyUp,
}

/// One pointer's identity and position at the moment of an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Stable identifier for the pointer across its down/move/up lifetime.
    pub id: PointerId,
    /// Input device class, which selects the mouse or touch gesture path.
    pub kind: PointerKind,
    /// Position in surface coordinates (same space as the screen rect).
    pub position: Vec2,
    /// Button that triggered a press. `None` for touch and for move/up.
    pub button: Option<MouseButton>,
}

impl PointerEvent {
    /// Mouse pointer event without a button (move/up).
    #[must_use]
    pub fn mouse(position: Vec2) -> Self {
        Self {
            id: PointerId::MOUSE,
            kind: PointerKind::Mouse,
            position,
            button: None,
        }
    }

    /// Mouse pointer press with the given button.
    #[must_use]
    pub fn mouse_button(button: MouseButton, position: Vec2) -> Self {
        Self {
            id: PointerId::MOUSE,
            kind: PointerKind::Mouse,
            position,
            button: Some(button),
        }
    }

    /// Touch pointer event.
    #[must_use]
    pub fn touch(id: PointerId, position: Vec2) -> Self {
        Self {
            id,
            kind: PointerKind::Touch,
            position,
            button: None,
        }
    }
}

/// Stable pointer identifier assigned by the input source.
///
/// The system mouse uses [`PointerId::MOUSE`]; adapters must map touch
/// identifiers into a non-colliding range (the winit adapter offsets them
/// past the mouse id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

impl PointerId {
    /// Reserved identifier for the system mouse pointer.
    pub const MOUSE: Self = Self(1);
}

/// Input device class for a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Mouse (or any single-pointer device with buttons).
    Mouse,
    /// Touch contact.
    Touch,
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

/// Scroll wheel motion in the unit the platform reported.
///
/// Positive values scroll down/away (zoom out), matching the sign of the
/// usual platform wheel delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelDelta {
    /// High-resolution pixel scrolling (trackpads).
    Pixels(f32),
    /// Discrete line scrolling (classic mouse wheels).
    Lines(f32),
    /// Page scrolling.
    Pages(f32),
}

/// Modifier key snapshot used for gesture overrides.
///
/// Ctrl forces rotate, Alt forces zoom, Shift forces pan; the first held
/// modifier wins and any key release clears the override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Whether a control key is held.
    pub ctrl: bool,
    /// Whether an alt key is held.
    pub alt: bool,
    /// Whether a shift key is held.
    pub shift: bool,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::keyboard::ModifiersState> for Modifiers {
    fn from(state: winit::keyboard::ModifiersState) -> Self {
        Self {
            ctrl: state.control_key(),
            alt: state.alt_key(),
            shift: state.shift_key(),
        }
    }
}

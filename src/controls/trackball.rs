//! The trackball controller: gesture classification and camera transforms.
//!
//! Input events never move the camera directly. The pointer, wheel, and
//! key handlers classify the gesture and buffer normalized motion samples;
//! the embedder calls [`TrackballControls::update`] once per frame to
//! consume the buffers, apply rotate/zoom/pan to the camera, and notify
//! listeners when the pose actually changed.

use glam::{Quat, Vec3};

use super::screen::ScreenRect;
use super::state::{GestureState, MotionState};
use crate::camera::{Camera, Projection};
use crate::events::{ControlEvent, EventEmitter, ListenerId};
use crate::input::{
    InputEvent, Modifiers, PointerEvent, PointerId, PointerKind, PointerTracker, WheelDelta,
};
use crate::settings::{MouseAction, Settings};

/// Squared-distance threshold below which a pose is considered unchanged.
const EPS: f32 = 1e-10;

/// Zoom baseline shift per wheel unit, page scrolling.
const WHEEL_PAGE_SCALE: f32 = 0.025;
/// Zoom baseline shift per wheel unit, line scrolling.
const WHEEL_LINE_SCALE: f32 = 0.01;
/// Zoom baseline shift per wheel unit, pixel scrolling.
const WHEEL_PIXEL_SCALE: f32 = 0.000_25;

/// Rescale `v` to `length`, or zero if `v` is degenerate.
fn set_length(v: Vec3, length: f32) -> Vec3 {
    v.normalize_or_zero() * length
}

/// Camera pose captured at construction and restored by
/// [`TrackballControls::reset`].
#[derive(Debug, Clone, Copy)]
struct PoseSnapshot {
    target: Vec3,
    position: Vec3,
    up: Vec3,
    zoom: f32,
}

// ─────────────────────────────────────────────────────────────────────────────
// TrackballControls
// ─────────────────────────────────────────────────────────────────────────────

/// Interactive trackball camera controller.
///
/// Feed it platform-agnostic [`InputEvent`]s as they arrive, then call
/// [`update`] once per frame tick:
///
/// ```ignore
/// let mut controls = TrackballControls::new(&mut camera, screen);
/// // In the event loop:
/// if controls.handle_event(event) {
///     window.request_redraw();
/// }
/// // Once per frame:
/// controls.update(&mut camera, false);
/// ```
///
/// The controller never owns the camera: it mutates whichever camera is
/// passed to [`update`], leaving the embedder free to drive the same
/// camera from animation or scripting between frames.
///
/// [`update`]: Self::update
pub struct TrackballControls {
    /// Tunable interaction behavior. Safe to mutate between events.
    pub settings: Settings,
    /// Viewport bounds used to normalize pointer coordinates.
    screen: ScreenRect,
    /// Orbit/pan focus point in world space.
    target: Vec3,
    /// Gesture selected by the active pointer, if any.
    state: GestureState,
    /// Gesture forced by a held modifier key; overrides `state`.
    key_state: GestureState,
    /// Normalized motion buffers for the three gesture channels.
    motion: MotionState,
    /// Live pointers in press order.
    pointers: PointerTracker,
    /// Pointer currently holding the interaction capture.
    captured: Option<PointerId>,
    /// Offset from target to camera; scratch for the transform passes.
    eye: Vec3,
    /// Rotation axis of the most recent orbit step.
    last_axis: Vec3,
    /// Rotation angle of the most recent orbit step; decays while coasting.
    last_angle: f32,
    /// Camera position after the previous update, for change detection.
    last_position: Vec3,
    /// Camera up vector after the previous update, for change detection.
    last_up: Vec3,
    /// Orthographic zoom after the previous update, for change detection.
    last_zoom: f32,
    /// Pose to restore on `reset`.
    home: PoseSnapshot,
    /// Subscribed gesture/change listeners.
    emitter: EventEmitter,
    /// Cleared by `dispose`; gates all input handling.
    attached: bool,
}

impl TrackballControls {
    // ── Construction ─────────────────────────────────────────────────────

    /// Create a controller driving `camera` over the given viewport.
    ///
    /// The camera's current pose becomes the [`reset`] snapshot, and one
    /// silent [`update`] runs so the camera faces the initial target
    /// before the first frame.
    ///
    /// [`reset`]: Self::reset
    /// [`update`]: Self::update
    #[must_use]
    pub fn new(camera: &mut Camera, screen: ScreenRect) -> Self {
        Self::with_settings(camera, screen, Settings::default())
    }

    /// Create a controller with explicit [`Settings`].
    #[must_use]
    pub fn with_settings(camera: &mut Camera, screen: ScreenRect, settings: Settings) -> Self {
        let mut controls = Self {
            settings,
            screen,
            target: Vec3::ZERO,
            state: GestureState::Idle,
            key_state: GestureState::Idle,
            motion: MotionState::default(),
            pointers: PointerTracker::new(),
            captured: None,
            eye: camera.position,
            last_axis: Vec3::ZERO,
            last_angle: 0.0,
            last_position: Vec3::ZERO,
            last_up: Vec3::ZERO,
            last_zoom: 1.0,
            home: PoseSnapshot {
                target: Vec3::ZERO,
                position: camera.position,
                up: camera.up,
                zoom: camera.zoom(),
            },
            emitter: EventEmitter::new(),
            attached: true,
        };
        controls.update(camera, true);
        controls
    }

    // ── Subscriptions ────────────────────────────────────────────────────

    /// Register a listener for [`ControlEvent`]s and return its removal
    /// handle.
    ///
    /// Listeners run synchronously, in registration order, on the thread
    /// that triggered the event.
    #[must_use]
    pub fn on(&mut self, listener: impl FnMut(ControlEvent) + 'static) -> ListenerId {
        self.emitter.on(listener)
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.emitter.off(id)
    }

    // ── Input handling ───────────────────────────────────────────────────

    /// Route one input event through the controller.
    ///
    /// Returns `true` when the event was consumed (the embedder should
    /// then schedule an [`update`]). Disposed controllers consume nothing;
    /// disabled ones consume nothing except pointer cancellation, which is
    /// always processed so a revoked capture cannot wedge the tracker.
    ///
    /// [`update`]: Self::update
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        if !self.attached {
            return false;
        }
        match event {
            InputEvent::PointerDown(pointer) => self.on_pointer_down(pointer),
            InputEvent::PointerMove(pointer) => self.on_pointer_move(pointer),
            InputEvent::PointerUp(pointer) => self.on_pointer_up(pointer),
            InputEvent::PointerCancel(pointer) => self.on_pointer_cancel(pointer),
            InputEvent::Wheel(delta) => self.on_wheel(delta),
            InputEvent::KeyDown(modifiers) => self.on_key_down(modifiers),
            InputEvent::KeyUp => self.on_key_up(),
        }
    }

    fn on_pointer_down(&mut self, pointer: PointerEvent) -> bool {
        if !self.settings.enabled {
            return false;
        }
        if self.pointers.is_empty() {
            self.captured = Some(pointer.id);
        }
        self.pointers.add(pointer.id);
        self.pointers.track(pointer.id, pointer.position);

        match pointer.kind {
            PointerKind::Touch => self.on_touch_start(pointer),
            PointerKind::Mouse => self.on_mouse_down(pointer),
        }
        true
    }

    fn on_pointer_move(&mut self, pointer: PointerEvent) -> bool {
        if !self.settings.enabled || self.pointers.is_empty() {
            return false;
        }
        self.pointers.track(pointer.id, pointer.position);

        match pointer.kind {
            PointerKind::Touch => self.on_touch_move(pointer),
            PointerKind::Mouse => self.on_mouse_move(pointer),
        }
        true
    }

    fn on_pointer_up(&mut self, pointer: PointerEvent) -> bool {
        if !self.settings.enabled || self.pointers.is_empty() {
            return false;
        }
        self.finish_pointer(pointer)
    }

    // Runs even while disabled: a platform-revoked pointer must always be
    // released from the tracker.
    fn on_pointer_cancel(&mut self, pointer: PointerEvent) -> bool {
        if self.pointers.is_empty() {
            return false;
        }
        self.finish_pointer(pointer)
    }

    /// Shared teardown for pointer up/cancel: drop the pointer, re-derive
    /// the gesture from what remains, and emit [`ControlEvent::End`].
    fn finish_pointer(&mut self, pointer: PointerEvent) -> bool {
        self.pointers.remove(pointer.id);
        self.captured = self.pointers.first();

        match pointer.kind {
            PointerKind::Mouse => self.state = GestureState::Idle,
            PointerKind::Touch => match self.pointers.len() {
                0 => self.state = GestureState::Idle,
                1 => {
                    // Hand the gesture to the surviving finger without a
                    // positional jump: re-seed both rotate samples from
                    // its last tracked position.
                    self.state = GestureState::TouchRotate;
                    if let Some(position) =
                        self.pointers.first().and_then(|id| self.pointers.position(id))
                    {
                        self.motion.move_curr = self.screen.to_circle(position);
                        self.motion.move_prev = self.motion.move_curr;
                    }
                }
                _ => self.seed_two_finger(),
            },
        }

        self.emitter.emit(ControlEvent::End);
        true
    }

    fn on_mouse_down(&mut self, pointer: PointerEvent) {
        // A second button pressed mid-drag cannot steal the gesture.
        if self.state == GestureState::Idle {
            self.state = match pointer.button.map(|b| self.settings.mouse.action_for(b)) {
                Some(MouseAction::Rotate) => GestureState::Rotate,
                Some(MouseAction::Zoom) => GestureState::Zoom,
                Some(MouseAction::Pan) => GestureState::Pan,
                Some(MouseAction::Disabled) | None => GestureState::Idle,
            };
        }

        match self.effective_state() {
            GestureState::Rotate if !self.settings.no_rotate => {
                self.motion.move_curr = self.screen.to_circle(pointer.position);
                self.motion.move_prev = self.motion.move_curr;
            }
            GestureState::Zoom if !self.settings.no_zoom => {
                self.motion.zoom_start = self.screen.to_screen(pointer.position);
                self.motion.zoom_end = self.motion.zoom_start;
            }
            GestureState::Pan if !self.settings.no_pan => {
                self.motion.pan_start = self.screen.to_screen(pointer.position);
                self.motion.pan_end = self.motion.pan_start;
            }
            _ => {}
        }

        self.emitter.emit(ControlEvent::Start);
    }

    fn on_mouse_move(&mut self, pointer: PointerEvent) {
        match self.effective_state() {
            GestureState::Rotate if !self.settings.no_rotate => {
                self.motion.move_prev = self.motion.move_curr;
                self.motion.move_curr = self.screen.to_circle(pointer.position);
            }
            GestureState::Zoom if !self.settings.no_zoom => {
                self.motion.zoom_end = self.screen.to_screen(pointer.position);
            }
            GestureState::Pan if !self.settings.no_pan => {
                self.motion.pan_end = self.screen.to_screen(pointer.position);
            }
            _ => {}
        }
    }

    fn on_touch_start(&mut self, pointer: PointerEvent) {
        match self.pointers.len() {
            1 => {
                self.state = GestureState::TouchRotate;
                self.motion.move_curr = self.screen.to_circle(pointer.position);
                self.motion.move_prev = self.motion.move_curr;
            }
            _ => self.seed_two_finger(),
        }

        self.emitter.emit(ControlEvent::Start);
    }

    fn on_touch_move(&mut self, pointer: PointerEvent) {
        match self.pointers.len() {
            1 => {
                self.motion.move_prev = self.motion.move_curr;
                self.motion.move_curr = self.screen.to_circle(pointer.position);
            }
            _ => {
                let Some(other) = self.pointers.other_position(pointer.id) else {
                    return;
                };
                self.motion.touch_zoom_distance_end = pointer.position.distance(other);
                let midpoint = (pointer.position + other) * 0.5;
                self.motion.pan_end = self.screen.to_screen(midpoint);
            }
        }
    }

    /// Enter two-finger mode and re-baseline pinch distance and pan
    /// midpoint from the first two tracked pointers.
    fn seed_two_finger(&mut self) {
        self.state = GestureState::TouchZoomPan;
        if let Some((a, b)) = self.pointers.first_two_positions() {
            let distance = a.distance(b);
            self.motion.touch_zoom_distance_start = distance;
            self.motion.touch_zoom_distance_end = distance;

            let midpoint = (a + b) * 0.5;
            self.motion.pan_start = self.screen.to_screen(midpoint);
            self.motion.pan_end = self.motion.pan_start;
        }
    }

    fn on_wheel(&mut self, delta: WheelDelta) -> bool {
        if !self.settings.enabled || self.settings.no_zoom {
            return false;
        }

        match delta {
            WheelDelta::Pages(y) => self.motion.zoom_start.y -= y * WHEEL_PAGE_SCALE,
            WheelDelta::Lines(y) => self.motion.zoom_start.y -= y * WHEEL_LINE_SCALE,
            WheelDelta::Pixels(y) => self.motion.zoom_start.y -= y * WHEEL_PIXEL_SCALE,
        }

        self.emitter.emit(ControlEvent::Start);
        self.emitter.emit(ControlEvent::End);
        true
    }

    /// Latch a key override from the modifier snapshot.
    ///
    /// First match wins (ctrl before alt before shift), each gated by its
    /// axis toggle. Returns `true` only when an override was latched.
    fn on_key_down(&mut self, modifiers: Modifiers) -> bool {
        if !self.settings.enabled || self.key_state != GestureState::Idle {
            return false;
        }

        if modifiers.ctrl && !self.settings.no_rotate {
            self.key_state = GestureState::Rotate;
        } else if modifiers.alt && !self.settings.no_zoom {
            self.key_state = GestureState::Zoom;
        } else if modifiers.shift && !self.settings.no_pan {
            self.key_state = GestureState::Pan;
        } else {
            return false;
        }
        true
    }

    /// Any key release clears the override.
    fn on_key_up(&mut self) -> bool {
        if !self.settings.enabled {
            return false;
        }
        let had_override = self.key_state != GestureState::Idle;
        self.key_state = GestureState::Idle;
        had_override
    }

    /// Key override takes precedence over the pointer-derived gesture.
    fn effective_state(&self) -> GestureState {
        if self.key_state == GestureState::Idle {
            self.state
        } else {
            self.key_state
        }
    }

    // ── Frame update ─────────────────────────────────────────────────────

    /// Consume the buffered motion and move the camera.
    ///
    /// Runs the rotate, zoom, and pan passes (each skipped when its axis
    /// is disabled), clamps perspective cameras to the configured distance
    /// range, re-orients the camera toward the target, and emits
    /// [`ControlEvent::Change`] when the pose moved beyond an epsilon.
    /// `silent` suppresses that event but never the camera mutation.
    ///
    /// Cameras with an external projection get a warning instead of the
    /// orientation/notification tail: the controller cannot reason about
    /// their frusta.
    pub fn update(&mut self, camera: &mut Camera, silent: bool) {
        self.eye = camera.position - self.target;

        if !self.settings.no_rotate {
            self.rotate_camera(camera);
        }
        if !self.settings.no_zoom {
            self.zoom_camera(camera);
        }
        if !self.settings.no_pan {
            self.pan_camera(camera);
        }

        camera.position = self.target + self.eye;

        match camera.projection {
            Projection::Perspective(_) => {
                self.check_distances(camera);
                camera.look_at(self.target);

                if self.last_position.distance_squared(camera.position) > EPS
                    || self.last_up.distance_squared(camera.up) > EPS
                {
                    if !silent {
                        self.emitter.emit(ControlEvent::Change);
                    }
                    self.last_position = camera.position;
                    self.last_up = camera.up;
                }
            }
            Projection::Orthographic(_) => {
                camera.look_at(self.target);

                let zoom = camera.zoom();
                if self.last_position.distance_squared(camera.position) > EPS
                    || zoom != self.last_zoom
                {
                    if !silent {
                        self.emitter.emit(ControlEvent::Change);
                    }
                    self.last_position = camera.position;
                    self.last_zoom = zoom;
                }
            }
            Projection::External(_) => {
                log::warn!("external projection: camera orientation left to the embedder");
            }
        }
    }

    /// Restore the pose captured at construction.
    ///
    /// Clears both gesture states, snaps target/position/up/zoom back, and
    /// emits [`ControlEvent::Change`] unconditionally. Settings are not
    /// touched.
    pub fn reset(&mut self, camera: &mut Camera) {
        self.state = GestureState::Idle;
        self.key_state = GestureState::Idle;

        self.target = self.home.target;
        camera.position = self.home.position;
        camera.up = self.home.up;
        camera.set_zoom(self.home.zoom);

        self.eye = camera.position - self.target;
        camera.look_at(self.target);

        self.emitter.emit(ControlEvent::Change);

        self.last_position = camera.position;
        self.last_up = camera.up;
        self.last_zoom = camera.zoom();
    }

    // ── Transform passes ─────────────────────────────────────────────────

    /// Orbit the eye (and the camera's up vector) around the target.
    ///
    /// A fresh move delta rotates about the axis perpendicular to both the
    /// on-screen move direction and the eye, and records that axis/angle.
    /// With no fresh delta and damping active, the recorded rotation
    /// replays at `sqrt(1 - damping)` decay per tick until it dies out.
    fn rotate_camera(&mut self, camera: &mut Camera) {
        let delta = self.motion.move_curr - self.motion.move_prev;
        let mut angle = delta.length();

        if angle > 0.0 {
            self.eye = camera.position - self.target;

            let eye_dir = self.eye.normalize_or_zero();
            let up_dir = camera.up.normalize_or_zero();
            let sideways = up_dir.cross(eye_dir).normalize_or_zero();

            let move_dir = up_dir * delta.y + sideways * delta.x;

            if let Some(axis) = move_dir.cross(self.eye).try_normalize() {
                angle *= self.settings.rotate_speed;
                let rotation = Quat::from_axis_angle(axis, angle);

                self.eye = rotation * self.eye;
                camera.up = rotation * camera.up;

                self.last_axis = axis;
                self.last_angle = angle;
            } else {
                // Degenerate move direction. Drop any stored inertia so a
                // stale axis cannot replay.
                self.last_angle = 0.0;
            }
        } else if !self.settings.static_moving && self.last_angle != 0.0 {
            self.last_angle *= (1.0 - self.settings.dynamic_damping_factor).sqrt();
            self.eye = camera.position - self.target;

            let rotation = Quat::from_axis_angle(self.last_axis, self.last_angle);
            self.eye = rotation * self.eye;
            camera.up = rotation * camera.up;
        }

        self.motion.move_prev = self.motion.move_curr;
    }

    /// Scale the eye (perspective) or the projection zoom (orthographic).
    ///
    /// Two-finger mode consumes the pinch ratio and immediately
    /// re-baselines it so each ratio applies exactly once. Drag/wheel mode
    /// derives a factor from the vertical zoom delta; a factor of exactly
    /// 1.0 or a non-positive factor is discarded. Fly mode and an active
    /// pan hand the whole zoom delta to the pan pass instead.
    fn zoom_camera(&mut self, camera: &mut Camera) {
        if self.state == GestureState::TouchZoomPan {
            let factor =
                self.motion.touch_zoom_distance_start / self.motion.touch_zoom_distance_end;
            self.motion.touch_zoom_distance_start = self.motion.touch_zoom_distance_end;

            match &mut camera.projection {
                Projection::Perspective(_) => self.eye *= factor,
                Projection::Orthographic(ortho) => ortho.zoom *= factor,
                Projection::External(_) => {
                    log::warn!("external projection: zoom ignored");
                }
            }
            return;
        }

        if self.settings.fly_mode
            || self.state == GestureState::Pan
            || self.key_state == GestureState::Pan
        {
            return;
        }

        let factor =
            1.0 + (self.motion.zoom_end.y - self.motion.zoom_start.y) * self.settings.zoom_speed;

        if factor != 1.0 && factor > 0.0 {
            match &mut camera.projection {
                Projection::Perspective(_) => self.eye *= factor,
                Projection::Orthographic(ortho) => ortho.zoom /= factor,
                Projection::External(_) => {
                    log::warn!("external projection: zoom ignored");
                }
            }
        }

        if self.settings.static_moving {
            self.motion.zoom_start = self.motion.zoom_end;
        } else {
            self.motion.zoom_start.y += (self.motion.zoom_end.y - self.motion.zoom_start.y)
                * self.settings.dynamic_damping_factor;
        }
    }

    /// Translate camera and target together along the view plane.
    ///
    /// In fly mode (or while panning), the vertical zoom delta becomes
    /// motion along the eye axis, turning the pan pass into forward and
    /// backward flight.
    fn pan_camera(&mut self, camera: &mut Camera) {
        let mut change = (self.motion.pan_end - self.motion.pan_start).extend(0.0);

        if self.settings.fly_mode
            || self.state == GestureState::Pan
            || self.key_state == GestureState::Pan
        {
            change.z =
                (self.motion.zoom_end.y - self.motion.zoom_start.y) * self.settings.pan_speed * 10.0;

            if self.settings.static_moving {
                self.motion.zoom_start = self.motion.zoom_end;
            } else {
                self.motion.zoom_start.y += (self.motion.zoom_end.y - self.motion.zoom_start.y)
                    * self.settings.dynamic_damping_factor;
            }
        }

        if change.length_squared() > 0.0 {
            if let Projection::Orthographic(ortho) = camera.projection {
                // Width divides both axes; the screen map already
                // normalized y by height.
                let scale_x = (ortho.right - ortho.left) / ortho.zoom / self.screen.width;
                let scale_y = (ortho.top - ortho.bottom) / ortho.zoom / self.screen.width;
                change.x *= scale_x;
                change.y *= scale_y;
            }

            change *= self.eye.length() * self.settings.pan_speed;

            let mut pan = set_length(self.eye.cross(camera.up), change.x);
            pan += set_length(camera.up, change.y);
            pan += set_length(self.eye, change.z);

            camera.position += pan;
            self.target += pan;

            if self.settings.static_moving {
                self.motion.pan_start = self.motion.pan_end;
            } else {
                self.motion.pan_start += (self.motion.pan_end - self.motion.pan_start)
                    * self.settings.dynamic_damping_factor;
            }
        }
    }

    /// Clamp the eye length to `[min_distance, max_distance]`.
    ///
    /// Skipped when both zoom and pan are disabled, since nothing can move
    /// the camera off its ring. A clamp also snaps the zoom baseline so
    /// the overshoot does not keep pushing.
    fn check_distances(&mut self, camera: &mut Camera) {
        if self.settings.no_zoom && self.settings.no_pan {
            return;
        }

        let max = self.settings.max_distance;
        if self.eye.length_squared() > max * max {
            self.eye = set_length(self.eye, max);
            camera.position = self.target + self.eye;
            self.motion.zoom_start = self.motion.zoom_end;
        }

        let min = self.settings.min_distance;
        if self.eye.length_squared() < min * min {
            self.eye = set_length(self.eye, min);
            camera.position = self.target + self.eye;
            self.motion.zoom_start = self.motion.zoom_end;
        }
    }

    // ── Accessors & lifecycle ────────────────────────────────────────────

    /// Orbit/pan focus point.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Move the focus point. Takes effect on the next [`update`].
    ///
    /// [`update`]: Self::update
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Gesture selected by the active pointer.
    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Pointer currently holding the interaction capture.
    #[must_use]
    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.captured
    }

    /// Number of live pointers.
    #[must_use]
    pub fn active_pointers(&self) -> usize {
        self.pointers.len()
    }

    /// Viewport bounds the controller is normalizing against.
    #[must_use]
    pub fn screen(&self) -> ScreenRect {
        self.screen
    }

    /// Whether the controller still accepts input (i.e. not disposed).
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Refresh the cached viewport bounds after a resize or move.
    pub fn handle_resize(&mut self, screen: ScreenRect) {
        self.screen = screen;
    }

    /// Permanently detach the controller.
    ///
    /// Drops every listener and tracked pointer and makes all further
    /// input inert. Idempotent. [`update`] keeps working so damping can
    /// finish a frame, but with no listeners left nothing is notified.
    ///
    /// [`update`]: Self::update
    pub fn dispose(&mut self) {
        self.attached = false;
        self.emitter.clear();
        self.pointers.clear();
        self.captured = None;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;

    use super::*;
    use crate::camera::{Orthographic, Perspective};
    use crate::input::MouseButton;

    const TOL: f32 = 1e-3;

    fn screen() -> ScreenRect {
        ScreenRect::from_size(800.0, 600.0)
    }

    fn perspective_camera() -> Camera {
        Camera::perspective(
            Vec3::new(0.0, 0.0, 10.0),
            Perspective::new(45.0, 800.0 / 600.0, 0.1, 100.0),
        )
    }

    fn orthographic_camera() -> Camera {
        Camera::orthographic(
            Vec3::new(0.0, 0.0, 10.0),
            Orthographic::from_size(8.0, 6.0, 0.1, 100.0),
        )
    }

    fn new_controls() -> (TrackballControls, Camera) {
        let mut camera = perspective_camera();
        let controls = TrackballControls::new(&mut camera, screen());
        (controls, camera)
    }

    fn send(controls: &mut TrackballControls, event: InputEvent) {
        let _ = controls.handle_event(event);
    }

    fn record_events(controls: &mut TrackballControls) -> Rc<RefCell<Vec<ControlEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let _ = controls.on(move |event| sink.borrow_mut().push(event));
        log
    }

    /// Full mouse drag: down, one move, one update, up.
    fn mouse_drag(
        controls: &mut TrackballControls,
        camera: &mut Camera,
        button: MouseButton,
        from: Vec2,
        to: Vec2,
    ) {
        send(
            controls,
            InputEvent::PointerDown(PointerEvent::mouse_button(button, from)),
        );
        send(controls, InputEvent::PointerMove(PointerEvent::mouse(to)));
        controls.update(camera, false);
        send(controls, InputEvent::PointerUp(PointerEvent::mouse(to)));
    }

    fn touch_down(controls: &mut TrackballControls, id: u64, position: Vec2) {
        send(
            controls,
            InputEvent::PointerDown(PointerEvent::touch(PointerId(id), position)),
        );
    }

    fn touch_move(controls: &mut TrackballControls, id: u64, position: Vec2) {
        send(
            controls,
            InputEvent::PointerMove(PointerEvent::touch(PointerId(id), position)),
        );
    }

    fn touch_up(controls: &mut TrackballControls, id: u64, position: Vec2) {
        send(
            controls,
            InputEvent::PointerUp(PointerEvent::touch(PointerId(id), position)),
        );
    }

    // ── Rotation ─────────────────────────────────────────────────────────

    #[test]
    fn horizontal_drag_rotates_by_the_circle_delta() {
        let (mut controls, mut camera) = new_controls();
        controls.settings.static_moving = true;
        let eye_before = camera.position - controls.target();

        // 50 px over an 800 px surface is 0.125 on the trackball circle.
        mouse_drag(
            &mut controls,
            &mut camera,
            MouseButton::Left,
            Vec2::new(400.0, 300.0),
            Vec2::new(450.0, 300.0),
        );

        let eye_after = camera.position - controls.target();
        assert!((eye_before.angle_between(eye_after) - 0.125).abs() < TOL);
        assert!((eye_after.length() - 10.0).abs() < TOL);
        // A horizontal orbit spins about the up axis, leaving it fixed.
        assert!(camera.up.distance(Vec3::Y) < TOL);
    }

    #[test]
    fn rotation_preserves_eye_length() {
        let (mut controls, mut camera) = new_controls();
        controls.settings.static_moving = true;

        mouse_drag(
            &mut controls,
            &mut camera,
            MouseButton::Left,
            Vec2::new(200.0, 150.0),
            Vec2::new(520.0, 430.0),
        );

        let eye = camera.position - controls.target();
        assert!((eye.length() - 10.0).abs() < TOL);
    }

    #[test]
    fn static_moving_leaves_no_residual_spin() {
        let (mut controls, mut camera) = new_controls();
        controls.settings.static_moving = true;

        mouse_drag(
            &mut controls,
            &mut camera,
            MouseButton::Left,
            Vec2::new(400.0, 300.0),
            Vec2::new(450.0, 300.0),
        );

        let settled = camera.position;
        for _ in 0..3 {
            controls.update(&mut camera, false);
        }
        assert_eq!(camera.position, settled);
    }

    #[test]
    fn damped_rotation_coasts_then_decays() {
        let (mut controls, mut camera) = new_controls();

        send(
            &mut controls,
            InputEvent::PointerDown(PointerEvent::mouse_button(
                MouseButton::Left,
                Vec2::new(400.0, 300.0),
            )),
        );
        send(
            &mut controls,
            InputEvent::PointerMove(PointerEvent::mouse(Vec2::new(450.0, 300.0))),
        );
        controls.update(&mut camera, false);
        send(
            &mut controls,
            InputEvent::PointerUp(PointerEvent::mouse(Vec2::new(450.0, 300.0))),
        );

        // First coast tick replays the stored angle decayed by
        // sqrt(1 - damping).
        let eye_before = camera.position - controls.target();
        controls.update(&mut camera, false);
        let eye_after = camera.position - controls.target();
        let expected = 0.125 * (1.0f32 - 0.2).sqrt();
        assert!((eye_before.angle_between(eye_after) - expected).abs() < TOL);

        // The spin dies out.
        for _ in 0..300 {
            controls.update(&mut camera, false);
        }
        let settled = camera.position;
        controls.update(&mut camera, false);
        assert!(settled.distance(camera.position) < 1e-4);
    }

    // ── Zoom ─────────────────────────────────────────────────────────────

    #[test]
    fn pinch_applies_the_ratio_once_then_holds() {
        let (mut controls, mut camera) = new_controls();

        // Two fingers 100 px apart, closing symmetrically to 50 px.
        touch_down(&mut controls, 10, Vec2::new(300.0, 300.0));
        touch_down(&mut controls, 11, Vec2::new(400.0, 300.0));
        touch_move(&mut controls, 10, Vec2::new(325.0, 300.0));
        touch_move(&mut controls, 11, Vec2::new(375.0, 300.0));

        controls.update(&mut camera, false);
        let distance = (camera.position - controls.target()).length();
        assert!((distance - 20.0).abs() < TOL);

        // The consumed ratio re-baselines; a second update is a no-op.
        controls.update(&mut camera, false);
        let distance = (camera.position - controls.target()).length();
        assert!((distance - 20.0).abs() < TOL);
    }

    #[test]
    fn drag_zoom_factor_of_one_is_a_no_op() {
        let (mut controls, mut camera) = new_controls();
        let log = record_events(&mut controls);

        send(
            &mut controls,
            InputEvent::PointerDown(PointerEvent::mouse_button(
                MouseButton::Middle,
                Vec2::new(400.0, 300.0),
            )),
        );
        let before = camera.position;
        controls.update(&mut camera, false);

        assert_eq!(camera.position, before);
        assert_eq!(*log.borrow(), vec![ControlEvent::Start]);
    }

    #[test]
    fn non_positive_zoom_factor_is_rejected() {
        let (mut controls, mut camera) = new_controls();
        controls.settings.zoom_speed = 50.0;

        // A huge upward drag would flip the factor negative.
        send(
            &mut controls,
            InputEvent::PointerDown(PointerEvent::mouse_button(
                MouseButton::Middle,
                Vec2::new(400.0, 300.0),
            )),
        );
        send(
            &mut controls,
            InputEvent::PointerMove(PointerEvent::mouse(Vec2::new(400.0, 30.0))),
        );
        let before = camera.position;
        controls.update(&mut camera, false);

        assert_eq!(camera.position, before);
    }

    #[test]
    fn wheel_shifts_the_zoom_baseline_and_fires_start_end() {
        let (mut controls, mut camera) = new_controls();
        let log = record_events(&mut controls);

        send(&mut controls, InputEvent::Wheel(WheelDelta::Lines(1.0)));
        controls.update(&mut camera, false);

        // 1 line * 0.01 * zoom_speed 1.2 pushes the camera out.
        let distance = (camera.position - controls.target()).length();
        assert!((distance - 10.12).abs() < TOL);
        assert_eq!(
            *log.borrow(),
            vec![ControlEvent::Start, ControlEvent::End, ControlEvent::Change]
        );
    }

    #[test]
    fn wheel_delta_modes_scale_to_the_same_motion() {
        let mut distances = Vec::new();
        for delta in [
            WheelDelta::Pixels(40.0),
            WheelDelta::Lines(1.0),
            WheelDelta::Pages(0.4),
        ] {
            let (mut controls, mut camera) = new_controls();
            send(&mut controls, InputEvent::Wheel(delta));
            controls.update(&mut camera, false);
            distances.push((camera.position - controls.target()).length());
        }
        assert!((distances[0] - distances[1]).abs() < 1e-6);
        assert!((distances[1] - distances[2]).abs() < 1e-6);
    }

    #[test]
    fn wheel_is_inert_when_zoom_is_disabled() {
        let (mut controls, mut camera) = new_controls();
        controls.settings.no_zoom = true;

        assert!(!controls.handle_event(InputEvent::Wheel(WheelDelta::Lines(1.0))));
        let before = camera.position;
        controls.update(&mut camera, false);
        assert_eq!(camera.position, before);
    }

    #[test]
    fn distance_clamp_bounds_drag_zoom() {
        let (mut controls, mut camera) = new_controls();
        controls.settings.static_moving = true;
        controls.settings.min_distance = 5.0;
        controls.settings.max_distance = 15.0;

        // Zoom out twice: 10 -> 14 -> clamped at 15.
        for _ in 0..2 {
            mouse_drag(
                &mut controls,
                &mut camera,
                MouseButton::Middle,
                Vec2::new(400.0, 300.0),
                Vec2::new(400.0, 500.0),
            );
        }
        let distance = (camera.position - controls.target()).length();
        assert!((distance - 15.0).abs() < TOL);

        // Zoom in until the lower clamp engages.
        for _ in 0..3 {
            mouse_drag(
                &mut controls,
                &mut camera,
                MouseButton::Middle,
                Vec2::new(400.0, 300.0),
                Vec2::new(400.0, 100.0),
            );
        }
        let distance = (camera.position - controls.target()).length();
        assert!((distance - 5.0).abs() < TOL);
    }

    // ── Pan ──────────────────────────────────────────────────────────────

    #[test]
    fn disabling_pan_freezes_the_pan_plane_but_not_rotate() {
        let (mut controls, mut camera) = new_controls();
        controls.settings.static_moving = true;
        controls.settings.no_pan = true;

        mouse_drag(
            &mut controls,
            &mut camera,
            MouseButton::Right,
            Vec2::new(400.0, 300.0),
            Vec2::new(500.0, 380.0),
        );
        assert_eq!(controls.target(), Vec3::ZERO);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 10.0));

        // Rotate still works.
        let eye_before = camera.position - controls.target();
        mouse_drag(
            &mut controls,
            &mut camera,
            MouseButton::Left,
            Vec2::new(400.0, 300.0),
            Vec2::new(450.0, 300.0),
        );
        let eye_after = camera.position - controls.target();
        assert!(eye_before.angle_between(eye_after) > 0.1);
    }

    #[test]
    fn pan_moves_camera_and_target_together() {
        let (mut controls, mut camera) = new_controls();
        controls.settings.static_moving = true;
        let eye_before = camera.position - controls.target();

        mouse_drag(
            &mut controls,
            &mut camera,
            MouseButton::Right,
            Vec2::new(400.0, 300.0),
            Vec2::new(400.0, 380.0),
        );

        let eye_after = camera.position - controls.target();
        assert!(eye_before.distance(eye_after) < 1e-5);
        assert!((controls.target().y - 0.4).abs() < TOL);
    }

    #[test]
    fn orthographic_pan_scales_with_the_frustum() {
        let mut camera = orthographic_camera();
        let mut controls = TrackballControls::new(&mut camera, screen());
        controls.settings.static_moving = true;

        // 80 px right: 0.1 screen * (8 / 800) frustum scale * 10 * 0.3.
        mouse_drag(
            &mut controls,
            &mut camera,
            MouseButton::Right,
            Vec2::new(400.0, 300.0),
            Vec2::new(480.0, 300.0),
        );
        assert!((controls.target().x - (-0.003)).abs() < 1e-5);

        // 80 px down lands on the same magnitude: both axes divide by
        // the surface width.
        mouse_drag(
            &mut controls,
            &mut camera,
            MouseButton::Right,
            Vec2::new(400.0, 300.0),
            Vec2::new(400.0, 380.0),
        );
        assert!((controls.target().y - 0.003).abs() < 1e-5);
    }

    #[test]
    fn fly_mode_turns_zoom_delta_into_forward_flight() {
        let (mut controls, mut camera) = new_controls();
        controls.settings.fly_mode = true;
        controls.settings.static_moving = true;

        send(
            &mut controls,
            InputEvent::PointerDown(PointerEvent::mouse_button(
                MouseButton::Right,
                Vec2::new(400.0, 300.0),
            )),
        );
        send(&mut controls, InputEvent::Wheel(WheelDelta::Lines(-1.0)));
        controls.update(&mut camera, false);

        // The zoom delta drove translation along the eye axis; the
        // camera/target distance is untouched.
        assert!((controls.target().z - (-0.09)).abs() < 1e-5);
        let distance = (camera.position - controls.target()).length();
        assert!((distance - 10.0).abs() < 1e-5);

        // static_moving consumed the whole delta in one tick.
        controls.update(&mut camera, false);
        assert!((controls.target().z - (-0.09)).abs() < 1e-5);
    }

    // ── Orthographic zoom ────────────────────────────────────────────────

    #[test]
    fn orthographic_drag_divides_and_pinch_multiplies_zoom() {
        let mut camera = orthographic_camera();
        let mut controls = TrackballControls::new(&mut camera, screen());
        controls.settings.static_moving = true;
        let log = record_events(&mut controls);

        // Drag down 150 px: factor 1.3, zoom divides.
        mouse_drag(
            &mut controls,
            &mut camera,
            MouseButton::Middle,
            Vec2::new(400.0, 300.0),
            Vec2::new(400.0, 450.0),
        );
        assert!((camera.zoom() - 1.0 / 1.3).abs() < TOL);
        assert!(log.borrow().contains(&ControlEvent::Change));

        // Pinch from 100 px to 50 px: ratio 2, zoom multiplies.
        let mut camera = orthographic_camera();
        let mut controls = TrackballControls::new(&mut camera, screen());
        touch_down(&mut controls, 20, Vec2::new(300.0, 300.0));
        touch_down(&mut controls, 21, Vec2::new(400.0, 300.0));
        touch_move(&mut controls, 20, Vec2::new(325.0, 300.0));
        touch_move(&mut controls, 21, Vec2::new(375.0, 300.0));
        controls.update(&mut camera, false);
        assert!((camera.zoom() - 2.0).abs() < TOL);
    }

    // ── Pointer bookkeeping ──────────────────────────────────────────────

    #[test]
    fn pointer_bookkeeping_returns_to_idle() {
        let (mut controls, _camera) = new_controls();

        touch_down(&mut controls, 1, Vec2::new(100.0, 100.0));
        touch_down(&mut controls, 2, Vec2::new(200.0, 100.0));
        touch_down(&mut controls, 3, Vec2::new(300.0, 100.0));
        assert_eq!(controls.state(), GestureState::TouchZoomPan);
        assert_eq!(controls.captured_pointer(), Some(PointerId(1)));
        assert_eq!(controls.active_pointers(), 3);

        touch_up(&mut controls, 2, Vec2::new(200.0, 100.0));
        assert_eq!(controls.state(), GestureState::TouchZoomPan);
        assert_eq!(controls.captured_pointer(), Some(PointerId(1)));

        touch_up(&mut controls, 1, Vec2::new(100.0, 100.0));
        assert_eq!(controls.state(), GestureState::TouchRotate);
        assert_eq!(controls.captured_pointer(), Some(PointerId(3)));

        touch_up(&mut controls, 3, Vec2::new(300.0, 100.0));
        assert_eq!(controls.state(), GestureState::Idle);
        assert_eq!(controls.captured_pointer(), None);
        assert_eq!(controls.active_pointers(), 0);
    }

    #[test]
    fn touch_handoff_reseeds_without_a_jump() {
        let (mut controls, mut camera) = new_controls();
        controls.settings.static_moving = true;

        touch_down(&mut controls, 5, Vec2::new(200.0, 300.0));
        touch_down(&mut controls, 6, Vec2::new(600.0, 300.0));
        touch_up(&mut controls, 5, Vec2::new(200.0, 300.0));
        assert_eq!(controls.state(), GestureState::TouchRotate);

        // The surviving finger re-seeded in place: no rotation jump.
        let eye_before = camera.position - controls.target();
        controls.update(&mut camera, false);
        let eye_after = camera.position - controls.target();
        assert!(eye_before.angle_between(eye_after) < 1e-6);

        // Further motion rotates relative to the re-seed point.
        touch_move(&mut controls, 6, Vec2::new(640.0, 300.0));
        controls.update(&mut camera, false);
        let eye_moved = camera.position - controls.target();
        assert!((eye_after.angle_between(eye_moved) - 0.1).abs() < TOL);
    }

    #[test]
    fn third_finger_liftoff_rebaselines_the_pinch() {
        let (mut controls, mut camera) = new_controls();

        touch_down(&mut controls, 10, Vec2::new(100.0, 300.0));
        touch_down(&mut controls, 11, Vec2::new(500.0, 300.0));
        touch_down(&mut controls, 12, Vec2::new(300.0, 100.0));

        touch_up(&mut controls, 12, Vec2::new(300.0, 100.0));
        assert_eq!(controls.state(), GestureState::TouchZoomPan);

        // Distance baseline re-seeded from the surviving pair.
        controls.update(&mut camera, false);
        let distance = (camera.position - controls.target()).length();
        assert!((distance - 10.0).abs() < TOL);
    }

    #[test]
    fn moves_without_a_pressed_pointer_are_ignored() {
        let (mut controls, mut camera) = new_controls();

        assert!(!controls.handle_event(InputEvent::PointerMove(PointerEvent::mouse(
            Vec2::new(500.0, 300.0)
        ))));
        let before = camera.position;
        controls.update(&mut camera, false);
        assert_eq!(camera.position, before);
    }

    #[test]
    fn second_button_cannot_steal_the_gesture() {
        let (mut controls, _camera) = new_controls();

        send(
            &mut controls,
            InputEvent::PointerDown(PointerEvent::mouse_button(
                MouseButton::Left,
                Vec2::new(400.0, 300.0),
            )),
        );
        assert_eq!(controls.state(), GestureState::Rotate);

        send(
            &mut controls,
            InputEvent::PointerDown(PointerEvent::mouse_button(
                MouseButton::Right,
                Vec2::new(400.0, 300.0),
            )),
        );
        assert_eq!(controls.state(), GestureState::Rotate);
    }

    #[test]
    fn cancel_is_processed_even_while_disabled() {
        let (mut controls, _camera) = new_controls();
        let log = record_events(&mut controls);

        touch_down(&mut controls, 7, Vec2::new(100.0, 100.0));
        touch_down(&mut controls, 8, Vec2::new(300.0, 100.0));
        controls.settings.enabled = false;

        // A normal release is gated off, but cancellation must still
        // release the pointer.
        assert!(!controls.handle_event(InputEvent::PointerUp(PointerEvent::touch(
            PointerId(7),
            Vec2::new(100.0, 100.0)
        ))));
        assert_eq!(controls.active_pointers(), 2);

        assert!(controls.handle_event(InputEvent::PointerCancel(PointerEvent::touch(
            PointerId(7),
            Vec2::new(100.0, 100.0)
        ))));
        assert_eq!(controls.active_pointers(), 1);
        assert_eq!(controls.state(), GestureState::TouchRotate);
        assert_eq!(log.borrow().last(), Some(&ControlEvent::End));
    }

    // ── Gesture mapping & overrides ──────────────────────────────────────

    #[test]
    fn key_override_redirects_a_mouse_drag() {
        let (mut controls, mut camera) = new_controls();
        controls.settings.static_moving = true;

        // Shift forces pan even though the left button maps to rotate.
        send(
            &mut controls,
            InputEvent::KeyDown(Modifiers {
                ctrl: false,
                alt: false,
                shift: true,
            }),
        );
        mouse_drag(
            &mut controls,
            &mut camera,
            MouseButton::Left,
            Vec2::new(400.0, 300.0),
            Vec2::new(400.0, 380.0),
        );
        assert!((controls.target().y - 0.4).abs() < TOL);
        assert!(camera.up.distance(Vec3::Y) < 1e-6);

        // Releasing the key restores the button mapping.
        send(&mut controls, InputEvent::KeyUp);
        let eye_before = camera.position - controls.target();
        mouse_drag(
            &mut controls,
            &mut camera,
            MouseButton::Left,
            Vec2::new(400.0, 300.0),
            Vec2::new(450.0, 300.0),
        );
        let eye_after = camera.position - controls.target();
        assert!((eye_before.angle_between(eye_after) - 0.125).abs() < TOL);
    }

    #[test]
    fn first_modifier_wins_and_gates_respect_axis_toggles() {
        let (mut controls, mut camera) = new_controls();
        controls.settings.static_moving = true;

        // Ctrl+Shift latches rotate, not pan.
        send(
            &mut controls,
            InputEvent::KeyDown(Modifiers {
                ctrl: true,
                alt: false,
                shift: true,
            }),
        );
        mouse_drag(
            &mut controls,
            &mut camera,
            MouseButton::Right,
            Vec2::new(400.0, 300.0),
            Vec2::new(450.0, 300.0),
        );
        assert_eq!(controls.target(), Vec3::ZERO);
        send(&mut controls, InputEvent::KeyUp);

        // With rotation disabled the ctrl override cannot latch at all.
        controls.settings.no_rotate = true;
        assert!(!controls.handle_event(InputEvent::KeyDown(Modifiers {
            ctrl: true,
            alt: false,
            shift: false,
        })));
    }

    #[test]
    fn mouse_mapping_respects_a_disabled_button() {
        let (mut controls, mut camera) = new_controls();
        controls.settings.mouse.right = MouseAction::Disabled;
        let log = record_events(&mut controls);

        send(
            &mut controls,
            InputEvent::PointerDown(PointerEvent::mouse_button(
                MouseButton::Right,
                Vec2::new(400.0, 300.0),
            )),
        );
        assert_eq!(controls.state(), GestureState::Idle);

        send(
            &mut controls,
            InputEvent::PointerMove(PointerEvent::mouse(Vec2::new(500.0, 400.0))),
        );
        let before = camera.position;
        controls.update(&mut camera, false);
        assert_eq!(camera.position, before);

        send(
            &mut controls,
            InputEvent::PointerUp(PointerEvent::mouse(Vec2::new(500.0, 400.0))),
        );
        assert_eq!(
            *log.borrow(),
            vec![ControlEvent::Start, ControlEvent::End]
        );
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    #[test]
    fn construction_orients_the_camera_silently() {
        let (controls, camera) = new_controls();
        assert_eq!(controls.state(), GestureState::Idle);
        assert!(controls.is_attached());
        assert!(camera.forward().distance(Vec3::NEG_Z) < 1e-6);
    }

    #[test]
    fn reset_restores_the_exact_initial_pose() {
        let (mut controls, mut camera) = new_controls();
        let log = record_events(&mut controls);

        mouse_drag(
            &mut controls,
            &mut camera,
            MouseButton::Left,
            Vec2::new(400.0, 300.0),
            Vec2::new(500.0, 420.0),
        );
        mouse_drag(
            &mut controls,
            &mut camera,
            MouseButton::Right,
            Vec2::new(400.0, 300.0),
            Vec2::new(300.0, 200.0),
        );
        send(&mut controls, InputEvent::Wheel(WheelDelta::Lines(3.0)));
        controls.update(&mut camera, false);
        assert_ne!(camera.position, Vec3::new(0.0, 0.0, 10.0));

        controls.reset(&mut camera);

        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(camera.up, Vec3::Y);
        assert_eq!(camera.zoom(), 1.0);
        assert_eq!(controls.target(), Vec3::ZERO);
        assert_eq!(controls.state(), GestureState::Idle);
        assert_eq!(log.borrow().last(), Some(&ControlEvent::Change));
    }

    #[test]
    fn silent_update_suppresses_the_change_event() {
        let (mut controls, mut camera) = new_controls();
        let log = record_events(&mut controls);

        send(
            &mut controls,
            InputEvent::PointerDown(PointerEvent::mouse_button(
                MouseButton::Left,
                Vec2::new(400.0, 300.0),
            )),
        );
        send(
            &mut controls,
            InputEvent::PointerMove(PointerEvent::mouse(Vec2::new(450.0, 300.0))),
        );
        controls.update(&mut camera, true);
        assert_eq!(*log.borrow(), vec![ControlEvent::Start]);

        // The mutation was not suppressed, only the event.
        let eye = camera.position - controls.target();
        assert!(eye.angle_between(Vec3::new(0.0, 0.0, 10.0)) > 0.1);

        // The next audible update reports the coasting motion.
        controls.update(&mut camera, false);
        assert_eq!(log.borrow().last(), Some(&ControlEvent::Change));
    }

    #[test]
    fn disabled_controller_ignores_input_but_still_updates() {
        let (mut controls, mut camera) = new_controls();

        // Seed a damped spin, then disable mid-flight.
        send(
            &mut controls,
            InputEvent::PointerDown(PointerEvent::mouse_button(
                MouseButton::Left,
                Vec2::new(400.0, 300.0),
            )),
        );
        send(
            &mut controls,
            InputEvent::PointerMove(PointerEvent::mouse(Vec2::new(450.0, 300.0))),
        );
        controls.update(&mut camera, false);
        controls.settings.enabled = false;

        assert!(!controls.handle_event(InputEvent::PointerMove(PointerEvent::mouse(
            Vec2::new(600.0, 300.0)
        ))));
        assert!(!controls.handle_event(InputEvent::Wheel(WheelDelta::Lines(1.0))));

        // Damping still coasts: update is not gated by the input switch.
        let before = camera.position;
        controls.update(&mut camera, false);
        assert!(before.distance(camera.position) > 1e-6);
    }

    #[test]
    fn dispose_detaches_input_and_listeners() {
        let (mut controls, mut camera) = new_controls();
        let log = record_events(&mut controls);

        controls.dispose();
        assert!(!controls.is_attached());

        assert!(!controls.handle_event(InputEvent::PointerDown(
            PointerEvent::mouse_button(MouseButton::Left, Vec2::new(400.0, 300.0))
        )));
        assert_eq!(controls.state(), GestureState::Idle);
        assert_eq!(controls.active_pointers(), 0);

        controls.update(&mut camera, false);
        controls.reset(&mut camera);
        assert!(log.borrow().is_empty());

        // Idempotent.
        controls.dispose();
        assert!(!controls.is_attached());
    }

    // ── External projections ─────────────────────────────────────────────

    #[test]
    fn external_projection_gets_no_orientation_or_events() {
        let mut camera = Camera::external(Vec3::new(0.0, 0.0, 10.0), glam::Mat4::IDENTITY);
        let mut controls = TrackballControls::new(&mut camera, screen());
        let log = record_events(&mut controls);

        send(
            &mut controls,
            InputEvent::PointerDown(PointerEvent::mouse_button(
                MouseButton::Middle,
                Vec2::new(400.0, 300.0),
            )),
        );
        send(
            &mut controls,
            InputEvent::PointerMove(PointerEvent::mouse(Vec2::new(400.0, 500.0))),
        );
        let before = camera;
        controls.update(&mut camera, false);

        assert_eq!(camera, before);
        assert_eq!(*log.borrow(), vec![ControlEvent::Start]);
    }

    // ── Listener management ──────────────────────────────────────────────

    #[test]
    fn off_unsubscribes_a_listener() {
        let (mut controls, mut camera) = new_controls();

        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let id = controls.on(move |event| sink.borrow_mut().push(event));

        assert!(controls.off(id));
        assert!(!controls.off(id));

        send(&mut controls, InputEvent::Wheel(WheelDelta::Lines(1.0)));
        controls.update(&mut camera, false);
        assert!(log.borrow().is_empty());
    }
}

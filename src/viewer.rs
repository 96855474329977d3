//! Standalone demo window backed by winit.
//!
//! Opens an empty window whose camera is driven entirely by the trackball
//! controls, logging the pose as it changes. `Escape` closes the window,
//! `R` resets the camera to its starting pose.
//!
//! ```no_run
//! # use trackball::viewer::Viewer;
//! Viewer::builder()
//!     .with_title("Orbit demo")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::{cell::Cell, rc::Rc, sync::Arc};

use glam::{Vec2, Vec3};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    camera::{Camera, Perspective},
    controls::{ScreenRect, TrackballControls},
    error::TrackballError,
    events::ControlEvent,
    input::{InputEvent, Modifiers, MouseButton, PointerEvent, PointerId, WheelDelta},
    settings::Settings,
};

/// Touch ids are offset past [`PointerId::MOUSE`] so a finger can never
/// collide with the mouse pointer slot.
const TOUCH_ID_OFFSET: u64 = 2;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    title: String,
    settings: Option<Settings>,
    camera: Option<Camera>,
}

impl ViewerBuilder {
    /// Create a builder with defaults (title "Trackball", default settings,
    /// a perspective camera eight units out).
    fn new() -> Self {
        Self {
            title: "Trackball".into(),
            settings: None,
            camera: None,
        }
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Override the default controller settings.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Start from an explicit camera instead of the built-in default.
    ///
    /// The aspect ratio is overwritten to match the window once it opens.
    #[must_use]
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            title: self.title,
            settings: self.settings,
            camera: self.camera,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window wired to a [`TrackballControls`] instance.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    title: String,
    settings: Option<Settings>,
    camera: Option<Camera>,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    pub fn run(self) -> Result<(), TrackballError> {
        let event_loop =
            EventLoop::new().map_err(|e| TrackballError::Viewer(e.to_string()))?;
        // Redraws are requested by input and by pose changes, so the loop
        // can sleep between gestures.
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ViewerApp {
            window: None,
            controls: None,
            camera: self.camera,
            cursor: Vec2::ZERO,
            modifiers: Modifiers::default(),
            pose_changed: Rc::new(Cell::new(false)),
            settings: self.settings,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| TrackballError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    controls: Option<TrackballControls>,
    camera: Option<Camera>,
    /// Last cursor position; winit button events carry no coordinates.
    cursor: Vec2,
    /// Modifier snapshot attached to forwarded key presses.
    modifiers: Modifiers,
    /// Set by the change listener, drained on each redraw.
    pose_changed: Rc<Cell<bool>>,
    settings: Option<Settings>,
    title: String,
}

impl ViewerApp {
    /// Forward one event to the controls and request a redraw if it was
    /// consumed.
    fn forward(&mut self, event: InputEvent) {
        let Some(controls) = &mut self.controls else {
            return;
        };
        if controls.handle_event(event) {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn touch_pointer(touch: &winit::event::Touch) -> PointerEvent {
        #[allow(clippy::cast_possible_truncation)]
        let position = Vec2::new(touch.location.x as f32, touch.location.y as f32);
        PointerEvent::touch(PointerId(touch.id + TOUCH_ID_OFFSET), position)
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        // Size the window to 75% of the primary monitor when we can.
        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            #[allow(clippy::cast_possible_truncation)]
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            #[allow(clippy::cast_possible_truncation)]
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(logical_w, logical_h))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let screen = ScreenRect::from_size(inner.width as f32, inner.height as f32);

        let mut camera = self.camera.take().unwrap_or_else(|| {
            Camera::perspective(
                Vec3::new(0.0, 0.0, 8.0),
                Perspective::new(45.0, screen.aspect(), 0.1, 100.0),
            )
        });
        camera.set_aspect(screen.aspect());

        let mut controls = TrackballControls::with_settings(
            &mut camera,
            screen,
            self.settings.take().unwrap_or_default(),
        );

        let pose_changed = Rc::clone(&self.pose_changed);
        let _ = controls.on(move |event| {
            if event == ControlEvent::Change {
                pose_changed.set(true);
            }
        });

        window.request_redraw();
        self.window = Some(window);
        self.camera = Some(camera);
        self.controls = Some(controls);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                let screen =
                    ScreenRect::from_size(size.width as f32, size.height as f32);
                if let (Some(controls), Some(camera)) =
                    (&mut self.controls, &mut self.camera)
                {
                    controls.handle_resize(screen);
                    camera.set_aspect(screen.aspect());
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(controls), Some(camera)) =
                    (&mut self.controls, &mut self.camera)
                {
                    controls.update(camera, false);

                    // While the pose keeps changing (damping, held drags)
                    // the redraw chain sustains itself.
                    if self.pose_changed.replace(false) {
                        log::debug!(
                            "camera at {:?}, target {:?}, up {:?}",
                            camera.position,
                            controls.target(),
                            camera.up
                        );
                        if let Some(window) = &self.window {
                            window.request_redraw();
                        }
                    }
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let position = self.cursor;
                let event = if state == ElementState::Pressed {
                    InputEvent::PointerDown(PointerEvent::mouse_button(
                        MouseButton::from(button),
                        position,
                    ))
                } else {
                    InputEvent::PointerUp(PointerEvent::mouse(position))
                };
                self.forward(event);
            }

            WindowEvent::CursorMoved { position, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let position = Vec2::new(position.x as f32, position.y as f32);
                self.cursor = position;
                self.forward(InputEvent::PointerMove(PointerEvent::mouse(position)));
            }

            WindowEvent::MouseWheel { delta, .. } => {
                // winit's scroll sign is inverted relative to the zoom
                // baseline convention (positive means scrolling away).
                #[allow(clippy::cast_possible_truncation)]
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => WheelDelta::Lines(-y),
                    MouseScrollDelta::PixelDelta(pos) => {
                        WheelDelta::Pixels(-(pos.y as f32))
                    }
                };
                self.forward(InputEvent::Wheel(delta));
            }

            WindowEvent::Touch(touch) => {
                let pointer = Self::touch_pointer(&touch);
                let event = match touch.phase {
                    TouchPhase::Started => InputEvent::PointerDown(pointer),
                    TouchPhase::Moved => InputEvent::PointerMove(pointer),
                    TouchPhase::Ended => InputEvent::PointerUp(pointer),
                    TouchPhase::Cancelled => InputEvent::PointerCancel(pointer),
                };
                self.forward(event);
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = Modifiers::from(modifiers.state());
            }

            WindowEvent::KeyboardInput { event, .. } => {
                use winit::keyboard::{KeyCode, PhysicalKey};
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };

                if event.state == ElementState::Pressed {
                    match code {
                        KeyCode::Escape => {
                            event_loop.exit();
                        }
                        KeyCode::KeyR => {
                            if let (Some(controls), Some(camera)) =
                                (&mut self.controls, &mut self.camera)
                            {
                                controls.reset(camera);
                            }
                            if let Some(window) = &self.window {
                                window.request_redraw();
                            }
                        }
                        _ => self.forward(InputEvent::KeyDown(self.modifiers)),
                    }
                } else {
                    self.forward(InputEvent::KeyUp);
                }
            }

            _ => (),
        }
    }
}

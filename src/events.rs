//! Gesture lifecycle notifications and the listener registry.
//!
//! The controller owns an [`EventEmitter`] rather than inheriting dispatch
//! behavior; embedders subscribe with [`EventEmitter::on`] (via
//! [`TrackballControls::on`](crate::TrackballControls::on)) and the whole
//! registry is torn down by `dispose`.

/// Notifications emitted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    /// A gesture began (pointer down, or a wheel tick).
    Start,
    /// The camera pose changed (`update` moved it, or `reset` restored it).
    Change,
    /// A gesture ended (pointer up/cancel, or a wheel tick).
    End,
}

/// Handle identifying a registered listener so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(ControlEvent)>;

/// Owned subscription list: boxed `FnMut` callbacks invoked synchronously,
/// in registration order, on the thread that calls `emit`.
#[derive(Default)]
pub struct EventEmitter {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl EventEmitter {
    /// Create an empty emitter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a listener and return its removal handle.
    #[must_use]
    pub fn on(&mut self, listener: impl FnMut(ControlEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener by handle. Returns `false` if it was already gone.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Invoke every listener with `event`.
    pub fn emit(&mut self, event: ControlEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    /// Drop all listeners.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

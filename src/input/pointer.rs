//! Active pointer bookkeeping for multi-touch gestures.
//!
//! Pointers are kept in press order; two-finger geometry (pinch distance,
//! pan midpoint) always reads the first two. Removal by an id that was
//! never tracked is a silent no-op.

use glam::Vec2;
use rustc_hash::FxHashMap;

use super::event::PointerId;

/// Press-ordered set of active pointers with last-known positions.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    /// Press order; the first two entries drive two-finger geometry.
    order: Vec<PointerId>,
    /// Last known surface position per pointer.
    positions: FxHashMap<PointerId, Vec2>,
}

impl PointerTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pressed pointer. Re-adding an active id keeps its slot.
    pub fn add(&mut self, id: PointerId) {
        if !self.order.contains(&id) {
            self.order.push(id);
        }
    }

    /// Remove a released pointer and forget its position.
    pub fn remove(&mut self, id: PointerId) {
        self.order.retain(|p| *p != id);
        let _ = self.positions.remove(&id);
    }

    /// Create or update the stored position for a pointer.
    pub fn track(&mut self, id: PointerId, position: Vec2) {
        let _ = self.positions.insert(id, position);
    }

    /// Last known position of a pointer, if tracked.
    #[must_use]
    pub fn position(&self, id: PointerId) -> Option<Vec2> {
        self.positions.get(&id).copied()
    }

    /// Position of whichever of the first two pointers is NOT `id`.
    ///
    /// Used to measure inter-finger distance during two-finger gestures.
    #[must_use]
    pub fn other_position(&self, id: PointerId) -> Option<Vec2> {
        let first = *self.order.first()?;
        let other = if first == id { *self.order.get(1)? } else { first };
        self.position(other)
    }

    /// First pointer in press order.
    #[must_use]
    pub fn first(&self) -> Option<PointerId> {
        self.order.first().copied()
    }

    /// Positions of the first two pointers in press order.
    #[must_use]
    pub fn first_two_positions(&self) -> Option<(Vec2, Vec2)> {
        let a = self.position(*self.order.first()?)?;
        let b = self.position(*self.order.get(1)?)?;
        Some((a, b))
    }

    /// Number of active pointers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no pointer is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Forget every pointer.
    pub fn clear(&mut self) {
        self.order.clear();
        self.positions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> PointerId {
        PointerId(n)
    }

    #[test]
    fn press_order_survives_middle_removal() {
        let mut tracker = PointerTracker::new();
        tracker.add(id(1));
        tracker.add(id(2));
        tracker.add(id(3));
        tracker.remove(id(2));

        assert_eq!(tracker.len(), 2);
        assert_eq!(tracker.first(), Some(id(1)));
    }

    #[test]
    fn duplicate_add_keeps_single_slot() {
        let mut tracker = PointerTracker::new();
        tracker.add(id(7));
        tracker.add(id(7));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn remove_untracked_is_a_no_op() {
        let mut tracker = PointerTracker::new();
        tracker.add(id(1));
        tracker.remove(id(99));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn other_position_picks_the_partner_finger() {
        let mut tracker = PointerTracker::new();
        tracker.add(id(1));
        tracker.track(id(1), Vec2::new(10.0, 0.0));
        tracker.add(id(2));
        tracker.track(id(2), Vec2::new(50.0, 0.0));

        // From the first finger's perspective, the partner is the second.
        assert_eq!(tracker.other_position(id(1)), Some(Vec2::new(50.0, 0.0)));
        assert_eq!(tracker.other_position(id(2)), Some(Vec2::new(10.0, 0.0)));

        // A third finger resolves against the first.
        tracker.add(id(3));
        tracker.track(id(3), Vec2::new(0.0, 99.0));
        assert_eq!(tracker.other_position(id(3)), Some(Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn other_position_requires_two_pointers() {
        let mut tracker = PointerTracker::new();
        tracker.add(id(1));
        tracker.track(id(1), Vec2::ZERO);
        assert_eq!(tracker.other_position(id(1)), None);
    }

    #[test]
    fn track_updates_existing_position() {
        let mut tracker = PointerTracker::new();
        tracker.add(id(4));
        tracker.track(id(4), Vec2::new(1.0, 1.0));
        tracker.track(id(4), Vec2::new(2.0, 3.0));
        assert_eq!(tracker.position(id(4)), Some(Vec2::new(2.0, 3.0)));
    }
}

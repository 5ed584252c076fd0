//! Simulation entities: the player, monsters, bullets and pickup items.
//!
//! Entities hold their own per-instance state and expose pure `update` functions;
//! the managers in [`crate::systems`] own the collections they live in.

pub mod archetype;
pub mod bullet;
pub mod item;
pub mod monster;
pub mod player;

use std::fmt;

use glam::Vec2;

/// A stable identifier, unique within one collection for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out monotonically increasing [`EntityId`]s.
#[derive(Debug, Default, Clone)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Circle-vs-circle overlap: centers strictly closer than the sum of the radii.
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance(b) < radius_a + radius_b
}

/// Clamps `value` into `[low, high]`, collapsing to the midpoint when the range is inverted.
pub(crate) fn clamp_axis(value: f32, low: f32, high: f32) -> f32 {
    if high < low {
        (low + high) / 2.0
    } else {
        value.clamp(low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_allocator_is_monotonic() {
        let mut ids = IdAllocator::default();
        assert_eq!(ids.allocate(), EntityId(0));
        assert_eq!(ids.allocate(), EntityId(1));
        assert_eq!(ids.allocate(), EntityId(2));
    }

    #[test]
    fn test_circles_touching_do_not_overlap() {
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.99, 0.0), 5.0));
    }

    #[test]
    fn test_clamp_axis_inverted_range() {
        assert_eq!(clamp_axis(3.0, 10.0, 0.0), 5.0);
        assert_eq!(clamp_axis(-4.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_axis(14.0, 0.0, 10.0), 10.0);
    }
}

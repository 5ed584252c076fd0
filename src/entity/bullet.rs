use glam::Vec2;

use crate::entity::archetype::{BulletArchetype, BulletKind};
use crate::entity::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulletOwner {
    Player,
    Monster,
}

/// A pending mid-flight course change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnDirective {
    /// Distance from the launch point after which the bullet turns, in pixels.
    pub distance: f32,
    /// The new heading, in radians.
    pub angle: f32,
}

/// A single projectile.
///
/// Destroyed bullets stay in their collection until the next bullet pass compacts it,
/// so every consumer has to check [`Bullet::is_destroyed`] first.
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub id: EntityId,
    pub kind: BulletKind,
    pub owner: BulletOwner,
    pub position: Vec2,
    origin: Vec2,
    velocity: Vec2,
    turn: Option<TurnDirective>,
    turned: bool,
    destroyed: bool,
}

impl Bullet {
    /// Creates a bullet moving at its archetype speed along `angle` (radians, 0 = right).
    pub fn new(id: EntityId, kind: BulletKind, owner: BulletOwner, position: Vec2, angle: f32) -> Self {
        Self {
            id,
            kind,
            owner,
            position,
            origin: position,
            velocity: Vec2::from_angle(angle) * kind.archetype().speed,
            turn: None,
            turned: false,
            destroyed: false,
        }
    }

    pub fn with_turn(mut self, turn: TurnDirective) -> Self {
        self.turn = Some(turn);
        self
    }

    /// Advances the bullet and applies its turn once the launch point is far enough behind.
    ///
    /// Returns true on the frame the turn happens.
    pub fn update(&mut self, dt_ms: f32) -> bool {
        if self.destroyed {
            return false;
        }

        self.position += self.velocity * (dt_ms / 1000.0);

        match self.turn {
            Some(turn) if !self.turned && self.origin.distance(self.position) >= turn.distance => {
                self.velocity = Vec2::from_angle(turn.angle) * self.archetype().speed;
                self.turned = true;
                true
            }
            _ => false,
        }
    }

    pub fn archetype(&self) -> &'static BulletArchetype {
        self.kind.archetype()
    }

    pub fn radius(&self) -> f32 {
        self.archetype().radius
    }

    pub fn damage(&self) -> u32 {
        self.archetype().damage
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Current heading in radians.
    pub fn heading(&self) -> f32 {
        self.velocity.to_angle()
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn turn(&self) -> Option<TurnDirective> {
        self.turn
    }

    pub fn has_turned(&self) -> bool {
        self.turned
    }

    pub fn is_ultimate(&self) -> bool {
        self.kind == BulletKind::Ultimate
    }

    pub fn mark_destroyed(&mut self) {
        self.destroyed = true;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// True when the bullet is more than `margin` pixels outside the viewport.
    pub fn is_outside(&self, viewport: Vec2, margin: f32) -> bool {
        self.position.x < -margin
            || self.position.y < -margin
            || self.position.x > viewport.x + margin
            || self.position.y > viewport.y + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_bullet_moves_along_angle() {
        let mut bullet = Bullet::new(EntityId(0), BulletKind::Mob, BulletOwner::Monster, Vec2::ZERO, PI);
        bullet.update(1000.0);
        assert!((bullet.position.x + 300.0).abs() < 1e-3);
        assert!(bullet.position.y.abs() < 1e-3);
    }

    #[test]
    fn test_destroyed_bullet_does_not_move() {
        let mut bullet = Bullet::new(EntityId(0), BulletKind::Player, BulletOwner::Player, Vec2::ZERO, 0.0);
        bullet.mark_destroyed();
        bullet.update(1000.0);
        assert_eq!(bullet.position, Vec2::ZERO);
    }

    #[test]
    fn test_is_outside_respects_margin() {
        let mut bullet = Bullet::new(EntityId(0), BulletKind::Player, BulletOwner::Player, Vec2::ZERO, 0.0);
        let viewport = Vec2::new(100.0, 100.0);
        bullet.position = Vec2::new(-40.0, 50.0);
        assert!(!bullet.is_outside(viewport, 50.0));
        bullet.position = Vec2::new(151.0, 50.0);
        assert!(bullet.is_outside(viewport, 50.0));
    }
}

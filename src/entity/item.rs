use glam::Vec2;
use strum_macros::{AsRefStr, Display};

use crate::constants::{collider, item};
use crate::entity::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ItemKind {
    /// Adds one shot to the player's spread, or grants bonus energy once the spread is maxed.
    MultiShot,
}

impl ItemKind {
    pub fn visual_key(self) -> &'static str {
        match self {
            ItemKind::MultiShot => "item-multi-shot",
        }
    }
}

/// Visibility toggling that accelerates as an item approaches expiry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blinking {
    pub timer: f32,
    pub interval: f32,
    pub hidden: bool,
}

impl Blinking {
    pub fn new(interval: f32) -> Self {
        Self {
            timer: 0.0,
            interval,
            hidden: false,
        }
    }

    /// Accumulates time and toggles visibility whenever the interval elapses.
    pub fn tick(&mut self, dt_ms: f32) {
        if self.interval <= 0.0 {
            return;
        }
        self.timer += dt_ms;
        while self.timer >= self.interval {
            // Subtracting keeps partial progress toward the next toggle
            self.timer -= self.interval;
            self.hidden = !self.hidden;
        }
    }
}

/// A pickup dropped by a killed monster.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: EntityId,
    pub kind: ItemKind,
    pub position: Vec2,
    elapsed_ms: f32,
    lifetime_ms: f32,
    blink_start_ms: f32,
    blinking: Option<Blinking>,
    expired: bool,
}

impl Item {
    pub fn new(id: EntityId, kind: ItemKind, position: Vec2, lifetime_ms: f32, blink_start_ms: f32) -> Self {
        Self {
            id,
            kind,
            position,
            elapsed_ms: 0.0,
            lifetime_ms,
            blink_start_ms,
            blinking: None,
            expired: false,
        }
    }

    /// Drifts left, ages, and blinks faster the closer the item gets to expiring.
    pub fn update(&mut self, dt_ms: f32) {
        if self.expired {
            return;
        }

        self.position.x -= item::ITEM_SPEED * (dt_ms / 1000.0);
        self.elapsed_ms += dt_ms;

        if self.elapsed_ms >= self.lifetime_ms {
            self.expired = true;
            return;
        }

        if self.elapsed_ms >= self.blink_start_ms {
            let interval = self.blink_interval();
            // Only the part of this frame past the blink threshold counts
            let in_window = (self.elapsed_ms - self.blink_start_ms).min(dt_ms);
            let blinking = self.blinking.get_or_insert_with(|| Blinking::new(interval));
            blinking.interval = interval;
            blinking.tick(in_window);
        }
    }

    /// Linear ramp from the slow interval at blink start to the fast interval at expiry.
    fn blink_interval(&self) -> f32 {
        let window = (self.lifetime_ms - self.blink_start_ms).max(f32::EPSILON);
        let progress = ((self.elapsed_ms - self.blink_start_ms) / window).clamp(0.0, 1.0);
        item::ITEM_BLINK_SLOW_MS + (item::ITEM_BLINK_FAST_MS - item::ITEM_BLINK_SLOW_MS) * progress
    }

    pub fn is_visible(&self) -> bool {
        !self.blinking.is_some_and(|blinking| blinking.hidden)
    }

    pub fn is_blinking(&self) -> bool {
        self.blinking.is_some()
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn is_off_screen(&self) -> bool {
        self.position.x < item::ITEM_DESPAWN_X
    }

    pub fn radius(&self) -> f32 {
        collider::ITEM_RADIUS
    }
}

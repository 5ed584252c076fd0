//! Static archetype tables for bullets and monsters.

use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter};

use crate::constants::UNIT_SIZE;

/// Immutable description of a bullet type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletArchetype {
    /// Visual key handed to the renderer.
    pub key: &'static str,
    /// Pixels per second.
    pub speed: f32,
    pub damage: u32,
    /// Hit radius, in pixels.
    pub radius: f32,
    /// Display size in units; `0.0` means the sprite is drawn unscaled.
    pub unit_size: f32,
    pub frame_count: u8,
}

pub const PLAYER_BULLET: BulletArchetype = BulletArchetype {
    key: "player-bullet",
    speed: 800.0,
    damage: 1,
    radius: 10.0,
    unit_size: 0.0,
    frame_count: 2,
};

pub const MOB_BULLET: BulletArchetype = BulletArchetype {
    key: "mob-bullet",
    speed: 300.0,
    damage: 1,
    radius: 16.0,
    unit_size: 0.6,
    frame_count: 1,
};

/// Shares the player bullet sprite; the renderer tints it gold.
pub const ULTIMATE_BULLET: BulletArchetype = BulletArchetype {
    key: "player-bullet",
    speed: 1200.0,
    damage: 3,
    radius: 24.0,
    unit_size: 0.5,
    frame_count: 2,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum BulletKind {
    Player,
    Mob,
    Ultimate,
}

impl BulletKind {
    pub fn archetype(self) -> &'static BulletArchetype {
        match self {
            BulletKind::Player => &PLAYER_BULLET,
            BulletKind::Mob => &MOB_BULLET,
            BulletKind::Ultimate => &ULTIMATE_BULLET,
        }
    }
}

/// Movement behavior of a monster archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum BehaviorTag {
    /// Constant leftward drift.
    Straight,
    /// Leftward drift with a vertical sine sway, firing rings on a timer.
    Sine,
    /// Dash toward a point ahead, rest, fire fans, repeat.
    Dash,
    /// Park near the right edge, patrol vertically, cast random skills.
    Boss,
}

/// Immutable description of a monster type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonsterArchetype {
    pub key: &'static str,
    pub max_hp: u32,
    /// Contact damage listed for the archetype. Body hits on the player use the fixed
    /// collision damage from [`crate::constants::mechanics`].
    pub collision_damage: u32,
    /// Pixels per second.
    pub speed: f32,
    /// Score credited when the monster is killed.
    pub reward: u32,
    pub unit_size: f32,
    pub frame_count: u8,
    pub behavior: BehaviorTag,
    /// Milliseconds between timed attacks; `0.0` means attacks are event-triggered.
    pub attack_interval_ms: f32,
}

impl MonsterArchetype {
    /// Display edge length, in pixels.
    pub fn display_size(&self) -> f32 {
        self.unit_size * UNIT_SIZE
    }

    /// Hit radius, in pixels.
    pub fn radius(&self) -> f32 {
        self.display_size() / 2.0
    }
}

pub const SCOUT: MonsterArchetype = MonsterArchetype {
    key: "mob-scout",
    max_hp: 5,
    collision_damage: 3,
    speed: 250.0,
    reward: 5,
    unit_size: 0.8,
    frame_count: 1,
    behavior: BehaviorTag::Straight,
    attack_interval_ms: 0.0,
};

pub const SMALL: MonsterArchetype = MonsterArchetype {
    key: "mob-small",
    max_hp: 15,
    collision_damage: 5,
    speed: 150.0,
    reward: 10,
    unit_size: 1.0,
    frame_count: 1,
    behavior: BehaviorTag::Sine,
    attack_interval_ms: 3000.0,
};

pub const MEDIUM: MonsterArchetype = MonsterArchetype {
    key: "mob-medium",
    max_hp: 50,
    collision_damage: 10,
    speed: 100.0,
    reward: 25,
    unit_size: 4.0,
    frame_count: 1,
    behavior: BehaviorTag::Dash,
    attack_interval_ms: 0.0,
};

pub const BOSS: MonsterArchetype = MonsterArchetype {
    key: "mob-boss",
    max_hp: 800,
    collision_damage: 20,
    speed: 100.0,
    reward: 200,
    unit_size: 3.0,
    frame_count: 1,
    behavior: BehaviorTag::Boss,
    attack_interval_ms: 2000.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum MonsterKind {
    Scout,
    Small,
    Medium,
    Boss,
}

impl MonsterKind {
    pub fn archetype(self) -> &'static MonsterArchetype {
        match self {
            MonsterKind::Scout => &SCOUT,
            MonsterKind::Small => &SMALL,
            MonsterKind::Medium => &MEDIUM,
            MonsterKind::Boss => &BOSS,
        }
    }

    pub fn is_boss(self) -> bool {
        self.archetype().behavior == BehaviorTag::Boss
    }

    /// Every kind the timed spawner may pick from.
    pub fn regular() -> impl Iterator<Item = MonsterKind> {
        MonsterKind::iter().filter(|kind| !kind.is_boss())
    }
}

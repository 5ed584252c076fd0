use bevy_ecs::event::Event;
use glam::Vec2;

use crate::entity::archetype::MonsterKind;
use crate::entity::item::ItemKind;
use crate::entity::monster::AttackKind;
use crate::entity::EntityId;

/// What hurt the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageSource {
    Bullet,
    Collision,
}

/// Notifications raised during a tick for the host (sound, effects, HUD).
///
/// They accumulate until the host calls [`Game::drain_events`](crate::game::Game::drain_events).
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum FrameEvent {
    MonsterSpawned {
        id: EntityId,
        kind: MonsterKind,
    },
    BossSpawned {
        id: EntityId,
    },
    MonsterKilled {
        id: EntityId,
        kind: MonsterKind,
        position: Vec2,
        reward: u32,
    },
    /// The monster left the playfield without being killed.
    MonsterEscaped {
        id: EntityId,
    },
    Attack {
        monster: EntityId,
        kind: AttackKind,
    },
    PlayerDamaged {
        amount: u32,
        source: DamageSource,
        hp: u32,
    },
    ItemPickedUp {
        kind: ItemKind,
        converted_to_energy: bool,
    },
    UltimateActivated,
    UltimateEnded,
    /// Terminal. No further ticks run until the session is reset.
    PlayerDied {
        survival_ms: f32,
    },
}

//! Read-only views of the session handed to the host for drawing.

use bitflags::bitflags;
use glam::Vec2;

use crate::constants::mechanics;
use crate::entity::archetype::{BulletKind, MonsterKind};
use crate::entity::item::ItemKind;
use crate::entity::player::Player;
use crate::entity::EntityId;
use crate::systems::{BulletManager, ItemManager, MonsterManager, SessionState};

bitflags! {
    /// Tint and alpha hints for the renderer.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RenderFlags: u8 {
        /// Red tint after taking damage.
        const HIT_FLASH = 1 << 0;
        /// Skip this frame; set while an expiring item blinks.
        const HIDDEN = 1 << 1;
        /// Gold tint for ultimate bullets, and for the ship while the ultimate runs.
        const ULTIMATE = 1 << 2;
        const INVULNERABLE = 1 << 3;
        /// Play the death fade.
        const DYING = 1 << 4;
    }
}

/// Draw order, lowest first.
pub mod layer {
    pub const MONSTER: u8 = 5;
    pub const ITEM: u8 = 6;
    pub const PLAYER_BULLET: u8 = 7;
    pub const MOB_BULLET: u8 = 9;
    pub const PLAYER: u8 = 10;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Player,
    Monster(MonsterKind),
    Bullet(BulletKind),
    Item(ItemKind),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSnapshot {
    /// `None` for the player, which is unique.
    pub id: Option<EntityId>,
    pub kind: SpriteKind,
    pub layer: u8,
    pub visual_key: &'static str,
    pub position: Vec2,
    /// Radians, 0 = facing right.
    pub rotation: f32,
    /// Display size in units; `0.0` means unscaled.
    pub scale_units: f32,
    pub frame_count: u8,
    pub flags: RenderFlags,
}

/// Every drawable entity, sorted by layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub sprites: Vec<SpriteSnapshot>,
}

impl Snapshot {
    pub fn capture(player: &Player, monsters: &MonsterManager, bullets: &BulletManager, items: &ItemManager) -> Self {
        let mut sprites = Vec::with_capacity(1 + monsters.monsters().len() + bullets.bullets().len() + items.len());

        let mut player_flags = RenderFlags::empty();
        player_flags.set(RenderFlags::ULTIMATE, player.is_ultimate_active());
        player_flags.set(RenderFlags::INVULNERABLE, player.is_invulnerable());
        sprites.push(SpriteSnapshot {
            id: None,
            kind: SpriteKind::Player,
            layer: layer::PLAYER,
            visual_key: "player",
            position: player.position,
            rotation: 0.0,
            scale_units: mechanics::PLAYER_HALF_SIZE_UNITS * 2.0,
            frame_count: 1,
            flags: player_flags,
        });

        for monster in monsters.monsters() {
            let archetype = monster.archetype();
            let mut flags = RenderFlags::empty();
            flags.set(RenderFlags::HIT_FLASH, monster.is_flashing());
            flags.set(RenderFlags::DYING, !monster.is_alive());
            sprites.push(SpriteSnapshot {
                id: Some(monster.id),
                kind: SpriteKind::Monster(monster.kind),
                layer: layer::MONSTER,
                visual_key: archetype.key,
                position: monster.position,
                rotation: 0.0,
                scale_units: archetype.unit_size,
                frame_count: archetype.frame_count,
                flags,
            });
        }

        for item in items.items() {
            let mut flags = RenderFlags::empty();
            flags.set(RenderFlags::HIDDEN, !item.is_visible());
            sprites.push(SpriteSnapshot {
                id: Some(item.id),
                kind: SpriteKind::Item(item.kind),
                layer: layer::ITEM,
                visual_key: item.kind.visual_key(),
                position: item.position,
                rotation: 0.0,
                scale_units: 0.0,
                frame_count: 1,
                flags,
            });
        }

        for bullet in bullets.live() {
            let archetype = bullet.archetype();
            let layer = match bullet.kind {
                BulletKind::Mob => layer::MOB_BULLET,
                BulletKind::Player | BulletKind::Ultimate => layer::PLAYER_BULLET,
            };
            let mut flags = RenderFlags::empty();
            flags.set(RenderFlags::ULTIMATE, bullet.is_ultimate());
            sprites.push(SpriteSnapshot {
                id: Some(bullet.id),
                kind: SpriteKind::Bullet(bullet.kind),
                layer,
                visual_key: archetype.key,
                position: bullet.position,
                rotation: bullet.heading(),
                scale_units: archetype.unit_size,
                frame_count: archetype.frame_count,
                flags,
            });
        }

        // Stable, so entities on one layer keep their spawn order
        sprites.sort_by_key(|sprite| sprite.layer);
        Self { sprites }
    }

    pub fn of_kind(&self, kind: SpriteKind) -> impl Iterator<Item = &SpriteSnapshot> {
        self.sprites.iter().filter(move |sprite| sprite.kind == kind)
    }
}

/// Scalar values for the heads-up display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub hp: u32,
    pub max_hp: u32,
    pub energy: u32,
    pub max_energy: u32,
    pub multi_shot: u32,
    pub ultimate_active: bool,
    pub survival_ms: f32,
    pub score: u64,
    pub kills: u32,
    pub live_monsters: usize,
    pub live_bullets: usize,
}

impl Hud {
    pub fn capture(player: &Player, session: &SessionState, monsters: &MonsterManager, bullets: &BulletManager) -> Self {
        Self {
            hp: player.hp(),
            max_hp: player.max_hp(),
            energy: player.energy(),
            max_energy: player.max_energy(),
            multi_shot: player.multi_shot(),
            ultimate_active: player.is_ultimate_active(),
            survival_ms: session.survival_ms,
            score: session.score,
            kills: session.kills,
            live_monsters: monsters.alive_count(),
            live_bullets: bullets.live_count(),
        }
    }

    /// Whole seconds survived, as shown on the timer.
    pub fn survival_seconds(&self) -> u64 {
        (self.survival_ms / 1000.0) as u64
    }
}

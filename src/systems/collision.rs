//! Cross-manager combat resolution.
//!
//! The stages run in a fixed order and each one only sees bullets that earlier stages
//! left alive, so a bullet destroyed in one stage never has a second effect.

use bevy_ecs::event::EventWriter;
use bevy_ecs::system::{Res, ResMut};
use glam::Vec2;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::constants::mechanics;
use crate::entity::archetype::MonsterKind;
use crate::entity::bullet::BulletOwner;
use crate::entity::circles_overlap;
use crate::entity::item::ItemKind;
use crate::entity::player::Player;
use crate::entity::EntityId;
use crate::events::{DamageSource, FrameEvent};
use crate::systems::bullets::BulletManager;
use crate::systems::components::{PickupBonus, SessionState};
use crate::systems::items::ItemManager;
use crate::systems::monsters::MonsterManager;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kill {
    pub id: EntityId,
    pub kind: MonsterKind,
    pub position: Vec2,
    pub reward: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pickup {
    pub kind: ItemKind,
    pub converted_to_energy: bool,
}

/// Outcome of one resolution pass.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CollisionReport {
    pub neutralized: u32,
    pub hits: u32,
    pub kills: SmallVec<[Kill; 4]>,
    pub bullet_damage: u32,
    pub collision_damage: u32,
    pub pickups: SmallVec<[Pickup; 2]>,
}

/// Ultimate bullets erase enemy bullets they touch. Ultimate bullets are never consumed.
pub fn neutralize_enemy_bullets(bullets: &mut BulletManager) -> u32 {
    let ultimates: SmallVec<[(Vec2, f32); 8]> = bullets
        .ultimate_bullets()
        .map(|bullet| (bullet.position, bullet.radius()))
        .collect();
    if ultimates.is_empty() {
        return 0;
    }

    let mut neutralized = 0;
    for bullet in bullets.bullets_mut() {
        if bullet.is_destroyed() || bullet.owner != BulletOwner::Monster {
            continue;
        }
        let hit = ultimates
            .iter()
            .any(|&(position, radius)| circles_overlap(position, radius, bullet.position, bullet.radius()));
        if hit {
            bullet.mark_destroyed();
            neutralized += 1;
        }
    }
    neutralized
}

/// Player bullets damage the first living monster they overlap and are destroyed on that hit.
///
/// Every landed hit grants energy. Killed monsters drop an item at their last position.
pub fn resolve_player_bullets(
    bullets: &mut BulletManager,
    monsters: &mut MonsterManager,
    items: &mut ItemManager,
    player: &mut Player,
    report: &mut CollisionReport,
) {
    for bullet in bullets.bullets_mut() {
        if bullet.is_destroyed() || bullet.owner != BulletOwner::Player {
            continue;
        }

        let Some(monster) = monsters
            .alive_mut()
            .find(|monster| circles_overlap(bullet.position, bullet.radius(), monster.position, monster.radius()))
        else {
            continue;
        };

        bullet.mark_destroyed();
        report.hits += 1;
        player.add_energy(mechanics::ENERGY_PER_HIT);

        if monster.take_damage(bullet.damage()) {
            let kill = Kill {
                id: monster.id,
                kind: monster.kind,
                position: monster.position,
                reward: monster.archetype().reward,
            };
            debug!(id = %kill.id, kind = %kill.kind, reward = kill.reward, "Monster killed");
            items.spawn(ItemKind::MultiShot, kill.position);
            report.kills.push(kill);
        }
    }
}

/// Enemy bullets always hurt; there is no invulnerability against them.
pub fn resolve_monster_bullets(bullets: &mut BulletManager, player: &mut Player, report: &mut CollisionReport) {
    let (position, radius) = (player.position, player.radius());
    for bullet in bullets.bullets_mut() {
        if bullet.is_destroyed() || bullet.owner != BulletOwner::Monster {
            continue;
        }
        if circles_overlap(position, radius, bullet.position, bullet.radius()) {
            bullet.mark_destroyed();
            report.bullet_damage += player.take_bullet_damage();
        }
    }
}

/// Collects every item touching the player. Multi-shot upgrades turn into energy once maxed.
pub fn resolve_pickups(items: &mut ItemManager, player: &mut Player, bonus_energy: u32, report: &mut CollisionReport) {
    while let Some(kind) = items.check_player_pickup(player.position, player.radius()) {
        let converted_to_energy = match kind {
            ItemKind::MultiShot => {
                if player.is_multi_shot_maxed() {
                    player.add_energy(bonus_energy);
                    true
                } else {
                    player.add_multi_shot(1);
                    false
                }
            }
        };
        trace!(%kind, converted_to_energy, multi_shot = player.multi_shot(), "Item picked up");
        report.pickups.push(Pickup {
            kind,
            converted_to_energy,
        });
    }
}

/// Body contact costs fixed damage and opens the invulnerability window.
///
/// Only one collision is applied per window, however many monsters overlap.
pub fn resolve_body_collisions(monsters: &MonsterManager, player: &mut Player, report: &mut CollisionReport) {
    if player.is_invulnerable() {
        return;
    }

    let touching = monsters
        .alive()
        .any(|monster| circles_overlap(player.position, player.radius(), monster.position, monster.radius()));
    if touching {
        report.collision_damage += player.take_collision_damage();
        player.start_invulnerability();
    }
}

/// Runs every stage in order and returns what happened.
pub fn resolve_collisions(
    player: &mut Player,
    monsters: &mut MonsterManager,
    bullets: &mut BulletManager,
    items: &mut ItemManager,
    bonus_energy: u32,
) -> CollisionReport {
    let mut report = CollisionReport {
        neutralized: neutralize_enemy_bullets(bullets),
        ..Default::default()
    };
    resolve_player_bullets(bullets, monsters, items, player, &mut report);
    resolve_monster_bullets(bullets, player, &mut report);
    resolve_pickups(items, player, bonus_energy, &mut report);
    resolve_body_collisions(monsters, player, &mut report);
    report
}

pub fn collision_system(
    bonus: Res<PickupBonus>,
    mut player: ResMut<Player>,
    mut monsters: ResMut<MonsterManager>,
    mut bullets: ResMut<BulletManager>,
    mut items: ResMut<ItemManager>,
    mut session: ResMut<SessionState>,
    mut events: EventWriter<FrameEvent>,
) {
    let report = resolve_collisions(&mut player, &mut monsters, &mut bullets, &mut items, bonus.0);

    for kill in report.kills.iter() {
        session.score += u64::from(kill.reward);
        session.kills += 1;
        events.write(FrameEvent::MonsterKilled {
            id: kill.id,
            kind: kill.kind,
            position: kill.position,
            reward: kill.reward,
        });
    }

    for (amount, source) in [
        (report.bullet_damage, DamageSource::Bullet),
        (report.collision_damage, DamageSource::Collision),
    ] {
        if amount > 0 {
            events.write(FrameEvent::PlayerDamaged {
                amount,
                source,
                hp: player.hp(),
            });
        }
    }

    for pickup in report.pickups {
        events.write(FrameEvent::ItemPickedUp {
            kind: pickup.kind,
            converted_to_energy: pickup.converted_to_energy,
        });
    }
}

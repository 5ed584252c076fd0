use glam::Vec2;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use stg_sim::entity::archetype::{BulletKind, MonsterKind};
use stg_sim::entity::bullet::BulletOwner;
use stg_sim::entity::item::ItemKind;
use stg_sim::systems::collision::{resolve_collisions, CollisionReport, Pickup};

mod common;

use common::{rng, Arena, VIEWPORT};

const BONUS: u32 = 50;
const MONSTER_AT: Vec2 = Vec2::new(800.0, 540.0);

impl Arena {
    fn resolve(&mut self) -> CollisionReport {
        resolve_collisions(
            &mut self.player,
            &mut self.monsters,
            &mut self.bullets,
            &mut self.items,
            BONUS,
        )
    }

    fn player_shots_at(&mut self, position: Vec2, count: usize) {
        for _ in 0..count {
            self.bullets
                .fire(BulletKind::Player, BulletOwner::Player, position, 0.0, None);
        }
    }
}

#[test]
fn test_player_bullets_wear_down_and_kill_monster() {
    let mut arena = Arena::new(Vec2::new(200.0, 540.0));
    let id = arena.monsters.spawn_at(MonsterKind::Small, MONSTER_AT, &mut rng());

    arena.player_shots_at(MONSTER_AT, 3);
    let report = arena.resolve();
    assert_that(&report.hits).is_equal_to(3);
    assert_that(&report.kills.len()).is_equal_to(0);
    let monster = arena.monsters.get(id).expect("monster should still exist");
    assert_that(&monster.hp()).is_equal_to(12);
    assert_that(&monster.is_alive()).is_true();
    assert_that(&arena.player.energy()).is_equal_to(3);

    arena.player_shots_at(MONSTER_AT, 12);
    let report = arena.resolve();
    assert_that(&report.hits).is_equal_to(12);
    assert_that(&report.kills.len()).is_equal_to(1);
    assert_eq!(report.kills[0].id, id);
    assert_eq!(report.kills[0].reward, 10);
    assert_that(&arena.player.energy()).is_equal_to(15);

    // One drop, exactly where the monster died
    assert_that(&arena.items.len()).is_equal_to(1);
    assert_eq!(arena.items.items()[0].position, MONSTER_AT);
    assert_eq!(arena.items.items()[0].kind, ItemKind::MultiShot);

    // Every bullet that hit was consumed
    assert_that(&arena.bullets.live_count()).is_equal_to(0);
}

#[test]
fn test_surplus_bullets_pass_dying_monster() {
    let mut arena = Arena::new(Vec2::new(200.0, 540.0));
    arena.monsters.spawn_at(MonsterKind::Scout, MONSTER_AT, &mut rng());

    arena.player_shots_at(MONSTER_AT, 8);
    let report = arena.resolve();

    assert_that(&report.hits).is_equal_to(5);
    assert_that(&report.kills.len()).is_equal_to(1);
    assert_that(&arena.bullets.live_count()).is_equal_to(3);
}

#[test]
fn test_kill_is_reported_once() {
    let mut arena = Arena::new(Vec2::new(200.0, 540.0));
    arena.monsters.spawn_at(MonsterKind::Scout, MONSTER_AT, &mut rng());

    arena.player_shots_at(MONSTER_AT, 5);
    assert_that(&arena.resolve().kills.len()).is_equal_to(1);
    arena.player_shots_at(MONSTER_AT, 5);
    assert_that(&arena.resolve().kills.len()).is_equal_to(0);
    assert_that(&arena.items.len()).is_equal_to(1);
}

#[test]
fn test_ultimate_neutralizes_enemy_bullets() {
    let spot = Vec2::new(1000.0, 300.0);
    let mut arena = Arena::new(spot);
    let ultimate = arena.bullets.fire_ultimate(spot, 0.0);
    arena.bullets.fire(BulletKind::Mob, BulletOwner::Monster, spot, 0.0, None);
    arena.bullets.fire(BulletKind::Mob, BulletOwner::Monster, spot + Vec2::new(5.0, 5.0), 0.0, None);

    let report = arena.resolve();

    assert_that(&report.neutralized).is_equal_to(2);
    // Neutralized bullets never reach the player
    assert_that(&report.bullet_damage).is_equal_to(0);
    assert_that(&arena.player.hp()).is_equal_to(200);
    // The ultimate bullet keeps going
    assert!(arena.bullets.get(ultimate).is_some_and(|bullet| !bullet.is_destroyed()));
    assert_that(&arena.bullets.monster_bullets().count()).is_equal_to(0);
}

#[test]
fn test_ultimate_is_consumed_by_monster() {
    let mut arena = Arena::new(Vec2::new(200.0, 540.0));
    arena.monsters.spawn_at(MonsterKind::Medium, MONSTER_AT, &mut rng());
    let ultimate = arena.bullets.fire_ultimate(MONSTER_AT, 0.0);

    let report = arena.resolve();

    assert_that(&report.hits).is_equal_to(1);
    assert!(arena.bullets.get(ultimate).is_some_and(|bullet| bullet.is_destroyed()));
}

#[test]
fn test_enemy_bullet_damages_once() {
    let spot = Vec2::new(500.0, 500.0);
    let mut arena = Arena::new(spot);
    arena.bullets.fire(BulletKind::Mob, BulletOwner::Monster, spot, 0.0, None);

    let report = arena.resolve();
    assert_that(&report.bullet_damage).is_equal_to(1);
    assert_that(&arena.player.hp()).is_equal_to(199);

    let report = arena.resolve();
    assert_that(&report.bullet_damage).is_equal_to(0);
    assert_that(&arena.player.hp()).is_equal_to(199);
}

#[test]
fn test_enemy_bullet_hits_at_sprite_edge() {
    let spot = Vec2::new(500.0, 500.0);
    let mut arena = Arena::new(spot);
    let id = arena.bullets.fire(BulletKind::Mob, BulletOwner::Monster, spot, 0.0, None);
    let reach = arena.player.radius()
        + arena.bullets.get(id).map(|bullet| bullet.radius()).unwrap_or_default();

    // One just inside the combined radius, one just outside
    arena.bullets.fire(BulletKind::Mob, BulletOwner::Monster, spot + Vec2::new(reach - 1.0, 0.0), 0.0, None);
    arena.bullets.fire(BulletKind::Mob, BulletOwner::Monster, spot + Vec2::new(reach + 1.0, 0.0), 0.0, None);

    assert_that(&arena.resolve().bullet_damage).is_equal_to(2);
    assert_that(&arena.bullets.monster_bullets().count()).is_equal_to(1);
}

#[test]
fn test_enemy_bullets_ignore_invulnerability() {
    let spot = Vec2::new(500.0, 500.0);
    let mut arena = Arena::new(spot);
    arena.player.start_invulnerability();
    arena.bullets.fire(BulletKind::Mob, BulletOwner::Monster, spot, 0.0, None);

    assert_that(&arena.resolve().bullet_damage).is_equal_to(1);
}

#[test]
fn test_player_bullets_do_not_hit_player() {
    let spot = Vec2::new(500.0, 500.0);
    let mut arena = Arena::new(spot);
    arena.player_shots_at(spot, 3);

    let report = arena.resolve();
    assert_eq!(report, CollisionReport::default());
    assert_that(&arena.bullets.live_count()).is_equal_to(3);
}

#[test]
fn test_pickups_upgrade_then_convert_to_energy() {
    let spot = Vec2::new(500.0, 500.0);
    let mut arena = Arena::new(spot);
    for _ in 0..5 {
        arena.items.spawn(ItemKind::MultiShot, spot);
    }

    let report = arena.resolve();

    let upgrade = Pickup {
        kind: ItemKind::MultiShot,
        converted_to_energy: false,
    };
    let bonus = Pickup {
        kind: ItemKind::MultiShot,
        converted_to_energy: true,
    };
    assert_eq!(report.pickups.to_vec(), vec![upgrade, upgrade, upgrade, upgrade, bonus]);
    assert_that(&arena.player.multi_shot()).is_equal_to(7);
    assert_that(&arena.player.energy()).is_equal_to(BONUS);
    assert_that(&arena.items.is_empty()).is_true();
}

#[test]
fn test_distant_item_is_not_picked_up() {
    let mut arena = Arena::new(Vec2::new(500.0, 500.0));
    arena.items.spawn(ItemKind::MultiShot, Vec2::new(700.0, 500.0));

    assert_that(&arena.resolve().pickups.len()).is_equal_to(0);
    assert_that(&arena.items.len()).is_equal_to(1);
}

#[test]
fn test_body_collision_opens_invulnerability_window() {
    let spot = Vec2::new(500.0, 500.0);
    let mut arena = Arena::new(spot);
    arena.monsters.spawn_at(MonsterKind::Scout, spot, &mut rng());

    assert_that(&arena.resolve().collision_damage).is_equal_to(3);
    assert_that(&arena.player.hp()).is_equal_to(197);

    arena.player.update(499.0, VIEWPORT);
    assert_that(&arena.resolve().collision_damage).is_equal_to(0);

    arena.player.update(1.0, VIEWPORT);
    assert_that(&arena.resolve().collision_damage).is_equal_to(3);
    assert_that(&arena.player.hp()).is_equal_to(194);
}

#[test]
fn test_overlapping_monsters_deal_one_collision() {
    let spot = Vec2::new(500.0, 500.0);
    let mut arena = Arena::new(spot);
    let mut rng = rng();
    arena.monsters.spawn_at(MonsterKind::Scout, spot, &mut rng);
    arena.monsters.spawn_at(MonsterKind::Medium, spot + Vec2::new(10.0, 0.0), &mut rng);

    let report = arena.resolve();
    assert_that(&report.collision_damage).is_equal_to(3);
    assert_that(&arena.player.hp()).is_equal_to(197);
}

#[test]
fn test_dying_monster_has_no_body() {
    let spot = Vec2::new(500.0, 500.0);
    let mut arena = Arena::new(spot);
    let id = arena.monsters.spawn_at(MonsterKind::Scout, spot, &mut rng());
    if let Some(monster) = arena.monsters.get_mut(id) {
        monster.take_damage(5);
    }

    assert_that(&arena.resolve().collision_damage).is_equal_to(0);
}

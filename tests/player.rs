use glam::Vec2;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use stg_sim::constants::UNIT_SIZE;

mod common;

use common::{player_at, VIEWPORT};

#[test]
fn test_player_moves_toward_target() {
    let mut player = player_at(Vec2::new(500.0, 500.0));
    player.set_target_position(Some(Vec2::new(900.0, 500.0)));
    player.update(100.0, VIEWPORT);

    // 800 px/s for 100 ms
    assert_that(&common::approx(player.position.x, 580.0, 1e-3)).is_true();
    assert_that(&player.position.y).is_equal_to(500.0);
}

#[test]
fn test_player_does_not_overshoot_target() {
    let mut player = player_at(Vec2::new(500.0, 500.0));
    player.set_target_position(Some(Vec2::new(520.0, 500.0)));
    player.update(1000.0, VIEWPORT);
    assert_eq!(player.position, Vec2::new(520.0, 500.0));
}

#[test]
fn test_player_stops_within_arrive_threshold() {
    let mut player = player_at(Vec2::new(500.0, 500.0));
    player.set_target_position(Some(Vec2::new(503.0, 501.0)));
    player.update(100.0, VIEWPORT);
    assert_eq!(player.position, Vec2::new(500.0, 500.0));
}

#[test]
fn test_player_holds_position_without_target() {
    let mut player = player_at(Vec2::new(500.0, 500.0));
    player.set_target_position(None);
    player.update(100.0, VIEWPORT);
    assert_eq!(player.position, Vec2::new(500.0, 500.0));
}

#[test]
fn test_player_is_clamped_to_viewport() {
    let mut player = player_at(Vec2::new(500.0, 500.0));
    player.set_target_position(Some(Vec2::new(-1000.0, 500.0)));
    player.update(1000.0, VIEWPORT);
    assert_that(&player.position.x).is_equal_to(UNIT_SIZE);

    player.set_target_position(Some(Vec2::new(500.0, 5000.0)));
    player.update(10_000.0, VIEWPORT);
    assert_that(&player.position.y).is_equal_to(VIEWPORT.y - UNIT_SIZE);
}

#[test]
fn test_damage_amounts() {
    let mut player = player_at(Vec2::ZERO);
    player.take_bullet_damage();
    assert_that(&player.hp()).is_equal_to(199);
    player.take_collision_damage();
    assert_that(&player.hp()).is_equal_to(196);
}

#[test]
fn test_hp_never_underflows() {
    let mut player = player_at(Vec2::ZERO);
    for _ in 0..67 {
        player.take_collision_damage();
    }
    assert_that(&player.hp()).is_equal_to(0);
    assert_that(&player.is_dead()).is_true();
    assert_that(&player.take_bullet_damage()).is_equal_to(0);
}

#[test]
fn test_energy_is_capped() {
    let mut player = player_at(Vec2::ZERO);
    player.add_energy(450);
    player.add_energy(100);
    assert_that(&player.energy()).is_equal_to(500);
}

#[test]
fn test_activate_ultimate_requires_full_energy() {
    let mut player = player_at(Vec2::ZERO);
    player.add_energy(499);
    assert_that(&player.activate_ultimate()).is_false();
    assert_that(&player.is_ultimate_active()).is_false();
    assert_that(&player.energy()).is_equal_to(499);

    player.add_energy(1);
    assert_that(&player.activate_ultimate()).is_true();
    assert_that(&player.activate_ultimate()).is_false();
}

#[test]
fn test_add_energy_is_ignored_during_ultimate() {
    let mut player = player_at(Vec2::ZERO);
    player.add_energy(500);
    player.activate_ultimate();
    player.update_energy_drain(20.0);
    player.add_energy(10);
    assert_that(&player.energy()).is_equal_to(499);
}

#[test]
fn test_energy_drains_one_point_per_interval() {
    let mut player = player_at(Vec2::ZERO);
    player.add_energy(500);
    player.activate_ultimate();

    player.update_energy_drain(10.0);
    assert_that(&player.energy()).is_equal_to(500);
    player.update_energy_drain(10.0);
    assert_that(&player.energy()).is_equal_to(499);
    player.update_energy_drain(45.0);
    assert_that(&player.energy()).is_equal_to(497);
}

#[test]
fn test_energy_is_monotonic_until_ultimate_ends() {
    let mut player = player_at(Vec2::ZERO);
    player.add_energy(500);
    assert_that(&player.activate_ultimate()).is_true();

    let mut elapsed = 0.0_f32;
    let mut previous = player.energy();
    let mut endings = 0;
    while elapsed < 12_000.0 {
        if player.update_energy_drain(16.0) {
            endings += 1;
        }
        elapsed += 16.0;

        let energy = player.energy();
        assert!(energy <= previous, "energy rose from {previous} to {energy}");
        if player.is_ultimate_active() {
            let expected = 500 - (elapsed / 20.0).floor() as u32;
            assert_eq!(energy, expected);
        }
        previous = energy;
    }

    assert_eq!(endings, 1);
    assert_that(&player.energy()).is_equal_to(0);
    assert_that(&player.is_ultimate_active()).is_false();
}

#[test]
fn test_drain_is_idle_without_ultimate() {
    let mut player = player_at(Vec2::ZERO);
    player.add_energy(300);
    assert_that(&player.update_energy_drain(1000.0)).is_false();
    assert_that(&player.energy()).is_equal_to(300);
}

#[test]
fn test_multi_shot_is_capped() {
    let mut player = player_at(Vec2::ZERO);
    assert_that(&player.multi_shot()).is_equal_to(3);
    assert_that(&player.add_multi_shot(10)).is_true();
    assert_that(&player.multi_shot()).is_equal_to(7);
    assert_that(&player.is_multi_shot_maxed()).is_true();
    assert_that(&player.add_multi_shot(1)).is_false();
}

#[test]
fn test_invulnerability_window_counts_down() {
    let mut player = player_at(Vec2::ZERO);
    player.start_invulnerability();
    player.update(499.0, VIEWPORT);
    assert_that(&player.is_invulnerable()).is_true();
    player.update(1.0, VIEWPORT);
    assert_that(&player.is_invulnerable()).is_false();
}

#[test]
fn test_fire_cadence() {
    let mut player = player_at(Vec2::new(500.0, 500.0));
    assert_that(&player.tick_fire(false)).is_false();
    assert_that(&player.tick_fire(true)).is_true();

    player.update(100.0, VIEWPORT);
    assert_that(&player.tick_fire(true)).is_false();
    player.update(50.0, VIEWPORT);
    assert_that(&player.tick_fire(true)).is_true();
}

#[test]
fn test_muzzle_is_ahead_of_ship() {
    let player = player_at(Vec2::new(500.0, 500.0));
    assert_eq!(player.muzzle(), Vec2::new(500.0 + UNIT_SIZE / 2.0, 500.0));
}

#[test]
fn test_reset_restores_initial_state() {
    let mut player = player_at(Vec2::new(500.0, 500.0));
    player.set_target_position(Some(Vec2::new(900.0, 900.0)));
    player.update(100.0, VIEWPORT);
    player.take_collision_damage();
    player.add_energy(500);
    player.activate_ultimate();
    player.add_multi_shot(2);

    player.reset();

    assert_eq!(player.position, Vec2::new(500.0, 500.0));
    assert_that(&player.hp()).is_equal_to(200);
    assert_that(&player.energy()).is_equal_to(0);
    assert_that(&player.multi_shot()).is_equal_to(3);
    assert_that(&player.is_ultimate_active()).is_false();
    assert_that(&player.target()).is_none();
}

#[test]
fn test_hit_radius_is_half_the_sprite() {
    let player = player_at(Vec2::new(500.0, 500.0));
    assert_eq!(player.radius(), UNIT_SIZE);
}

use glam::Vec2;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use stg_sim::config::{validate_viewport, SimConfig};
use stg_sim::entity::player::PlayerTuning;
use stg_sim::error::ConfigError;

#[test]
fn test_default_config_is_valid() {
    let config = SimConfig::default();
    assert_that(&config.validate()).is_ok();
    assert_eq!(config.viewport, Vec2::new(1920.0, 1080.0));
    assert_that(&config.spawn_interval_ms).is_equal_to(2000.0);
    assert_that(&config.boss_trigger_ms).is_equal_to(30_000.0);
}

#[test]
fn test_builders_override_fields() {
    let config = SimConfig::default()
        .with_seed(9)
        .with_viewport(800.0, 600.0)
        .with_spawn_interval(500.0)
        .with_boss_trigger(1500.0)
        .with_max_hp(10)
        .with_max_energy(20);

    assert_that(&config.seed).is_equal_to(9);
    assert_eq!(config.viewport, Vec2::new(800.0, 600.0));
    assert_that(&config.spawn_interval_ms).is_equal_to(500.0);
    assert_that(&config.boss_trigger_ms).is_equal_to(1500.0);
    assert_that(&config.max_hp).is_equal_to(10);
    assert_that(&config.max_energy).is_equal_to(20);
}

#[test]
fn test_tuning_follows_config() {
    let tuning = PlayerTuning::from(&SimConfig::default().with_max_hp(10).with_max_energy(20));
    assert_that(&tuning.max_hp).is_equal_to(10);
    assert_that(&tuning.max_energy).is_equal_to(20);
}

#[test]
fn test_rejects_non_positive_values() {
    let result = SimConfig::default().with_spawn_interval(0.0).validate();
    assert_eq!(
        result,
        Err(ConfigError::NonPositive {
            field: "spawn_interval_ms",
            value: 0.0,
        })
    );

    assert!(SimConfig::default().with_max_hp(0).validate().is_err());
    assert!(SimConfig::default().with_boss_trigger(f32::NAN).validate().is_err());
}

#[test]
fn test_rejects_inverted_multi_shot_range() {
    let config = SimConfig {
        min_multi_shot: 8,
        ..SimConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvertedRange { field: "multi_shot", .. })
    ));
}

#[test]
fn test_rejects_blink_after_lifetime() {
    let config = SimConfig {
        item_blink_start_ms: 9000.0,
        ..SimConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvertedRange { field: "item_blink", .. })
    ));
}

#[test]
fn test_viewport_validation() {
    assert_that(&validate_viewport(Vec2::new(1280.0, 720.0))).is_ok();
    assert_that(&validate_viewport(Vec2::new(0.0, 720.0))).is_err();
    assert_that(&validate_viewport(Vec2::new(1280.0, -1.0))).is_err();
    assert_that(&validate_viewport(Vec2::new(f32::INFINITY, 720.0))).is_err();
}

#[test]
fn test_error_messages() {
    let error = validate_viewport(Vec2::new(0.0, 720.0)).unwrap_err();
    assert_eq!(error.to_string(), "Viewport must be finite and positive, got 0x720");
}

//! Per-session tunables.
//!
//! Defaults mirror [`crate::constants`]; hosts and tests override individual values
//! through the `with_*` builders before constructing a [`Game`](crate::game::Game).

use glam::Vec2;

use crate::constants::{self, item, mechanics, spawn};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub viewport: Vec2,
    /// Seed for the session RNG. Identical seeds and delta sequences replay identically.
    pub seed: u64,
    pub spawn_interval_ms: f32,
    pub boss_trigger_ms: f32,
    pub fire_interval_ms: f32,
    pub max_hp: u32,
    pub max_energy: u32,
    pub min_multi_shot: u32,
    pub max_multi_shot: u32,
    pub multi_shot_energy_bonus: u32,
    pub energy_drain_interval_ms: f32,
    pub invulnerability_ms: f32,
    pub item_lifetime_ms: f32,
    pub item_blink_start_ms: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            viewport: constants::DEFAULT_VIEWPORT,
            seed: 0x5EED,
            spawn_interval_ms: spawn::SPAWN_INTERVAL_MS,
            boss_trigger_ms: spawn::BOSS_TRIGGER_MS,
            fire_interval_ms: mechanics::FIRE_INTERVAL_MS,
            max_hp: mechanics::MAX_HP,
            max_energy: mechanics::MAX_ENERGY,
            min_multi_shot: mechanics::MIN_MULTI_SHOT,
            max_multi_shot: mechanics::MAX_MULTI_SHOT,
            multi_shot_energy_bonus: mechanics::MULTI_SHOT_ENERGY_BONUS,
            energy_drain_interval_ms: mechanics::ENERGY_DRAIN_INTERVAL_MS,
            invulnerability_ms: mechanics::INVULNERABILITY_MS,
            item_lifetime_ms: item::ITEM_LIFETIME_MS,
            item_blink_start_ms: item::ITEM_BLINK_START_MS,
        }
    }
}

impl SimConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Vec2::new(width, height);
        self
    }

    pub fn with_spawn_interval(mut self, ms: f32) -> Self {
        self.spawn_interval_ms = ms;
        self
    }

    pub fn with_boss_trigger(mut self, ms: f32) -> Self {
        self.boss_trigger_ms = ms;
        self
    }

    pub fn with_max_hp(mut self, hp: u32) -> Self {
        self.max_hp = hp;
        self
    }

    pub fn with_max_energy(mut self, energy: u32) -> Self {
        self.max_energy = energy;
        self
    }

    /// Checks every tunable, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_viewport(self.viewport)?;

        positive("spawn_interval_ms", self.spawn_interval_ms)?;
        positive("boss_trigger_ms", self.boss_trigger_ms)?;
        positive("fire_interval_ms", self.fire_interval_ms)?;
        positive("max_hp", self.max_hp as f32)?;
        positive("max_energy", self.max_energy as f32)?;
        positive("min_multi_shot", self.min_multi_shot as f32)?;
        positive("energy_drain_interval_ms", self.energy_drain_interval_ms)?;
        positive("invulnerability_ms", self.invulnerability_ms)?;
        positive("item_lifetime_ms", self.item_lifetime_ms)?;
        positive("item_blink_start_ms", self.item_blink_start_ms)?;

        if self.min_multi_shot > self.max_multi_shot {
            return Err(ConfigError::InvertedRange {
                field: "multi_shot",
                min: self.min_multi_shot as f32,
                max: self.max_multi_shot as f32,
            });
        }
        if self.item_blink_start_ms > self.item_lifetime_ms {
            return Err(ConfigError::InvertedRange {
                field: "item_blink",
                min: self.item_blink_start_ms,
                max: self.item_lifetime_ms,
            });
        }

        Ok(())
    }
}

/// A viewport is usable when both dimensions are finite and strictly positive.
pub fn validate_viewport(viewport: Vec2) -> Result<(), ConfigError> {
    if viewport.is_finite() && viewport.x > 0.0 && viewport.y > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidViewport {
            width: viewport.x,
            height: viewport.y,
        })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // NaN fails this comparison too
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

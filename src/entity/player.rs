use bevy_ecs::resource::Resource;
use glam::Vec2;
use tracing::{debug, trace};

use crate::config::SimConfig;
use crate::constants::{collider, mechanics, UNIT_SIZE};
use crate::entity::clamp_axis;

/// Player limits and timings, copied out of the session config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTuning {
    pub max_hp: u32,
    pub max_energy: u32,
    pub min_multi_shot: u32,
    pub max_multi_shot: u32,
    pub energy_drain_interval_ms: f32,
    pub invulnerability_ms: f32,
    pub fire_interval_ms: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self::from(&SimConfig::default())
    }
}

impl From<&SimConfig> for PlayerTuning {
    fn from(config: &SimConfig) -> Self {
        Self {
            max_hp: config.max_hp,
            max_energy: config.max_energy,
            min_multi_shot: config.min_multi_shot,
            max_multi_shot: config.max_multi_shot,
            energy_drain_interval_ms: config.energy_drain_interval_ms,
            invulnerability_ms: config.invulnerability_ms,
            fire_interval_ms: config.fire_interval_ms,
        }
    }
}

/// The player ship.
///
/// Movement follows a pointer target, health and energy are bounded counters, and the
/// ultimate is a two-state machine: once activated it drains energy on a fixed cadence
/// and switches itself off when the bar is empty.
#[derive(Resource, Debug, Clone)]
pub struct Player {
    pub position: Vec2,
    spawn: Vec2,
    tuning: PlayerTuning,
    hp: u32,
    energy: u32,
    ultimate_active: bool,
    multi_shot: u32,
    target: Option<Vec2>,
    invulnerable_ms: f32,
    drain_accumulator_ms: f32,
    fire_cooldown_ms: f32,
}

impl Player {
    pub fn new(spawn: Vec2, tuning: PlayerTuning) -> Self {
        Self {
            position: spawn,
            spawn,
            tuning,
            hp: tuning.max_hp,
            energy: 0,
            ultimate_active: false,
            multi_shot: tuning.min_multi_shot,
            target: None,
            invulnerable_ms: 0.0,
            drain_accumulator_ms: 0.0,
            fire_cooldown_ms: 0.0,
        }
    }

    /// The spawn point for a viewport: left quarter, vertically centered.
    pub fn spawn_point(viewport: Vec2) -> Vec2 {
        Vec2::new(viewport.x * 0.25, viewport.y / 2.0)
    }

    /// Restores the state of a freshly created player at its spawn point.
    pub fn reset(&mut self) {
        *self = Self::new(self.spawn, self.tuning);
    }

    pub fn set_target_position(&mut self, target: Option<Vec2>) {
        self.target = target;
    }

    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    /// Moves toward the target and counts down the collision invulnerability window.
    pub fn update(&mut self, dt_ms: f32, viewport: Vec2) {
        self.invulnerable_ms = (self.invulnerable_ms - dt_ms).max(0.0);
        self.fire_cooldown_ms = (self.fire_cooldown_ms - dt_ms).max(0.0);

        let Some(target) = self.target else {
            return;
        };

        let offset = target - self.position;
        let distance = offset.length();
        if distance < mechanics::ARRIVE_THRESHOLD {
            return;
        }

        let step = mechanics::PLAYER_SPEED * (dt_ms / 1000.0);
        let ratio = (step / distance).min(1.0);
        let next = self.position + offset * ratio;

        let half = UNIT_SIZE * mechanics::PLAYER_HALF_SIZE_UNITS;
        self.position = Vec2::new(
            clamp_axis(next.x, half, viewport.x - half),
            clamp_axis(next.y, half, viewport.y - half),
        );
    }

    /// Returns true when a volley is due. Holding fire re-arms the cooldown after each volley.
    pub fn tick_fire(&mut self, fire_held: bool) -> bool {
        if !fire_held || self.fire_cooldown_ms > 0.0 {
            return false;
        }
        self.fire_cooldown_ms = self.tuning.fire_interval_ms;
        true
    }

    /// Where the player's bullets leave the ship.
    pub fn muzzle(&self) -> Vec2 {
        self.position + Vec2::new(UNIT_SIZE * mechanics::MUZZLE_OFFSET_UNITS, 0.0)
    }

    pub fn take_bullet_damage(&mut self) -> u32 {
        self.apply_damage(mechanics::BULLET_DAMAGE)
    }

    pub fn take_collision_damage(&mut self) -> u32 {
        self.apply_damage(mechanics::COLLISION_DAMAGE)
    }

    fn apply_damage(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.hp);
        self.hp -= applied;
        trace!(amount, hp = self.hp, "Player damaged");
        applied
    }

    /// Starts the window during which body collisions are ignored.
    pub fn start_invulnerability(&mut self) {
        self.invulnerable_ms = self.tuning.invulnerability_ms;
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ms > 0.0
    }

    /// Adds energy up to the maximum. Has no effect while the ultimate is active.
    pub fn add_energy(&mut self, amount: u32) {
        if self.ultimate_active {
            return;
        }
        self.energy = (self.energy + amount).min(self.tuning.max_energy);
    }

    /// Activates the ultimate if the energy bar is full and it is not already running.
    pub fn activate_ultimate(&mut self) -> bool {
        if self.ultimate_active || self.energy < self.tuning.max_energy {
            return false;
        }
        self.ultimate_active = true;
        self.drain_accumulator_ms = 0.0;
        debug!(energy = self.energy, "Ultimate activated");
        true
    }

    /// Drains one energy point per drain interval while the ultimate is active.
    ///
    /// Returns true on the call that empties the bar and switches the ultimate off.
    pub fn update_energy_drain(&mut self, dt_ms: f32) -> bool {
        if !self.ultimate_active {
            return false;
        }

        self.drain_accumulator_ms += dt_ms;
        while self.drain_accumulator_ms >= self.tuning.energy_drain_interval_ms && self.energy > 0 {
            self.drain_accumulator_ms -= self.tuning.energy_drain_interval_ms;
            self.energy -= 1;
        }

        if self.energy == 0 {
            self.ultimate_active = false;
            self.drain_accumulator_ms = 0.0;
            debug!("Ultimate depleted");
            return true;
        }
        false
    }

    /// Raises the multi-shot count, capped at the maximum. Returns true if it changed.
    pub fn add_multi_shot(&mut self, amount: u32) -> bool {
        let before = self.multi_shot;
        self.multi_shot = (self.multi_shot + amount).min(self.tuning.max_multi_shot);
        self.multi_shot != before
    }

    pub fn is_multi_shot_maxed(&self) -> bool {
        self.multi_shot >= self.tuning.max_multi_shot
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.tuning.max_hp
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn max_energy(&self) -> u32 {
        self.tuning.max_energy
    }

    pub fn multi_shot(&self) -> u32 {
        self.multi_shot
    }

    pub fn is_ultimate_active(&self) -> bool {
        self.ultimate_active
    }

    pub fn radius(&self) -> f32 {
        collider::PLAYER_RADIUS
    }
}

//! This module contains all the constants used by the simulation.

use std::time::Duration;

use glam::Vec2;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The largest frame delta the real-time clock will report, in milliseconds.
pub const MAX_FRAME_STEP_MS: f32 = 100.0;

/// The fixed height of the playfield, in pixels.
pub const GAME_HEIGHT: f32 = 1080.0;
/// The reference width of the playfield, in pixels. The real width follows the host viewport.
pub const BASE_WIDTH: f32 = 1920.0;
/// One display unit: 10% of the playfield height.
pub const UNIT_SIZE: f32 = GAME_HEIGHT * 0.1;

/// The default viewport handed to a fresh session.
pub const DEFAULT_VIEWPORT: Vec2 = Vec2::new(BASE_WIDTH, GAME_HEIGHT);

pub mod mechanics {
    /// Player movement speed, in pixels per second.
    pub const PLAYER_SPEED: f32 = 800.0;
    /// The player stops once it is closer than this to its target, in pixels.
    pub const ARRIVE_THRESHOLD: f32 = 5.0;
    /// Half of the player's display size, in units. Used for clamping to the viewport.
    pub const PLAYER_HALF_SIZE_UNITS: f32 = 1.0;

    pub const MAX_HP: u32 = 200;
    pub const MAX_ENERGY: u32 = 500;

    pub const BULLET_DAMAGE: u32 = 1;
    pub const COLLISION_DAMAGE: u32 = 3;

    /// While the ultimate is active, one point of energy is drained every interval.
    pub const ENERGY_DRAIN_INTERVAL_MS: f32 = 20.0;
    pub const INVULNERABILITY_MS: f32 = 500.0;

    pub const MIN_MULTI_SHOT: u32 = 3;
    pub const MAX_MULTI_SHOT: u32 = 7;
    /// Energy granted instead of a multi-shot upgrade once multi-shot is maxed.
    pub const MULTI_SHOT_ENERGY_BONUS: u32 = 50;
    /// Energy granted per player bullet that lands.
    pub const ENERGY_PER_HIT: u32 = 1;

    pub const FIRE_INTERVAL_MS: f32 = 150.0;
    /// Horizontal offset of the gun from the ship's center, in units.
    pub const MUZZLE_OFFSET_UNITS: f32 = 0.5;
}

pub mod collider {
    use super::{mechanics, UNIT_SIZE};

    /// Half the shorter side of the player's two-unit sprite.
    pub const PLAYER_RADIUS: f32 = UNIT_SIZE * mechanics::PLAYER_HALF_SIZE_UNITS;
    pub const ITEM_RADIUS: f32 = 20.0;
}

pub mod spawn {
    pub const SPAWN_INTERVAL_MS: f32 = 2000.0;
    pub const BOSS_TRIGGER_MS: f32 = 30_000.0;
    /// Regular monsters appear this far past the right edge.
    pub const SPAWN_OFFSET_X: f32 = 50.0;
    pub const BOSS_SPAWN_OFFSET_X: f32 = 100.0;
    /// Vertical spawn band keeps this distance from the top and bottom edges.
    pub const SPAWN_MARGIN_Y: f32 = 100.0;
    /// Monsters further left than this are dropped without reward.
    pub const DESPAWN_X: f32 = -100.0;
}

pub mod behavior {
    use std::f32::consts::PI;

    /// Radians per second; one full sine period every two seconds.
    pub const SINE_FREQUENCY: f32 = PI;

    pub const DASH_DISTANCE_UNITS: f32 = 3.0;
    pub const DASH_SPREAD_DEG: i32 = 45;
    pub const DASH_SPEED_MULTIPLIER: f32 = 2.0;
    pub const DASH_ARRIVE_THRESHOLD: f32 = 5.0;
    pub const DASH_REST_MS: f32 = 1000.0;
    pub const DASH_FAN_INTERVAL_MS: f32 = 200.0;
    pub const DASH_FAN_WAVES: u8 = 3;

    /// The boss parks at this fraction of the viewport width.
    pub const BOSS_STOP_RATIO: f32 = 0.75;
    /// Extra clearance added to the boss's half-height when picking patrol targets.
    pub const BOSS_MARGIN_PAD: f32 = 50.0;
    pub const BOSS_ARRIVE_THRESHOLD: f32 = 5.0;

    pub const HIT_FLASH_MS: f32 = 100.0;
    pub const DYING_MS: f32 = 200.0;
}

pub mod pattern {
    pub const CIRCLE_COUNT: u32 = 8;
    pub const FAN_SPREAD_DEG: f32 = 60.0;
    pub const FAN_COUNT: u32 = 5;

    /// Player spread: degrees between adjacent shots at launch and after turning.
    pub const SPREAD_FIRE_STEP_DEG: f32 = 10.0;
    pub const SPREAD_TURN_STEP_DEG: f32 = 1.0;
    pub const SPREAD_TURN_UNITS: f32 = 2.0;

    pub const ULTIMATE_ANGLES_DEG: [f32; 3] = [-10.0, 0.0, 10.0];

    pub const BOSS_BURST_SPREAD_DEG: f32 = 120.0;
    pub const BOSS_BURST_COUNT: u32 = 15;

    pub const BOSS_WAVE_BULLETS: u32 = 16;
    pub const BOSS_WAVE_REPEATS: u32 = 5;
    pub const BOSS_WAVE_INTERVAL_MS: f32 = 150.0;

    pub const BOSS_SPIRAL_ARMS: u32 = 4;
    pub const BOSS_SPIRAL_STEPS: u32 = 12;
    pub const BOSS_SPIRAL_INTERVAL_MS: f32 = 80.0;
    pub const BOSS_SPIRAL_STEP_DEG: f32 = 15.0;

    /// Bullets this far outside the viewport are culled.
    pub const CULL_MARGIN: f32 = 50.0;
}

pub mod item {
    /// Items drift left, in pixels per second.
    pub const ITEM_SPEED: f32 = 100.0;
    pub const ITEM_LIFETIME_MS: f32 = 8000.0;
    pub const ITEM_BLINK_START_MS: f32 = 5000.0;
    /// Blink toggle interval right after blinking starts, and right before expiry.
    pub const ITEM_BLINK_SLOW_MS: f32 = 250.0;
    pub const ITEM_BLINK_FAST_MS: f32 = 60.0;
    pub const ITEM_DESPAWN_X: f32 = -50.0;
}

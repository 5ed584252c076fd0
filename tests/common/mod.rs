#![allow(dead_code)]

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use stg_sim::config::SimConfig;
use stg_sim::entity::player::{Player, PlayerTuning};
use stg_sim::events::FrameEvent;
use stg_sim::game::Game;
use stg_sim::systems::{BulletManager, ItemManager, MonsterManager};

pub const VIEWPORT: Vec2 = Vec2::new(1920.0, 1080.0);

/// A session where nothing spawns on its own.
pub fn quiet_config() -> SimConfig {
    SimConfig::default()
        .with_seed(42)
        .with_spawn_interval(1.0e9)
        .with_boss_trigger(1.0e9)
}

pub fn quiet_game() -> Game {
    Game::new(quiet_config()).expect("quiet config should be valid")
}

pub fn seeded_game(seed: u64) -> Game {
    Game::new(SimConfig::default().with_seed(seed)).expect("default config should be valid")
}

pub fn rng() -> SmallRng {
    SmallRng::seed_from_u64(42)
}

pub fn player_at(position: Vec2) -> Player {
    Player::new(position, PlayerTuning::default())
}

/// Standalone managers for exercising the resolver without a schedule.
pub struct Arena {
    pub player: Player,
    pub monsters: MonsterManager,
    pub bullets: BulletManager,
    pub items: ItemManager,
}

impl Arena {
    pub fn new(player_position: Vec2) -> Self {
        let config = quiet_config();
        Self {
            player: player_at(player_position),
            monsters: MonsterManager::new(&config),
            bullets: BulletManager::new(),
            items: ItemManager::new(&config),
        }
    }
}

/// Ticks in fixed steps until `total_ms` has elapsed, collecting every event raised.
pub fn run_for(game: &mut Game, total_ms: f32, step_ms: f32) -> Vec<FrameEvent> {
    let mut events = Vec::new();
    let mut elapsed = 0.0;
    while elapsed < total_ms {
        game.tick(step_ms).expect("tick should succeed");
        events.extend(game.drain_events());
        elapsed += step_ms;
    }
    events
}

pub fn approx(actual: f32, expected: f32, tolerance: f32) -> bool {
    (actual - expected).abs() <= tolerance
}

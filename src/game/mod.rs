//! This module contains the simulation session and its schedule.

pub mod snapshot;

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::Res;
use bevy_ecs::world::{Mut, World};
use glam::Vec2;
use tracing::{debug, info, warn};

use crate::config::{validate_viewport, SimConfig};
use crate::entity::player::{Player, PlayerTuning};
use crate::error::{GameError, GameResult};
use crate::events::FrameEvent;
use crate::formatter;
use crate::systems::{
    bullet_system, clock_system, collision_system, end_condition_system, item_system, monster_system, player_system,
    BulletManager, DeltaTime, InputState, ItemManager, MonsterManager, PickupBonus, SessionState, SimRng, Viewport,
};

pub use self::snapshot::{Hud, RenderFlags, Snapshot, SpriteKind, SpriteSnapshot};

/// System sets, run in declaration order.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum SimulationSet {
    /// Clock, player, monsters, bullets and items advance.
    Update,
    /// Collisions resolve and the end condition is checked.
    Resolve,
}

/// Result of a successful tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    /// The player died this tick. Further ticks are rejected until [`Game::reset`].
    PlayerDied,
}

/// One simulation session.
///
/// All gameplay state lives in the `World` as resources; the `Schedule` runs the
/// systems in a fixed chained order on a single thread, so a given seed and delta
/// sequence always produce the same run.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
    config: SimConfig,
}

impl Game {
    /// Validates the config and builds a fresh session.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if any tunable is out of range.
    pub fn new(config: SimConfig) -> GameResult<Game> {
        config.validate()?;
        info!(
            seed = config.seed,
            width = config.viewport.x,
            height = config.viewport.y,
            "Starting simulation session"
        );

        let mut world = World::default();
        EventRegistry::register_event::<FrameEvent>(&mut world);
        Self::insert_resources(&mut world, &config);

        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        Self::configure_schedule(&mut schedule);

        Ok(Game { world, schedule, config })
    }

    fn insert_resources(world: &mut World, config: &SimConfig) {
        world.insert_resource(DeltaTime::default());
        world.insert_resource(Viewport(config.viewport));
        world.insert_resource(InputState::default());
        world.insert_resource(SessionState::default());
        world.insert_resource(SimRng::seeded(config.seed));
        world.insert_resource(PickupBonus(config.multi_shot_energy_bonus));
        world.insert_resource(Player::new(Player::spawn_point(config.viewport), PlayerTuning::from(config)));
        world.insert_resource(MonsterManager::new(config));
        world.insert_resource(BulletManager::new());
        world.insert_resource(ItemManager::new(config));
    }

    fn configure_schedule(schedule: &mut Schedule) {
        let running = |session: Res<SessionState>| !session.over;

        schedule
            .add_systems((
                (clock_system, player_system, monster_system, bullet_system, item_system)
                    .chain()
                    .in_set(SimulationSet::Update),
                (collision_system, end_condition_system)
                    .chain()
                    .in_set(SimulationSet::Resolve),
            ))
            .configure_sets((
                SimulationSet::Update.run_if(running),
                SimulationSet::Resolve.after(SimulationSet::Update).run_if(running),
            ));
    }

    /// Advances the simulation by `dt_ms` milliseconds.
    ///
    /// The delta must be finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidState`] if the session already ended.
    pub fn tick(&mut self, dt_ms: f32) -> GameResult<TickStatus> {
        if self.is_over() {
            return Err(GameError::InvalidState("session is over; reset before ticking".to_string()));
        }

        self.world.insert_resource(DeltaTime { ms: dt_ms });
        self.schedule.run(&mut self.world);
        formatter::increment_tick();

        Ok(if self.is_over() {
            TickStatus::PlayerDied
        } else {
            TickStatus::Running
        })
    }

    /// Sets where the ship should fly and whether the fire button is held.
    pub fn set_input(&mut self, target: Option<Vec2>, fire_held: bool) {
        let mut input = self.world.resource_mut::<InputState>();
        input.target = target;
        input.fire_held = fire_held;
    }

    /// Queues an ultimate activation attempt for the next tick.
    pub fn request_ultimate(&mut self) {
        self.world.resource_mut::<InputState>().ultimate_requested = true;
    }

    /// Applies a host resize. Takes effect from the next tick.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if either dimension is not finite and positive;
    /// the previous viewport is kept.
    pub fn set_viewport(&mut self, width: f32, height: f32) -> GameResult<()> {
        let viewport = Vec2::new(width, height);
        if let Err(e) = validate_viewport(viewport) {
            warn!(width, height, "Ignoring invalid viewport");
            return Err(e.into());
        }
        debug!(width, height, "Viewport resized");
        self.world.insert_resource(Viewport(viewport));
        Ok(())
    }

    /// Restores every per-run timer and collection. The viewport and seed stay as they are.
    pub fn reset(&mut self) {
        let viewport = self.viewport();
        info!(seed = self.config.seed, "Resetting session");

        self.world.insert_resource(DeltaTime::default());
        self.world.insert_resource(InputState::default());
        self.world.insert_resource(SessionState::default());
        self.world.insert_resource(SimRng::seeded(self.config.seed));
        self.world
            .insert_resource(Player::new(Player::spawn_point(viewport), PlayerTuning::from(&self.config)));
        self.world.insert_resource(MonsterManager::new(&self.config));
        self.world.insert_resource(BulletManager::new());
        self.world.insert_resource(ItemManager::new(&self.config));
        self.world.resource_mut::<Events<FrameEvent>>().clear();
    }

    /// Takes every event raised since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<FrameEvent> {
        self.world.resource_mut::<Events<FrameEvent>>().drain().collect()
    }

    pub fn hud(&self) -> Hud {
        Hud::capture(self.player(), self.session(), self.monsters(), self.bullets())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.player(), self.monsters(), self.bullets(), self.items())
    }

    pub fn is_over(&self) -> bool {
        self.session().over
    }

    pub fn survival_ms(&self) -> f32 {
        self.session().survival_ms
    }

    pub fn viewport(&self) -> Vec2 {
        self.world.resource::<Viewport>().0
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionState {
        self.world.resource::<SessionState>()
    }

    pub fn player(&self) -> &Player {
        self.world.resource::<Player>()
    }

    pub fn player_mut(&mut self) -> Mut<'_, Player> {
        self.world.resource_mut::<Player>()
    }

    pub fn monsters(&self) -> &MonsterManager {
        self.world.resource::<MonsterManager>()
    }

    pub fn monsters_mut(&mut self) -> Mut<'_, MonsterManager> {
        self.world.resource_mut::<MonsterManager>()
    }

    pub fn bullets(&self) -> &BulletManager {
        self.world.resource::<BulletManager>()
    }

    pub fn bullets_mut(&mut self) -> Mut<'_, BulletManager> {
        self.world.resource_mut::<BulletManager>()
    }

    pub fn items(&self) -> &ItemManager {
        self.world.resource::<ItemManager>()
    }

    pub fn items_mut(&mut self) -> Mut<'_, ItemManager> {
        self.world.resource_mut::<ItemManager>()
    }
}

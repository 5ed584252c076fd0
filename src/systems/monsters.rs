use bevy_ecs::event::EventWriter;
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Res, ResMut};
use glam::Vec2;
use rand::seq::IndexedRandom;
use rand::Rng;
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::config::SimConfig;
use crate::constants::spawn;
use crate::entity::archetype::MonsterKind;
use crate::entity::monster::{AttackRequests, Monster};
use crate::entity::{EntityId, IdAllocator};
use crate::events::FrameEvent;
use crate::systems::bullets::BulletManager;
use crate::systems::components::{DeltaTime, SessionState, SimRng, Viewport};

/// Everything that happened to the monster population during one update.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MonsterUpdate {
    pub attacks: AttackRequests,
    pub spawned: SmallVec<[(EntityId, MonsterKind); 2]>,
    pub escaped: SmallVec<[EntityId; 4]>,
}

/// Owns the monster population and the spawn policy.
#[derive(Resource, Debug)]
pub struct MonsterManager {
    monsters: Vec<Monster>,
    ids: IdAllocator,
    spawn_timer_ms: f32,
    spawn_interval_ms: f32,
    boss_trigger_ms: f32,
    boss_spawned: bool,
}

impl MonsterManager {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            monsters: Vec::new(),
            ids: IdAllocator::default(),
            spawn_timer_ms: 0.0,
            spawn_interval_ms: config.spawn_interval_ms,
            boss_trigger_ms: config.boss_trigger_ms,
            boss_spawned: false,
        }
    }

    /// Spawns on schedule, advances every monster, and drops the ones that left the field.
    ///
    /// `survival_ms` is the session clock, already advanced for this tick.
    pub fn update(&mut self, dt_ms: f32, survival_ms: f32, viewport: Vec2, rng: &mut impl Rng) -> MonsterUpdate {
        let mut report = MonsterUpdate::default();

        self.monsters.retain(|monster| !monster.is_finished());

        self.spawn_timer_ms += dt_ms;
        if self.spawn_timer_ms >= self.spawn_interval_ms {
            self.spawn_timer_ms = 0.0;
            let kinds: SmallVec<[MonsterKind; 4]> = MonsterKind::regular().collect();
            if let Some(&kind) = kinds.choose(rng) {
                let id = self.spawn(kind, viewport, rng);
                report.spawned.push((id, kind));
            }
        }

        if !self.boss_spawned && survival_ms >= self.boss_trigger_ms {
            let id = self.spawn(MonsterKind::Boss, viewport, rng);
            report.spawned.push((id, MonsterKind::Boss));
        }

        for monster in self.monsters.iter_mut() {
            report.attacks.extend(monster.update(dt_ms, viewport, rng));
        }

        self.monsters.retain(|monster| {
            let escaped = monster.is_alive() && monster.position.x < spawn::DESPAWN_X;
            if escaped {
                trace!(id = %monster.id, kind = %monster.kind, "Monster left the field");
                report.escaped.push(monster.id);
            }
            !escaped
        });

        report
    }

    /// Spawns a monster at its kind's entry point: just past the right edge at a random
    /// height, or vertically centered for the boss.
    pub fn spawn(&mut self, kind: MonsterKind, viewport: Vec2, rng: &mut impl Rng) -> EntityId {
        let position = if kind.is_boss() {
            Vec2::new(viewport.x + spawn::BOSS_SPAWN_OFFSET_X, viewport.y / 2.0)
        } else {
            let (low, high) = (spawn::SPAWN_MARGIN_Y, viewport.y - spawn::SPAWN_MARGIN_Y);
            let y = if low < high { rng.random_range(low..=high) } else { viewport.y / 2.0 };
            Vec2::new(viewport.x + spawn::SPAWN_OFFSET_X, y)
        };
        self.spawn_at(kind, position, rng)
    }

    pub fn spawn_at(&mut self, kind: MonsterKind, position: Vec2, rng: &mut impl Rng) -> EntityId {
        let id = self.ids.allocate();
        if kind.is_boss() {
            self.boss_spawned = true;
            info!(id = %id, x = position.x, y = position.y, "Boss spawned");
        } else {
            debug!(id = %id, %kind, x = position.x, y = position.y, "Monster spawned");
        }
        self.monsters.push(Monster::new(id, kind, position, rng));
        id
    }

    /// Monsters that can still be hit, in spawn order.
    pub fn alive(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.iter().filter(|monster| monster.is_alive())
    }

    pub fn alive_mut(&mut self) -> impl Iterator<Item = &mut Monster> {
        self.monsters.iter_mut().filter(|monster| monster.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    /// All monsters, including the ones playing their death effect.
    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn get(&self, id: EntityId) -> Option<&Monster> {
        self.monsters.iter().find(|monster| monster.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Monster> {
        self.monsters.iter_mut().find(|monster| monster.id == id)
    }

    /// Position of a living monster, used by pattern sequences to follow their emitter.
    pub fn position_of(&self, id: EntityId) -> Option<Vec2> {
        self.get(id).filter(|monster| monster.is_alive()).map(|monster| monster.position)
    }

    pub fn boss_spawned(&self) -> bool {
        self.boss_spawned
    }

    pub fn clear(&mut self) {
        self.monsters.clear();
        self.spawn_timer_ms = 0.0;
        self.boss_spawned = false;
    }
}

/// Runs the spawn policy and monster behaviors, handing attack requests to the bullet manager.
pub fn monster_system(
    delta_time: Res<DeltaTime>,
    viewport: Res<Viewport>,
    session: Res<SessionState>,
    mut rng: ResMut<SimRng>,
    mut monsters: ResMut<MonsterManager>,
    mut bullets: ResMut<BulletManager>,
    mut events: EventWriter<FrameEvent>,
) {
    let report = monsters.update(delta_time.ms, session.survival_ms, viewport.0, &mut rng.0);

    for (id, kind) in report.spawned {
        if kind.is_boss() {
            events.write(FrameEvent::BossSpawned { id });
        }
        events.write(FrameEvent::MonsterSpawned { id, kind });
    }

    for request in report.attacks.iter() {
        trace!(monster = %request.monster, kind = %request.kind, "Monster attack");
        bullets.handle_attack(request);
        events.write(FrameEvent::Attack {
            monster: request.monster,
            kind: request.kind,
        });
    }

    for id in report.escaped {
        events.write(FrameEvent::MonsterEscaped { id });
    }
}

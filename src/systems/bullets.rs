use std::f32::consts::{PI, TAU};

use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Res, ResMut};
use glam::Vec2;
use tracing::{debug, trace};

use crate::constants::{pattern, UNIT_SIZE};
use crate::entity::archetype::BulletKind;
use crate::entity::bullet::{Bullet, BulletOwner, TurnDirective};
use crate::entity::monster::{AttackKind, AttackRequest};
use crate::entity::{EntityId, IdAllocator};
use crate::systems::components::{DeltaTime, Viewport};
use crate::systems::monsters::MonsterManager;

/// A boss pattern that keeps emitting over several frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequenceKind {
    Wave { fired: u32 },
    Spiral { step: u32, rotation_deg: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternSequence {
    /// The monster the sequence follows. It is dropped as soon as the emitter is gone.
    pub emitter: EntityId,
    pub kind: SequenceKind,
    timer_ms: f32,
}

impl PatternSequence {
    fn interval_ms(&self) -> f32 {
        match self.kind {
            SequenceKind::Wave { .. } => pattern::BOSS_WAVE_INTERVAL_MS,
            SequenceKind::Spiral { .. } => pattern::BOSS_SPIRAL_INTERVAL_MS,
        }
    }

    fn is_complete(&self) -> bool {
        match self.kind {
            SequenceKind::Wave { fired } => fired >= pattern::BOSS_WAVE_REPEATS,
            SequenceKind::Spiral { step, .. } => step >= pattern::BOSS_SPIRAL_STEPS,
        }
    }
}

/// Owns every bullet in flight and generates the firing patterns.
#[derive(Resource, Debug, Default)]
pub struct BulletManager {
    bullets: Vec<Bullet>,
    sequences: Vec<PatternSequence>,
    ids: IdAllocator,
}

impl BulletManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires a single bullet along `angle` (radians, 0 = right).
    pub fn fire(&mut self, kind: BulletKind, owner: BulletOwner, position: Vec2, angle: f32, turn: Option<TurnDirective>) -> EntityId {
        let id = self.ids.allocate();
        let mut bullet = Bullet::new(id, kind, owner, position, angle);
        if let Some(turn) = turn {
            bullet = bullet.with_turn(turn);
        }
        self.bullets.push(bullet);
        id
    }

    fn fire_mob(&mut self, position: Vec2, angle: f32) {
        self.fire(BulletKind::Mob, BulletOwner::Monster, position, angle, None);
    }

    /// `count` monster bullets evenly spaced over the full circle, the first one pointing right.
    pub fn fire_circle(&mut self, position: Vec2, count: u32) {
        self.fire_circle_from(position, count, 0.0);
    }

    fn fire_circle_from(&mut self, position: Vec2, count: u32, start: f32) {
        if count == 0 {
            return;
        }
        let step = TAU / count as f32;
        for i in 0..count {
            self.fire_mob(position, start + step * i as f32);
        }
    }

    /// `count` monster bullets spread evenly across `spread_deg`, centered on due left.
    pub fn fire_fan(&mut self, position: Vec2, spread_deg: f32, count: u32) {
        let spread = spread_deg.to_radians();
        let (start, step) = if count > 1 {
            (PI - spread / 2.0, spread / (count - 1) as f32)
        } else {
            (PI, 0.0)
        };
        for i in 0..count {
            self.fire_mob(position, start + step * i as f32);
        }
    }

    /// The player's main cannon: a wide spread that converges after two units of travel.
    ///
    /// Shot `i` uses offset `i - shot_count / 2`, fired at `offset * 10°` and turning to
    /// `offset * 1°`.
    pub fn fire_player_spread(&mut self, position: Vec2, shot_count: u32) {
        let center = (shot_count / 2) as i32;
        for i in 0..shot_count as i32 {
            let offset = (i - center) as f32;
            let turn = TurnDirective {
                distance: UNIT_SIZE * pattern::SPREAD_TURN_UNITS,
                angle: (offset * pattern::SPREAD_TURN_STEP_DEG).to_radians(),
            };
            self.fire(
                BulletKind::Player,
                BulletOwner::Player,
                position,
                (offset * pattern::SPREAD_FIRE_STEP_DEG).to_radians(),
                Some(turn),
            );
        }
    }

    pub fn fire_ultimate(&mut self, position: Vec2, angle_deg: f32) -> EntityId {
        self.fire(BulletKind::Ultimate, BulletOwner::Player, position, angle_deg.to_radians(), None)
    }

    /// Four arms, 90 degrees apart, starting at `rotation_deg`.
    pub fn fire_boss_spiral(&mut self, position: Vec2, rotation_deg: f32) {
        self.fire_circle_from(position, pattern::BOSS_SPIRAL_ARMS, rotation_deg.to_radians());
    }

    pub fn fire_boss_burst(&mut self, position: Vec2) {
        self.fire_fan(position, pattern::BOSS_BURST_SPREAD_DEG, pattern::BOSS_BURST_COUNT);
    }

    /// One ring of the wave pattern.
    pub fn fire_boss_wave(&mut self, position: Vec2) {
        self.fire_circle(position, pattern::BOSS_WAVE_BULLETS);
    }

    /// Turns a monster's attack request into bullets, starting a sequence for multi-step patterns.
    pub fn handle_attack(&mut self, request: &AttackRequest) {
        let origin = request.origin;
        match request.kind {
            AttackKind::Circle => self.fire_circle(origin, pattern::CIRCLE_COUNT),
            AttackKind::Fan => self.fire_fan(origin, pattern::FAN_SPREAD_DEG, pattern::FAN_COUNT),
            AttackKind::BossBurst => self.fire_boss_burst(origin),
            AttackKind::BossWave => {
                self.fire_boss_wave(origin);
                self.start_sequence(request.monster, SequenceKind::Wave { fired: 1 });
            }
            AttackKind::BossSpiral => {
                self.fire_boss_spiral(origin, 0.0);
                self.start_sequence(
                    request.monster,
                    SequenceKind::Spiral {
                        step: 1,
                        rotation_deg: pattern::BOSS_SPIRAL_STEP_DEG,
                    },
                );
            }
        }
    }

    fn start_sequence(&mut self, emitter: EntityId, kind: SequenceKind) {
        debug!(emitter = %emitter, ?kind, "Pattern sequence started");
        self.sequences.push(PatternSequence {
            emitter,
            kind,
            timer_ms: 0.0,
        });
    }

    /// Runs one bullet pass.
    ///
    /// Bullets destroyed since the last pass are removed first, then running sequences
    /// emit, then everything moves and bullets that left the viewport are marked destroyed.
    pub fn update(&mut self, dt_ms: f32, viewport: Vec2, emitter_position: impl Fn(EntityId) -> Option<Vec2>) {
        self.bullets.retain(|bullet| !bullet.is_destroyed());

        let mut sequences = std::mem::take(&mut self.sequences);
        sequences.retain_mut(|sequence| {
            let Some(origin) = emitter_position(sequence.emitter) else {
                trace!(emitter = %sequence.emitter, "Pattern sequence cancelled, emitter gone");
                return false;
            };

            sequence.timer_ms += dt_ms;
            while sequence.timer_ms >= sequence.interval_ms() && !sequence.is_complete() {
                sequence.timer_ms -= sequence.interval_ms();
                match &mut sequence.kind {
                    SequenceKind::Wave { fired } => {
                        *fired += 1;
                        self.fire_boss_wave(origin);
                    }
                    SequenceKind::Spiral { step, rotation_deg } => {
                        *step += 1;
                        let rotation = *rotation_deg;
                        *rotation_deg += pattern::BOSS_SPIRAL_STEP_DEG;
                        self.fire_boss_spiral(origin, rotation);
                    }
                }
            }
            !sequence.is_complete()
        });
        // Sequences cannot start during the loop above, so nothing is lost here
        self.sequences = sequences;

        for bullet in self.bullets.iter_mut() {
            bullet.update(dt_ms);
            if bullet.is_outside(viewport, pattern::CULL_MARGIN) {
                bullet.mark_destroyed();
            }
        }
    }

    /// Every stored bullet, including ones already marked destroyed this tick.
    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn bullets_mut(&mut self) -> &mut [Bullet] {
        &mut self.bullets
    }

    pub fn live(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter().filter(|bullet| !bullet.is_destroyed())
    }

    pub fn live_count(&self) -> usize {
        self.live().count()
    }

    pub fn player_bullets(&self) -> impl Iterator<Item = &Bullet> {
        self.live().filter(|bullet| bullet.owner == BulletOwner::Player)
    }

    pub fn monster_bullets(&self) -> impl Iterator<Item = &Bullet> {
        self.live().filter(|bullet| bullet.owner == BulletOwner::Monster)
    }

    pub fn ultimate_bullets(&self) -> impl Iterator<Item = &Bullet> {
        self.live().filter(|bullet| bullet.is_ultimate())
    }

    pub fn get(&self, id: EntityId) -> Option<&Bullet> {
        self.bullets.iter().find(|bullet| bullet.id == id)
    }

    pub fn sequences(&self) -> &[PatternSequence] {
        &self.sequences
    }

    pub fn clear(&mut self) {
        self.bullets.clear();
        self.sequences.clear();
    }
}

/// Moves bullets, advances boss sequences, and culls off-screen bullets.
pub fn bullet_system(
    delta_time: Res<DeltaTime>,
    viewport: Res<Viewport>,
    monsters: Res<MonsterManager>,
    mut bullets: ResMut<BulletManager>,
) {
    bullets.update(delta_time.ms, viewport.0, |id| monsters.position_of(id));
}

//! Monster instances and their behavior state machines.
//!
//! A monster never talks to the bullet manager directly. Its `update` returns the
//! attacks it wants to perform and the session decides how to emit them, which keeps
//! each behavior a pure function of its state, the frame delta, and the RNG.

use glam::Vec2;
use rand::seq::IndexedRandom;
use rand::Rng;
use smallvec::SmallVec;
use strum_macros::{AsRefStr, Display};
use tracing::trace;

use crate::constants::{behavior, UNIT_SIZE};
use crate::entity::archetype::{BehaviorTag, MonsterArchetype, MonsterKind};
use crate::entity::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum AttackKind {
    Circle,
    Fan,
    BossSpiral,
    BossBurst,
    BossWave,
}

impl AttackKind {
    /// Skills the boss picks from uniformly on every attack tick.
    pub const BOSS_SKILLS: [AttackKind; 3] = [AttackKind::BossSpiral, AttackKind::BossBurst, AttackKind::BossWave];
}

/// A monster asking for bullets to be emitted from `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackRequest {
    pub monster: EntityId,
    pub kind: AttackKind,
    pub origin: Vec2,
}

pub type AttackRequests = SmallVec<[AttackRequest; 2]>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashPhase {
    Dashing,
    Resting {
        remaining_ms: f32,
        fan_timer_ms: f32,
        fans_fired: u8,
    },
}

/// Per-instance movement state, one variant per [`BehaviorTag`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    Straight,
    Sine { elapsed_ms: f32, baseline_y: f32 },
    Dash { target: Vec2, phase: DashPhase },
    Boss { entering: bool, target_y: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lifecycle {
    Alive,
    /// Killed; kept around only for the death effect.
    Dying { remaining_ms: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Monster {
    pub id: EntityId,
    pub kind: MonsterKind,
    pub position: Vec2,
    hp: u32,
    behavior: Behavior,
    attack_timer_ms: f32,
    hit_flash_ms: f32,
    lifecycle: Lifecycle,
}

impl Monster {
    pub fn new(id: EntityId, kind: MonsterKind, position: Vec2, rng: &mut impl Rng) -> Self {
        let behavior = match kind.archetype().behavior {
            BehaviorTag::Straight => Behavior::Straight,
            BehaviorTag::Sine => Behavior::Sine {
                elapsed_ms: 0.0,
                baseline_y: position.y,
            },
            BehaviorTag::Dash => Behavior::Dash {
                target: next_dash_target(position, rng),
                phase: DashPhase::Dashing,
            },
            BehaviorTag::Boss => Behavior::Boss {
                entering: true,
                target_y: position.y,
            },
        };

        Self {
            id,
            kind,
            position,
            hp: kind.archetype().max_hp,
            behavior,
            attack_timer_ms: 0.0,
            hit_flash_ms: 0.0,
            lifecycle: Lifecycle::Alive,
        }
    }

    pub fn archetype(&self) -> &'static MonsterArchetype {
        self.kind.archetype()
    }

    /// Advances the behavior by one frame. Dying monsters only count down their effect.
    pub fn update(&mut self, dt_ms: f32, viewport: Vec2, rng: &mut impl Rng) -> AttackRequests {
        let mut attacks = AttackRequests::new();
        self.hit_flash_ms = (self.hit_flash_ms - dt_ms).max(0.0);

        if let Lifecycle::Dying { remaining_ms } = &mut self.lifecycle {
            *remaining_ms -= dt_ms;
            return attacks;
        }

        let archetype = self.kind.archetype();
        let seconds = dt_ms / 1000.0;

        match &mut self.behavior {
            Behavior::Straight => {
                self.position.x -= archetype.speed * seconds;
            }
            Behavior::Sine { elapsed_ms, baseline_y } => {
                *elapsed_ms += dt_ms;
                self.position.x -= archetype.speed * seconds;
                self.position.y = *baseline_y + (*elapsed_ms / 1000.0 * behavior::SINE_FREQUENCY).sin() * UNIT_SIZE;

                if archetype.attack_interval_ms > 0.0 {
                    self.attack_timer_ms += dt_ms;
                    if self.attack_timer_ms >= archetype.attack_interval_ms {
                        self.attack_timer_ms = 0.0;
                        attacks.push(self.attack(AttackKind::Circle));
                    }
                }
            }
            Behavior::Dash { target, phase } => match phase {
                DashPhase::Dashing => {
                    let offset = *target - self.position;
                    let distance = offset.length();
                    if distance < behavior::DASH_ARRIVE_THRESHOLD {
                        trace!(id = %self.id, "Dash finished, resting");
                        *phase = DashPhase::Resting {
                            remaining_ms: behavior::DASH_REST_MS,
                            fan_timer_ms: 0.0,
                            fans_fired: 0,
                        };
                    } else {
                        let step = (archetype.speed * behavior::DASH_SPEED_MULTIPLIER * seconds).min(distance);
                        self.position += offset / distance * step;
                    }
                }
                DashPhase::Resting {
                    remaining_ms,
                    fan_timer_ms,
                    fans_fired,
                } => {
                    *remaining_ms -= dt_ms;

                    if *fans_fired < behavior::DASH_FAN_WAVES {
                        *fan_timer_ms += dt_ms;
                        if *fan_timer_ms >= behavior::DASH_FAN_INTERVAL_MS {
                            *fan_timer_ms = 0.0;
                            *fans_fired += 1;
                            attacks.push(AttackRequest {
                                monster: self.id,
                                kind: AttackKind::Fan,
                                origin: self.position,
                            });
                        }
                    }

                    if *remaining_ms <= 0.0 {
                        *target = next_dash_target(self.position, rng);
                        *phase = DashPhase::Dashing;
                    }
                }
            },
            Behavior::Boss { entering, target_y } => {
                let stop_x = viewport.x * behavior::BOSS_STOP_RATIO;
                if self.position.x > stop_x {
                    self.position.x = (self.position.x - archetype.speed * seconds).max(stop_x);
                } else if *entering {
                    *entering = false;
                    trace!(id = %self.id, x = self.position.x, "Boss reached its post");
                }

                let dy = *target_y - self.position.y;
                if dy.abs() > behavior::BOSS_ARRIVE_THRESHOLD {
                    let step = (archetype.speed * seconds).min(dy.abs());
                    self.position.y += dy.signum() * step;
                } else {
                    *target_y = next_patrol_y(archetype, viewport.y, rng);
                }

                if archetype.attack_interval_ms > 0.0 {
                    self.attack_timer_ms += dt_ms;
                    if self.attack_timer_ms >= archetype.attack_interval_ms {
                        self.attack_timer_ms = 0.0;
                        if let Some(&skill) = AttackKind::BOSS_SKILLS.choose(rng) {
                            attacks.push(self.attack(skill));
                        }
                    }
                }
            }
        }

        attacks
    }

    fn attack(&self, kind: AttackKind) -> AttackRequest {
        AttackRequest {
            monster: self.id,
            kind,
            origin: self.position,
        }
    }

    /// Applies damage and starts the hit flash.
    ///
    /// Returns true exactly once: on the hit that moves the monster into its dying state.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if !self.is_alive() {
            return false;
        }

        self.hp = self.hp.saturating_sub(amount);
        self.hit_flash_ms = behavior::HIT_FLASH_MS;

        if self.hp == 0 {
            self.lifecycle = Lifecycle::Dying {
                remaining_ms: behavior::DYING_MS,
            };
            return true;
        }
        false
    }

    pub fn is_alive(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Alive)
    }

    /// True once a dying monster's death effect has finished.
    pub fn is_finished(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Dying { remaining_ms } if remaining_ms <= 0.0)
    }

    pub fn is_flashing(&self) -> bool {
        self.hit_flash_ms > 0.0
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn radius(&self) -> f32 {
        self.archetype().radius()
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// True when a dash monster is stationary between dashes.
    pub fn is_resting(&self) -> bool {
        matches!(
            self.behavior,
            Behavior::Dash {
                phase: DashPhase::Resting { .. },
                ..
            }
        )
    }
}

/// A point three units ahead, up to 45 degrees either side of due left.
fn next_dash_target(from: Vec2, rng: &mut impl Rng) -> Vec2 {
    let spread = rng.random_range(-behavior::DASH_SPREAD_DEG..=behavior::DASH_SPREAD_DEG) as f32;
    let angle = (180.0 + spread).to_radians();
    from + Vec2::from_angle(angle) * UNIT_SIZE * behavior::DASH_DISTANCE_UNITS
}

fn next_patrol_y(archetype: &MonsterArchetype, height: f32, rng: &mut impl Rng) -> f32 {
    let margin = archetype.display_size() / 2.0 + behavior::BOSS_MARGIN_PAD;
    if margin >= height - margin {
        // Viewport too short to patrol
        return height / 2.0;
    }
    rng.random_range(margin..=height - margin)
}

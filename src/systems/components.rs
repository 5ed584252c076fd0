use bevy_ecs::resource::Resource;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Frame delta for the current tick, in milliseconds.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct DeltaTime {
    pub ms: f32,
}

/// Current playfield size, in pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport(pub Vec2);

/// Normalized host input for the current tick.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct InputState {
    /// Where the ship should fly to, or `None` to hold position.
    pub target: Option<Vec2>,
    pub fire_held: bool,
    /// One-shot request, consumed by the player system.
    pub ultimate_requested: bool,
}

/// Per-run bookkeeping that is not owned by any entity.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct SessionState {
    pub survival_ms: f32,
    pub over: bool,
    pub score: u64,
    pub kills: u32,
    pub frame: u64,
}

/// The session's only source of randomness.
#[derive(Resource, Debug, Clone)]
pub struct SimRng(pub SmallRng);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

/// Energy granted for a multi-shot pickup once the spread is already maxed.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupBonus(pub u32);

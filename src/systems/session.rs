use bevy_ecs::event::EventWriter;
use bevy_ecs::system::{Res, ResMut};
use thousands::Separable;
use tracing::info;

use crate::entity::player::Player;
use crate::events::FrameEvent;
use crate::systems::components::{DeltaTime, SessionState};

/// Advances the survival clock. Runs first so every later system sees this tick's time.
pub fn clock_system(delta_time: Res<DeltaTime>, mut session: ResMut<SessionState>) {
    session.survival_ms += delta_time.ms;
    session.frame += 1;
}

/// Ends the run once the player is out of health.
pub fn end_condition_system(player: Res<Player>, mut session: ResMut<SessionState>, mut events: EventWriter<FrameEvent>) {
    if session.over || !player.is_dead() {
        return;
    }

    session.over = true;
    info!(
        survival_ms = (session.survival_ms as u64).separate_with_commas(),
        score = session.score.separate_with_commas(),
        kills = session.kills,
        "Player died"
    );
    events.write(FrameEvent::PlayerDied {
        survival_ms: session.survival_ms,
    });
}

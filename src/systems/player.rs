use bevy_ecs::event::EventWriter;
use bevy_ecs::system::{Res, ResMut};
use tracing::info;

use crate::constants::pattern;
use crate::entity::player::Player;
use crate::events::FrameEvent;
use crate::systems::bullets::BulletManager;
use crate::systems::components::{DeltaTime, InputState, Viewport};

/// Fires one volley from the ship's nose: the converging spread, plus the ultimate fan while active.
pub fn fire_volley(player: &Player, bullets: &mut BulletManager) {
    let muzzle = player.muzzle();
    bullets.fire_player_spread(muzzle, player.multi_shot());

    if player.is_ultimate_active() {
        for angle in pattern::ULTIMATE_ANGLES_DEG {
            bullets.fire_ultimate(muzzle, angle);
        }
    }
}

/// Applies host input to the player, runs the ultimate state machine, and fires on cadence.
pub fn player_system(
    delta_time: Res<DeltaTime>,
    viewport: Res<Viewport>,
    mut input: ResMut<InputState>,
    mut player: ResMut<Player>,
    mut bullets: ResMut<BulletManager>,
    mut events: EventWriter<FrameEvent>,
) {
    player.set_target_position(input.target);

    if std::mem::take(&mut input.ultimate_requested) && player.activate_ultimate() {
        info!(energy = player.energy(), "Ultimate activated");
        events.write(FrameEvent::UltimateActivated);
    }

    player.update(delta_time.ms, viewport.0);

    if player.update_energy_drain(delta_time.ms) {
        info!("Ultimate ended");
        events.write(FrameEvent::UltimateEnded);
    }

    if player.tick_fire(input.fire_held) {
        fire_volley(&player, &mut bullets);
    }
}

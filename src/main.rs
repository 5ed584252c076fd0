use std::env;
use std::time::Instant;

use anyhow::{Context, Result};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use thousands::Separable;
use tracing::{debug, info};

use stg_sim::clock::{pace_frame, Clock, FixedClock, FrameClock};
use stg_sim::config::SimConfig;
use stg_sim::constants::LOOP_TIME;
use stg_sim::events::FrameEvent;
use stg_sim::game::{Game, TickStatus};
use stg_sim::logging::setup_logging;

const DEFAULT_TICKS: u64 = 60 * 60;

/// Command line: `stg-sim [ticks] [seed] [realtime]`.
struct Options {
    ticks: u64,
    seed: u64,
    realtime: bool,
}

impl Options {
    fn parse() -> Result<Self> {
        let args: Vec<String> = env::args().skip(1).collect();

        let ticks = match args.first() {
            Some(raw) => raw.parse().with_context(|| format!("invalid tick count: {raw}"))?,
            None => DEFAULT_TICKS,
        };
        let seed = match args.get(1) {
            Some(raw) => raw.parse().with_context(|| format!("invalid seed: {raw}"))?,
            None => SmallRng::from_os_rng().next_u64(),
        };
        let realtime = args.get(2).is_some_and(|raw| raw == "realtime");

        Ok(Self { ticks, seed, realtime })
    }
}

/// Sweeps the ship up and down the left side of the field, always firing,
/// and spends the energy bar as soon as it fills.
fn autopilot(game: &mut Game) {
    let viewport = game.viewport();
    let phase = game.survival_ms() / 1000.0 * 0.8;
    let target = Vec2::new(viewport.x * 0.2, viewport.y * (0.5 + 0.35 * phase.sin()));
    game.set_input(Some(target), true);

    let player = game.player();
    if !player.is_ultimate_active() && player.energy() >= player.max_energy() {
        game.request_ultimate();
    }
}

fn main() -> Result<()> {
    setup_logging();

    let options = Options::parse()?;
    let config = SimConfig::default().with_seed(options.seed);
    let mut game = Game::new(config).context("failed to start session")?;

    let mut clock: Box<dyn Clock> = if options.realtime {
        Box::new(FrameClock::new())
    } else {
        Box::new(FixedClock::sixty_hz())
    };

    info!(
        ticks = options.ticks,
        seed = options.seed,
        realtime = options.realtime,
        "Running headless session"
    );

    let started = Instant::now();
    let mut peak_bullets = 0;
    let mut ultimates = 0u32;

    for _ in 0..options.ticks {
        let start = Instant::now();
        autopilot(&mut game);
        let status = game.tick(clock.delta_ms())?;

        peak_bullets = peak_bullets.max(game.bullets().live_count());
        for event in game.drain_events() {
            match event {
                FrameEvent::UltimateActivated => ultimates += 1,
                FrameEvent::BossSpawned { id } => debug!(id = %id, "Boss entered"),
                _ => {}
            }
        }

        if status == TickStatus::PlayerDied {
            break;
        }
        if options.realtime {
            pace_frame(start, LOOP_TIME);
        }
    }

    let hud = game.hud();
    info!(
        survival_ms = (hud.survival_ms as u64).separate_with_commas(),
        score = hud.score.separate_with_commas(),
        kills = hud.kills,
        hp = hud.hp,
        ultimates,
        peak_bullets,
        died = game.is_over(),
        elapsed = format!("{:.2?}", started.elapsed()),
        "Session finished"
    );

    Ok(())
}

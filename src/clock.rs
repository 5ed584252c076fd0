//! Frame delta sources.

use std::time::{Duration, Instant};

use tracing::warn;

use crate::constants::MAX_FRAME_STEP_MS;

/// Supplies the delta for the next tick, in milliseconds.
pub trait Clock {
    fn delta_ms(&mut self) -> f32;
}

/// Wall-clock deltas, clamped so a stall never turns into one enormous step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    max_step_ms: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            max_step_ms: MAX_FRAME_STEP_MS,
        }
    }

    pub fn with_max_step(mut self, max_step_ms: f32) -> Self {
        self.max_step_ms = max_step_ms;
        self
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FrameClock {
    fn delta_ms(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last).as_secs_f32() * 1000.0;
        self.last = now;
        elapsed.min(self.max_step_ms)
    }
}

/// A constant step, for headless runs and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock {
    pub step_ms: f32,
}

impl FixedClock {
    pub fn new(step_ms: f32) -> Self {
        Self { step_ms }
    }

    /// One 60 Hz frame.
    pub fn sixty_hz() -> Self {
        Self::new(1000.0 / 60.0)
    }
}

impl Clock for FixedClock {
    fn delta_ms(&mut self) -> f32 {
        self.step_ms
    }
}

/// Sleeps out whatever is left of a `frame` that began at `start`.
///
/// Returns the time slept, or `None` when the frame had already overrun its budget.
pub fn pace_frame(start: Instant, frame: Duration) -> Option<Duration> {
    let remaining = frame.saturating_sub(start.elapsed());
    if remaining == Duration::ZERO {
        warn!("Loop behind schedule by: {:?}", start.elapsed() - frame);
        return None;
    }

    spin_sleep::sleep(remaining);
    Some(remaining)
}

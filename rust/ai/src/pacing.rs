//! Presentation pauses between the stages of a computer turn.
//!
//! Pauses carry no data; swapping [`SleepPacing`] for [`NoPacing`] never
//! changes what the opponent does.

use std::thread;
use std::time::Duration;

/// Default pause before the computer draws.
pub const THINK_MS: u64 = 800;
/// Default pause before every later stage.
pub const STEP_MS: u64 = 400;

/// Points in a computer turn where a pause may be inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Before the draw
    Think,
    /// Before playing a card to undo a bust
    Recover,
    /// Before deciding on an offensive side card
    Offense,
    /// After a side card was played
    AfterPlay,
}

pub trait Pacer: Send + Sync {
    fn pause(&mut self, stage: Stage);
}

/// Skips every pause. Used by tests and headless simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pause(&mut self, _stage: Stage) {}
}

/// Blocks the current thread for a fixed time per stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepPacing {
    think: Duration,
    step: Duration,
}

impl SleepPacing {
    pub fn new(think: Duration, step: Duration) -> Self {
        Self { think, step }
    }

    /// Pacing derived from a single step length; the think pause is twice as long.
    pub fn from_step_millis(step_ms: u64) -> Self {
        Self::new(
            Duration::from_millis(step_ms.saturating_mul(2)),
            Duration::from_millis(step_ms),
        )
    }

    pub fn duration(&self, stage: Stage) -> Duration {
        match stage {
            Stage::Think => self.think,
            Stage::Recover | Stage::Offense | Stage::AfterPlay => self.step,
        }
    }
}

impl Default for SleepPacing {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(THINK_MS),
            Duration::from_millis(STEP_MS),
        )
    }
}

impl Pacer for SleepPacing {
    fn pause(&mut self, stage: Stage) {
        let d = self.duration(stage);
        if !d.is_zero() {
            thread::sleep(d);
        }
    }
}

//! Timed phases between theme entry and play.

use crate::generator::PendingLevel;
use crate::models::engine::{COUNTDOWN_FROM, INTRO_SECS};
use crate::models::level::LevelDescriptor;
use crate::state::traits::{Transition, Update, UpdateContext};

/// Waiting on the generator. Polled once per tick.
pub(crate) struct LoadingState {
    pub theme: String,
    pub pending: PendingLevel,
}

impl Update for LoadingState {
    fn update(&mut self, _ctx: &UpdateContext) -> Option<Transition> {
        let level = self.pending.poll()?;
        log::info!(
            "GEN: Level '{}' ready ({} BPM, speed {})",
            level.name,
            level.tempo_bpm,
            level.scroll_speed
        );
        Some(Transition::ToIntro(level))
    }
}

pub(crate) struct IntroState {
    pub level: LevelDescriptor,
    pub started_at: f64,
}

impl Update for IntroState {
    fn update(&mut self, ctx: &UpdateContext) -> Option<Transition> {
        (ctx.clock - self.started_at >= INTRO_SECS)
            .then(|| Transition::ToCountdown(self.level.clone()))
    }
}

pub(crate) struct CountdownState {
    pub level: LevelDescriptor,
    pub started_at: f64,
    pub value: i32,
}

impl CountdownState {
    pub fn new(level: LevelDescriptor, started_at: f64) -> Self {
        Self {
            level,
            started_at,
            value: COUNTDOWN_FROM,
        }
    }
}

impl Update for CountdownState {
    fn update(&mut self, ctx: &UpdateContext) -> Option<Transition> {
        let elapsed = (ctx.clock - self.started_at).max(0.0);
        self.value = COUNTDOWN_FROM - elapsed.floor() as i32;
        (self.value <= 0).then(|| Transition::ToActive(self.level.clone()))
    }
}

//! Summary of a finished session.

use crate::models::level::GameMode;
use crate::models::stats::HitStats;
use crate::state::GameEngine;
use crate::state::traits::{Snapshot, Transition, Update, UpdateContext};

#[derive(Debug, Clone, PartialEq)]
pub struct SessionResult {
    pub level_name: String,
    pub mode: GameMode,
    pub score: u32,
    pub max_combo: u32,
    pub accuracy: f64,
    pub hit_stats: HitStats,
}

impl SessionResult {
    pub fn from_engine(engine: &GameEngine) -> Self {
        Self {
            level_name: engine.level().name.clone(),
            mode: engine.level().mode,
            score: engine.score,
            max_combo: engine.max_combo,
            accuracy: engine.hit_stats.calculate_accuracy(),
            hit_stats: engine.hit_stats.clone(),
        }
    }
}

// SessionResult implements Snapshot by cloning itself.
impl Snapshot for SessionResult {
    type Output = SessionResult;

    fn create_snapshot(&self) -> Self::Output {
        self.clone()
    }
}

// Terminal screen is static until a press.
impl Update for SessionResult {
    fn update(&mut self, _ctx: &UpdateContext) -> Option<Transition> {
        None
    }
}

//! Core session engine for beat-synchronized gameplay.
//!
//! The `GameEngine` is the explicit session context for one run:
//! - Beat-locked note scheduling
//! - Input judgement and note expiry
//! - Score, combo and HP tracking
//!
//! Each tick runs scheduling, then queued input, then expiry, in that order.

mod actions;
mod input;
mod notes;
mod scheduler;
mod snapshot;

pub use input::InputEvent;
pub use notes::NoteSet;
pub use scheduler::NoteScheduler;

use crate::models::engine::{HitWindow, MAX_HP, PlayfieldConfig};
use crate::models::level::{LevelDescriptor, Rgb};
use crate::models::stats::{HitStats, Judgement, JudgementColors};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::VecDeque;

/// Most recent judgement, kept for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JudgementDisplay {
    pub judgement: Judgement,
    pub color: Rgb,
    /// Increases with every judgement of the session.
    pub sequence: u64,
    /// Ticks left before the label disappears.
    pub remaining_ticks: u32,
}

impl JudgementDisplay {
    pub fn label(&self) -> &'static str {
        self.judgement.label()
    }
}

/// Gameplay state for a single session.
pub struct GameEngine {
    /// Read-only level for this session.
    pub(crate) level: LevelDescriptor,
    /// Live notes.
    pub(crate) notes: NoteSet,
    pub(crate) scheduler: NoteScheduler,
    pub(crate) hit_window: HitWindow,
    pub(crate) playfield: PlayfieldConfig,
    /// Player lane descent speed (1-12), used for lane note positions.
    pub(crate) scroll_speed: u32,

    /// Current score.
    pub score: u32,
    /// Current combo count.
    pub combo: u32,
    /// Maximum combo achieved.
    pub max_combo: u32,
    /// Remaining health, clamped to 0..=100.
    pub hp: i32,
    /// Hit statistics per tier.
    pub hit_stats: HitStats,

    /// Session clock in seconds (same timeline as `session_start_time`).
    pub(crate) clock: f64,
    /// Presses waiting for the next tick.
    pub(crate) pending_inputs: VecDeque<InputEvent>,
    pub(crate) last_judgement: Option<JudgementDisplay>,
    pub(crate) judgement_seq: u64,
    pub(crate) colors: JudgementColors,
}

impl GameEngine {
    /// Creates a session starting at `session_start_time` with an OS-seeded RNG.
    pub fn new(
        level: LevelDescriptor,
        playfield: PlayfieldConfig,
        scroll_speed: u32,
        session_start_time: f64,
    ) -> Self {
        Self::with_rng(
            level,
            playfield,
            scroll_speed,
            session_start_time,
            StdRng::from_os_rng(),
        )
    }

    /// Creates a session with a caller-provided RNG (deterministic placement).
    pub fn with_rng(
        level: LevelDescriptor,
        playfield: PlayfieldConfig,
        scroll_speed: u32,
        session_start_time: f64,
        rng: StdRng,
    ) -> Self {
        log::info!(
            "SESSION: Starting '{}' ({} mode, {} BPM)",
            level.name,
            level.mode,
            level.tempo_bpm
        );

        Self {
            scheduler: NoteScheduler::new(level.mode, level.tempo_bpm, session_start_time, rng),
            hit_window: HitWindow::for_mode(level.mode),
            level,
            notes: NoteSet::new(),
            playfield,
            scroll_speed,
            score: 0,
            combo: 0,
            max_combo: 0,
            hp: MAX_HP,
            hit_stats: HitStats::new(),
            clock: session_start_time,
            pending_inputs: VecDeque::new(),
            last_judgement: None,
            judgement_seq: 0,
            colors: JudgementColors::new(),
        }
    }

    /// Runs one tick at `current_time`: schedule, judge queued input, expire, purge.
    pub fn tick(&mut self, current_time: f64) {
        self.clock = current_time;

        if let Some(note) = self.scheduler.advance(current_time, &self.playfield) {
            self.notes.push(note);
        }

        self.process_inputs(current_time);
        self.update_notes(current_time);
    }

    /// Returns `true` once HP is exhausted.
    pub fn is_failed(&self) -> bool {
        self.hp <= 0
    }

    /// Drops every note; used when the session ends.
    pub fn clear_notes(&mut self) {
        self.notes.clear();
        self.pending_inputs.clear();
    }

    pub fn level(&self) -> &LevelDescriptor {
        &self.level
    }

    pub fn notes(&self) -> &NoteSet {
        &self.notes
    }

    pub fn session_start_time(&self) -> f64 {
        self.scheduler.session_start_time()
    }

    pub fn beat_interval(&self) -> f64 {
        self.scheduler.beat_interval()
    }

    /// Watermark of the highest beat spawned.
    pub fn last_spawned_beat(&self) -> i64 {
        self.scheduler.last_spawned_beat()
    }

    pub fn last_judgement(&self) -> Option<&JudgementDisplay> {
        self.last_judgement.as_ref()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.playfield.update_size(width, height);
    }
}

//! Observer snapshots for inter-thread communication.
//!
//! Snapshots are immutable captures of session state sent from the logic
//! thread to whatever presents it. Consumers never write back.

use crate::models::level::{GameMode, Palette};
use crate::state::SessionResult;
use crate::state::game::JudgementDisplay;
use crate::state::global::Phase;
use std::time::Instant;

/// Capture of the state machine for one published tick.
#[derive(Clone, Debug)]
pub struct FrameSnapshot {
    pub phase: Phase,
    /// Wall-clock time when the snapshot was created.
    pub timestamp: Instant,
    pub view: RenderState,
}

/// Phase-specific payload.
#[derive(Clone, Debug)]
pub enum RenderState {
    /// Warning screen before the menu.
    Prelude,
    Menu {
        options: Vec<&'static str>,
        selected: usize,
    },
    Settings {
        models: Vec<String>,
        model: String,
        mode: GameMode,
        scroll_speed: u32,
    },
    ModeInput {
        theme: String,
    },
    Loading {
        theme: String,
    },
    Intro {
        name: String,
        intro_text: String,
        flavor_text: String,
        palette: Palette,
    },
    Countdown {
        value: i32,
        name: String,
        mode: GameMode,
        palette: Palette,
    },
    InGame(GameplaySnapshot),
    Terminal(SessionResult),
}

/// Where a note should be drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NoteView {
    Lane {
        lane: usize,
        x: f32,
        y: f32,
    },
    Free {
        x: f32,
        y: f32,
        /// Approach circle radius while the note is still ahead.
        approach_radius: Option<f32>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoteSnapshot {
    pub target_time: f64,
    pub active: bool,
    pub view: NoteView,
}

/// Snapshot of gameplay state for rendering.
#[derive(Clone, Debug)]
pub struct GameplaySnapshot {
    pub mode: GameMode,
    pub palette: Palette,
    /// Seconds since the session started.
    pub elapsed: f64,
    pub beat_interval: f64,
    /// True during the first tenth of each beat.
    pub beat_flash: bool,

    pub notes: Vec<NoteSnapshot>,

    pub score: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub hp: i32,
    pub accuracy: f64,
    pub last_judgement: Option<JudgementDisplay>,
}

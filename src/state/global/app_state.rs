//! Application state enum for the state machine.

use super::phases::{CountdownState, IntroState, LoadingState};
use crate::state::{GameEngine, SessionResult};

/// Macro phase of the application, as seen by observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Prelude,
    Menu,
    Settings,
    ModeInput,
    Loading,
    Intro,
    Countdown,
    Active,
    Terminal,
}

/// Phases driven by `GlobalState`, each with its own data.
pub(crate) enum AppState {
    /// Warning screen shown once at startup.
    Prelude,
    Menu { selected: usize },
    Settings,
    /// Theme text entry.
    ModeInput { theme: String },
    Loading(LoadingState),
    Intro(IntroState),
    Countdown(CountdownState),
    /// Live gameplay.
    Active(Box<GameEngine>),
    Terminal(SessionResult),
}

impl AppState {
    pub fn phase(&self) -> Phase {
        match self {
            AppState::Prelude => Phase::Prelude,
            AppState::Menu { .. } => Phase::Menu,
            AppState::Settings => Phase::Settings,
            AppState::ModeInput { .. } => Phase::ModeInput,
            AppState::Loading(_) => Phase::Loading,
            AppState::Intro(_) => Phase::Intro,
            AppState::Countdown(_) => Phase::Countdown,
            AppState::Active(_) => Phase::Active,
            AppState::Terminal(_) => Phase::Terminal,
        }
    }
}

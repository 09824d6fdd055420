//! Global state management for the session state machine.
//!
//! `GlobalState` owns the current phase and everything that outlives a
//! single session: settings, the level loader, the model list and the
//! session clock.

mod actions;
mod app_state;
mod phases;

pub use actions::menu::MENU_OPTIONS;
pub use app_state::Phase;

use actions::game::apply as apply_to_game;
use actions::menu::apply as apply_to_menu;
use actions::mode_input::apply as apply_to_mode_input;
use actions::settings::apply as apply_to_settings;
use app_state::AppState;
use phases::{CountdownState, IntroState};

use crate::generator::LevelLoader;
use crate::input::events::{GameAction, InputCommand};
use crate::models::engine::PlayfieldConfig;
use crate::models::level::LevelDescriptor;
use crate::models::settings::SettingsState;
use crate::shared::snapshot::{FrameSnapshot, RenderState};
use crate::state::GameEngine;
use crate::state::traits::{Snapshot, Transition, Update, UpdateContext};
use crossbeam_channel::Sender;
use std::path::PathBuf;
use std::time::Instant;

/// Owns the long-lived state machine from the prelude to the terminal screen.
pub struct GlobalState {
    pub(super) current_state: AppState,
    pub(super) settings: SettingsState,
    /// Where settings are written back; `None` keeps them in memory.
    pub(super) settings_path: Option<PathBuf>,
    pub(super) loader: LevelLoader,
    pub(super) models: Vec<String>,
    pub(super) active_model: String,
    pub(super) playfield: PlayfieldConfig,
    /// Seconds since the state machine started.
    pub(super) clock: f64,
    pub(super) exit_requested: bool,
    pub(super) input_cmd_tx: Sender<InputCommand>,
}

impl GlobalState {
    pub fn new(
        settings: SettingsState,
        loader: LevelLoader,
        models: Vec<String>,
        active_model: String,
        input_cmd_tx: Sender<InputCommand>,
    ) -> Self {
        log::info!("LOGIC: Initializing Global State");
        let playfield = PlayfieldConfig::new(settings.field_width, settings.field_height);

        Self {
            current_state: AppState::Prelude,
            settings,
            settings_path: None,
            loader,
            models,
            active_model,
            playfield,
            clock: 0.0,
            exit_requested: false,
            input_cmd_tx,
        }
    }

    /// Persists settings changes to `path`.
    pub fn with_settings_path(mut self, path: PathBuf) -> Self {
        self.settings_path = Some(path);
        self
    }

    pub fn phase(&self) -> Phase {
        self.current_state.phase()
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// True once the player chose to exit.
    pub fn should_exit(&self) -> bool {
        self.exit_requested
    }

    /// Resizes the playfield. Outside of play this returns to the menu.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.playfield.update_size(width, height);

        if let AppState::Active(engine) = &mut self.current_state {
            engine.resize(width, height);
        } else if !matches!(self.current_state, AppState::Terminal(_)) {
            self.transition_to(AppState::Menu { selected: 0 });
        }
    }

    pub fn shutdown(&mut self) {
        log::info!("LOGIC: Shutting down in {:?}", self.phase());
        self.persist_settings();
    }

    /// Advances the clock by `dt` and ticks the current phase.
    pub fn update(&mut self, dt: f64) {
        self.clock += dt;
        let ctx = UpdateContext { clock: self.clock };

        let transition = match &mut self.current_state {
            AppState::Loading(loading) => loading.update(&ctx),
            AppState::Intro(intro) => intro.update(&ctx),
            AppState::Countdown(countdown) => countdown.update(&ctx),
            AppState::Active(engine) => Update::update(engine.as_mut(), &ctx),
            AppState::Terminal(result) => result.update(&ctx),
            AppState::Prelude
            | AppState::Menu { .. }
            | AppState::Settings
            | AppState::ModeInput { .. } => None,
        };

        if let Some(transition) = transition {
            self.apply_transition(transition);
        }
    }

    fn apply_transition(&mut self, transition: Transition) {
        let next = match transition {
            Transition::None => return,
            Transition::ToIntro(level) => AppState::Intro(IntroState {
                level,
                started_at: self.clock,
            }),
            Transition::ToCountdown(level) => {
                AppState::Countdown(CountdownState::new(level, self.clock))
            }
            Transition::ToActive(level) => self.start_session(level),
            Transition::ToTerminal(result) => AppState::Terminal(result),
        };
        self.transition_to(next);
    }

    /// Builds a fresh session stamped at the current clock.
    fn start_session(&mut self, level: LevelDescriptor) -> AppState {
        self.send_input_command(InputCommand::SetMode(level.mode));
        let engine = GameEngine::new(level, self.playfield, self.settings.scroll_speed, self.clock);
        AppState::Active(Box::new(engine))
    }

    fn transition_to(&mut self, next: AppState) {
        log::info!("LOGIC: {:?} -> {:?}", self.phase(), next.phase());
        self.current_state = next;
    }

    /// Writes current settings to disk.
    pub(super) fn persist_settings(&self) {
        if let Some(path) = &self.settings_path
            && let Err(e) = self.settings.save_to(path)
        {
            log::error!("LOGIC: Failed to save settings: {}", e);
        }
    }

    pub(super) fn send_input_command(&self, command: InputCommand) {
        if let Err(e) = self.input_cmd_tx.send(command) {
            log::error!("LOGIC: Failed to reach input thread: {}", e);
        }
    }

    /// Reloads bindings from disk and forwards them to the input thread.
    fn reload_keybinds_from_disk(&mut self) {
        if let Some(path) = &self.settings_path {
            self.settings.keybinds = SettingsState::load_from(path).keybinds;
        }
        self.send_input_command(InputCommand::ReloadKeybinds(self.settings.keybinds.clone()));
    }

    /// Routes a `GameAction` to the current phase and applies the resulting change.
    pub fn handle_action(&mut self, action: GameAction) {
        if let GameAction::ReloadKeybinds = action {
            self.reload_keybinds_from_disk();
            return;
        }

        let mut current_state = std::mem::replace(&mut self.current_state, AppState::Prelude);

        let next = match &mut current_state {
            AppState::Prelude => action.is_press().then_some(AppState::Menu { selected: 0 }),
            AppState::Menu { selected } => apply_to_menu(self, selected, &action),
            AppState::Settings => apply_to_settings(self, &action),
            AppState::ModeInput { theme } => apply_to_mode_input(self, theme, &action),
            AppState::Active(engine) => apply_to_game(engine, &action),
            AppState::Terminal(_) => action.is_press().then_some(AppState::Menu { selected: 0 }),
            AppState::Loading(_) | AppState::Intro(_) | AppState::Countdown(_) => None,
        };

        self.current_state = current_state;
        if let Some(next) = next {
            self.transition_to(next);
        }
    }

    /// Produces an immutable snapshot for observers.
    pub fn create_snapshot(&self) -> FrameSnapshot {
        let view = match &self.current_state {
            AppState::Prelude => RenderState::Prelude,
            AppState::Menu { selected } => RenderState::Menu {
                options: MENU_OPTIONS.to_vec(),
                selected: *selected,
            },
            AppState::Settings => RenderState::Settings {
                models: self.models.clone(),
                model: self.active_model.clone(),
                mode: self.settings.game_mode,
                scroll_speed: self.settings.scroll_speed,
            },
            AppState::ModeInput { theme } => RenderState::ModeInput {
                theme: theme.clone(),
            },
            AppState::Loading(loading) => RenderState::Loading {
                theme: loading.theme.clone(),
            },
            AppState::Intro(intro) => RenderState::Intro {
                name: intro.level.name.clone(),
                intro_text: intro.level.intro_text.clone(),
                flavor_text: intro.level.flavor_text.clone(),
                palette: intro.level.palette,
            },
            AppState::Countdown(countdown) => RenderState::Countdown {
                value: countdown.value,
                name: countdown.level.name.clone(),
                mode: countdown.level.mode,
                palette: countdown.level.palette,
            },
            AppState::Active(engine) => RenderState::InGame(Snapshot::create_snapshot(engine.as_ref())),
            AppState::Terminal(result) => RenderState::Terminal(result.create_snapshot()),
        };

        FrameSnapshot {
            phase: self.phase(),
            timestamp: Instant::now(),
            view,
        }
    }
}

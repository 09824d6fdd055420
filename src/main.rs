//! Application entry point and thread bootstrapper.

mod generator;
mod input;
mod logic;
mod models;
mod observer;
mod shared;
mod state;
mod system;

use crate::generator::{
    LevelGenerator, LevelLoader, OfflineGenerator, OllamaGenerator, discover_models,
};
use crate::models::settings::{SETTINGS_PATH, SettingsState};
use crate::state::GlobalState;
use crate::system::bus::SystemBus;
use env_logger::Env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    log::info!("MAIN: Booting beatflow...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("MAIN: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> std::io::Result<()> {
    let settings_path = PathBuf::from(SETTINGS_PATH);
    let settings = SettingsState::load_from(&settings_path);
    let timeout = Duration::from_secs(settings.generator.timeout_secs);

    let generator: Arc<dyn LevelGenerator> = if settings.generator.offline {
        log::info!("GEN: Offline mode, using the built-in level");
        Arc::new(OfflineGenerator)
    } else {
        let client = OllamaGenerator::connect(&settings.generator.base_url, timeout);
        if client.is_online() {
            Arc::new(client)
        } else {
            Arc::new(OfflineGenerator)
        }
    };

    let (models, active_model) = discover_models(generator.as_ref(), &settings.generator.model);
    log::info!("GEN: {} model(s) available, using {}", models.len(), active_model);

    let loader = LevelLoader::new(generator, timeout)?;

    let bus = SystemBus::new();
    let input_manager = input::manager::InputManager::new(settings.game_mode, &settings.keybinds);
    let tick_rate = settings.tick_rate;
    let state = GlobalState::new(
        settings,
        loader,
        models,
        active_model,
        bus.input_cmd_tx.clone(),
    )
    .with_settings_path(settings_path);

    input::start_thread(bus.clone(), input_manager)?;
    input::start_terminal_reader(bus.clone())?;
    let logic = logic::start_thread(bus.clone(), state, tick_rate)?;

    observer::run(bus.render_rx.clone(), logic);
    log::info!("MAIN: Bye");
    Ok(())
}

use crate::input::events::{GameAction, InputCommand};
use crate::state::global::GlobalState;
use crate::state::global::app_state::AppState;

pub fn apply(state: &mut GlobalState, action: &GameAction) -> Option<AppState> {
    match action {
        GameAction::Back => Some(AppState::Menu { selected: 1 }),
        GameAction::CycleModel => {
            if state.models.is_empty() {
                return None;
            }
            let next = state
                .models
                .iter()
                .position(|m| *m == state.active_model)
                .map_or(0, |i| (i + 1) % state.models.len());
            state.active_model = state.models[next].clone();
            state.settings.generator.model = state.active_model.clone();
            log::info!("LOGIC: Generator model set to {}", state.active_model);
            state.persist_settings();
            None
        }
        GameAction::CycleMode => {
            state.settings.game_mode = state.settings.game_mode.next();
            log::info!("LOGIC: Game mode set to {}", state.settings.game_mode);
            state.send_input_command(InputCommand::SetMode(state.settings.game_mode));
            state.persist_settings();
            None
        }
        GameAction::CycleSpeed => {
            state.settings.cycle_scroll_speed();
            log::info!("LOGIC: Scroll speed set to {}", state.settings.scroll_speed);
            state.persist_settings();
            None
        }
        _ => None,
    }
}

use crate::generator::LevelRequest;
use crate::input::events::GameAction;
use crate::state::global::GlobalState;
use crate::state::global::app_state::AppState;
use crate::state::global::phases::LoadingState;

pub fn apply(state: &mut GlobalState, theme: &mut String, action: &GameAction) -> Option<AppState> {
    match action {
        GameAction::Text(text) => {
            theme.extend(text.chars().filter(|c| !c.is_control()));
            None
        }
        GameAction::Backspace => {
            theme.pop();
            None
        }
        GameAction::Back => Some(AppState::Menu { selected: 0 }),
        GameAction::Confirm if !theme.trim().is_empty() => {
            let request = LevelRequest {
                theme: theme.trim().to_string(),
                mode: state.settings.game_mode,
                model: state.active_model.clone(),
            };
            log::info!(
                "GEN: Requesting '{}' level for theme \"{}\" with {}",
                request.mode,
                request.theme,
                request.model
            );
            let theme = request.theme.clone();
            let pending = state.loader.request(request);
            Some(AppState::Loading(LoadingState { theme, pending }))
        }
        _ => None,
    }
}

use crate::input::events::GameAction;
use crate::state::global::GlobalState;
use crate::state::global::app_state::AppState;

/// Entries of the main menu, in display order.
pub const MENU_OPTIONS: [&str; 3] = ["New Flow", "Settings", "Exit"];

pub fn apply(state: &mut GlobalState, selected: &mut usize, action: &GameAction) -> Option<AppState> {
    match action {
        GameAction::Navigation { y } => {
            let len = MENU_OPTIONS.len() as i64;
            *selected = (*selected as i64 + i64::from(*y)).rem_euclid(len) as usize;
            None
        }
        GameAction::Confirm => match *selected {
            0 => Some(AppState::ModeInput {
                theme: String::new(),
            }),
            1 => Some(AppState::Settings),
            _ => {
                log::info!("LOGIC: Exit selected from menu");
                state.exit_requested = true;
                None
            }
        },
        _ => None,
    }
}

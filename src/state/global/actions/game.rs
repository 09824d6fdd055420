use crate::input::events::GameAction;
use crate::state::GameEngine;
use crate::state::global::app_state::AppState;
use crate::state::traits::HandleAction;

/// Gameplay only consumes presses; the phase never changes on input.
pub fn apply(engine: &mut GameEngine, action: &GameAction) -> Option<AppState> {
    engine.handle_action(action);
    None
}

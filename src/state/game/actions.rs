//! Trait implementations for GameEngine.

use super::{GameEngine, InputEvent};
use crate::input::events::GameAction;
use crate::shared::snapshot::GameplaySnapshot;
use crate::state::SessionResult;
use crate::state::traits::{HandleAction, Snapshot, Transition, Update, UpdateContext};

// GameEngine implements Snapshot by creating a GameplaySnapshot.
impl Snapshot for GameEngine {
    type Output = GameplaySnapshot;

    fn create_snapshot(&self) -> Self::Output {
        self.get_snapshot()
    }
}

// One tick per update. The session ends the tick HP reaches zero.
impl Update for GameEngine {
    fn update(&mut self, ctx: &UpdateContext) -> Option<Transition> {
        self.tick(ctx.clock);

        if !self.is_failed() {
            return None;
        }

        self.clear_notes();
        let result = SessionResult::from_engine(self);
        log::info!(
            "SESSION: '{}' ended with {} points (max combo {}, {:.2}% accuracy)",
            result.level_name,
            result.score,
            result.max_combo,
            result.accuracy
        );
        Some(Transition::ToTerminal(result))
    }
}

// Presses are queued and judged on the next tick.
impl HandleAction for GameEngine {
    fn handle_action(&mut self, action: &GameAction) -> Transition {
        match action {
            GameAction::Hit { column } => self.queue_input(InputEvent::LanePress { lane: *column }),
            GameAction::Pointer { x, y } => {
                self.queue_input(InputEvent::PointerActivate { x: *x, y: *y })
            }
            _ => {}
        }
        Transition::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::engine::NotePlacement;
    use crate::models::level::GameMode;
    use crate::state::game::tests::engine_with;

    fn ctx(clock: f64) -> UpdateContext {
        UpdateContext { clock }
    }

    #[test]
    fn queued_hit_is_judged_on_update() {
        let mut engine = engine_with(GameMode::Lanes2, &[(1.0, NotePlacement::Lane(0))]);
        engine.handle_action(&GameAction::Hit { column: 0 });
        assert_eq!(engine.score, 0);

        assert!(Update::update(&mut engine, &ctx(1.01)).is_none());
        assert_eq!(engine.score, 200);
        assert_eq!(engine.combo, 1);
    }

    #[test]
    fn exhausted_hp_ends_session() {
        let mut engine = engine_with(GameMode::Lanes2, &[(1.0, NotePlacement::Lane(1))]);
        engine.hp = 10;
        engine.score = 300;

        let transition = Update::update(&mut engine, &ctx(1.25));
        match transition {
            Some(Transition::ToTerminal(result)) => {
                assert_eq!(result.score, 300);
                assert_eq!(result.hit_stats.miss, 1);
            }
            other => panic!("expected terminal transition, got {:?}", other),
        }
        assert!(engine.notes().is_empty());
    }

    #[test]
    fn menu_actions_are_ignored() {
        let mut engine = engine_with(GameMode::Lanes4, &[]);
        assert!(matches!(engine.handle_action(&GameAction::Confirm), Transition::None));
        assert!(engine.pending_inputs.is_empty());
    }
}

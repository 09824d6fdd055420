//! Traits for state management.
//!
//! These traits define the common interface for all session phases.

use crate::input::events::GameAction;
use crate::models::level::LevelDescriptor;

use super::SessionResult;

/// Context passed to update methods.
#[derive(Debug, Clone, Copy)]
pub struct UpdateContext {
    /// Session clock after this tick, in seconds.
    pub clock: f64,
}

/// Transition result from handling an action or update.
#[derive(Debug, Clone)]
pub enum Transition {
    /// Stay in current state.
    None,
    /// Level is ready, show its introduction.
    ToIntro(LevelDescriptor),
    ToCountdown(LevelDescriptor),
    /// Start the session clock and begin play.
    ToActive(LevelDescriptor),
    /// HP ran out.
    ToTerminal(SessionResult),
}

/// Trait for creating observer-ready snapshots.
///
/// Snapshots are immutable captures of state sent off the logic thread.
pub trait Snapshot {
    /// The snapshot type produced.
    type Output;

    fn create_snapshot(&self) -> Self::Output;
}

/// Trait for per-tick updates.
///
/// Returns an optional transition to another phase.
pub trait Update {
    fn update(&mut self, ctx: &UpdateContext) -> Option<Transition>;
}

/// Trait for handling game actions.
pub trait HandleAction {
    fn handle_action(&mut self, action: &GameAction) -> Transition;
}

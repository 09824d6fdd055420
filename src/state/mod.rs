//! State management module.
//!
//! This module contains all session state types and their logic:
//! - `GameEngine` - Active gameplay for one session
//! - `GlobalState` - Phase state machine around the sessions
//! - `SessionResult` - Summary shown once HP runs out
//!
//! States implement common traits for snapshots, updates, and action handling.

pub mod game;
pub mod global;
pub mod result;
pub mod traits;

// Re-exports for convenient access
pub use game::GameEngine;
pub use global::{GlobalState, Phase};
pub use result::SessionResult;

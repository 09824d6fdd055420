//! Shared channel infrastructure between system threads.
//!
//! The `SystemBus` is the communication hub for every thread in the
//! application, using crossbeam channels for message passing.

use crate::input::events::{GameAction, InputCommand, RawInputEvent};
use crate::shared::snapshot::FrameSnapshot;
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};

/// System-level events delivered to the logic thread.
#[derive(Debug, Clone)]
pub enum SystemEvent {
    /// Playfield resized to new dimensions.
    Resize { width: u32, height: u32 },
    /// Application shutdown requested.
    Quit,
}

/// Aggregates the cross-thread communication channels:
/// - Raw terminal events for the input thread
/// - Game actions from the input thread
/// - Snapshots for the observer
/// - System events (resize, quit)
#[derive(Clone)]
pub struct SystemBus {
    /// Terminal → Input: raw events.
    pub raw_input_tx: Sender<RawInputEvent>,
    pub raw_input_rx: Receiver<RawInputEvent>,

    /// Commands sent to the input thread.
    pub input_cmd_tx: Sender<InputCommand>,
    pub input_cmd_rx: Receiver<InputCommand>,

    /// Input → Logic: processed actions.
    pub action_tx: Sender<GameAction>,
    pub action_rx: Receiver<GameAction>,

    /// Logic → Observer: state snapshots.
    pub render_tx: Sender<FrameSnapshot>,
    pub render_rx: Receiver<FrameSnapshot>,

    /// Terminal → Logic: system events.
    pub sys_tx: Sender<SystemEvent>,
    pub sys_rx: Receiver<SystemEvent>,
}

impl SystemBus {
    pub fn new() -> Self {
        let (raw_input_tx, raw_input_rx) = unbounded();
        let (input_cmd_tx, input_cmd_rx) = unbounded();
        let (action_tx, action_rx) = unbounded();

        // Bounded: max 2 snapshots queued to limit latency
        let (render_tx, render_rx) = bounded(2);

        let (sys_tx, sys_rx) = unbounded();

        Self {
            raw_input_tx,
            raw_input_rx,
            input_cmd_tx,
            input_cmd_rx,
            action_tx,
            action_rx,
            render_tx,
            render_rx,
            sys_tx,
            sys_rx,
        }
    }
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}

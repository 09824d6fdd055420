//! Logic thread module for session state management and updates.
//!
//! This module contains the main loop that runs at a fixed tick rate and
//! coordinates between input, system events and observers.

use crate::state::GlobalState;
use crate::system::bus::{SystemBus, SystemEvent};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Most fixed steps run in one pass before the loop yields.
const MAX_CATCH_UP_STEPS: u32 = 10;

/// Spawns the logic thread that owns the state machine.
///
/// The thread runs a fixed-timestep loop that:
/// 1. Processes actions from the input thread
/// 2. Handles system events (resize, quit)
/// 3. Updates the state machine at `tick_rate` Hz
/// 4. Publishes snapshots to observers
pub fn start_thread(
    bus: SystemBus,
    mut state: GlobalState,
    tick_rate: u32,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("Logic Thread".to_string())
        .spawn(move || {
            log::info!("LOGIC: Thread started at {} ticks/s", tick_rate);

            let mut accumulator = Duration::ZERO;
            let mut last_time = Instant::now();
            let target_dt = Duration::from_secs_f64(1.0 / f64::from(tick_rate.max(1)));

            loop {
                // 1. Process input actions
                while let Ok(action) = bus.action_rx.try_recv() {
                    state.handle_action(action);
                }

                // 2. Handle system events
                while let Ok(sys_evt) = bus.sys_rx.try_recv() {
                    match sys_evt {
                        SystemEvent::Quit => {
                            log::info!("LOGIC: Quit received...");
                            state.shutdown();
                            return;
                        }
                        SystemEvent::Resize { width, height } => {
                            state.resize(width, height);
                        }
                    }
                }

                if state.should_exit() {
                    state.shutdown();
                    return;
                }

                // 3. Fixed-timestep update loop
                let current_time = Instant::now();
                accumulator += current_time - last_time;
                last_time = current_time;

                let mut loops = 0;
                while accumulator >= target_dt && loops < MAX_CATCH_UP_STEPS {
                    state.update(target_dt.as_secs_f64());
                    accumulator -= target_dt;
                    loops += 1;
                }

                // 4. Publish a snapshot only if we updated
                if loops > 0 {
                    let _ = bus.render_tx.try_send(state.create_snapshot());
                } else {
                    thread::sleep(Duration::from_millis(1));
                }
            }
        })
}

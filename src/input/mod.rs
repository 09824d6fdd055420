//! Input thread bootstrapping and terminal event routing.

pub mod events;
pub mod manager;

use crate::input::events::{InputCommand, RawInputEvent};
use crate::input::manager::InputManager;
use crate::system::bus::{SystemBus, SystemEvent};
use crossbeam_channel::select;
use std::io::BufRead;
use std::thread::{self, JoinHandle};

pub fn start_thread(bus: SystemBus, mut manager: InputManager) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("Input Thread".to_string())
        .spawn(move || {
            log::info!("INPUT: Thread started");

            // Blocking loop: wait for an event, handle it, repeat.
            loop {
                select! {
                    recv(bus.raw_input_rx) -> raw => {
                        match raw {
                            Ok(raw_event) => {
                                if let Some(action) = manager.process(raw_event)
                                    && let Err(e) = bus.action_tx.send(action)
                                {
                                    log::error!("INPUT: Failed to send action (Logic thread died?): {}", e);
                                    break;
                                }
                            }
                            Err(_) => break,
                        }
                    }
                    recv(bus.input_cmd_rx) -> cmd => {
                        match cmd {
                            Ok(InputCommand::ReloadKeybinds(map)) => manager.reload_keybinds(&map),
                            Ok(InputCommand::SetMode(mode)) => manager.set_mode(mode),
                            Err(_) => break,
                        }
                    }
                }
            }

            log::info!("INPUT: Thread stopped");
        })
}

/// Reads stdin line by line and feeds the bus.
///
/// `quit` and end of input request shutdown; `resize W H` is forwarded as a
/// system event.
pub fn start_terminal_reader(bus: SystemBus) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("Terminal Reader".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        log::error!("INPUT: Failed to read terminal: {}", e);
                        break;
                    }
                };

                if let Some(event) = parse_system_line(&line) {
                    let quit = matches!(event, SystemEvent::Quit);
                    if bus.sys_tx.send(event).is_err() || quit {
                        return;
                    }
                    continue;
                }

                if let Some(raw) = RawInputEvent::from_line(&line)
                    && bus.raw_input_tx.send(raw).is_err()
                {
                    return;
                }
            }

            let _ = bus.sys_tx.send(SystemEvent::Quit);
        })
}

fn parse_system_line(line: &str) -> Option<SystemEvent> {
    let mut parts = line.split_whitespace();
    match parts.next()? {
        "quit" => Some(SystemEvent::Quit),
        "resize" => {
            let width = parts.next()?.parse().ok()?;
            let height = parts.next()?.parse().ok()?;
            Some(SystemEvent::Resize { width, height })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_lines() {
        assert!(matches!(parse_system_line("quit"), Some(SystemEvent::Quit)));
        assert!(matches!(
            parse_system_line("resize 1024 768"),
            Some(SystemEvent::Resize { width: 1024, height: 768 })
        ));
        assert!(parse_system_line("resize big").is_none());
        assert!(parse_system_line("d").is_none());
    }
}

use super::events::{GameAction, RawInputEvent};
use crate::models::level::GameMode;
use crate::models::settings::default_keybinds;
use std::collections::HashMap;

/// Resolves key names into game actions.
///
/// Lane keys are looked up for the active mode first, so one key can be a
/// lane in 2K and a different lane in 4K.
pub struct InputManager {
    mode: GameMode,
    lanes: HashMap<GameMode, HashMap<String, usize>>,
    bindings: HashMap<String, GameAction>,
    pointer_keys: Vec<String>,
    cursor: (f32, f32),
}

impl InputManager {
    pub fn new(mode: GameMode, keybinds: &HashMap<String, Vec<String>>) -> Self {
        let mut manager = Self {
            mode,
            lanes: HashMap::new(),
            bindings: HashMap::new(),
            pointer_keys: Vec::new(),
            cursor: (0.0, 0.0),
        };
        manager.reload_keybinds(&default_keybinds());
        manager.reload_keybinds(keybinds);
        manager
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        if self.mode != mode {
            log::info!("INPUT: Lane layout switched to {}", mode);
            self.mode = mode;
        }
    }

    pub fn process(&mut self, event: RawInputEvent) -> Option<GameAction> {
        match event {
            RawInputEvent::PointerMove { x, y } => {
                self.cursor = (x, y);
                None
            }
            RawInputEvent::PointerPress { x, y } => {
                self.cursor = (x, y);
                Some(GameAction::Pointer { x, y })
            }
            RawInputEvent::Text(text) => Some(GameAction::Text(text)),
            RawInputEvent::Key(key) => self.resolve_key(&key),
        }
    }

    fn resolve_key(&self, key: &str) -> Option<GameAction> {
        if let Some(column) = self.lanes.get(&self.mode).and_then(|map| map.get(key)) {
            return Some(GameAction::Hit { column: *column });
        }

        if self.mode == GameMode::FreePlace && self.pointer_keys.iter().any(|k| k == key) {
            let (x, y) = self.cursor;
            return Some(GameAction::Pointer { x, y });
        }

        let action = self.bindings.get(key).cloned();
        if action.is_none() {
            log::debug!("INPUT: Unbound key '{}'", key);
        }
        action
    }

    /// Replaces every action present in `keybinds`; others keep their keys.
    pub fn reload_keybinds(&mut self, keybinds: &HashMap<String, Vec<String>>) {
        for (name, keys) in keybinds {
            let keys: Vec<String> = keys.iter().map(|k| k.trim().to_lowercase()).collect();

            if let Some((mode, column)) = parse_lane_action(name) {
                let map = self.lanes.entry(mode).or_default();
                map.retain(|_, c| *c != column);
                for key in keys {
                    map.insert(key, column);
                }
                continue;
            }

            if name == "pointer" {
                self.pointer_keys = keys;
                continue;
            }

            let Some(action) = named_action(name) else {
                log::warn!("INPUT: Unknown keybind action '{}'", name);
                continue;
            };
            self.bindings.retain(|_, a| *a != action);
            for key in keys {
                self.bindings.insert(key, action.clone());
            }
        }
    }
}

/// `lanes2.1` -> (Lanes2, 1)
fn parse_lane_action(name: &str) -> Option<(GameMode, usize)> {
    let (family, column) = name.split_once('.')?;
    let mode = match family {
        "lanes2" => GameMode::Lanes2,
        "lanes4" => GameMode::Lanes4,
        _ => return None,
    };
    let column: usize = column.parse().ok()?;
    (column < mode.lane_count()?).then_some((mode, column))
}

fn named_action(name: &str) -> Option<GameAction> {
    Some(match name {
        "up" => GameAction::Navigation { y: -1 },
        "down" => GameAction::Navigation { y: 1 },
        "confirm" => GameAction::Confirm,
        "back" => GameAction::Back,
        "backspace" => GameAction::Backspace,
        "cycle_model" => GameAction::CycleModel,
        "cycle_mode" => GameAction::CycleMode,
        "cycle_speed" => GameAction::CycleSpeed,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> RawInputEvent {
        RawInputEvent::Key(name.to_string())
    }

    #[test]
    fn lane_keys_follow_mode() {
        let mut manager = InputManager::new(GameMode::Lanes2, &HashMap::new());
        assert_eq!(manager.process(key("d")), Some(GameAction::Hit { column: 1 }));
        assert_eq!(manager.process(key("left")), Some(GameAction::Hit { column: 0 }));

        manager.set_mode(GameMode::Lanes4);
        assert_eq!(manager.process(key("d")), Some(GameAction::Hit { column: 0 }));
        assert_eq!(manager.process(key("k")), Some(GameAction::Hit { column: 3 }));
    }

    #[test]
    fn pointer_key_uses_cursor() {
        let mut manager = InputManager::new(GameMode::FreePlace, &HashMap::new());
        assert_eq!(manager.process(RawInputEvent::PointerMove { x: 200.0, y: 250.0 }), None);
        assert_eq!(
            manager.process(key("z")),
            Some(GameAction::Pointer { x: 200.0, y: 250.0 })
        );

        manager.set_mode(GameMode::Lanes2);
        assert_eq!(manager.process(key("z")), None);
    }

    #[test]
    fn ui_keys_resolve() {
        let mut manager = InputManager::new(GameMode::Lanes2, &HashMap::new());
        assert_eq!(manager.process(key("enter")), Some(GameAction::Confirm));
        assert_eq!(manager.process(key("esc")), Some(GameAction::Back));
        assert_eq!(manager.process(key("up")), Some(GameAction::Navigation { y: -1 }));
        assert_eq!(manager.process(key("1")), Some(GameAction::CycleModel));
        assert_eq!(manager.process(key("m")), Some(GameAction::CycleMode));
        assert_eq!(manager.process(key("q")), None);
    }

    #[test]
    fn reload_replaces_lane_keys() {
        let mut manager = InputManager::new(GameMode::Lanes4, &HashMap::new());
        let mut binds = HashMap::new();
        binds.insert("lanes4.0".to_string(), vec!["S".to_string()]);
        manager.reload_keybinds(&binds);

        assert_eq!(manager.process(key("s")), Some(GameAction::Hit { column: 0 }));
        assert_eq!(manager.process(key("d")), None);
        assert_eq!(manager.process(key("f")), Some(GameAction::Hit { column: 1 }));
    }

    #[test]
    fn lane_actions_parse() {
        assert_eq!(parse_lane_action("lanes2.1"), Some((GameMode::Lanes2, 1)));
        assert_eq!(parse_lane_action("lanes2.2"), None);
        assert_eq!(parse_lane_action("pointer"), None);
    }
}

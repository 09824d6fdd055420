use crate::models::level::GameMode;
use std::collections::HashMap;

/// One raw event read from the terminal, one per line.
///
/// - `click X Y` presses the pointer at a position
/// - `move X Y` moves the cursor without pressing
/// - `type TEXT` enters text
/// - anything else is a key name (`d`, `enter`, `esc`, ...)
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    Key(String),
    PointerMove { x: f32, y: f32 },
    PointerPress { x: f32, y: f32 },
    Text(String),
}

impl RawInputEvent {
    pub fn from_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head {
            "type" if !rest.is_empty() => Some(Self::Text(rest.to_string())),
            "click" => parse_point(rest).map(|(x, y)| Self::PointerPress { x, y }),
            "move" => parse_point(rest).map(|(x, y)| Self::PointerMove { x, y }),
            _ => Some(Self::Key(line.to_lowercase())),
        }
    }
}

fn parse_point(text: &str) -> Option<(f32, f32)> {
    let mut parts = text.split_whitespace();
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((x, y))
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    // Gameplay
    Hit { column: usize },
    Pointer { x: f32, y: f32 },

    // System / UI
    Back,
    Confirm,
    Navigation { y: i32 },
    Text(String),
    Backspace,

    // Settings
    CycleModel,
    CycleMode,
    CycleSpeed,
    ReloadKeybinds,
}

impl GameAction {
    /// Actions that count as "any press" on hold screens.
    pub fn is_press(&self) -> bool {
        !matches!(self, GameAction::ReloadKeybinds)
    }
}

#[derive(Debug, Clone)]
pub enum InputCommand {
    ReloadKeybinds(HashMap<String, Vec<String>>),
    /// Lane keys depend on the active mode.
    SetMode(GameMode),
}

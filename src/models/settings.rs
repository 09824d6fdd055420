//! Persisted user settings.
//!
//! Stored as TOML next to the executable. Any read or parse failure falls back
//! to defaults so a broken file never blocks startup.

use super::engine::{DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, TICK_RATE};
use super::level::{GameMode, MAX_SCROLL_SPEED, MIN_SCROLL_SPEED};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const SETTINGS_PATH: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Base URL of the level generator service.
    pub base_url: String,
    pub model: String,
    /// Upper bound on one generation request, in seconds.
    pub timeout_secs: u64,
    /// Skip the network entirely and always use the offline level.
    pub offline: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "mistral".to_string(),
            timeout_secs: 60,
            offline: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsState {
    pub game_mode: GameMode,
    /// Lane descent speed chosen by the player (1-12).
    pub scroll_speed: u32,
    pub field_width: f32,
    pub field_height: f32,
    pub tick_rate: u32,
    pub generator: GeneratorSettings,
    /// Action name -> key names.
    pub keybinds: HashMap<String, Vec<String>>,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            game_mode: GameMode::default(),
            scroll_speed: 8,
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            tick_rate: TICK_RATE,
            generator: GeneratorSettings::default(),
            keybinds: default_keybinds(),
        }
    }
}

impl SettingsState {
    /// Loads settings from `path`, or defaults if it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content).unwrap_or_else(|e| {
                log::warn!("SETTINGS: Invalid {:?}, using defaults: {}", path, e);
                Self::default()
            }),
            Err(_) => {
                log::info!("SETTINGS: No settings file at {:?}, using defaults", path);
                Self::default()
            }
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        let mut settings: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        let content = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, content).map_err(|e| e.to_string())
    }

    /// Cycles the lane scroll speed through 1..=12.
    pub fn cycle_scroll_speed(&mut self) {
        self.scroll_speed = (self.scroll_speed % MAX_SCROLL_SPEED) + 1;
    }

    fn sanitize(&mut self) {
        self.scroll_speed = self.scroll_speed.clamp(MIN_SCROLL_SPEED, MAX_SCROLL_SPEED);
        if self.tick_rate == 0 {
            self.tick_rate = TICK_RATE;
        }
        if !(self.field_width > 0.0 && self.field_height > 0.0) {
            self.field_width = DEFAULT_FIELD_WIDTH;
            self.field_height = DEFAULT_FIELD_HEIGHT;
        }
        for (action, keys) in default_keybinds() {
            self.keybinds.entry(action).or_insert(keys);
        }
    }
}

/// Default key names per action, used to seed missing entries.
pub fn default_keybinds() -> HashMap<String, Vec<String>> {
    let binds: [(&str, &[&str]); 15] = [
        ("lanes2.0", &["a", "left"]),
        ("lanes2.1", &["d", "right"]),
        ("lanes4.0", &["d"]),
        ("lanes4.1", &["f"]),
        ("lanes4.2", &["j"]),
        ("lanes4.3", &["k"]),
        ("pointer", &["z", "x"]),
        ("up", &["up"]),
        ("down", &["down"]),
        ("confirm", &["enter"]),
        ("back", &["esc"]),
        ("backspace", &["backspace"]),
        ("cycle_model", &["1"]),
        ("cycle_mode", &["m"]),
        ("cycle_speed", &["s"]),
    ];
    binds
        .iter()
        .map(|(action, keys)| {
            (
                action.to_string(),
                keys.iter().map(|k| k.to_string()).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let settings = SettingsState::from_toml(
            r#"
            game_mode = "4K"
            scroll_speed = 40

            [generator]
            model = "gemma3"
            "#,
        )
        .unwrap();

        assert_eq!(settings.game_mode, GameMode::Lanes4);
        assert_eq!(settings.scroll_speed, MAX_SCROLL_SPEED);
        assert_eq!(settings.generator.model, "gemma3");
        assert_eq!(settings.generator.timeout_secs, 60);
        assert_eq!(settings.keybinds["lanes4.2"], vec!["j".to_string()]);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(SettingsState::from_toml("game_mode = [").is_err());
    }

    #[test]
    fn scroll_speed_cycles() {
        let mut settings = SettingsState {
            scroll_speed: 12,
            ..SettingsState::default()
        };
        settings.cycle_scroll_speed();
        assert_eq!(settings.scroll_speed, 1);
        settings.cycle_scroll_speed();
        assert_eq!(settings.scroll_speed, 2);
    }

    #[test]
    fn serialized_settings_reload() {
        let settings = SettingsState::default();
        let text = toml::to_string_pretty(&settings).unwrap();
        assert_eq!(SettingsState::from_toml(&text).unwrap(), settings);
    }
}

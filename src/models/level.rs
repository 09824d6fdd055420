//! Level descriptors produced by the generator and consumed by a session.
//!
//! A descriptor is written once when a session loads and is read-only for the
//! rest of the run. The wire shape sent by the generator is kept separate
//! (`LevelPayload`) so untrusted values get clamped on the way in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB triple.
pub type Rgb = [u8; 3];

pub const MIN_TEMPO_BPM: u32 = 80;
pub const MAX_TEMPO_BPM: u32 = 160;
pub const MIN_SCROLL_SPEED: u32 = 1;
pub const MAX_SCROLL_SPEED: u32 = 12;

pub const FALLBACK_TEMPO_BPM: u32 = 120;
pub const FALLBACK_SCROLL_SPEED: u32 = 8;

/// Input/placement scheme for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Two vertical lanes.
    #[default]
    #[serde(rename = "2K")]
    Lanes2,
    /// Four vertical lanes.
    #[serde(rename = "4K")]
    Lanes4,
    /// Free 2D placement with shrinking approach circles.
    #[serde(rename = "OSU")]
    FreePlace,
}

impl GameMode {
    /// Number of lanes, `None` for free placement.
    pub fn lane_count(self) -> Option<usize> {
        match self {
            GameMode::Lanes2 => Some(2),
            GameMode::Lanes4 => Some(4),
            GameMode::FreePlace => None,
        }
    }

    pub fn is_lane_mode(self) -> bool {
        self.lane_count().is_some()
    }

    /// Next mode in the settings cycle.
    pub fn next(self) -> Self {
        match self {
            GameMode::Lanes2 => GameMode::Lanes4,
            GameMode::Lanes4 => GameMode::FreePlace,
            GameMode::FreePlace => GameMode::Lanes2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameMode::Lanes2 => "2K",
            GameMode::Lanes4 => "4K",
            GameMode::FreePlace => "OSU",
        }
    }

    /// Human description used when prompting the generator.
    pub fn describe(self) -> &'static str {
        match self {
            GameMode::Lanes2 => "2 vertical lanes (Left, Right)",
            GameMode::Lanes4 => "4 vertical lanes (D, F, J, K)",
            GameMode::FreePlace => "Random circle positions on screen (x: 0-800, y: 0-600)",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cosmetic colors for a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub bg: Rgb,
    pub lane: Rgb,
    pub note: Rgb,
    pub hit: Rgb,
}

impl Palette {
    /// Neutral palette used by the offline fallback.
    pub fn neutral() -> Self {
        Self {
            bg: [20, 20, 30],
            lane: [50, 50, 50],
            note: [0, 255, 255],
            hit: [255, 255, 255],
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Immutable per-session level configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelDescriptor {
    pub name: String,
    pub tempo_bpm: u32,
    /// Descent rate for lane modes, inverse shrink rate for free placement.
    pub scroll_speed: u32,
    pub mode: GameMode,
    pub palette: Palette,
    pub intro_text: String,
    pub flavor_text: String,
}

impl LevelDescriptor {
    /// Built-in descriptor used whenever generation is unavailable.
    pub fn fallback(mode: GameMode) -> Self {
        Self {
            name: "Offline Protocol".to_string(),
            tempo_bpm: FALLBACK_TEMPO_BPM,
            scroll_speed: FALLBACK_SCROLL_SPEED,
            mode,
            palette: Palette::neutral(),
            intro_text: "CRITICAL ERROR: Connection to the main neural network has been severed. \
                         Defaulting to local rhythm protocols."
                .to_string(),
            flavor_text: "Local simulation active.".to_string(),
        }
    }

    /// Seconds between two consecutive beats.
    pub fn beat_interval(&self) -> f64 {
        60.0 / self.tempo_bpm as f64
    }
}

/// Level as the generator writes it. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LevelPayload {
    pub name: Option<String>,
    pub bpm: Option<f64>,
    pub speed: Option<f64>,
    pub palette: Option<Palette>,
    pub introtext: Option<String>,
    pub flavor_text: Option<String>,
}

impl LevelPayload {
    /// Converts into a descriptor, clamping numbers and filling gaps from the fallback.
    pub fn into_descriptor(self, mode: GameMode) -> LevelDescriptor {
        let fallback = LevelDescriptor::fallback(mode);
        LevelDescriptor {
            name: self
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "Untitled".to_string()),
            tempo_bpm: clamp_rounded(self.bpm, MIN_TEMPO_BPM, MAX_TEMPO_BPM, fallback.tempo_bpm),
            scroll_speed: clamp_rounded(
                self.speed,
                MIN_SCROLL_SPEED,
                MAX_SCROLL_SPEED,
                fallback.scroll_speed,
            ),
            mode,
            palette: self.palette.unwrap_or(fallback.palette),
            intro_text: self.introtext.unwrap_or(fallback.intro_text),
            flavor_text: self.flavor_text.unwrap_or(fallback.flavor_text),
        }
    }
}

fn clamp_rounded(value: Option<f64>, min: u32, max: u32, default: u32) -> u32 {
    match value {
        Some(v) if v.is_finite() => (v.round().max(min as f64).min(max as f64)) as u32,
        _ => default,
    }
}

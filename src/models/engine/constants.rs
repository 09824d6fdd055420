//! Gameplay tuning constants shared by the scheduler, evaluator and state machine.

/// Beats of lead time between spawning a note and its target beat.
pub const SPAWN_LEAD_BEATS: i64 = 2;

pub const MAX_HP: i32 = 100;
/// HP lost when a note passes its miss window untouched.
pub const EXPIRY_HP_PENALTY: i32 = 10;
/// HP lost on a lane press that matches nothing.
pub const FAILED_PRESS_HP_PENALTY: i32 = 2;

/// Inactive notes stay in the note set this long past their target for rendering.
pub const RENDER_HORIZON_SECS: f64 = 1.0;

/// Ticks a judgement label stays on screen.
pub const HIT_DISPLAY_TICKS: u32 = 30;
pub const MISS_DISPLAY_TICKS: u32 = 20;

pub const INTRO_SECS: f64 = 4.0;
pub const COUNTDOWN_FROM: i32 = 3;

/// Logic ticks per second.
pub const TICK_RATE: u32 = 60;

pub const DEFAULT_FIELD_WIDTH: f32 = 800.0;
pub const DEFAULT_FIELD_HEIGHT: f32 = 600.0;

/// Pointer distance under which a free-placement note counts as targeted.
pub const HIT_RADIUS: f32 = 50.0;
/// Radius of a free-placement note at its target time.
pub const APPROACH_BASE_RADIUS: f32 = 30.0;

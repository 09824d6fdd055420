//! Judging player input against the live note set.
//!
//! Lane presses match active notes in the same lane; pointer activations match
//! active notes within the hit radius. Among matches the note closest in time
//! wins, with earlier-spawned notes winning ties. At most one note is resolved
//! per event.

use super::GameEngine;
use crate::models::engine::{Note, PlayfieldConfig};
use crate::models::level::GameMode;
use crate::models::stats::Judgement;
use std::fmt;

/// A press the evaluator understands. Releases carry no meaning for judging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    LanePress { lane: usize },
    PointerActivate { x: f32, y: f32 },
}

/// Result of judging one input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// A note was resolved.
    Hit {
        judgement: Judgement,
        offset_us: i64,
        points: u32,
    },
    /// Lane press with nothing to hit inside the window.
    FailedPress,
    /// Pointer activation with nothing to hit; no state change.
    Whiff,
}

/// Input that does not fit the session and is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidInput {
    LaneOutOfRange { lane: usize, lanes: usize },
    WrongMode { mode: GameMode },
    BadPosition { x: f32, y: f32 },
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInput::LaneOutOfRange { lane, lanes } => {
                write!(f, "lane {} out of range for {} lanes", lane, lanes)
            }
            InvalidInput::WrongMode { mode } => write!(f, "event does not apply to {} mode", mode),
            InvalidInput::BadPosition { x, y } => write!(f, "position ({}, {}) is off the field", x, y),
        }
    }
}

impl std::error::Error for InvalidInput {}

/// Checks an event against the session mode and field bounds.
pub fn validate(event: &InputEvent, mode: GameMode, field: &PlayfieldConfig) -> Result<(), InvalidInput> {
    match (*event, mode.lane_count()) {
        (InputEvent::LanePress { lane }, Some(lanes)) if lane >= lanes => {
            Err(InvalidInput::LaneOutOfRange { lane, lanes })
        }
        (InputEvent::LanePress { .. }, Some(_)) => Ok(()),
        (InputEvent::PointerActivate { x, y }, None) => {
            if x.is_finite() && y.is_finite() && field.contains(x, y) {
                Ok(())
            } else {
                Err(InvalidInput::BadPosition { x, y })
            }
        }
        _ => Err(InvalidInput::WrongMode { mode }),
    }
}

/// Finds the matching active note closest in time to `current_time`.
///
/// Returns its index and signed offset in microseconds. Window limits are not
/// applied here.
pub fn select_candidate(
    notes: &[Note],
    event: &InputEvent,
    current_time: f64,
    hit_radius: f32,
) -> Option<(usize, i64)> {
    let mut best: Option<(usize, i64)> = None;

    for (i, note) in notes.iter().enumerate() {
        if !note.is_active() || !matches_event(note, event, hit_radius) {
            continue;
        }
        let offset = note.offset_us(current_time);
        // Strict comparison keeps the earlier-spawned note on ties.
        if best.is_none_or(|(_, b)| offset.abs() < b.abs()) {
            best = Some((i, offset));
        }
    }

    best
}

fn matches_event(note: &Note, event: &InputEvent, hit_radius: f32) -> bool {
    match *event {
        InputEvent::LanePress { lane } => note.lane() == Some(lane),
        InputEvent::PointerActivate { x, y } => note.position().is_some_and(|(nx, ny)| {
            let (dx, dy) = (x - nx, y - ny);
            (dx * dx + dy * dy).sqrt() < hit_radius
        }),
    }
}

impl GameEngine {
    /// Queues a press to be judged on the next tick, after scheduling.
    pub fn queue_input(&mut self, event: InputEvent) {
        self.pending_inputs.push_back(event);
    }

    /// Judges one input event at `current_time` and applies its effects.
    ///
    /// Invalid events are rejected without touching any state.
    pub fn evaluate(&mut self, event: InputEvent, current_time: f64) -> Result<HitOutcome, InvalidInput> {
        validate(&event, self.level.mode, &self.playfield)?;

        let candidate = select_candidate(
            self.notes.as_slice(),
            &event,
            current_time,
            self.hit_window.hit_radius,
        );

        let judged = candidate.and_then(|(idx, offset)| {
            self.hit_window
                .judge(offset)
                .map(|judgement| (idx, offset, judgement))
        });

        match judged {
            Some((idx, offset_us, judgement)) => {
                self.notes.resolve(idx);
                let points = judgement.points(self.combo);
                self.apply_judgement(judgement);
                Ok(HitOutcome::Hit {
                    judgement,
                    offset_us,
                    points,
                })
            }
            None => match event {
                InputEvent::LanePress { .. } => {
                    self.apply_judgement(Judgement::FailedPress);
                    Ok(HitOutcome::FailedPress)
                }
                InputEvent::PointerActivate { .. } => Ok(HitOutcome::Whiff),
            },
        }
    }

    /// Judges every queued input at `current_time`.
    pub(crate) fn process_inputs(&mut self, current_time: f64) {
        while let Some(event) = self.pending_inputs.pop_front() {
            match self.evaluate(event, current_time) {
                Ok(outcome) => log::debug!("SESSION: {:?} -> {:?}", event, outcome),
                Err(e) => log::debug!("SESSION: Ignoring input: {}", e),
            }
        }
    }
}

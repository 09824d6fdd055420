//! Beat-synchronized note spawning.
//!
//! The scheduler keeps a watermark of the highest beat already spawned, so it
//! can be called at any rate (variable frame time, repeated calls within one
//! beat) without ever producing two notes for the same beat.

use crate::models::engine::{Note, NotePlacement, PlayfieldConfig, SPAWN_LEAD_BEATS};
use crate::models::level::GameMode;
use rand::Rng;
use rand::rngs::StdRng;

#[derive(Debug)]
pub struct NoteScheduler {
    mode: GameMode,
    beat_interval: f64,
    session_start_time: f64,
    spawn_lead: i64,
    last_spawned_beat: i64,
    rng: StdRng,
}

impl NoteScheduler {
    pub fn new(mode: GameMode, tempo_bpm: u32, session_start_time: f64, rng: StdRng) -> Self {
        Self {
            mode,
            beat_interval: 60.0 / tempo_bpm.max(1) as f64,
            session_start_time,
            spawn_lead: SPAWN_LEAD_BEATS,
            last_spawned_beat: -1,
            rng,
        }
    }

    pub fn beat_interval(&self) -> f64 {
        self.beat_interval
    }

    pub fn session_start_time(&self) -> f64 {
        self.session_start_time
    }

    /// Highest beat index spawned so far (-1 before the first note).
    pub fn last_spawned_beat(&self) -> i64 {
        self.last_spawned_beat
    }

    /// Beat index that should exist by `current_time`, including the lead.
    pub fn target_beat_index(&self, current_time: f64) -> i64 {
        let elapsed = current_time - self.session_start_time;
        (elapsed / self.beat_interval).floor() as i64 + self.spawn_lead
    }

    /// Spawns at most one note: the one for the current target beat, if it
    /// is past the watermark.
    pub fn advance(&mut self, current_time: f64, field: &PlayfieldConfig) -> Option<Note> {
        let target_beat = self.target_beat_index(current_time);
        if target_beat <= self.last_spawned_beat {
            return None;
        }

        let target_time = self.session_start_time + target_beat as f64 * self.beat_interval;
        let placement = self.place(field);
        self.last_spawned_beat = target_beat;

        log::trace!("SCHED: beat {} at {:.3}s -> {:?}", target_beat, target_time, placement);
        Some(Note::new(target_beat, target_time, placement))
    }

    fn place(&mut self, field: &PlayfieldConfig) -> NotePlacement {
        match self.mode.lane_count() {
            Some(lanes) => NotePlacement::Lane(self.rng.random_range(0..lanes)),
            None => {
                let (x_lo, x_hi) = field.free_x_range();
                let (y_lo, y_hi) = field.free_y_range();
                NotePlacement::Free {
                    x: self.rng.random_range(x_lo..=x_hi) as f32,
                    y: self.rng.random_range(y_lo..=y_hi) as f32,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn scheduler(mode: GameMode, bpm: u32) -> NoteScheduler {
        NoteScheduler::new(mode, bpm, 0.0, StdRng::seed_from_u64(7))
    }

    #[test]
    fn repeated_calls_never_duplicate_a_beat() {
        let field = PlayfieldConfig::default();
        for bpm in [80, 97, 120, 133, 160] {
            let mut sched = scheduler(GameMode::Lanes4, bpm);
            let mut notes = Vec::new();
            let mut t = 0.0;
            while t < 20.0 {
                // Several calls per frame, frame length varies.
                for _ in 0..3 {
                    notes.extend(sched.advance(t, &field));
                }
                t += if notes.len() % 2 == 0 { 0.004 } else { 0.031 };
            }

            let interval = 60.0 / bpm as f64;
            for pair in notes.windows(2) {
                let gap = pair[1].target_time() - pair[0].target_time();
                assert!((gap - interval).abs() < 1e-9, "bpm {bpm}: gap {gap}");
                assert_eq!(pair[1].beat_index(), pair[0].beat_index() + 1);
            }
        }
    }

    #[test]
    fn spawns_through_lead_beat() {
        let field = PlayfieldConfig::default();
        let mut sched = scheduler(GameMode::Lanes2, 120);
        let mut t = 0.0;
        let mut notes = Vec::new();
        while t <= 1.2 + 1e-9 {
            notes.extend(sched.advance(t, &field));
            t += 1.0 / 60.0;
        }
        // floor(1.2 / 0.5) + 2
        assert_eq!(sched.last_spawned_beat(), 4);
        let targets: Vec<f64> = notes.iter().map(|n| n.target_time()).collect();
        assert_eq!(targets, vec![1.0, 1.5, 2.0]);
        assert!(notes.iter().all(|n| matches!(n.lane(), Some(0 | 1))));
    }

    #[test]
    fn second_call_in_same_beat_is_empty() {
        let field = PlayfieldConfig::default();
        let mut sched = scheduler(GameMode::Lanes2, 120);
        assert!(sched.advance(0.1, &field).is_some());
        assert!(sched.advance(0.1, &field).is_none());
        assert!(sched.advance(0.49, &field).is_none());
        assert!(sched.advance(0.5, &field).is_some());
    }

    #[test]
    fn free_placement_stays_inside_margins() {
        let field = PlayfieldConfig::default();
        let mut sched = scheduler(GameMode::FreePlace, 160);
        let mut t = 0.0;
        while t < 30.0 {
            if let Some(note) = sched.advance(t, &field) {
                let (x, y) = note.position().unwrap();
                assert!((100.0..=700.0).contains(&x));
                assert!((150.0..=450.0).contains(&y));
            }
            t += 0.1;
        }
    }

    #[test]
    fn start_offset_shifts_targets() {
        let field = PlayfieldConfig::default();
        let mut sched = NoteScheduler::new(GameMode::Lanes2, 120, 10.0, StdRng::seed_from_u64(1));
        let note = sched.advance(10.0, &field).unwrap();
        assert_eq!(note.beat_index(), 2);
        assert!((note.target_time() - 11.0).abs() < 1e-12);
    }
}

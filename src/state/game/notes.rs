//! The live note set and its bookkeeping.
//!
//! Ownership rules: the scheduler only appends; judging only flips the
//! `active` flag; notes are physically removed by `purge` once they are
//! inactive and past the render horizon.

use super::{GameEngine, JudgementDisplay};
use crate::models::engine::{
    EXPIRY_HP_PENALTY, FAILED_PRESS_HP_PENALTY, HIT_DISPLAY_TICKS, HitWindow, MAX_HP,
    MISS_DISPLAY_TICKS, Note, RENDER_HORIZON_SECS, secs_to_us,
};
use crate::models::stats::Judgement;

#[derive(Debug, Clone, Default)]
pub struct NoteSet {
    notes: Vec<Note>,
}

impl NoteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, note: Note) {
        debug_assert!(
            self.notes
                .last()
                .is_none_or(|last| last.target_time() < note.target_time()),
            "notes must be appended in target-time order"
        );
        self.notes.push(note);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    pub fn as_slice(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.notes.iter().filter(|n| n.is_active()).count()
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }

    /// Deactivates the note at `index`. Returns false if it was already inactive.
    pub(crate) fn resolve(&mut self, index: usize) -> bool {
        match self.notes.get_mut(index) {
            Some(note) if note.is_active() => {
                note.deactivate();
                true
            }
            _ => false,
        }
    }

    /// Deactivates every active note past its miss window. Returns how many expired.
    pub(crate) fn expire_overdue(&mut self, current_time: f64, window: &HitWindow) -> u32 {
        let mut expired = 0;
        for note in self.notes.iter_mut().filter(|n| n.is_active()) {
            if window.is_expired(note.offset_us(current_time)) {
                note.deactivate();
                expired += 1;
            }
        }
        expired
    }

    /// Drops inactive notes that no longer matter for rendering.
    pub(crate) fn purge(&mut self, current_time: f64) {
        let now_us = secs_to_us(current_time);
        let horizon_us = secs_to_us(RENDER_HORIZON_SECS);
        self.notes
            .retain(|n| n.is_active() || now_us < secs_to_us(n.target_time()) + horizon_us);
    }
}

impl GameEngine {
    /// Per-tick note maintenance: display countdown, expiry, purge.
    pub(crate) fn update_notes(&mut self, current_time: f64) {
        if let Some(display) = &mut self.last_judgement {
            display.remaining_ticks = display.remaining_ticks.saturating_sub(1);
        }
        if self.last_judgement.is_some_and(|d| d.remaining_ticks == 0) {
            self.last_judgement = None;
        }

        let expired = self.notes.expire_overdue(current_time, &self.hit_window);
        for _ in 0..expired {
            self.apply_judgement(Judgement::Miss);
        }

        self.notes.purge(current_time);
    }

    /// Applies a judgement to score, combo, HP and stats.
    pub(crate) fn apply_judgement(&mut self, j: Judgement) {
        self.hit_stats.record(j);

        match j {
            Judgement::Miss => {
                self.combo = 0;
                self.hp = (self.hp - EXPIRY_HP_PENALTY).clamp(0, MAX_HP);
            }
            Judgement::FailedPress => {
                self.combo = 0;
                self.hp = (self.hp - FAILED_PRESS_HP_PENALTY).clamp(0, MAX_HP);
            }
            _ => {
                self.score = self.score.saturating_add(j.points(self.combo));
                self.combo = self.combo.saturating_add(1);
                self.max_combo = self.max_combo.max(self.combo);
            }
        }

        self.judgement_seq += 1;
        self.last_judgement = Some(JudgementDisplay {
            judgement: j,
            sequence: self.judgement_seq,
            color: self.colors.for_judgement(j),
            remaining_ticks: if j.is_hit() {
                HIT_DISPLAY_TICKS
            } else {
                MISS_DISPLAY_TICKS
            },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::engine::NotePlacement;
    use crate::models::level::GameMode;
    use crate::state::game::tests::engine_with;

    fn set_with(targets: &[f64]) -> NoteSet {
        let mut set = NoteSet::new();
        for (i, t) in targets.iter().enumerate() {
            set.push(Note::new(i as i64, *t, NotePlacement::Lane(0)));
        }
        set
    }

    #[test]
    fn expiry_is_strictly_after_window() {
        let mut set = set_with(&[2.0, 3.0]);
        let hw = HitWindow::lanes();
        assert_eq!(set.expire_overdue(2.2, &hw), 0);
        assert_eq!(set.expire_overdue(2.21, &hw), 1);
        assert_eq!(set.active_count(), 1);
        // Already expired notes are not counted twice.
        assert_eq!(set.expire_overdue(2.5, &hw), 0);
    }

    #[test]
    fn purge_keeps_active_and_recent_notes() {
        let mut set = set_with(&[1.0, 2.0, 3.0]);
        assert!(set.resolve(0));
        assert!(set.resolve(1));
        set.purge(2.5);
        // Note 0 is inactive and 1.5s past target; note 1 is still within the horizon.
        let targets: Vec<f64> = set.iter().map(|n| n.target_time()).collect();
        assert_eq!(targets, vec![2.0, 3.0]);
        set.purge(10.0);
        assert_eq!(set.len(), 1);
        assert!(set.as_slice()[0].is_active());
    }

    #[test]
    fn score_saturates_on_long_combos() {
        let mut engine = engine_with(GameMode::Lanes2, &[]);
        engine.score = u32::MAX - 100;
        engine.combo = 30_000;
        engine.apply_judgement(Judgement::Perfect);
        assert_eq!(engine.score, u32::MAX);
        assert_eq!(engine.combo, 30_001);
    }

    #[test]
    fn every_judgement_gets_a_new_sequence() {
        let mut engine = engine_with(GameMode::Lanes2, &[]);
        engine.apply_judgement(Judgement::Perfect);
        let first = engine.last_judgement().unwrap().sequence;
        engine.apply_judgement(Judgement::FailedPress);
        let second = engine.last_judgement().unwrap();
        assert_eq!(second.judgement, Judgement::FailedPress);
        assert!(second.sequence > first);
    }

    #[test]
    fn resolve_is_idempotent() {
        let mut set = set_with(&[1.0]);
        assert!(set.resolve(0));
        assert!(!set.resolve(0));
        assert!(!set.resolve(5));
    }
}

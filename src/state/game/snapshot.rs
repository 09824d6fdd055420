//! Snapshot creation for GameEngine - get_snapshot

use super::GameEngine;
use crate::models::engine::{APPROACH_BASE_RADIUS, Note, NotePlacement};
use crate::shared::snapshot::{GameplaySnapshot, NoteSnapshot, NoteView};

/// Pixels per second of descent for each unit of lane scroll speed.
const SCROLL_PIXELS_PER_UNIT: f32 = 100.0;
/// Approach circle growth per second of remaining time.
const APPROACH_PIXELS_PER_SEC: f32 = 100.0;

impl GameEngine {
    /// Creates a snapshot of the current game state for rendering.
    pub fn get_snapshot(&self) -> GameplaySnapshot {
        let elapsed = self.clock - self.session_start_time();
        let interval = self.beat_interval();
        let beat_progress = if elapsed >= 0.0 {
            (elapsed % interval) / interval
        } else {
            1.0
        };

        GameplaySnapshot {
            mode: self.level.mode,
            palette: self.level.palette,
            elapsed,
            beat_interval: interval,
            beat_flash: beat_progress < 0.1,
            notes: self.notes.iter().map(|n| self.note_snapshot(n)).collect(),
            score: self.score,
            combo: self.combo,
            max_combo: self.max_combo,
            hp: self.hp,
            accuracy: self.hit_stats.calculate_accuracy(),
            last_judgement: self.last_judgement,
        }
    }

    fn note_snapshot(&self, note: &Note) -> NoteSnapshot {
        let until_target = (note.target_time() - self.clock) as f32;
        let view = match note.placement() {
            NotePlacement::Lane(lane) => NoteView::Lane {
                lane,
                x: self.playfield.lane_x(self.level.mode, lane).unwrap_or_default(),
                y: self.playfield.hit_line_y()
                    - until_target * self.scroll_speed as f32 * SCROLL_PIXELS_PER_UNIT,
            },
            NotePlacement::Free { x, y } => NoteView::Free {
                x,
                y,
                approach_radius: (until_target > 0.0)
                    .then(|| APPROACH_BASE_RADIUS + until_target * APPROACH_PIXELS_PER_SEC),
            },
        };

        NoteSnapshot {
            target_time: note.target_time(),
            active: note.is_active(),
            view,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::models::engine::NotePlacement;
    use crate::models::level::GameMode;
    use crate::shared::snapshot::NoteView;
    use crate::state::game::tests::engine_with;

    #[test]
    fn lane_note_reaches_hit_line_on_target() {
        let mut engine = engine_with(GameMode::Lanes2, &[(1.0, NotePlacement::Lane(1))]);
        engine.clock = 1.0;
        let snap = engine.get_snapshot();
        match snap.notes[0].view {
            NoteView::Lane { lane, y, .. } => {
                assert_eq!(lane, 1);
                assert!((y - 480.0).abs() < 1e-3);
            }
            other => panic!("unexpected view {other:?}"),
        }

        engine.clock = 0.5;
        let snap = engine.get_snapshot();
        // 0.5s early at speed 8: 400px above the hit line.
        assert!(matches!(snap.notes[0].view, NoteView::Lane { y, .. } if (y - 80.0).abs() < 1e-3));
    }

    #[test]
    fn free_note_shrinks_then_drops_circle() {
        let mut engine = engine_with(
            GameMode::FreePlace,
            &[(1.0, NotePlacement::Free { x: 200.0, y: 300.0 })],
        );
        engine.clock = 0.5;
        let snap = engine.get_snapshot();
        assert!(matches!(
            snap.notes[0].view,
            NoteView::Free { approach_radius: Some(r), .. } if (r - 80.0).abs() < 1e-3
        ));

        engine.clock = 1.05;
        let snap = engine.get_snapshot();
        assert!(matches!(snap.notes[0].view, NoteView::Free { approach_radius: None, .. }));
    }

    #[test]
    fn snapshot_mirrors_counters() {
        let mut engine = engine_with(GameMode::Lanes4, &[]);
        engine.score = 1200;
        engine.combo = 4;
        engine.hp = 64;
        engine.clock = 0.02;
        let snap = engine.get_snapshot();
        assert_eq!((snap.score, snap.combo, snap.hp), (1200, 4, 64));
        assert!(snap.beat_flash);
        assert_eq!(snap.mode, GameMode::Lanes4);
    }
}

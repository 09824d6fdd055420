//! Scheduled hit opportunities.
//!
//! Session time is kept in `f64` seconds; offsets used for judging are
//! converted to whole microseconds first so window edges compare exactly.

pub const US_PER_SECOND: i64 = 1_000_000;

/// Converts seconds to whole microseconds (rounded).
#[inline]
pub fn secs_to_us(secs: f64) -> i64 {
    (secs * US_PER_SECOND as f64).round() as i64
}

/// Where a note lives, depending on the session mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NotePlacement {
    /// Lane index for lane modes.
    Lane(usize),
    /// Playfield position for free placement.
    Free { x: f32, y: f32 },
}

/// A single scheduled note.
///
/// Placement and timing are fixed at creation; only the active flag changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    beat_index: i64,
    target_time: f64,
    placement: NotePlacement,
    active: bool,
}

impl Note {
    pub fn new(beat_index: i64, target_time: f64, placement: NotePlacement) -> Self {
        Self {
            beat_index,
            target_time,
            placement,
            active: true,
        }
    }

    pub fn beat_index(&self) -> i64 {
        self.beat_index
    }

    /// Absolute session-clock seconds at which the note should be hit.
    pub fn target_time(&self) -> f64 {
        self.target_time
    }

    pub fn placement(&self) -> NotePlacement {
        self.placement
    }

    pub fn lane(&self) -> Option<usize> {
        match self.placement {
            NotePlacement::Lane(lane) => Some(lane),
            NotePlacement::Free { .. } => None,
        }
    }

    pub fn position(&self) -> Option<(f32, f32)> {
        match self.placement {
            NotePlacement::Free { x, y } => Some((x, y)),
            NotePlacement::Lane(_) => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }

    /// Signed offset `current_time - target_time` in microseconds.
    pub fn offset_us(&self, current_time: f64) -> i64 {
        secs_to_us(current_time) - secs_to_us(self.target_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_exact_at_window_edges() {
        let note = Note::new(2, 1.0, NotePlacement::Lane(0));
        assert_eq!(note.offset_us(1.2), 200_000);
        assert_eq!(note.offset_us(1.05), 50_000);
        assert_eq!(note.offset_us(0.9), -100_000);
    }

    #[test]
    fn placement_accessors() {
        let lane = Note::new(0, 0.5, NotePlacement::Lane(3));
        assert_eq!(lane.lane(), Some(3));
        assert_eq!(lane.position(), None);

        let free = Note::new(0, 0.5, NotePlacement::Free { x: 120.0, y: 200.0 });
        assert_eq!(free.lane(), None);
        assert_eq!(free.position(), Some((120.0, 200.0)));
    }

    #[test]
    fn deactivation_only_flips_flag() {
        let mut note = Note::new(4, 2.0, NotePlacement::Lane(1));
        note.deactivate();
        assert!(!note.is_active());
        assert_eq!(note.target_time(), 2.0);
        assert_eq!(note.lane(), Some(1));
    }
}

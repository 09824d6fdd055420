//! Timing windows used to judge presses and expire untouched notes.

use super::constants::HIT_RADIUS;
use crate::models::level::GameMode;
use crate::models::stats::Judgement;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitWindow {
    pub perfect_us: i64,
    pub great_us: i64,
    /// Coarse tolerance: offsets at or beyond this are whiffs.
    pub tolerance_us: i64,
    /// A note is expired once its offset is strictly past this.
    pub miss_us: i64,
    /// Pointer distance for free-placement matching.
    pub hit_radius: f32,
}

impl HitWindow {
    /// Lane-mode windows.
    pub fn lanes() -> Self {
        Self {
            perfect_us: 50_000,
            great_us: 100_000,
            tolerance_us: 200_000,
            miss_us: 200_000,
            hit_radius: HIT_RADIUS,
        }
    }

    /// Free placement is tighter since proximity already filters candidates.
    pub fn free_place() -> Self {
        Self {
            tolerance_us: 100_000,
            miss_us: 100_000,
            ..Self::lanes()
        }
    }

    pub fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Lanes2 | GameMode::Lanes4 => Self::lanes(),
            GameMode::FreePlace => Self::free_place(),
        }
    }

    /// Classifies a signed offset. `None` means the press is outside the window.
    ///
    /// Bands are left-inclusive: an offset of exactly 50 ms is GREAT.
    pub fn judge(&self, offset_us: i64) -> Option<Judgement> {
        let abs = offset_us.abs();
        if abs >= self.tolerance_us {
            None
        } else if abs < self.perfect_us {
            Some(Judgement::Perfect)
        } else if abs < self.great_us {
            Some(Judgement::Great)
        } else {
            Some(Judgement::Good)
        }
    }

    pub fn is_expired(&self, offset_us: i64) -> bool {
        offset_us > self.miss_us
    }
}

impl Default for HitWindow {
    fn default() -> Self {
        Self::lanes()
    }
}

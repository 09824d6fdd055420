//! Playfield geometry: lane positions and free-placement bounds.

use super::constants::{DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH};
use crate::models::level::GameMode;

/// Distance from the bottom edge to the hit line.
const HIT_LINE_OFFSET: f32 = 120.0;
/// Lane centers as fractions of the field width.
const LANES2_X: [f32; 2] = [0.35, 0.65];
const LANES4_X: [f32; 4] = [0.2, 0.4, 0.6, 0.8];
/// Free-placement notes keep this far from the left/right edges.
const FREE_MARGIN_X: f32 = 100.0;
/// Free-placement notes keep this far from the top/bottom edges.
const FREE_MARGIN_Y: f32 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayfieldConfig {
    pub width: f32,
    pub height: f32,
}

impl PlayfieldConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn update_size(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
    }

    pub fn hit_line_y(&self) -> f32 {
        self.height - HIT_LINE_OFFSET
    }

    /// Horizontal center of a lane, `None` for free placement or bad lanes.
    pub fn lane_x(&self, mode: GameMode, lane: usize) -> Option<f32> {
        let fractions: &[f32] = match mode {
            GameMode::Lanes2 => &LANES2_X,
            GameMode::Lanes4 => &LANES4_X,
            GameMode::FreePlace => return None,
        };
        fractions.get(lane).map(|f| self.width * f)
    }

    /// Inclusive integer x range for free-placement notes.
    pub fn free_x_range(&self) -> (i32, i32) {
        safe_range(self.width, FREE_MARGIN_X)
    }

    /// Inclusive integer y range for free-placement notes.
    pub fn free_y_range(&self) -> (i32, i32) {
        safe_range(self.height, FREE_MARGIN_Y)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FIELD_WIDTH, DEFAULT_FIELD_HEIGHT)
    }
}

/// Range `[margin, extent - margin]`, collapsing to the center on tiny fields.
fn safe_range(extent: f32, margin: f32) -> (i32, i32) {
    let lo = margin as i32;
    let hi = (extent - margin) as i32;
    if hi < lo {
        let mid = (extent / 2.0) as i32;
        (mid, mid)
    } else {
        (lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_centers() {
        let field = PlayfieldConfig::default();
        let near = |got: Option<f32>, want: f32| got.is_some_and(|x| (x - want).abs() < 1e-3);
        assert!(near(field.lane_x(GameMode::Lanes2, 0), 280.0));
        assert!(near(field.lane_x(GameMode::Lanes2, 1), 520.0));
        assert!(near(field.lane_x(GameMode::Lanes4, 3), 640.0));
        assert_eq!(field.lane_x(GameMode::Lanes4, 4), None);
        assert_eq!(field.lane_x(GameMode::FreePlace, 0), None);
    }

    #[test]
    fn free_ranges_respect_margins() {
        let field = PlayfieldConfig::default();
        assert_eq!(field.free_x_range(), (100, 700));
        assert_eq!(field.free_y_range(), (150, 450));

        let tiny = PlayfieldConfig::new(120.0, 200.0);
        assert_eq!(tiny.free_x_range(), (60, 60));
    }
}

//! Hit statistics and judgement types.
//!
//! This module defines the judgement tiers used for scoring, their
//! display colors, and the per-session hit counters.

use super::level::Rgb;
use serde::{Deserialize, Serialize};

/// RGB colors for each judgement type.
#[derive(Debug, Clone, Copy)]
pub struct JudgementColors {
    pub perfect: Rgb,
    pub great: Rgb,
    pub good: Rgb,
    pub miss: Rgb,
}

impl JudgementColors {
    /// Creates default judgement colors.
    pub fn new() -> Self {
        Self {
            perfect: [0, 255, 255], // Cyan
            great: [0, 255, 100],   // Green
            good: [255, 255, 100],  // Yellow
            miss: [255, 50, 50],    // Red
        }
    }

    pub fn for_judgement(&self, j: Judgement) -> Rgb {
        match j {
            Judgement::Perfect => self.perfect,
            Judgement::Great => self.great,
            Judgement::Good => self.good,
            Judgement::Miss | Judgement::FailedPress => self.miss,
        }
    }
}

impl Default for JudgementColors {
    fn default() -> Self {
        Self::new()
    }
}

/// Judgement tiers from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Judgement {
    /// |Δt| < 50 ms.
    Perfect,
    /// |Δt| < 100 ms.
    Great,
    /// Inside the coarse window.
    Good,
    /// Note passed its miss window untouched.
    Miss,
    /// Lane press that matched no note.
    FailedPress,
}

impl Judgement {
    /// Points awarded for this tier at the given combo (before incrementing it).
    pub fn points(self, combo: u32) -> u32 {
        match self {
            Judgement::Perfect => combo.saturating_mul(20).saturating_add(200),
            Judgement::Great => combo.saturating_mul(10).saturating_add(100),
            Judgement::Good => combo.saturating_mul(5).saturating_add(50),
            Judgement::Miss | Judgement::FailedPress => 0,
        }
    }

    pub fn is_hit(self) -> bool {
        matches!(self, Judgement::Perfect | Judgement::Great | Judgement::Good)
    }

    pub fn label(self) -> &'static str {
        match self {
            Judgement::Perfect => "PERFECT",
            Judgement::Great => "GREAT",
            Judgement::Good => "GOOD",
            Judgement::Miss | Judgement::FailedPress => "MISS",
        }
    }
}

/// Accumulated hit statistics for a play session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HitStats {
    pub perfect: u32,
    pub great: u32,
    pub good: u32,
    pub miss: u32,
    pub failed_press: u32,
}

impl HitStats {
    /// Creates empty hit statistics.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, j: Judgement) {
        match j {
            Judgement::Perfect => self.perfect += 1,
            Judgement::Great => self.great += 1,
            Judgement::Good => self.good += 1,
            Judgement::Miss => self.miss += 1,
            Judgement::FailedPress => self.failed_press += 1,
        }
    }

    /// Number of notes that received a final judgement.
    pub fn judged_notes(&self) -> u32 {
        self.perfect + self.great + self.good + self.miss
    }

    /// Calculates accuracy percentage (0-100).
    ///
    /// Weights: Perfect 3, Great 2, Good 1, Miss 0. Failed presses do not
    /// resolve a note and are left out.
    pub fn calculate_accuracy(&self) -> f64 {
        let total = self.judged_notes() as f64;
        if total == 0.0 {
            return 0.0;
        }

        let score = self.perfect as f64 * 3.0 + self.great as f64 * 2.0 + self.good as f64;
        (score / (total * 3.0)) * 100.0
    }
}

//! Headless observer on the main thread.
//!
//! Consumes snapshots and logs what a player would see change: phases,
//! countdown values, judgements and the final result.

use crate::shared::snapshot::{FrameSnapshot, RenderState};
use crate::state::{Phase, SessionResult};
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum ObservedEvent {
    PhaseChanged(Phase),
    Countdown(i32),
    Judged {
        label: &'static str,
        score: u32,
        combo: u32,
        hp: i32,
    },
    SessionEnded(SessionResult),
}

#[derive(Debug, Default)]
pub struct Observer {
    phase: Option<Phase>,
    countdown: Option<i32>,
    judgement_seq: Option<u64>,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares a frame against the previous one.
    pub fn observe(&mut self, frame: &FrameSnapshot) -> Vec<ObservedEvent> {
        let mut events = Vec::new();

        if self.phase != Some(frame.phase) {
            self.phase = Some(frame.phase);
            self.countdown = None;
            self.judgement_seq = None;
            events.push(ObservedEvent::PhaseChanged(frame.phase));
            if let RenderState::Terminal(result) = &frame.view {
                events.push(ObservedEvent::SessionEnded(result.clone()));
            }
        }

        match &frame.view {
            RenderState::Countdown { value, .. } if self.countdown != Some(*value) => {
                self.countdown = Some(*value);
                events.push(ObservedEvent::Countdown(*value));
            }
            RenderState::InGame(game) => {
                if let Some(display) = game.last_judgement
                    && self.judgement_seq.is_none_or(|seen| display.sequence > seen)
                {
                    if let Some(seen) = self.judgement_seq
                        && display.sequence > seen + 1
                    {
                        log::debug!(
                            "MAIN: {} judgements folded into one frame",
                            display.sequence - seen
                        );
                    }
                    self.judgement_seq = Some(display.sequence);
                    events.push(ObservedEvent::Judged {
                        label: display.label(),
                        score: game.score,
                        combo: game.combo,
                        hp: game.hp,
                    });
                }
            }
            _ => {}
        }

        events
    }
}

/// Snapshots older than this on arrival are reported.
const STALE_FRAME: Duration = Duration::from_millis(100);

/// Logs snapshots until the logic thread finishes.
pub fn run(render_rx: Receiver<FrameSnapshot>, logic: JoinHandle<()>) {
    let mut observer = Observer::new();

    loop {
        match render_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(frame) => {
                let age = frame.timestamp.elapsed();
                if age > STALE_FRAME {
                    log::warn!("MAIN: Snapshot arrived {:?} late", age);
                }
                for event in observer.observe(&frame) {
                    log_event(&event);
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if logic.is_finished() {
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    if logic.join().is_err() {
        log::error!("MAIN: Logic thread panicked");
    }
}

fn log_event(event: &ObservedEvent) {
    match event {
        ObservedEvent::PhaseChanged(phase) => log::info!("MAIN: Phase {:?}", phase),
        ObservedEvent::Countdown(value) => log::info!("MAIN: {}...", value),
        ObservedEvent::Judged {
            label,
            score,
            combo,
            hp,
        } => log::info!("MAIN: {} | score {} | combo {} | hp {}", label, score, combo, hp),
        ObservedEvent::SessionEnded(result) => log::info!(
            "MAIN: '{}' over. Score {} | max combo {} | accuracy {:.2}% | {}P {}Gr {}Go {}M",
            result.level_name,
            result.score,
            result.max_combo,
            result.accuracy,
            result.hit_stats.perfect,
            result.hit_stats.great,
            result.hit_stats.good,
            result.hit_stats.miss
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::level::{GameMode, Palette};
    use crate::models::stats::{Judgement, JudgementColors};
    use crate::shared::snapshot::GameplaySnapshot;
    use crate::state::game::JudgementDisplay;
    use std::time::Instant;

    fn frame(phase: Phase, view: RenderState) -> FrameSnapshot {
        FrameSnapshot {
            phase,
            timestamp: Instant::now(),
            view,
        }
    }

    fn game(judgement: Option<(Judgement, u32, u64)>, combo: u32) -> RenderState {
        let colors = JudgementColors::new();
        RenderState::InGame(GameplaySnapshot {
            mode: GameMode::Lanes2,
            palette: Palette::neutral(),
            elapsed: 1.0,
            beat_interval: 0.5,
            beat_flash: false,
            notes: Vec::new(),
            score: 0,
            combo,
            max_combo: combo,
            hp: 100,
            accuracy: 100.0,
            last_judgement: judgement.map(|(judgement, remaining_ticks, sequence)| JudgementDisplay {
                judgement,
                color: colors.for_judgement(judgement),
                sequence,
                remaining_ticks,
            }),
        })
    }

    #[test]
    fn reports_phase_changes_once() {
        let mut observer = Observer::new();
        assert_eq!(
            observer.observe(&frame(Phase::Prelude, RenderState::Prelude)),
            vec![ObservedEvent::PhaseChanged(Phase::Prelude)]
        );
        assert!(observer.observe(&frame(Phase::Prelude, RenderState::Prelude)).is_empty());
    }

    #[test]
    fn reports_each_new_judgement() {
        let mut observer = Observer::new();
        observer.observe(&frame(Phase::Active, game(None, 0)));

        let events = observer.observe(&frame(Phase::Active, game(Some((Judgement::Perfect, 30, 1)), 1)));
        assert!(matches!(events[..], [ObservedEvent::Judged { label: "PERFECT", combo: 1, .. }]));

        // Same display counting down.
        assert!(observer.observe(&frame(Phase::Active, game(Some((Judgement::Perfect, 28, 1)), 1))).is_empty());

        // Another hit restarts the display.
        let events = observer.observe(&frame(Phase::Active, game(Some((Judgement::Great, 30, 2)), 2)));
        assert!(matches!(events[..], [ObservedEvent::Judged { label: "GREAT", combo: 2, .. }]));
    }

    #[test]
    fn reports_miss_with_shorter_display_than_previous_hit() {
        let mut observer = Observer::new();
        observer.observe(&frame(Phase::Active, game(Some((Judgement::Perfect, 30, 1)), 1)));

        // The MISS label starts at fewer ticks than the hit label has left.
        let events = observer.observe(&frame(Phase::Active, game(Some((Judgement::FailedPress, 20, 2)), 0)));
        assert!(matches!(events[..], [ObservedEvent::Judged { label: "MISS", combo: 0, .. }]));
    }

    #[test]
    fn reports_latest_of_several_judgements_in_one_frame() {
        let mut observer = Observer::new();
        observer.observe(&frame(Phase::Active, game(Some((Judgement::Perfect, 30, 1)), 1)));

        let events = observer.observe(&frame(Phase::Active, game(Some((Judgement::Good, 30, 4)), 4)));
        assert!(matches!(events[..], [ObservedEvent::Judged { label: "GOOD", combo: 4, .. }]));
        assert!(observer.observe(&frame(Phase::Active, game(Some((Judgement::Good, 25, 4)), 4))).is_empty());
    }

    #[test]
    fn judgement_sequence_resets_with_a_new_session() {
        let mut observer = Observer::new();
        observer.observe(&frame(Phase::Active, game(Some((Judgement::Perfect, 30, 7)), 7)));
        observer.observe(&frame(Phase::Menu, RenderState::Menu { options: Vec::new(), selected: 0 }));
        observer.observe(&frame(Phase::Active, game(None, 0)));

        let events = observer.observe(&frame(Phase::Active, game(Some((Judgement::Great, 30, 1)), 1)));
        assert!(matches!(events[..], [ObservedEvent::Judged { label: "GREAT", .. }]));
    }
}

//! Simon repeat — watch/repeat color recall.
//!
//! The classic call-and-response game: the board plays a growing color
//! sequence (the *watch* step), then the player repeats it (the *repeat*
//! step). A correct repeat appends one color; a wrong repeat costs a life
//! and replays the same sequence. Terminal condition: lives exhausted or the
//! sequence cap passed.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::metrics::SessionMetrics;
use crate::session::GameRules;
use crate::types::{Judgment, ModuleKind};

/// Smallest supported starting length.
pub const MIN_START_LEN: u32 = 1;
/// Largest supported starting length.
pub const MAX_START_LEN: u32 = 3;
/// Lives per session.
pub const LIVES: u32 = 3;
/// Sequence length at which the game tops out.
pub const LENGTH_CAP: u32 = 12;

/// Default per-color flash duration used for the presentation window.
const FLASH_MS_PER_COLOR: u64 = 800;

/// The four Simon pads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimonColor {
    /// Top-left pad.
    Red,
    /// Top-right pad.
    Green,
    /// Bottom-left pad.
    Blue,
    /// Bottom-right pad.
    Yellow,
}

impl SimonColor {
    const ALL: [SimonColor; 4] = [Self::Red, Self::Green, Self::Blue, Self::Yellow];
}

/// Which half of the call-and-response cycle the round is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimonStep {
    /// The board is playing the sequence; player input is not scored.
    Watch,
    /// The player is repeating the sequence.
    Repeat,
}

/// Player input for a Simon round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimonInput {
    /// The presentation finished; flip from watch to repeat.
    WatchDone,
    /// The full repeated sequence, in order.
    Reply(Vec<SimonColor>),
}

/// Rules for one Simon session.
#[derive(Debug, Clone)]
pub struct SimonRules {
    start_len: u32,
    lives_left: u32,
    step: SimonStep,
    rng: StdRng,
    sequence: Vec<SimonColor>,
    flash_ms_per_color: u64,
}

impl SimonRules {
    /// Build a session starting at `start_len ∈ 1..=3` colors, deterministic
    /// under `seed`.
    ///
    /// # Errors
    /// Returns [`crate::TrainError::InvalidDifficulty`] for an out-of-range
    /// starting length.
    pub fn new(start_len: u32, seed: u64) -> Result<Self> {
        super::check_difficulty(ModuleKind::SimonRepeat, start_len, MIN_START_LEN, MAX_START_LEN)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let sequence = (0..start_len).map(|_| roll_color(&mut rng)).collect();
        Ok(Self {
            start_len,
            lives_left: LIVES,
            step: SimonStep::Watch,
            rng,
            sequence,
            flash_ms_per_color: FLASH_MS_PER_COLOR,
        })
    }

    /// Override the per-color flash duration (from `TimingConfig`).
    #[must_use]
    pub fn with_flash_ms(mut self, flash_ms: u64) -> Self {
        self.flash_ms_per_color = flash_ms;
        self
    }

    /// The sequence currently being played/repeated.
    #[must_use]
    pub fn sequence(&self) -> &[SimonColor] {
        &self.sequence
    }

    /// Current watch/repeat step.
    #[must_use]
    pub fn step(&self) -> SimonStep {
        self.step
    }

    /// Remaining lives.
    #[must_use]
    pub fn lives_left(&self) -> u32 {
        self.lives_left
    }
}

fn roll_color(rng: &mut StdRng) -> SimonColor {
    SimonColor::ALL[rng.gen_range(0..SimonColor::ALL.len())]
}

impl GameRules for SimonRules {
    type Input = SimonInput;

    fn kind(&self) -> ModuleKind {
        ModuleKind::SimonRepeat
    }

    fn difficulty(&self) -> u32 {
        self.start_len
    }

    fn total_items(&self) -> usize {
        // One sequence is in play at any time.
        1
    }

    fn preview(&self) -> Option<Duration> {
        Some(Duration::from_millis(
            self.flash_ms_per_color * self.sequence.len() as u64,
        ))
    }

    fn per_item_feedback(&self) -> bool {
        true
    }

    fn judge(&mut self, input: &SimonInput, metrics: &mut SessionMetrics) -> Judgment {
        match (self.step, input) {
            (SimonStep::Watch, SimonInput::WatchDone) => {
                self.step = SimonStep::Repeat;
                Judgment::Ignored
            }
            (SimonStep::Repeat, SimonInput::Reply(reply)) => {
                metrics.rounds_played += 1;
                self.step = SimonStep::Watch;
                if *reply == self.sequence {
                    metrics.max_span = metrics.max_span.max(self.sequence.len() as u32);
                    if (self.sequence.len() as u32) < LENGTH_CAP {
                        let next = roll_color(&mut self.rng);
                        self.sequence.push(next);
                    } else {
                        // Cap reached; finished() sees the full-length win.
                        self.sequence.push(roll_color(&mut self.rng));
                    }
                    Judgment::Correct
                } else {
                    self.lives_left = self.lives_left.saturating_sub(1);
                    Judgment::Wrong
                }
            }
            // Replies during watch and watch-done during repeat are discarded.
            _ => Judgment::Ignored,
        }
    }

    fn finished(&self, metrics: &SessionMetrics) -> bool {
        self.lives_left == 0 || metrics.max_span >= LENGTH_CAP
    }

    fn details(&self, metrics: &SessionMetrics) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        map.insert("max_span".into(), metrics.max_span.into());
        map.insert("rounds".into(), metrics.rounds_played.into());
        map.insert("lives_left".into(), self.lives_left.into());
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::types::Phase;

    fn reply(session: &mut Session<SimonRules>, correct: bool) -> Judgment {
        session.submit(&SimonInput::WatchDone);
        let mut seq = session.rules().sequence().to_vec();
        if !correct {
            seq[0] = match seq[0] {
                SimonColor::Red => SimonColor::Green,
                _ => SimonColor::Red,
            };
        }
        let judgment = session.submit(&SimonInput::Reply(seq));
        if session.phase() == Phase::Feedback {
            session.resume();
        }
        judgment
    }

    #[test]
    fn out_of_range_start_rejected() {
        assert!(SimonRules::new(0, 0).is_err());
        assert!(SimonRules::new(4, 0).is_err());
    }

    #[test]
    fn reply_during_watch_is_discarded() {
        let rules = SimonRules::new(1, 23).expect("rules");
        let seq = rules.sequence().to_vec();
        let mut session = Session::new(rules).expect("session");
        session.begin();
        session.reveal();
        assert_eq!(session.submit(&SimonInput::Reply(seq)), Judgment::Ignored);
        assert_eq!(session.metrics().responses(), 0);
    }

    #[test]
    fn correct_reply_grows_the_sequence() {
        let rules = SimonRules::new(2, 23).expect("rules");
        let mut session = Session::new(rules).expect("session");
        session.begin();
        session.reveal();
        assert_eq!(reply(&mut session, true), Judgment::Correct);
        assert_eq!(session.rules().sequence().len(), 3);
        assert_eq!(session.metrics().max_span, 2);
        assert_eq!(session.rules().step(), SimonStep::Watch);
    }

    #[test]
    fn wrong_reply_replays_same_sequence() {
        let rules = SimonRules::new(3, 23).expect("rules");
        let mut session = Session::new(rules).expect("session");
        session.begin();
        session.reveal();
        let before = session.rules().sequence().to_vec();
        assert_eq!(reply(&mut session, false), Judgment::Wrong);
        assert_eq!(session.rules().sequence(), &before[..]);
        assert_eq!(session.rules().lives_left(), 2);
    }

    #[test]
    fn three_misses_end_the_session() {
        let rules = SimonRules::new(1, 23).expect("rules");
        let mut session = Session::new(rules).expect("session");
        session.begin();
        session.reveal();
        reply(&mut session, false);
        reply(&mut session, false);
        reply(&mut session, false);
        assert_eq!(session.phase(), Phase::Complete);
    }
}

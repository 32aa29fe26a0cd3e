//! Sequence memory — digit-span test.
//!
//! Each round flashes a digit sequence of the current span; the player
//! replays it. A correct replay raises the span by one and records it in
//! `max_span`; a wrong replay costs a life and re-rolls a sequence of the
//! same span. Terminal condition: lives exhausted or the span cap passed.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::metrics::SessionMetrics;
use crate::session::GameRules;
use crate::types::{Judgment, ModuleKind};

/// Smallest supported starting span.
pub const MIN_START_SPAN: u32 = 3;
/// Largest supported starting span.
pub const MAX_START_SPAN: u32 = 6;
/// Lives per session.
pub const LIVES: u32 = 3;
/// Span at which the test tops out.
pub const SPAN_CAP: u32 = 12;

/// Default per-digit flash duration used for the presentation window.
const FLASH_MS_PER_DIGIT: u64 = 800;

/// Rules for one digit-span session.
#[derive(Debug, Clone)]
pub struct SequenceRules {
    start_span: u32,
    span: u32,
    lives_left: u32,
    rng: StdRng,
    current: Vec<u8>,
    flash_ms_per_digit: u64,
}

impl SequenceRules {
    /// Build a span test starting at `start_span ∈ 3..=6`, deterministic
    /// under `seed`.
    ///
    /// # Errors
    /// Returns [`crate::TrainError::InvalidDifficulty`] for an out-of-range span.
    pub fn new(start_span: u32, seed: u64) -> Result<Self> {
        super::check_difficulty(
            ModuleKind::SequenceMemory,
            start_span,
            MIN_START_SPAN,
            MAX_START_SPAN,
        )?;
        let mut rng = StdRng::seed_from_u64(seed);
        let current = roll_sequence(&mut rng, start_span);
        Ok(Self {
            start_span,
            span: start_span,
            lives_left: LIVES,
            rng,
            current,
            flash_ms_per_digit: FLASH_MS_PER_DIGIT,
        })
    }

    /// Override the per-digit flash duration (from `TimingConfig`).
    #[must_use]
    pub fn with_flash_ms(mut self, flash_ms: u64) -> Self {
        self.flash_ms_per_digit = flash_ms;
        self
    }

    /// The sequence currently being tested.
    #[must_use]
    pub fn current_sequence(&self) -> &[u8] {
        &self.current
    }

    /// Span of the sequence currently being tested.
    #[must_use]
    pub fn span(&self) -> u32 {
        self.span
    }

    /// Remaining lives.
    #[must_use]
    pub fn lives_left(&self) -> u32 {
        self.lives_left
    }
}

fn roll_sequence(rng: &mut StdRng, span: u32) -> Vec<u8> {
    (0..span).map(|_| rng.gen_range(0..=9)).collect()
}

impl GameRules for SequenceRules {
    /// The digits the player replayed, in order.
    type Input = Vec<u8>;

    fn kind(&self) -> ModuleKind {
        ModuleKind::SequenceMemory
    }

    fn difficulty(&self) -> u32 {
        self.start_span
    }

    fn total_items(&self) -> usize {
        // One flash sequence is scheduled at any time.
        1
    }

    fn preview(&self) -> Option<Duration> {
        Some(Duration::from_millis(
            self.flash_ms_per_digit * u64::from(self.span),
        ))
    }

    fn per_item_feedback(&self) -> bool {
        true
    }

    fn judge(&mut self, reply: &Vec<u8>, metrics: &mut SessionMetrics) -> Judgment {
        metrics.rounds_played += 1;
        if *reply == self.current {
            metrics.max_span = metrics.max_span.max(self.span);
            self.span += 1;
            if self.span <= SPAN_CAP {
                self.current = roll_sequence(&mut self.rng, self.span);
            }
            Judgment::Correct
        } else {
            self.lives_left = self.lives_left.saturating_sub(1);
            self.current = roll_sequence(&mut self.rng, self.span);
            Judgment::Wrong
        }
    }

    fn finished(&self, _metrics: &SessionMetrics) -> bool {
        self.lives_left == 0 || self.span > SPAN_CAP
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

    fn drive(session: &mut Session<SequenceRules>, correct: bool) -> Judgment {
        let reply = if correct {
            session.rules().current_sequence().to_vec()
        } else {
            // Flip the first digit so the reply never matches.
            let mut r = session.rules().current_sequence().to_vec();
            r[0] = (r[0] + 1) % 10;
            r
        };
        let judgment = session.submit(&reply);
        if session.phase() == Phase::Feedback {
            session.resume();
        }
        judgment
    }

    #[test]
    fn out_of_range_span_rejected() {
        assert!(SequenceRules::new(2, 0).is_err());
        assert!(SequenceRules::new(7, 0).is_err());
    }

    #[test]
    fn correct_replay_extends_span() {
        let rules = SequenceRules::new(3, 9).expect("rules");
        let mut session = Session::new(rules).expect("session");
        session.begin();
        session.reveal();
        assert_eq!(drive(&mut session, true), Judgment::Correct);
        assert_eq!(session.rules().span(), 4);
        assert_eq!(session.metrics().max_span, 3);
    }

    #[test]
    fn three_misses_end_the_session() {
        let rules = SequenceRules::new(3, 9).expect("rules");
        let mut session = Session::new(rules).expect("session");
        session.begin();
        session.reveal();
        drive(&mut session, false);
        drive(&mut session, false);
        assert_eq!(session.phase(), Phase::Active);
        drive(&mut session, false);
        assert_eq!(session.phase(), Phase::Complete);
        assert_eq!(session.metrics().error_count, 3);
    }

    #[test]
    fn span_six_with_two_misses_matches_documented_example() {
        // Spans 3,4,5,6 replayed correctly (max span 6), then a miss at 7,
        // a correct at 7 is skipped — instead: 8 correct rounds, 2 wrong.
        let rules = SequenceRules::new(3, 21).expect("rules");
        let mut session = Session::new(rules).expect("session");
        session.begin();
        session.reveal();
        for _ in 0..4 {
            drive(&mut session, true); // spans 3..=6
        }
        drive(&mut session, false);
        drive(&mut session, false);
        for _ in 0..4 {
            drive(&mut session, true); // spans 7..=10
        }
        assert_eq!(session.metrics().rounds_played, 10);
        let acc = session.metrics().accuracy().expect("responses");
        assert!((acc - 0.8).abs() < 1e-9);
        assert_eq!(session.metrics().max_span, 10);
    }

    #[test]
    fn same_seed_same_sequences() {
        let a = SequenceRules::new(4, 3).expect("rules");
        let b = SequenceRules::new(4, 3).expect("rules");
        assert_eq!(a.current_sequence(), b.current_sequence());
    }
}

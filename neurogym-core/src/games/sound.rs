//! Sound match — concentration with sound cards.
//!
//! `2·pairs` face-down cards each play one of `pairs` sounds; the player
//! flips two at a time. A matching pair locks both cards (they can never be
//! scored again); a mismatch counts one error. Terminal condition: every
//! pair found.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::Result;
use crate::metrics::SessionMetrics;
use crate::session::GameRules;
use crate::types::{Judgment, ModuleKind};

/// Smallest supported pair count.
pub const MIN_PAIRS: u32 = 2;
/// Largest supported pair count.
pub const MAX_PAIRS: u32 = 8;

/// Initial face-up reveal window.
const REVEAL_MS: u64 = 3000;

/// One face-down card.
#[derive(Debug, Clone)]
struct SoundCard {
    sound: u32,
    matched: bool,
}

/// Rules for one sound-matching board.
#[derive(Debug, Clone)]
pub struct SoundRules {
    pairs: u32,
    cards: Vec<SoundCard>,
    found: u32,
    reveal_ms: u64,
}

impl SoundRules {
    /// Build a board with `pairs ∈ 2..=8`, shuffled deterministically by `seed`.
    ///
    /// # Errors
    /// Returns [`crate::TrainError::InvalidDifficulty`] for an out-of-range
    /// pair count.
    pub fn new(pairs: u32, seed: u64) -> Result<Self> {
        super::check_difficulty(ModuleKind::SoundMatch, pairs, MIN_PAIRS, MAX_PAIRS)?;
        let mut sounds: Vec<u32> = (0..pairs).flat_map(|s| [s, s]).collect();
        sounds.shuffle(&mut StdRng::seed_from_u64(seed));
        let cards = sounds
            .into_iter()
            .map(|sound| SoundCard {
                sound,
                matched: false,
            })
            .collect();
        Ok(Self {
            pairs,
            cards,
            found: 0,
            reveal_ms: REVEAL_MS,
        })
    }

    /// Override the initial reveal window (from `TimingConfig`).
    #[must_use]
    pub fn with_reveal_ms(mut self, reveal_ms: u64) -> Self {
        self.reveal_ms = reveal_ms;
        self
    }

    /// Sound id on a card, for presentation.
    #[must_use]
    pub fn sound_at(&self, index: usize) -> Option<u32> {
        self.cards.get(index).map(|c| c.sound)
    }

    /// Pairs already found.
    #[must_use]
    pub fn found(&self) -> u32 {
        self.found
    }
}

impl GameRules for SoundRules {
    /// Indices of the two flipped cards.
    type Input = (usize, usize);

    fn kind(&self) -> ModuleKind {
        ModuleKind::SoundMatch
    }

    fn difficulty(&self) -> u32 {
        self.pairs
    }

    fn total_items(&self) -> usize {
        self.cards.len()
    }

    fn preview(&self) -> Option<Duration> {
        Some(Duration::from_millis(self.reveal_ms))
    }

    fn per_item_feedback(&self) -> bool {
        true
    }

    fn judge(&mut self, flip: &(usize, usize), _metrics: &mut SessionMetrics) -> Judgment {
        let (a, b) = *flip;
        if a == b || a >= self.cards.len() || b >= self.cards.len() {
            return Judgment::Ignored;
        }
        // Locked cards were already scored once; flipping them again is a
        // no-op rather than a second chance at the same pair.
        if self.cards[a].matched || self.cards[b].matched {
            return Judgment::Ignored;
        }
        if self.cards[a].sound == self.cards[b].sound {
            self.cards[a].matched = true;
            self.cards[b].matched = true;
            self.found += 1;
            Judgment::Correct
        } else {
            Judgment::Wrong
        }
    }

    fn finished(&self, _metrics: &SessionMetrics) -> bool {
        self.found == self.pairs
    }

    fn details(&self, _metrics: &SessionMetrics) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        map.insert("pairs".into(), self.pairs.into());
        map
    }
}

//! Classification — attribute-rule discovery.
//!
//! The deck is split into blocks of [`BLOCK_SIZE`] items; each block has one
//! hidden attribute rule (a color, a shape, or fill). For every item the
//! player answers whether it obeys the block's active rule. A block counts
//! as "discovered" when at least [`DISCOVERY_THRESHOLD`] of its answers were
//! correct. Terminal condition: the deck is exhausted.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::metrics::SessionMetrics;
use crate::session::GameRules;
use crate::types::{Judgment, ModuleKind};

/// Smallest supported rule count.
pub const MIN_RULES: u32 = 1;
/// Largest supported rule count.
pub const MAX_RULES: u32 = 3;
/// Items shown under each rule.
pub const BLOCK_SIZE: usize = 8;
/// Correct answers (out of [`BLOCK_SIZE`]) that mark a rule as discovered.
pub const DISCOVERY_THRESHOLD: u32 = 6;

/// Number of distinct colors and shapes in the item vocabulary.
const COLORS: u8 = 4;
const SHAPES: u8 = 4;

/// One stimulus item: a colored, optionally filled shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyItem {
    /// Color index, `0..4`.
    pub color: u8,
    /// Shape index, `0..4`.
    pub shape: u8,
    /// Whether the shape is filled.
    pub filled: bool,
}

/// A hidden attribute rule for one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    ColorIs(u8),
    ShapeIs(u8),
    Filled,
}

impl Rule {
    fn matches(self, item: ClassifyItem) -> bool {
        match self {
            Self::ColorIs(c) => item.color == c,
            Self::ShapeIs(s) => item.shape == s,
            Self::Filled => item.filled,
        }
    }
}

/// Rules for one classification session.
#[derive(Debug, Clone)]
pub struct ClassifyRules {
    rule_count: u32,
    deck: Vec<ClassifyItem>,
    block_rules: Vec<Rule>,
    pos: usize,
    block_correct: Vec<u32>,
}

impl ClassifyRules {
    /// Build a session with `rule_count ∈ 1..=3` hidden rules (one block of
    /// [`BLOCK_SIZE`] items each), deterministic under `seed`.
    ///
    /// # Errors
    /// Returns [`crate::TrainError::InvalidDifficulty`] for an out-of-range
    /// rule count.
    pub fn new(rule_count: u32, seed: u64) -> Result<Self> {
        super::check_difficulty(ModuleKind::Classification, rule_count, MIN_RULES, MAX_RULES)?;
        let mut rng = StdRng::seed_from_u64(seed);

        let block_rules: Vec<Rule> = (0..rule_count)
            .map(|_| match rng.gen_range(0..3u8) {
                0 => Rule::ColorIs(rng.gen_range(0..COLORS)),
                1 => Rule::ShapeIs(rng.gen_range(0..SHAPES)),
                _ => Rule::Filled,
            })
            .collect();

        let deck: Vec<ClassifyItem> = (0..rule_count as usize * BLOCK_SIZE)
            .map(|_| ClassifyItem {
                color: rng.gen_range(0..COLORS),
                shape: rng.gen_range(0..SHAPES),
                filled: rng.gen_bool(0.5),
            })
            .collect();

        Ok(Self {
            rule_count,
            deck,
            block_rules,
            pos: 0,
            block_correct: vec![0; rule_count as usize],
        })
    }

    /// The item currently shown, if any remain.
    #[must_use]
    pub fn current_item(&self) -> Option<ClassifyItem> {
        self.deck.get(self.pos).copied()
    }

    /// Whether the current item obeys the active block rule. Presentation
    /// uses this to render feedback; it is also the comparator.
    #[must_use]
    pub fn current_expected(&self) -> Option<bool> {
        let rule = self.block_rules.get(self.pos / BLOCK_SIZE)?;
        self.current_item().map(|item| rule.matches(item))
    }

    /// Blocks whose rule counts as discovered so far.
    #[must_use]
    pub fn rules_discovered(&self) -> u32 {
        self.block_correct
            .iter()
            .filter(|&&c| c >= DISCOVERY_THRESHOLD)
            .count() as u32
    }
}

impl GameRules for ClassifyRules {
    /// Whether the player thinks the item obeys the active rule.
    type Input = bool;

    fn kind(&self) -> ModuleKind {
        ModuleKind::Classification
    }

    fn difficulty(&self) -> u32 {
        self.rule_count
    }

    fn total_items(&self) -> usize {
        self.deck.len()
    }

    fn per_item_feedback(&self) -> bool {
        true
    }

    fn judge(&mut self, answer: &bool, _metrics: &mut SessionMetrics) -> Judgment {
        let Some(expected) = self.current_expected() else {
            return Judgment::Ignored;
        };
        let block = self.pos / BLOCK_SIZE;
        self.pos += 1;
        if *answer == expected {
            self.block_correct[block] += 1;
            Judgment::Correct
        } else {
            Judgment::Wrong
        }
    }

    fn finished(&self, _metrics: &SessionMetrics) -> bool {
        self.pos >= self.deck.len()
    }

    fn details(&self, _metrics: &SessionMetrics) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        map.insert("rules_total".into(), self.rule_count.into());
        map.insert("rules_discovered".into(), self.rules_discovered().into());
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::types::Phase;

    fn play_block(session: &mut Session<ClassifyRules>, correct: bool) {
        for _ in 0..BLOCK_SIZE {
            let expected = session.rules().current_expected().expect("item");
            let answer = if correct { expected } else { !expected };
            session.submit(&answer);
            if session.phase() == Phase::Feedback {
                session.resume();
            }
        }
    }

    #[test]
    fn out_of_range_rule_count_rejected() {
        assert!(ClassifyRules::new(0, 0).is_err());
        assert!(ClassifyRules::new(4, 0).is_err());
    }

    #[test]
    fn deck_has_one_block_per_rule() {
        let rules = ClassifyRules::new(3, 17).expect("rules");
        assert_eq!(rules.total_items(), 3 * BLOCK_SIZE);
    }

    #[test]
    fn perfect_play_discovers_every_rule() {
        let rules = ClassifyRules::new(2, 17).expect("rules");
        let mut session = Session::new(rules).expect("session");
        session.begin();
        play_block(&mut session, true);
        play_block(&mut session, true);
        assert_eq!(session.phase(), Phase::Complete);
        assert_eq!(session.rules().rules_discovered(), 2);
        let details = &session.outcome().expect("outcome").details;
        assert_eq!(details["rules_discovered"], 2);
    }

    #[test]
    fn failed_block_is_not_discovered() {
        let rules = ClassifyRules::new(1, 17).expect("rules");
        let mut session = Session::new(rules).expect("session");
        session.begin();
        play_block(&mut session, false);
        assert_eq!(session.phase(), Phase::Complete);
        assert_eq!(session.rules().rules_discovered(), 0);
    }
}

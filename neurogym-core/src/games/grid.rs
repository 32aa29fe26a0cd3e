//! Grid search — Schulte-style attention grid.
//!
//! An `n × n` grid holds the numbers `1..=n²` in shuffled positions; the
//! player taps them in ascending order. A tap on the wrong number counts an
//! error and a mis-tap but never advances the target, so each number is
//! scored exactly once. Terminal condition: the last number is tapped.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::Result;
use crate::metrics::SessionMetrics;
use crate::session::GameRules;
use crate::types::{Judgment, ModuleKind};

/// Smallest supported grid side.
pub const MIN_SIDE: u32 = 3;
/// Largest supported grid side.
pub const MAX_SIDE: u32 = 6;

/// Rules for one grid-search round.
#[derive(Debug, Clone)]
pub struct GridRules {
    side: u32,
    /// Numbers `1..=side²` in display (row-major) order.
    cells: Vec<u32>,
    /// The next number that counts as a correct tap.
    next_expected: u32,
}

impl GridRules {
    /// Build a grid for `side ∈ 3..=6`, shuffled deterministically by `seed`.
    ///
    /// # Errors
    /// Returns [`crate::TrainError::InvalidDifficulty`] for an out-of-range side.
    pub fn new(side: u32, seed: u64) -> Result<Self> {
        super::check_difficulty(ModuleKind::GridSearch, side, MIN_SIDE, MAX_SIDE)?;
        let mut cells: Vec<u32> = (1..=side * side).collect();
        cells.shuffle(&mut StdRng::seed_from_u64(seed));
        Ok(Self {
            side,
            cells,
            next_expected: 1,
        })
    }

    /// The shuffled cell layout, row-major.
    #[must_use]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// The number the player must tap next.
    #[must_use]
    pub fn next_expected(&self) -> u32 {
        self.next_expected
    }
}

impl GameRules for GridRules {
    /// The number printed on the tapped cell.
    type Input = u32;

    fn kind(&self) -> ModuleKind {
        ModuleKind::GridSearch
    }

    fn difficulty(&self) -> u32 {
        self.side
    }

    fn total_items(&self) -> usize {
        self.cells.len()
    }

    fn judge(&mut self, tapped: &u32, metrics: &mut SessionMetrics) -> Judgment {
        if *tapped == self.next_expected {
            self.next_expected += 1;
            Judgment::Correct
        } else {
            metrics.mis_taps += 1;
            Judgment::Wrong
        }
    }

    fn finished(&self, _metrics: &SessionMetrics) -> bool {
        self.next_expected > self.side * self.side
    }

    fn details(&self, metrics: &SessionMetrics) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        map.insert("side".into(), self.side.into());
        map.insert("mis_taps".into(), metrics.mis_taps.into());
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::types::Phase;

    #[test]
    fn grid_contains_every_number_once() {
        let rules = GridRules::new(4, 42).expect("rules");
        let mut seen = rules.cells().to_vec();
        seen.sort_unstable();
        assert_eq!(seen, (1..=16).collect::<Vec<u32>>());
    }

    #[test]
    fn same_seed_same_layout() {
        let a = GridRules::new(5, 7).expect("rules");
        let b = GridRules::new(5, 7).expect("rules");
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn out_of_range_side_rejected() {
        assert!(GridRules::new(2, 0).is_err());
        assert!(GridRules::new(7, 0).is_err());
    }

    #[test]
    fn perfect_run_on_4x4() {
        let rules = GridRules::new(4, 1).expect("rules");
        let mut session = Session::new(rules).expect("session");
        session.begin();
        for n in 1..=16 {
            assert_eq!(session.submit(&n), Judgment::Correct);
        }
        assert_eq!(session.phase(), Phase::Complete);

        let outcome = session.outcome().expect("outcome");
        assert_eq!(session.metrics().correct_count, 16);
        assert_eq!(session.metrics().error_count, 0);
        assert!((outcome.accuracy - 1.0).abs() < 1e-9);
        assert_eq!(outcome.score, crate::scoring::max_score(ModuleKind::GridSearch, 4));
    }

    #[test]
    fn wrong_tap_counts_once_and_never_advances() {
        let rules = GridRules::new(3, 1).expect("rules");
        let mut session = Session::new(rules).expect("session");
        session.begin();
        assert_eq!(session.submit(&5), Judgment::Wrong);
        assert_eq!(session.metrics().mis_taps, 1);
        assert_eq!(session.rules().next_expected(), 1);
        assert_eq!(session.submit(&1), Judgment::Correct);
        assert_eq!(session.rules().next_expected(), 2);
    }
}

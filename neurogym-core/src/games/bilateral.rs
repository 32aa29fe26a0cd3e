//! Bilateral coordination — mirrored left/right target pairs.
//!
//! Each item lights one target on the left board; the matching target on the
//! right board is its horizontal mirror. The player answers with both hands
//! at once. Besides plain correctness, the engine tracks how often the two
//! taps were mirror-consistent with *each other*, which feeds the
//! `mirror_accuracy` sub-metric. Terminal condition: all pairs answered.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::metrics::SessionMetrics;
use crate::session::GameRules;
use crate::types::{Judgment, ModuleKind};

/// Smallest supported board width.
pub const MIN_COLS: u32 = 3;
/// Largest supported board width.
pub const MAX_COLS: u32 = 6;
/// Items per session, as a multiple of the board width.
pub const PAIRS_PER_COL: u32 = 2;

/// Rules for one bilateral-coordination session.
#[derive(Debug, Clone)]
pub struct BilateralRules {
    cols: u32,
    /// Left-hand target column per item; the right-hand target mirrors it.
    targets: Vec<u32>,
    pos: usize,
    mirror_consistent: u32,
}

impl BilateralRules {
    /// Build a session on a board `cols ∈ 3..=6` wide, deterministic under
    /// `seed`.
    ///
    /// # Errors
    /// Returns [`crate::TrainError::InvalidDifficulty`] for an out-of-range
    /// width.
    pub fn new(cols: u32, seed: u64) -> Result<Self> {
        super::check_difficulty(ModuleKind::BilateralCoordination, cols, MIN_COLS, MAX_COLS)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let targets = (0..cols * PAIRS_PER_COL)
            .map(|_| rng.gen_range(0..cols))
            .collect();
        Ok(Self {
            cols,
            targets,
            pos: 0,
            mirror_consistent: 0,
        })
    }

    /// The left-hand target for the current item, if any remain.
    #[must_use]
    pub fn current_left_target(&self) -> Option<u32> {
        self.targets.get(self.pos).copied()
    }

    /// Mirror column of `col` on this board.
    #[must_use]
    pub fn mirror(&self, col: u32) -> u32 {
        self.cols - 1 - col
    }

    /// Mirror-consistent responses so far.
    #[must_use]
    pub fn mirror_consistent(&self) -> u32 {
        self.mirror_consistent
    }
}

impl GameRules for BilateralRules {
    /// `(left_column, right_column)` tapped simultaneously.
    type Input = (u32, u32);

    fn kind(&self) -> ModuleKind {
        ModuleKind::BilateralCoordination
    }

    fn difficulty(&self) -> u32 {
        self.cols
    }

    fn total_items(&self) -> usize {
        self.targets.len()
    }

    fn judge(&mut self, taps: &(u32, u32), _metrics: &mut SessionMetrics) -> Judgment {
        let Some(expected_left) = self.current_left_target() else {
            return Judgment::Ignored;
        };
        let (left, right) = *taps;
        if left < self.cols && right == self.mirror(left) {
            self.mirror_consistent += 1;
        }
        self.pos += 1;
        if left == expected_left && right == self.mirror(expected_left) {
            Judgment::Correct
        } else {
            Judgment::Wrong
        }
    }

    fn finished(&self, _metrics: &SessionMetrics) -> bool {
        self.pos >= self.targets.len()
    }

    fn details(&self, metrics: &SessionMetrics) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        let responses = metrics.responses();
        let mirror_accuracy = if responses == 0 {
            0.0
        } else {
            f64::from(self.mirror_consistent) / f64::from(responses)
        };
        map.insert("cols".into(), self.cols.into());
        map.insert("mirror_accuracy".into(), mirror_accuracy.into());
        map
    }
}

//! Scoring and rating — pure functions over accumulated metrics.
//!
//! Every module publishes its own weight constants here; the UI treats them
//! as the source of truth for displayed scores and tier labels, so they must
//! not drift. Both [`score`] and [`rate`] are deterministic and
//! side-effect-free: identical inputs always grade identically across
//! repeated renders.
//!
//! Score formulas (per correct response unless noted):
//!
//! | module                 | formula                                   |
//! |------------------------|-------------------------------------------|
//! | grid-search            | `5 × side`                                |
//! | sequence-memory        | `15 × max_span + 5 × correct` (total)     |
//! | sound-match            | `6 + 2 × pairs`                           |
//! | classification         | `8`, plus `3 × best_streak` (total)       |
//! | bilateral-coordination | `4 × cols`                                |
//! | scene-memory           | `5 + objects`                             |
//! | simon-repeat           | `12 × max_span + 4 × correct` (total)     |
//!
//! Rating tiers: sequence and Simon rate by the span reached
//! (`≥9` excellent, `7–8` good, `4–6` medium, below keep-trying); every
//! other module rates by accuracy (`≥0.95` excellent, `≥0.85` good, `≥0.70`
//! medium).

use crate::games;
use crate::metrics::SessionMetrics;
use crate::types::{ModuleKind, Rating};

// Accuracy tier thresholds.
const ACCURACY_EXCELLENT: f64 = 0.95;
const ACCURACY_GOOD: f64 = 0.85;
const ACCURACY_MEDIUM: f64 = 0.70;

// Span tier thresholds.
const SPAN_EXCELLENT: u32 = 9;
const SPAN_GOOD: u32 = 7;
const SPAN_MEDIUM: u32 = 4;

/// Compute the integer score for a session of `kind` at `difficulty`.
///
/// Non-negative, and monotone in the counters that only grow during a round
/// (`correct_count`, `best_streak`, `max_span`), so a granted point is never
/// un-earned.
#[must_use]
pub fn score(kind: ModuleKind, difficulty: u32, metrics: &SessionMetrics) -> u32 {
    let correct = metrics.correct_count;
    match kind {
        ModuleKind::GridSearch => correct * 5 * difficulty,
        ModuleKind::SequenceMemory => 15 * metrics.max_span + 5 * correct,
        ModuleKind::SoundMatch => correct * (6 + 2 * difficulty),
        ModuleKind::Classification => correct * 8 + metrics.best_streak * 3,
        ModuleKind::BilateralCoordination => correct * 4 * difficulty,
        ModuleKind::SceneMemory => correct * (5 + difficulty),
        ModuleKind::SimonRepeat => 12 * metrics.max_span + 4 * correct,
    }
}

/// The score a flawless session of `kind` at `difficulty` earns.
#[must_use]
pub fn max_score(kind: ModuleKind, difficulty: u32) -> u32 {
    match kind {
        ModuleKind::GridSearch => difficulty * difficulty * 5 * difficulty,
        ModuleKind::SequenceMemory => {
            let rounds = games::sequence::SPAN_CAP - difficulty + 1;
            15 * games::sequence::SPAN_CAP + 5 * rounds
        }
        ModuleKind::SoundMatch => difficulty * (6 + 2 * difficulty),
        ModuleKind::Classification => {
            let items = difficulty * games::classify::BLOCK_SIZE as u32;
            items * 8 + items * 3
        }
        ModuleKind::BilateralCoordination => {
            games::bilateral::PAIRS_PER_COL * difficulty * 4 * difficulty
        }
        ModuleKind::SceneMemory => 2 * difficulty * (5 + difficulty),
        ModuleKind::SimonRepeat => {
            let rounds = games::simon::LENGTH_CAP - difficulty + 1;
            12 * games::simon::LENGTH_CAP + 4 * rounds
        }
    }
}

/// Select the qualitative rating tier for a session of `kind`.
#[must_use]
pub fn rate(kind: ModuleKind, _difficulty: u32, metrics: &SessionMetrics) -> Rating {
    match kind {
        ModuleKind::SequenceMemory | ModuleKind::SimonRepeat => rate_by_span(metrics.max_span),
        _ => rate_by_accuracy(metrics.accuracy()),
    }
}

fn rate_by_span(max_span: u32) -> Rating {
    if max_span >= SPAN_EXCELLENT {
        Rating::Excellent
    } else if max_span >= SPAN_GOOD {
        Rating::Good
    } else if max_span >= SPAN_MEDIUM {
        Rating::Medium
    } else {
        Rating::KeepTrying
    }
}

fn rate_by_accuracy(accuracy: Option<f64>) -> Rating {
    let Some(acc) = accuracy else {
        return Rating::KeepTrying;
    };
    if acc >= ACCURACY_EXCELLENT {
        Rating::Excellent
    } else if acc >= ACCURACY_GOOD {
        Rating::Good
    } else if acc >= ACCURACY_MEDIUM {
        Rating::Medium
    } else {
        Rating::KeepTrying
    }
}

//! The seven training-module engines.
//!
//! Each engine implements [`crate::session::GameRules`]: it generates its
//! round items at construction (deterministically under a seed), validates
//! its difficulty parameter, and documents its own terminal condition.
//! Scoring constants and rating thresholds live in [`crate::scoring`].

pub mod bilateral;
pub mod classify;
pub mod grid;
pub mod scene;
pub mod sequence;
pub mod simon;
pub mod sound;

pub use bilateral::BilateralRules;
pub use classify::ClassifyRules;
pub use grid::GridRules;
pub use scene::SceneRules;
pub use sequence::SequenceRules;
pub use simon::{SimonColor, SimonInput, SimonRules, SimonStep};
pub use sound::SoundRules;

use crate::error::{Result, TrainError};
use crate::types::ModuleKind;

/// Reject a difficulty parameter outside `min..=max` at session-start time.
pub(crate) fn check_difficulty(module: ModuleKind, value: u32, min: u32, max: u32) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(TrainError::InvalidDifficulty {
            module,
            value,
            min,
            max,
        })
    }
}

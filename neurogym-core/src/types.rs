//! Core type definitions for the neurogym training engine.
//!
//! All wire-facing types serialize with the snake/kebab names the record
//! store and the coach backend expect.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Unique identifier for one play-through of one training module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Training Modules
// ---------------------------------------------------------------------------

/// The fixed set of training modules.
///
/// The wire names (`grid-search`, `sequence-memory`, …) are stable: they are
/// stored in the `module_type` column of every persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleKind {
    /// Schulte-style attention grid: tap numbers in ascending order.
    GridSearch,
    /// Digit-span test: replay ever-longer flashed sequences.
    SequenceMemory,
    /// Concentration with sounds: find matching sound-card pairs.
    SoundMatch,
    /// Attribute-rule classification: does the item obey the active rule?
    Classification,
    /// Bilateral coordination: mirrored left/right target pairs.
    BilateralCoordination,
    /// Scene memory: memorize a scene, then answer presence probes.
    SceneMemory,
    /// Simon-style watch/repeat color recall.
    SimonRepeat,
}

impl ModuleKind {
    /// Stable wire name, as stored in `module_type`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GridSearch => "grid-search",
            Self::SequenceMemory => "sequence-memory",
            Self::SoundMatch => "sound-match",
            Self::Classification => "classification",
            Self::BilateralCoordination => "bilateral-coordination",
            Self::SceneMemory => "scene-memory",
            Self::SimonRepeat => "simon-repeat",
        }
    }

    /// All module kinds, in display order.
    #[must_use]
    pub fn all() -> &'static [ModuleKind] {
        &[
            Self::GridSearch,
            Self::SequenceMemory,
            Self::SoundMatch,
            Self::Classification,
            Self::BilateralCoordination,
            Self::SceneMemory,
            Self::SimonRepeat,
        ]
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "grid-search" => Ok(Self::GridSearch),
            "sequence-memory" => Ok(Self::SequenceMemory),
            "sound-match" => Ok(Self::SoundMatch),
            "classification" => Ok(Self::Classification),
            "bilateral-coordination" => Ok(Self::BilateralCoordination),
            "scene-memory" => Ok(Self::SceneMemory),
            "simon-repeat" => Ok(Self::SimonRepeat),
            _ => Err(format!("unknown module kind: '{s}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Session Lifecycle
// ---------------------------------------------------------------------------

/// A named stage in a session's lifecycle.
///
/// Every module follows the same shape:
/// `Idle → Preview → Active → (Feedback ⇄ Active)* → Complete`.
/// Modules without a memorization stage skip `Preview`; modules without
/// per-item feedback skip `Feedback`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Created, not yet started.
    Idle,
    /// Stimulus is being presented / memorized.
    Preview,
    /// Accepting player responses.
    Active,
    /// Showing per-item feedback; responses are not accepted.
    Feedback,
    /// Terminal. No response or timer may mutate the session again.
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Preview => "preview",
            Self::Active => "active",
            Self::Feedback => "feedback",
            Self::Complete => "complete",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Rating Tiers
// ---------------------------------------------------------------------------

/// Qualitative rating tier for a completed session.
///
/// Ordered: `KeepTrying < Medium < Good < Excellent`. Threshold constants
/// live with each module's scoring function in [`crate::scoring`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rating {
    /// Below the module's pass threshold.
    KeepTrying,
    /// Passed, with room to grow.
    Medium,
    /// Solid performance.
    Good,
    /// At or near the module ceiling.
    Excellent,
}

impl Rating {
    /// Stable wire label, as displayed and persisted.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::KeepTrying => "keep-trying",
            Self::Medium => "medium",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Response Verdicts
// ---------------------------------------------------------------------------

/// Verdict for a single submitted response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Judgment {
    /// The response matched the expected value.
    Correct,
    /// The response did not match.
    Wrong,
    /// The response was discarded without touching any state
    /// (late, duplicate, or not a scoring input).
    Ignored,
}

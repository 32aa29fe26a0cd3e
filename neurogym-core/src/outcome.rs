//! The immutable scored summary of a completed session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ModuleKind, Rating, SessionId};

/// Snapshot produced exactly once when a session completes.
///
/// Constructed only by the session driver; sessions that never judged a
/// response never produce one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// The session this outcome summarizes.
    pub session_id: SessionId,
    /// Which module was played.
    pub module: ModuleKind,
    /// The module's difficulty parameter.
    pub difficulty: u32,
    /// Integer score (see [`crate::scoring`] for the per-module formulas).
    pub score: u32,
    /// `correct / total`, always in `[0, 1]`.
    pub accuracy: f64,
    /// Wall-clock play duration in seconds.
    pub duration_secs: f64,
    /// Qualitative tier for the result screen.
    pub rating: Rating,
    /// Module-specific sub-metrics (`max_span`, `mirror_accuracy`, …).
    pub details: serde_json::Map<String, serde_json::Value>,
    /// When the session completed.
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serializes_with_wire_names() {
        let outcome = SessionOutcome {
            session_id: SessionId::new(),
            module: ModuleKind::SequenceMemory,
            difficulty: 3,
            score: 120,
            accuracy: 0.8,
            duration_secs: 42.5,
            rating: Rating::Medium,
            details: serde_json::Map::new(),
            completed_at: Utc::now(),
        };
        let json = serde_json::to_value(&outcome).expect("serialize");
        assert_eq!(json["module"], "sequence-memory");
        assert_eq!(json["rating"], "medium");
    }
}

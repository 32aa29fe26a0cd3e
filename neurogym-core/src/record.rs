//! Persisted-record assembly.
//!
//! A [`NewRecord`] is the insert shape handed to the record store; the store
//! assigns `id` and `created_at` and returns the full [`TrainingRecord`].
//! Persistence is strictly best-effort: an absent or failing store must
//! never block the result screen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::outcome::SessionOutcome;
use crate::store::RecordStore;
use crate::types::ModuleKind;

/// Insert shape for one completed session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecord {
    /// Stable device identifier (see [`crate::device`]).
    pub device_id: String,
    /// Which module was played.
    pub module_type: ModuleKind,
    /// Integer score.
    pub score: u32,
    /// Accuracy ratio in `[0, 1]`.
    pub accuracy: f64,
    /// Play duration in seconds.
    pub duration: f64,
    /// The module's difficulty parameter.
    pub difficulty: u32,
    /// Open map of module-specific fields, or `None` when empty.
    pub details: Option<serde_json::Map<String, serde_json::Value>>,
}

impl NewRecord {
    /// Package a completed session's outcome for persistence.
    #[must_use]
    pub fn from_outcome(outcome: &SessionOutcome, device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            module_type: outcome.module,
            score: outcome.score,
            accuracy: outcome.accuracy,
            duration: outcome.duration_secs,
            difficulty: outcome.difficulty,
            details: if outcome.details.is_empty() {
                None
            } else {
                Some(outcome.details.clone())
            },
        }
    }
}

/// A stored record, as read back from the record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingRecord {
    /// Store-assigned row id.
    pub id: i64,
    /// Stable device identifier.
    pub device_id: String,
    /// Which module was played.
    pub module_type: ModuleKind,
    /// Integer score.
    pub score: u32,
    /// Accuracy ratio in `[0, 1]`.
    pub accuracy: f64,
    /// Play duration in seconds.
    pub duration: f64,
    /// The module's difficulty parameter.
    pub difficulty: u32,
    /// Open map of module-specific fields.
    pub details: Option<serde_json::Map<String, serde_json::Value>>,
    /// Store-assigned insertion timestamp.
    pub created_at: DateTime<Utc>,
}

/// Persist a record if a store is configured, swallowing failures.
///
/// Returns the stored record on success. When storage is not configured, or
/// the insert fails, the failure is logged and `None` is returned — the
/// caller proceeds either way.
pub fn persist_best_effort(store: Option<&RecordStore>, record: &NewRecord) -> Option<TrainingRecord> {
    let Some(store) = store else {
        debug!(module = %record.module_type, "Storage not configured; record skipped");
        return None;
    };
    match store.insert(record) {
        Ok(stored) => Some(stored),
        Err(e) => {
            warn!(module = %record.module_type, error = %e, "Record insert failed; continuing");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rating, SessionId};

    fn sample_outcome() -> SessionOutcome {
        let mut details = serde_json::Map::new();
        details.insert("max_span".into(), 6.into());
        SessionOutcome {
            session_id: SessionId::new(),
            module: ModuleKind::SequenceMemory,
            difficulty: 3,
            score: 130,
            accuracy: 0.8,
            duration_secs: 61.0,
            rating: Rating::Medium,
            details,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn record_carries_outcome_fields() {
        let outcome = sample_outcome();
        let record = NewRecord::from_outcome(&outcome, "device-1");
        assert_eq!(record.device_id, "device-1");
        assert_eq!(record.module_type, ModuleKind::SequenceMemory);
        assert_eq!(record.score, 130);
        assert_eq!(record.details.as_ref().expect("details")["max_span"], 6);
    }

    #[test]
    fn empty_details_become_none() {
        let mut outcome = sample_outcome();
        outcome.details = serde_json::Map::new();
        let record = NewRecord::from_outcome(&outcome, "device-1");
        assert!(record.details.is_none());
    }

    #[test]
    fn missing_store_skips_persistence_without_error() {
        let record = NewRecord::from_outcome(&sample_outcome(), "device-1");
        assert!(persist_best_effort(None, &record).is_none());
    }
}

//! Aggregate statistics over stored training records.
//!
//! Pure fold over a record slice; nothing here touches the store. The
//! summaries feed the result screen and the AI coach prompt, so the line
//! rendering stays plain ASCII.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::TrainingRecord;
use crate::types::ModuleKind;

/// Per-module aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleStats {
    /// Which module these numbers describe.
    pub module: ModuleKind,
    /// Sessions played.
    pub sessions: usize,
    /// Mean accuracy across those sessions.
    pub mean_accuracy: f64,
    /// Mean score across those sessions.
    pub mean_score: f64,
    /// Highest single-session score.
    pub best_score: u32,
}

/// Cross-module aggregate for one device (or the whole store).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Sessions counted in total.
    pub total_sessions: usize,
    /// Per-module aggregates, for modules with at least one record.
    pub modules: Vec<ModuleStats>,
}

impl TrainingStats {
    /// Fold a slice of records into aggregates. Order does not matter.
    #[must_use]
    pub fn from_records(records: &[TrainingRecord]) -> Self {
        let mut buckets: BTreeMap<&'static str, (ModuleKind, usize, f64, f64, u32)> =
            BTreeMap::new();
        for record in records {
            let entry = buckets
                .entry(record.module_type.as_str())
                .or_insert((record.module_type, 0, 0.0, 0.0, 0));
            entry.1 += 1;
            entry.2 += record.accuracy;
            entry.3 += f64::from(record.score);
            entry.4 = entry.4.max(record.score);
        }

        let modules = buckets
            .into_values()
            .map(|(module, sessions, acc_sum, score_sum, best_score)| ModuleStats {
                module,
                sessions,
                mean_accuracy: acc_sum / sessions as f64,
                mean_score: score_sum / sessions as f64,
                best_score,
            })
            .collect();

        Self {
            total_sessions: records.len(),
            modules,
        }
    }

    /// The played module with the lowest mean accuracy, if any module has
    /// been played. Ties break toward the module name that sorts first, so
    /// the recommendation is stable across renders.
    #[must_use]
    pub fn weakest_module(&self) -> Option<&ModuleStats> {
        self.modules.iter().min_by(|a, b| {
            a.mean_accuracy
                .partial_cmp(&b.mean_accuracy)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// One line per played module, for embedding in a coach prompt.
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        self.modules
            .iter()
            .map(|m| {
                format!(
                    "{}: {} sessions, mean accuracy {:.0}%, mean score {:.0}, best {}",
                    m.module,
                    m.sessions,
                    m.mean_accuracy * 100.0,
                    m.mean_score,
                    m.best_score
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(module: ModuleKind, score: u32, accuracy: f64) -> TrainingRecord {
        TrainingRecord {
            id: 1,
            device_id: "dev-a".into(),
            module_type: module,
            score,
            accuracy,
            duration: 40.0,
            difficulty: 4,
            details: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_slice_yields_empty_stats() {
        let stats = TrainingStats::from_records(&[]);
        assert_eq!(stats.total_sessions, 0);
        assert!(stats.modules.is_empty());
        assert!(stats.weakest_module().is_none());
    }

    #[test]
    fn per_module_means_and_best() {
        let stats = TrainingStats::from_records(&[
            record(ModuleKind::GridSearch, 200, 0.8),
            record(ModuleKind::GridSearch, 300, 1.0),
            record(ModuleKind::SceneMemory, 50, 0.5),
        ]);
        assert_eq!(stats.total_sessions, 3);

        let grid = stats
            .modules
            .iter()
            .find(|m| m.module == ModuleKind::GridSearch)
            .expect("grid bucket");
        assert_eq!(grid.sessions, 2);
        assert!((grid.mean_accuracy - 0.9).abs() < 1e-9);
        assert!((grid.mean_score - 250.0).abs() < 1e-9);
        assert_eq!(grid.best_score, 300);
    }

    #[test]
    fn weakest_module_picks_lowest_mean_accuracy() {
        let stats = TrainingStats::from_records(&[
            record(ModuleKind::GridSearch, 200, 0.9),
            record(ModuleKind::SoundMatch, 80, 0.6),
            record(ModuleKind::SceneMemory, 60, 0.7),
        ]);
        assert_eq!(
            stats.weakest_module().expect("weakest").module,
            ModuleKind::SoundMatch
        );
    }

    #[test]
    fn summary_lines_render_one_per_module() {
        let stats = TrainingStats::from_records(&[
            record(ModuleKind::GridSearch, 200, 0.875),
            record(ModuleKind::SimonRepeat, 100, 0.5),
        ]);
        let lines = stats.summary_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().any(|l| l.starts_with("grid-search:")));
        assert!(lines.iter().any(|l| l.contains("best 100")));
    }
}

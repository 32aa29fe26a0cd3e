//! Accumulated performance metrics for one session.
//!
//! The session driver owns the correctness counters and response-time
//! samples; game engines own their module-specific counters (`mis_taps`,
//! `max_span`, `rounds_played`). See the contract on
//! [`crate::session::GameRules::judge`].

use serde::{Deserialize, Serialize};

/// Raw performance metrics accumulated while a session is played.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionMetrics {
    /// Responses that matched the expected value.
    pub correct_count: u32,
    /// Responses that did not match.
    pub error_count: u32,
    /// Taps on a non-target (grid modules only).
    pub mis_taps: u32,
    /// Per-response elapsed time samples, in milliseconds.
    pub response_times_ms: Vec<u64>,
    /// Current run of consecutive correct responses.
    pub streak: u32,
    /// Longest run of consecutive correct responses.
    pub best_streak: u32,
    /// Longest sequence span reached (span modules only).
    pub max_span: u32,
    /// Completed rounds (span modules count one per flash/reply cycle).
    pub rounds_played: u32,
}

impl SessionMetrics {
    /// Create an empty metrics accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total judged responses.
    #[must_use]
    pub fn responses(&self) -> u32 {
        self.correct_count + self.error_count
    }

    /// `correct / (correct + errors)`, or `None` before any response.
    ///
    /// The ratio is always within `[0, 1]`.
    #[must_use]
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.responses();
        if total == 0 {
            None
        } else {
            Some(f64::from(self.correct_count) / f64::from(total))
        }
    }

    /// Mean response time in milliseconds, or `None` without samples.
    #[must_use]
    pub fn mean_response_ms(&self) -> Option<f64> {
        if self.response_times_ms.is_empty() {
            return None;
        }
        let sum: u64 = self.response_times_ms.iter().sum();
        Some(sum as f64 / self.response_times_ms.len() as f64)
    }

    /// Record a correct response. Called by the session driver only.
    pub(crate) fn record_correct(&mut self, elapsed_ms: u64) {
        self.correct_count += 1;
        self.streak += 1;
        self.best_streak = self.best_streak.max(self.streak);
        self.response_times_ms.push(elapsed_ms);
    }

    /// Record a wrong response. Called by the session driver only.
    pub(crate) fn record_wrong(&mut self, elapsed_ms: u64) {
        self.error_count += 1;
        self.streak = 0;
        self.response_times_ms.push(elapsed_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_is_none_without_responses() {
        assert!(SessionMetrics::new().accuracy().is_none());
    }

    #[test]
    fn accuracy_is_correct_over_total() {
        let mut m = SessionMetrics::new();
        for _ in 0..8 {
            m.record_correct(100);
        }
        m.record_wrong(100);
        m.record_wrong(100);
        let acc = m.accuracy().expect("has responses");
        assert!((acc - 0.8).abs() < 1e-9);
    }

    #[test]
    fn best_streak_survives_a_miss() {
        let mut m = SessionMetrics::new();
        m.record_correct(10);
        m.record_correct(10);
        m.record_correct(10);
        m.record_wrong(10);
        m.record_correct(10);
        assert_eq!(m.best_streak, 3);
        assert_eq!(m.streak, 1);
    }

    #[test]
    fn mean_response_time() {
        let mut m = SessionMetrics::new();
        m.record_correct(100);
        m.record_correct(300);
        assert!((m.mean_response_ms().expect("samples") - 200.0).abs() < 1e-9);
    }
}

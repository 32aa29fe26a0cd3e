//! The coach facade — feedback and recommendations that never fail.
//!
//! Every public method returns a plain `String`: when the backend is
//! missing, slow, or broken, static fallback copy is substituted, so the
//! result screen always has something to show. A hard deadline bounds the
//! whole call including retries.

use std::time::Duration;

use tracing::{debug, warn};

use neurogym_core::record::TrainingRecord;
use neurogym_core::stats::TrainingStats;

use crate::client::CoachClient;
use crate::prompt;
use crate::types::CoachRequest;

/// Default hard deadline for one coach call, retries included.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(10);

// Static fallback copy, picked by accuracy band.
const FALLBACK_FEEDBACK_STRONG: &str =
    "Strong session! Your accuracy is excellent — try the next difficulty level to keep the challenge fresh.";
const FALLBACK_FEEDBACK_SOLID: &str =
    "Solid work. A few slips crept in — slow down slightly on the tricky items and the accuracy will follow.";
const FALLBACK_FEEDBACK_ROUGH: &str =
    "Good effort — this one is tough. Drop the difficulty a notch and rebuild momentum with a clean run.";

const FALLBACK_RECOMMENDATION: &str =
    "Keep your training varied: rotate through the modules and revisit the one that felt hardest last time.";

/// Generates player-facing coach text with guaranteed fallback.
pub struct Coach {
    client: CoachClient,
    deadline: Duration,
}

impl Coach {
    /// Wrap a client with the default deadline.
    #[must_use]
    pub fn new(client: CoachClient) -> Self {
        Self {
            client,
            deadline: DEFAULT_DEADLINE,
        }
    }

    /// A coach with no backend: every call returns fallback copy.
    #[must_use]
    pub fn offline() -> Self {
        Self::new(CoachClient::none())
    }

    /// Override the hard deadline (from `TimingConfig::ai_deadline_ms`).
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// One short feedback blurb for a just-finished session.
    ///
    /// Never errors; falls back to static copy on any backend problem.
    pub async fn session_feedback(&self, record: &TrainingRecord) -> String {
        let fallback = fallback_feedback(record.accuracy);
        if !self.client.is_available() {
            debug!(module = %record.module_type, "Coach offline; static feedback used");
            return fallback.to_string();
        }

        let request = CoachRequest::new(
            prompt::SESSION_FEEDBACK_SYSTEM,
            prompt::render_session_feedback(record),
        );
        self.generate_or(fallback, request).await
    }

    /// A what-to-train-next recommendation over the player's history.
    ///
    /// Never errors; falls back to static copy on any backend problem.
    pub async fn training_recommendation(&self, stats: &TrainingStats) -> String {
        let fallback = fallback_recommendation(stats);
        if !self.client.is_available() {
            debug!("Coach offline; static recommendation used");
            return fallback;
        }

        let request = CoachRequest::new(
            prompt::RECOMMENDATION_SYSTEM,
            prompt::render_recommendation(stats),
        );
        self.generate_or(&fallback, request).await
    }

    /// Run one generation under the deadline, substituting `fallback` on
    /// timeout, backend error, or an empty response.
    async fn generate_or(&self, fallback: &str, request: CoachRequest) -> String {
        match tokio::time::timeout(self.deadline, self.client.generate(&request)).await {
            Ok(Ok(response)) => {
                let text = response.text.trim();
                if text.is_empty() {
                    warn!("Coach returned empty text; static copy used");
                    fallback.to_string()
                } else {
                    debug!(
                        latency_ms = response.latency_ms,
                        tokens = response.tokens_generated,
                        "Coach text generated"
                    );
                    text.to_string()
                }
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Coach call failed; static copy used");
                fallback.to_string()
            }
            Err(_) => {
                warn!(deadline_ms = self.deadline.as_millis() as u64, "Coach deadline hit; static copy used");
                fallback.to_string()
            }
        }
    }
}

fn fallback_feedback(accuracy: f64) -> &'static str {
    if accuracy >= 0.85 {
        FALLBACK_FEEDBACK_STRONG
    } else if accuracy >= 0.70 {
        FALLBACK_FEEDBACK_SOLID
    } else {
        FALLBACK_FEEDBACK_ROUGH
    }
}

fn fallback_recommendation(stats: &TrainingStats) -> String {
    match stats.weakest_module() {
        Some(weakest) => format!(
            "Your {} accuracy is the lowest of your modules ({:.0}%) — spend your next few sessions there.",
            weakest.module,
            weakest.mean_accuracy * 100.0
        ),
        None => FALLBACK_RECOMMENDATION.to_string(),
    }
}

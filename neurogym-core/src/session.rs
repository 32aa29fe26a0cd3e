//! Generic round/phase state machine shared by every training module.
//!
//! Each mini-game supplies a [`GameRules`] implementation (item generation,
//! the correctness comparator, completion predicate, detail metrics); the
//! [`Session`] driver owns the lifecycle, the shared counters, and the two
//! correctness properties every module relies on:
//!
//! - **Exactly-once scoring**: each round item is judged at most once, and a
//!   response arriving after `Complete` is discarded without any mutation.
//! - **Stale-timer rejection**: every phase transition bumps an epoch; a
//!   timer callback carrying an old epoch is discarded (see
//!   [`crate::timer`]).

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::{Result, TrainError};
use crate::metrics::SessionMetrics;
use crate::outcome::SessionOutcome;
use crate::scoring;
use crate::timer::TimerToken;
use crate::types::{Judgment, ModuleKind, Phase, SessionId};

/// Strategy trait implemented by each training module's engine.
///
/// The driver calls `judge` only while the session is `Active`, at most once
/// per submitted response. Implementations own their round items and may
/// update module-specific counters (`mis_taps`, `max_span`, `rounds_played`)
/// on the passed metrics, but must leave `correct_count`, `error_count`,
/// `streak` and the time samples to the driver.
pub trait GameRules {
    /// The player-response type this module consumes.
    type Input;

    /// Which module this rule set belongs to.
    fn kind(&self) -> ModuleKind;

    /// The validated difficulty parameter the rules were built from.
    fn difficulty(&self) -> u32;

    /// Number of round items generated at construction. Always > 0 for a
    /// constructed rule set; [`Session::new`] rejects empty ones.
    fn total_items(&self) -> usize;

    /// Memorization window before responses are accepted, if the module has
    /// one. `None` skips the `Preview` phase entirely.
    fn preview(&self) -> Option<Duration> {
        None
    }

    /// Whether the module shows per-item feedback between responses.
    fn per_item_feedback(&self) -> bool {
        false
    }

    /// Compare one response against the expected value and advance the
    /// module's own round data. Returning [`Judgment::Ignored`] means the
    /// input did not consume a round item (e.g. re-flipping a matched card).
    fn judge(&mut self, input: &Self::Input, metrics: &mut SessionMetrics) -> Judgment;

    /// Terminal condition, checked after every judged response. Each module
    /// documents its own: all items answered, lives exhausted, or span cap.
    fn finished(&self, metrics: &SessionMetrics) -> bool;

    /// Module-specific sub-metrics for the outcome's open `details` map.
    fn details(&self, metrics: &SessionMetrics) -> serde_json::Map<String, serde_json::Value>;
}

/// One play-through of one training module.
///
/// Drives the `Idle → Preview → Active → (Feedback ⇄ Active)* → Complete`
/// lifecycle over a [`GameRules`] implementation.
#[derive(Debug)]
pub struct Session<R: GameRules> {
    id: SessionId,
    rules: R,
    phase: Phase,
    epoch: u64,
    metrics: SessionMetrics,
    created_at: DateTime<Utc>,
    started_at: Option<Instant>,
    phase_entered: Instant,
    outcome: Option<SessionOutcome>,
}

impl<R: GameRules> Session<R> {
    /// Create a session in the `Idle` phase.
    ///
    /// # Errors
    /// Returns [`TrainError::EmptySession`] if the rules generated no round
    /// items — a session that can never produce a result must not exist.
    pub fn new(rules: R) -> Result<Self> {
        if rules.total_items() == 0 {
            return Err(TrainError::EmptySession(rules.kind()));
        }
        let id = SessionId::new();
        debug!(session = %id, module = %rules.kind(), items = rules.total_items(), "Session created");
        Ok(Self {
            id,
            rules,
            phase: Phase::Idle,
            epoch: 0,
            metrics: SessionMetrics::new(),
            created_at: Utc::now(),
            started_at: None,
            phase_entered: Instant::now(),
            outcome: None,
        })
    }

    /// Session identifier.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Which module this session plays.
    #[must_use]
    pub fn kind(&self) -> ModuleKind {
        self.rules.kind()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Accumulated metrics so far.
    #[must_use]
    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    /// The module rules driving this session.
    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Wall-clock creation time (feeds the persisted record).
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Token bound to the current phase epoch. A timer scheduled now must
    /// carry this token; it becomes stale on the next transition.
    #[must_use]
    pub fn timer_token(&self) -> TimerToken {
        TimerToken::new(self.epoch)
    }

    /// Start the session: `Idle → Preview` (or straight to `Active` when the
    /// module has no memorization phase). Returns the entered phase.
    ///
    /// Calling `begin` in any other phase is a no-op.
    pub fn begin(&mut self) -> Phase {
        if self.phase != Phase::Idle {
            debug!(session = %self.id, phase = %self.phase, "begin ignored outside idle");
            return self.phase;
        }
        self.started_at = Some(Instant::now());
        let next = if self.rules.preview().is_some() {
            Phase::Preview
        } else {
            Phase::Active
        };
        self.enter(next);
        next
    }

    /// End the memorization window: `Preview → Active`.
    pub fn reveal(&mut self) {
        if self.phase != Phase::Preview {
            debug!(session = %self.id, phase = %self.phase, "reveal ignored outside preview");
            return;
        }
        self.enter(Phase::Active);
    }

    /// Deliver an elapsed timer. The token's epoch must match the current
    /// one; a timer scheduled in a phase the session has since left is
    /// silently discarded.
    pub fn on_timer(&mut self, token: TimerToken) {
        if token.epoch() != self.epoch {
            debug!(
                session = %self.id,
                token_epoch = token.epoch(),
                current_epoch = self.epoch,
                "Stale timer discarded"
            );
            return;
        }
        if self.phase == Phase::Preview {
            self.reveal();
        }
    }

    /// Submit one player response.
    ///
    /// Only accepted while `Active`; in any other phase (including after
    /// `Complete`) the response is discarded and [`Judgment::Ignored`] is
    /// returned with no state change.
    pub fn submit(&mut self, input: &R::Input) -> Judgment {
        if self.phase != Phase::Active {
            if self.phase == Phase::Complete {
                warn!(session = %self.id, "Response after completion ignored");
            } else {
                debug!(session = %self.id, phase = %self.phase, "Response outside active ignored");
            }
            return Judgment::Ignored;
        }

        let elapsed_ms = u64::try_from(self.phase_entered.elapsed().as_millis()).unwrap_or(u64::MAX);
        let judgment = self.rules.judge(input, &mut self.metrics);
        match judgment {
            Judgment::Correct => self.metrics.record_correct(elapsed_ms),
            Judgment::Wrong => self.metrics.record_wrong(elapsed_ms),
            Judgment::Ignored => return Judgment::Ignored,
        }

        if self.rules.finished(&self.metrics) {
            self.complete();
        } else if self.rules.per_item_feedback() {
            self.enter(Phase::Feedback);
        } else {
            // Same phase, but the response-time clock restarts per item.
            self.phase_entered = Instant::now();
        }
        judgment
    }

    /// Dismiss per-item feedback: `Feedback → Active`.
    pub fn resume(&mut self) {
        if self.phase != Phase::Feedback {
            debug!(session = %self.id, phase = %self.phase, "resume ignored outside feedback");
            return;
        }
        self.enter(Phase::Active);
    }

    /// The immutable outcome, available once the session is `Complete`.
    #[must_use]
    pub fn outcome(&self) -> Option<&SessionOutcome> {
        self.outcome.as_ref()
    }

    fn enter(&mut self, phase: Phase) {
        debug!(session = %self.id, from = %self.phase, to = %phase, "Phase transition");
        self.phase = phase;
        self.epoch += 1;
        self.phase_entered = Instant::now();
    }

    /// Terminal transition. Computes the outcome exactly once.
    fn complete(&mut self) {
        self.enter(Phase::Complete);
        if self.outcome.is_some() {
            return;
        }
        let duration_secs = self
            .started_at
            .map_or(0.0, |t| t.elapsed().as_secs_f64());
        let score = scoring::score(self.kind(), self.rules.difficulty(), &self.metrics);
        let rating = scoring::rate(self.kind(), self.rules.difficulty(), &self.metrics);
        // Complete is only reachable after at least one judged response, so
        // accuracy is always defined here.
        let accuracy = self.metrics.accuracy().unwrap_or(0.0);
        let outcome = SessionOutcome {
            session_id: self.id,
            module: self.kind(),
            difficulty: self.rules.difficulty(),
            score,
            accuracy,
            duration_secs,
            rating,
            details: self.rules.details(&self.metrics),
            completed_at: Utc::now(),
        };
        debug!(
            session = %self.id,
            score = outcome.score,
            accuracy = outcome.accuracy,
            rating = %outcome.rating,
            "Session complete"
        );
        self.outcome = Some(outcome);
    }
}

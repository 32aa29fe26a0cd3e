//! Property-based tests for the session engine and scoring layer.
//!
//! Uses `proptest` to verify the engine's invariants under random inputs:
//! deterministic seeded generation, deterministic grading, accuracy bounds,
//! and the exactly-once contract after completion.

use proptest::prelude::*;

use neurogym_core::games::{
    BilateralRules, ClassifyRules, GridRules, SceneRules, SequenceRules, SimonRules, SoundRules,
};
use neurogym_core::session::{GameRules, Session};
use neurogym_core::types::{ModuleKind, Phase};
use neurogym_core::{scoring, SessionMetrics};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_metrics() -> impl Strategy<Value = SessionMetrics> {
    (0u32..200, 0u32..200, 0u32..50, 0u32..50, 0u32..13).prop_map(
        |(correct, errors, streak, rounds, span)| SessionMetrics {
            correct_count: correct,
            error_count: errors,
            best_streak: streak.min(correct),
            rounds_played: rounds,
            max_span: span,
            ..SessionMetrics::default()
        },
    )
}

// ---------------------------------------------------------------------------
// Property: grading is a pure function of (kind, difficulty, metrics)
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn grading_is_deterministic(metrics in arb_metrics(), difficulty in 3u32..=6) {
        for kind in ModuleKind::all() {
            let first = (scoring::score(*kind, difficulty, &metrics), scoring::rate(*kind, difficulty, &metrics));
            let second = (scoring::score(*kind, difficulty, &metrics), scoring::rate(*kind, difficulty, &metrics));
            prop_assert_eq!(first, second);
        }
    }
}

// ---------------------------------------------------------------------------
// Property: accuracy is correct/total and always within [0, 1]
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn accuracy_is_bounded(metrics in arb_metrics()) {
        match metrics.accuracy() {
            None => prop_assert_eq!(metrics.responses(), 0),
            Some(acc) => {
                prop_assert!((0.0..=1.0).contains(&acc));
                let expected = f64::from(metrics.correct_count) / f64::from(metrics.responses());
                prop_assert!((acc - expected).abs() < 1e-12);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property: every valid difficulty yields a playable (non-empty) session
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn valid_difficulties_build_non_empty_sessions(seed in any::<u64>()) {
        for side in 3u32..=6 {
            prop_assert!(GridRules::new(side, seed)?.total_items() > 0);
        }
        for span in 3u32..=6 {
            prop_assert!(SequenceRules::new(span, seed)?.total_items() > 0);
        }
        for pairs in 2u32..=8 {
            prop_assert!(SoundRules::new(pairs, seed)?.total_items() > 0);
        }
        for rules in 1u32..=3 {
            prop_assert!(ClassifyRules::new(rules, seed)?.total_items() > 0);
        }
        for cols in 3u32..=6 {
            prop_assert!(BilateralRules::new(cols, seed)?.total_items() > 0);
        }
        for objects in 3u32..=8 {
            prop_assert!(SceneRules::new(objects, seed)?.total_items() > 0);
        }
        for len in 1u32..=3 {
            prop_assert!(SimonRules::new(len, seed)?.total_items() > 0);
        }
    }
}

// ---------------------------------------------------------------------------
// Property: seeded generation is reproducible
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn same_seed_same_grid(seed in any::<u64>(), side in 3u32..=6) {
        let a = GridRules::new(side, seed)?;
        let b = GridRules::new(side, seed)?;
        prop_assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn same_seed_same_sequence(seed in any::<u64>(), span in 3u32..=6) {
        let a = SequenceRules::new(span, seed)?;
        let b = SequenceRules::new(span, seed)?;
        prop_assert_eq!(a.current_sequence(), b.current_sequence());
    }
}

// ---------------------------------------------------------------------------
// Property: a completed session never re-grades
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn completed_session_ignores_all_later_taps(
        seed in any::<u64>(),
        side in 3u32..=4,
        extra_taps in prop::collection::vec(0u32..40, 1..20),
    ) {
        let rules = GridRules::new(side, seed)?;
        let mut session = Session::new(rules)?;
        session.begin();
        for n in 1..=side * side {
            session.submit(&n);
        }
        prop_assert_eq!(session.phase(), Phase::Complete);

        let outcome = session.outcome().expect("completed session has outcome");
        let score = outcome.score;
        let accuracy = outcome.accuracy;

        for tap in extra_taps {
            session.submit(&tap);
        }
        let after = session.outcome().expect("outcome survives");
        prop_assert_eq!(after.score, score);
        prop_assert!((after.accuracy - accuracy).abs() < 1e-12);
        prop_assert_eq!(session.metrics().responses(), side * side);
    }
}

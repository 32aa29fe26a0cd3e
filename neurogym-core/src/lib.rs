//! # NeuroGym Core Library
//!
//! Engine for a suite of short cognitive-training mini-games.
//!
//! Seven modules, one driver: every game implements [`GameRules`] and runs
//! inside a [`Session`], which owns the phase machine
//! (idle → preview → active → feedback → complete), the shared response
//! metrics, and the exactly-once scored outcome. Around the engine:
//!
//! - **Games** — [`games`]: grid search, sequence memory, sound match,
//!   classification, bilateral coordination, scene memory, Simon repeat
//! - **Scoring** — [`scoring`]: pure per-module score and rating functions
//! - **Records** — [`record`] + [`store`]: best-effort SQLite persistence
//! - **Stats** — [`stats`]: per-module aggregates over stored records
//! - **Identity** — [`device`]: stable anonymous device UUID
//!
//! ## Engine Contract
//!
//! - Session creation fails rather than producing a session with zero items.
//! - Inputs outside the active phase are discarded, never scored.
//! - Expired timers from earlier phases cannot fire into later ones.
//! - A completed session grades exactly once; re-grading is a no-op.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod device;
pub mod error;
pub mod games;
pub mod metrics;
pub mod outcome;
pub mod record;
pub mod scoring;
pub mod session;
pub mod stats;
pub mod store;
pub mod timer;
pub mod types;

pub use config::TrainConfig;
pub use error::TrainError;
pub use metrics::SessionMetrics;
pub use outcome::SessionOutcome;
pub use session::{GameRules, Session};
pub use types::*;

//! # neurogym-llm — AI Coach Layer for NeuroGym
//!
//! Turns completed-session records and training history into short,
//! player-facing coach text, through a unified backend interface:
//!   - **Ollama** (local, recommended default)
//!   - **OpenAI-compatible API** (also works with Anthropic, Together, etc.)
//!
//! All coach calls in NeuroGym go through this crate, ensuring:
//!   - Timeout management (a hard per-call deadline, retries included)
//!   - Retry with fallback
//!   - Graceful degradation — [`coach::Coach`] never errors; when no
//!     backend answers in time, static fallback copy is shown instead
//!
//! The result screen never waits longer than the deadline and never renders
//! an error where encouragement should be.

pub mod client;
pub mod coach;
pub mod error;
pub mod prompt;
pub mod types;

pub use client::{CoachClient, CoachProvider};
pub use coach::Coach;
pub use error::CoachError;
pub use types::{CoachRequest, CoachResponse};

//! Coach error types.

use thiserror::Error;

/// Errors that can occur while talking to an AI coach backend.
///
/// None of these reach the result screen: the [`crate::coach::Coach`]
/// catches every variant and substitutes static fallback copy.
#[derive(Debug, Error)]
pub enum CoachError {
    /// HTTP request failed.
    #[error("coach request failed: {0}")]
    RequestFailed(String),

    /// Backend response was not in the expected shape.
    #[error("failed to parse coach response: {0}")]
    ParseError(String),

    /// Request exceeded the deadline.
    #[error("coach request timed out after {0}ms")]
    Timeout(u64),

    /// No backend is reachable (or none is configured).
    #[error("coach backend unavailable: {0}")]
    Unavailable(String),

    /// All retry attempts exhausted.
    #[error("all coach retry attempts exhausted after {attempts} tries: {last_error}")]
    RetriesExhausted {
        /// How many attempts were made.
        attempts: u32,
        /// The last transport or HTTP error seen.
        last_error: String,
    },

    /// Configuration error.
    #[error("coach configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for CoachError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CoachError::Timeout(0)
        } else if err.is_connect() {
            CoachError::Unavailable(err.to_string())
        } else {
            CoachError::RequestFailed(err.to_string())
        }
    }
}

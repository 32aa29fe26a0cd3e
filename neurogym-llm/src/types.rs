//! Request and response types for coach backend calls.

use serde::{Deserialize, Serialize};

/// A single text-completion request to the coach backend.
#[derive(Debug, Clone, Serialize)]
pub struct CoachRequest {
    /// System prompt (coach persona and output constraints).
    pub system: String,
    /// User prompt (the rendered session or stats summary).
    pub user: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Temperature (0.0 = deterministic, 1.0 = creative).
    pub temperature: f32,
    /// Per-attempt request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl CoachRequest {
    /// Create a request with the defaults used for short feedback blurbs.
    #[must_use]
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            max_tokens: 200,
            temperature: 0.7,
            timeout_ms: 5000,
        }
    }

    /// Set the per-attempt timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// A response from the coach backend.
#[derive(Debug, Clone, Deserialize)]
pub struct CoachResponse {
    /// The generated text.
    pub text: String,
    /// How many tokens were generated.
    pub tokens_generated: u32,
    /// Latency in milliseconds.
    pub latency_ms: u64,
    /// Which model produced it.
    pub model: String,
}

//! Coach client — unified interface for Ollama and OpenAI-compatible backends.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::CoachError;
use crate::types::{CoachRequest, CoachResponse};

/// Provider backend for coach text generation.
#[derive(Debug, Clone)]
pub enum CoachProvider {
    /// Ollama running locally (recommended).
    Ollama {
        /// Base URL, e.g. `http://localhost:11434`.
        base_url: String,
    },
    /// OpenAI-compatible API (also works with Anthropic, Together, etc.).
    OpenAiCompatible {
        /// Base URL of the API.
        base_url: String,
        /// Bearer token.
        api_key: String,
    },
    /// No backend available — all calls return error, triggering the
    /// static fallback copy.
    None,
}

/// HTTP client that routes coach requests to the configured backend.
pub struct CoachClient {
    provider: CoachProvider,
    http: Client,
    model: String,
    max_retries: u32,
}

impl CoachClient {
    /// Create a new coach client.
    #[must_use]
    pub fn new(provider: CoachProvider, model: impl Into<String>, max_retries: u32) -> Self {
        Self {
            provider,
            http: Client::new(),
            model: model.into(),
            max_retries,
        }
    }

    /// Create a client with no backend (all calls fail → static fallback).
    #[must_use]
    pub fn none() -> Self {
        Self {
            provider: CoachProvider::None,
            http: Client::new(),
            model: String::new(),
            max_retries: 0,
        }
    }

    /// Whether a backend is configured at all.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !matches!(self.provider, CoachProvider::None)
    }

    /// Generate a response from the backend.
    ///
    /// Returns `Err` if the backend is unavailable or all retries fail.
    /// The caller should fall back to static copy on error.
    pub async fn generate(&self, request: &CoachRequest) -> Result<CoachResponse, CoachError> {
        match &self.provider {
            CoachProvider::None => {
                Err(CoachError::Unavailable("no coach backend configured".into()))
            }
            CoachProvider::Ollama { base_url } => self.generate_ollama(base_url, request).await,
            CoachProvider::OpenAiCompatible { base_url, api_key } => {
                self.generate_openai(base_url, api_key, request).await
            }
        }
    }

    /// Generate using Ollama's API.
    async fn generate_ollama(
        &self,
        base_url: &str,
        request: &CoachRequest,
    ) -> Result<CoachResponse, CoachError> {
        let url = format!("{base_url}/api/generate");
        let body = json!({
            "model": self.model,
            "prompt": format!("{}\n\n{}", request.system, request.user),
            "stream": false,
            "options": {
                "temperature": request.temperature,
                "num_predict": request.max_tokens,
            }
        });

        let mut last_error = String::new();
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                debug!("Retrying coach call (attempt {}/{})", attempt + 1, self.max_retries + 1);
            }

            let start = Instant::now();
            let result = self
                .http
                .post(&url)
                .json(&body)
                .timeout(Duration::from_millis(request.timeout_ms))
                .send()
                .await;

            let latency_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(resp) => {
                    if resp.status().is_success() {
                        let json: serde_json::Value = resp
                            .json()
                            .await
                            .map_err(|e| CoachError::ParseError(e.to_string()))?;

                        let text = json["response"].as_str().unwrap_or("").to_string();

                        return Ok(CoachResponse {
                            text,
                            tokens_generated: json["eval_count"].as_u64().unwrap_or(0) as u32,
                            latency_ms,
                            model: self.model.clone(),
                        });
                    }
                    last_error = format!(
                        "HTTP {}: {}",
                        resp.status(),
                        resp.text().await.unwrap_or_default()
                    );
                    warn!("Ollama returned error: {}", last_error);
                }
                Err(e) => {
                    last_error = e.to_string();
                    if e.is_timeout() {
                        warn!("Ollama request timed out after {}ms", request.timeout_ms);
                    } else {
                        warn!("Ollama request failed: {}", last_error);
                    }
                }
            }
        }

        Err(CoachError::RetriesExhausted {
            attempts: self.max_retries + 1,
            last_error,
        })
    }

    /// Generate using an OpenAI-compatible chat API.
    async fn generate_openai(
        &self,
        base_url: &str,
        api_key: &str,
        request: &CoachRequest,
    ) -> Result<CoachResponse, CoachError> {
        let url = format!("{base_url}/v1/chat/completions");
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user },
            ],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });

        let mut last_error = String::new();
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                debug!("Retrying coach call (attempt {}/{})", attempt + 1, self.max_retries + 1);
            }

            let start = Instant::now();
            let result = self
                .http
                .post(&url)
                .header("Authorization", format!("Bearer {api_key}"))
                .json(&body)
                .timeout(Duration::from_millis(request.timeout_ms))
                .send()
                .await;

            let latency_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(resp) => {
                    if resp.status().is_success() {
                        let json: serde_json::Value = resp
                            .json()
                            .await
                            .map_err(|e| CoachError::ParseError(e.to_string()))?;

                        let text = json["choices"][0]["message"]["content"]
                            .as_str()
                            .unwrap_or("")
                            .to_string();

                        let tokens =
                            json["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32;

                        return Ok(CoachResponse {
                            text,
                            tokens_generated: tokens,
                            latency_ms,
                            model: self.model.clone(),
                        });
                    }
                    last_error = format!("HTTP {}", resp.status());
                    warn!("Coach API returned error: {}", last_error);
                }
                Err(e) => {
                    last_error = e.to_string();
                    warn!("Coach API request failed: {}", last_error);
                }
            }
        }

        Err(CoachError::RetriesExhausted {
            attempts: self.max_retries + 1,
            last_error,
        })
    }
}

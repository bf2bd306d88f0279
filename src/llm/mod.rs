//! LLM access for post generation
//!
//! This module provides the provider-facing half of the engine:
//!
//! - [`ContentRequester`] - one prompt/response exchange against a named model
//! - [`GenerationFailure`] - the classified failure signal raised on any unusable exchange
//! - [`ModelRoster`] - ordered model list with cursor and per-model failure counts
//! - [`GroqClient`] - production requester speaking the OpenAI-compatible chat API
//!
//! Requesters never retry internally. Retry and fallback policy belongs to the
//! calendar assembler, which consumes [`GenerationFailure`] as an ordinary value.

pub mod groq;
pub mod roster;

pub use groq::GroqClient;
pub use roster::{ModelRoster, RosterError, RosterStatus};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default model roster, best models first
pub const DEFAULT_MODELS: &[&str] = &[
    "meta-llama/llama-4-maverick-17b-128e-instruct",
    "llama-3.3-70b-versatile",
    "qwen/qwen3-32b",
    "deepseek-r1-distill-llama-70b",
    "openai/gpt-oss-120b",
    "openai/gpt-oss-20b",
    "moonshotai/kimi-k2-instruct",
    "llama-3.1-8b-instant",
    "groq/compound",
    "gemma2-9b-it",
    "groq/compound-mini",
];

/// Configuration for the LLM provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// OpenAI-compatible API base URL (default: https://api.groq.com/openai/v1)
    pub endpoint: String,

    /// API key; only ever taken from the environment
    #[serde(skip)]
    pub api_key: Option<String>,

    /// Ordered model roster
    pub models: Vec<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Temperature for generation
    pub temperature: f32,

    /// Client-side pacing; unset means unpaced
    #[serde(default)]
    pub requests_per_minute: Option<u32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.groq.com/openai/v1".to_string(),
            api_key: None,
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            timeout_secs: 60,
            max_tokens: 600,
            temperature: 0.8,
            requests_per_minute: None,
        }
    }
}

/// System + user prompt pair sent in one exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Failure taxonomy for a single exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    /// Provider throttled the request or the quota is exhausted
    RateLimit,
    /// Provider rejected the request shape or the model identifier
    ModelError,
    /// Network failure, timeout, malformed or empty response, anything else
    UnknownError,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RateLimit => "RATE_LIMIT",
            Self::ModelError => "MODEL_ERROR",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified failure of one exchange with one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind} from {provider}: {detail}")]
pub struct GenerationFailure {
    pub provider: String,
    pub kind: FailureKind,
    pub detail: String,
}

impl GenerationFailure {
    pub fn new(provider: impl Into<String>, kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            kind,
            detail: detail.into(),
        }
    }

    pub fn rate_limit(provider: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(provider, FailureKind::RateLimit, detail)
    }

    pub fn model_error(provider: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(provider, FailureKind::ModelError, detail)
    }

    pub fn unknown(provider: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(provider, FailureKind::UnknownError, detail)
    }
}

/// One prompt/response exchange against a named provider
///
/// Implementations perform exactly one exchange and never return an empty
/// string as success.
#[async_trait]
pub trait ContentRequester: Send + Sync {
    async fn request(&self, prompt: &Prompt, provider: &str) -> Result<String, GenerationFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = LlmConfig::default();
        assert_eq!(config.endpoint, "https://api.groq.com/openai/v1");
        assert_eq!(config.models.len(), 11);
        assert_eq!(config.max_tokens, 600);
        assert!((config.temperature - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_failure_display() {
        let failure = GenerationFailure::rate_limit("llama-3.1-8b-instant", "HTTP 429");
        assert_eq!(
            failure.to_string(),
            "RATE_LIMIT from llama-3.1-8b-instant: HTTP 429"
        );
    }

    #[test]
    fn test_failure_kind_serializes_screaming() {
        let json = serde_json::to_string(&FailureKind::ModelError).unwrap();
        assert_eq!(json, "\"MODEL_ERROR\"");
    }
}

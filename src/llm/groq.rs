//! Groq chat-completions client
//!
//! Speaks the OpenAI-compatible `/chat/completions` API. Failures are
//! classified from the HTTP status and the structured error body the API
//! returns, never from free-form message text.

use async_trait::async_trait;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use regex::Regex;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::OnceLock;
use std::time::Duration;

use super::{ContentRequester, FailureKind, GenerationFailure, LlmConfig, Prompt};
use crate::error::Result;
use crate::utils::preview;

/// Chat completion request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Chat completion response body
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Error envelope returned with non-2xx responses
#[derive(Debug, Default, Deserialize)]
struct ApiErrorEnvelope {
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub code: Option<String>,
}

/// Map a non-success response onto the failure taxonomy
pub fn classify_status(status: StatusCode, body: &ApiErrorBody) -> FailureKind {
    match body.code.as_deref() {
        Some("rate_limit_exceeded") => return FailureKind::RateLimit,
        Some("model_not_found") | Some("model_decommissioned") => return FailureKind::ModelError,
        _ => {}
    }

    match status.as_u16() {
        429 => FailureKind::RateLimit,
        400 | 404 | 413 | 422 => FailureKind::ModelError,
        _ => FailureKind::UnknownError,
    }
}

/// Drop `<think>` blocks emitted by reasoning models
fn strip_reasoning(text: &str) -> String {
    static THINK_RE: OnceLock<Regex> = OnceLock::new();

    let re = THINK_RE.get_or_init(|| {
        Regex::new(r"(?s)<think>.*?</think>").expect("Invalid regex pattern")
    });

    re.replace_all(text, "").trim().to_string()
}

/// Groq API client
pub struct GroqClient {
    client: Client,
    config: LlmConfig,
    rate_limiter: Option<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl GroqClient {
    /// Create a client from an LLM configuration
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()?;

        let rate_limiter = config
            .requests_per_minute
            .and_then(NonZeroU32::new)
            .map(|rate| RateLimiter::direct(Quota::per_minute(rate)));

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl ContentRequester for GroqClient {
    async fn request(&self, prompt: &Prompt, provider: &str) -> Result<String, GenerationFailure> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        tracing::debug!(model = %provider, "Generating content");

        let body = ChatRequest {
            model: provider,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: 1.0,
            stream: false,
        };

        let mut request = self.client.post(self.completions_url()).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            let detail = if e.is_timeout() {
                "request timed out".to_string()
            } else {
                format!("transport error: {e}")
            };
            GenerationFailure::unknown(provider, detail)
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let error = serde_json::from_str::<ApiErrorEnvelope>(&text)
                .ok()
                .and_then(|envelope| envelope.error)
                .unwrap_or_default();

            let kind = classify_status(status, &error);
            let detail = match &error.message {
                Some(message) => format!("HTTP {}: {message}", status.as_u16()),
                None => format!("HTTP {}", status.as_u16()),
            };
            return Err(GenerationFailure::new(provider, kind, detail));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            GenerationFailure::unknown(provider, format!("malformed response: {e}"))
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| strip_reasoning(&content))
            .unwrap_or_default();

        if content.is_empty() {
            return Err(GenerationFailure::unknown(provider, "empty completion"));
        }

        tracing::info!(model = %provider, preview = %preview(&content, 100), "Generated content");
        Ok(content)
    }
}

//! LLM provider abstractions for decisiontrace-runtime.
//!
//! The engine talks to a model only through [`LlmProvider`]. Built-in
//! implementations cover OpenAI-compatible chat completions and the Anthropic
//! Messages API; [`ScriptedProvider`] replays canned replies for tests.
//!
//! ## Security
//!
//! Providers hold their API keys in [`ApiCredential`], which never prints the
//! secret through `Debug` or `Display`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

mod anthropic;
mod factory;
mod openai;
mod scripted;
pub mod secrets;

pub use anthropic::{AnthropicProvider, AnthropicProviderFactory, ANTHROPIC_API_KEY_ENV};
pub use factory::{ProviderFactory, ProviderRegistry};
pub use openai::{OpenAiProvider, OpenAiProviderFactory, OPENAI_API_KEY_ENV};
pub use scripted::{RecordedRequest, ScriptedProvider};
pub use secrets::{ApiCredential, CredentialSource};

/// Errors from LLM providers.
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    #[error("Rate limit exceeded, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    ParseError(String),

    #[error("Authentication failed")]
    AuthError,

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Configuration for a single completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionConfig {
    /// Model to use
    pub model: String,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Temperature (0.0 for deterministic)
    pub temperature: f32,

    /// Request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,

    /// Ask the provider for a JSON object response where it supports one
    pub json_response: bool,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_tokens: 1024,
            temperature: 0.0,
            timeout: None,
            json_response: true,
        }
    }
}

/// A chat message for LLM completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system" or "user"
    pub role: String,

    /// Message content
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }


    pub fn is_system(&self) -> bool {
        self.role == "system"
    }
}

/// Response from an LLM completion.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated content
    pub content: String,

    /// Token usage
    pub usage: TokenUsage,

    /// Model that actually served the request
    pub model: String,

    /// Stop / finish reason
    pub stop_reason: Option<String>,
}

/// Token usage from a completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// Provider abstraction allows swapping LLM backends.
///
/// The decision engine makes exactly one `complete` call per decision and
/// never retries.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Execute a chat completion.
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        config: &CompletionConfig,
    ) -> Result<CompletionResponse, ProviderError>;

    /// Provider name for logs.
    fn name(&self) -> &str;
}

/// Reject base URLs that are not http(s).
pub(crate) fn check_base_url(url: &str) -> Result<(), ProviderError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ProviderError::NotConfigured(
            "base_url must start with http:// or https://".to_string(),
        ))
    }
}

/// Map a reqwest send failure onto [`ProviderError`].
pub(crate) fn send_error(e: reqwest::Error, timeout: Option<Duration>) -> ProviderError {
    match timeout {
        Some(t) if e.is_timeout() => ProviderError::Timeout(t),
        _ => ProviderError::HttpError(e.to_string()),
    }
}

/// Non-2xx response. Falls back to the status reason when the body had no
/// readable error message.
pub(crate) fn api_error(status: reqwest::StatusCode, message: Option<String>) -> ProviderError {
    ProviderError::ApiError {
        status: status.as_u16(),
        message: message.unwrap_or_else(|| {
            status.canonical_reason().unwrap_or("unknown error").to_string()
        }),
    }
}

/// Parse a `retry-after` header given in whole seconds.
pub(crate) fn retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    headers
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
}

//! Scripted provider: replays canned replies without any HTTP traffic.
//!
//! Stands in for a real model in tests and offline demos. Every request is
//! recorded so callers can assert on what was sent.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

use super::{ChatMessage, CompletionConfig, CompletionResponse, LlmProvider, ProviderError, TokenUsage};

/// A request as the scripted provider saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub messages: Vec<ChatMessage>,
    pub config: CompletionConfig,
}

/// Provider that answers from a queue of scripted replies, in order.
///
/// Once the queue is empty every call fails with
/// [`ProviderError::NotConfigured`].
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion with `content`.
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.replies.lock().push_back(Ok(content.into()));
        self
    }

    /// Queue a failed completion.
    pub fn with_error(self, error: ProviderError) -> Self {
        self.replies.lock().push_back(Err(error));
        self
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        config: &CompletionConfig,
    ) -> Result<CompletionResponse, ProviderError> {
        self.requests.lock().push(RecordedRequest {
            messages,
            config: config.clone(),
        });

        let reply = self.replies.lock().pop_front().ok_or_else(|| {
            ProviderError::NotConfigured("scripted provider has no replies left".to_string())
        })?;

        let content = reply?;
        Ok(CompletionResponse {
            usage: TokenUsage {
                prompt_tokens: 0,
                completion_tokens: (content.len() / 4) as u32,
            },
            content,
            model: config.model.clone(),
            stop_reason: Some("stop".to_string()),
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

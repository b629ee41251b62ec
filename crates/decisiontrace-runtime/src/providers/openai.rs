//! OpenAI-compatible chat completions provider.
//!
//! Works against api.openai.com and any server that speaks the same
//! `/chat/completions` dialect (Azure, vLLM, llama.cpp, ...). JSON mode is
//! requested through `response_format` when the completion config asks for it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;

use super::{
    api_error, check_base_url, retry_after, send_error,
    factory::ProviderFactory,
    secrets::{ApiCredential, CredentialSource},
    ChatMessage, CompletionConfig, CompletionResponse, LlmProvider, ProviderError, TokenUsage,
};

/// Environment variable name for the OpenAI API key.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI chat completions provider.
pub struct OpenAiProvider {
    credential: ApiCredential,
    base_url: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("credential", &self.credential)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_credential(ApiCredential::new(
            api_key,
            CredentialSource::Programmatic,
            "OpenAI API key",
        ))
    }

    fn with_credential(credential: ApiCredential) -> Self {
        Self {
            credential,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Build from a provider config object.
    ///
    /// Reads `api_key` (falling back to `OPENAI_API_KEY`) and an optional
    /// `base_url`.
    pub fn from_config(config: &JsonValue) -> Result<Self, ProviderError> {
        let credential = ApiCredential::from_config_or_env(
            config,
            "api_key",
            OPENAI_API_KEY_ENV,
            "OpenAI API key",
        )?;

        let mut provider = Self::with_credential(credential);
        if let Some(url) = config["base_url"].as_str() {
            check_base_url(url)?;
            provider.base_url = url.trim_end_matches('/').to_string();
        }
        Ok(provider)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn build_request(&self, messages: Vec<ChatMessage>, config: &CompletionConfig) -> ChatRequest {
        ChatRequest {
            model: config.model.clone(),
            messages,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            response_format: config.json_response.then(|| ResponseFormat {
                type_: "json_object".to_string(),
            }),
        }
    }
}

/// Chat completions request body.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    type_: String,
}

/// Chat completions response body.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    model: String,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        config: &CompletionConfig,
    ) -> Result<CompletionResponse, ProviderError> {
        let request = self.build_request(messages, config);

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.credential.expose())
            .json(&request);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| send_error(e, config.timeout))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited {
                retry_after: retry_after(response.headers()),
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProviderError::AuthError);
        }

        if !status.is_success() {
            let message = response
                .json::<OpenAiError>()
                .await
                .ok()
                .map(|body| body.error.message);
            return Err(api_error(status, message));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ParseError("response contained no choices".to_string()))?;

        let usage = body
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            usage,
            model: body.model,
            stop_reason: choice.finish_reason,
        })
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// Factory for OpenAI providers.
///
/// ## Configuration Format
/// ```json
/// {
///   "api_key": "sk-...",                  // Optional, falls back to OPENAI_API_KEY env
///   "base_url": "https://api.openai.com/v1" // Optional, any compatible endpoint
/// }
/// ```
pub struct OpenAiProviderFactory;

impl ProviderFactory for OpenAiProviderFactory {
    fn provider_type(&self) -> &'static str {
        "openai"
    }

    fn create(&self, config: &JsonValue) -> Result<Arc<dyn LlmProvider>, ProviderError> {
        Ok(Arc::new(OpenAiProvider::from_config(config)?))
    }

    fn validate_config(&self, config: &JsonValue) -> Result<(), ProviderError> {
        if !ApiCredential::is_available(config, "api_key", OPENAI_API_KEY_ENV) {
            return Err(ProviderError::NotConfigured(format!(
                "OpenAI API key required: set 'api_key' in config or {} env",
                OPENAI_API_KEY_ENV
            )));
        }

        if let Some(url) = config["base_url"].as_str() {
            check_base_url(url)?;
        }

        Ok(())
    }

    fn default_config(&self) -> JsonValue {
        serde_json::json!({ "base_url": DEFAULT_BASE_URL })
    }

    fn description(&self) -> &'static str {
        "OpenAI-compatible chat completions with JSON mode"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_name() {
        assert_eq!(OpenAiProvider::new("sk-test").name(), "openai");
    }

    #[test]
    fn test_request_body_requests_json_mode() {
        let provider = OpenAiProvider::new("sk-test");
        let config = CompletionConfig::default();
        let request = provider.build_request(
            vec![ChatMessage::system("sys"), ChatMessage::user("q")],
            &config,
        );

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["response_format"]["type"], "json_object");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "q");
    }

    #[test]
    fn test_request_body_without_json_mode() {
        let provider = OpenAiProvider::new("sk-test");
        let config = CompletionConfig {
            json_response: false,
            ..Default::default()
        };
        let body = serde_json::to_value(provider.build_request(vec![], &config)).unwrap();
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn test_response_body_parses() {
        let raw = r#"{
            "id": "chatcmpl-1",
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "{\"final_answer\": \"yes\"}"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 90, "completion_tokens": 20, "total_tokens": 110}
        }"#;
        let body: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(body.choices[0].finish_reason.as_deref(), Some("stop"));
        assert_eq!(body.usage.unwrap().completion_tokens, 20);
    }

    #[test]
    fn test_from_config_custom_base_url() {
        let config = serde_json::json!({
            "api_key": "config-key",
            "base_url": "http://localhost:8000/v1/"
        });
        let provider = OpenAiProvider::from_config(&config).unwrap();
        assert_eq!(provider.base_url, "http://localhost:8000/v1");
        assert_eq!(provider.credential.source(), CredentialSource::Config);
    }

    #[test]
    fn test_from_config_rejects_bad_base_url() {
        let config = serde_json::json!({
            "api_key": "config-key",
            "base_url": "localhost:8000"
        });
        assert!(OpenAiProvider::from_config(&config).is_err());
    }

    #[test]
    fn test_api_key_not_in_debug_output() {
        let secret = "sk-openai-very-secret";
        let provider = OpenAiProvider::new(secret);
        let debug = format!("{:?}", provider);
        assert!(!debug.contains(secret));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_factory_metadata() {
        let factory = OpenAiProviderFactory;
        assert_eq!(factory.provider_type(), "openai");
        assert!(factory.description().contains("OpenAI"));
        assert_eq!(factory.default_config()["base_url"], DEFAULT_BASE_URL);
    }

    #[test]
    fn test_factory_create_with_api_key() {
        let provider = OpenAiProviderFactory
            .create(&serde_json::json!({ "api_key": "k" }))
            .unwrap();
        assert_eq!(provider.name(), "openai");
    }
}

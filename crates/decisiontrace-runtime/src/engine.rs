//! Decision engine: one model call in, one validated decision record out.
//!
//! # Execution Flow
//! 1. Reject an empty query
//! 2. Send the fixed system prompt and the raw query in a single request
//! 3. Parse the reply as a JSON object with the required keys
//! 4. Derive risk, assign id and timestamp, validate ([`DecisionRecord::create`])
//!
//! There are no retries and no caching. A malformed reply is a hard failure
//! for that query.

use std::sync::Arc;
use thiserror::Error;

use decisiontrace_core::{DecisionFields, DecisionRecord, ValidationError};

use crate::config::EngineConfig;
use crate::prompts::{DECISION_SYSTEM_PROMPT, REQUIRED_KEYS};
use crate::providers::{ChatMessage, LlmProvider, ProviderError};

/// The model reply was not usable structured data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamFormatError {
    #[error("Model response is not valid JSON: {0}")]
    NotJson(String),

    #[error("Model response is JSON {0}, expected an object")]
    NotObject(&'static str),

    #[error("Model response is missing required keys: {}", .0.join(", "))]
    MissingKeys(Vec<String>),
}

/// Errors from a single decision.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Query must not be empty")]
    EmptyQuery,

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("Model call failed: {0}")]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    UpstreamFormat(#[from] UpstreamFormatError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Turns a user query into a validated [`DecisionRecord`].
pub struct DecisionEngine {
    provider: Arc<dyn LlmProvider>,
    config: EngineConfig,
}

impl std::fmt::Debug for DecisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionEngine")
            .field("provider", &self.provider.name())
            .field("config", &self.config)
            .finish()
    }
}

impl DecisionEngine {
    /// Create an engine, validating `config` up front.
    pub fn new(provider: Arc<dyn LlmProvider>, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { provider, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Produce one decision for `user_prompt`.
    ///
    /// Makes exactly one provider call. Provider, format and validation
    /// failures are returned unchanged; nothing is retried.
    pub async fn generate(&self, user_prompt: &str) -> Result<DecisionRecord, EngineError> {
        if user_prompt.trim().is_empty() {
            return Err(EngineError::EmptyQuery);
        }

        let messages = vec![
            ChatMessage::system(DECISION_SYSTEM_PROMPT),
            ChatMessage::user(user_prompt),
        ];

        let response = self
            .provider
            .complete(messages, &self.config.completion_config())
            .await?;

        tracing::debug!(
            provider = self.provider.name(),
            model = %response.model,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            total_tokens = response.usage.total(),
            stop_reason = ?response.stop_reason,
            "Model responded"
        );

        let fields = parse_decision_fields(&response.content).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected model response");
        })?;

        let record = DecisionRecord::create(fields, &self.config.thresholds).inspect_err(|e| {
            tracing::warn!(error = %e, "Model response failed record validation");
        })?;

        tracing::info!(
            decision_id = %record.decision_id(),
            risk_level = %record.risk_level(),
            evidence_type = %record.evidence_type(),
            confidence = record.confidence(),
            "Decision generated"
        );

        Ok(record)
    }
}

/// Extract the model-supplied fields from a raw reply.
///
/// Unparseable JSON, a non-object, or a missing required key is an
/// [`UpstreamFormatError`]. Keys that are present but malformed (wrong type,
/// unknown evidence literal) are a [`ValidationError`]. Keys beyond the
/// required four, including any `risk_level` the model volunteers, are dropped.
pub fn parse_decision_fields(content: &str) -> Result<DecisionFields, EngineError> {
    let value: serde_json::Value = serde_json::from_str(content.trim())
        .map_err(|e| UpstreamFormatError::NotJson(e.to_string()))?;

    let mut object = match value {
        serde_json::Value::Object(map) => map,
        other => return Err(UpstreamFormatError::NotObject(json_kind(&other)).into()),
    };

    let missing: Vec<String> = REQUIRED_KEYS
        .iter()
        .filter(|key| !object.contains_key(**key))
        .map(|key| key.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(UpstreamFormatError::MissingKeys(missing).into());
    }

    if object.contains_key("risk_level") {
        tracing::debug!("Ignoring model-supplied risk_level");
    }

    let required: serde_json::Map<String, serde_json::Value> = REQUIRED_KEYS
        .iter()
        .filter_map(|key| object.remove_entry(*key))
        .collect();

    serde_json::from_value(serde_json::Value::Object(required))
        .map_err(|e| ValidationError::single(e.to_string()).into())
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

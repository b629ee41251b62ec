//! Engine configuration.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;

use decisiontrace_core::RiskThresholds;

use crate::engine::EngineError;
use crate::providers::CompletionConfig;

/// Everything the decision engine needs besides its provider.
///
/// Deserializes from YAML/JSON with every field optional; `timeout` takes a
/// human-readable duration such as `"30s"` or `"2m"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Model name passed to the provider
    pub model: String,

    /// Sampling temperature (0.0 for deterministic)
    pub temperature: f32,

    /// Maximum tokens per completion
    pub max_tokens: u32,

    /// Upper bound on the model call; `None` waits indefinitely
    #[serde(
        serialize_with = "serialize_timeout",
        deserialize_with = "deserialize_timeout"
    )]
    pub timeout: Option<Duration>,

    /// Confidence cut-offs for risk classification
    pub thresholds: RiskThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
            max_tokens: 1024,
            timeout: None,
            thresholds: RiskThresholds::default(),
        }
    }
}

impl EngineConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Reject settings the engine cannot honour.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.model.trim().is_empty() {
            return Err(EngineError::InvalidConfig("model must not be empty".to_string()));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(EngineError::InvalidConfig(format!(
                "temperature {} is outside [0, 2]",
                self.temperature
            )));
        }

        if self.max_tokens == 0 {
            return Err(EngineError::InvalidConfig(
                "max_tokens must be greater than zero".to_string(),
            ));
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(EngineError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }

        self.thresholds
            .check()
            .map_err(|e| EngineError::InvalidConfig(format!("thresholds: {}", e)))
    }

    /// The per-request settings handed to the provider.
    pub fn completion_config(&self) -> CompletionConfig {
        CompletionConfig {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            timeout: self.timeout,
            json_response: true,
        }
    }
}

fn serialize_timeout<S: Serializer>(timeout: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
    match timeout {
        Some(t) => serializer.serialize_some(&humantime::format_duration(*t).to_string()),
        None => serializer.serialize_none(),
    }
}

fn deserialize_timeout<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| humantime::parse_duration(&s).map_err(serde::de::Error::custom))
        .transpose()
}

//! Configuration file loading and command-line overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use decisiontrace_core::DEFAULT_LOG_FILE;
use decisiontrace_runtime::EngineConfig;

use crate::cli::Cli;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "decisiontrace.yaml";

/// CLI configuration.
///
/// ```yaml
/// provider: openai
/// provider_config:
///   base_url: https://api.openai.com/v1
/// model: gpt-4o-mini
/// timeout: 30s
/// log_file: decision_logs.jsonl
/// thresholds:
///   high_confidence: 0.75
///   medium_confidence: 0.5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Provider type registered in the provider registry
    pub provider: String,

    /// Provider-specific settings (api_key, base_url)
    pub provider_config: serde_json::Value,

    /// Append-only decision log
    pub log_file: PathBuf,

    /// Model, sampling and risk settings
    #[serde(flatten)]
    pub engine: EngineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            provider_config: serde_json::json!({}),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            engine: EngineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from `./decisiontrace.yaml` if it exists, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(fallback)
                } else {
                    tracing::debug!("No config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        tracing::debug!(path = %path.display(), provider = %config.provider, "Loaded config");
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: AppConfig = serde_yaml::from_str(yaml)?;
        if !config.provider_config.is_object() {
            anyhow::bail!("provider_config must be a mapping");
        }
        Ok(config)
    }

    /// Command-line flags win over file values.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(provider) = &cli.provider {
            self.provider = provider.clone();
        }
        if let Some(model) = &cli.model {
            self.engine.model = model.clone();
        }
        if let Some(log_file) = &cli.log_file {
            self.log_file = log_file.clone();
        }
        if let Some(timeout) = cli.timeout {
            self.engine.timeout = Some(timeout.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.provider, "openai");
        assert_eq!(config.log_file, PathBuf::from("decision_logs.jsonl"));
        assert_eq!(config.engine.model, "gpt-4o-mini");
    }

    #[test]
    fn test_from_yaml_full() {
        let yaml = r#"
provider: anthropic
provider_config:
  base_url: https://proxy.example.com/v1
model: claude-sonnet-4-5
temperature: 0.0
timeout: 45s
log_file: audit/decisions.jsonl
thresholds:
  high_confidence: 0.8
  medium_confidence: 0.6
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.provider, "anthropic");
        assert_eq!(config.provider_config["base_url"], "https://proxy.example.com/v1");
        assert_eq!(config.engine.model, "claude-sonnet-4-5");
        assert_eq!(config.engine.timeout, Some(Duration::from_secs(45)));
        assert_eq!(config.engine.thresholds.high_confidence, 0.8);
        assert_eq!(config.log_file, PathBuf::from("audit/decisions.jsonl"));
    }

    #[test]
    fn test_from_yaml_partial_keeps_defaults() {
        let config = AppConfig::from_yaml("model: gpt-4o\n").unwrap();
        assert_eq!(config.engine.model, "gpt-4o");
        assert_eq!(config.provider, "openai");
        assert_eq!(config.engine.thresholds.medium_confidence, 0.5);
    }

    #[test]
    fn test_provider_config_must_be_mapping() {
        assert!(AppConfig::from_yaml("provider_config: [1, 2]\n").is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(&path, "provider: anthropic\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.provider, "anthropic");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("nope.yaml"))).unwrap_err();
        assert!(err.to_string().contains("nope.yaml"));
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = AppConfig::from_yaml("model: gpt-4o\nlog_file: a.jsonl\n").unwrap();
        let cli = Cli::try_parse_from([
            "decisiontrace",
            "--model",
            "gpt-4o-mini",
            "--log-file",
            "b.jsonl",
            "--timeout",
            "10s",
        ])
        .unwrap();

        config.apply_cli(&cli);
        assert_eq!(config.engine.model, "gpt-4o-mini");
        assert_eq!(config.log_file, PathBuf::from("b.jsonl"));
        assert_eq!(config.engine.timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.provider, "openai");
    }
}

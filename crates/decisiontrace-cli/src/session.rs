//! One decision per input line: generate, then log.

use anyhow::{Context, Result};
use thiserror::Error;

use decisiontrace_core::{DecisionLog, DecisionRecord, LogError};
use decisiontrace_runtime::{DecisionEngine, EngineError, ProviderRegistry};

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Decision was made but could not be logged: {0}")]
    Log(#[from] LogError),
}

/// What a single input line produced.
#[derive(Debug)]
pub enum LineOutcome {
    /// The user asked to quit
    Exit,
    /// Blank line, nothing to do
    Skip,
    /// A validated record that is now in the log
    Decision(DecisionRecord),
}

/// True for `exit` in any letter case, ignoring surrounding whitespace.
pub fn is_exit_command(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("exit")
}

pub struct Session {
    engine: DecisionEngine,
    log: DecisionLog,
}

impl Session {
    pub fn new(engine: DecisionEngine, log: DecisionLog) -> Self {
        Self { engine, log }
    }

    /// Build the provider and engine described by `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let registry = ProviderRegistry::with_defaults();
        let provider = registry
            .create(&config.provider, &config.provider_config)
            .with_context(|| format!("Failed to set up provider '{}'", config.provider))?;
        let engine =
            DecisionEngine::new(provider, config.engine.clone()).context("Invalid engine config")?;

        Ok(Self::new(engine, DecisionLog::new(&config.log_file)))
    }

    pub fn log(&self) -> &DecisionLog {
        &self.log
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    /// Generate a record and append it to the log.
    ///
    /// Nothing is written unless the record passed validation.
    pub async fn decide(&self, query: &str) -> Result<DecisionRecord, SessionError> {
        let record = self.engine.generate(query).await?;
        self.log.append(&record)?;

        tracing::info!(
            decision_id = %record.decision_id(),
            risk_level = %record.risk_level(),
            log = %self.log.path().display(),
            "Decision logged"
        );
        Ok(record)
    }

    pub async fn handle_line(&self, line: &str) -> Result<LineOutcome, SessionError> {
        if is_exit_command(line) {
            return Ok(LineOutcome::Exit);
        }
        if line.trim().is_empty() {
            return Ok(LineOutcome::Skip);
        }
        self.decide(line).await.map(LineOutcome::Decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decisiontrace_core::{EvidenceType, RiskLevel};
    use decisiontrace_runtime::{EngineConfig, ProviderError, ScriptedProvider};
    use std::sync::Arc;
    use std::time::Duration;

    fn session(provider: Arc<ScriptedProvider>, dir: &tempfile::TempDir) -> Session {
        let engine = DecisionEngine::new(provider, EngineConfig::default()).unwrap();
        Session::new(engine, DecisionLog::new(dir.path().join("decision_logs.jsonl")))
    }

    const RETRIEVED: &str = r#"{"final_answer": "Renew", "assumptions": ["Usage is stable"], "evidence_type": "retrieved", "confidence": 0.9}"#;

    #[test]
    fn test_exit_is_case_insensitive() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("EXIT"));
        assert!(is_exit_command("  Exit \n"));
        assert!(!is_exit_command("exit now"));
        assert!(!is_exit_command("quit"));
    }

    #[tokio::test]
    async fn test_decision_is_logged() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(ScriptedProvider::new().with_reply(RETRIEVED));
        let session = session(provider, &dir);

        let outcome = session.handle_line("Should we renew?").await.unwrap();
        let record = match outcome {
            LineOutcome::Decision(record) => record,
            other => panic!("Expected decision, got {:?}", other),
        };
        assert_eq!(record.risk_level(), RiskLevel::Low);
        assert_eq!(record.evidence_type(), EvidenceType::Retrieved);

        let logged = session.log().read_all().unwrap();
        assert_eq!(logged, vec![record]);
    }

    #[tokio::test]
    async fn test_blank_and_exit_lines_do_not_call_provider() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(ScriptedProvider::new().with_reply(RETRIEVED));
        let session = session(provider.clone(), &dir);

        assert!(matches!(session.handle_line("   ").await.unwrap(), LineOutcome::Skip));
        assert!(matches!(session.handle_line("").await.unwrap(), LineOutcome::Skip));
        assert!(matches!(session.handle_line("Exit").await.unwrap(), LineOutcome::Exit));

        assert_eq!(provider.call_count(), 0);
        assert!(!session.log().path().exists());
    }

    #[tokio::test]
    async fn test_missing_confidence_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(ScriptedProvider::new().with_reply(
            r#"{"final_answer": "Renew", "assumptions": [], "evidence_type": "retrieved"}"#,
        ));
        let session = session(provider, &dir);

        let err = session.handle_line("Should we renew?").await.unwrap_err();
        assert!(matches!(err, SessionError::Engine(EngineError::UpstreamFormat(_))));
        assert!(session.log().read_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_confidence_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(ScriptedProvider::new().with_reply(
            r#"{"final_answer": "Renew", "assumptions": [], "evidence_type": "retrieved", "confidence": 1.5}"#,
        ));
        let session = session(provider, &dir);

        let err = session.decide("Should we renew?").await.unwrap_err();
        assert!(matches!(err, SessionError::Engine(EngineError::Validation(_))));
        assert!(session.log().read_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_session_continues_after_error() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(
            ScriptedProvider::new()
                .with_error(ProviderError::Timeout(Duration::from_secs(30)))
                .with_reply(RETRIEVED),
        );
        let session = session(provider, &dir);

        assert!(session.handle_line("first").await.is_err());
        assert!(matches!(
            session.handle_line("second").await.unwrap(),
            LineOutcome::Decision(_)
        ));
        assert_eq!(session.log().read_all().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_records_append_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(ScriptedProvider::new().with_reply(RETRIEVED).with_reply(
            r#"{"final_answer": "Wait", "assumptions": [], "evidence_type": "inferred", "confidence": 0.6}"#,
        ));
        let session = session(provider, &dir);

        let first = session.decide("one").await.unwrap();
        let second = session.decide("two").await.unwrap();

        let logged = session.log().read_all().unwrap();
        assert_eq!(logged, vec![first, second]);
        assert_eq!(logged[1].risk_level(), RiskLevel::Medium);
    }

    #[test]
    fn test_from_config_unknown_provider() {
        let config = AppConfig {
            provider: "nonexistent".to_string(),
            ..AppConfig::default()
        };
        assert!(Session::from_config(&config).is_err());
    }
}

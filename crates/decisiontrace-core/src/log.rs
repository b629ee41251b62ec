//! Append-only decision log in JSON Lines format.
//!
//! One UTF-8 line per record. The file is created on first append and is
//! never truncated or rewritten.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::record::DecisionRecord;

/// Default log file name, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "decision_logs.jsonl";

/// Errors from reading or writing the decision log.
#[derive(Error, Debug)]
pub enum LogError {
    #[error("Decision log I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize decision record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Malformed record on line {line} of {path}: {source}")]
    Malformed {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Handle to an append-only JSON Lines decision log.
#[derive(Debug, Clone)]
pub struct DecisionLog {
    path: PathBuf,
}

impl DecisionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single line.
    ///
    /// The line is serialized in full before the file is touched, so a
    /// serialization failure leaves the log unchanged.
    pub fn append(&self, record: &DecisionRecord) -> Result<(), LogError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        file.write_all(line.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| self.io_error(e))?;

        tracing::debug!(
            decision_id = %record.decision_id(),
            path = %self.path.display(),
            "Decision appended to log"
        );

        Ok(())
    }

    /// Read every record back, validating each line.
    ///
    /// A missing file is an empty log. Blank lines are skipped.
    pub fn read_all(&self) -> Result<Vec<DecisionRecord>, LogError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| self.io_error(e))?;
            if line.trim().is_empty() {
                continue;
            }

            let record = serde_json::from_str::<DecisionRecord>(&line).map_err(|source| {
                LogError::Malformed {
                    path: self.path.clone(),
                    line: index + 1,
                    source,
                }
            })?;
            records.push(record);
        }

        Ok(records)
    }

    /// The last `limit` records, oldest first.
    pub fn tail(&self, limit: usize) -> Result<Vec<DecisionRecord>, LogError> {
        let mut records = self.read_all()?;
        let skip = records.len().saturating_sub(limit);
        Ok(records.split_off(skip))
    }

    fn io_error(&self, source: std::io::Error) -> LogError {
        LogError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for DecisionLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DecisionFields;
    use crate::risk::RiskThresholds;
    use crate::types::EvidenceType;

    fn record(answer: &str, confidence: f64) -> DecisionRecord {
        DecisionRecord::create(
            DecisionFields {
                final_answer: answer.to_string(),
                assumptions: vec!["first".to_string(), "second".to_string()],
                evidence_type: EvidenceType::Retrieved,
                confidence,
            },
            &RiskThresholds::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_append_creates_file_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let log = DecisionLog::new(dir.path().join("decisions.jsonl"));

        let original = record("Approve", 0.9);
        log.append(&original).unwrap();

        let records = log.read_all().unwrap();
        assert_eq!(records, vec![original]);
    }

    #[test]
    fn test_append_never_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let log = DecisionLog::new(dir.path().join("decisions.jsonl"));

        let first = record("one", 0.9);
        let second = record("two", 0.4);
        log.append(&first).unwrap();
        log.append(&second).unwrap();

        let contents = fs::read_to_string(log.path()).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.ends_with('\n'));

        let records = log.read_all().unwrap();
        assert_eq!(records, vec![first, second]);
    }

    #[test]
    fn test_append_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let log = DecisionLog::new(dir.path().join("audit").join("2026").join("log.jsonl"));
        log.append(&record("nested", 0.8)).unwrap();
        assert_eq!(log.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = DecisionLog::new(dir.path().join("absent.jsonl"));
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let log = DecisionLog::new(dir.path().join("decisions.jsonl"));
        log.append(&record("good", 0.9)).unwrap();

        let mut file = OpenOptions::new().append(true).open(log.path()).unwrap();
        writeln!(file, r#"{{"final_answer": "partial"}}"#).unwrap();

        match log.read_all() {
            Err(LogError::Malformed { line, .. }) => assert_eq!(line, 2),
            other => panic!("Expected Malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_tail_returns_most_recent() {
        let dir = tempfile::tempdir().unwrap();
        let log = DecisionLog::new(dir.path().join("decisions.jsonl"));
        for answer in ["a", "b", "c"] {
            log.append(&record(answer, 0.8)).unwrap();
        }

        let tail = log.tail(2).unwrap();
        let answers: Vec<_> = tail.iter().map(|r| r.final_answer()).collect();
        assert_eq!(answers, vec!["b", "c"]);

        assert_eq!(log.tail(10).unwrap().len(), 3);
    }
}

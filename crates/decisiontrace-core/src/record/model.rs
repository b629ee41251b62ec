//! The decision record and its validated constructors.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

use super::schema::validate_record_schema;
use crate::risk::RiskThresholds;
use crate::types::{EvidenceType, RiskLevel};

/// A candidate field set violated the record schema.
///
/// Carries every violation found, not just the first.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Decision record failed validation: {}", .violations.join("; "))]
pub struct ValidationError {
    violations: Vec<String>,
}

impl ValidationError {
    pub fn new(violations: Vec<String>) -> Self {
        Self { violations }
    }

    pub fn single(violation: impl Into<String>) -> Self {
        Self {
            violations: vec![violation.into()],
        }
    }

    /// The individual violations, in discovery order.
    pub fn violations(&self) -> &[String] {
        &self.violations
    }
}

/// The four fields a model contributes to a decision.
///
/// Everything else on a [`DecisionRecord`] is derived or generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionFields {
    /// The final decision or answer
    pub final_answer: String,

    /// Key assumptions, in model output order
    pub assumptions: Vec<String>,

    /// Claimed source of the reasoning
    pub evidence_type: EvidenceType,

    /// Self-reported confidence, expected in [0, 1]
    pub confidence: f64,
}

/// An immutable, audited decision.
///
/// Construct one with [`DecisionRecord::create`] (fresh decision) or
/// [`DecisionRecord::from_candidate`] (already-assembled field set). Both
/// paths go through the record schema, as does deserialization, so a value of
/// this type is always valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct DecisionRecord {
    final_answer: String,
    assumptions: Vec<String>,
    evidence_type: EvidenceType,
    confidence: f64,
    risk_level: RiskLevel,
    decision_id: Uuid,
    #[serde(serialize_with = "serialize_timestamp")]
    timestamp: DateTime<Utc>,
}

/// Mirror of [`DecisionRecord`] used to deserialize a validated candidate.
#[derive(Deserialize)]
struct RecordParts {
    final_answer: String,
    assumptions: Vec<String>,
    evidence_type: EvidenceType,
    confidence: f64,
    risk_level: RiskLevel,
    decision_id: Uuid,
    timestamp: String,
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(ts))
}

/// RFC 3339 with a `Z` suffix and only as many fractional digits as needed.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl DecisionRecord {
    /// Assemble a new record from model-supplied fields.
    ///
    /// Derives `risk_level` with `thresholds`, assigns a fresh v4 id and the
    /// current UTC time, then validates the whole candidate.
    pub fn create(
        fields: DecisionFields,
        thresholds: &RiskThresholds,
    ) -> Result<Self, ValidationError> {
        let risk_level = thresholds.classify(fields.confidence, fields.evidence_type);
        Self::assemble(fields, risk_level, Uuid::new_v4(), Utc::now())
    }

    fn assemble(
        fields: DecisionFields,
        risk_level: RiskLevel,
        decision_id: Uuid,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        // json! turns NaN and infinity into null.
        if !fields.confidence.is_finite() {
            return Err(ValidationError::single(format!(
                "confidence {} is not a finite number",
                fields.confidence
            )));
        }

        let candidate = serde_json::json!({
            "final_answer": fields.final_answer,
            "assumptions": fields.assumptions,
            "evidence_type": fields.evidence_type,
            "confidence": fields.confidence,
            "risk_level": risk_level,
            "decision_id": decision_id,
            "timestamp": format_timestamp(&timestamp),
        });

        Self::from_candidate(candidate)
    }

    /// Build a record from a complete candidate field set.
    ///
    /// Fails with every schema violation if any required field is missing or
    /// out of range.
    pub fn from_candidate(candidate: serde_json::Value) -> Result<Self, ValidationError> {
        validate_record_schema(&candidate).map_err(ValidationError::new)?;

        let parts: RecordParts = serde_json::from_value(candidate)
            .map_err(|e| ValidationError::single(e.to_string()))?;

        let timestamp = DateTime::parse_from_rfc3339(&parts.timestamp)
            .map_err(|e| ValidationError::single(format!("timestamp: {}", e)))?
            .with_timezone(&Utc);

        Ok(Self {
            final_answer: parts.final_answer,
            assumptions: parts.assumptions,
            evidence_type: parts.evidence_type,
            confidence: parts.confidence,
            risk_level: parts.risk_level,
            decision_id: parts.decision_id,
            timestamp,
        })
    }

    pub fn final_answer(&self) -> &str {
        &self.final_answer
    }

    pub fn assumptions(&self) -> &[String] {
        &self.assumptions
    }

    pub fn evidence_type(&self) -> EvidenceType {
        self.evidence_type
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    pub fn decision_id(&self) -> Uuid {
        self.decision_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The timestamp exactly as it appears in the log.
    pub fn timestamp_rfc3339(&self) -> String {
        format_timestamp(&self.timestamp)
    }
}

impl TryFrom<serde_json::Value> for DecisionRecord {
    type Error = ValidationError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Self::from_candidate(value)
    }
}

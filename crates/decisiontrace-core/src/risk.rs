//! Risk classification: maps self-reported confidence and evidence type to a risk level.
//!
//! The rules are applied in order and the first match wins:
//! 1. Confidence below the medium threshold -> High, whatever the evidence
//! 2. Else inferred evidence -> Medium, however confident
//! 3. Else confidence at or above the high threshold -> Low
//! 4. Else -> Medium
//!
//! The classifier is a pure, total function. It never sees the model's
//! opinion of its own risk.

use serde::{Deserialize, Serialize};

use crate::record::ValidationError;
use crate::types::{EvidenceType, RiskLevel};

/// Confidence at or above which non-inferred evidence is Low risk.
pub const DEFAULT_HIGH_CONFIDENCE: f64 = 0.75;

/// Confidence below which every decision is High risk.
pub const DEFAULT_MEDIUM_CONFIDENCE: f64 = 0.5;

/// Confidence cut-offs used by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// At or above this, retrieved/prior evidence is Low risk
    pub high_confidence: f64,

    /// Below this, any evidence is High risk
    pub medium_confidence: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high_confidence: DEFAULT_HIGH_CONFIDENCE,
            medium_confidence: DEFAULT_MEDIUM_CONFIDENCE,
        }
    }
}

impl RiskThresholds {
    /// Classify a decision against these thresholds.
    ///
    /// A NaN confidence lands in High.
    pub fn classify(&self, confidence: f64, evidence_type: EvidenceType) -> RiskLevel {
        if confidence.is_nan() || confidence < self.medium_confidence {
            return RiskLevel::High;
        }

        if evidence_type == EvidenceType::Inferred {
            return RiskLevel::Medium;
        }

        if confidence >= self.high_confidence {
            return RiskLevel::Low;
        }

        RiskLevel::Medium
    }

    /// Ensure `0 <= medium_confidence <= high_confidence <= 1`.
    pub fn check(&self) -> Result<(), ValidationError> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);

        let mut violations = Vec::new();
        if !in_unit(self.medium_confidence) {
            violations.push(format!(
                "medium_confidence {} is outside [0, 1]",
                self.medium_confidence
            ));
        }
        if !in_unit(self.high_confidence) {
            violations.push(format!(
                "high_confidence {} is outside [0, 1]",
                self.high_confidence
            ));
        }
        if self.medium_confidence > self.high_confidence {
            violations.push(format!(
                "medium_confidence {} exceeds high_confidence {}",
                self.medium_confidence, self.high_confidence
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(violations))
        }
    }
}

/// Classify with the default thresholds (0.75 / 0.5).
pub fn classify(confidence: f64, evidence_type: EvidenceType) -> RiskLevel {
    RiskThresholds::default().classify(confidence, evidence_type)
}

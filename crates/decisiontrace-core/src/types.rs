//! Enumerations shared by the decision record, the risk classifier and the log.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The epistemic source the model claims for its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceType {
    /// Drawn from context supplied alongside the query
    Retrieved,
    /// Derived through the model's own reasoning
    Inferred,
    /// Taken from the model's trained knowledge
    Prior,
}

impl EvidenceType {
    /// All evidence types, in declaration order.
    pub const ALL: [EvidenceType; 3] = [
        EvidenceType::Retrieved,
        EvidenceType::Inferred,
        EvidenceType::Prior,
    ];

    /// The literal used on the wire and in the log.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceType::Retrieved => "retrieved",
            EvidenceType::Inferred => "inferred",
            EvidenceType::Prior => "prior",
        }
    }
}

impl fmt::Display for EvidenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the known enum literals.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl FromStr for EvidenceType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "retrieved" => Ok(EvidenceType::Retrieved),
            "inferred" => Ok(EvidenceType::Inferred),
            "prior" => Ok(EvidenceType::Prior),
            other => Err(UnknownVariant {
                kind: "evidence_type",
                value: other.to_string(),
                expected: "retrieved, inferred, prior",
            }),
        }
    }
}

/// Coarse auditing signal for how much human review a decision warrants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(RiskLevel::Low),
            "Medium" => Ok(RiskLevel::Medium),
            "High" => Ok(RiskLevel::High),
            other => Err(UnknownVariant {
                kind: "risk_level",
                value: other.to_string(),
                expected: "Low, Medium, High",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evidence_type_serializes_lowercase() {
        let json = serde_json::to_string(&EvidenceType::Retrieved).unwrap();
        assert_eq!(json, "\"retrieved\"");

        let parsed: EvidenceType = serde_json::from_str("\"prior\"").unwrap();
        assert_eq!(parsed, EvidenceType::Prior);
    }

    #[test]
    fn test_evidence_type_from_str_is_exact() {
        assert_eq!("inferred".parse::<EvidenceType>(), Ok(EvidenceType::Inferred));
        assert!("Inferred".parse::<EvidenceType>().is_err());
        assert!("guessed".parse::<EvidenceType>().is_err());
    }

    #[test]
    fn test_risk_level_serializes_capitalized() {
        let json = serde_json::to_string(&RiskLevel::Medium).unwrap();
        assert_eq!(json, "\"Medium\"");
        assert_eq!("High".parse::<RiskLevel>(), Ok(RiskLevel::High));
    }

    #[test]
    fn test_unknown_variant_message() {
        let err = "speculative".parse::<EvidenceType>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("evidence_type"));
        assert!(msg.contains("speculative"));
    }
}

//! # decisiontrace-core
//!
//! Deterministic half of DecisionTrace: the decision record, its schema,
//! the risk classifier and the append-only decision log.
//!
//! ## Key Guarantees
//!
//! 1. **Derived risk**: `risk_level` is always computed from confidence and
//!    evidence type, never taken from the model
//! 2. **Validated records**: a [`DecisionRecord`] cannot exist unless it
//!    passes the record schema
//! 3. **Append-only**: the log is only ever appended to
//! 4. **No network**: nothing in this crate talks to a model
//!
//! ## Example
//!
//! ```rust
//! use decisiontrace_core::{DecisionFields, DecisionRecord, EvidenceType, RiskLevel, RiskThresholds};
//!
//! let record = DecisionRecord::create(
//!     DecisionFields {
//!         final_answer: "Renew the contract".to_string(),
//!         assumptions: vec!["Pricing stays flat".to_string()],
//!         evidence_type: EvidenceType::Retrieved,
//!         confidence: 0.9,
//!     },
//!     &RiskThresholds::default(),
//! )?;
//!
//! assert_eq!(record.risk_level(), RiskLevel::Low);
//! # Ok::<(), decisiontrace_core::ValidationError>(())
//! ```

pub mod log;
pub mod record;
pub mod risk;
pub mod types;

// Re-export main types at crate root
pub use log::{DecisionLog, LogError, DEFAULT_LOG_FILE};
pub use record::{
    is_valid_record, validate_record_schema, DecisionFields, DecisionRecord, ValidationError,
};
pub use risk::{classify, RiskThresholds, DEFAULT_HIGH_CONFIDENCE, DEFAULT_MEDIUM_CONFIDENCE};
pub use types::{EvidenceType, RiskLevel, UnknownVariant};

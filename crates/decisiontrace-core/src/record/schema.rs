//! JSON Schema validation for decision records.
//!
//! Every record, whether freshly assembled from model output or read back
//! from the log, must validate against `schema/decision_record.schema.json`.

use std::sync::OnceLock;
use thiserror::Error;

/// Embedded record schema (loaded at compile time).
const RECORD_SCHEMA_JSON: &str = include_str!("../../schema/decision_record.schema.json");

/// Compiled JSON Schema validator (initialized once, reused).
static COMPILED_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

/// Errors from schema loading.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to load schema: {0}")]
    LoadError(String),
}

fn get_validator() -> Result<&'static jsonschema::Validator, SchemaError> {
    let result = COMPILED_SCHEMA.get_or_init(|| {
        let schema_value: serde_json::Value = serde_json::from_str(RECORD_SCHEMA_JSON)
            .map_err(|e| format!("Invalid schema JSON: {}", e))?;

        jsonschema::options()
            .build(&schema_value)
            .map_err(|e| format!("Failed to compile schema: {}", e))
    });

    result
        .as_ref()
        .map_err(|e| SchemaError::LoadError(e.clone()))
}

/// Validate a candidate record against the schema.
///
/// Returns every violation found, each formatted as `"<message> at <path>"`.
pub fn validate_record_schema(candidate: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = get_validator().map_err(|e| vec![e.to_string()])?;

    let errors: Vec<String> = validator
        .iter_errors(candidate)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Quick yes/no form of [`validate_record_schema`].
pub fn is_valid_record(candidate: &serde_json::Value) -> bool {
    get_validator()
        .map(|v| v.is_valid(candidate))
        .unwrap_or(false)
}

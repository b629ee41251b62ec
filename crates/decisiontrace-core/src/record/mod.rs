//! Decision records and their validation.
//!
//! A record is assembled from model output, checked against an embedded JSON
//! Schema, and only then handed out. Nothing partially valid escapes.

mod model;
mod schema;

pub use model::{DecisionFields, DecisionRecord, ValidationError};
pub use schema::{is_valid_record, validate_record_schema, SchemaError};

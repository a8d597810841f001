//! Error types for reading values out of source records.

use thiserror::Error;

/// Errors raised while interpreting a source record.
///
/// Missing keys are not errors: callers receive `Ok(None)` and skip the
/// record. Only values of the wrong shape end up here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A field held a value of an unexpected type.
    #[error("{table}: field '{field}' expected {expected}, found '{found}'")]
    FieldType {
        table: &'static str,
        field: String,
        expected: &'static str,
        found: String,
    },

    /// A period identifier could not be parsed.
    #[error("invalid period identifier '{0}' (expected YYYY-MM)")]
    InvalidPeriod(String),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

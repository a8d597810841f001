//! Error types for publishing.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The prior table does not have the combination columns.
    #[error("published table columns do not match: expected [{expected}], found [{found}]")]
    SchemaMismatch { expected: String, found: String },

    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),
}

pub type Result<T> = std::result::Result<T, PublishError>;

//! Error types for schedule ingestion.

use std::path::PathBuf;

use pbs_model::{Period, TableKind};
use thiserror::Error;

/// Errors that can occur while locating or reading schedule tables.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Snapshot root not found or not a directory.
    #[error("snapshot directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No snapshot exists for the requested period.
    #[error("no snapshot for period {period} under {root}")]
    SnapshotNotFound { period: Period, root: PathBuf },

    /// A snapshot lacks one of the required tables.
    #[error("snapshot {period} is missing table '{table}'")]
    TableNotFound { period: Period, table: TableKind },

    // === CSV Parsing Errors ===
    /// Failed to parse a CSV file.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// CSV file has no header row.
    #[error("CSV file has no header row: {path}")]
    NoHeader { path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::TableNotFound {
            period: Period::new(2024, 5).expect("valid period"),
            table: TableKind::ItemRestrictions,
        };
        assert_eq!(
            err.to_string(),
            "snapshot 2024-05 is missing table 'item-restriction-relationships'"
        );
    }
}

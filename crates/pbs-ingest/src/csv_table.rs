//! CSV table reading.

use std::path::Path;

use csv::ReaderBuilder;
use pbs_model::{FieldValue, Record, Table, TableKind};
use tracing::debug;

use crate::error::{IngestError, Result};

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// Reads a headed CSV file into records.
///
/// Cells are trimmed, empty cells and `null` become [`FieldValue::Null`],
/// blank rows are dropped, and short rows are padded with nulls.
pub fn read_csv_records(path: &Path) -> Result<Vec<Record>> {
    let csv_error = |source| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::NoHeader {
            path: path.to_path_buf(),
        });
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_error)?;
        let values: Vec<FieldValue> = row.iter().map(FieldValue::from_cell).collect();
        if values.iter().all(FieldValue::is_null) {
            continue;
        }
        let mut record = Record::new();
        for (idx, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let value = values.get(idx).cloned().unwrap_or_default();
            record.insert(header.clone(), value);
        }
        records.push(record);
    }
    debug!(path = %path.display(), rows = records.len(), "read csv table");
    Ok(records)
}

/// Reads `path` as a table of the given kind.
pub fn read_table(path: &Path, kind: TableKind) -> Result<Table> {
    Ok(Table::new(kind, read_csv_records(path)?))
}

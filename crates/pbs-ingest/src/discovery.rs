//! Snapshot and table file discovery.
//!
//! A snapshot store holds one directory per period (`2024-05/`), each with
//! the schedule tables as CSV files, either at the top level or under
//! `tables_as_csv/` as in the published archive.

use std::path::{Path, PathBuf};

use pbs_model::{Period, TableKind};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Sub-directory used by the published CSV archive.
pub const ARCHIVE_TABLE_DIR: &str = "tables_as_csv";

/// Lists snapshot directories under `root`, oldest first.
///
/// Directories whose name is not a `YYYY-MM` period are ignored.
pub fn list_snapshots(root: &Path) -> Result<Vec<(Period, PathBuf)>> {
    if !root.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }
    let entries = std::fs::read_dir(root).map_err(|e| IngestError::DirectoryRead {
        path: root.to_path_buf(),
        source: e,
    })?;

    let mut snapshots = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: root.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(period) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.parse::<Period>().ok())
        else {
            debug!(path = %path.display(), "skipping non-period directory");
            continue;
        };
        snapshots.push((period, path));
    }
    snapshots.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(snapshots)
}

/// Lists CSV files in a directory, sorted by file name.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// True when a file stem names `kind`, ignoring case and `-`/`_` spelling.
pub fn matches_table(stem: &str, kind: TableKind) -> bool {
    let normalized = stem.trim().to_ascii_lowercase().replace('_', "-");
    normalized == kind.file_stem()
}

/// Finds the CSV file for `kind` inside a snapshot directory.
pub fn find_table_file(snapshot_dir: &Path, kind: TableKind) -> Result<Option<PathBuf>> {
    let archive_dir = snapshot_dir.join(ARCHIVE_TABLE_DIR);
    let mut dirs = vec![snapshot_dir.to_path_buf()];
    if archive_dir.is_dir() {
        dirs.push(archive_dir);
    }
    for dir in dirs {
        for path in list_csv_files(&dir)? {
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            if matches_table(stem, kind) {
                return Ok(Some(path));
            }
        }
    }
    Ok(None)
}

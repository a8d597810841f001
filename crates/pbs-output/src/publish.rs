//! Period-deduplicated append to the published combinations table.

use std::collections::BTreeSet;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use pbs_model::{COMBINATION_COLUMNS, CombinationRow};
use polars::prelude::{
    CsvReadOptions, CsvWriter, DataFrame, DataType, PlSmallStr, SerReader, SerWriter,
};
use tracing::{info, info_span, warn};

use crate::error::{PublishError, Result};
use crate::frame::{combination_frame, stringify_frame};

/// Column holding the period identifier of each published row.
pub const PERIOD_COLUMN: &str = "schedule_code";

/// What a publish call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// No rows were produced for the period.
    NothingToPublish,
    /// The prior table already carries the period; nothing was appended.
    AlreadyPublished { existing_rows: usize },
    Appended {
        existing_rows: usize,
        appended_rows: usize,
    },
}

impl PublishOutcome {
    pub fn appended_rows(self) -> usize {
        match self {
            Self::Appended { appended_rows, .. } => appended_rows,
            Self::NothingToPublish | Self::AlreadyPublished { .. } => 0,
        }
    }
}

/// True when `df` has a row tagged with `period_id`.
pub fn contains_period(df: &DataFrame, period_id: &str) -> Result<bool> {
    let Ok(column) = df.column(PERIOD_COLUMN) else {
        return Ok(false);
    };
    let column = column.cast(&DataType::String)?;
    Ok(column.str()?.into_iter().flatten().any(|code| code == period_id))
}

fn check_columns(existing: &DataFrame) -> Result<()> {
    let names: Vec<&str> = existing
        .get_column_names()
        .into_iter()
        .map(PlSmallStr::as_str)
        .collect();
    let found: BTreeSet<&str> = names.iter().copied().collect();
    let expected: BTreeSet<&str> = COMBINATION_COLUMNS.iter().copied().collect();
    if found != expected {
        return Err(PublishError::SchemaMismatch {
            expected: COMBINATION_COLUMNS.join(", "),
            found: names.join(", "),
        });
    }
    Ok(())
}

/// Appends `rows` to `existing` unless the period was already published.
///
/// Returns the outcome and, when rows were appended, the combined table.
/// A table already carrying `period_id` is left alone whatever its columns.
/// Otherwise existing rows keep their order ahead of the new rows, and new
/// rows are cast to the existing table's column types and column order.
pub fn append_combinations(
    existing: Option<DataFrame>,
    rows: &[CombinationRow],
    period_id: &str,
) -> Result<(PublishOutcome, Option<DataFrame>)> {
    if rows.is_empty() {
        return Ok((PublishOutcome::NothingToPublish, None));
    }
    let new_rows = combination_frame(rows)?;
    let Some(mut existing) = existing else {
        let outcome = PublishOutcome::Appended {
            existing_rows: 0,
            appended_rows: new_rows.height(),
        };
        return Ok((outcome, Some(new_rows)));
    };

    let existing_rows = existing.height();
    if contains_period(&existing, period_id)? {
        return Ok((PublishOutcome::AlreadyPublished { existing_rows }, None));
    }
    check_columns(&existing)?;

    let order: Vec<PlSmallStr> = existing.get_column_names().into_iter().cloned().collect();
    let mut aligned = new_rows.select(order)?;
    let mut cast_columns = Vec::with_capacity(aligned.width());
    for (column, target) in aligned.get_columns().iter().zip(existing.get_columns()) {
        cast_columns.push(column.cast(target.dtype())?);
    }
    aligned = DataFrame::new(cast_columns)?;
    existing.vstack_mut(&aligned)?;

    let outcome = PublishOutcome::Appended {
        existing_rows,
        appended_rows: aligned.height(),
    };
    Ok((outcome, Some(existing)))
}

/// Reads a previously published table with every column as text.
///
/// A missing or zero-length file means nothing has been published yet.
pub fn read_published(path: &Path) -> Result<Option<DataFrame>> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(error) => {
            return Err(PublishError::Io {
                path: path.to_path_buf(),
                source: error,
            });
        }
    };
    if metadata.len() == 0 {
        return Ok(None);
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(Some(df))
}

fn write_csv(path: &Path, df: &mut DataFrame) -> Result<()> {
    let io_error = |source| PublishError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    let staging = staging_path(path);
    let mut file = File::create(&staging).map_err(io_error)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    drop(file);
    std::fs::rename(&staging, path).map_err(io_error)?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Publishes `rows` for `period_id` to the CSV table at `path`.
///
/// The file is only rewritten when rows are appended.
pub fn publish(path: &Path, rows: &[CombinationRow], period_id: &str) -> Result<PublishOutcome> {
    let span = info_span!("publish", path = %path.display(), period = %period_id);
    let _guard = span.enter();

    if rows.is_empty() {
        warn!("no combinations to publish");
        return Ok(PublishOutcome::NothingToPublish);
    }
    let existing = read_published(path)?;
    let (outcome, combined) = append_combinations(existing, rows, period_id)?;
    match (outcome, combined) {
        (PublishOutcome::Appended { .. }, Some(combined)) => {
            let mut combined = stringify_frame(&combined)?;
            write_csv(path, &mut combined)?;
            info!(?outcome, "combinations published");
        }
        (PublishOutcome::AlreadyPublished { existing_rows }, _) => {
            warn!(existing_rows, "period already published, skipping");
        }
        _ => {}
    }
    Ok(outcome)
}

/// A destination for combination rows.
pub trait Publisher {
    fn publish(&self, rows: &[CombinationRow], period_id: &str) -> Result<PublishOutcome>;
}

/// Publishes to a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvPublisher {
    path: PathBuf,
}

impl CsvPublisher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Publisher for CsvPublisher {
    fn publish(&self, rows: &[CombinationRow], period_id: &str) -> Result<PublishOutcome> {
        publish(&self.path, rows, period_id)
    }
}

/// Reports what would be published without writing anything.
#[derive(Debug, Clone)]
pub struct DryRunPublisher {
    path: PathBuf,
}

impl DryRunPublisher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Publisher for DryRunPublisher {
    fn publish(&self, rows: &[CombinationRow], period_id: &str) -> Result<PublishOutcome> {
        let existing = read_published(&self.path)?;
        let (outcome, _) = append_combinations(existing, rows, period_id)?;
        info!(path = %self.path.display(), ?outcome, "dry run, nothing written");
        Ok(outcome)
    }
}

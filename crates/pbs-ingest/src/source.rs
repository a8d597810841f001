//! Table sources: where schedule tables come from.

use std::path::{Path, PathBuf};

use pbs_model::{Period, SourceTables, Table, TableKind};
use tracing::{debug, info};

use crate::csv_table::read_table;
use crate::discovery::{find_table_file, list_snapshots};
use crate::error::{IngestError, Result};

/// Supplies schedule tables scoped to a publication period.
pub trait TableSource {
    /// Periods with a snapshot available, oldest first.
    fn periods(&self) -> Result<Vec<Period>>;

    /// Loads one table from the snapshot for `period`.
    fn load(&self, kind: TableKind, period: Period) -> Result<Table>;
}

/// Loads every table the pipeline needs from `source`.
pub fn load_all(source: &dyn TableSource, period: Period) -> Result<SourceTables> {
    let mut tables = SourceTables::default();
    for kind in TableKind::ALL {
        let table = source.load(kind, period)?;
        debug!(table = %kind, rows = table.len(), "table loaded");
        tables.set(table);
    }
    info!(
        period = %period,
        items = tables.items.len(),
        restrictions = tables.restrictions.len(),
        indications = tables.indications.len(),
        "schedule tables loaded"
    );
    Ok(tables)
}

/// A directory of `YYYY-MM` snapshot folders holding CSV tables.
#[derive(Debug, Clone)]
pub struct CsvSnapshotSource {
    root: PathBuf,
}

impl CsvSnapshotSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn snapshot_dir(&self, period: Period) -> Result<PathBuf> {
        list_snapshots(&self.root)?
            .into_iter()
            .find(|(candidate, _)| *candidate == period)
            .map(|(_, path)| path)
            .ok_or_else(|| IngestError::SnapshotNotFound {
                period,
                root: self.root.clone(),
            })
    }
}

impl TableSource for CsvSnapshotSource {
    fn periods(&self) -> Result<Vec<Period>> {
        Ok(list_snapshots(&self.root)?
            .into_iter()
            .map(|(period, _)| period)
            .collect())
    }

    fn load(&self, kind: TableKind, period: Period) -> Result<Table> {
        let dir = self.snapshot_dir(period)?;
        let path = find_table_file(&dir, kind)?
            .ok_or(IngestError::TableNotFound { period, table: kind })?;
        read_table(&path, kind)
    }
}

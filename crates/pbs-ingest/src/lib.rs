//! PBS schedule ingestion: snapshot discovery, period resolution, and CSV
//! table loading.

pub mod csv_table;
pub mod discovery;
pub mod error;
pub mod period;
pub mod source;

pub use csv_table::{read_csv_records, read_table};
pub use discovery::{ARCHIVE_TABLE_DIR, find_table_file, list_csv_files, list_snapshots, matches_table};
pub use error::{IngestError, Result};
pub use period::resolve_period;
pub use source::{CsvSnapshotSource, TableSource, load_all};

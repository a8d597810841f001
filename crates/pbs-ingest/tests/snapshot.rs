//! Tests for loading schedule tables from a snapshot store.

use std::fs;
use std::path::Path;

use pbs_ingest::{CsvSnapshotSource, IngestError, TableSource, load_all};
use pbs_model::{Period, TableKind};

fn write_tables(dir: &Path, skip: Option<TableKind>) {
    fs::create_dir_all(dir).expect("create snapshot dir");
    for kind in TableKind::ALL {
        if Some(kind) == skip {
            continue;
        }
        let contents = match kind {
            TableKind::Items => "pbs_code,drug_name,brand_name\n1001A,adalimumab,Humira\n",
            TableKind::Restrictions => "res_code,authority_method\nR1,STREAMLINED\n",
            _ => "id\n1\n",
        };
        fs::write(dir.join(format!("{}.csv", kind.file_stem())), contents)
            .expect("write table");
    }
}

fn period(raw: &str) -> Period {
    raw.parse().expect("valid period")
}

#[test]
fn lists_periods_and_ignores_other_entries() {
    let root = tempfile::tempdir().expect("temp dir");
    write_tables(&root.path().join("2024-05"), None);
    write_tables(&root.path().join("2024-04"), None);
    fs::create_dir_all(root.path().join("scratch")).expect("create dir");
    fs::write(root.path().join("2024-06"), "not a directory").expect("write file");

    let source = CsvSnapshotSource::new(root.path());
    let periods = source.periods().expect("list periods");
    assert_eq!(periods, vec![period("2024-04"), period("2024-05")]);
}

#[test]
fn loads_all_tables_from_archive_layout() {
    let root = tempfile::tempdir().expect("temp dir");
    write_tables(&root.path().join("2024-05").join("tables_as_csv"), None);

    let source = CsvSnapshotSource::new(root.path());
    let tables = load_all(&source, period("2024-05")).expect("load tables");
    assert_eq!(tables.items.len(), 1);
    assert_eq!(tables.items[0].key("brand_name").as_deref(), Some("Humira"));
    assert_eq!(tables.restrictions[0].key("res_code").as_deref(), Some("R1"));
    assert_eq!(tables.restriction_prescribing_texts.len(), 1);
}

#[test]
fn missing_table_is_reported() {
    let root = tempfile::tempdir().expect("temp dir");
    write_tables(&root.path().join("2024-05"), Some(TableKind::Indications));

    let source = CsvSnapshotSource::new(root.path());
    let err = load_all(&source, period("2024-05")).expect_err("indications missing");
    assert!(matches!(
        err,
        IngestError::TableNotFound {
            table: TableKind::Indications,
            ..
        }
    ));
}

#[test]
fn missing_snapshot_is_reported() {
    let root = tempfile::tempdir().expect("temp dir");
    write_tables(&root.path().join("2024-05"), None);

    let source = CsvSnapshotSource::new(root.path());
    let err = source
        .load(TableKind::Items, period("2023-01"))
        .expect_err("no such snapshot");
    assert!(matches!(err, IngestError::SnapshotNotFound { .. }));
}

#[test]
fn missing_root_is_reported() {
    let root = tempfile::tempdir().expect("temp dir");
    let source = CsvSnapshotSource::new(root.path().join("absent"));
    assert!(matches!(
        source.periods(),
        Err(IngestError::DirectoryNotFound { .. })
    ));
}

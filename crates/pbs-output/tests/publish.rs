//! Publishing against CSV tables on disk.

use std::fs;
use std::path::Path;

use pbs_model::{COMBINATION_COLUMNS, CombinationRow, HospitalType};
use pbs_output::{
    CsvPublisher, DryRunPublisher, PublishError, PublishOutcome, Publisher, append_combinations,
    publish, read_published,
};
use tempfile::TempDir;

fn row(brand: &str, period: &str) -> CombinationRow {
    CombinationRow {
        pbs_code: "1001A".to_string(),
        drug: "adalimumab".to_string(),
        brand: brand.to_string(),
        formulation: "Injection 40 mg in 0.4 mL pre-filled pen".to_string(),
        indication: "rheumatoid arthritis".to_string(),
        treatment_phase: "Initial treatment".to_string(),
        streamlined_code: Some("4321".to_string()),
        online_application: true,
        authority_method: "STREAMLINED".to_string(),
        hospital_type: HospitalType::Private,
        maximum_prescribable_pack: Some(2),
        maximum_quantity_units: None,
        number_of_repeats: Some(5),
        schedule_code: period.to_string(),
        schedule_year: 2024,
        schedule_month: "MAY".to_string(),
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_first_publish_creates_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join("combinations.csv");

    let outcome = publish(&path, &[row("Humira", "2024-05"), row("Amgevita", "2024-05")], "2024-05")
        .unwrap();

    assert_eq!(
        outcome,
        PublishOutcome::Appended {
            existing_rows: 0,
            appended_rows: 2
        }
    );
    let lines = read_lines(&path);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], COMBINATION_COLUMNS.join(","));
    assert!(lines[1].starts_with("1001A,adalimumab,Humira,"));
    assert!(lines[1].contains(",true,STREAMLINED,Private,2,,5,2024-05,2024,MAY"));
}

#[test]
fn test_republishing_period_leaves_table_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("combinations.csv");
    publish(&path, &[row("Humira", "2024-05")], "2024-05").unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let outcome = publish(&path, &[row("Amgevita", "2024-05")], "2024-05").unwrap();

    assert_eq!(outcome, PublishOutcome::AlreadyPublished { existing_rows: 1 });
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_new_period_appends_after_existing_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("combinations.csv");
    publish(&path, &[row("Humira", "2024-05")], "2024-05").unwrap();

    let outcome = publish(&path, &[row("Amgevita", "2024-06"), row("Hadlima", "2024-06")], "2024-06")
        .unwrap();

    assert_eq!(
        outcome,
        PublishOutcome::Appended {
            existing_rows: 1,
            appended_rows: 2
        }
    );
    let lines = read_lines(&path);
    assert_eq!(lines.len(), 4);
    assert!(lines[1].contains("Humira"));
    assert!(lines[2].contains("Amgevita"));
    assert!(lines[3].contains("Hadlima"));
}

#[test]
fn test_empty_rows_do_not_touch_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("combinations.csv");

    assert_eq!(
        publish(&path, &[], "2024-05").unwrap(),
        PublishOutcome::NothingToPublish
    );
    assert!(!path.exists());
}

#[test]
fn test_zero_length_file_is_empty_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("combinations.csv");
    fs::write(&path, "").unwrap();

    assert!(read_published(&path).unwrap().is_none());
    let outcome = publish(&path, &[row("Humira", "2024-05")], "2024-05").unwrap();
    assert_eq!(outcome.appended_rows(), 1);
}

#[test]
fn test_prior_table_in_other_column_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("combinations.csv");
    let mut columns: Vec<&str> = COMBINATION_COLUMNS.to_vec();
    columns.reverse();
    fs::write(&path, format!("{}\n", columns.join(","))).unwrap();

    publish(&path, &[row("Humira", "2024-05")], "2024-05").unwrap();

    let lines = read_lines(&path);
    assert_eq!(lines[0], columns.join(","));
    assert!(lines[1].starts_with("MAY,2024,2024-05,5,,2,Private,STREAMLINED,true,4321,"));
}

#[test]
fn test_schema_mismatch_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("combinations.csv");
    fs::write(&path, "pbs_code,drug\n1001A,adalimumab\n").unwrap();

    let err = publish(&path, &[row("Humira", "2024-05")], "2024-05").unwrap_err();
    assert!(matches!(err, PublishError::SchemaMismatch { .. }));
}

#[test]
fn test_append_combinations_without_prior_table() {
    let (outcome, combined) =
        append_combinations(None, &[row("Humira", "2024-05")], "2024-05").unwrap();
    assert_eq!(outcome.appended_rows(), 1);
    assert_eq!(combined.unwrap().height(), 1);
}

#[test]
fn test_dry_run_publisher_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("combinations.csv");
    let publisher = DryRunPublisher::new(&path);

    let outcome = publisher.publish(&[row("Humira", "2024-05")], "2024-05").unwrap();

    assert_eq!(outcome.appended_rows(), 1);
    assert!(!path.exists());
}

#[test]
fn test_csv_publisher_delegates() {
    let dir = TempDir::new().unwrap();
    let publisher = CsvPublisher::new(dir.path().join("combinations.csv"));
    publisher.publish(&[row("Humira", "2024-05")], "2024-05").unwrap();
    assert!(publisher.path().exists());
}

#[test]
fn test_published_period_is_skipped_before_column_check() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("combinations.csv");
    publish(&path, &[row("Humira", "2024-05")], "2024-05").unwrap();
    let lines = read_lines(&path);
    let widened = format!("{},notes\n{},checked\n", lines[0], lines[1]);
    fs::write(&path, &widened).unwrap();

    let outcome = publish(&path, &[row("Amgevita", "2024-05")], "2024-05").unwrap();

    assert_eq!(outcome, PublishOutcome::AlreadyPublished { existing_rows: 1 });
    assert_eq!(fs::read_to_string(&path).unwrap(), widened);

    let err = publish(&path, &[row("Amgevita", "2024-06")], "2024-06").unwrap_err();
    assert!(matches!(err, PublishError::SchemaMismatch { .. }));
}

#[test]
fn test_unreadable_location_is_an_error() {
    let dir = TempDir::new().unwrap();
    let not_a_dir = dir.path().join("plain-file");
    fs::write(&not_a_dir, "x").unwrap();

    let err = read_published(&not_a_dir.join("combinations.csv")).unwrap_err();
    assert!(matches!(err, PublishError::Io { .. }));
}

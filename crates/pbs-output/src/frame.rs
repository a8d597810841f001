//! Combination rows as a Polars DataFrame.

use pbs_model::{COMBINATION_COLUMNS, CombinationRow};
use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, PolarsResult, Series};

fn string_column<F>(name: &str, rows: &[CombinationRow], value: F) -> Column
where
    F: Fn(&CombinationRow) -> &str,
{
    let values: Vec<String> = rows.iter().map(|row| value(row).to_string()).collect();
    Series::new(name.into(), values).into_column()
}

fn int_column<F>(name: &str, rows: &[CombinationRow], value: F) -> Column
where
    F: Fn(&CombinationRow) -> Option<i64>,
{
    let values: Vec<Option<i64>> = rows.iter().map(value).collect();
    Series::new(name.into(), values).into_column()
}

/// Builds a typed frame with one row per combination, in published column order.
pub fn combination_frame(rows: &[CombinationRow]) -> PolarsResult<DataFrame> {
    let streamlined: Vec<Option<String>> =
        rows.iter().map(|row| row.streamlined_code.clone()).collect();
    let online: Vec<bool> = rows.iter().map(|row| row.online_application).collect();
    let columns = vec![
        string_column("pbs_code", rows, |r| &r.pbs_code),
        string_column("drug", rows, |r| &r.drug),
        string_column("brand", rows, |r| &r.brand),
        string_column("formulation", rows, |r| &r.formulation),
        string_column("indication", rows, |r| &r.indication),
        string_column("treatment_phase", rows, |r| &r.treatment_phase),
        Series::new("streamlined_code".into(), streamlined).into_column(),
        Series::new("online_application".into(), online).into_column(),
        string_column("authority_method", rows, |r| &r.authority_method),
        string_column("hospital_type", rows, |r| r.hospital_type.as_str()),
        int_column("maximum_prescribable_pack", rows, |r| r.maximum_prescribable_pack),
        int_column("maximum_quantity_units", rows, |r| r.maximum_quantity_units),
        int_column("number_of_repeats", rows, |r| r.number_of_repeats),
        string_column("schedule_code", rows, |r| &r.schedule_code),
        int_column("schedule_year", rows, |r| Some(i64::from(r.schedule_year))),
        string_column("schedule_month", rows, |r| &r.schedule_month),
    ];
    debug_assert_eq!(columns.len(), COMBINATION_COLUMNS.len());
    DataFrame::new(columns)
}

/// Casts every column to `String`, the representation used for the published table.
pub fn stringify_frame(df: &DataFrame) -> PolarsResult<DataFrame> {
    let columns = df
        .get_columns()
        .iter()
        .map(|column| column.cast(&DataType::String))
        .collect::<PolarsResult<Vec<Column>>>()?;
    DataFrame::new(columns)
}

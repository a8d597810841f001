use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use pbs_core::PipelineStats;
use pbs_output::PublishOutcome;
use pbs_cli::types::{PeriodsResult, RunResult};

pub fn print_summary(result: &RunResult) {
    println!(
        "Schedule: {} ({} {})",
        result.schedule.code, result.schedule.month, result.schedule.year
    );
    println!("Output: {}", result.output.display());
    println!("{}", stage_table(&result.stats));
    println!("{}", outcome_line(result.outcome, result.dry_run));
}

pub fn print_periods(result: &PeriodsResult) {
    println!("Snapshots: {}", result.root.display());
    if result.periods.is_empty() {
        println!("No snapshot periods found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Period"), header_cell("Month"), header_cell("Selected")]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for period in result.periods.iter().rev() {
        let selected = result.selected == Some(*period);
        let period_cell = if selected {
            Cell::new(period)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(period)
        };
        table.add_row(vec![
            period_cell,
            Cell::new(period.month_name()),
            if selected {
                Cell::new("*").fg(Color::Green)
            } else {
                dim_cell("-")
            },
        ]);
    }
    println!("{table}");
}

fn stage_table(stats: &PipelineStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Count"), header_cell("Skipped")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    let index = &stats.index;
    let resolve = &stats.resolve;
    let rows: [(&str, usize, Option<usize>); 10] = [
        ("Prescribing texts", index.prescribing_texts, None),
        ("Restrictions", index.restrictions, None),
        ("Indications", index.indications, None),
        ("Restriction text links", index.restriction_prescribing_text_links, None),
        ("Item text links", index.item_prescribing_text_links, None),
        ("Unkeyed records", index.skipped_total(), None),
        ("Items scanned", resolve.items_scanned, Some(resolve.items_skipped)),
        ("Items matched", resolve.items_matched, None),
        (
            "Restrictions matched",
            resolve.restrictions_matched,
            Some(resolve.unresolved_restrictions),
        ),
        ("Drug codes kept", stats.aggregates, Some(resolve.aggregates_discarded)),
    ];
    for (label, count, skipped) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(count), count_cell(skipped)]);
    }
    table.add_row(vec![
        Cell::new("Combinations")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    table
}

fn outcome_line(outcome: Option<PublishOutcome>, dry_run: bool) -> String {
    let prefix = if dry_run { "Dry run: " } else { "" };
    match outcome {
        None => "Publishing skipped.".to_string(),
        Some(PublishOutcome::NothingToPublish) => format!("{prefix}nothing to publish."),
        Some(PublishOutcome::AlreadyPublished { existing_rows }) => format!(
            "{prefix}period already published ({existing_rows} existing rows), nothing appended."
        ),
        Some(PublishOutcome::Appended {
            existing_rows,
            appended_rows,
        }) if dry_run => format!(
            "{prefix}would append {appended_rows} rows after {existing_rows} existing rows."
        ),
        Some(PublishOutcome::Appended {
            existing_rows,
            appended_rows,
        }) => format!("Appended {appended_rows} rows after {existing_rows} existing rows."),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: Option<usize>) -> Cell {
    match count {
        Some(0) | None => dim_cell("-"),
        Some(value) => Cell::new(value).fg(Color::Yellow),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

//! End-to-end composition of the index, resolve, and flatten stages.

use pbs_model::{CombinationRow, DrugAggregate, Result, ScheduleTag, SourceTables};
use tracing::{info, info_span, warn};

use crate::filters::DomainFilters;
use crate::flatten::flatten;
use crate::index::{IndexStats, resolve_indexes};
use crate::resolve::{ResolveStats, build_aggregates};

/// Diagnostics for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub index: IndexStats,
    pub resolve: ResolveStats,
    pub aggregates: usize,
    pub rows: usize,
}

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub schedule: ScheduleTag,
    pub aggregates: Vec<DrugAggregate>,
    pub rows: Vec<CombinationRow>,
    pub stats: PipelineStats,
}

impl PipelineOutput {
    /// True when no combination survived filtering.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Runs index building, resolution, and flattening over materialized tables.
pub fn run_pipeline(
    tables: &SourceTables,
    filters: &DomainFilters,
    schedule: &ScheduleTag,
) -> Result<PipelineOutput> {
    let span = info_span!("pipeline", schedule_code = %schedule.code);
    let _guard = span.enter();

    let (indexes, index_stats) = resolve_indexes(
        &tables.prescribing_texts,
        &tables.restrictions,
        &tables.indications,
        &tables.item_prescribing_texts,
        &tables.restriction_prescribing_texts,
    )?;
    let (aggregates, resolve_stats) =
        build_aggregates(&tables.items, &tables.item_restrictions, &indexes, filters)?;
    let rows = flatten(&aggregates, schedule);

    let stats = PipelineStats {
        index: index_stats,
        resolve: resolve_stats,
        aggregates: aggregates.len(),
        rows: rows.len(),
    };
    if rows.is_empty() {
        warn!(
            items_matched = stats.resolve.items_matched,
            "no combinations matched the domain filters"
        );
    } else {
        info!(
            aggregates = stats.aggregates,
            rows = stats.rows,
            "combinations built"
        );
    }

    Ok(PipelineOutput {
        schedule: schedule.clone(),
        aggregates,
        rows,
        stats,
    })
}

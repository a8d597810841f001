//! Flattening aggregates into published combination rows.

use pbs_model::{CombinationRow, DrugAggregate, ScheduleTag};

/// Expands each aggregate into restriction × brand rows tagged with `schedule`.
///
/// Rows are emitted aggregate by aggregate, restriction-major and brand-minor.
pub fn flatten(aggregates: &[DrugAggregate], schedule: &ScheduleTag) -> Vec<CombinationRow> {
    let capacity = aggregates.iter().map(DrugAggregate::combination_count).sum();
    let mut rows = Vec::with_capacity(capacity);
    for aggregate in aggregates {
        for restriction in &aggregate.restrictions {
            for brand in &aggregate.brands {
                rows.push(CombinationRow {
                    pbs_code: aggregate.pbs_code.clone(),
                    drug: aggregate.drug.clone(),
                    brand: brand.clone(),
                    formulation: aggregate.li_form.clone(),
                    indication: restriction.indication.clone(),
                    treatment_phase: restriction.treatment_phase.clone(),
                    streamlined_code: restriction.streamlined_code.clone(),
                    online_application: restriction.online_application,
                    authority_method: restriction.authority_method.clone(),
                    hospital_type: aggregate.hospital_type,
                    maximum_prescribable_pack: aggregate.maximum_prescribable_pack,
                    maximum_quantity_units: aggregate.maximum_quantity_units,
                    number_of_repeats: aggregate.number_of_repeats,
                    schedule_code: schedule.code.clone(),
                    schedule_year: schedule.year,
                    schedule_month: schedule.month.clone(),
                });
            }
        }
    }
    rows
}

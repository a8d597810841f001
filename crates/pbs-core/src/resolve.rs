//! Relationship resolution: item → restriction → prescribing text → indication.
//!
//! Items passing the drug filter are grouped by PBS code into
//! [`DrugAggregate`]s. Each aggregate then collects one
//! [`RestrictionSummary`] per linked restriction whose prescribing texts
//! mention a filtered disease. Scanning stops at the first matching
//! prescribing text, so a restriction never contributes twice to one code.

use std::collections::{HashMap, HashSet};

use pbs_model::{
    DrugAggregate, Item, ItemIdentity, ItemRestrictionLink, Record, Restriction,
    RestrictionSummary, Result,
};
use tracing::debug;

use crate::classify::{classify_formulation, classify_hospital_type};
use crate::filters::{DomainFilters, FilterMatcher};
use crate::index::Indexes;

/// Authority method whose treatment code is reported as the streamlined code.
pub const STREAMLINED_AUTHORITY: &str = "STREAMLINED";

/// Marker in the schedule notes of restrictions that must be applied for by post.
pub const POSTAL_APPLICATION_MARKER: &str = "HOBART TAS 7001";

/// Counters collected while resolving aggregates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveStats {
    pub items_scanned: usize,
    /// Items lacking a PBS code, drug name, or brand name.
    pub items_skipped: usize,
    pub items_matched: usize,
    pub aggregates_created: usize,
    pub restriction_links: usize,
    /// Item/restriction links whose restriction is unknown.
    pub unresolved_restrictions: usize,
    pub restrictions_matched: usize,
    /// Aggregates dropped because no restriction matched a disease.
    pub aggregates_discarded: usize,
}

/// Groups matching items into aggregates and attaches matched restrictions.
///
/// Aggregates come back in the order their PBS code was first seen; an
/// aggregate without any matched restriction is dropped. Descriptive fields
/// are only read from the item that seeds an aggregate, so malformed values
/// on items outside the drug filter never fail a run.
pub fn build_aggregates(
    items: &[Record],
    item_restriction_links: &[Record],
    indexes: &Indexes,
    filters: &DomainFilters,
) -> Result<(Vec<DrugAggregate>, ResolveStats)> {
    let matcher = filters.matcher();
    let mut stats = ResolveStats::default();

    let mut aggregates: Vec<DrugAggregate> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for record in items {
        stats.items_scanned += 1;
        let Some(identity) = ItemIdentity::from_record(record)? else {
            stats.items_skipped += 1;
            continue;
        };
        if !matcher.matches_drug(&identity.drug_name) {
            continue;
        }
        stats.items_matched += 1;
        let position = match positions.get(&identity.pbs_code) {
            Some(position) => *position,
            None => {
                let item = Item::from_identity(identity.clone(), record)?;
                aggregates.push(seed_aggregate(&item));
                positions.insert(identity.pbs_code.clone(), aggregates.len() - 1);
                aggregates.len() - 1
            }
        };
        aggregates[position].add_brand(&identity.brand_name);
    }
    stats.aggregates_created = aggregates.len();

    let links_by_code = restriction_links_by_code(item_restriction_links, &positions);
    for aggregate in &mut aggregates {
        let Some(res_codes) = links_by_code.get(&aggregate.pbs_code) else {
            continue;
        };
        for res_code in res_codes {
            stats.restriction_links += 1;
            let Some(restriction) = indexes.restriction_by_key.get(res_code) else {
                stats.unresolved_restrictions += 1;
                continue;
            };
            if let Some(summary) = match_restriction(restriction, indexes, &matcher) {
                aggregate.restrictions.push(summary);
                stats.restrictions_matched += 1;
            }
        }
    }

    aggregates.retain(|aggregate| !aggregate.restrictions.is_empty());
    stats.aggregates_discarded = stats.aggregates_created - aggregates.len();

    debug!(
        items_scanned = stats.items_scanned,
        items_matched = stats.items_matched,
        aggregates = aggregates.len(),
        discarded = stats.aggregates_discarded,
        restrictions_matched = stats.restrictions_matched,
        "aggregates resolved"
    );

    Ok((aggregates, stats))
}

fn seed_aggregate(item: &Item) -> DrugAggregate {
    DrugAggregate {
        pbs_code: item.pbs_code.clone(),
        drug: item.drug_name.clone(),
        brands: Vec::new(),
        formulation: classify_formulation(&item.li_form),
        li_form: item.li_form.clone(),
        schedule_form: item.schedule_form.clone(),
        manner_of_administration: item.manner_of_administration.clone(),
        hospital_type: classify_hospital_type(item.program_code.as_deref()),
        maximum_prescribable_pack: item.maximum_prescribable_pack,
        maximum_quantity_units: item.maximum_quantity_units,
        number_of_repeats: item.number_of_repeats,
        restrictions: Vec::new(),
    }
}

/// Restriction codes per aggregated PBS code, in link order, without repeats.
fn restriction_links_by_code(
    links: &[Record],
    positions: &HashMap<String, usize>,
) -> HashMap<String, Vec<String>> {
    let mut by_code: HashMap<String, Vec<String>> = HashMap::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    for link in links.iter().filter_map(ItemRestrictionLink::from_record) {
        if !positions.contains_key(&link.pbs_code)
            || !seen.insert((link.pbs_code.clone(), link.res_code.clone()))
        {
            continue;
        }
        by_code.entry(link.pbs_code).or_default().push(link.res_code);
    }
    by_code
}

/// Summarizes `restriction` against the first prescribing text whose
/// indication mentions a filtered disease.
fn match_restriction(
    restriction: &Restriction,
    indexes: &Indexes,
    matcher: &FilterMatcher<'_>,
) -> Option<RestrictionSummary> {
    let text_keys = indexes
        .prescribing_text_keys_by_restriction_key
        .get(&restriction.res_code)?;
    let disease = text_keys.iter().find_map(|key| {
        let indication = indexes.indication_by_prescribing_text_key.get(key)?;
        matcher.match_disease(&indication.condition)
    })?;
    Some(RestrictionSummary {
        res_code: restriction.res_code.clone(),
        indication: disease.to_string(),
        treatment_phase: restriction.treatment_phase.clone(),
        restriction_text: restriction.rule_text.clone(),
        authority_method: restriction.authority_method.clone(),
        streamlined_code: if restriction.authority_method == STREAMLINED_AUTHORITY {
            restriction.treatment_of_code.clone()
        } else {
            None
        },
        online_application: !restriction.schedule_text.contains(POSTAL_APPLICATION_MARKER),
    })
}

//! Lookup structures built from the raw schedule tables.

use std::collections::{BTreeMap, HashMap};

use pbs_model::{
    Indication, ItemPrescribingTextLink, PrescribingText, Record, Restriction,
    RestrictionPrescribingTextLink, Result, TableKind,
};
use tracing::debug;

/// Run-scoped lookups used by the relationship resolver.
#[derive(Debug, Clone, Default)]
pub struct Indexes {
    /// `prescribing_txt_id` to prescribing text; last write wins.
    pub prescribing_text_by_key: HashMap<String, PrescribingText>,
    /// `res_code` to restriction; last write wins.
    pub restriction_by_key: HashMap<String, Restriction>,
    /// Resolved prescribing text id to indication; last write wins.
    pub indication_by_prescribing_text_key: HashMap<String, Indication>,
    /// `res_code` to linked prescribing text ids, in input order.
    pub prescribing_text_keys_by_restriction_key: HashMap<String, Vec<String>>,
    /// `pbs_code` to linked prescribing text ids, in input order.
    pub prescribing_text_keys_by_item_key: HashMap<String, Vec<String>>,
}

/// Sizes of each index and the records skipped while building them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub prescribing_texts: usize,
    pub restrictions: usize,
    pub indications: usize,
    pub restriction_prescribing_text_links: usize,
    pub item_prescribing_text_links: usize,
    /// Records lacking the key their index needs, per table.
    pub skipped: BTreeMap<TableKind, usize>,
}

impl IndexStats {
    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }

    fn skip(&mut self, table: TableKind) {
        *self.skipped.entry(table).or_insert(0) += 1;
    }
}

/// Builds every lookup the resolver needs.
///
/// Records missing their key are skipped and counted; a value of the wrong
/// type is returned as an error.
pub fn resolve_indexes(
    prescribing_texts: &[Record],
    restrictions: &[Record],
    indications: &[Record],
    item_prescribing_text_links: &[Record],
    restriction_prescribing_text_links: &[Record],
) -> Result<(Indexes, IndexStats)> {
    let mut indexes = Indexes::default();
    let mut stats = IndexStats::default();

    for record in prescribing_texts {
        match PrescribingText::from_record(record)? {
            Some(text) => {
                indexes
                    .prescribing_text_by_key
                    .insert(text.prescribing_txt_id.clone(), text);
            }
            None => stats.skip(TableKind::PrescribingTexts),
        }
    }

    for record in restrictions {
        match Restriction::from_record(record)? {
            Some(restriction) => {
                indexes
                    .restriction_by_key
                    .insert(restriction.res_code.clone(), restriction);
            }
            None => stats.skip(TableKind::Restrictions),
        }
    }

    for record in indications {
        match Indication::from_record(record)? {
            Some(indication) => {
                indexes
                    .indication_by_prescribing_text_key
                    .insert(indication.prescribing_txt_id.clone(), indication);
            }
            None => stats.skip(TableKind::Indications),
        }
    }

    for record in restriction_prescribing_text_links {
        match RestrictionPrescribingTextLink::from_record(record) {
            Some(link) => {
                indexes
                    .prescribing_text_keys_by_restriction_key
                    .entry(link.res_code)
                    .or_default()
                    .push(link.prescribing_txt_id);
                stats.restriction_prescribing_text_links += 1;
            }
            None => stats.skip(TableKind::RestrictionPrescribingTexts),
        }
    }

    for record in item_prescribing_text_links {
        match ItemPrescribingTextLink::from_record(record) {
            Some(link) => {
                indexes
                    .prescribing_text_keys_by_item_key
                    .entry(link.pbs_code)
                    .or_default()
                    .push(link.prescribing_txt_id);
                stats.item_prescribing_text_links += 1;
            }
            None => stats.skip(TableKind::ItemPrescribingTexts),
        }
    }

    stats.prescribing_texts = indexes.prescribing_text_by_key.len();
    stats.restrictions = indexes.restriction_by_key.len();
    stats.indications = indexes.indication_by_prescribing_text_key.len();

    debug!(
        prescribing_texts = stats.prescribing_texts,
        restrictions = stats.restrictions,
        indications = stats.indications,
        restriction_links = stats.restriction_prescribing_text_links,
        item_links = stats.item_prescribing_text_links,
        skipped = stats.skipped_total(),
        "indexes built"
    );

    Ok((indexes, stats))
}

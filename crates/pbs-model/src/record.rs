//! Untyped source records and the tables that hold them.
//!
//! Every source table arrives as a list of flat records mapping a field name
//! to a [`FieldValue`]. Extra fields are carried along and ignored by the
//! typed entity constructors.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Integer(i64),
    Text(String),
}

impl FieldValue {
    /// Normalizes a raw text cell: trimmed, empty or `null` becomes [`FieldValue::Null`].
    pub fn from_cell(raw: &str) -> Self {
        let trimmed = raw.trim().trim_matches('\u{feff}');
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
            Self::Null
        } else {
            Self::Text(trimmed.to_string())
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Canonical join-key form of the value.
    ///
    /// Text is trimmed and empty text counts as absent; integers render in
    /// decimal so that `42` and `"42"` join.
    pub fn as_key(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Integer(value) => Some(value.to_string()),
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A flat source record: field name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns the value of `field`; absent fields and nulls both yield `None`.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field).filter(|value| !value.is_null())
    }

    /// Canonical key stored under `field`, if any.
    pub fn key(&self, field: &str) -> Option<String> {
        self.fields.get(field).and_then(FieldValue::as_key)
    }

    /// First present key among `candidates`, tried in order.
    pub fn first_key(&self, candidates: &[&str]) -> Option<String> {
        candidates.iter().find_map(|field| self.key(field))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (field, value) in iter {
            record.insert(field, value);
        }
        record
    }
}

/// The source tables of a PBS schedule snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TableKind {
    Items,
    Indications,
    PrescribingTexts,
    ItemPrescribingTexts,
    Restrictions,
    ItemRestrictions,
    RestrictionPrescribingTexts,
}

impl TableKind {
    pub const ALL: [TableKind; 7] = [
        TableKind::Items,
        TableKind::Indications,
        TableKind::PrescribingTexts,
        TableKind::ItemPrescribingTexts,
        TableKind::Restrictions,
        TableKind::ItemRestrictions,
        TableKind::RestrictionPrescribingTexts,
    ];

    /// File stem used by the published CSV archive.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Items => "items",
            Self::Indications => "indications",
            Self::PrescribingTexts => "prescribing-texts",
            Self::ItemPrescribingTexts => "item-prescribing-text-relationships",
            Self::Restrictions => "restrictions",
            Self::ItemRestrictions => "item-restriction-relationships",
            Self::RestrictionPrescribingTexts => "restriction-prescribing-text-relationships",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// A fully materialized source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub kind: TableKind,
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(kind: TableKind, records: Vec<Record>) -> Self {
        Self { kind, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// All seven source tables for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTables {
    pub items: Vec<Record>,
    pub indications: Vec<Record>,
    pub prescribing_texts: Vec<Record>,
    pub item_prescribing_texts: Vec<Record>,
    pub restrictions: Vec<Record>,
    pub item_restrictions: Vec<Record>,
    pub restriction_prescribing_texts: Vec<Record>,
}

impl SourceTables {
    /// Stores `table` in the slot for its kind, replacing any previous records.
    pub fn set(&mut self, table: Table) {
        *self.slot_mut(table.kind) = table.records;
    }

    pub fn get(&self, kind: TableKind) -> &[Record] {
        match kind {
            TableKind::Items => &self.items,
            TableKind::Indications => &self.indications,
            TableKind::PrescribingTexts => &self.prescribing_texts,
            TableKind::ItemPrescribingTexts => &self.item_prescribing_texts,
            TableKind::Restrictions => &self.restrictions,
            TableKind::ItemRestrictions => &self.item_restrictions,
            TableKind::RestrictionPrescribingTexts => &self.restriction_prescribing_texts,
        }
    }

    fn slot_mut(&mut self, kind: TableKind) -> &mut Vec<Record> {
        match kind {
            TableKind::Items => &mut self.items,
            TableKind::Indications => &mut self.indications,
            TableKind::PrescribingTexts => &mut self.prescribing_texts,
            TableKind::ItemPrescribingTexts => &mut self.item_prescribing_texts,
            TableKind::Restrictions => &mut self.restrictions,
            TableKind::ItemRestrictions => &mut self.item_restrictions,
            TableKind::RestrictionPrescribingTexts => &mut self.restriction_prescribing_texts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cell_normalizes_nulls() {
        assert_eq!(FieldValue::from_cell(""), FieldValue::Null);
        assert_eq!(FieldValue::from_cell("   "), FieldValue::Null);
        assert_eq!(FieldValue::from_cell("NULL"), FieldValue::Null);
        assert_eq!(FieldValue::from_cell("\u{feff}abc "), FieldValue::from("abc"));
    }

    #[test]
    fn test_key_accepts_integers_and_text() {
        let record = Record::new()
            .with("a", 42_i64)
            .with("b", " 42 ")
            .with("c", "")
            .with("d", FieldValue::Null);
        assert_eq!(record.key("a").as_deref(), Some("42"));
        assert_eq!(record.key("b").as_deref(), Some("42"));
        assert_eq!(record.key("c"), None);
        assert_eq!(record.key("d"), None);
        assert_eq!(record.key("missing"), None);
    }

    #[test]
    fn test_first_key_respects_order() {
        let record = Record::new().with("second", "2").with("third", "3");
        assert_eq!(
            record.first_key(&["first", "second", "third"]).as_deref(),
            Some("2")
        );
        assert_eq!(record.first_key(&["first"]), None);
    }

    #[test]
    fn test_record_deserializes_mixed_values() {
        let record: Record =
            serde_json::from_str(r#"{"pbs_code": "1234A", "repeats": 5, "note": null}"#)
                .expect("deserialize record");
        assert_eq!(record.get("pbs_code"), Some(&FieldValue::from("1234A")));
        assert_eq!(record.get("repeats"), Some(&FieldValue::Integer(5)));
        assert_eq!(record.get("note"), None);
    }

    #[test]
    fn test_source_tables_slots() {
        let mut tables = SourceTables::default();
        tables.set(Table::new(
            TableKind::Restrictions,
            vec![Record::new().with("res_code", "R1")],
        ));
        assert_eq!(tables.get(TableKind::Restrictions).len(), 1);
        assert!(tables.get(TableKind::Items).is_empty());
    }
}

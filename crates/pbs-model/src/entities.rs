//! Typed views over source records.
//!
//! Each constructor returns `Ok(None)` when the record lacks the natural key
//! it is indexed by, and an error only when a value has the wrong shape.

use crate::error::{ModelError, Result};
use crate::record::{FieldValue, Record, TableKind};

/// Candidate fields linking an indication to its prescribing text, in
/// precedence order.
pub const INDICATION_PRESCRIBING_TEXT_FIELDS: [&str; 3] = [
    "prescribing_text_id",
    "indication_prescribing_txt_id",
    "prescribing_txt_id",
];

/// Candidate fields naming the prescribing text in the
/// restriction/prescribing-text junction table, in precedence order.
pub const RESTRICTION_PRESCRIBING_TEXT_FIELDS: [&str; 2] =
    ["prescribing_text_id", "prescribing_txt_id"];

/// Typed field access that reports mismatches against a table.
struct Fields<'a> {
    table: TableKind,
    record: &'a Record,
}

impl<'a> Fields<'a> {
    fn new(table: TableKind, record: &'a Record) -> Self {
        Self { table, record }
    }

    fn key(&self, field: &str) -> Option<String> {
        self.record.key(field)
    }

    fn text(&self, field: &str) -> Result<Option<&'a str>> {
        match self.record.get(field) {
            None => Ok(None),
            Some(FieldValue::Text(text)) => Ok(Some(text.as_str())),
            Some(other) => Err(self.mismatch(field, "text", other)),
        }
    }

    fn text_or_empty(&self, field: &str) -> Result<String> {
        Ok(self.text(field)?.unwrap_or_default().to_string())
    }

    fn integer(&self, field: &str) -> Result<Option<i64>> {
        match self.record.get(field) {
            None => Ok(None),
            Some(FieldValue::Integer(value)) => Ok(Some(*value)),
            Some(FieldValue::Text(text)) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|_| self.mismatch(field, "integer", &FieldValue::Text(text.clone())))
            }
            Some(FieldValue::Null) => Ok(None),
        }
    }

    fn mismatch(&self, field: &str, expected: &'static str, found: &FieldValue) -> ModelError {
        ModelError::FieldType {
            table: self.table.file_stem(),
            field: field.to_string(),
            expected,
            found: found.to_string(),
        }
    }
}

/// The key and names of an item, read without its descriptive fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemIdentity {
    pub pbs_code: String,
    pub drug_name: String,
    pub brand_name: String,
}

impl ItemIdentity {
    pub fn from_record(record: &Record) -> Result<Option<Self>> {
        let fields = Fields::new(TableKind::Items, record);
        let (Some(pbs_code), Some(drug_name), Some(brand_name)) = (
            fields.key("pbs_code"),
            fields.text("drug_name")?,
            fields.text("brand_name")?,
        ) else {
            return Ok(None);
        };
        Ok(Some(Self {
            pbs_code,
            drug_name: drug_name.to_string(),
            brand_name: brand_name.to_string(),
        }))
    }
}

/// A dispensed-product line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub pbs_code: String,
    pub drug_name: String,
    pub brand_name: String,
    pub li_form: String,
    pub schedule_form: String,
    pub manner_of_administration: String,
    pub program_code: Option<String>,
    pub maximum_prescribable_pack: Option<i64>,
    pub maximum_quantity_units: Option<i64>,
    pub number_of_repeats: Option<i64>,
}

impl Item {
    pub fn from_record(record: &Record) -> Result<Option<Self>> {
        match ItemIdentity::from_record(record)? {
            Some(identity) => Self::from_identity(identity, record).map(Some),
            None => Ok(None),
        }
    }

    /// Completes `identity` with the descriptive fields of `record`.
    pub fn from_identity(identity: ItemIdentity, record: &Record) -> Result<Self> {
        let fields = Fields::new(TableKind::Items, record);
        Ok(Self {
            pbs_code: identity.pbs_code,
            drug_name: identity.drug_name,
            brand_name: identity.brand_name,
            li_form: fields.text_or_empty("li_form")?,
            schedule_form: fields.text_or_empty("schedule_form")?,
            manner_of_administration: fields.text_or_empty("manner_of_administration")?,
            program_code: fields.key("program_code"),
            maximum_prescribable_pack: fields.integer("maximum_prescribable_pack")?,
            maximum_quantity_units: fields.integer("maximum_quantity_units")?,
            number_of_repeats: fields.integer("number_of_repeats")?,
        })
    }
}

/// An authority or prescribing rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restriction {
    pub res_code: String,
    pub treatment_phase: String,
    /// Rule body (`li_html_text`).
    pub rule_text: String,
    pub authority_method: String,
    /// Streamlined authority code (`treatment_of_code`).
    pub treatment_of_code: Option<String>,
    /// Schedule notes (`schedule_html_text`).
    pub schedule_text: String,
}

impl Restriction {
    pub fn from_record(record: &Record) -> Result<Option<Self>> {
        let fields = Fields::new(TableKind::Restrictions, record);
        let Some(res_code) = fields.key("res_code") else {
            return Ok(None);
        };
        Ok(Some(Self {
            res_code,
            treatment_phase: fields.text_or_empty("treatment_phase")?,
            rule_text: fields.text_or_empty("li_html_text")?,
            authority_method: fields.text_or_empty("authority_method")?,
            treatment_of_code: fields.key("treatment_of_code"),
            schedule_text: fields.text_or_empty("schedule_html_text")?,
        }))
    }
}

/// Free text tied to a clinical indication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescribingText {
    pub prescribing_txt_id: String,
    pub text: String,
}

impl PrescribingText {
    pub fn from_record(record: &Record) -> Result<Option<Self>> {
        let fields = Fields::new(TableKind::PrescribingTexts, record);
        let Some(prescribing_txt_id) = fields.key("prescribing_txt_id") else {
            return Ok(None);
        };
        Ok(Some(Self {
            prescribing_txt_id,
            text: fields.text_or_empty("prescribing_txt")?,
        }))
    }
}

/// A clinical condition linked to a prescribing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indication {
    /// Prescribing text id resolved through [`INDICATION_PRESCRIBING_TEXT_FIELDS`].
    pub prescribing_txt_id: String,
    pub condition: String,
}

impl Indication {
    pub fn from_record(record: &Record) -> Result<Option<Self>> {
        let fields = Fields::new(TableKind::Indications, record);
        let Some(prescribing_txt_id) = record.first_key(&INDICATION_PRESCRIBING_TEXT_FIELDS)
        else {
            return Ok(None);
        };
        Ok(Some(Self {
            prescribing_txt_id,
            condition: fields.text_or_empty("condition")?,
        }))
    }
}

/// Junction between an item code and a restriction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRestrictionLink {
    pub pbs_code: String,
    pub res_code: String,
}

impl ItemRestrictionLink {
    pub fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            pbs_code: record.key("pbs_code")?,
            res_code: record.key("res_code")?,
        })
    }
}

/// Junction between an item code and a prescribing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPrescribingTextLink {
    pub pbs_code: String,
    pub prescribing_txt_id: String,
}

impl ItemPrescribingTextLink {
    pub fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            pbs_code: record.key("pbs_code")?,
            prescribing_txt_id: record.key("prescribing_txt_id")?,
        })
    }
}

/// Junction between a restriction and a prescribing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictionPrescribingTextLink {
    pub res_code: String,
    pub prescribing_txt_id: String,
}

impl RestrictionPrescribingTextLink {
    pub fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            res_code: record.key("res_code")?,
            prescribing_txt_id: record.first_key(&RESTRICTION_PRESCRIBING_TEXT_FIELDS)?,
        })
    }
}

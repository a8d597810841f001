//! Denormalized results: per-drug aggregates and flat combination rows.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dosage-form category derived from an item's form description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formulation {
    #[serde(rename = "tablet")]
    Tablet,
    #[serde(rename = "subcut pen")]
    SubcutPen,
    #[serde(rename = "subcut syringe")]
    SubcutSyringe,
    #[serde(rename = "infusion")]
    Infusion,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Formulation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tablet => "tablet",
            Self::SubcutPen => "subcut pen",
            Self::SubcutSyringe => "subcut syringe",
            Self::Infusion => "infusion",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Formulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hospital setting an item is listed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HospitalType {
    Private,
    Public,
    Any,
}

impl HospitalType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Private => "Private",
            Self::Public => "Public",
            Self::Any => "Any",
        }
    }
}

impl fmt::Display for HospitalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A restriction matched to a drug through one of the filtered diseases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictionSummary {
    pub res_code: String,
    /// Disease filter entry that matched, as written in the filter list.
    pub indication: String,
    pub treatment_phase: String,
    pub restriction_text: String,
    pub authority_method: String,
    /// Present only for `STREAMLINED` authority.
    pub streamlined_code: Option<String>,
    pub online_application: bool,
}

/// All brands and matched restrictions for one PBS code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugAggregate {
    pub pbs_code: String,
    pub drug: String,
    /// Distinct brand names in first-seen order.
    pub brands: Vec<String>,
    pub formulation: Formulation,
    /// Raw form description (`li_form`).
    pub li_form: String,
    pub schedule_form: String,
    pub manner_of_administration: String,
    pub hospital_type: HospitalType,
    pub maximum_prescribable_pack: Option<i64>,
    pub maximum_quantity_units: Option<i64>,
    pub number_of_repeats: Option<i64>,
    pub restrictions: Vec<RestrictionSummary>,
}

impl DrugAggregate {
    /// Adds `brand` unless it is already listed.
    pub fn add_brand(&mut self, brand: &str) {
        if !self.brands.iter().any(|existing| existing == brand) {
            self.brands.push(brand.to_string());
        }
    }

    /// Number of rows this aggregate flattens into.
    pub fn combination_count(&self) -> usize {
        self.brands.len() * self.restrictions.len()
    }
}

/// Column names of the published table, in output order.
pub const COMBINATION_COLUMNS: [&str; 16] = [
    "pbs_code",
    "drug",
    "brand",
    "formulation",
    "indication",
    "treatment_phase",
    "streamlined_code",
    "online_application",
    "authority_method",
    "hospital_type",
    "maximum_prescribable_pack",
    "maximum_quantity_units",
    "number_of_repeats",
    "schedule_code",
    "schedule_year",
    "schedule_month",
];

/// One published row: a (drug, brand, restriction) combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationRow {
    pub pbs_code: String,
    pub drug: String,
    pub brand: String,
    /// Raw form description, not the derived [`Formulation`].
    pub formulation: String,
    pub indication: String,
    pub treatment_phase: String,
    pub streamlined_code: Option<String>,
    pub online_application: bool,
    pub authority_method: String,
    pub hospital_type: HospitalType,
    pub maximum_prescribable_pack: Option<i64>,
    pub maximum_quantity_units: Option<i64>,
    pub number_of_repeats: Option<i64>,
    pub schedule_code: String,
    pub schedule_year: i32,
    pub schedule_month: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Formulation::SubcutPen.to_string(), "subcut pen");
        assert_eq!(HospitalType::Public.to_string(), "Public");
        assert_eq!(
            serde_json::to_string(&Formulation::SubcutSyringe).expect("serialize"),
            "\"subcut syringe\""
        );
    }

    #[test]
    fn test_add_brand_keeps_first_seen_order() {
        let mut aggregate = DrugAggregate {
            pbs_code: "1".to_string(),
            drug: "etanercept".to_string(),
            brands: Vec::new(),
            formulation: Formulation::Unknown,
            li_form: String::new(),
            schedule_form: String::new(),
            manner_of_administration: String::new(),
            hospital_type: HospitalType::Any,
            maximum_prescribable_pack: None,
            maximum_quantity_units: None,
            number_of_repeats: None,
            restrictions: Vec::new(),
        };
        aggregate.add_brand("Enbrel");
        aggregate.add_brand("Brenzys");
        aggregate.add_brand("Enbrel");
        assert_eq!(aggregate.brands, vec!["Enbrel", "Brenzys"]);
        assert_eq!(aggregate.combination_count(), 0);
    }
}

//! Domain filters: which drugs and which diseases are in scope.

use serde::{Deserialize, Serialize};

const BIOLOGICS: &[&str] = &[
    "adalimumab",
    "etanercept",
    "infliximab",
    "certolizumab",
    "golimumab",
    "rituximab",
    "abatacept",
    "tocilizumab",
    "secukinumab",
    "ixekizumab",
    "ustekinumab",
    "guselkumab",
    "tofacitinib",
    "baricitinib",
    "upadacitinib",
    "anifrolumab",
    "bimekizumab",
    "avacopan",
    "risankizumab",
];

// Order matters: the first entry found in a condition wins.
const RHEUMATIC_DISEASES: &[&str] = &[
    "rheumatoid arthritis",
    "psoriatic arthritis",
    "ankylosing spondylitis",
    "non-radiographic axial spondyloarthritis",
    "giant cell arteritis",
    "juvenile idiopathic arthritis",
    "systemic lupus erythematosus",
    "Anti-neutrophil cytoplasmic autoantibody (ANCA) associated vasculitis",
];

/// Drug-name and disease-name substrings that define the extract.
///
/// Both lists match case-insensitively. Disease order is significant: when a
/// condition mentions several diseases, the one listed first is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainFilters {
    #[serde(default = "default_drugs")]
    pub drugs: Vec<String>,
    #[serde(default = "default_diseases")]
    pub diseases: Vec<String>,
}

fn default_drugs() -> Vec<String> {
    BIOLOGICS.iter().map(|name| (*name).to_string()).collect()
}

fn default_diseases() -> Vec<String> {
    RHEUMATIC_DISEASES
        .iter()
        .map(|name| (*name).to_string())
        .collect()
}

impl Default for DomainFilters {
    fn default() -> Self {
        Self::rheumatology()
    }
}

impl DomainFilters {
    /// Biologic and targeted synthetic drugs used for rheumatic diseases.
    pub fn rheumatology() -> Self {
        Self {
            drugs: default_drugs(),
            diseases: default_diseases(),
        }
    }

    pub fn new<D, S>(drugs: D, diseases: S) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            drugs: drugs.into_iter().map(Into::into).collect(),
            diseases: diseases.into_iter().map(Into::into).collect(),
        }
        .normalized()
    }

    /// Trims entries, drops empty ones, and removes case-insensitive
    /// duplicates keeping the first occurrence.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            drugs: dedupe(self.drugs),
            diseases: dedupe(self.diseases),
        }
    }

    pub(crate) fn matcher(&self) -> FilterMatcher<'_> {
        FilterMatcher {
            drugs: self
                .drugs
                .iter()
                .map(|drug| drug.trim().to_lowercase())
                .filter(|drug| !drug.is_empty())
                .collect(),
            diseases: self
                .diseases
                .iter()
                .filter(|disease| !disease.trim().is_empty())
                .map(|disease| (disease.as_str(), disease.trim().to_lowercase()))
                .collect(),
        }
    }
}

fn dedupe(values: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    let mut kept = Vec::with_capacity(values.len());
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        let folded = trimmed.to_lowercase();
        if seen.contains(&folded) {
            continue;
        }
        seen.push(folded);
        kept.push(trimmed.to_string());
    }
    kept
}

/// Lower-cased view of [`DomainFilters`] used while scanning.
#[derive(Debug)]
pub(crate) struct FilterMatcher<'a> {
    drugs: Vec<String>,
    diseases: Vec<(&'a str, String)>,
}

impl<'a> FilterMatcher<'a> {
    /// True when `drug_name` contains any drug filter.
    pub(crate) fn matches_drug(&self, drug_name: &str) -> bool {
        let lowered = drug_name.to_lowercase();
        self.drugs.iter().any(|drug| lowered.contains(drug.as_str()))
    }

    /// First disease, in filter order, mentioned by `condition`.
    pub(crate) fn match_disease(&self, condition: &str) -> Option<&'a str> {
        let lowered = condition.to_lowercase();
        self.diseases
            .iter()
            .find(|(_, needle)| lowered.contains(needle.as_str()))
            .map(|(name, _)| *name)
    }
}

//! Classification helpers for item descriptions and program codes.

use pbs_model::{Formulation, HospitalType};

const PEN_KEYWORDS: [&str; 3] = ["pen", "auto-injector", "autoinjector"];
const INFUSION_KEYWORDS: [&str; 2] = ["i.v. infusion", "concentrate for injection"];

/// Classifies a form description; the first matching category wins.
pub fn classify_formulation(description: &str) -> Formulation {
    let lowered = description.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|kw| lowered.contains(kw));
    if lowered.contains("tablet") {
        Formulation::Tablet
    } else if contains_any(&PEN_KEYWORDS[..]) {
        Formulation::SubcutPen
    } else if lowered.contains("syringe") {
        Formulation::SubcutSyringe
    } else if contains_any(&INFUSION_KEYWORDS[..]) {
        Formulation::Infusion
    } else {
        Formulation::Unknown
    }
}

/// Maps a program code to the hospital setting it is listed for.
pub fn classify_hospital_type(program_code: Option<&str>) -> HospitalType {
    match program_code {
        Some("HS") => HospitalType::Private,
        Some("HB") => HospitalType::Public,
        _ => HospitalType::Any,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formulation_examples() {
        assert_eq!(classify_formulation("Tablet 40mg"), Formulation::Tablet);
        assert_eq!(classify_formulation("Pre-filled pen"), Formulation::SubcutPen);
        assert_eq!(
            classify_formulation("Pre-filled syringe"),
            Formulation::SubcutSyringe
        );
        assert_eq!(
            classify_formulation("Concentrate for I.V. infusion"),
            Formulation::Infusion
        );
        assert_eq!(classify_formulation("Cream"), Formulation::Unknown);
    }

    #[test]
    fn test_formulation_precedence() {
        // "tablet" beats everything, "pen" beats "syringe".
        assert_eq!(
            classify_formulation("Tablet and pre-filled syringe pack"),
            Formulation::Tablet
        );
        assert_eq!(
            classify_formulation("Injection in pre-filled syringe (autoinjector)"),
            Formulation::SubcutPen
        );
        assert_eq!(
            classify_formulation("Powder for CONCENTRATE FOR INJECTION 100 mg"),
            Formulation::Infusion
        );
    }

    #[test]
    fn test_hospital_type() {
        assert_eq!(classify_hospital_type(Some("HS")), HospitalType::Private);
        assert_eq!(classify_hospital_type(Some("HB")), HospitalType::Public);
        assert_eq!(classify_hospital_type(Some("GE")), HospitalType::Any);
        assert_eq!(classify_hospital_type(Some("hs")), HospitalType::Any);
        assert_eq!(classify_hospital_type(None), HospitalType::Any);
    }
}

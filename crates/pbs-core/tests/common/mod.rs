//! Shared schedule fixtures for pipeline tests.

#![allow(dead_code)]

use pbs_model::{Record, SourceTables};

pub fn item(pbs_code: &str, drug: &str, brand: &str, form: &str, program: &str) -> Record {
    Record::new()
        .with("pbs_code", pbs_code)
        .with("drug_name", drug)
        .with("brand_name", brand)
        .with("li_form", form)
        .with("schedule_form", form)
        .with("manner_of_administration", "INJECTION")
        .with("program_code", program)
        .with("maximum_prescribable_pack", "2")
        .with("maximum_quantity_units", 2_i64)
        .with("number_of_repeats", "5")
}

pub fn restriction(res_code: &str, phase: &str, method: &str, code: &str, notes: &str) -> Record {
    Record::new()
        .with("res_code", res_code)
        .with("treatment_phase", phase)
        .with("li_html_text", format!("<p>{phase} for {res_code}</p>"))
        .with("authority_method", method)
        .with("treatment_of_code", code)
        .with("schedule_html_text", notes)
}

pub fn indication(link_field: &str, id: &str, condition: &str) -> Record {
    Record::new()
        .with(link_field, id)
        .with("condition", condition)
}

pub fn link(left_field: &str, left: &str, right_field: &str, right: &str) -> Record {
    Record::new().with(left_field, left).with(right_field, right)
}

/// A small schedule exercising brands, duplicate links, unresolved links,
/// filter-order disease matching, and discarded aggregates.
pub fn schedule_tables() -> SourceTables {
    let pen = "Injection 40 mg in 0.4 mL pre-filled pen";
    SourceTables {
        items: vec![
            item("1001A", "adalimumab", "Humira", pen, "GE"),
            item("1001A", "adalimumab", "Amgevita", pen, "HS"),
            item("1001A", "adalimumab", "Humira", pen, "GE"),
            item(
                "2002B",
                "Etanercept",
                "Enbrel",
                "Injection 50 mg in 1 mL pre-filled syringe",
                "HS",
            ),
            item("3003C", "methotrexate", "Trexate", "Tablet 10 mg", "GE"),
            item("4004D", "tofacitinib", "Xeljanz", "Tablet 5 mg", "HB"),
        ],
        indications: vec![
            indication("prescribing_text_id", "10", "Crohn disease"),
            indication(
                "indication_prescribing_txt_id",
                "11",
                "Severe active rheumatoid arthritis",
            ),
            indication("prescribing_txt_id", "12", "Psoriatic arthritis"),
            indication(
                "prescribing_text_id",
                "13",
                "Psoriatic arthritis with features of Rheumatoid Arthritis",
            ),
            indication("prescribing_text_id", "14", "Ankylosing spondylitis"),
        ],
        prescribing_texts: ["10", "11", "12", "13", "14"]
            .iter()
            .map(|id| {
                Record::new()
                    .with("prescribing_txt_id", *id)
                    .with("prescribing_txt", format!("text {id}"))
            })
            .collect(),
        item_prescribing_texts: vec![link("pbs_code", "1001A", "prescribing_txt_id", "11")],
        restrictions: vec![
            restriction("R1", "Initial treatment", "STREAMLINED", "4321", "Apply online"),
            restriction(
                "R2",
                "Continuing treatment",
                "WRITTEN",
                "9999",
                "Services Australia, Reply Paid 9826, HOBART TAS 7001",
            ),
            restriction("R3", "Initial treatment", "TELEPHONE", "", ""),
            restriction("R4", "Initial treatment", "STREAMLINED", "1111", ""),
        ],
        item_restrictions: vec![
            link("pbs_code", "1001A", "res_code", "R1"),
            link("pbs_code", "1001A", "res_code", "R2"),
            link("pbs_code", "1001A", "res_code", "R1"),
            link("pbs_code", "1001A", "res_code", "R404"),
            link("pbs_code", "2002B", "res_code", "R3"),
            link("pbs_code", "4004D", "res_code", "R4"),
            link("pbs_code", "3003C", "res_code", "R1"),
        ],
        restriction_prescribing_texts: vec![
            link("res_code", "R1", "prescribing_text_id", "10"),
            link("res_code", "R1", "prescribing_text_id", "11"),
            link("res_code", "R1", "prescribing_text_id", "12"),
            link("res_code", "R2", "prescribing_text_id", "13"),
            link("res_code", "R3", "prescribing_text_id", "99"),
            link("res_code", "R3", "prescribing_text_id", "14"),
            link("res_code", "R4", "prescribing_text_id", "10"),
        ],
    }
}

//! Property tests for classification and aggregation invariants.

mod common;

use pbs_core::{DomainFilters, build_aggregates, classify_formulation, flatten, resolve_indexes};
use pbs_model::{Formulation, Record, ScheduleTag};
use proptest::prelude::*;

use common::{indication, item, link, restriction};

proptest! {
    #[test]
    fn tablet_always_wins(prefix in "[a-z ]{0,12}", suffix in "[a-z ]{0,12}") {
        let description = format!("{prefix}TaBlEt{suffix}");
        prop_assert_eq!(classify_formulation(&description), Formulation::Tablet);
    }

    #[test]
    fn classification_ignores_case(description in "[a-zA-Z .-]{0,40}") {
        prop_assert_eq!(
            classify_formulation(&description),
            classify_formulation(&description.to_uppercase())
        );
    }

    #[test]
    fn brands_unique_and_rows_are_cross_product(
        brands in proptest::collection::vec(prop::sample::select(vec!["A", "B", "C", "D"]), 1..12),
        restriction_count in 1usize..4,
    ) {
        let items: Vec<Record> = brands
            .iter()
            .map(|brand| item("7007G", "abatacept", brand, "Injection pre-filled syringe", "GE"))
            .collect();
        let restrictions: Vec<Record> = (0..restriction_count)
            .map(|n| restriction(&format!("R{n}"), "Initial", "WRITTEN", "", ""))
            .collect();
        let item_links: Vec<Record> = (0..restriction_count)
            .map(|n| link("pbs_code", "7007G", "res_code", &format!("R{n}")))
            .collect();
        let text_links: Vec<Record> = (0..restriction_count)
            .map(|n| link("res_code", &format!("R{n}"), "prescribing_text_id", "1"))
            .collect();
        let indications = vec![indication("prescribing_text_id", "1", "Rheumatoid arthritis")];

        let (indexes, _) = resolve_indexes(&[], &restrictions, &indications, &[], &text_links)
            .expect("build indexes");
        let (aggregates, _) =
            build_aggregates(&items, &item_links, &indexes, &DomainFilters::rheumatology())
                .expect("resolve aggregates");
        prop_assert_eq!(aggregates.len(), 1);

        let mut expected: Vec<&str> = Vec::new();
        for brand in &brands {
            if !expected.contains(brand) {
                expected.push(brand);
            }
        }
        prop_assert_eq!(&aggregates[0].brands, &expected);

        let tag = ScheduleTag { code: "2024-01".into(), year: 2024, month: "JANUARY".into() };
        let rows = flatten(&aggregates, &tag);
        prop_assert_eq!(rows.len(), expected.len() * restriction_count);
    }
}

//! Data model for the PBS rheumatology biologics extract.
//!
//! - [`record`]: untyped source records as loaded from a schedule snapshot
//! - [`entities`]: typed views over those records (items, restrictions, links)
//! - [`period`]: publication periods and output schedule tags
//! - [`output`]: drug aggregates and flat combination rows

pub mod entities;
pub mod error;
pub mod output;
pub mod period;
pub mod record;

pub use entities::{
    INDICATION_PRESCRIBING_TEXT_FIELDS, Indication, Item, ItemIdentity, ItemPrescribingTextLink,
    ItemRestrictionLink, PrescribingText, RESTRICTION_PRESCRIBING_TEXT_FIELDS, Restriction,
    RestrictionPrescribingTextLink,
};
pub use error::{ModelError, Result};
pub use output::{
    COMBINATION_COLUMNS, CombinationRow, DrugAggregate, Formulation, HospitalType,
    RestrictionSummary,
};
pub use period::{Period, ScheduleTag};
pub use record::{FieldValue, Record, SourceTables, Table, TableKind};

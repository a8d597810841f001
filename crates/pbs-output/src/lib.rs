//! Publishing combination rows.
//!
//! The published table is a CSV file holding every period's combinations.
//! A batch is appended only when its period identifier is not already in
//! the table, so re-running a period never duplicates rows.

pub mod error;
pub mod frame;
pub mod publish;

pub use error::{PublishError, Result};
pub use frame::{combination_frame, stringify_frame};
pub use publish::{
    CsvPublisher, DryRunPublisher, PERIOD_COLUMN, PublishOutcome, Publisher, append_combinations,
    contains_period, publish, read_published,
};

//! CLI library components for the PBS biologics extract.

pub mod logging;
pub mod run;
pub mod types;

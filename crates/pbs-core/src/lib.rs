//! Join, filter, and flatten pipeline for PBS biologics listings.
//!
//! The pipeline runs in three stages over fully materialized tables:
//!
//! 1. [`resolve_indexes`]: build keyed lookups from the reference tables
//! 2. [`build_aggregates`]: walk item → restriction → prescribing text →
//!    indication, keeping drugs and diseases named by [`DomainFilters`]
//! 3. [`flatten`]: expand each aggregate into one row per restriction and brand
//!
//! [`run_pipeline`] chains the three and reports counts for each stage.

pub mod classify;
pub mod filters;
pub mod flatten;
pub mod index;
pub mod pipeline;
pub mod resolve;

pub use classify::{classify_formulation, classify_hospital_type};
pub use filters::DomainFilters;
pub use flatten::flatten;
pub use index::{IndexStats, Indexes, resolve_indexes};
pub use pipeline::{PipelineOutput, PipelineStats, run_pipeline};
pub use resolve::{
    POSTAL_APPLICATION_MARKER, ResolveStats, STREAMLINED_AUTHORITY, build_aggregates,
};

// src/pipeline/mod.rs

//! Pipeline entry points for ingestion runs.
//!
//! - `run_ingest`: process every catalog edition into its own index
//! - `run_rerun`: replay fetch+index for section URLs recorded in a
//!   failure log

pub mod failure_log;
pub mod ingest;
pub mod rerun;

pub use failure_log::{FailureKind, FailureLog, FailureRecord};
pub use ingest::{IngestStats, run_ingest};
pub use rerun::run_rerun;

#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// CLI argument parsing and the report printer.
pub mod app;
/// Run configuration types.
pub mod config;
/// Centralized constants for the sampling policy and the fixed dataset layout.
pub mod constants;
/// Duplicate-pair resolution.
pub mod dedup;
/// Run orchestration and the run report.
pub mod prep;
/// Size formatting and output naming helpers.
pub mod report;
/// Deterministic sample-size policy and index drawing.
pub mod sampler;
/// In-memory CSV tables with header-preserving subset writes.
pub mod table;

mod errors;

pub use config::{DuplicatePair, PrepConfig};
pub use dedup::DedupOutcome;
pub use errors::PrepError;
pub use prep::{OutputFile, RunReport, SampleOutcome, SamplePrep};
pub use table::CsvTable;

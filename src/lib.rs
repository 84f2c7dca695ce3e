#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Command-line entry points.
pub mod app;
/// Change-magnitude classification.
pub mod classify;
/// Run configuration passed into the entry point.
pub mod config;
/// Centralized constants used across the crate.
pub mod constants;
/// Word-level diff engine and rendering.
pub mod diff;
/// Comparison history and its file-backed store.
pub mod history;
/// Load-append-persist comparison pipeline.
pub mod pipeline;
/// Persisted comparison record type.
pub mod record;
/// Report projection and rendering seam.
pub mod report;
/// Description source traits and built-in sources.
pub mod source;
/// Word tokenization.
pub mod tokenize;
/// Shared type aliases.
pub mod types;

mod errors;

pub use classify::{classify, ChangeMeasure, Severity};
pub use config::DriftConfig;
pub use diff::{render_diff, word_diff, EditOp, EditTag};
pub use errors::DriftError;
pub use history::{FileHistoryStore, History};
pub use pipeline::{record_comparison, run_batch, BatchOutcome};
pub use record::ComparisonRecord;
pub use report::{summarize, ReportRenderer, ReportSummary, TextReportRenderer};
pub use source::{
    match_pairs, DescriptionEntry, DescriptionSource, FolderSource, InMemorySource, MatchedPair,
};
pub use types::{RecordId, SourceId, Word};

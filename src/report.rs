//! Aggregate views over the history and the report renderer seam.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::classify::Severity;
use crate::errors::DriftError;
use crate::history::{atomic_write, ensure_parent_dir, History};
use crate::types::RecordId;

/// Aggregates derived from the history for downstream rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportSummary {
    /// Unique-id count per severity, in NoChange/Minor/Major order.
    pub status_counts: Vec<(Severity, usize)>,
    /// `(id, change ratio percent)` for every record in insertion order.
    pub ratios: Vec<(RecordId, f64)>,
}

impl ReportSummary {
    /// Count recorded for one severity.
    pub fn count_for(&self, severity: Severity) -> usize {
        self.status_counts
            .iter()
            .find(|(candidate, _)| *candidate == severity)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

/// Project the history into status counts and per-record ratios.
///
/// Counts cover unique ids only; with duplicate ids in legacy data the
/// first occurrence in insertion order wins, mirroring the store's own
/// dedupe guarantee.
pub fn summarize(history: &History) -> ReportSummary {
    let mut counts = [0usize; 3];
    let mut seen: HashSet<&str> = HashSet::with_capacity(history.len());
    let mut ratios = Vec::with_capacity(history.len());

    for record in history.records() {
        ratios.push((record.id.clone(), record.change_ratio_percent));
        if !seen.insert(record.id.as_str()) {
            continue;
        }
        let slot = match record.severity {
            Severity::NoChange => 0,
            Severity::Minor => 1,
            Severity::Major => 2,
        };
        counts[slot] += 1;
    }

    ReportSummary {
        status_counts: Severity::ALL
            .into_iter()
            .zip(counts)
            .collect(),
        ratios,
    }
}

/// Sink for the human-facing report artifact.
///
/// Implementations receive the full history (edit scripts, rendered
/// fallback text, severities, ratios) plus the precomputed summary; nothing
/// else is needed to reproduce the report.
pub trait ReportRenderer {
    /// Produce the report artifact.
    fn render(&self, history: &History, summary: &ReportSummary) -> Result<(), DriftError>;
}

/// Plain-text reference renderer: one row per record plus the summary
/// block, written atomically to a configured path. Spreadsheet rendering
/// with rich-text highlighting lives outside this crate and consumes the
/// same inputs.
#[derive(Clone, Debug)]
pub struct TextReportRenderer {
    path: PathBuf,
}

impl TextReportRenderer {
    /// Create a renderer writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportRenderer for TextReportRenderer {
    fn render(&self, history: &History, summary: &ReportSummary) -> Result<(), DriftError> {
        let mut out = String::new();
        out.push_str("ID\tStatus\tChange Ratio (%)\tDiff\n");
        for record in history.records() {
            let diff_cell = record.rendered_diff.replace('\n', "; ");
            out.push_str(&format!(
                "{}\t{}\t{:.2}\t{}\n",
                record.id, record.severity, record.change_ratio_percent, diff_cell
            ));
        }

        out.push_str("\nStatus counts\n");
        for (severity, count) in &summary.status_counts {
            out.push_str(&format!("{severity}\t{count}\n"));
        }

        out.push_str("\nChange ratios\n");
        for (id, ratio) in &summary.ratios {
            out.push_str(&format!("{id}\t{ratio:.2}\n"));
        }

        ensure_parent_dir(&self.path)?;
        atomic_write(&self.path, out.as_bytes()).map_err(|err| DriftError::StoreUnavailable {
            path: self.path.clone(),
            reason: err.to_string(),
        })
    }
}

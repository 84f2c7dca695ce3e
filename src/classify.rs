//! Change-magnitude classification over edit scripts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::classify::{EMPTY_SOURCE_RATIO, MAJOR_RATIO};
use crate::diff::{EditOp, EditTag};

/// Three-level change classification derived from the removal ratio.
///
/// Serialized as the status labels the history format has always used, so
/// files written by earlier versions of the tool keep loading unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Not a single source word was removed.
    #[serde(rename = "No changes")]
    NoChange,
    /// Less than half of the source words were removed.
    #[serde(rename = "Minor changes")]
    Minor,
    /// At least half of the source words were removed.
    #[serde(rename = "Major changes")]
    Major,
}

impl Severity {
    /// The persisted status label for this severity.
    pub fn label(self) -> &'static str {
        match self {
            Severity::NoChange => "No changes",
            Severity::Minor => "Minor changes",
            Severity::Major => "Major changes",
        }
    }

    /// Parse a persisted status label. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "No changes" => Some(Severity::NoChange),
            "Minor changes" => Some(Severity::Minor),
            "Major changes" => Some(Severity::Major),
            _ => None,
        }
    }

    /// All severities in report ordering.
    pub const ALL: [Severity; 3] = [Severity::NoChange, Severity::Minor, Severity::Major];
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of classifying one edit script.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChangeMeasure {
    /// Removal ratio as a percentage, 0 to 100.
    pub ratio_percent: f64,
    /// Severity mapped from the raw (pre-percent) ratio.
    pub severity: Severity,
}

/// Reduce an edit script to a removal ratio and severity.
///
/// The source word count is reconstructed from the script itself (removed
/// plus unchanged tags), so added-word volume never influences the ratio.
/// An empty source description is treated as a complete change rather than
/// an error. Thresholds are applied to the raw ratio, before the value is
/// scaled for display, so rounding cannot shift a boundary case.
pub fn classify(script: &[EditOp]) -> ChangeMeasure {
    let removed = script
        .iter()
        .filter(|op| op.tag == EditTag::Removed)
        .count();
    let unchanged = script
        .iter()
        .filter(|op| op.tag == EditTag::Unchanged)
        .count();
    let source_len = removed + unchanged;

    let ratio = if source_len == 0 {
        EMPTY_SOURCE_RATIO
    } else {
        removed as f64 / source_len as f64
    };
    let severity = if ratio == 0.0 {
        Severity::NoChange
    } else if ratio < MAJOR_RATIO {
        Severity::Minor
    } else {
        Severity::Major
    };

    ChangeMeasure {
        ratio_percent: ratio * 100.0,
        severity,
    }
}

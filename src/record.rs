//! Persisted comparison record type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::{classify, Severity};
use crate::diff::{render_diff, word_diff, EditOp};
use crate::errors::DriftError;
use crate::tokenize;
use crate::types::RecordId;

/// One recorded comparison between a requirement description and the
/// matching test-case description. Immutable after creation; a repeat
/// comparison for the same id is rejected by the history, never merged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    /// Primary key, unique across the history (case-sensitive).
    pub id: RecordId,
    /// Description text from the requirements system.
    pub source_description: String,
    /// Description text from the test system.
    pub target_description: String,
    /// Word-level edit script; empty for rows migrated from the legacy
    /// positional format, which triggers fallback rendering downstream.
    #[serde(default)]
    pub edit_script: Vec<EditOp>,
    /// Human-readable rendering derived from `edit_script`.
    pub rendered_diff: String,
    /// Change classification.
    pub severity: Severity,
    /// Removal ratio as a percentage, 0 to 100.
    pub change_ratio_percent: f64,
    /// When the comparison was accepted; `None` for migrated legacy rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl ComparisonRecord {
    /// Run the full diff-and-classify pipeline over one description pair.
    ///
    /// The id must be non-blank; the descriptions may be empty (an empty
    /// source counts as a 100% change by convention).
    pub fn compare(
        id: impl Into<RecordId>,
        source_description: impl Into<String>,
        target_description: impl Into<String>,
    ) -> Result<Self, DriftError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DriftError::MalformedInput(
                "comparison id must not be empty".to_string(),
            ));
        }
        let source_description = source_description.into();
        let target_description = target_description.into();

        let source_words = tokenize::words(&source_description);
        let target_words = tokenize::words(&target_description);
        let edit_script = word_diff(&source_words, &target_words);
        let measure = classify(&edit_script);
        let rendered_diff = render_diff(&edit_script);

        Ok(Self {
            id,
            source_description,
            target_description,
            edit_script,
            rendered_diff,
            severity: measure.severity,
            change_ratio_percent: measure.ratio_percent,
            recorded_at: Some(Utc::now()),
        })
    }
}

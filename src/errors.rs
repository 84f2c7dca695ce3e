use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::{RecordId, SourceId};

/// Error type for comparison input, persistence, and source failures.
#[derive(Debug, Error)]
pub enum DriftError {
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("record '{id}' already exists in the history")]
    DuplicateRecord { id: RecordId },
    #[error("history store '{}' is unavailable: {reason}", path.display())]
    StoreUnavailable { path: PathBuf, reason: String },
    #[error("description source '{source_id}' is unavailable: {reason}")]
    SourceUnavailable { source_id: SourceId, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

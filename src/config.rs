//! Run configuration passed into the entry point.

use std::path::PathBuf;

use crate::constants::report::DEFAULT_REPORT_FILENAME;
use crate::constants::store::DEFAULT_STORE_FILENAME;

/// Explicit configuration for one drift-tracking run.
///
/// Every location the process touches is enumerated here and handed in by
/// the caller; there are no module-level paths or process-wide singletons.
#[derive(Clone, Debug)]
pub struct DriftConfig {
    /// Folder holding requirement description artifacts, when scanning.
    pub source_root: Option<PathBuf>,
    /// Folder holding test-case description artifacts, when scanning.
    pub target_root: Option<PathBuf>,
    /// Persisted history file.
    pub store_path: PathBuf,
    /// Rendered report output file.
    pub report_path: PathBuf,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            source_root: None,
            target_root: None,
            store_path: PathBuf::from(DEFAULT_STORE_FILENAME),
            report_path: PathBuf::from(DEFAULT_REPORT_FILENAME),
        }
    }
}

impl DriftConfig {
    /// Override the requirements artifact folder.
    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_root = Some(root.into());
        self
    }

    /// Override the test-case artifact folder.
    pub fn with_target_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.target_root = Some(root.into());
        self
    }

    /// Override the history file path.
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    /// Override the report output path.
    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = path.into();
        self
    }
}

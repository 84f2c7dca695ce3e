//! Centralized constants used across the diff engine, classifier, and stores.

/// Diff rendering markers.
pub mod diff {
    /// Suffix appended to a word that exists only in the source description.
    pub const REMOVED_MARKER: &str = "[difference]";
    /// Suffix appended to a word that exists only in the target description.
    pub const ADDED_MARKER: &str = "[added]";
    /// Placeholder rendered when the edit script contains no changes.
    pub const NO_DIFFERENCES: &str = "No differences";
}

/// Classification thresholds. Fixed by design, not configuration.
pub mod classify {
    /// Removal ratio at or above which a change is classified as major.
    pub const MAJOR_RATIO: f64 = 0.5;
    /// Ratio assigned when the source description has no words at all.
    pub const EMPTY_SOURCE_RATIO: f64 = 1.0;
}

/// History store defaults.
pub mod store {
    /// Default history file name when only a directory is given.
    pub const DEFAULT_STORE_FILENAME: &str = "drift_history.json";
}

/// Report defaults.
pub mod report {
    /// Default report file name.
    pub const DEFAULT_REPORT_FILENAME: &str = "drift_report.txt";
}

//! Description source interfaces and pairing helpers.
//!
//! A source is any collaborator that can hand over `(id, description)`
//! pairs: a requirements-management export, a folder of test-case
//! artifacts, or an in-memory fixture. The comparison pipeline only ever
//! sees validated entries; how they were obtained stays behind the trait.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::errors::DriftError;
use crate::types::{RecordId, SourceId};

/// Filesystem-backed source scanning a folder of description artifacts.
pub mod folder;

pub use folder::{read_description_file, FolderSource};

/// One `(id, description)` pair supplied by a source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DescriptionEntry {
    /// Requirement/test-case identifier.
    pub id: RecordId,
    /// Raw description text.
    pub description: String,
}

impl DescriptionEntry {
    /// Build an entry from borrowed parts.
    pub fn new(id: impl Into<RecordId>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}

/// A collaborator that supplies description entries for comparison.
pub trait DescriptionSource {
    /// Stable source identifier used in logs and errors.
    fn id(&self) -> &str;
    /// Fetch all available entries.
    ///
    /// A single bad record must not abort the batch: implementations skip
    /// it (with a warning) and keep going. Fail only when the source as a
    /// whole is unreachable.
    fn fetch(&self) -> Result<Vec<DescriptionEntry>, DriftError>;
}

/// In-memory source for tests and embedding callers.
pub struct InMemorySource {
    id: SourceId,
    entries: Vec<DescriptionEntry>,
}

impl InMemorySource {
    /// Create a source from prebuilt entries.
    pub fn new(id: impl Into<SourceId>, entries: Vec<DescriptionEntry>) -> Self {
        Self {
            id: id.into(),
            entries,
        }
    }
}

impl DescriptionSource for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn fetch(&self) -> Result<Vec<DescriptionEntry>, DriftError> {
        Ok(self.entries.clone())
    }
}

/// A description pair matched by id across the two sources.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchedPair {
    /// Shared requirement/test-case identifier.
    pub id: RecordId,
    /// Description from the requirements side.
    pub source_description: String,
    /// Description from the test side.
    pub target_description: String,
}

/// Pair source entries with target entries by exact id.
///
/// Output follows the source side's order. Unmatched ids on either side
/// and repeated ids within one side are logged and dropped; they never
/// abort the batch.
pub fn match_pairs(
    source_entries: Vec<DescriptionEntry>,
    target_entries: Vec<DescriptionEntry>,
) -> Vec<MatchedPair> {
    let mut targets: HashMap<RecordId, String> = HashMap::with_capacity(target_entries.len());
    for entry in target_entries {
        if targets.contains_key(&entry.id) {
            warn!(id = %entry.id, "dropping repeated target entry");
            continue;
        }
        targets.insert(entry.id, entry.description);
    }

    let mut pairs = Vec::new();
    let mut seen_source: HashSet<RecordId> = HashSet::new();
    for entry in source_entries {
        if !seen_source.insert(entry.id.clone()) {
            warn!(id = %entry.id, "dropping repeated source entry");
            continue;
        }
        match targets.remove(&entry.id) {
            Some(target_description) => pairs.push(MatchedPair {
                id: entry.id,
                source_description: entry.description,
                target_description,
            }),
            None => warn!(id = %entry.id, "no target description for id, skipping"),
        }
    }
    for id in targets.keys() {
        warn!(%id, "no source description for id, skipping");
    }
    pairs
}

//! Deduplicated comparison history and its file-backed store.
//!
//! The on-disk format is a JSON array. Current entries are structured
//! record objects; files written by the original tooling may still contain
//! legacy positional rows `[id, source, target, rendered, status, ratio]`.
//! Legacy rows are upgraded on every load (one-way, idempotent) so core
//! logic only ever sees `ComparisonRecord`.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::classify::Severity;
use crate::constants::store::DEFAULT_STORE_FILENAME;
use crate::errors::DriftError;
use crate::record::ComparisonRecord;
use crate::types::RecordId;

/// Insertion-ordered, id-unique collection of comparison records.
#[derive(Clone, Debug, Default)]
pub struct History {
    records: IndexMap<RecordId, ComparisonRecord>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record` at the end.
    ///
    /// Fails with [`DriftError::DuplicateRecord`] when the id is already
    /// present (case-sensitive exact match); the existing record and the
    /// history as a whole are left untouched in that case.
    pub fn append(&mut self, record: ComparisonRecord) -> Result<(), DriftError> {
        if self.records.contains_key(&record.id) {
            return Err(DriftError::DuplicateRecord { id: record.id });
        }
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    /// Whether a record with `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&ComparisonRecord> {
        self.records.get(id)
    }

    /// Number of recorded comparisons.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the history holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &ComparisonRecord> {
        self.records.values()
    }
}

// Equality is order-sensitive: insertion order is part of the history's
// meaning, unlike the map's own order-insensitive comparison.
impl PartialEq for History {
    fn eq(&self, other: &Self) -> bool {
        self.records.len() == other.records.len()
            && self.records().zip(other.records()).all(|(a, b)| a == b)
    }
}

/// Legacy positional row: id, source, target, rendered text, status label,
/// ratio percent. Carries no edit script.
type LegacyRow = (RecordId, String, String, String, String, f64);

/// On-disk shape of one history entry. Lives at the storage boundary
/// only; never constructed by core logic.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredEntry {
    Structured(ComparisonRecord),
    Legacy(LegacyRow),
}

/// File-backed history store with whole-collection reads and writes.
#[derive(Clone, Debug)]
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    /// Create a store addressing `path`. A directory path is coerced to the
    /// default history file name inside it. The file itself may not exist
    /// yet; that reads as an empty history.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let path = if path.is_dir() {
            path.join(DEFAULT_STORE_FILENAME)
        } else {
            path
        };
        Self { path }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted history, upgrading any legacy rows.
    pub fn load(&self) -> Result<History, DriftError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "history file absent, starting empty");
            return Ok(History::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|err| self.unavailable(err))?;
        let entries: Vec<StoredEntry> = serde_json::from_str(&raw)
            .map_err(|err| self.unavailable(format!("could not parse history: {err}")))?;

        let mut history = History::new();
        for entry in entries {
            let record = self.upgrade(entry)?;
            match history.append(record) {
                Ok(()) => {}
                Err(DriftError::DuplicateRecord { id }) => {
                    warn!(%id, "skipping duplicate id while loading history");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(history)
    }

    /// Write the full history back, replacing prior content.
    ///
    /// The payload goes to a sibling temp file first and is renamed over
    /// the store atomically, so a reader holding the previous file open
    /// never observes a partial write.
    pub fn persist(&self, history: &History) -> Result<(), DriftError> {
        ensure_parent_dir(&self.path)?;
        let records: Vec<&ComparisonRecord> = history.records().collect();
        let payload = serde_json::to_string_pretty(&records)
            .map_err(|err| self.unavailable(format!("could not serialize history: {err}")))?;
        atomic_write(&self.path, payload.as_bytes()).map_err(|err| self.unavailable(err))
    }

    fn upgrade(&self, entry: StoredEntry) -> Result<ComparisonRecord, DriftError> {
        match entry {
            StoredEntry::Structured(record) => Ok(record),
            StoredEntry::Legacy((id, source, target, rendered, status, ratio)) => {
                let severity = Severity::from_label(&status).ok_or_else(|| {
                    self.unavailable(format!(
                        "legacy record '{id}' has unknown status label '{status}'"
                    ))
                })?;
                Ok(ComparisonRecord {
                    id,
                    source_description: source,
                    target_description: target,
                    edit_script: Vec::new(),
                    rendered_diff: rendered,
                    severity,
                    change_ratio_percent: ratio,
                    recorded_at: None,
                })
            }
        }
    }

    fn unavailable(&self, reason: impl ToString) -> DriftError {
        DriftError::StoreUnavailable {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Write `contents` to `path` via a sibling temp file and atomic rename.
pub(crate) fn atomic_write(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut temp_name = OsString::from(path.as_os_str());
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);
    fs::write(&temp_path, contents)?;
    fs::rename(&temp_path, path)
}

/// Create the parent directory of `path` when it has one.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), DriftError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

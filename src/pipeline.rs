//! Comparison pipeline: load, duplicate-checked append, persist.

use tracing::{debug, warn};

use crate::errors::DriftError;
use crate::history::{FileHistoryStore, History};
use crate::record::ComparisonRecord;
use crate::source::{match_pairs, DescriptionSource};

/// Record one comparison as a single logical transaction.
///
/// Loads the history, appends `record`, and persists the result. A
/// duplicate id aborts before anything is written, so the store on disk is
/// never touched by a rejected comparison. The process assumes no
/// concurrent writer; the store itself guards against partial writes via
/// its atomic rename, but simultaneous load-append-persist cycles from two
/// processes would still need an external lock.
pub fn record_comparison(
    store: &FileHistoryStore,
    record: ComparisonRecord,
) -> Result<History, DriftError> {
    let mut history = store.load()?;
    history.append(record)?;
    store.persist(&history)?;
    Ok(history)
}

/// Tally of one batch run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Newly recorded comparisons.
    pub accepted: usize,
    /// Pairs rejected because their id was already recorded.
    pub duplicates: usize,
    /// Pairs skipped as malformed input.
    pub malformed: usize,
}

/// Compare every id matched across two sources and record the results.
///
/// Duplicates and malformed pairs are tallied and skipped; they never
/// abort the rest of the batch. The history is persisted once, and only
/// when at least one comparison was accepted.
pub fn run_batch(
    store: &FileHistoryStore,
    source: &dyn DescriptionSource,
    target: &dyn DescriptionSource,
) -> Result<(History, BatchOutcome), DriftError> {
    let mut history = store.load()?;
    let source_entries = source.fetch()?;
    let target_entries = target.fetch()?;
    let pairs = match_pairs(source_entries, target_entries);

    let mut outcome = BatchOutcome::default();
    for pair in pairs {
        let record = match ComparisonRecord::compare(
            pair.id.clone(),
            pair.source_description,
            pair.target_description,
        ) {
            Ok(record) => record,
            Err(err) => {
                warn!(id = %pair.id, %err, "skipping malformed pair");
                outcome.malformed += 1;
                continue;
            }
        };
        match history.append(record) {
            Ok(()) => outcome.accepted += 1,
            Err(DriftError::DuplicateRecord { id }) => {
                debug!(%id, "already recorded, skipping");
                outcome.duplicates += 1;
            }
            Err(err) => return Err(err),
        }
    }

    if outcome.accepted > 0 {
        store.persist(&history)?;
    }
    Ok((history, outcome))
}

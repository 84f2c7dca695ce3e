use std::fs;

use tempfile::tempdir;

use reqdrift::{ComparisonRecord, DriftError, FileHistoryStore, History, Severity};

fn record(id: &str, source: &str, target: &str) -> ComparisonRecord {
    ComparisonRecord::compare(id, source, target).unwrap()
}

#[test]
fn full_history_round_trips_through_the_store() {
    let dir = tempdir().unwrap();
    let store = FileHistoryStore::open(dir.path().join("history.json"));

    let mut history = History::new();
    history
        .append(record("REQ-1", "unchanged text", "unchanged text"))
        .unwrap();
    history
        .append(record("REQ-2", "the old wording here", "the new wording here"))
        .unwrap();
    history.append(record("REQ-3", "", "grew from nothing")).unwrap();
    store.persist(&history).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded, history);
}

#[test]
fn duplicate_append_signals_and_preserves_the_first_record() {
    let dir = tempdir().unwrap();
    let store = FileHistoryStore::open(dir.path().join("history.json"));

    let first = record("REQ-1", "first version", "first version");
    let mut history = History::new();
    history.append(first.clone()).unwrap();
    store.persist(&history).unwrap();

    let mut reloaded = store.load().unwrap();
    let err = reloaded
        .append(record("REQ-1", "second version", "changed version"))
        .unwrap_err();
    assert!(matches!(err, DriftError::DuplicateRecord { ref id } if id == "REQ-1"));
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.get("REQ-1"), Some(&first));
}

#[test]
fn legacy_file_written_by_the_original_tool_still_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    // Positional rows: id, source, target, rendered, status, ratio percent.
    let raw = r#"[
        ["REQ-100", "brake engages", "brake engages", "No differences", "No changes", 0.0],
        ["REQ-101", "old sensor text", "new sensor text", "old[difference]\nnew[added]", "Minor changes", 33.33],
        ["REQ-102", "fully replaced", "something else entirely", "", "Major changes", 100.0]
    ]"#;
    fs::write(&path, raw).unwrap();

    let store = FileHistoryStore::open(&path);
    let history = store.load().unwrap();
    assert_eq!(history.len(), 3);

    let minor = history.get("REQ-101").unwrap();
    assert_eq!(minor.severity, Severity::Minor);
    assert!(minor.edit_script.is_empty());
    assert_eq!(minor.rendered_diff, "old[difference]\nnew[added]");
    assert!(minor.recorded_at.is_none());

    // Once persisted, the file holds only structured records.
    store.persist(&history).unwrap();
    let rewritten = fs::read_to_string(&path).unwrap();
    assert!(rewritten.contains("\"source_description\""));
    let again = store.load().unwrap();
    assert_eq!(again, history);
}

#[test]
fn duplicate_ids_in_legacy_data_keep_the_first_occurrence() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    let raw = r#"[
        ["REQ-1", "first", "first", "No differences", "No changes", 0.0],
        ["REQ-1", "second", "other", "x[difference]", "Major changes", 100.0]
    ]"#;
    fs::write(&path, raw).unwrap();

    let history = FileHistoryStore::open(&path).load().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history.get("REQ-1").unwrap().severity, Severity::NoChange);
}

#[test]
fn absent_store_is_an_empty_history_not_an_error() {
    let dir = tempdir().unwrap();
    let store = FileHistoryStore::open(dir.path().join("never_written.json"));
    assert!(store.load().unwrap().is_empty());
}
